//! API token formatting, parsing and hashing.

use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::ApiTokenUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

const API_TOKEN_SECRET_HEX_CHARS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Build a fresh raw token for `token_uuid`: `sf_{uuid}.{64 hex chars}`.
#[must_use]
pub fn generate_api_token(token_uuid: ApiTokenUuid) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}.{}{}",
        token_uuid.into_uuid().simple(),
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple(),
    )
}

/// Extract the token UUID, rejecting anything that is not shaped like an issued token.
///
/// # Errors
///
/// Returns [`ApiTokenError`] when the prefix, UUID or secret segment is malformed.
pub fn parse_api_token(token: &str) -> Result<ApiTokenUuid, ApiTokenError> {
    let (prefix_and_id, secret) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let (prefix, token_uuid) = prefix_and_id
        .split_once('_')
        .ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let token_uuid = Uuid::try_parse(token_uuid).map_err(|_| ApiTokenError::InvalidFormat)?;

    if secret.len() != API_TOKEN_SECRET_HEX_CHARS
        || !secret.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    Ok(ApiTokenUuid::from_uuid(token_uuid))
}

/// Lowercase hex SHA-256 digest stored in place of the raw token.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn generated_token_parses_back_to_its_uuid() -> TestResult {
        let token_uuid = ApiTokenUuid::new();

        let token = generate_api_token(token_uuid);

        assert!(token.starts_with("sf_"));
        assert_eq!(parse_api_token(&token)?, token_uuid);

        Ok(())
    }

    #[test]
    fn generated_tokens_differ() {
        let token_uuid = ApiTokenUuid::new();

        assert_ne!(generate_api_token(token_uuid), generate_api_token(token_uuid));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = generate_api_token(ApiTokenUuid::new()).replacen("sf_", "lt_", 1);

        assert_eq!(parse_api_token(&token), Err(ApiTokenError::InvalidFormat));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let token = format!("sf_{}.abcd", Uuid::nil().simple());

        assert_eq!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidSecretEncoding)
        );
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
