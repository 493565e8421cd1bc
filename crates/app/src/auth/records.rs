//! API Token Records

use jiff::Timestamp;

use crate::{domain::tenants::records::TenantUuid, uuids::TypedUuid};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenRecord>;

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTokenRecord {
    pub uuid: ApiTokenUuid,
    pub tenant_uuid: TenantUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub tenant_uuid: TenantUuid,
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub record: ApiTokenRecord,
}
