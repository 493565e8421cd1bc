//! Gmail API mailer.

use async_trait::async_trait;
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE},
};
use reqwest::Client;
use serde::Deserialize;
use shopfront::notifications::WarrantyNotice;

use crate::notifications::{Notifier, NotifierError};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// OAuth client credentials and the mailbox notices are sent from.
#[derive(Debug, Clone)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,

    /// `From` address; must belong to the authorised account.
    pub sender: String,
}

/// Sends notices through the Gmail API using a long-lived refresh token.
#[derive(Debug, Clone)]
pub struct GmailNotifier {
    config: GmailConfig,
    http: Client,
}

impl GmailNotifier {
    #[must_use]
    pub fn new(config: GmailConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Exchange the refresh token for a short-lived access token.
    async fn access_token(&self) -> Result<String, NotifierError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotifierError::UnexpectedResponse(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl Notifier for GmailNotifier {
    async fn send(&self, notice: &WarrantyNotice) -> Result<(), NotifierError> {
        let access_token = self.access_token().await?;

        let raw = URL_SAFE.encode(build_message(&self.config.sender, notice)?);

        let response = self
            .http
            .post(SEND_URL)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotifierError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Render a plain-text RFC 5322 message.
///
/// Header values carrying CR, LF or any other control character are refused.
fn build_message(sender: &str, notice: &WarrantyNotice) -> Result<String, NotifierError> {
    let sender = header_value("From", sender)?;
    let to = header_value("To", &notice.to)?;
    let subject = header_value("Subject", &notice.subject)?;

    Ok([
        format!("From: {sender}"),
        format!("To: {to}"),
        format!("Subject: {}", encode_header(subject)),
        "MIME-Version: 1.0".to_string(),
        "Content-Type: text/plain; charset=\"UTF-8\"".to_string(),
        "Content-Transfer-Encoding: base64".to_string(),
        String::new(),
        STANDARD.encode(notice.body.as_bytes()),
    ]
    .join("\r\n"))
}

fn header_value<'a>(name: &'static str, value: &'a str) -> Result<&'a str, NotifierError> {
    if value.chars().any(char::is_control) {
        return Err(NotifierError::UnsafeHeader(name));
    }

    Ok(value)
}

/// RFC 2047 encoded-word for non-ASCII header values.
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn notice(subject: &str) -> WarrantyNotice {
        WarrantyNotice {
            to: "ada@example.com".to_string(),
            subject: subject.to_string(),
            body: "Dear Ada,\n\nYour warranty has been registered.".to_string(),
        }
    }

    #[test]
    fn message_has_headers_then_encoded_body() -> TestResult {
        let message = build_message("shop@example.com", &notice("Warranty registered by Grace"))?;

        let (headers, body) = message.split_once("\r\n\r\n").ok_or("missing blank line")?;

        assert!(headers.starts_with("From: shop@example.com\r\nTo: ada@example.com\r\n"));
        assert!(headers.contains("Subject: Warranty registered by Grace"));
        assert_eq!(
            String::from_utf8(STANDARD.decode(body)?)?,
            "Dear Ada,\n\nYour warranty has been registered."
        );

        Ok(())
    }

    #[test]
    fn line_breaks_in_headers_are_refused() {
        let injected_to = WarrantyNotice {
            to: "ada@example.com\r\nBcc: victim@evil.test".to_string(),
            ..notice("Warranty registered by Grace")
        };
        let injected_subject = notice("Warranty registered by Grace\r\nBcc: victim@evil.test");

        assert!(
            matches!(
                build_message("shop@example.com", &injected_to),
                Err(NotifierError::UnsafeHeader("To"))
            ),
            "expected the To header to be refused"
        );
        assert!(
            matches!(
                build_message("shop@example.com", &injected_subject),
                Err(NotifierError::UnsafeHeader("Subject"))
            ),
            "expected the Subject header to be refused"
        );
    }

    #[test]
    fn non_ascii_subject_is_encoded() {
        assert_eq!(
            encode_header("Garantie enregistrée"),
            format!("=?UTF-8?B?{}?=", STANDARD.encode("Garantie enregistrée"))
        );
        assert_eq!(encode_header("plain"), "plain");
    }
}
