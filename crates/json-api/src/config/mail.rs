//! Mail Config

use clap::Args;
use shopfront_app::notifications::GmailConfig;

/// Gmail API credentials for warranty confirmation emails.
///
/// Every field must be set for mail to be sent; otherwise notices are only logged.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// OAuth client ID
    #[arg(long, env = "GMAIL_CLIENT_ID")]
    pub gmail_client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, env = "GMAIL_CLIENT_SECRET", hide_env_values = true)]
    pub gmail_client_secret: Option<String>,

    /// OAuth refresh token for the sending account
    #[arg(long, env = "GMAIL_REFRESH_TOKEN", hide_env_values = true)]
    pub gmail_refresh_token: Option<String>,

    /// `From` address, e.g. `Corner Phones <shop@example.com>`
    #[arg(long, env = "GMAIL_SENDER")]
    pub gmail_sender: Option<String>,
}

impl MailConfig {
    /// Gmail settings, when fully configured.
    #[must_use]
    pub fn gmail(&self) -> Option<GmailConfig> {
        Some(GmailConfig {
            client_id: self.gmail_client_id.clone()?,
            client_secret: self.gmail_client_secret.clone()?,
            refresh_token: self.gmail_refresh_token.clone()?,
            sender: self.gmail_sender.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> MailConfig {
        MailConfig {
            gmail_client_id: Some("client".to_string()),
            gmail_client_secret: Some("secret".to_string()),
            gmail_refresh_token: Some("refresh".to_string()),
            gmail_sender: Some("shop@example.com".to_string()),
        }
    }

    #[test]
    fn complete_settings_select_gmail() {
        let gmail = configured().gmail();

        assert_eq!(
            gmail.map(|config| config.sender).as_deref(),
            Some("shop@example.com")
        );
    }

    #[test]
    fn any_missing_setting_disables_gmail() {
        let config = MailConfig {
            gmail_refresh_token: None,
            ..configured()
        };

        assert!(config.gmail().is_none(), "partial config should not enable gmail");
    }
}
