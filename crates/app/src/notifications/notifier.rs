//! Notification delivery.

use async_trait::async_trait;
use mockall::automock;
use shopfront::notifications::WarrantyNotice;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("{0} header contains a control character")]
    UnsafeHeader(&'static str),
}

/// Delivers a composed notice to its recipient.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &WarrantyNotice) -> Result<(), NotifierError>;
}

/// Writes notices to the log instead of sending them.
///
/// Used when no mail provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notice: &WarrantyNotice) -> Result<(), NotifierError> {
        info!(
            to = %notice.to,
            subject = %notice.subject,
            "mail not configured; warranty notice logged instead of sent"
        );

        Ok(())
    }
}
