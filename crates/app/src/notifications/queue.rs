//! Notification queue and delivery worker.

use std::sync::Arc;

use shopfront::notifications::WarrantyNotice;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, error, warn};

use crate::notifications::Notifier;

/// Sending half of the notification queue.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: UnboundedSender<WarrantyNotice>,
}

impl NotificationQueue {
    /// Create a queue and hand back its receiving end.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<WarrantyNotice>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (Self { sender }, receiver)
    }

    /// Create a queue drained by a background worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(notifier: Arc<dyn Notifier>) -> (Self, JoinHandle<()>) {
        let (queue, receiver) = Self::channel();

        let worker = tokio::spawn(run_worker(receiver, notifier));

        (queue, worker)
    }

    /// Queue a notice for delivery.
    ///
    /// Never fails: if the worker has stopped, the notice is dropped with a warning.
    pub fn enqueue(&self, notice: WarrantyNotice) {
        debug!(to = %notice.to, "queueing warranty notice");

        if let Err(returned) = self.sender.send(notice) {
            warn!(
                to = %returned.0.to,
                "notification worker stopped; dropping warranty notice"
            );
        }
    }
}

/// Deliver queued notices until every sender is dropped.
pub async fn run_worker(mut receiver: UnboundedReceiver<WarrantyNotice>, notifier: Arc<dyn Notifier>) {
    while let Some(notice) = receiver.recv().await {
        match notifier.send(&notice).await {
            Ok(()) => debug!(to = %notice.to, "warranty notice sent"),
            Err(source) => error!(to = %notice.to, "failed to send warranty notice: {source}"),
        }
    }
}
