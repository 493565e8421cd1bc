//! Customer Notifications
//!
//! Warranty confirmations are composed by the domain services, queued after their transaction
//! commits, and delivered by a background worker so that a slow or failing mail provider never
//! holds up or rolls back a sale.

mod gmail;
mod notifier;
mod queue;

pub use gmail::{GmailConfig, GmailNotifier};
pub use notifier::{LogNotifier, MockNotifier, Notifier, NotifierError};
pub use queue::{NotificationQueue, run_worker};
