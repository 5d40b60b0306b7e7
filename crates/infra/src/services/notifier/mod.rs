mod webhook;

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::info;
pub use webhook::WebhookNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingReceived,
    PaymentCompleted,
    PaymentFailed,
    PaymentRefunded,
    WaitlistSpotAvailable,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingReceived => "booking_received",
            Self::PaymentCompleted => "payment_completed",
            Self::PaymentFailed => "payment_failed",
            Self::PaymentRefunded => "payment_refunded",
            Self::WaitlistSpotAvailable => "waitlist_spot_available",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Email address of the customer
    pub recipient: String,
    pub kind: NotificationKind,
    pub payload: serde_json::Value,
}

/// Hands notifications over to whatever renders and delivers them.
/// Delivery is best effort and callers never wait for the customer to be reached.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()>;
}

/// Used when no webhook is configured
pub struct LogNotifier;

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        info!(
            recipient = %notification.recipient,
            kind = notification.kind.as_str(),
            payload = %notification.payload,
            "Notification dispatched"
        );
        Ok(())
    }
}

/// Keeps every notification in memory so that tests can inspect them
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_notifications() {
        let notifier = InMemoryNotifier::new();
        notifier
            .notify(Notification {
                recipient: "ada@example.com".into(),
                kind: NotificationKind::WaitlistSpotAvailable,
                payload: serde_json::json!({ "position": 1 }),
            })
            .await
            .expect("To notify");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::WaitlistSpotAvailable);
        assert_eq!(
            serde_json::to_value(&sent[0]).expect("To serialize")["kind"],
            "waitlist_spot_available"
        );
    }
}
