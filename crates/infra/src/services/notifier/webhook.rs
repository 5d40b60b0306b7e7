use super::{INotifier, Notification};
use anyhow::Context;
use reqwest::Client;
use tracing::error;

/// Posts every `Notification` as JSON to the configured webhook url
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .json(&notification)
            .send()
            .await
            .with_context(|| format!("Unable to reach notification webhook: {}", self.url))?;

        if let Err(e) = res.error_for_status_ref() {
            error!(
                "Notification webhook responded with an error for {:?}: {:?}",
                notification.kind, e
            );
            return Err(e.into());
        }
        Ok(())
    }
}
