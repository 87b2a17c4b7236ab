//! Push notification dispatch through a OneSignal-style REST endpoint.

use async_trait::async_trait;
use serde_json::json;

use crate::config::Config;
use crate::domain::{coordinator::Notifier, error::SystemError, transaction::Transaction};

pub struct PushNotifier {
    client: reqwest::Client,
    url: String,
    app_id: String,
}

impl PushNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.notifications.url.clone(),
            app_id: config.notifications.app_id.clone(),
        }
    }
}

#[async_trait]
impl Notifier for PushNotifier {
    async fn post(
        &self,
        content: &str,
        summary: &Transaction,
        device_id: &str,
    ) -> Result<(), SystemError> {
        let body = json!({
            "app_id": self.app_id,
            "include_player_ids": [device_id],
            "contents": { "en": content },
            "data": summary,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SystemError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SystemError::RemoteUnavailable(format!(
                "notification endpoint returned {status}"
            )));
        }

        Ok(())
    }
}
