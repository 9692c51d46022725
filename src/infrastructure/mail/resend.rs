use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    entities::email::{DeliveryReceipt, OutgoingEmail},
    errors::MailError,
    repositories::mailer::EmailSender,
};

/// Error body returned by the Resend API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Client for `POST /emails` on the Resend HTTP API.
#[derive(Clone, Debug)]
pub struct ResendMailer {
    client: Client,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let response = self.client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = provider_message(status, &response.text().await.unwrap_or_default());
            tracing::warn!("Resend rejected email ({}): {}", status, message);
            return Err(MailError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<DeliveryReceipt>()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))
    }
}

fn provider_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ResendErrorBody>(body) {
        Ok(ResendErrorBody { message: Some(message), .. }) => message,
        Ok(ResendErrorBody { name: Some(name), .. }) => name,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}
