use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::{
    entities::{
        contact::ValidSubmission,
        email::{DeliveryReceipt, OutgoingEmail},
    },
    errors::{ConfigurationError, DispatchError, MailError},
    mail::templates::{self, Signature},
    repositories::mailer::EmailSender,
    settings::AppConfig,
};

/// Provider credentials, addresses and the per-send bound.
#[derive(Clone)]
pub struct MailSettings {
    pub api_key: Option<Zeroizing<String>>,
    pub receiving_email: Option<String>,
    pub notification_from: String,
    pub auto_reply_from: String,
    pub signature: Signature,
    pub send_timeout: Duration,
}

impl MailSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        MailSettings {
            api_key: non_blank(config.resend_api_key.as_deref()).map(|k| Zeroizing::new(k.to_string())),
            receiving_email: non_blank(config.receiving_email.as_deref()).map(str::to_string),
            notification_from: config.notification_from.clone(),
            auto_reply_from: config.auto_reply_from.clone(),
            signature: Signature {
                name: config.owner_name.clone(),
                title: config.owner_title.clone(),
                linkedin_url: config.linkedin_url.clone(),
                github_url: config.github_url.clone(),
            },
            send_timeout: config.mail_timeout(),
        }
    }

    /// API key first, then the receiving address.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigurationError> {
        let api_key = self.api_key
            .as_deref()
            .map(String::as_str)
            .ok_or(ConfigurationError::MissingApiKey)?;
        let receiving = self.receiving_email
            .as_deref()
            .ok_or(ConfigurationError::MissingReceivingEmail)?;
        Ok((api_key, receiving))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("receiving_email", &self.receiving_email)
            .field("notification_from", &self.notification_from)
            .field("auto_reply_from", &self.auto_reply_from)
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}

/// What a failing step does to the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the pipeline and fail the request.
    Required,
    /// Log, record and carry on.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Notification,
    Acknowledgment,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Notification => write!(f, "notification"),
            StepKind::Acknowledgment => write!(f, "acknowledgment"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchStep {
    pub kind: StepKind,
    pub policy: FailurePolicy,
    pub email: OutgoingEmail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Delivered(DeliveryReceipt),
    Failed(MailError),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub steps: Vec<(StepKind, StepOutcome)>,
}

impl DispatchOutcome {
    pub fn get(&self, kind: StepKind) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    pub fn acknowledged(&self) -> bool {
        matches!(self.get(StepKind::Acknowledgment), Some(StepOutcome::Delivered(_)))
    }
}

/// Sends the owner notification, then the sender acknowledgment.
#[derive(Clone)]
pub struct Dispatcher<M> {
    pub mailer: M,
    settings: Arc<MailSettings>,
}

impl<M> Dispatcher<M>
where
    M: EmailSender,
{
    pub fn new(mailer: M, settings: MailSettings) -> Self {
        Dispatcher {
            mailer,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Builds the ordered steps for one submission.
    pub fn plan(
        &self,
        submission: &ValidSubmission,
        receiving_email: &str,
        sent_at: DateTime<Utc>,
    ) -> Vec<DispatchStep> {
        let settings = &self.settings;

        let notification = OutgoingEmail::new(
            &settings.notification_from,
            receiving_email,
            templates::notification_subject(submission),
            templates::notification_html(submission, sent_at),
        )
        .reply_to(&submission.email);

        let acknowledgment = OutgoingEmail::new(
            &settings.auto_reply_from,
            &submission.email,
            templates::AUTO_REPLY_SUBJECT,
            templates::auto_reply_html(&submission.name, &settings.signature),
        );

        vec![
            DispatchStep {
                kind: StepKind::Notification,
                policy: FailurePolicy::Required,
                email: notification,
            },
            DispatchStep {
                kind: StepKind::Acknowledgment,
                policy: FailurePolicy::BestEffort,
                email: acknowledgment,
            },
        ]
    }

    pub async fn dispatch(&self, submission: &ValidSubmission) -> Result<DispatchOutcome, DispatchError> {
        let (api_key, receiving_email) = self.settings
            .credentials()
            .inspect_err(|e| tracing::error!("Mail configuration error: {}", e))
            .map_err(DispatchError::Configuration)?;

        let mut outcome = DispatchOutcome::default();

        for step in self.plan(submission, receiving_email, Utc::now()) {
            match self.send_step(api_key, &step).await {
                Ok(receipt) => {
                    tracing::info!(step = %step.kind, id = %receipt.id, "Email sent");
                    outcome.steps.push((step.kind, StepOutcome::Delivered(receipt)));
                }
                Err(e) => match step.policy {
                    FailurePolicy::Required => {
                        tracing::error!(step = %step.kind, "Failed to send email: {}", e);
                        return Err(DispatchError::Notification(e));
                    }
                    FailurePolicy::BestEffort => {
                        tracing::warn!(step = %step.kind, "Failed to send email, continuing: {}", e);
                        outcome.steps.push((step.kind, StepOutcome::Failed(e)));
                    }
                },
            }
        }

        Ok(outcome)
    }

    async fn send_step(&self, api_key: &str, step: &DispatchStep) -> Result<DeliveryReceipt, MailError> {
        let timeout = self.settings.send_timeout;
        tokio::time::timeout(timeout, self.mailer.send(api_key, &step.email))
            .await
            .map_err(|_| MailError::Timeout(timeout))?
    }
}
