use crate::{
    entities::contact::{ContactSubmission, SubmissionReceipt},
    errors::AppError,
    limiter::rate_limiter::FixedWindowLimiter,
    repositories::mailer::EmailSender,
    use_cases::dispatch::Dispatcher,
};

pub struct ContactHandler<M>
where
    M: EmailSender,
{
    pub limiter: FixedWindowLimiter,
    pub dispatcher: Dispatcher<M>,
    /// Attach internal error text to unexpected-error responses.
    pub expose_error_details: bool,
}

impl<M> ContactHandler<M>
where
    M: EmailSender + Clone + 'static,
{
    pub fn new(limiter: FixedWindowLimiter, dispatcher: Dispatcher<M>, expose_error_details: bool) -> Self {
        ContactHandler {
            limiter,
            dispatcher,
            expose_error_details,
        }
    }

    /// Handles one raw form submission from `identity`.
    ///
    /// The rate check runs before the body is decoded, so undecodable bodies
    /// still consume quota. Honeypot hits get the normal success reply and
    /// nothing is sent.
    pub async fn submit(&self, identity: &str, body: &[u8]) -> Result<SubmissionReceipt, AppError> {
        let decision = self.limiter.check(identity);
        if !decision.allowed {
            tracing::warn!("Rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        let submission: ContactSubmission = serde_json::from_slice(body)
            .map_err(|e| AppError::unexpected(e, self.expose_error_details))?;

        tracing::debug!(
            has_name = submission.name.is_some(),
            has_email = submission.email.is_some(),
            has_subject = submission.subject.is_some(),
            has_message = submission.message.is_some(),
            "Received contact form"
        );

        if submission.is_spam() {
            tracing::warn!("Honeypot triggered, dropping submission");
            return Ok(SubmissionReceipt::sent(decision.remaining));
        }

        let valid = submission
            .validate()
            .inspect_err(|e| tracing::info!("Validation failed: {:?}", e))?;

        // Detached so the sends finish even if the client goes away
        let dispatcher = self.dispatcher.clone();
        let outcome = tokio::spawn(async move { dispatcher.dispatch(&valid).await })
            .await
            .map_err(|e| AppError::unexpected(e, self.expose_error_details))??;

        tracing::info!(
            acknowledged = outcome.acknowledged(),
            remaining = decision.remaining,
            "Contact form processed"
        );

        Ok(SubmissionReceipt::sent(decision.remaining))
    }
}
