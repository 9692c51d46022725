use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::{mock, Sequence};
use portfolio_contact::{
    entities::{
        contact::{ContactSubmission, ValidSubmission},
        email::{DeliveryReceipt, OutgoingEmail},
    },
    errors::{AppError, ConfigurationError, DispatchError, MailError},
    limiter::rate_limiter::FixedWindowLimiter,
    mail::templates::Signature,
    repositories::mailer::EmailSender,
    use_cases::{
        contact::ContactHandler,
        dispatch::{Dispatcher, FailurePolicy, MailSettings, StepKind, StepOutcome},
    },
};
use zeroize::Zeroizing;

mock! {
    pub Mailer {}

    #[async_trait]
    impl EmailSender for Mailer {
        async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError>;
    }
}

const OWNER: &str = "owner@example.com";
const SENDER: &str = "linus@example.com";

fn settings() -> MailSettings {
    MailSettings {
        api_key: Some(Zeroizing::new("re_key".to_string())),
        receiving_email: Some(OWNER.to_string()),
        notification_from: "Portfolio Contact <contact@example.com>".to_string(),
        auto_reply_from: "Site Owner <contact@example.com>".to_string(),
        signature: Signature {
            name: "Site Owner".to_string(),
            title: "Engineer".to_string(),
            linkedin_url: "https://linkedin.com/in/owner".to_string(),
            github_url: "https://github.com/owner".to_string(),
        },
        send_timeout: Duration::from_secs(1),
    }
}

fn submission() -> ValidSubmission {
    ContactSubmission::new("Linus", SENDER, "Kernel", "Patch attached.")
        .validate()
        .unwrap()
}

fn receipt(id: &str) -> Result<DeliveryReceipt, MailError> {
    Ok(DeliveryReceipt { id: id.to_string() })
}

fn provider_down() -> Result<DeliveryReceipt, MailError> {
    Err(MailError::Provider { status: 503, message: "down".to_string() })
}

fn is_to(email: &OutgoingEmail, address: &str) -> bool {
    email.to.len() == 1 && email.to[0] == address
}

#[actix_rt::test]
async fn sends_notification_then_acknowledgment() {
    let mut mailer = MockMailer::new();
    let mut seq = Sequence::new();

    mailer.expect_send()
        .withf(|key, email| key.to_string() == "re_key" && is_to(email, OWNER))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| receipt("admin"));
    mailer.expect_send()
        .withf(|key, email| key.to_string() == "re_key" && is_to(email, SENDER))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| receipt("reply"));

    let dispatcher = Dispatcher::new(mailer, settings());
    let outcome = dispatcher.dispatch(&submission()).await.unwrap();

    assert_eq!(
        outcome.get(StepKind::Notification),
        Some(&StepOutcome::Delivered(DeliveryReceipt { id: "admin".to_string() }))
    );
    assert!(outcome.acknowledged());
}

#[actix_rt::test]
async fn notification_failure_aborts_before_acknowledgment() {
    let mut mailer = MockMailer::new();

    // A second call would find no matching expectation and panic
    mailer.expect_send()
        .withf(|_, email| is_to(email, OWNER))
        .times(1)
        .returning(|_, _| provider_down());

    let dispatcher = Dispatcher::new(mailer, settings());
    let result = dispatcher.dispatch(&submission()).await;

    assert!(matches!(
        result,
        Err(DispatchError::Notification(MailError::Provider { status: 503, .. }))
    ));
}

#[actix_rt::test]
async fn acknowledgment_failure_is_absorbed() {
    let mut mailer = MockMailer::new();
    mailer.expect_send()
        .withf(|_, email| is_to(email, OWNER))
        .times(1)
        .returning(|_, _| receipt("admin"));
    mailer.expect_send()
        .withf(|_, email| is_to(email, SENDER))
        .times(1)
        .returning(|_, _| provider_down());

    let dispatcher = Dispatcher::new(mailer, settings());
    let outcome = dispatcher.dispatch(&submission()).await.unwrap();

    assert!(!outcome.acknowledged());
    assert!(matches!(
        outcome.get(StepKind::Acknowledgment),
        Some(StepOutcome::Failed(MailError::Provider { .. }))
    ));
}

#[actix_rt::test]
async fn missing_api_key_fails_before_any_send() {
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();

    let dispatcher = Dispatcher::new(mailer, MailSettings { api_key: None, ..settings() });

    assert_eq!(
        dispatcher.dispatch(&submission()).await,
        Err(DispatchError::Configuration(ConfigurationError::MissingApiKey))
    );
}

#[actix_rt::test]
async fn missing_receiving_email_fails_before_any_send() {
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();

    let dispatcher = Dispatcher::new(mailer, MailSettings { receiving_email: None, ..settings() });

    assert_eq!(
        dispatcher.dispatch(&submission()).await,
        Err(DispatchError::Configuration(ConfigurationError::MissingReceivingEmail))
    );
}

#[test]
fn plan_orders_steps_with_their_policies() {
    let dispatcher = Dispatcher::new(MockMailer::new(), settings());

    let steps = dispatcher.plan(&submission(), OWNER, chrono::Utc::now());

    let shape: Vec<_> = steps.iter().map(|s| (s.kind, s.policy)).collect();
    assert_eq!(
        shape,
        vec![
            (StepKind::Notification, FailurePolicy::Required),
            (StepKind::Acknowledgment, FailurePolicy::BestEffort),
        ]
    );
    assert_eq!(steps[0].email.subject, "New Contact: Kernel");
    assert_eq!(steps[0].email.reply_to.as_deref(), Some(SENDER));
    assert_eq!(steps[1].email.from, "Site Owner <contact@example.com>");
    assert!(steps[1].email.html.contains("Linus"));
}

struct HangingMailer;

#[async_trait]
impl EmailSender for HangingMailer {
    async fn send(&self, _api_key: &str, _email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        receipt("too-late")
    }
}

#[actix_rt::test]
async fn hung_provider_is_cut_off_by_the_send_timeout() {
    let timeout = Duration::from_millis(50);
    let dispatcher = Dispatcher::new(HangingMailer, MailSettings { send_timeout: timeout, ..settings() });

    let result = dispatcher.dispatch(&submission()).await;

    assert_eq!(result, Err(DispatchError::Notification(MailError::Timeout(timeout))));
}

#[actix_rt::test]
async fn contact_handler_reports_remaining_quota() {
    let mut mailer = MockMailer::new();
    mailer.expect_send().times(2).returning(|_, _| receipt("ok"));

    let limiter = FixedWindowLimiter::new(5, Duration::from_secs(3600));
    limiter.check("10.0.0.1");
    let handler = ContactHandler::new(limiter, Dispatcher::new(Arc::new(mailer), settings()), true);

    let body = serde_json::to_vec(&ContactSubmission::new("Linus", SENDER, "Hi", "Hello")).unwrap();
    let receipt = handler.submit("10.0.0.1", &body).await.unwrap();

    assert!(receipt.success);
    assert_eq!(receipt.remaining, 3);
}

#[actix_rt::test]
async fn contact_handler_short_circuits_when_rate_limited() {
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();

    let limiter = FixedWindowLimiter::new(1, Duration::from_secs(3600));
    limiter.check("10.0.0.2");
    let handler = ContactHandler::new(limiter, Dispatcher::new(Arc::new(mailer), settings()), true);

    let body = serde_json::to_vec(&ContactSubmission::new("Linus", SENDER, "Hi", "Hello")).unwrap();
    let result = handler.submit("10.0.0.2", &body).await;

    assert!(matches!(result, Err(AppError::RateLimited)));
}
