use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{limiter, mail, utils};

use limiter::rate_limiter::FixedWindowLimiter;
use mail::resend::ResendMailer;
use repositories::mailer::SharedMailer;
use use_cases::{
    contact::ContactHandler,
    dispatch::{Dispatcher, MailSettings},
};

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub trust_forwarded_headers: bool,
}

pub type AppContactHandler = ContactHandler<SharedMailer>;

impl AppState {
    /// Wires the Resend client from configuration.
    pub fn new(config: &settings::AppConfig) -> anyhow::Result<Self> {
        let mailer = ResendMailer::new(&config.resend_api_url, config.mail_timeout())
            .map_err(|e| anyhow::anyhow!("Failed to build Resend client: {}", e))?;

        Ok(Self::with_mailer(config, Arc::new(mailer)))
    }

    pub fn with_mailer(config: &settings::AppConfig, mailer: SharedMailer) -> Self {
        let limiter = FixedWindowLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window(),
        );
        let dispatcher = Dispatcher::new(mailer, MailSettings::from_config(config));

        if !dispatcher.settings().is_configured() {
            tracing::warn!("Mail delivery is not fully configured; contact submissions will fail");
        }

        AppState {
            contact_handler: ContactHandler::new(limiter, dispatcher, !config.is_production()),
            trust_forwarded_headers: config.trust_forwarded_headers,
        }
    }

    pub fn limiter(&self) -> &FixedWindowLimiter {
        &self.contact_handler.limiter
    }
}
