use std::time::Duration;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[display("{_0}")]
    Validation(ValidationError),

    #[display("{_0}")]
    Configuration(ConfigurationError),

    #[display("Failed to send notification email. Please try again.")]
    Notification(MailError),

    #[display("An unexpected error occurred. Please try again later.")]
    Unexpected { details: Option<String> },
}

impl AppError {
    /// Wraps an unclassified failure. `details` only reaches the client when
    /// `expose_details` is set.
    pub fn unexpected(err: impl std::fmt::Display, expose_details: bool) -> Self {
        tracing::error!("Contact form error: {}", err);
        AppError::Unexpected {
            details: expose_details.then(|| err.to_string()),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::RateLimited => serde_json::json!({
                "error": self.to_string(),
                "remaining": 0
            }),
            AppError::Unexpected { details: Some(details) } => serde_json::json!({
                "error": self.to_string(),
                "details": details
            }),
            _ => serde_json::json!({"error": self.to_string()}),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Configuration(e) => AppError::Configuration(e),
            DispatchError::Notification(e) => AppError::Notification(e),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display("All fields are required. Please fill out all fields.")]
    MissingFields,

    #[display("Please provide valid information in all fields.")]
    EmptyFields,

    #[display("Please provide a valid email address.")]
    InvalidEmail,
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[display("Email service is not configured. Please contact the administrator.")]
    MissingApiKey,

    #[display("Receiving email is not configured. Please contact the administrator.")]
    MissingReceivingEmail,
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum MailError {
    #[display("Email provider did not respond within {}s", _0.as_secs_f64())]
    Timeout(Duration),

    #[display("Email transport error: {_0}")]
    Transport(String),

    #[display("Email provider rejected the request ({status}): {message}")]
    Provider { status: u16, message: String },

    #[display("Unexpected response from email provider: {_0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => MailError::Provider {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => MailError::Transport(err.to_string()),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum DispatchError {
    #[display("{_0}")]
    Configuration(ConfigurationError),

    #[display("Notification email failed: {_0}")]
    Notification(MailError),
}
