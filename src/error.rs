// Error types shared by the API clients and the command handlers.
//
// Every API call returns `Result<_, AppError>`. The `kind` is the closed
// taxonomy the commands switch on; `message` is what gets shown to the user.

use thiserror::Error;

/// Closed set of failure kinds an API call can produce.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("request failed")]
    RequestFailed,
    #[error("unexpected error")]
    UnexpectedError,
    #[error("validation failed")]
    ValidationFailed,
    #[error("not found")]
    NotFound,
    #[error("project could not be found")]
    ProjectNotFound,
    #[error("file size is too large")]
    FileSizeTooLarge,
    #[error("not allowed domain name")]
    NotAllowedDomain,
    #[error("certificate or private key is invalid")]
    InvalidCerts,
    #[error("ssl cert is not matched domain name")]
    CertNotMatch,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email address has not been confirmed")]
    UnconfirmedEmail,
    #[error("invalid confirmation code")]
    InvalidConfirmationCode,
    #[error("email address is already confirmed")]
    AlreadyConfirmed,
    #[error("you are not logged in or your session has expired")]
    Unauthorized,
    #[error("already exists")]
    AlreadyExists,
    #[error("limit reached")]
    LimitReached,
}

impl ErrorKind {
    /// Stable machine-readable code, used in log lines.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::RequestFailed => "request_failed",
            ErrorKind::UnexpectedError => "unexpected_error",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ProjectNotFound => "project_not_found",
            ErrorKind::FileSizeTooLarge => "file_size_too_large",
            ErrorKind::NotAllowedDomain => "domain_not_allowed",
            ErrorKind::InvalidCerts => "invalid_certs",
            ErrorKind::CertNotMatch => "cert_not_match",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::UnconfirmedEmail => "unconfirmed_email",
            ErrorKind::InvalidConfirmationCode => "invalid_confirmation_code",
            ErrorKind::AlreadyConfirmed => "already_confirmed",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::LimitReached => "limit_reached",
        }
    }
}

/// Underlying cause attached to request-failed and some unexpected errors.
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An API failure. All of them end the current command.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub cause: Option<Cause>,
}

impl AppError {
    pub fn new(kind: ErrorKind) -> Self {
        AppError {
            kind,
            message: kind.to_string(),
            cause: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn caused_by(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Transport-level failure: no HTTP response was obtained.
    pub fn request_failed(err: reqwest::Error) -> Self {
        AppError::new(ErrorKind::RequestFailed).caused_by(err)
    }

    pub fn unexpected() -> Self {
        AppError::new(ErrorKind::UnexpectedError)
    }
}

pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn message_defaults_to_kind_description() {
        let err = AppError::new(ErrorKind::CertNotMatch);
        assert_eq!(err.to_string(), "ssl cert is not matched domain name");
        assert!(err.source().is_none());
    }

    #[test]
    fn caused_by_sets_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::unexpected().caused_by(io);
        assert_eq!(err.kind, ErrorKind::UnexpectedError);
        assert_eq!(err.source().map(|s| s.to_string()), Some("missing".into()));
    }

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(ErrorKind::NotAllowedDomain.code(), "domain_not_allowed");
        assert_eq!(ErrorKind::RequestFailed.code(), "request_failed");
    }
}
