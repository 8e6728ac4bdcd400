//! Service layer error types

use std::fmt;

use comment_common::AppError;
use comment_core::{DomainError, Violations};

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error
    App(AppError),

    /// Accumulated validation violations
    Validation(Violations),

    /// CAPTCHA challenge failed or was missing
    CaptchaRejected,

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// External collaborator failure (blob store, CAPTCHA endpoint)
    ExternalService(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(v) => write!(f, "Validation failed: {v}"),
            Self::CaptchaRejected => write!(f, "CAPTCHA verification failed"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::ExternalService(msg) => write!(f, "External service error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Validation(_) | Self::CaptchaRejected => 400,
            Self::NotFound { .. } => 404,
            Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CaptchaRejected => "CAPTCHA_REJECTED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Accumulated violations, when this is a validation failure
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation(v) => Some(v),
            Self::Domain(e) => e.violations(),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => Self::Validation(v),
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<Violations> for ServiceError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(v) => AppError::Domain(DomainError::Validation(v)),
            ServiceError::CaptchaRejected => AppError::CaptchaRejected,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::ExternalService(msg) => AppError::ExternalService(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use comment_core::Violation;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Comment", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Comment not found: 123"));
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::Validation(Violations(vec![Violation::MissingHref]));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.violations().unwrap().len(), 1);
    }

    #[test]
    fn test_captcha_rejected() {
        let err = ServiceError::CaptchaRejected;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "CAPTCHA_REJECTED");
    }

    #[test]
    fn test_domain_validation_flattens_to_validation() {
        let err: ServiceError =
            comment_core::DomainError::Validation(Violations(vec![Violation::MissingHref])).into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::not_found("Comment", "456");
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.status_code(), 404);
    }
}
