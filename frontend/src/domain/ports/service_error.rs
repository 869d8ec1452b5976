//! Error contract shared by every remote service port.
//!
//! Each port call returns a tagged `Result` instead of swallowing failures;
//! the calling view decides whether to toast, show an empty state, or ignore.

use super::define_port_error;
use crate::domain::{Error, ErrorCode};

define_port_error! {
    /// Errors surfaced while calling the Codefolio API.
    pub enum ServiceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "api transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "api request timed out: {message}",
        /// The session is missing or expired.
        Unauthorized { message: String } =>
            "not signed in: {message}",
        /// The session lacks the role for this call.
        Forbidden { message: String } =>
            "not allowed: {message}",
        /// The addressed resource does not exist.
        NotFound { message: String } =>
            "not found: {message}",
        /// The API rejected the request with another 4xx status.
        Rejected { status: u16, message: String } =>
            "api rejected request ({status}): {message}",
        /// The API failed with a 5xx status.
        Server { status: u16, message: String } =>
            "api error ({status}): {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } =>
            "api response decode failed: {message}",
    }
}

impl ServiceError {
    /// Return whether the backend reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message without the category prefix, for user-facing toasts.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Timeout { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Rejected { message, .. }
            | Self::Server { message, .. }
            | Self::Decode { message } => message.as_str(),
        }
    }
}

impl From<ServiceError> for Error {
    fn from(value: ServiceError) -> Self {
        let code = match &value {
            ServiceError::Transport { .. } | ServiceError::Timeout { .. } => {
                ErrorCode::ServiceUnavailable
            }
            ServiceError::Unauthorized { .. } => ErrorCode::Unauthorized,
            ServiceError::Forbidden { .. } => ErrorCode::Forbidden,
            ServiceError::NotFound { .. } => ErrorCode::NotFound,
            ServiceError::Rejected { status: 409, .. } => ErrorCode::Conflict,
            ServiceError::Rejected { .. } => ErrorCode::InvalidRequest,
            ServiceError::Server { .. } | ServiceError::Decode { .. } => ErrorCode::InternalError,
        };
        let message = if value.detail().trim().is_empty() {
            value.to_string()
        } else {
            value.detail().to_owned()
        };
        Error::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::transport(ServiceError::transport("reset"), ErrorCode::ServiceUnavailable)]
    #[case::timeout(ServiceError::timeout("slow"), ErrorCode::ServiceUnavailable)]
    #[case::unauthorized(ServiceError::unauthorized("expired"), ErrorCode::Unauthorized)]
    #[case::forbidden(ServiceError::forbidden("admins only"), ErrorCode::Forbidden)]
    #[case::not_found(ServiceError::not_found("gone"), ErrorCode::NotFound)]
    #[case::conflict(ServiceError::rejected(409_u16, "taken"), ErrorCode::Conflict)]
    #[case::rejected(ServiceError::rejected(422_u16, "bad"), ErrorCode::InvalidRequest)]
    #[case::server(ServiceError::server(500_u16, "boom"), ErrorCode::InternalError)]
    #[case::decode(ServiceError::decode("shape"), ErrorCode::InternalError)]
    fn maps_to_domain_codes(#[case] error: ServiceError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn domain_message_drops_category_prefix() {
        let error = Error::from(ServiceError::not_found("course 42 not found"));
        assert_eq!(error.message(), "course 42 not found");
    }

    #[rstest]
    fn blank_detail_falls_back_to_full_message() {
        let error = Error::from(ServiceError::server(502_u16, ""));
        assert_eq!(error.message(), "api error (502): ");
    }

    #[rstest]
    fn only_not_found_counts_as_absent() {
        assert!(ServiceError::not_found("x").is_not_found());
        assert!(!ServiceError::rejected(400_u16, "x").is_not_found());
    }
}
