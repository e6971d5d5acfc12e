use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

/// Errors raised while gating an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The invocation event was missing a required field or could not be parsed.
    #[error("malformed invocation event: {reason}")]
    MalformedInput { reason: String },

    /// The response writer failed to deliver the rejection.
    #[error("failed to deliver rejection response: {message}")]
    DeliveryFailure { message: String },

    /// An environment binding was missing or unusable.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl GateError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::DeliveryFailure {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<GateError> for worker::Error {
    fn from(err: GateError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
