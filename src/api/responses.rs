use crate::messages::{NO_TOKEN_ERROR_CODE, NO_TOKEN_ERROR_MESSAGE};
use serde::Serialize;

/// The fixed response delivered in place of the object when no token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionResponse {
    pub status_code: u16,
    pub error_code: &'static str,
    pub error_message: &'static str,
}

impl RejectionResponse {
    pub fn no_token_found() -> Self {
        RejectionResponse {
            status_code: 403,
            error_code: NO_TOKEN_ERROR_CODE,
            error_message: NO_TOKEN_ERROR_MESSAGE,
        }
    }
}

/// The writer's acknowledgment of a delivered rejection, returned to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub request_route: String,
    pub request_token: String,
    /// The HTTP status the writer answered with.
    pub writer_status: u16,
}
