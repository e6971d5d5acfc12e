pub mod fetch_response_writer;

use crate::{
    api::responses::{DeliveryReceipt, RejectionResponse},
    error::Result,
    models::response_route::ResponseRoute,
};
use async_trait::async_trait;

/// The payload handed to the storage layer's response writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteGetObjectResponse {
    pub request_route: String,
    pub request_token: String,
    pub status_code: u16,
    pub error_code: String,
    pub error_message: String,
}

impl WriteGetObjectResponse {
    /// Build the payload that answers `route` with `rejection`.
    pub fn rejection(route: &ResponseRoute, rejection: &RejectionResponse) -> Self {
        WriteGetObjectResponse {
            request_route: route.route_token.clone(),
            request_token: route.request_token.clone(),
            status_code: rejection.status_code,
            error_code: rejection.error_code.to_string(),
            error_message: rejection.error_message.to_string(),
        }
    }
}

/// Represents the storage layer's capability to answer an intercepted request out of band.
///
/// Implementations make exactly one delivery attempt per call and never retry.
#[async_trait(?Send)]
pub trait ResponseWriter {
    /// Deliver the response, returning the writer's acknowledgment.
    async fn write_get_object_response(
        &self,
        response: &WriteGetObjectResponse,
    ) -> Result<DeliveryReceipt>;
}
