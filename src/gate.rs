use crate::{
    api::responses::{DeliveryReceipt, RejectionResponse},
    delivery::{ResponseWriter, WriteGetObjectResponse},
    error::Result,
    messages::SHIBBOLETH_TOKEN_HEADER,
    models::{inbound_request::InboundRequest, response_route::ResponseRoute},
};
use std::collections::HashMap;

/// The outcome of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The token was present, the platform carries on with the retrieval.
    Allow,
    /// The token was missing and the rejection was delivered.
    Reject(DeliveryReceipt),
}

/// Decides whether an intercepted GetObject request may proceed.
///
/// A request is allowed when it carries the [`SHIBBOLETH_TOKEN_HEADER`] header, whose
/// presence means an upstream identity federation step already ran. Otherwise the gate
/// writes a fixed 403 rejection back through the request's [`ResponseRoute`].
#[derive(Debug, Clone)]
pub struct HeaderGate {
    request: InboundRequest,
    route: ResponseRoute,
    region: Option<String>,
}

impl HeaderGate {
    pub fn new(request: InboundRequest, route: ResponseRoute, region: Option<String>) -> Self {
        HeaderGate {
            request,
            route,
            region,
        }
    }

    pub fn request(&self) -> &InboundRequest {
        &self.request
    }

    /// The region rejections are written back to, if one was configured.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether a header named exactly [`SHIBBOLETH_TOKEN_HEADER`] is present. The value is not inspected.
    pub fn has_required_token(headers: &HashMap<String, String>) -> bool {
        headers.contains_key(SHIBBOLETH_TOKEN_HEADER)
    }

    /// Deliver the fixed rejection for `route` through `writer`.
    ///
    /// Exactly one delivery attempt is made and a failure is returned unchanged.
    pub async fn reject_request(
        route: &ResponseRoute,
        writer: &impl ResponseWriter,
    ) -> Result<DeliveryReceipt> {
        let response =
            WriteGetObjectResponse::rejection(route, &RejectionResponse::no_token_found());
        writer.write_get_object_response(&response).await
    }

    /// Decide the request, delivering the rejection before returning when the token is missing.
    pub async fn authorize(&self, writer: &impl ResponseWriter) -> Result<Decision> {
        if HeaderGate::has_required_token(&self.request.headers) {
            return Ok(Decision::Allow);
        }

        let receipt = HeaderGate::reject_request(&self.route, writer).await?;
        Ok(Decision::Reject(receipt))
    }
}
