/// Identifies where an out-of-band response for an intercepted request must be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRoute {
    /// The opaque route of the storage layer's result channel.
    pub route_token: String,
    /// The opaque token pairing the response with the intercepted request.
    pub request_token: String,
}

impl ResponseRoute {
    pub fn new(route_token: impl Into<String>, request_token: impl Into<String>) -> Self {
        Self {
            route_token: route_token.into(),
            request_token: request_token.into(),
        }
    }
}
