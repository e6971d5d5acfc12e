use std::collections::HashMap;
use url::Url;

/// The user's original GetObject request as forwarded by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    /// Header names mapped to their values, with names kept exactly as received.
    pub headers: HashMap<String, String>,
    /// The URL the user requested, only carried for logging.
    pub url: Option<Url>,
}

impl InboundRequest {
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self { headers, url: None }
    }

    pub fn with_url(self, url: Option<Url>) -> Self {
        Self { url, ..self }
    }
}
