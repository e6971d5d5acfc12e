use worker::RouteContext;

/// The binding name for the region the storage layer runs in.
pub const REGION_BINDING: &str = "REGION";

/// The binding name for an optional URL overriding where rejections are written.
pub const WRITER_ENDPOINT_BINDING: &str = "WRITER_ENDPOINT";

/// Configuration read from the worker's environment bindings.
///
/// Values are only checked when a rejection has to be written, so a request carrying
/// the token is never held up by writer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateConfig {
    pub region: Option<String>,
    pub writer_endpoint: Option<String>,
}

impl GateConfig {
    /// Read the configuration from the bindings available to the route.
    pub fn from_context(ctx: &RouteContext<()>) -> GateConfig {
        let binding = |name: &str| ctx.var(name).ok().map(|var| var.to_string());
        GateConfig::from_bindings(binding(REGION_BINDING), binding(WRITER_ENDPOINT_BINDING))
    }

    /// Build the configuration from raw binding values, treating blank values as unset.
    pub fn from_bindings(region: Option<String>, writer_endpoint: Option<String>) -> GateConfig {
        let present = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        GateConfig {
            region: present(region),
            writer_endpoint: present(writer_endpoint),
        }
    }
}
