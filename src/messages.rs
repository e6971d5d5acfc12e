pub const SHIBBOLETH_TOKEN_HEADER: &str = "ShibbolethToken";
pub const NO_TOKEN_ERROR_CODE: &str = "NoShibbolethTokenFound";
pub const NO_TOKEN_ERROR_MESSAGE: &str = "The request is not authorized.";
pub const INVALID_EVENT_RESPONSE: &str =
    "The invocation event was malformed, it must carry userRequest.headers and a non-empty getObjectContext.outputRoute and outputToken.";
pub const WRITER_NOT_CONFIGURED_RESPONSE: &str =
    "The gate was initialised with no usable REGION or WRITER_ENDPOINT, rejected requests cannot be delivered until one has been set.";
pub const HEALTHY_RESPONSE: &str = "OK";
