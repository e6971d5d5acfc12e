use super::{ResponseWriter, WriteGetObjectResponse};
use crate::{
    api::responses::DeliveryReceipt,
    config::{REGION_BINDING, WRITER_ENDPOINT_BINDING},
    error::{GateError, Result},
};
use async_trait::async_trait;
use url::Url;
use worker::{Fetch, Headers, Method, Request, RequestInit};

/// The operation path of the storage layer's response writer.
const WRITE_GET_OBJECT_RESPONSE_PATH: &str = "WriteGetObjectResponse";

/// A writer that delivers responses over HTTP using the worker's fetch API.
///
/// Request signing is left to whatever sits behind the endpoint.
pub struct FetchResponseWriter {
    region: Option<String>,
    endpoint_override: Option<String>,
}

impl FetchResponseWriter {
    /// Create a new instance of [`FetchResponseWriter`].
    ///
    /// Either a region or an endpoint override is needed before anything can be written.
    pub fn new(region: Option<String>, endpoint_override: Option<String>) -> FetchResponseWriter {
        FetchResponseWriter {
            region,
            endpoint_override,
        }
    }

    /// Resolve the URL a response for `request_route` is written to.
    pub fn endpoint_for(&self, request_route: &str) -> Result<Url> {
        let base = match (&self.endpoint_override, &self.region) {
            (Some(endpoint), _) => override_base(endpoint)?,
            (None, Some(region)) => Url::parse(&format!(
                "https://{request_route}.s3-object-lambda.{region}.amazonaws.com/"
            ))
            .map_err(|err| {
                GateError::delivery(format!("unable to build writer endpoint: {err}"))
            })?,
            (None, None) => {
                return Err(GateError::configuration(format!(
                    "{REGION_BINDING} is not set and no {WRITER_ENDPOINT_BINDING} was given"
                )))
            }
        };
        base.join(WRITE_GET_OBJECT_RESPONSE_PATH)
            .map_err(|err| GateError::delivery(format!("unable to build writer endpoint: {err}")))
    }
}

/// Parse an override endpoint, keeping its whole path as the base the operation is joined onto.
fn override_base(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|err| {
        GateError::configuration(format!(
            "{WRITER_ENDPOINT_BINDING} is not a valid URL: {err}"
        ))
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Build the forwarding headers that carry the response fields.
fn forwarding_headers(response: &WriteGetObjectResponse) -> worker::Result<Headers> {
    let mut headers = Headers::new();
    headers.set("x-amz-request-route", &response.request_route)?;
    headers.set("x-amz-request-token", &response.request_token)?;
    headers.set("x-amz-fwd-status", &response.status_code.to_string())?;
    headers.set("x-amz-fwd-error-code", &response.error_code)?;
    headers.set("x-amz-fwd-error-message", &response.error_message)?;
    Ok(headers)
}

#[async_trait(?Send)]
impl ResponseWriter for FetchResponseWriter {
    async fn write_get_object_response(
        &self,
        response: &WriteGetObjectResponse,
    ) -> Result<DeliveryReceipt> {
        let url = self.endpoint_for(&response.request_route)?;
        let headers =
            forwarding_headers(response).map_err(|err| GateError::delivery(err.to_string()))?;

        let mut init = RequestInit::new();
        init.with_method(Method::Post).with_headers(headers);
        let request = Request::new_with_init(url.as_str(), &init)
            .map_err(|err| GateError::delivery(err.to_string()))?;

        let mut writer_response = Fetch::Request(request)
            .send()
            .await
            .map_err(|err| GateError::delivery(err.to_string()))?;

        let writer_status = writer_response.status_code();
        if !(200..300).contains(&writer_status) {
            let body = writer_response.text().await.unwrap_or_default();
            return Err(GateError::delivery(format!(
                "writer answered with status {writer_status}: {body}"
            )));
        }

        Ok(DeliveryReceipt {
            request_route: response.request_route.clone(),
            request_token: response.request_token.clone(),
            writer_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(region: Option<&str>, endpoint: Option<&str>) -> FetchResponseWriter {
        FetchResponseWriter::new(region.map(str::to_string), endpoint.map(str::to_string))
    }

    #[test]
    fn endpoint_is_derived_from_route_and_region() {
        assert_eq!(
            writer(Some("eu-west-1"), None)
                .endpoint_for("io-route")
                .unwrap()
                .as_str(),
            "https://io-route.s3-object-lambda.eu-west-1.amazonaws.com/WriteGetObjectResponse"
        );
    }

    #[test]
    fn endpoint_override_takes_precedence() {
        assert_eq!(
            writer(Some("eu-west-1"), Some("https://signer.internal/s3/"))
                .endpoint_for("io-route")
                .unwrap()
                .as_str(),
            "https://signer.internal/s3/WriteGetObjectResponse"
        );
    }

    #[test]
    fn endpoint_override_keeps_path_without_trailing_slash() {
        for endpoint in ["https://signer.internal/s3", "https://signer.internal/a/b"] {
            assert_eq!(
                writer(None, Some(endpoint))
                    .endpoint_for("io-route")
                    .unwrap()
                    .as_str(),
                format!("{endpoint}/WriteGetObjectResponse")
            );
        }
        assert_eq!(
            writer(None, Some("https://signer.internal"))
                .endpoint_for("io-route")
                .unwrap()
                .as_str(),
            "https://signer.internal/WriteGetObjectResponse"
        );
    }

    #[test]
    fn missing_region_and_override_is_a_configuration_error() {
        assert!(matches!(
            writer(None, None).endpoint_for("io-route"),
            Err(GateError::Configuration { .. })
        ));
    }

    #[test]
    fn invalid_override_is_a_configuration_error() {
        assert!(matches!(
            writer(Some("eu-west-1"), Some("not a url")).endpoint_for("io-route"),
            Err(GateError::Configuration { .. })
        ));
    }

    #[test]
    fn unusable_route_is_a_delivery_failure() {
        assert!(matches!(
            writer(Some("eu-west-1"), None).endpoint_for("bad route/with space"),
            Err(GateError::DeliveryFailure { .. })
        ));
    }
}
