use crate::{
    error::{GateError, Result},
    models::{inbound_request::InboundRequest, response_route::ResponseRoute},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Represents the invocation event the storage layer sends when it intercepts a GetObject request.
#[derive(Debug, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectLambdaEvent {
    pub x_amz_request_id: Option<String>,
    #[validate(required_nested)]
    pub user_request: Option<UserRequest>,
    #[validate(required_nested)]
    pub get_object_context: Option<GetObjectContext>,
}

#[derive(Debug, Validate, Deserialize, Serialize)]
pub struct UserRequest {
    pub url: Option<String>,
    /// Header values arrive as arbitrary JSON, only the names matter to the gate.
    #[validate(required)]
    pub headers: Option<HashMap<String, Value>>,
}

#[derive(Debug, Validate, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetObjectContext {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub output_route: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub output_token: String,
}

impl ObjectLambdaEvent {
    /// Parse an event from the raw invocation body.
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|err| GateError::malformed(err.to_string()))
    }

    /// Validate the event and split it into the request to inspect and the route to answer on.
    pub fn into_parts(self) -> Result<(InboundRequest, ResponseRoute)> {
        if let Err(errors) = self.validate() {
            return Err(GateError::malformed(format!(
                "invalid fields: {}",
                invalid_fields(&errors).join(", ")
            )));
        }

        let (Some(user_request), Some(context)) = (self.user_request, self.get_object_context)
        else {
            return Err(GateError::malformed("missing userRequest or getObjectContext"));
        };
        let Some(headers) = user_request.headers else {
            return Err(GateError::malformed("missing userRequest.headers"));
        };

        // The URL is informational, an unparseable one must not block the decision.
        let url = user_request.url.and_then(|url| Url::parse(&url).ok());
        let headers = headers
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(value) => (name, value),
                other => (name, other.to_string()),
            })
            .collect();

        Ok((
            InboundRequest::new(headers).with_url(url),
            ResponseRoute::new(context.output_route, context.output_token),
        ))
    }
}

/// Convert a struct field name into the camelCase name it has in the event payload.
fn wire_name(field: &str) -> String {
    let mut parts = field.split('_');
    let mut name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Flatten nested validation errors into dotted wire field paths, sorted for stable messages.
fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (wire_name(field), kind))
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(_) => vec![field],
            ValidationErrorsKind::Struct(inner) => invalid_fields(inner)
                .into_iter()
                .map(|nested| format!("{field}.{nested}"))
                .collect(),
            ValidationErrorsKind::List(items) => items
                .values()
                .flat_map(|inner| invalid_fields(inner))
                .map(|nested| format!("{field}.{nested}"))
                .collect(),
        })
        .collect();
    fields.sort();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parts(event: serde_json::Value) -> Result<(InboundRequest, ResponseRoute)> {
        ObjectLambdaEvent::from_body(&event.to_string())?.into_parts()
    }

    fn malformed_reason(result: Result<(InboundRequest, ResponseRoute)>) -> String {
        match result {
            Err(GateError::MalformedInput { reason }) => reason,
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn splits_a_complete_event() {
        let (request, route) = parts(json!({
            "xAmzRequestId": "req-1",
            "userRequest": {
                "url": "https://bucket.s3.amazonaws.com/object.txt",
                "headers": { "ShibbolethToken": "abc", "Host": "bucket" }
            },
            "getObjectContext": {
                "outputRoute": "io-route",
                "outputToken": "io-token",
                "inputS3Url": "https://presigned"
            },
            "configuration": {}
        }))
        .unwrap();

        assert_eq!(request.headers.get("ShibbolethToken").unwrap(), "abc");
        assert_eq!(request.url.unwrap().path(), "/object.txt");
        assert_eq!(route, ResponseRoute::new("io-route", "io-token"));
    }

    #[test]
    fn empty_headers_are_valid() {
        let (request, _) = parts(json!({
            "userRequest": { "headers": {} },
            "getObjectContext": { "outputRoute": "r", "outputToken": "t" }
        }))
        .unwrap();
        assert!(request.headers.is_empty());
        assert!(request.url.is_none());
    }

    #[test]
    fn non_string_header_values_are_kept() {
        let (request, _) = parts(json!({
            "userRequest": {
                "headers": { "ShibbolethToken": null, "X-List": ["a", "b"], "X-Count": 3 }
            },
            "getObjectContext": { "outputRoute": "r", "outputToken": "t" }
        }))
        .unwrap();

        assert_eq!(request.headers.get("ShibbolethToken").unwrap(), "null");
        assert_eq!(request.headers.get("X-List").unwrap(), r#"["a","b"]"#);
        assert_eq!(request.headers.get("X-Count").unwrap(), "3");
    }

    #[test]
    fn field_names_are_reported_in_camel_case() {
        assert_eq!(wire_name("get_object_context"), "getObjectContext");
        assert_eq!(wire_name("headers"), "headers");
    }

    #[test]
    fn unparseable_url_is_ignored() {
        let (request, _) = parts(json!({
            "userRequest": { "url": "not a url", "headers": {} },
            "getObjectContext": { "outputRoute": "r", "outputToken": "t" }
        }))
        .unwrap();
        assert!(request.url.is_none());
    }

    #[test]
    fn missing_headers_is_malformed() {
        let reason = malformed_reason(parts(json!({
            "userRequest": {},
            "getObjectContext": { "outputRoute": "r", "outputToken": "t" }
        })));
        assert!(reason.contains("userRequest.headers"), "{reason}");
    }

    #[test]
    fn missing_user_request_is_malformed() {
        let reason = malformed_reason(parts(json!({
            "getObjectContext": { "outputRoute": "r", "outputToken": "t" }
        })));
        assert_eq!(reason, "invalid fields: userRequest");
    }

    #[test]
    fn missing_or_empty_route_tokens_are_malformed() {
        let reason = malformed_reason(parts(json!({
            "userRequest": { "headers": {} },
            "getObjectContext": { "outputRoute": "" }
        })));
        assert!(reason.contains("getObjectContext.outputRoute"), "{reason}");
        assert!(reason.contains("getObjectContext.outputToken"), "{reason}");

        let reason = malformed_reason(parts(json!({ "userRequest": { "headers": {} } })));
        assert_eq!(reason, "invalid fields: getObjectContext");
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            ObjectLambdaEvent::from_body("{not json"),
            Err(GateError::MalformedInput { .. })
        ));
    }
}
