mod api;
mod config;
mod delivery;
mod error;
mod gate;
mod messages;
mod models;

use api::requests::ObjectLambdaEvent;
use config::GateConfig;
use delivery::fetch_response_writer::FetchResponseWriter;
use error::GateError;
use gate::{Decision, HeaderGate};
use messages::*;
use worker::{
    console_error, console_log, console_warn, event, Context, Env, Request, Response,
    RouteContext, Router,
};

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> worker::Result<Response> {
    Router::new()
        .get("/health", health_handler)
        .post_async("/", gate_handler)
        .run(req, env)
        .await
}

/// Handler to report that the worker is up.
fn health_handler(_req: Request, _ctx: RouteContext<()>) -> worker::Result<Response> {
    Response::ok(HEALTHY_RESPONSE)
}

/// Gate an intercepted GetObject request described by the invocation event in the body.
///
/// This handler answers with:
///     - 204 when the token header is present and the retrieval may proceed
///     - 200 with the delivery receipt once a rejection has been written back
///     - 400 when the event is malformed, without contacting the writer
///     - 500 when a rejection is due but the writer has not been configured
async fn gate_handler(mut req: Request, ctx: RouteContext<()>) -> worker::Result<Response> {
    let parsed = ObjectLambdaEvent::from_body(&req.text().await?).and_then(|event| {
        let request_id = event.x_amz_request_id.clone().unwrap_or_default();
        event.into_parts().map(|parts| (request_id, parts))
    });
    let (request_id, (request, route)) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            console_warn!("Refusing invocation: {err}");
            return Response::error(INVALID_EVENT_RESPONSE, 400);
        }
    };

    let config = GateConfig::from_context(&ctx);
    let gate = HeaderGate::new(request, route, config.region);
    let writer =
        FetchResponseWriter::new(gate.region().map(str::to_string), config.writer_endpoint);
    let target = gate
        .request()
        .url
        .as_ref()
        .map(|url| url.path().to_string())
        .unwrap_or_default();

    match gate.authorize(&writer).await {
        Ok(Decision::Allow) => {
            console_log!("[{request_id}] Allowed {target}");
            Ok(Response::empty()?.with_status(204))
        }
        Ok(Decision::Reject(receipt)) => {
            console_log!(
                "[{request_id}] Rejected {target}, {SHIBBOLETH_TOKEN_HEADER} missing (writer status {})",
                receipt.writer_status
            );
            Response::from_json(&receipt)
        }
        Err(err @ GateError::Configuration { .. }) => {
            console_error!("[{request_id}] {err}");
            Response::error(WRITER_NOT_CONFIGURED_RESPONSE, 500)
        }
        Err(err) => {
            console_error!("[{request_id}] {err}");
            Err(err.into())
        }
    }
}
