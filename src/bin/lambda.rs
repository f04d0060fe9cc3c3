//! AWS Lambda HTTP entry point
//!
//! POST a `HouseholdRequest` JSON body; responds with the estimate report
//! and forecast. Malformed bodies get a 400 with an error message.

use household_points::HouseholdRequest;
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use serde_json::json;

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let body: &[u8] = event.body();

    let (status, payload) = match serde_json::from_slice::<HouseholdRequest>(body) {
        Ok(request) => {
            let response = request.evaluate();
            log::info!(
                "estimate ok={} total={}",
                response.estimate.ok,
                response.estimate.total
            );
            (200, serde_json::to_string(&response)?)
        }
        Err(err) => {
            log::warn!("rejected request: {}", err);
            (400, json!({ "error": err.to_string() }).to_string())
        }
    };

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
