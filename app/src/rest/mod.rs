use crate::error::IngestError;
use crate::ingest::IngestService;
use std::future;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

mod data_routes;
mod device_routes;
mod doc_routes;
mod metric_routes;
mod query;

/// Ingestion requests above this size are rejected before parsing
const MAX_BODY_BYTES: u64 = 16 * 1024;
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

pub fn routes(
    service: &Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    data_routes::routes(service)
        .or(device_routes::routes(service))
        .or(metric_routes::routes(service))
        .or(doc_routes::routes())
}

pub async fn dispatch_server_daemon(
    service: Arc<IngestService>,
    port: u16,
) -> Result<(), warp::Error> {
    let routes = routes(&service).with(warp::trace::request());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for shutdown signal: {}", e);
            future::pending::<()>().await;
        }
        info!("Shutting down webserver");
    };

    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown(([0, 0, 0, 0], port), shutdown)?;
    info!("Starting webserver at: {}", addr);
    server.await;
    Ok(())
}

/// Request body, rejected with 413 early when the declared length is too large.
///
/// Chunked uploads carry no `Content-Length`, their size is checked by
/// [`check_body_size`] once buffered.
fn limited_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    let declared = warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes());
    let undeclared = warp::header::optional::<u64>("content-length")
        .and_then(|len: Option<u64>| async move {
            match len {
                None => Ok(()),
                Some(_) => Err(warp::reject()),
            }
        })
        .untuple_one()
        .and(warp::body::bytes());
    declared.or(undeclared).unify()
}

fn check_body_size(body: &Bytes) -> Result<(), warp::reply::Response> {
    if body.len() as u64 > MAX_BODY_BYTES {
        warn!("Rejected body of {} bytes", body.len());
        return Err(error_reply(
            PAYLOAD_TOO_LARGE_MESSAGE.to_owned(),
            StatusCode::PAYLOAD_TOO_LARGE,
        ));
    }
    Ok(())
}

fn build_response<T: serde::Serialize>(
    resp: Result<T, IngestError>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match resp {
        Ok(data) => Ok(warp::reply::json(&data).into_response()),
        Err(IngestError::InvalidInput(err)) => {
            warn!("{}", err);
            Ok(error_reply(err.to_string(), StatusCode::BAD_REQUEST))
        }
        Err(IngestError::Internal(err)) => {
            error!("{}", err);
            Ok(error_reply(
                err.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn error_reply(error: String, status: StatusCode) -> warp::reply::Response {
    let body = dto::ErrorDto { error };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

pub mod dto {
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct MessageDto {
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ErrorDto {
        pub error: String,
    }
}

#[cfg(test)]
pub(crate) async fn build_test_service() -> Arc<IngestService> {
    IngestService::new(crate::models::memory_db().await, 50)
}
