use super::query::RecentQuery;
use super::dto;
use super::{build_response, check_body_size, limited_body};
use crate::ingest::IngestService;
use plantmon_core::SystemType;
use std::sync::Arc;
use warp::hyper::body::Bytes;
use warp::Filter;

const RECEIVED_MESSAGE: &str = "Data received successfully";

pub fn routes(
    service: &Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    submit_data(service.clone()).or(recent_data(service.clone()))
}

/// POST api/data/:system
///
/// Submit a reading from an external device
///
/// Returns 200 once the reading is stored, 400 if a required field
/// (ph, temperature, device_id) is missing or the body is malformed
#[utoipa::path(
    post,
    path = "/api/data/{system}",
    params(("system" = SystemType, Path, description = "Cultivation system of the reading")),
    request_body(
        content = plantmon_core::HydroponicsSubmission,
        description = "HydroponicsSubmission or AquaponicsSubmission, depending on the system"
    ),
    responses(
        (status = 200, description = "Reading stored", body = dto::MessageDto),
        (status = 400, description = "Missing field or malformed body", body = dto::ErrorDto),
        (status = 500, description = "Storage failure", body = dto::ErrorDto)
    )
)]
fn submit_data(
    service: Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("api" / "data" / SystemType))
        .and(warp::post())
        .and(limited_body())
        .and_then(
            |service: Arc<IngestService>, system: SystemType, body: Bytes| async move {
                if let Err(too_large) = check_body_size(&body) {
                    return Ok(too_large);
                }
                let resp = service.submit(system, &body).await.map(|_| dto::MessageDto {
                    message: RECEIVED_MESSAGE.to_owned(),
                });
                build_response(resp)
            },
        )
        .boxed()
}

/// GET api/:system/data
///
/// Fetch the latest readings of a system
///
/// Returns at most `limit` readings (default 50), newest first
#[utoipa::path(
    get,
    path = "/api/{system}/data",
    params(
        ("system" = SystemType, Path, description = "Cultivation system"),
        ("limit" = Option<i64>, Query, description = "Maximum number of readings")
    ),
    responses(
        (status = 200, description = "Latest readings, newest first", body = [plantmon_core::StoredReading])
    )
)]
fn recent_data(
    service: Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("api" / SystemType / "data"))
        .and(warp::get())
        .and(warp::query::<RecentQuery>())
        .and_then(
            |service: Arc<IngestService>, system: SystemType, query: RecentQuery| async move {
                let resp = service.recent(system, query.limit()).await;
                build_response(resp)
            },
        )
        .boxed()
}
