use super::build_response;
use crate::ingest::IngestService;
use dto::HealthyDto;
use plantmon_core::SystemType;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    service: &Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(service.clone())
}

/// GET api/health
///
/// Database state and row counts
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthyDto)
    )
)]
fn health(
    service: Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("api" / "health"))
        .and(warp::get())
        .and_then(|service: Arc<IngestService>| async move {
            let database_state = service.check_db().await;
            let ret = HealthyDto {
                healthy: database_state == "ok",
                database_state,
                hydroponics_readings: service
                    .reading_count(SystemType::Hydroponics)
                    .await
                    .ok(),
                aquaponics_readings: service.reading_count(SystemType::Aquaponics).await.ok(),
                device_count: service.device_count().await.ok(),
            };
            build_response(Ok(ret))
        })
        .boxed()
}

pub mod dto {
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub database_state: String,
        pub hydroponics_readings: Option<i64>,
        pub aquaponics_readings: Option<i64>,
        pub device_count: Option<i64>,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rest::build_test_service;

    #[tokio::test]
    async fn test_rest_health() {
        // Prepare
        let service = build_test_service().await;
        let routes = routes(&service);
        service
            .submit(
                SystemType::Aquaponics,
                br#"{"device_id":"a1","ph":7.0,"temperature":25.0}"#,
            )
            .await
            .unwrap();

        // Execute
        let res = warp::test::request()
            .path("/api/health")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        let health: dto::HealthyDto = serde_json::from_slice(res.body()).unwrap();
        assert!(health.healthy);
        assert_eq!("ok", health.database_state);
        assert_eq!(Some(0), health.hydroponics_readings);
        assert_eq!(Some(1), health.aquaponics_readings);
        assert_eq!(Some(1), health.device_count);
    }
}
