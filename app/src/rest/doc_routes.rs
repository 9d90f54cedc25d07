use super::dto::{ErrorDto, MessageDto};
use super::metric_routes::dto::HealthyDto;
use plantmon_core::{
    AquaponicsData, AquaponicsSubmission, Device, HydroponicsData, HydroponicsSubmission, Reading,
    ReadingData, StoredReading, SystemType,
};
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::data_routes::submit_data,
        super::data_routes::recent_data,
        super::device_routes::list_devices,
        super::metric_routes::health
    ),
    components(schemas(
        SystemType,
        HydroponicsSubmission,
        AquaponicsSubmission,
        HydroponicsData,
        AquaponicsData,
        ReadingData,
        Reading,
        StoredReading,
        Device,
        MessageDto,
        ErrorDto,
        HealthyDto
    )),
    tags((name = "plantmon", description = "Hydroponics and aquaponics monitoring"))
)]
pub struct ApiDoc;

/// GET api/doc/api.json
///
/// The OpenAPI document of all routes
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "doc" / "api.json")
        .and(warp::get())
        .map(|| warp::reply::json(&ApiDoc::openapi()))
        .boxed()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_rest_api_doc() {
        let routes = routes();

        let res = warp::test::request()
            .path("/api/doc/api.json")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        let doc: Value = serde_json::from_slice(res.body()).unwrap();
        for path in [
            "/api/data/{system}",
            "/api/{system}/data",
            "/api/devices",
            "/api/health",
        ] {
            assert!(doc["paths"].get(path).is_some(), "{} is undocumented", path);
        }
        assert!(doc["components"]["schemas"].get("StoredReading").is_some());
    }
}
