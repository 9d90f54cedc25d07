use super::build_response;
use crate::ingest::IngestService;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    service: &Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    list_devices(service.clone())
}

/// GET api/devices
///
/// List all devices that ever submitted a reading
///
/// Returns the devices ordered by `last_seen`, most recent first
#[utoipa::path(
    get,
    path = "/api/devices",
    responses(
        (status = 200, description = "Registered devices", body = [plantmon_core::Device])
    )
)]
fn list_devices(
    service: Arc<IngestService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("api" / "devices"))
        .and(warp::get())
        .and_then(|service: Arc<IngestService>| async move {
            let resp = service.devices().await;
            build_response(resp)
        })
        .boxed()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rest::build_test_service;
    use plantmon_core::{Device, SystemType};
    use std::time::Duration;

    #[tokio::test]
    async fn test_rest_devices() {
        // Prepare
        let service = build_test_service().await;
        let routes = routes(&service);
        service
            .submit(
                SystemType::Hydroponics,
                br#"{"device_id":"h1","device_name":"Rack","ph":6.0,"temperature":22.5}"#,
            )
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        service
            .submit(
                SystemType::Aquaponics,
                br#"{"device_id":"a1","device_type":"probe","ph":7.0,"temperature":25.0}"#,
            )
            .await
            .unwrap();

        // Execute
        let res = warp::test::request()
            .path("/api/devices")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        let devices: Vec<Device> = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(2, devices.len());
        assert_eq!("a1", devices[0].device_id);
        assert_eq!("Unknown Aquaponics Sensor", devices[0].device_name);
        assert_eq!("probe", devices[0].device_type);
        assert_eq!(SystemType::Aquaponics, devices[0].system_type);
        assert_eq!("h1", devices[1].device_id);
        assert_eq!("Rack", devices[1].device_name);
        assert_eq!(SystemType::Hydroponics, devices[1].system_type);
    }

    #[tokio::test]
    async fn test_rest_no_devices() {
        let service = build_test_service().await;
        let routes = routes(&service);

        let res = warp::test::request()
            .path("/api/devices")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), 200);
        assert_eq!(b"[]", &res.body()[..]);
    }
}
