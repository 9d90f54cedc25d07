use super::IngestService;
use chrono::{DateTime, Utc};
use plantmon_core::{
    format_timestamp, AquaponicsData, HydroponicsData, Reading, ReadingData, SystemType,
    INTERNAL_SOURCE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Simulates the built-in sensors of both systems.
///
/// Every `interval` one reading per system is appended with the
/// `internal` source tag. The device registry is not touched.
/// Blocks caller task in infinite loop
pub async fn dispatch_generator_loop(service: Arc<IngestService>, interval: Duration) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(interval);

    info!("Start generating internal readings every {:?}", interval);
    loop {
        ticker.tick().await;
        generate_once(&service, &mut rng).await;
    }
}

/// Appends one simulated reading per system, returns how many were stored
pub async fn generate_once<R: Rng>(service: &IngestService, rng: &mut R) -> usize {
    let now = Utc::now();
    let mut stored = 0;
    for system in SystemType::ALL {
        let reading = simulate(system, rng, now);
        match service.record(&reading).await {
            Ok(id) => {
                debug!(system = %system, reading_id = id, "Stored internal reading");
                stored += 1;
            }
            Err(e) => error!(system = %system, "Failed storing internal reading: {}", e),
        }
    }
    stored
}

/// One synthetic reading within the typical range of a healthy system
pub fn simulate<R: Rng>(system: SystemType, rng: &mut R, now: DateTime<Utc>) -> Reading {
    let data = match system {
        SystemType::Hydroponics => ReadingData::Hydroponics(HydroponicsData {
            ph: sample(rng, 5.5..6.5),
            temperature: sample(rng, 18.0..25.0),
            humidity: Some(sample(rng, 40.0..70.0)),
            water_level: Some(sample(rng, 50.0..100.0)),
            light_intensity: Some(sample(rng, 5000.0..10000.0)),
            ec: Some(sample(rng, 1.2..2.5)),
        }),
        SystemType::Aquaponics => ReadingData::Aquaponics(AquaponicsData {
            ph: sample(rng, 6.8..7.5),
            temperature: sample(rng, 20.0..28.0),
            humidity: Some(sample(rng, 50.0..80.0)),
            water_level: Some(sample(rng, 60.0..100.0)),
            dissolved_oxygen: Some(sample(rng, 5.0..8.0)),
            ammonia: Some(sample(rng, 0.1..1.5)),
            nitrate: Some(sample(rng, 5.0..50.0)),
        }),
    };
    Reading {
        timestamp: format_timestamp(now),
        source: INTERNAL_SOURCE.to_owned(),
        data,
    }
}

// uniform, rounded to two decimals
fn sample<R: Rng>(rng: &mut R, range: Range<f64>) -> f64 {
    (rng.gen_range(range) * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::memory_db;

    fn in_range(value: f64, low: f64, high: f64) -> bool {
        (low..=high).contains(&value)
    }

    #[test]
    fn test_simulated_ranges() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            match simulate(SystemType::Hydroponics, &mut rng, Utc::now()).data {
                ReadingData::Hydroponics(data) => {
                    assert!(in_range(data.ph, 5.5, 6.5));
                    assert!(in_range(data.temperature, 18.0, 25.0));
                    assert!(in_range(data.light_intensity.unwrap(), 5000.0, 10000.0));
                    assert!(in_range(data.ec.unwrap(), 1.2, 2.5));
                    assert_eq!(data.ph, (data.ph * 100.0).round() / 100.0);
                }
                ReadingData::Aquaponics(_) => panic!("Wrong system"),
            }
            match simulate(SystemType::Aquaponics, &mut rng, Utc::now()).data {
                ReadingData::Aquaponics(data) => {
                    assert!(in_range(data.ph, 6.8, 7.5));
                    assert!(in_range(data.dissolved_oxygen.unwrap(), 5.0, 8.0));
                    assert!(in_range(data.ammonia.unwrap(), 0.1, 1.5));
                    assert!(in_range(data.nitrate.unwrap(), 5.0, 50.0));
                }
                ReadingData::Hydroponics(_) => panic!("Wrong system"),
            }
        }
    }

    #[tokio::test]
    async fn test_generator_writes_internal_readings() {
        // prepare
        let service = IngestService::new(memory_db().await, 50);

        let mut rng = StdRng::seed_from_u64(42);

        // execute
        let first = generate_once(&service, &mut rng).await;
        let second = generate_once(&service, &mut rng).await;

        // validate
        assert_eq!(2, first);
        assert_eq!(2, second);
        for system in SystemType::ALL {
            let recent = service.recent(system, None).await.unwrap();
            assert_eq!(2, recent.len());
            assert!(recent.iter().all(|r| r.reading.source == INTERNAL_SOURCE));
        }
        assert_eq!(0, service.device_count().await.unwrap());
    }
}
