use crate::SystemType;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HydroponicsData {
    pub ph: f64,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub water_level: Option<f64>,
    pub light_intensity: Option<f64>,
    /// Electrical conductivity
    pub ec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AquaponicsData {
    pub ph: f64,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub water_level: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrate: Option<f64>,
}

/// System specific measurements, serialized flat next to the common fields
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReadingData {
    Hydroponics(HydroponicsData),
    Aquaponics(AquaponicsData),
}

impl ReadingData {
    pub fn system_type(&self) -> SystemType {
        match self {
            ReadingData::Hydroponics(_) => SystemType::Hydroponics,
            ReadingData::Aquaponics(_) => SystemType::Aquaponics,
        }
    }
}

/// A reading ready to be appended to the store.
///
/// `timestamp` is kept as the ISO-8601 string the device sent, it is never
/// used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Reading {
    pub timestamp: String,
    pub source: String,
    #[serde(flatten)]
    pub data: ReadingData,
}

impl Reading {
    pub fn system_type(&self) -> SystemType {
        self.data.system_type()
    }
}

/// A persisted reading together with its insertion sequence number
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoredReading {
    pub id: i64,
    #[serde(flatten)]
    pub reading: Reading,
}

/// Server side timestamp format for readings without a caller supplied one
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stored_reading_is_flat() {
        let stored = StoredReading {
            id: 7,
            reading: Reading {
                timestamp: "2024-05-01T10:00:00".to_owned(),
                source: "d1".to_owned(),
                data: ReadingData::Aquaponics(AquaponicsData {
                    ph: 7.1,
                    temperature: 24.0,
                    humidity: None,
                    water_level: Some(80.0),
                    dissolved_oxygen: Some(6.5),
                    ammonia: None,
                    nitrate: Some(20.0),
                }),
            },
        };

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(7, json["id"]);
        assert_eq!("d1", json["source"]);
        assert_eq!(7.1, json["ph"]);
        assert_eq!(6.5, json["dissolved_oxygen"]);
        assert!(json["ammonia"].is_null());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_format_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.5+00:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!("2024-05-01T10:00:00.500000Z", format_timestamp(ts));
    }
}
