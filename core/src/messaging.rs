use crate::error::ValidationError;
use crate::{
    format_timestamp, AquaponicsData, DeviceRegistration, HydroponicsData, Reading, ReadingData,
    SystemType, DEFAULT_DEVICE_TYPE,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/data/hydroponics`
///
/// Every field is optional on the wire, presence of the required ones is
/// checked by [`Submission::validate`]. A client supplied `source` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HydroponicsSubmission {
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub timestamp: Option<String>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub water_level: Option<f64>,
    pub light_intensity: Option<f64>,
    pub ec: Option<f64>,
}

/// Body of `POST /api/data/aquaponics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AquaponicsSubmission {
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub timestamp: Option<String>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub water_level: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub ammonia: Option<f64>,
    pub nitrate: Option<f64>,
}

/// A submission that passed validation: the device to refresh and the
/// fully populated reading to append
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub device: DeviceRegistration,
    pub reading: Reading,
}

pub trait Submission: DeserializeOwned {
    const SYSTEM: SystemType;

    /// Checks ph, temperature and device_id (in that order), defaults the
    /// timestamp to `now` and attributes the reading to the device.
    fn validate(self, now: DateTime<Utc>) -> Result<ValidatedSubmission, ValidationError>;
}

struct Envelope {
    device_id: Option<String>,
    device_name: Option<String>,
    device_type: Option<String>,
    timestamp: Option<String>,
}

impl Envelope {
    fn finish(
        self,
        system: SystemType,
        now: DateTime<Utc>,
        data: ReadingData,
    ) -> Result<ValidatedSubmission, ValidationError> {
        let device_id = require(self.device_id, "device_id")?;
        let device = DeviceRegistration {
            device_name: self
                .device_name
                .unwrap_or_else(|| system.default_device_name().to_owned()),
            device_type: self
                .device_type
                .unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_owned()),
            device_id: device_id.clone(),
            system_type: system,
        };
        let reading = Reading {
            timestamp: self.timestamp.unwrap_or_else(|| format_timestamp(now)),
            source: device_id,
            data,
        };
        Ok(ValidatedSubmission { device, reading })
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

impl Submission for HydroponicsSubmission {
    const SYSTEM: SystemType = SystemType::Hydroponics;

    fn validate(self, now: DateTime<Utc>) -> Result<ValidatedSubmission, ValidationError> {
        let data = HydroponicsData {
            ph: require(self.ph, "ph")?,
            temperature: require(self.temperature, "temperature")?,
            humidity: self.humidity,
            water_level: self.water_level,
            light_intensity: self.light_intensity,
            ec: self.ec,
        };
        let envelope = Envelope {
            device_id: self.device_id,
            device_name: self.device_name,
            device_type: self.device_type,
            timestamp: self.timestamp,
        };
        envelope.finish(Self::SYSTEM, now, ReadingData::Hydroponics(data))
    }
}

impl Submission for AquaponicsSubmission {
    const SYSTEM: SystemType = SystemType::Aquaponics;

    fn validate(self, now: DateTime<Utc>) -> Result<ValidatedSubmission, ValidationError> {
        let data = AquaponicsData {
            ph: require(self.ph, "ph")?,
            temperature: require(self.temperature, "temperature")?,
            humidity: self.humidity,
            water_level: self.water_level,
            dissolved_oxygen: self.dissolved_oxygen,
            ammonia: self.ammonia,
            nitrate: self.nitrate,
        };
        let envelope = Envelope {
            device_id: self.device_id,
            device_name: self.device_name,
            device_type: self.device_type,
            timestamp: self.timestamp,
        };
        envelope.finish(Self::SYSTEM, now, ReadingData::Aquaponics(data))
    }
}
