use crate::error::{DBError, IngestError};
use crate::models::{self, device as device_model, reading as reading_model};

use chrono::Utc;
use plantmon_core::{
    AquaponicsSubmission, Device, HydroponicsSubmission, Reading, StoredReading, Submission,
    SystemType, ValidatedSubmission,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, error, info_span, warn, Instrument};

pub mod generator;

/// Validates submitted readings, keeps the device registry current and
/// serves the read side of the store.
///
/// Shared between the REST handlers and the internal generator.
#[derive(Debug)]
pub struct IngestService {
    pub(crate) db_conn: SqlitePool,
    recent_limit: i64,
}

impl IngestService {
    pub fn new(db_conn: SqlitePool, recent_limit: i64) -> Arc<Self> {
        Arc::new(IngestService {
            db_conn,
            recent_limit,
        })
    }

    /// Parses and validates a raw request body for `system`, then ingests it.
    ///
    /// Nothing is written if parsing or validation fails.
    pub async fn submit(&self, system: SystemType, body: &[u8]) -> Result<i64, IngestError> {
        let now = Utc::now();
        let submission = match system {
            SystemType::Hydroponics => parse::<HydroponicsSubmission>(body)?.validate(now)?,
            SystemType::Aquaponics => parse::<AquaponicsSubmission>(body)?.validate(now)?,
        };
        self.ingest(submission).await
    }

    /// Refreshes the submitting device and appends the reading.
    ///
    /// Registry failures are logged but don't fail the request,
    /// a failed append does.
    pub async fn ingest(&self, submission: ValidatedSubmission) -> Result<i64, IngestError> {
        let ValidatedSubmission { device, reading } = submission;
        let span = info_span!(
            "ingest",
            system = %device.system_type,
            device_id = %device.device_id
        );

        async move {
            if let Err(e) = device_model::upsert(&self.db_conn, &device).await {
                error!("Failed registering device: {}", e);
            }
            match device_model::heartbeat(&self.db_conn, &device.device_id).await {
                Ok(true) => {}
                Ok(false) => warn!("Heartbeat for unregistered device"),
                Err(e) => error!("Failed updating device heartbeat: {}", e),
            }

            let id = self.record(&reading).await?;
            debug!(reading_id = id, "Stored reading");
            Ok::<i64, IngestError>(id)
        }
        .instrument(span)
        .await
    }

    /// Appends a reading without touching the device registry
    pub async fn record(&self, reading: &Reading) -> Result<i64, IngestError> {
        Ok(reading_model::insert(&self.db_conn, reading).await?)
    }

    /// Latest readings of `system`, newest first.
    ///
    /// `limit` is clamped to `1..=recent_limit` and defaults to `recent_limit`.
    pub async fn recent(
        &self,
        system: SystemType,
        limit: Option<i64>,
    ) -> Result<Vec<StoredReading>, IngestError> {
        let limit = limit
            .unwrap_or(self.recent_limit)
            .clamp(1, self.recent_limit);
        Ok(reading_model::recent(&self.db_conn, system, limit).await?)
    }

    /// All registered devices, most recently active first
    pub async fn devices(&self) -> Result<Vec<Device>, IngestError> {
        let devices = device_model::read(&self.db_conn).await?;
        Ok(devices.into_iter().map(Device::from).collect())
    }

    pub async fn check_db(&self) -> String {
        match models::check_schema(&self.db_conn).await {
            Ok(_) => "ok".to_owned(),
            Err(e) => e.to_string(),
        }
    }

    pub async fn reading_count(&self, system: SystemType) -> Result<i64, DBError> {
        reading_model::count(&self.db_conn, system).await
    }

    pub async fn device_count(&self) -> Result<i64, DBError> {
        device_model::count(&self.db_conn).await
    }
}

/// Submissions must be JSON objects, derived structs would also take arrays
fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, IngestError> {
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    let fields: Map<String, Value> = serde_path_to_error::deserialize(deserializer)?;
    Ok(serde_path_to_error::deserialize(Value::Object(fields))?)
}
