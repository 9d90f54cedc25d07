use super::CountRecord;
use crate::error::DBError;
use chrono::{DateTime, Utc};
use plantmon_core::{Device, DeviceRegistration, SystemType};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow, Debug)]
pub struct DeviceDao {
    pub(crate) id: i64,
    pub(crate) device_id: String,
    pub(crate) device_name: String,
    pub(crate) device_type: String,
    #[sqlx(try_from = "String")]
    pub(crate) system_type: SystemType,
    pub(crate) last_seen: DateTime<Utc>,
    pub(crate) registered_at: DateTime<Utc>,
}

impl From<DeviceDao> for Device {
    fn from(val: DeviceDao) -> Self {
        Device {
            id: val.id,
            device_id: val.device_id,
            device_name: val.device_name,
            device_type: val.device_type,
            system_type: val.system_type,
            last_seen: val.last_seen,
            registered_at: val.registered_at,
        }
    }
}

/// Registers an unseen device or refreshes a known one.
///
/// A known device gets its metadata overwritten and `last_seen` bumped,
/// `registered_at` keeps the time of the first registration.
pub async fn upsert(
    conn: &SqlitePool,
    registration: &DeviceRegistration,
) -> Result<DeviceDao, DBError> {
    let now = Utc::now();
    Ok(sql_stmnt!(
        DeviceDao,
        r#"INSERT INTO devices (device_id, device_name, device_type, system_type, last_seen, registered_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(device_id) DO UPDATE SET
                device_name = excluded.device_name,
                device_type = excluded.device_type,
                system_type = excluded.system_type,
                last_seen = excluded.last_seen
            RETURNING *"#,
        &registration.device_id,
        &registration.device_name,
        &registration.device_type,
        registration.system_type.as_str(),
        now,
        now
    )
    .fetch_one(conn)
    .await?)
}

/// Bumps `last_seen` of a known device.
///
/// Returns `false` if no device with this id is registered, nothing is created then.
pub async fn heartbeat(conn: &SqlitePool, device_id: &str) -> Result<bool, DBError> {
    let result = sql_stmnt!(
        "UPDATE devices SET last_seen = ? WHERE device_id = ?",
        Utc::now(),
        device_id
    )
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// READ devices, most recently active first
pub async fn read(conn: &SqlitePool) -> Result<Vec<DeviceDao>, DBError> {
    Ok(sql_stmnt!(
        DeviceDao,
        "SELECT * FROM devices ORDER BY last_seen DESC, id DESC"
    )
    .fetch_all(conn)
    .await?)
}

#[cfg(test)]
pub async fn get(conn: &SqlitePool, device_id: &str) -> Result<Option<DeviceDao>, DBError> {
    Ok(
        sql_stmnt!(DeviceDao, "SELECT * FROM devices WHERE device_id = ?", device_id)
            .fetch_optional(conn)
            .await?,
    )
}

pub async fn count(conn: &SqlitePool) -> Result<i64, DBError> {
    let rows = sql_stmnt!(CountRecord, "SELECT count(*) AS count FROM devices")
        .fetch_one(conn)
        .await?;
    Ok(rows.count())
}
