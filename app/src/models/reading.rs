use super::CountRecord;
use crate::error::DBError;
use plantmon_core::{
    AquaponicsData, HydroponicsData, Reading, ReadingData, StoredReading, SystemType,
};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
pub struct HydroponicsDao {
    pub(crate) id: i64,
    pub(crate) timestamp: String,
    pub(crate) source: String,
    pub(crate) ph: f64,
    pub(crate) temperature: f64,
    pub(crate) humidity: Option<f64>,
    pub(crate) water_level: Option<f64>,
    pub(crate) light_intensity: Option<f64>,
    pub(crate) ec: Option<f64>,
}

#[derive(sqlx::FromRow)]
pub struct AquaponicsDao {
    pub(crate) id: i64,
    pub(crate) timestamp: String,
    pub(crate) source: String,
    pub(crate) ph: f64,
    pub(crate) temperature: f64,
    pub(crate) humidity: Option<f64>,
    pub(crate) water_level: Option<f64>,
    pub(crate) dissolved_oxygen: Option<f64>,
    pub(crate) ammonia: Option<f64>,
    pub(crate) nitrate: Option<f64>,
}

impl From<HydroponicsDao> for StoredReading {
    fn from(val: HydroponicsDao) -> Self {
        StoredReading {
            id: val.id,
            reading: Reading {
                timestamp: val.timestamp,
                source: val.source,
                data: ReadingData::Hydroponics(HydroponicsData {
                    ph: val.ph,
                    temperature: val.temperature,
                    humidity: val.humidity,
                    water_level: val.water_level,
                    light_intensity: val.light_intensity,
                    ec: val.ec,
                }),
            },
        }
    }
}

impl From<AquaponicsDao> for StoredReading {
    fn from(val: AquaponicsDao) -> Self {
        StoredReading {
            id: val.id,
            reading: Reading {
                timestamp: val.timestamp,
                source: val.source,
                data: ReadingData::Aquaponics(AquaponicsData {
                    ph: val.ph,
                    temperature: val.temperature,
                    humidity: val.humidity,
                    water_level: val.water_level,
                    dissolved_oxygen: val.dissolved_oxygen,
                    ammonia: val.ammonia,
                    nitrate: val.nitrate,
                }),
            },
        }
    }
}

/// Appends a reading to the table of its system, returns the new row id
pub async fn insert(conn: &SqlitePool, reading: &Reading) -> Result<i64, DBError> {
    let result = match &reading.data {
        ReadingData::Hydroponics(data) => {
            sql_stmnt!(
                r#"INSERT INTO hydroponics
                    (timestamp, ph, temperature, humidity, water_level, light_intensity, ec, source)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
                &reading.timestamp,
                data.ph,
                data.temperature,
                data.humidity,
                data.water_level,
                data.light_intensity,
                data.ec,
                &reading.source
            )
            .execute(conn)
            .await?
        }
        ReadingData::Aquaponics(data) => {
            sql_stmnt!(
                r#"INSERT INTO aquaponics
                    (timestamp, ph, temperature, humidity, water_level, dissolved_oxygen, ammonia, nitrate, source)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
                &reading.timestamp,
                data.ph,
                data.temperature,
                data.humidity,
                data.water_level,
                data.dissolved_oxygen,
                data.ammonia,
                data.nitrate,
                &reading.source
            )
            .execute(conn)
            .await?
        }
    };
    Ok(result.last_insert_rowid())
}

/// READ the latest `limit` readings in insertion order, newest first
pub async fn recent(
    conn: &SqlitePool,
    system: SystemType,
    limit: i64,
) -> Result<Vec<StoredReading>, DBError> {
    let readings: Vec<StoredReading> = match system {
        SystemType::Hydroponics => sql_stmnt!(
            HydroponicsDao,
            r#"SELECT id, timestamp, source, ph, temperature, humidity, water_level, light_intensity, ec
                FROM hydroponics
                ORDER BY id DESC LIMIT ?"#,
            limit
        )
        .fetch_all(conn)
        .await?
        .into_iter()
        .map(StoredReading::from)
        .collect(),
        SystemType::Aquaponics => sql_stmnt!(
            AquaponicsDao,
            r#"SELECT id, timestamp, source, ph, temperature, humidity, water_level, dissolved_oxygen, ammonia, nitrate
                FROM aquaponics
                ORDER BY id DESC LIMIT ?"#,
            limit
        )
        .fetch_all(conn)
        .await?
        .into_iter()
        .map(StoredReading::from)
        .collect(),
    };
    Ok(readings)
}

pub async fn count(conn: &SqlitePool, system: SystemType) -> Result<i64, DBError> {
    // table names equal the system names
    let stmt = format!("SELECT count(*) AS count FROM {}", system.as_str());
    let rows = sql_stmnt!(CountRecord, &stmt).fetch_one(conn).await?;
    Ok(rows.count())
}
