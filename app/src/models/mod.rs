use crate::error::DBError;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

macro_rules! sql_stmnt {
    ($ret:ident, $stmt:expr) => {
        sqlx::query_as::<_, $ret>($stmt)
    };
    ($stmt:expr) => {
        sqlx::query($stmt)
    };
    ($ret:ident, $stmt:expr, $($bind:expr),*) => {
        sqlx::query_as::<_, $ret>($stmt)$(.bind($bind))*
    };
    ($stmt:expr, $($bind:expr),*) => {
        sqlx::query($stmt)$(.bind($bind))*
    };
}

static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens (and creates if missing) the sqlite database and brings the schema up to date
pub async fn establish_db_connection(database_url: &str) -> Result<SqlitePool, DBError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // every connection to an in-memory database gets its own database
    let mut pool_options = SqlitePoolOptions::new();
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let conn = pool_options.connect_with(options).await?;
    MIGRATOR.run(&conn).await?;
    Ok(conn)
}

pub async fn check_schema(conn: &SqlitePool) -> Result<(), DBError> {
    sql_stmnt!(CountRecord, "SELECT count(*) AS count FROM devices")
        .fetch_one(conn)
        .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
pub(crate) struct CountRecord {
    pub count: Option<i64>,
}

impl CountRecord {
    pub fn count(self) -> i64 {
        self.count.unwrap_or(0)
    }
}

pub mod device;
pub mod reading;

#[cfg(test)]
pub(crate) async fn memory_db() -> SqlitePool {
    establish_db_connection("sqlite::memory:").await.unwrap()
}
