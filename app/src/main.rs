mod config;
mod error;
mod ingest;
mod logging;
mod models;
mod rest;

use config::CONFIG;
use ingest::{generator, IngestService};
use once_cell::sync::Lazy;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
pub async fn main() -> ExitCode {
    // .env may carry RUST_LOG
    Lazy::force(&CONFIG);
    logging::init();

    let database_url = CONFIG.database_url();
    let db_conn = match models::establish_db_connection(&database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("Cannot open database {}: {}", database_url, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Opened database {}", database_url);

    let service = IngestService::new(db_conn, CONFIG.recent_limit());

    let interval_secs = CONFIG.generator_interval_secs();
    if interval_secs > 0 {
        tokio::spawn(generator::dispatch_generator_loop(
            service.clone(),
            Duration::from_secs(interval_secs),
        ));
    } else {
        info!("Internal generator disabled");
    }

    if let Err(e) = rest::dispatch_server_daemon(service, CONFIG.server_port()).await {
        error!("Webserver failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
