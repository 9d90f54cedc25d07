use once_cell::sync::Lazy;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub struct Config {
    database_url: String,
    server_port: u16,
    generator_interval_secs: u64,
    recent_limit: i64,
}

impl Config {
    pub fn database_url(&self) -> String {
        self.database_url.clone()
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    /// Seconds between two internal generator runs, 0 disables the generator
    pub fn generator_interval_secs(&self) -> u64 {
        self.generator_interval_secs
    }

    pub fn recent_limit(&self) -> i64 {
        self.recent_limit
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{} is invalid: {}", name, e)),
        Err(_) => default,
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv::dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://plant_monitoring.db".to_owned());
    let server_port = parse_var("SERVER_PORT", 5000);
    let generator_interval_secs = parse_var("GENERATOR_INTERVAL_SECS", 30);
    let recent_limit = parse_var("RECENT_LIMIT", 50);

    if recent_limit < 1 {
        panic!("RECENT_LIMIT must be positive");
    }

    Config {
        database_url,
        server_port,
        generator_interval_secs,
        recent_limit,
    }
});
