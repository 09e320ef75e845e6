use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use dotenvy::dotenv;
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    // Rate limiting
    pub rate_attendance_per_min: u32,

    pub api_prefix: String,

    // Accepted window for monthly summaries
    pub min_year: i32,
    pub max_year: i32,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key}={raw:?} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}

/// Summary years must be representable as calendar dates.
fn check_year_window(min_year: i32, max_year: i32) -> Result<()> {
    let latest = NaiveDate::MAX.year();
    if min_year < 1 || min_year > max_year {
        anyhow::bail!("MIN_YEAR ({min_year}) must be at least 1 and not exceed MAX_YEAR ({max_year})");
    }
    if max_year > latest {
        anyhow::bail!("MAX_YEAR ({max_year}) is past the latest supported year ({latest})");
    }
    Ok(())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: or_default("DB_MAX_CONNECTIONS", 10)?,

            rate_attendance_per_min: or_default("RATE_ATTENDANCE_PER_MIN", 600)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            min_year: or_default("MIN_YEAR", 2000)?,
            max_year: or_default("MAX_YEAR", 2100)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: or_default("LOG_LEVEL", tracing::Level::DEBUG)?,
        };

        check_year_window(config.min_year, config.max_year)?;

        Ok(config)
    }

    pub fn year_window(&self) -> RangeInclusive<i32> {
        self.min_year..=self.max_year
    }
}
