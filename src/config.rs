use crate::date::{parse_date_key, DateRange};
use crate::storage::resolve_data_path;
use chrono::NaiveDate;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub range: DateRange,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            data_path: resolve_data_path(),
            range: range_from(optional_date("TRACKER_START"), optional_date("TRACKER_END")),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok().as_deref(), default)
}

fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("invalid {key} value '{raw}': {err}, using default {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn optional_date(key: &str) -> Option<NaiveDate> {
    date_or_none(key, env::var(key).ok().as_deref())
}

fn date_or_none(key: &str, raw: Option<&str>) -> Option<NaiveDate> {
    match parse_date_key(raw?) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("ignoring {key}: {err}");
            None
        }
    }
}

/// An inverted range cannot contain any date, so it is dropped entirely.
fn range_from(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            warn!("TRACKER_START {start} is after TRACKER_END {end}, ignoring both");
            return DateRange::default();
        }
    }
    DateRange { start, end }
}
