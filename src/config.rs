use std::{env, str::FromStr, time::Duration};

use crate::{error::AppError, sheet::WriteMode};

const DEFAULT_SPREADSHEET: &str = "fish_recorder";
const DEFAULT_WORKSHEET: &str = "input_data";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const GEO_LOCATION_ENDPOINT: &str = "http://ip-api.com/json/";
pub const WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4";
pub const DRIVE_ENDPOINT: &str = "https://www.googleapis.com/drive/v3";

/// Where the record ends up and how to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub access_token: String,
    /// Spreadsheet title, resolved through Drive when `spreadsheet_id` is unset
    pub spreadsheet: String,
    pub spreadsheet_id: Option<String>,
    pub worksheet: String,
    pub sheets_endpoint: String,
    pub drive_endpoint: String,
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sheet: SheetConfig,
    pub write_mode: WriteMode,
    pub http_timeout: Duration,
    pub geo_endpoint: String,
    pub weather_endpoint: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let access_token = get("GOOGLE_ACCESS_TOKEN")
            .ok_or_else(|| AppError::EnvVarNotSet("GOOGLE_ACCESS_TOKEN".to_string()))?;

        let write_mode = match get("FISH_RECORDER_WRITE_MODE") {
            Some(v) => parse_var("FISH_RECORDER_WRITE_MODE", &v)?,
            None => WriteMode::default(),
        };

        let timeout_secs: u64 = match get("FISH_RECORDER_HTTP_TIMEOUT_SECS") {
            Some(v) => parse_var("FISH_RECORDER_HTTP_TIMEOUT_SECS", &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::InvalidConfig {
                name: "FISH_RECORDER_HTTP_TIMEOUT_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            sheet: SheetConfig {
                access_token,
                spreadsheet: or("FISH_RECORDER_SPREADSHEET", DEFAULT_SPREADSHEET),
                spreadsheet_id: get("FISH_RECORDER_SPREADSHEET_ID"),
                worksheet: or("FISH_RECORDER_WORKSHEET", DEFAULT_WORKSHEET),
                sheets_endpoint: or("FISH_RECORDER_SHEETS_ENDPOINT", SHEETS_ENDPOINT),
                drive_endpoint: or("FISH_RECORDER_DRIVE_ENDPOINT", DRIVE_ENDPOINT),
            },
            write_mode,
            http_timeout: Duration::from_secs(timeout_secs),
            geo_endpoint: or("FISH_RECORDER_GEO_ENDPOINT", GEO_LOCATION_ENDPOINT),
            weather_endpoint: or("FISH_RECORDER_WEATHER_ENDPOINT", WEATHER_ENDPOINT),
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| AppError::InvalidConfig {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
