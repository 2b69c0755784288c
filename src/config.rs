use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_SNAPSHOT_PATH: &str = "matches.csv";
pub const DEFAULT_LEAGUE_STATS_PATH: &str = "data/league_stats.csv";

/// Loads `.env.local` then `.env` into the process environment. Missing
/// files are fine.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_key: String,
    pub base_url: String,
    pub timezone: Option<String>,
    pub date: Option<NaiveDate>,
    pub snapshot_path: PathBuf,
    pub league_stats_path: PathBuf,
}

impl FetchConfig {
    /// Fails before any network call when no credential is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = opt_env("API_FOOTBALL_KEY")
            .or_else(|| opt_env("API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;
        let base_url = opt_env("API_FOOTBALL_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let date = match opt_env("FETCH_DATE") {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };

        Ok(Self {
            api_key,
            base_url,
            timezone: opt_env("API_FOOTBALL_TIMEZONE"),
            date,
            snapshot_path: snapshot_path_from_env(),
            league_stats_path: opt_env("LEAGUE_STATS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEAGUE_STATS_PATH)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub snapshot_path: PathBuf,
    pub fetcher_cmd: Option<String>,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            snapshot_path: snapshot_path_from_env(),
            fetcher_cmd: opt_env("FETCHER_CMD"),
        }
    }
}

pub fn snapshot_path_from_env() -> PathBuf {
    opt_env("MATCHES_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(raw.to_string()))
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
