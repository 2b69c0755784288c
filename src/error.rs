use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found. Set API_FOOTBALL_KEY (or API_KEY) in the environment or .env")]
    MissingApiKey,

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http {status} from {url}: {snippet}")]
    Status {
        url: String,
        status: u16,
        snippet: String,
    },

    #[error("api rejected request: {0}")]
    Api(String),

    #[error("invalid api json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed api data: {0}")]
    Malformed(String),

    #[error("form lookup failed for all {0} supported fixtures")]
    AllFixturesFailed(usize),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found. Run fetch_fixtures first.", .0.display())]
    MissingSnapshot(PathBuf),

    #[error("No matches found for today ({0}). Run fetch_fixtures.")]
    NoMatchesToday(NaiveDate),

    #[error("failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad snapshot row in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// True for the "no data yet" states the dashboard renders as guidance.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::MissingSnapshot(_) | Self::NoMatchesToday(_))
    }
}
