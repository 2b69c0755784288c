use anyhow::Result;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http_client::http_client;

const API_KEY_HEADER: &str = "x-apisports-key";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiFixture {
    pub league: ApiLeague,
    pub teams: ApiTeams,
    #[serde(default)]
    pub goals: ApiGoals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLeague {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeam {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<Vec<Value>>,
    #[serde(default)]
    errors: Value,
}

/// The two reads the fetcher needs from a fixtures provider.
pub trait FixtureSource {
    fn fixtures_on(&self, date: NaiveDate) -> Result<Vec<ApiFixture>, FetchError>;

    fn last_team_fixtures(&self, team_id: u32, last: u32) -> Result<Vec<ApiFixture>, FetchError>;
}

pub struct ApiFootballClient {
    client: &'static Client,
    base_url: String,
    api_key: String,
    timezone: Option<String>,
}

impl ApiFootballClient {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            timezone: cfg.timezone.clone(),
        })
    }

    fn get_fixtures(&self, query: &[(&str, String)]) -> Result<String, FetchError> {
        let url = format!("{}/fixtures", self.base_url);
        debug!(%url, ?query, "api request");
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        let status = resp.status();
        let body = resp.text().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }
        Ok(body)
    }
}

impl FixtureSource for ApiFootballClient {
    fn fixtures_on(&self, date: NaiveDate) -> Result<Vec<ApiFixture>, FetchError> {
        let mut query = vec![("date", date.format("%Y-%m-%d").to_string())];
        if let Some(tz) = &self.timezone {
            query.push(("timezone", tz.clone()));
        }
        let body = self.get_fixtures(&query)?;
        parse_day_fixtures_json(&body)
    }

    fn last_team_fixtures(&self, team_id: u32, last: u32) -> Result<Vec<ApiFixture>, FetchError> {
        let body = self.get_fixtures(&[("team", team_id.to_string()), ("last", last.to_string())])?;
        parse_team_fixtures_json(&body)
    }
}

/// Parses a day listing. Items that don't have the expected shape are
/// dropped with a warning so one bad fixture can't sink the whole day.
pub fn parse_day_fixtures_json(raw: &str) -> Result<Vec<ApiFixture>, FetchError> {
    let items = parse_envelope(raw)?;
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ApiFixture>(item) {
            Ok(fixture) => out.push(fixture),
            Err(err) => warn!(index = idx, error = %err, "skipping malformed fixture item"),
        }
    }
    Ok(out)
}

/// Parses a team history listing. Strict: any malformed item fails the call.
pub fn parse_team_fixtures_json(raw: &str) -> Result<Vec<ApiFixture>, FetchError> {
    parse_envelope(raw)?
        .into_iter()
        .map(|item| serde_json::from_value::<ApiFixture>(item).map_err(FetchError::from))
        .collect()
}

fn parse_envelope(raw: &str) -> Result<Vec<Value>, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::Malformed("empty response body".to_string()));
    }
    let envelope: Envelope = serde_json::from_str(trimmed)?;
    if let Some(message) = api_error_message(&envelope.errors) {
        return Err(FetchError::Api(message));
    }
    // An empty list is a real answer; a body without the list is not.
    envelope.response.ok_or_else(|| {
        FetchError::Malformed(format!("no `response` list in body: {}", snippet(trimmed)))
    })
}

// The provider reports failures inside a 200 body: `errors` is `[]` when
// fine, otherwise an object or array of messages.
fn api_error_message(errors: &Value) -> Option<String> {
    let parts: Vec<String> = match errors {
        Value::Null => Vec::new(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", value_text(v)))
            .collect(),
        other => vec![other.to_string()],
    };
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn snippet(body: &str) -> String {
    body.trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(220)
        .collect()
}
