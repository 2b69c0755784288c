use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::league::League;

pub const DEFAULT_BTTS_RATE: f64 = 55.0;
pub const DEFAULT_OVER25_RATE: f64 = 58.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueBaseline {
    pub btts_rate: f64,
    pub over25_rate: f64,
}

impl Default for LeagueBaseline {
    fn default() -> Self {
        Self {
            btts_rate: DEFAULT_BTTS_RATE,
            over25_rate: DEFAULT_OVER25_RATE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatsRow {
    league: String,
    #[serde(default)]
    league_btts_rate: Option<f64>,
    #[serde(default)]
    league_over25_rate: Option<f64>,
}

/// Static per-league baselines keyed by league. Leagues (or single values)
/// missing from the table fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct LeagueStatsTable {
    rows: HashMap<League, (Option<f64>, Option<f64>)>,
}

impl LeagueStatsTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("parse {}", path.display()))
    }

    /// Missing file means an empty table; everything defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "league stats file missing, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = HashMap::new();
        for record in rdr.deserialize::<StatsRow>() {
            let row = record.context("bad league stats row")?;
            let Some(league) = League::from_key(&row.league) else {
                debug!(league = %row.league, "ignoring stats for unsupported league");
                continue;
            };
            // First row wins on duplicates.
            rows.entry(league)
                .or_insert((row.league_btts_rate, row.league_over25_rate));
        }
        Ok(Self { rows })
    }

    pub fn baseline_for(&self, league: League) -> LeagueBaseline {
        let defaults = LeagueBaseline::default();
        match self.rows.get(&league) {
            Some((btts, over)) => LeagueBaseline {
                btts_rate: btts.unwrap_or(defaults.btts_rate),
                over25_rate: over.unwrap_or(defaults.over25_rate),
            },
            None => defaults,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
