use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api_football::FixtureSource;
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::form::team_form;
use crate::league::League;
use crate::league_stats::LeagueStatsTable;
use crate::snapshot::{FixtureRecord, write_snapshot};

#[derive(Debug, Clone)]
pub struct SkippedFixture {
    pub home_team: String,
    pub away_team: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    pub records: Vec<FixtureRecord>,
    pub listed: usize,
    pub unsupported: usize,
    pub skipped: Vec<SkippedFixture>,
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    NoSupportedFixtures { listed: usize },
    Written {
        path: PathBuf,
        rows: usize,
        skipped: Vec<SkippedFixture>,
    },
}

/// Builds today's fixture records. The day listing failing is fatal; a
/// failed form lookup only drops that fixture.
pub fn collect_fixtures(
    source: &impl FixtureSource,
    date: NaiveDate,
    stats: &LeagueStatsTable,
) -> Result<CollectReport, FetchError> {
    let fixtures = source.fixtures_on(date)?;
    let mut report = CollectReport {
        listed: fixtures.len(),
        ..CollectReport::default()
    };

    for fixture in fixtures {
        let Some(league) = League::from_api_name(&fixture.league.name) else {
            debug!(
                league = %fixture.league.name,
                country = fixture.league.country.as_deref().unwrap_or("-"),
                "unsupported league"
            );
            report.unsupported += 1;
            continue;
        };

        let home = &fixture.teams.home;
        let away = &fixture.teams.away;
        info!("Fetching form: {} vs {}", home.name, away.name);

        let form = team_form(source, home.id)
            .and_then(|h| team_form(source, away.id).map(|a| (h, a)));
        let (home_scored, away_scored) = match form {
            Ok(pair) => pair,
            Err(err) => {
                warn!(home = %home.name, away = %away.name, error = %err, "skipping fixture");
                report.skipped.push(SkippedFixture {
                    home_team: home.name.clone(),
                    away_team: away.name.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let baseline = stats.baseline_for(league);
        report.records.push(FixtureRecord {
            date,
            league,
            home_team: home.name.clone(),
            away_team: away.name.clone(),
            home_scored_last5: home_scored,
            away_scored_last5: away_scored,
            league_btts_rate: baseline.btts_rate,
            league_over25_rate: baseline.over25_rate,
        });
    }

    if report.records.is_empty() && !report.skipped.is_empty() {
        return Err(FetchError::AllFixturesFailed(report.skipped.len()));
    }
    Ok(report)
}

/// One fetch run: collect, then replace the snapshot. Nothing is written
/// when no supported fixture survives.
pub fn run_fetch(
    source: &impl FixtureSource,
    cfg: &FetchConfig,
    date: NaiveDate,
) -> Result<FetchOutcome> {
    let stats = LeagueStatsTable::load_or_default(&cfg.league_stats_path)?;
    debug!(leagues = stats.len(), path = %cfg.league_stats_path.display(), "league baselines loaded");
    let report = collect_fixtures(source, date, &stats)
        .with_context(|| format!("fetch fixtures for {date}"))?;

    info!(
        listed = report.listed,
        unsupported = report.unsupported,
        kept = report.records.len(),
        skipped = report.skipped.len(),
        "fixtures collected"
    );

    if report.records.is_empty() {
        return Ok(FetchOutcome::NoSupportedFixtures {
            listed: report.listed,
        });
    }

    write_snapshot(&cfg.snapshot_path, &report.records)?;
    Ok(FetchOutcome::Written {
        path: cfg.snapshot_path.clone(),
        rows: report.records.len(),
        skipped: report.skipped,
    })
}
