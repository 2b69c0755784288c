use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use bet_terminal::api_football::ApiFootballClient;
use bet_terminal::collector::{FetchOutcome, run_fetch};
use bet_terminal::config::{FetchConfig, load_dotenv, parse_date};
use bet_terminal::logging::init_tracing;

fn main() -> Result<()> {
    load_dotenv();
    init_tracing();

    let mut cfg = FetchConfig::from_env()?;
    if let Some(raw) = arg_value("--date") {
        cfg.date = Some(parse_date(&raw)?);
    }
    if let Some(path) = arg_value("--snapshot") {
        cfg.snapshot_path = PathBuf::from(path);
    }
    if let Some(path) = arg_value("--stats") {
        cfg.league_stats_path = PathBuf::from(path);
    }
    let date = cfg.date.unwrap_or_else(|| Local::now().date_naive());

    let client = ApiFootballClient::new(&cfg)?;
    match run_fetch(&client, &cfg, date)? {
        FetchOutcome::NoSupportedFixtures { listed } => {
            println!("No supported fixtures found for {date} ({listed} listed).");
        }
        FetchOutcome::Written {
            path,
            rows,
            skipped,
        } => {
            for s in &skipped {
                println!("skipped {} vs {}: {}", s.home_team, s.away_team, s.reason);
            }
            println!("{} generated successfully ({rows} matches)", path.display());
        }
    }
    Ok(())
}

fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            if let Some(next) = args.get(idx + 1) {
                if !next.trim().is_empty() {
                    return Some(next.trim().to_string());
                }
            }
        }
    }
    None
}
