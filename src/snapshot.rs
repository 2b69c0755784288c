use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::league::League;

/// One fixture row of the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub date: NaiveDate,
    pub league: League,
    pub home_team: String,
    pub away_team: String,
    pub home_scored_last5: u32,
    pub away_scored_last5: u32,
    pub league_btts_rate: f64,
    pub league_over25_rate: f64,
}

/// Replaces the snapshot at `path` with `records`.
pub fn write_snapshot(path: &Path, records: &[FixtureRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let tmp = path.with_extension("csv.tmp");
    let written = write_rows(&tmp, records)
        .and_then(|()| fs::rename(&tmp, path).context("swap snapshot"));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_rows(tmp: &Path, records: &[FixtureRecord]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(tmp).with_context(|| format!("open {}", tmp.display()))?;
    for record in records {
        wtr.serialize(record).context("serialize snapshot row")?;
    }
    wtr.flush().context("flush snapshot")?;
    Ok(())
}

/// Reads every row of the snapshot. A missing file is the "no data yet"
/// state, not a failure.
pub fn read_snapshot(path: &Path) -> Result<Vec<FixtureRecord>, LoadError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::MissingSnapshot(path.to_path_buf()));
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    read_snapshot_from(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_snapshot_from(reader: impl Read) -> Result<Vec<FixtureRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = "\
date,league,home_team,away_team,home_scored_last5,away_scored_last5,league_btts_rate,league_over25_rate
2026-10-16,EPL,Arsenal,Chelsea,9,6,52.0,56.0
2026-10-16,Serie A,Inter,Roma,11,4,55.0,58.0
";

    #[test]
    fn reads_rows_in_file_order() {
        let rows = read_snapshot_from(SNAPSHOT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].home_team, "Arsenal");
        assert_eq!(rows[1].league, League::SerieA);
        assert_eq!(rows[1].home_scored_last5, 11);
        assert_eq!(rows[0].league_over25_rate, 56.0);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(read_snapshot_from("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn unknown_league_key_is_rejected() {
        let raw = "date,league,home_team,away_team,home_scored_last5,away_scored_last5,league_btts_rate,league_over25_rate\n\
2026-10-16,MLS,A,B,1,1,50,50\n";
        assert!(read_snapshot_from(raw.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_no_data() {
        let path = std::env::temp_dir().join("bet_terminal_missing_snapshot.csv");
        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingSnapshot(_)));
        assert!(err.is_no_data());
    }

    #[test]
    fn write_replaces_previous_snapshot() {
        let dir = std::env::temp_dir().join(format!("bet_terminal_snap_{}", std::process::id()));
        let path = dir.join("matches.csv");
        let mut rows = read_snapshot_from(SNAPSHOT.as_bytes()).unwrap();
        write_snapshot(&path, &rows).unwrap();
        rows.truncate(1);
        write_snapshot(&path, &rows).unwrap();

        let back = read_snapshot(&path).unwrap();
        assert_eq!(back, rows);
        assert!(!path.with_extension("csv.tmp").exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = std::env::temp_dir().join(format!("bet_terminal_snapfail_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        // A directory where the snapshot should go makes the final swap fail.
        let path = dir.join("matches.csv");
        fs::create_dir_all(&path).unwrap();
        let rows = read_snapshot_from(SNAPSHOT.as_bytes()).unwrap();

        assert!(write_snapshot(&path, &rows).is_err());
        assert!(!path.with_extension("csv.tmp").exists());
        assert!(path.is_dir());
        let _ = fs::remove_dir_all(dir);
    }
}
