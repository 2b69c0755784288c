use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use bet_terminal::board::{DayBoard, SlipKind, ViewMode};
use bet_terminal::error::LoadError;
use bet_terminal::league::League;
use bet_terminal::refresh::RefreshOutcome;
use bet_terminal::signals::Signal;
use bet_terminal::snapshot::{FixtureRecord, write_snapshot};
use bet_terminal::state::{AppState, BoardStatus};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn rec(name: &str, h: u32, a: u32) -> FixtureRecord {
    FixtureRecord {
        date: day(),
        league: League::LaLiga,
        home_team: name.to_string(),
        away_team: "Away".to_string(),
        home_scored_last5: h,
        away_scored_last5: a,
        league_btts_rate: 55.0,
        league_over25_rate: 58.0,
    }
}

fn ready_state() -> AppState {
    let mut state = AppState::new(PathBuf::from("unused.csv"), day());
    // 8+7 -> strong/strong, 3+3 -> medium/medium, 1+0 -> skip/skip
    let board = DayBoard::from_records(vec![rec("Hot", 8, 7), rec("Mid", 3, 3), rec("Cold", 1, 0)], day());
    state.set_board(board);
    state
}

#[test]
fn missing_snapshot_is_no_data_state() {
    let path = std::env::temp_dir().join("bet_terminal_state_missing.csv");
    let mut state = AppState::new(path, day());
    state.reload();
    match &state.board {
        BoardStatus::NoData(msg) => assert!(msg.contains("Run fetch_fixtures first")),
        other => panic!("expected no data, got {other:?}"),
    }
    assert!(state.visible_rows().is_empty());
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn empty_today_has_its_own_message() {
    let mut state = AppState::new(PathBuf::from("unused.csv"), day());
    state.set_board(Err(LoadError::NoMatchesToday(day())));
    match &state.board {
        BoardStatus::NoData(msg) => assert!(msg.contains("No matches found for today")),
        other => panic!("expected no data, got {other:?}"),
    }
}

#[test]
fn selection_is_clamped_when_filters_shrink_the_view() {
    let mut state = ready_state();
    state.select_next();
    state.select_next();
    state.select_next();
    assert_eq!(state.selected, 2);

    state.toggle_btts_filter(Signal::Skip);
    assert_eq!(state.visible_rows().len(), 2);
    assert_eq!(state.selected, 1);

    state.toggle_view_mode();
    assert_eq!(state.view.mode, ViewMode::BestBets);
    assert_eq!(state.visible_rows().len(), 1);
    assert_eq!(state.selected, 0);
    assert_eq!(
        state.selected_row().map(|m| m.fixture.home_team.as_str()),
        Some("Hot")
    );
}

#[test]
fn reset_restores_all_rows() {
    let mut state = ready_state();
    state.toggle_btts_filter(Signal::Strong);
    state.toggle_over25_filter(Signal::Medium);
    assert_eq!(state.visible_rows().len(), 1);
    state.reset_filters();
    assert_eq!(state.visible_rows().len(), 3);
}

#[test]
fn slip_panel_uses_whole_day_regardless_of_filters() {
    let mut state = ready_state();
    assert!(state.slip_rows().is_none());

    state.cycle_slip();
    state.toggle_btts_filter(Signal::Strong);
    let (kind, rows) = state.slip_rows().expect("slip selected");
    assert_eq!(kind, SlipKind::Safe);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fixture.home_team, "Hot");
}

#[test]
fn refresh_result_is_logged_without_reloading() {
    let mut state = ready_state();
    state.refresh_running = true;
    state.on_refresh_done(Ok(RefreshOutcome {
        success: true,
        code: Some(0),
        last_line: "matches.csv generated successfully (3 matches)".to_string(),
    }));
    assert!(!state.refresh_running);
    assert!(state.logs.iter().any(|l| l.contains("Press r to reload")));
    assert_eq!(state.visible_rows().len(), 3);

    state.on_refresh_done(Ok(RefreshOutcome {
        success: false,
        code: Some(1),
        last_line: "Error: API key not found".to_string(),
    }));
    assert!(
        state
            .logs
            .back()
            .is_some_and(|l| l.contains("exit 1") && l.contains("API key"))
    );
}

#[test]
fn log_is_bounded() {
    let mut state = AppState::new(PathBuf::from("unused.csv"), day());
    for i in 0..500 {
        state.push_log(format!("[INFO] {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] 499"));
}

fn snapshot_dated(tag: &str, date: NaiveDate) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bet_terminal_{tag}_{}", std::process::id()));
    let path = dir.join("matches.csv");
    let mut row = rec("Next", 4, 4);
    row.date = date;
    write_snapshot(&path, &[row]).unwrap();
    path
}

#[test]
fn reload_follows_the_date_forward() {
    let next = day().succ_opt().unwrap();
    let path = snapshot_dated("rollover", next);
    let mut state = AppState::new(path.clone(), day());

    state.reload_on(day());
    assert!(matches!(state.board, BoardStatus::NoData(_)));

    state.reload_on(next);
    assert_eq!(state.today, next);
    assert_eq!(state.day_board().map(|b| b.date), Some(next));
    assert_eq!(state.visible_rows().len(), 1);
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn reload_uses_the_current_local_date() {
    let today = Local::now().date_naive();
    let path = snapshot_dated("localday", today);
    let mut state = AppState::new(path.clone(), today.pred_opt().unwrap());

    state.reload();
    assert_eq!(state.today, today);
    assert!(matches!(state.board, BoardStatus::Ready(_)));
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
