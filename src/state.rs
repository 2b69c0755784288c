use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::board::{DayBoard, ScoredMatch, SlipKind, ViewOptions};
use crate::error::LoadError;
use crate::refresh::RefreshOutcome;
use crate::signals::Signal;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub enum BoardStatus {
    Ready(DayBoard),
    /// Missing snapshot or nothing for today; the message tells the user what to run.
    NoData(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub today: NaiveDate,
    pub snapshot_path: PathBuf,
    pub board: BoardStatus,
    pub view: ViewOptions,
    pub slip: Option<SlipKind>,
    pub selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub refresh_running: bool,
}

impl AppState {
    pub fn new(snapshot_path: PathBuf, today: NaiveDate) -> Self {
        Self {
            today,
            snapshot_path,
            board: BoardStatus::NoData("Loading...".to_string()),
            view: ViewOptions::default(),
            slip: None,
            selected: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            refresh_running: false,
        }
    }

    /// Re-reads the snapshot for the current local date, so a dashboard left
    /// open past midnight picks up the new day.
    pub fn reload(&mut self) {
        self.reload_on(Local::now().date_naive());
    }

    pub fn reload_on(&mut self, today: NaiveDate) {
        self.today = today;
        let result = DayBoard::load(&self.snapshot_path, self.today);
        self.set_board(result);
    }

    pub fn set_board(&mut self, result: Result<DayBoard, LoadError>) {
        match result {
            Ok(board) => {
                self.push_log(format!(
                    "[INFO] Loaded {} matches for {}",
                    board.rows.len(),
                    board.date
                ));
                self.board = BoardStatus::Ready(board);
            }
            Err(err) if err.is_no_data() => {
                self.push_log(format!("[WARN] {err}"));
                self.board = BoardStatus::NoData(err.to_string());
            }
            Err(err) => {
                self.push_log(format!("[WARN] {err}"));
                self.board = BoardStatus::Failed(err.to_string());
            }
        }
        self.clamp_selection();
    }

    pub fn day_board(&self) -> Option<&DayBoard> {
        match &self.board {
            BoardStatus::Ready(board) => Some(board),
            _ => None,
        }
    }

    pub fn visible_rows(&self) -> Vec<&ScoredMatch> {
        self.day_board()
            .map(|b| b.view(&self.view))
            .unwrap_or_default()
    }

    pub fn slip_rows(&self) -> Option<(SlipKind, Vec<&ScoredMatch>)> {
        let kind = self.slip?;
        let rows = self.day_board().map(|b| b.slip(kind)).unwrap_or_default();
        Some((kind, rows))
    }

    pub fn selected_row(&self) -> Option<&ScoredMatch> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn toggle_view_mode(&mut self) {
        self.view.mode = self.view.mode.toggle();
        self.clamp_selection();
    }

    pub fn toggle_btts_filter(&mut self, signal: Signal) {
        self.view.btts.toggle(signal);
        self.clamp_selection();
    }

    pub fn toggle_over25_filter(&mut self, signal: Signal) {
        self.view.over25.toggle(signal);
        self.clamp_selection();
    }

    pub fn reset_filters(&mut self) {
        self.view.btts = Default::default();
        self.view.over25 = Default::default();
        self.clamp_selection();
    }

    pub fn cycle_slip(&mut self) {
        self.slip = SlipKind::cycle(self.slip);
    }

    pub fn cycle_sort(&mut self) {
        self.view.sort = self.view.sort.cycle();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let total = self.visible_rows().len();
        if total > 0 && self.selected + 1 < total {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn on_refresh_done(&mut self, result: Result<RefreshOutcome, String>) {
        self.refresh_running = false;
        match result {
            Ok(outcome) if outcome.success => {
                self.push_log("[INFO] Data refreshed! Press r to reload.");
                if !outcome.last_line.is_empty() {
                    self.push_log(format!("[INFO] {}", outcome.last_line));
                }
            }
            Ok(outcome) => {
                let code = outcome
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                self.push_log(format!("[WARN] Fetch failed (exit {code}): {}", outcome.last_line));
            }
            Err(err) => self.push_log(format!("[WARN] Fetch could not run: {err}")),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    fn clamp_selection(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }
}
