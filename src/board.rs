use std::path::Path;

use chrono::NaiveDate;

use crate::error::LoadError;
use crate::scoring::{btts_probability, over25_probability};
use crate::signals::{
    BTTS_STRONG, OVER25_STRONG, Recommendation, Signal, btts_signal, over25_signal, recommend,
};
use crate::snapshot::{FixtureRecord, read_snapshot};

/// A snapshot row with its derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub fixture: FixtureRecord,
    pub btts: f64,
    pub over25: f64,
    pub btts_signal: Signal,
    pub over25_signal: Signal,
    pub recommendation: Recommendation,
}

impl ScoredMatch {
    pub fn score(fixture: FixtureRecord) -> Self {
        let btts = btts_probability(&fixture);
        let over25 = over25_probability(&fixture);
        Self {
            btts_signal: btts_signal(btts),
            over25_signal: over25_signal(over25),
            recommendation: recommend(btts, over25),
            btts,
            over25,
            fixture,
        }
    }

    pub fn is_best_bet_candidate(&self) -> bool {
        self.btts >= BTTS_STRONG
            || self.over25 >= OVER25_STRONG
            || self.recommendation == Recommendation::BestBet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    AllMatches,
    BestBets,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::AllMatches => Self::BestBets,
            Self::BestBets => Self::AllMatches,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AllMatches => "All Today's Matches",
            Self::BestBets => "Today's Best Bets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    File,
    Btts,
    Over25,
}

impl SortMode {
    pub fn cycle(self) -> Self {
        match self {
            Self::File => Self::Btts,
            Self::Btts => Self::Over25,
            Self::Over25 => Self::File,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Btts => "BTTS",
            Self::Over25 => "OVER 2.5",
        }
    }

    pub fn from_arg(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "btts" => Some(Self::Btts),
            "over" | "over25" => Some(Self::Over25),
            _ => None,
        }
    }
}

/// Multi-select over signal labels; starts with everything selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalFilter {
    strong: bool,
    medium: bool,
    skip: bool,
}

impl Default for SignalFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl SignalFilter {
    pub fn all() -> Self {
        Self {
            strong: true,
            medium: true,
            skip: true,
        }
    }

    pub fn none() -> Self {
        Self {
            strong: false,
            medium: false,
            skip: false,
        }
    }

    pub fn only(signals: &[Signal]) -> Self {
        let mut f = Self::none();
        for s in signals {
            f.set(*s, true);
        }
        f
    }

    pub fn allows(&self, signal: Signal) -> bool {
        match signal {
            Signal::Strong => self.strong,
            Signal::Medium => self.medium,
            Signal::Skip => self.skip,
        }
    }

    pub fn set(&mut self, signal: Signal, on: bool) {
        match signal {
            Signal::Strong => self.strong = on,
            Signal::Medium => self.medium = on,
            Signal::Skip => self.skip = on,
        }
    }

    pub fn toggle(&mut self, signal: Signal) {
        let on = self.allows(signal);
        self.set(signal, !on);
    }

    pub fn is_all(&self) -> bool {
        Signal::ALL.iter().all(|s| self.allows(*s))
    }

    pub fn selected(&self) -> Vec<Signal> {
        Signal::ALL
            .into_iter()
            .filter(|s| self.allows(*s))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlipKind {
    Safe,
    Moderate,
    Risky,
}

impl SlipKind {
    pub const ALL: [SlipKind; 3] = [SlipKind::Safe, SlipKind::Moderate, SlipKind::Risky];

    pub fn limit(self) -> usize {
        match self {
            Self::Safe => 2,
            Self::Moderate => 4,
            Self::Risky => 5,
        }
    }

    pub fn admits(self, rec: Recommendation) -> bool {
        match self {
            Self::Safe => rec == Recommendation::BestBet,
            Self::Moderate => matches!(rec, Recommendation::BestBet | Recommendation::BttsOnly),
            Self::Risky => rec != Recommendation::Avoid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE SLIP",
            Self::Moderate => "MODERATE SLIP",
            Self::Risky => "RISKY SLIP",
        }
    }

    /// None -> Safe -> Moderate -> Risky -> None.
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Safe),
            Some(Self::Safe) => Some(Self::Moderate),
            Some(Self::Moderate) => Some(Self::Risky),
            Some(Self::Risky) => None,
        }
    }

    pub fn from_arg(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "safe" => Some(Self::Safe),
            "moderate" => Some(Self::Moderate),
            "risky" => Some(Self::Risky),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub mode: ViewMode,
    pub btts: SignalFilter,
    pub over25: SignalFilter,
    pub sort: SortMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            mode: ViewMode::AllMatches,
            btts: SignalFilter::all(),
            over25: SignalFilter::all(),
            sort: SortMode::File,
        }
    }
}

/// Today's scored rows, in snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBoard {
    pub date: NaiveDate,
    pub rows: Vec<ScoredMatch>,
}

impl DayBoard {
    pub fn load(path: &Path, today: NaiveDate) -> Result<Self, LoadError> {
        Self::from_records(read_snapshot(path)?, today)
    }

    pub fn from_records(records: Vec<FixtureRecord>, today: NaiveDate) -> Result<Self, LoadError> {
        let rows: Vec<ScoredMatch> = records
            .into_iter()
            .filter(|r| r.date == today)
            .map(ScoredMatch::score)
            .collect();
        if rows.is_empty() {
            return Err(LoadError::NoMatchesToday(today));
        }
        Ok(Self { date: today, rows })
    }

    /// Rows passing both signal filters, in file order.
    pub fn filtered(&self, btts: &SignalFilter, over25: &SignalFilter) -> Vec<&ScoredMatch> {
        self.rows
            .iter()
            .filter(|m| btts.allows(m.btts_signal) && over25.allows(m.over25_signal))
            .collect()
    }

    /// The table the user is looking at: filters, then view mode, then sort.
    pub fn view(&self, opts: &ViewOptions) -> Vec<&ScoredMatch> {
        let filtered = self.filtered(&opts.btts, &opts.over25);
        let mut rows = match opts.mode {
            ViewMode::AllMatches => filtered,
            ViewMode::BestBets => best_bets(&filtered),
        };
        sort_rows(&mut rows, opts.sort);
        rows
    }

    /// First rows of the whole day the slip admits, in file order. User
    /// filters and sorting never apply here.
    pub fn slip(&self, kind: SlipKind) -> Vec<&ScoredMatch> {
        self.rows
            .iter()
            .filter(|m| kind.admits(m.recommendation))
            .take(kind.limit())
            .collect()
    }
}

pub fn best_bets<'a>(rows: &[&'a ScoredMatch]) -> Vec<&'a ScoredMatch> {
    rows.iter()
        .copied()
        .filter(|m| m.is_best_bet_candidate())
        .collect()
}

pub fn sort_rows(rows: &mut [&ScoredMatch], mode: SortMode) {
    match mode {
        SortMode::File => {}
        SortMode::Btts => rows.sort_by(|a, b| b.btts.total_cmp(&a.btts)),
        SortMode::Over25 => rows.sort_by(|a, b| b.over25.total_cmp(&a.over25)),
    }
}
