use std::fmt;

pub const BTTS_STRONG: f64 = 70.0;
pub const BTTS_MEDIUM: f64 = 55.0;
pub const OVER25_STRONG: f64 = 65.0;
pub const OVER25_MEDIUM: f64 = 50.0;

const BEST_BET_BTTS: f64 = 70.0;
const BEST_BET_OVER25: f64 = 65.0;
const BTTS_ONLY_MIN: f64 = 60.0;
const OVER25_ONLY_MIN: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Strong,
    Medium,
    Skip,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Strong, Signal::Medium, Signal::Skip];

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "STRONG",
            Self::Medium => "MEDIUM",
            Self::Skip => "SKIP",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    BestBet,
    BttsOnly,
    Over25,
    Avoid,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Self::BestBet => "BEST BET",
            Self::BttsOnly => "BTTS ONLY",
            Self::Over25 => "OVER 2.5",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn btts_signal(p: f64) -> Signal {
    ladder(p, BTTS_STRONG, BTTS_MEDIUM)
}

pub fn over25_signal(p: f64) -> Signal {
    ladder(p, OVER25_STRONG, OVER25_MEDIUM)
}

fn ladder(p: f64, strong: f64, medium: f64) -> Signal {
    if p >= strong {
        Signal::Strong
    } else if p >= medium {
        Signal::Medium
    } else {
        Signal::Skip
    }
}

/// First matching rule wins, evaluated on the raw scores.
pub fn recommend(btts: f64, over25: f64) -> Recommendation {
    if btts >= BEST_BET_BTTS && over25 >= BEST_BET_OVER25 {
        Recommendation::BestBet
    } else if btts >= BTTS_ONLY_MIN {
        Recommendation::BttsOnly
    } else if over25 >= OVER25_ONLY_MIN {
        Recommendation::Over25
    } else {
        Recommendation::Avoid
    }
}
