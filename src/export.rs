use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::board::{DayBoard, ScoredMatch, SlipKind, ViewMode, ViewOptions};

const HEADERS: [&str; 13] = [
    "Date",
    "League",
    "Home",
    "Away",
    "Home Scored L5",
    "Away Scored L5",
    "League BTTS (%)",
    "League Over 2.5 (%)",
    "BTTS Probability (%)",
    "Over 2.5 (%)",
    "BTTS Signal",
    "Over 2.5 Signal",
    "Final Recommendation",
];

pub struct ExportReport {
    pub matches: usize,
    pub best_bets: usize,
    pub safe: usize,
    pub moderate: usize,
    pub risky: usize,
}

enum XCell {
    Text(String),
    Number(f64),
}

/// Writes the current table, the best bets under the same filters and the
/// three slips, one sheet each.
pub fn export_board(path: &Path, board: &DayBoard, opts: &ViewOptions) -> Result<ExportReport> {
    let matches = board.view(opts);
    let best_bets = board.view(&ViewOptions {
        mode: ViewMode::BestBets,
        ..*opts
    });
    let safe = board.slip(SlipKind::Safe);
    let moderate = board.slip(SlipKind::Moderate);
    let risky = board.slip(SlipKind::Risky);

    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();
    for (name, rows) in [
        ("Matches", &matches),
        ("BestBets", &best_bets),
        ("SafeSlip", &safe),
        ("ModerateSlip", &moderate),
        ("RiskySlip", &risky),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        for (col, title) in HEADERS.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *title, &header_fmt)
                .with_context(|| format!("write header {title}"))?;
        }
        for (idx, m) in rows.iter().enumerate() {
            write_row(sheet, (idx + 1) as u32, &row_cells(m))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;

    Ok(ExportReport {
        matches: matches.len(),
        best_bets: best_bets.len(),
        safe: safe.len(),
        moderate: moderate.len(),
        risky: risky.len(),
    })
}

fn row_cells(m: &ScoredMatch) -> Vec<XCell> {
    let f = &m.fixture;
    vec![
        XCell::Text(f.date.format("%Y-%m-%d").to_string()),
        XCell::Text(f.league.key().to_string()),
        XCell::Text(f.home_team.clone()),
        XCell::Text(f.away_team.clone()),
        XCell::Number(f64::from(f.home_scored_last5)),
        XCell::Number(f64::from(f.away_scored_last5)),
        XCell::Number(f.league_btts_rate),
        XCell::Number(f.league_over25_rate),
        XCell::Number(m.btts),
        XCell::Number(m.over25),
        XCell::Text(m.btts_signal.label().to_string()),
        XCell::Text(m.over25_signal.label().to_string()),
        XCell::Text(m.recommendation.label().to_string()),
    ]
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[XCell]) -> Result<()> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        let written = match cell {
            XCell::Text(value) => worksheet.write_string(row, col, value),
            XCell::Number(value) => worksheet.write_number(row, col, *value),
        };
        written.with_context(|| format!("write cell ({row},{col})"))?;
    }
    Ok(())
}
