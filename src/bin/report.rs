use std::path::PathBuf;
use std::process;

use anyhow::{Result, anyhow};
use chrono::Local;

use bet_terminal::board::{
    DayBoard, ScoredMatch, SignalFilter, SlipKind, SortMode, ViewMode, ViewOptions,
};
use bet_terminal::config::{load_dotenv, parse_date, snapshot_path_from_env};
use bet_terminal::export::export_board;
use bet_terminal::logging::init_tracing;
use bet_terminal::signals::Signal;

fn main() -> Result<()> {
    load_dotenv();
    init_tracing();

    let snapshot = arg_value("--snapshot")
        .map(PathBuf::from)
        .unwrap_or_else(snapshot_path_from_env);
    let today = match arg_value("--date") {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };

    let mut opts = ViewOptions::default();
    if has_flag("--best-bets") {
        opts.mode = ViewMode::BestBets;
    }
    if let Some(raw) = arg_value("--btts") {
        opts.btts = parse_filter(&raw)?;
    }
    if let Some(raw) = arg_value("--over") {
        opts.over25 = parse_filter(&raw)?;
    }
    if let Some(raw) = arg_value("--sort") {
        opts.sort = SortMode::from_arg(&raw)
            .ok_or_else(|| anyhow!("unknown sort {raw:?}, expected file, btts or over"))?;
    }
    let only_slip = match arg_value("--slip") {
        Some(raw) => Some(
            SlipKind::from_arg(&raw)
                .ok_or_else(|| anyhow!("unknown slip {raw:?}, expected safe, moderate or risky"))?,
        ),
        None => None,
    };

    let board = match DayBoard::load(&snapshot, today) {
        Ok(board) => board,
        Err(err) if err.is_no_data() => {
            eprintln!("{err}");
            process::exit(2);
        }
        Err(err) => return Err(err.into()),
    };

    let rows = board.view(&opts);
    print_table(&format!("{} ({})", opts.mode.label(), board.date), &rows);
    println!(
        "Filters: BTTS {} | O2.5 {} | Sort {}",
        filter_label(&opts.btts),
        filter_label(&opts.over25),
        opts.sort.label()
    );

    let slips: Vec<SlipKind> = match only_slip {
        Some(kind) => vec![kind],
        None => SlipKind::ALL.to_vec(),
    };
    for kind in slips {
        println!();
        let slip = board.slip(kind);
        if slip.is_empty() {
            println!("{}", kind.label());
            println!("  No matches qualify for this slip today.");
        } else {
            print_table(kind.label(), &slip);
        }
    }

    if let Some(path) = arg_value("--export") {
        let path = PathBuf::from(path);
        let report = export_board(&path, &board, &opts)?;
        println!();
        println!(
            "Exported {} matches, {} best bets, slips {}/{}/{} to {}",
            report.matches,
            report.best_bets,
            report.safe,
            report.moderate,
            report.risky,
            path.display()
        );
    }

    println!();
    println!("Personal-use tool. Always bet responsibly.");
    Ok(())
}

fn print_table(title: &str, rows: &[&ScoredMatch]) {
    println!("{title}");
    if rows.is_empty() {
        println!("  No matches pass the current filters.");
        return;
    }
    println!(
        "{:<10} {:<20} {:<20} {:>4} {:>4} {:>6} {:>6} {:<7} {:<7} {:<10}",
        "League", "Home", "Away", "H L5", "A L5", "BTTS%", "O2.5%", "BTTS", "O2.5", "Pick"
    );
    for m in rows {
        let f = &m.fixture;
        println!(
            "{:<10} {:<20} {:<20} {:>4} {:>4} {:>6.1} {:>6.1} {:<7} {:<7} {:<10}",
            f.league.key(),
            fit(&f.home_team, 20),
            fit(&f.away_team, 20),
            f.home_scored_last5,
            f.away_scored_last5,
            m.btts,
            m.over25,
            m.btts_signal.label(),
            m.over25_signal.label(),
            m.recommendation.label()
        );
    }
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

fn filter_label(filter: &SignalFilter) -> String {
    if filter.is_all() {
        return "ALL".to_string();
    }
    let labels: Vec<&str> = filter.selected().into_iter().map(Signal::label).collect();
    if labels.is_empty() {
        "NONE".to_string()
    } else {
        labels.join(",")
    }
}

fn parse_filter(raw: &str) -> Result<SignalFilter> {
    let mut signals = Vec::new();
    for part in raw.split([',', ';', ' ']).filter(|p| !p.trim().is_empty()) {
        let signal = Signal::from_label(part)
            .ok_or_else(|| anyhow!("unknown signal {part:?}, expected STRONG, MEDIUM or SKIP"))?;
        signals.push(signal);
    }
    Ok(SignalFilter::only(&signals))
}

fn has_flag(name: &str) -> bool {
    std::env::args().skip(1).any(|a| a == name)
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
