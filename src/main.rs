use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use bet_terminal::board::{ScoredMatch, SignalFilter, SlipKind};
use bet_terminal::config::{DashboardConfig, load_dotenv};
use bet_terminal::export::export_board;
use bet_terminal::refresh::{self, RefreshOutcome};
use bet_terminal::signals::{Recommendation, Signal};
use bet_terminal::state::{AppState, BoardStatus};

type RefreshResult = Result<RefreshOutcome, String>;

struct App {
    state: AppState,
    should_quit: bool,
    fetcher_cmd: Option<String>,
    refresh_tx: mpsc::Sender<RefreshResult>,
    refresh_rx: mpsc::Receiver<RefreshResult>,
}

impl App {
    fn new(cfg: DashboardConfig) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel();
        let today = Local::now().date_naive();
        Self {
            state: AppState::new(cfg.snapshot_path, today),
            should_quit: false,
            fetcher_cmd: cfg.fetcher_cmd,
            refresh_tx,
            refresh_rx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('v') | KeyCode::Char('V') => self.state.toggle_view_mode(),
            KeyCode::Char('1') => self.state.toggle_btts_filter(Signal::Strong),
            KeyCode::Char('2') => self.state.toggle_btts_filter(Signal::Medium),
            KeyCode::Char('3') => self.state.toggle_btts_filter(Signal::Skip),
            KeyCode::Char('4') => self.state.toggle_over25_filter(Signal::Strong),
            KeyCode::Char('5') => self.state.toggle_over25_filter(Signal::Medium),
            KeyCode::Char('6') => self.state.toggle_over25_filter(Signal::Skip),
            KeyCode::Char('a') => self.state.reset_filters(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.state.cycle_slip(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('u') | KeyCode::Char('U') => self.request_refresh(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.state.reload(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn request_refresh(&mut self) {
        if self.state.refresh_running {
            self.state.push_log("[INFO] Fetch already running");
            return;
        }
        let cmd = refresh::fetcher_command(self.fetcher_cmd.as_deref());
        self.state
            .push_log(format!("[INFO] Fetching latest matches ({})", cmd.join(" ")));
        self.state.refresh_running = true;

        let tx = self.refresh_tx.clone();
        thread::spawn(move || {
            let result = refresh::run_fetcher(&cmd).map_err(|err| format!("{err:#}"));
            let _ = tx.send(result);
        });
    }

    fn export(&mut self) {
        let Some(board) = self.state.day_board() else {
            self.state.push_log("[INFO] Nothing to export");
            return;
        };
        let path = PathBuf::from(format!("bet_slips_{}.xlsx", board.date));
        let message = match export_board(&path, board, &self.state.view) {
            Ok(report) => format!(
                "[INFO] Exported {} matches, {} best bets to {}",
                report.matches,
                report.best_bets,
                path.display()
            ),
            Err(err) => format!("[WARN] Export failed: {err:#}"),
        };
        self.state.push_log(message);
    }
}

fn main() -> io::Result<()> {
    load_dotenv();
    let cfg = DashboardConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(cfg);
    app.state.reload();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(result) = app.refresh_rx.try_recv() {
            app.state.on_refresh_done(result);
        }

        terminal.draw(|f| ui(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title(console_title(state)).borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let refresh = if state.refresh_running {
        " | FETCHING..."
    } else {
        ""
    };
    let line1 = format!(
        "TODAY'S BETTING ANALYSIS | {} | {} | Sort: {}{refresh}",
        state.today,
        state.view.mode.label(),
        state.view.sort.label()
    );
    let line2 = format!(
        "BTTS: {}  |  O2.5: {}",
        filter_text(&state.view.btts, ['1', '2', '3']),
        filter_text(&state.view.over25, ['4', '5', '6'])
    );
    format!("{line1}\n{line2}")
}

fn filter_text(filter: &SignalFilter, keys: [char; 3]) -> String {
    Signal::ALL
        .iter()
        .zip(keys)
        .map(|(s, key)| {
            let mark = if filter.allows(*s) { 'x' } else { ' ' };
            format!("{key}[{mark}]{}", s.label())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn footer_text() -> String {
    "v View | 1-6 Filters | a All | p Slip | s Sort | u Update | r Reload | x Export | ? Help | q Quit\nPersonal-use tool. Always bet responsibly.".to_string()
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = match &state.board {
        BoardStatus::Ready(_) => None,
        BoardStatus::NoData(msg) => Some((msg.as_str(), Color::Yellow)),
        BoardStatus::Failed(msg) => Some((msg.as_str(), Color::Red)),
    };
    if let Some((msg, color)) = message {
        let p = Paragraph::new(msg)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
        return;
    }

    let (table_area, slip_area) = match state.slip {
        Some(_) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
                .split(area);
            (cols[0], Some(cols[1]))
        }
        None => (area, None),
    };

    render_matches(frame, table_area, state);
    if let Some(slip_area) = slip_area {
        render_slip(frame, slip_area, state);
    }
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.visible_rows();
    let title = format!("{} ({})", state.view.mode.label(), rows.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    if rows.is_empty() {
        let empty = Paragraph::new("No matches pass the current filters")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        [
            "League", "Home", "Away", "H L5", "A L5", "BTTS %", "O2.5 %", "BTTS", "O2.5",
            "Pick",
        ]
        .map(Cell::from),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(10),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let body = rows.iter().map(|m| {
        let f = &m.fixture;
        Row::new(vec![
            Cell::from(f.league.key()),
            Cell::from(f.home_team.as_str()),
            Cell::from(f.away_team.as_str()),
            Cell::from(f.home_scored_last5.to_string()),
            Cell::from(f.away_scored_last5.to_string()),
            Cell::from(format!("{:.1}", m.btts)),
            Cell::from(format!("{:.1}", m.over25)),
            Cell::from(m.btts_signal.label()).style(signal_style(m.btts_signal)),
            Cell::from(m.over25_signal.label()).style(signal_style(m.over25_signal)),
            Cell::from(m.recommendation.label()).style(recommendation_style(m.recommendation)),
        ])
    });

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_slip(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some((kind, rows)) = state.slip_rows() else {
        return;
    };
    let block = Block::default()
        .title(format!("{} (max {})", kind.label(), kind.limit()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(slip_color(kind)));

    if rows.is_empty() {
        let empty = Paragraph::new("No matches qualify for this slip today.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let body = rows.iter().map(|m| slip_row(m));
    let table = Table::new(
        body,
        [
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(["Match", "BTTS", "O2.5", "Pick"].map(Cell::from))
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);
    frame.render_widget(table, area);
}

fn slip_row(m: &ScoredMatch) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("{} v {}", m.fixture.home_team, m.fixture.away_team)),
        Cell::from(format!("{:.1}", m.btts)),
        Cell::from(format!("{:.1}", m.over25)),
        Cell::from(m.recommendation.label()).style(recommendation_style(m.recommendation)),
    ])
}

fn signal_style(signal: Signal) -> Style {
    let bg = match signal {
        Signal::Strong => Color::Rgb(0xc6, 0xf5, 0xc6),
        Signal::Medium => Color::Rgb(0xff, 0xf3, 0xc2),
        Signal::Skip => Color::Rgb(0xf5, 0xc6, 0xc6),
    };
    Style::default().fg(Color::Black).bg(bg)
}

fn recommendation_style(rec: Recommendation) -> Style {
    let bg = match rec {
        Recommendation::BestBet => Color::Rgb(0xb6, 0xff, 0xb6),
        Recommendation::BttsOnly => Color::Rgb(0xd4, 0xf1, 0xff),
        Recommendation::Over25 => Color::Rgb(0xff, 0xe5, 0xb4),
        Recommendation::Avoid => Color::Rgb(0xff, 0xb6, 0xb6),
    };
    Style::default().fg(Color::Black).bg(bg)
}

fn slip_color(kind: SlipKind) -> Color {
    match kind {
        SlipKind::Safe => Color::Green,
        SlipKind::Moderate => Color::Yellow,
        SlipKind::Risky => Color::Red,
    }
}

fn console_title(state: &AppState) -> String {
    match state.selected_row() {
        Some(m) => format!(
            "Console | {} v {} ({}) BTTS {:.1} / O2.5 {:.1} -> {}",
            m.fixture.home_team,
            m.fixture.away_team,
            m.fixture.league,
            m.btts,
            m.over25,
            m.recommendation
        ),
        None => "Console".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Betting Dashboard - Help",
        "",
        "View:",
        "  v            All matches / Best bets",
        "  s            Cycle sort (file, BTTS, O2.5)",
        "  j/k or ↑/↓   Move",
        "",
        "Filters:",
        "  1 2 3        BTTS STRONG / MEDIUM / SKIP",
        "  4 5 6        O2.5 STRONG / MEDIUM / SKIP",
        "  a            Select all labels",
        "",
        "Slips & data:",
        "  p            Cycle slip (none, safe, moderate, risky)",
        "  u            Update today's data (runs the fetcher)",
        "  r            Reload snapshot",
        "  x            Export to xlsx",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
