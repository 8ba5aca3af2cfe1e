//! Admin dashboard screens: assessment table with summary stats, and a detail view.
//!
//! List keys: Up/Down select, Enter opens, D downloads, R refreshes, Q/Esc quits.
//! Detail keys: Esc/B back, D downloads, Up/Down/PgUp/PgDn scroll, Q quits.

use super::{
    centered_window, restore_terminal, sample_analysis, setup_terminal, spawn_request, UiMsg,
    WINDOW_TITLE,
};
use crate::admin::{download_url, AdminController, AdminView};
use crate::api::client::AssessmentApi;
use crate::api::endpoints::Endpoints;
use crate::config::Settings;
use crate::models::responses::{AssessmentDetail, AssessmentSummary, CompensationProfile};
use crate::report::analysis_lines;
use crate::report::format::{format_currency, format_date, format_datetime, format_optional_currency};
use crate::utils::browser::open_in_browser;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

pub(crate) struct AdminState {
    admin: AdminController,
    endpoints: Endpoints,
    detail_scroll: u16,
    notice: Option<String>,
    quit: bool,
}

impl AdminState {
    fn new(endpoints: Endpoints) -> Self {
        Self {
            admin: AdminController::new(),
            endpoints,
            detail_scroll: 0,
            notice: None,
            quit: false,
        }
    }

    /// Id the download/open actions apply to in the current view.
    fn current_id(&self) -> Option<i64> {
        match self.admin.view() {
            AdminView::List => self.admin.highlighted().map(|s| s.id),
            AdminView::Detail => self.admin.selected().map(|d| d.id),
        }
    }
}

const LOADING_NOTICE: &str = "Still loading… try again in a moment.";

/// Actions that need a worker thread; returned by key handling so tests can observe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    List,
    Detail(i64),
}

/// Interactive admin dashboard.
pub fn run(api: Arc<dyn AssessmentApi>) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting admin dashboard");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, api);
    restore_terminal(&mut terminal)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    api: Arc<dyn AssessmentApi>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut state = AdminState::new(api.endpoints().clone());
    let (tx, rx) = mpsc::channel::<UiMsg>();

    start_request(&mut state, Request::List, &api, &tx);

    while !state.quit {
        drain_messages(&mut state, &rx);
        terminal.draw(|f| draw(f.size(), f, &state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = handle_key(&mut state, key.code) {
                        start_request(&mut state, request, &api, &tx);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    info!("[PHASE: tui] [STEP: exit] Admin dashboard closed");
    Ok(())
}

fn start_request(
    state: &mut AdminState,
    request: Request,
    api: &Arc<dyn AssessmentApi>,
    tx: &mpsc::Sender<UiMsg>,
) {
    if !claim_fetch(state) {
        return;
    }
    let api = Arc::clone(api);
    match request {
        Request::List => spawn_request(
            tx,
            move || async move { api.list_assessments().await },
            UiMsg::AssessmentsLoaded,
        ),
        Request::Detail(id) => spawn_request(
            tx,
            move || async move { api.assessment_detail(id).await },
            UiMsg::DetailLoaded,
        ),
    }
}

// One fetch at a time; a request made while loading is dropped with a visible notice.
fn claim_fetch(state: &mut AdminState) -> bool {
    if state.admin.is_loading() {
        state.notice = Some(LOADING_NOTICE.to_string());
        return false;
    }
    state.admin.begin_fetch();
    true
}

fn drain_messages(state: &mut AdminState, rx: &mpsc::Receiver<UiMsg>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            UiMsg::AssessmentsLoaded(result) => state.admin.apply_list(result),
            UiMsg::DetailLoaded(result) => {
                state.admin.apply_detail(result);
                state.detail_scroll = 0;
            }
            UiMsg::SubmissionFinished(_) => {}
        }
    }
}

fn handle_key(state: &mut AdminState, code: KeyCode) -> Option<Request> {
    state.notice = None;

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.quit = true;
            return None;
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if let Some(id) = state.current_id() {
                download(state, id);
            }
            return None;
        }
        _ => {}
    }

    match state.admin.view() {
        AdminView::List => match code {
            KeyCode::Esc => {
                state.quit = true;
                None
            }
            KeyCode::Up => {
                state.admin.select_prev();
                None
            }
            KeyCode::Down => {
                state.admin.select_next();
                None
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Request::List),
            KeyCode::Enter => state.admin.highlighted().map(|s| Request::Detail(s.id)),
            _ => None,
        },
        AdminView::Detail => {
            match code {
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
                    state.admin.back();
                }
                KeyCode::Up => state.detail_scroll = state.detail_scroll.saturating_sub(1),
                KeyCode::Down => state.detail_scroll = state.detail_scroll.saturating_add(1),
                KeyCode::PageUp => state.detail_scroll = state.detail_scroll.saturating_sub(10),
                KeyCode::PageDown => state.detail_scroll = state.detail_scroll.saturating_add(10),
                _ => {}
            }
            None
        }
    }
}

fn download(state: &mut AdminState, id: i64) {
    let url = download_url(&state.endpoints, id);
    if let Err(e) = open_in_browser(url.as_str()) {
        warn!("[PHASE: admin] [STEP: download] Failed to open {}: {:#}", url, e);
        state.notice = Some(format!("Open this link manually: {}", url));
    }
}

// =========================
// Drawing
// =========================

pub(crate) fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &AdminState) {
    let window_area = centered_window(area, 100, 30);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - Admin", WINDOW_TITLE));
    f.render_widget(outer_block, window_area);

    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    draw_status(f, rows[0], state);
    match state.admin.view() {
        AdminView::List => draw_list(f, rows[1], state),
        AdminView::Detail => draw_detail(f, rows[1], state),
    }
    draw_keys(f, rows[2], state.admin.view());
}

fn draw_status(f: &mut ratatui::Frame<'_>, area: Rect, state: &AdminState) {
    let line = if let Some(notice) = &state.notice {
        Line::from(Span::styled(notice.clone(), Style::default().fg(Color::Yellow)))
    } else if let Some(status) = state.admin.status() {
        Line::from(Span::styled(
            format!("⚠ {}", status),
            Style::default().fg(Color::Red),
        ))
    } else if state.admin.is_loading() {
        Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_list(f: &mut ratatui::Frame<'_>, area: Rect, state: &AdminState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let stats = state.admin.stats();
    let stat_line = Line::from(vec![
        Span::styled("Total Assessments: ", Style::default().fg(Color::Gray)),
        Span::styled(
            stats.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Reports Sent: ", Style::default().fg(Color::Gray)),
        Span::styled(
            stats.reports_sent.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Avg. Salary: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_currency(stats.average_salary),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(stat_line).block(Block::default().borders(Borders::ALL).title("Overview")),
        rows[0],
    );

    let table_block = Block::default()
        .borders(Borders::ALL)
        .title("Recent Assessments");

    let summaries = state.admin.summaries();
    if summaries.is_empty() {
        let body = if state.admin.is_loading() {
            "Loading assessments..."
        } else {
            "No assessments yet. Submissions will appear here once users complete the diagnostic."
        };
        f.render_widget(
            Paragraph::new(body)
                .block(table_block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rows[1],
        );
        return;
    }

    // Header row and borders take three lines.
    let visible = rows[1].height.saturating_sub(3).max(1) as usize;
    let selected = state.admin.list_index();
    let offset = selected.saturating_sub(visible - 1);

    let table_rows: Vec<Row> = summaries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, s)| summary_row(s, i == selected))
        .collect();

    let header = Row::new(vec![
        "Date",
        "Name",
        "Email",
        "Role",
        "Current Salary",
        "Report Sent",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(table_block)
    .column_spacing(1);
    f.render_widget(table, rows[1]);
}

fn summary_row(s: &AssessmentSummary, selected: bool) -> Row<'static> {
    let sent = if s.report_sent {
        Cell::from(Span::styled("✓ Sent", Style::default().fg(Color::Green)))
    } else {
        Cell::from(Span::styled("⏳ Pending", Style::default().fg(Color::Yellow)))
    };
    let row = Row::new(vec![
        Cell::from(format_date(&s.submitted_at)),
        Cell::from(s.name.clone()),
        Cell::from(s.email.clone()),
        Cell::from(s.role.clone().unwrap_or_default()),
        Cell::from(format_optional_currency(s.current_salary)),
        sent,
    ]);
    if selected {
        row.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        row
    }
}

fn draw_detail(f: &mut ratatui::Frame<'_>, area: Rect, state: &AdminState) {
    let Some(detail) = state.admin.selected() else {
        f.render_widget(
            Paragraph::new("No assessment selected.").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Assessment Details #{}", detail.id));
    let p = Paragraph::new(Text::from(detail_lines(detail)))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    f.render_widget(p, area);
}

fn detail_lines(detail: &AssessmentDetail) -> Vec<Line<'static>> {
    let label = |l: &str| Span::styled(format!("{}: ", l), Style::default().fg(Color::Gray));
    let mut lines = vec![
        Line::from(Span::styled(
            detail.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![label("Email"), Span::raw(detail.email.clone())]),
        Line::from(vec![
            label("Submitted"),
            Span::raw(format_datetime(&detail.submitted_at)),
        ]),
        Line::from(vec![
            label("Report"),
            Span::raw(if detail.report_sent {
                "✓ Sent"
            } else {
                "⏳ Pending"
            }),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Compensation",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(compensation_lines(&detail.compensation));

    match &detail.analysis {
        Some(analysis) => lines.extend(analysis_lines(analysis)),
        None => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "No analysis available yet.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn compensation_lines(c: &CompensationProfile) -> Vec<Line<'static>> {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
    vec![
        Line::from(format!(
            "Salary: {}",
            format_optional_currency(c.current_salary)
        )),
        Line::from(format!(
            "Experience: {}",
            c.years_experience
                .map(|y| format!("{} years", y))
                .unwrap_or_else(|| "N/A".to_string())
        )),
        Line::from(format!("Role: {}", text(&c.role))),
        Line::from(format!("Industry: {}", text(&c.industry))),
        Line::from(format!("Location: {}", text(&c.location))),
    ]
}

fn draw_keys(f: &mut ratatui::Frame<'_>, area: Rect, view: AdminView) {
    let keys = match view {
        AdminView::List => "↑/↓ Select   Enter View   D Download   R Refresh   Q Quit",
        AdminView::Detail => "Esc/B Back   ↑/↓ Scroll   D Download   Q Quit",
    };
    f.render_widget(
        Paragraph::new(Span::styled(keys, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        area,
    );
}

// =========================
// Smoke
// =========================

fn sample_summaries() -> Vec<AssessmentSummary> {
    vec![
        AssessmentSummary {
            id: 3,
            submitted_at: "2024-05-14T09:12:44.120331".to_string(),
            name: "Jordan Smith".to_string(),
            email: "jordan@example.com".to_string(),
            role: Some("Mechanical Engineer".to_string()),
            current_salary: Some(95_000),
            report_sent: true,
        },
        AssessmentSummary {
            id: 2,
            submitted_at: "2024-05-13T16:40:02.000000".to_string(),
            name: "Sam Lee".to_string(),
            email: "sam@example.com".to_string(),
            role: Some("Data Scientist".to_string()),
            current_salary: Some(128_500),
            report_sent: false,
        },
        AssessmentSummary {
            id: 1,
            submitted_at: "2024-05-12T08:03:19.000000".to_string(),
            name: "Riley Chen".to_string(),
            email: "riley@example.com".to_string(),
            role: None,
            current_salary: None,
            report_sent: true,
        },
    ]
}

/// Seeded state for deterministic single-frame rendering.
pub(crate) fn smoke_state(target: &str, settings: &Settings) -> Result<AdminState> {
    let mut state = AdminState::new(Endpoints::new(&settings.api_base)?);
    state.admin.apply_list(Ok(sample_summaries()));

    match target {
        "admin" => {}
        "admin-detail" => state.admin.apply_detail(Ok(AssessmentDetail {
            id: 3,
            submitted_at: "2024-05-14T09:12:44.120331".to_string(),
            name: "Jordan Smith".to_string(),
            email: "jordan@example.com".to_string(),
            compensation: CompensationProfile {
                current_salary: Some(95_000),
                years_experience: Some(7),
                role: Some("Mechanical Engineer".to_string()),
                industry: Some("Aerospace".to_string()),
                location: Some("Seattle, WA".to_string()),
            },
            analysis: Some(sample_analysis()),
            report_sent: true,
        })),
        other => anyhow::bail!("Unknown admin smoke target: {}", other),
    }
    Ok(state)
}
