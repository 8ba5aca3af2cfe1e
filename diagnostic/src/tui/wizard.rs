//! Assessment wizard screens.
//!
//! Keys: Tab/Down and Shift+Tab/Up move focus, Enter activates, Space toggles, Left/Right adjust
//! sliders and selectors, Esc asks to quit.

use super::{
    button_text, centered_window, restore_terminal, sample_analysis, setup_terminal,
    spawn_request, TextInput, UiMsg, ASCII_LOGO, WINDOW_TITLE,
};
use crate::api::client::AssessmentApi;
use crate::config::Settings;
use crate::models::requests::{
    AssessmentPatch, EducationLevel, Rating, RatingField, TextField, COMMON_SKILLS,
};
use crate::models::responses::SubmissionResult;
use crate::report::CompletionView;
use crate::utils::browser::open_in_browser;
use crate::utils::validation::{is_present, looks_like_email};
use crate::wizard::{submission_outcome, Step, WizardController};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Terminal;
use std::collections::HashMap;
use std::io::Stdout;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Text(TextField),
    Skill(usize),
    CustomSkill,
    Education,
    Rating(RatingField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    ConfirmQuit,
}

/// What the primary button does on the terminal step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CompleteAction {
    OpenLink { label: &'static str, url: String },
    StartOver,
}

pub(crate) struct WizardState {
    wizard: WizardController,
    inputs: HashMap<TextField, TextInput>,
    custom_skill: TextInput,
    focus: FocusTarget,
    modal: Option<Modal>,
    report_scroll: u16,
    notice: Option<String>,
    schedule_call_url: String,
    api_base: url::Url,
    quit: bool,
}

impl WizardState {
    fn new(settings: &Settings, api_base: url::Url) -> Self {
        let mut state = Self {
            wizard: WizardController::new(),
            inputs: HashMap::new(),
            custom_skill: TextInput::default(),
            focus: FocusTarget::Button(ButtonFocus::Next),
            modal: None,
            report_scroll: 0,
            notice: None,
            schedule_call_url: settings.schedule_call_url.clone(),
            api_base,
            quit: false,
        };
        state.reset_focus();
        state
    }

    fn input(&self, field: TextField) -> Option<&TextInput> {
        self.inputs.get(&field)
    }

    /// Set a text field in both the editor and the session record.
    fn set_text(&mut self, field: TextField, value: &str) {
        self.inputs
            .entry(field)
            .or_default()
            .set(value.to_string());
        self.wizard.merge(AssessmentPatch::text(field, value));
    }

    fn fields(&self) -> Vec<Field> {
        step_fields(self.wizard.step())
    }

    fn focused_field(&self) -> Option<Field> {
        match self.focus {
            FocusTarget::Field(i) => self.fields().get(i).copied(),
            FocusTarget::Button(_) => None,
        }
    }

    fn reset_focus(&mut self) {
        self.focus = if self.fields().is_empty() {
            FocusTarget::Button(ButtonFocus::Next)
        } else {
            FocusTarget::Field(0)
        };
        self.report_scroll = 0;
        self.notice = None;
    }

    fn completion_view(&self) -> Option<CompletionView<'_>> {
        self.wizard
            .result()
            .map(|r| CompletionView::select(r, &self.schedule_call_url))
    }

    fn complete_action(&self) -> Option<CompleteAction> {
        match self.completion_view()? {
            CompletionView::Full {
                schedule_call_url, ..
            } => Some(CompleteAction::OpenLink {
                label: "Schedule Strategy Session",
                url: schedule_call_url.to_string(),
            }),
            CompletionView::Processing { download_url, .. } => {
                download_url.map(|u| CompleteAction::OpenLink {
                    label: "Download Report",
                    url: crate::report::format::resolve_link(&self.api_base, u),
                })
            }
            CompletionView::Failed { .. } => Some(CompleteAction::StartOver),
        }
    }

    fn buttons(&self) -> Vec<ButtonFocus> {
        match self.wizard.step() {
            Step::Welcome => vec![ButtonFocus::Next, ButtonFocus::Quit],
            Step::Processing => Vec::new(),
            Step::Complete => {
                if self.complete_action().is_some() {
                    vec![ButtonFocus::Next, ButtonFocus::Quit]
                } else {
                    vec![ButtonFocus::Quit]
                }
            }
            _ => vec![ButtonFocus::Back, ButtonFocus::Next, ButtonFocus::Quit],
        }
    }

    fn next_label(&self) -> &'static str {
        match self.wizard.step() {
            Step::Complete => match self.complete_action() {
                Some(CompleteAction::OpenLink { label, .. }) => label,
                Some(CompleteAction::StartOver) => "Start Over",
                None => "Finish",
            },
            step => step.next_label(),
        }
    }

    fn focus_order(&self) -> Vec<FocusTarget> {
        let mut order: Vec<FocusTarget> = (0..self.fields().len()).map(FocusTarget::Field).collect();
        order.extend(self.buttons().into_iter().map(FocusTarget::Button));
        order
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }
}

fn step_fields(step: Step) -> Vec<Field> {
    match step {
        Step::Compensation => vec![
            Field::Text(TextField::CurrentSalary),
            Field::Text(TextField::YearsExperience),
            Field::Text(TextField::Role),
            Field::Text(TextField::Industry),
            Field::Text(TextField::Location),
            Field::Text(TextField::LastRaisePercent),
        ],
        Step::Technical => {
            let mut fields: Vec<Field> = (0..COMMON_SKILLS.len()).map(Field::Skill).collect();
            fields.push(Field::CustomSkill);
            fields.push(Field::Text(TextField::Certifications));
            fields.push(Field::Education);
            fields
        }
        Step::Positioning => vec![
            Field::Text(TextField::RoleDescription),
            Field::Text(TextField::ValueArticulation),
            Field::Text(TextField::NegotiationExperience),
            Field::Rating(RatingField::VisibilityRating),
        ],
        Step::Alignment => RatingField::ALIGNMENT.iter().copied().map(Field::Rating).collect(),
        Step::Contact => vec![Field::Text(TextField::Name), Field::Text(TextField::Email)],
        Step::Welcome | Step::Processing | Step::Complete => Vec::new(),
    }
}

fn is_numeric_field(field: TextField) -> bool {
    matches!(
        field,
        TextField::CurrentSalary | TextField::YearsExperience | TextField::LastRaisePercent
    )
}

/// Interactive wizard.
pub fn run(api: Arc<dyn AssessmentApi>, settings: &Settings) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting assessment wizard");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, api, settings);
    restore_terminal(&mut terminal)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    api: Arc<dyn AssessmentApi>,
    settings: &Settings,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut state = WizardState::new(settings, api.endpoints().base().clone());
    let (tx, rx) = mpsc::channel::<UiMsg>();

    while !state.quit {
        drain_messages(&mut state, &rx);
        start_pending_submission(&mut state, &api, &tx);
        terminal.draw(|f| draw(f.size(), f, &state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut state, key.code);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    info!("[PHASE: tui] [STEP: exit] Assessment wizard closed");
    Ok(())
}

// The controller hands out the record once; redraws never resubmit.
fn start_pending_submission(
    state: &mut WizardState,
    api: &Arc<dyn AssessmentApi>,
    tx: &mpsc::Sender<UiMsg>,
) {
    let Some(input) = state.wizard.take_pending_submission() else {
        return;
    };
    let api = Arc::clone(api);
    spawn_request(
        tx,
        move || async move { api.submit_assessment(&input).await },
        |result| UiMsg::SubmissionFinished(submission_outcome(result)),
    );
}

fn drain_messages(state: &mut WizardState, rx: &mpsc::Receiver<UiMsg>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            UiMsg::SubmissionFinished(result) => {
                state.wizard.complete_submission(result);
                state.reset_focus();
            }
            UiMsg::AssessmentsLoaded(_) | UiMsg::DetailLoaded(_) => {}
        }
    }
}

fn handle_key(state: &mut WizardState, code: KeyCode) {
    if let Some(Modal::ConfirmQuit) = state.modal {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => state.quit = true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.modal = None,
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc => {
            if state.wizard.step() == Step::Complete {
                state.quit = true;
            } else {
                state.modal = Some(Modal::ConfirmQuit);
            }
            return;
        }
        KeyCode::Tab => {
            state.move_focus(true);
            return;
        }
        KeyCode::BackTab => {
            state.move_focus(false);
            return;
        }
        _ => {}
    }

    if state.wizard.step() == Step::Complete {
        match code {
            KeyCode::Up => {
                state.report_scroll = state.report_scroll.saturating_sub(1);
                return;
            }
            KeyCode::Down => {
                state.report_scroll = state.report_scroll.saturating_add(1);
                return;
            }
            KeyCode::PageUp => {
                state.report_scroll = state.report_scroll.saturating_sub(10);
                return;
            }
            KeyCode::PageDown => {
                state.report_scroll = state.report_scroll.saturating_add(10);
                return;
            }
            _ => {}
        }
    }

    match code {
        KeyCode::Down => {
            state.move_focus(true);
            return;
        }
        KeyCode::Up => {
            state.move_focus(false);
            return;
        }
        _ => {}
    }

    match state.focus {
        FocusTarget::Field(_) => {
            if let Some(field) = state.focused_field() {
                handle_field_key(state, field, code);
            }
        }
        FocusTarget::Button(b) => match code {
            KeyCode::Left => state.move_focus(false),
            KeyCode::Right => state.move_focus(true),
            KeyCode::Enter | KeyCode::Char(' ') => activate_button(state, b),
            _ => {}
        },
    }
}

fn handle_field_key(state: &mut WizardState, field: Field, code: KeyCode) {
    match field {
        Field::Text(tf) => {
            if code == KeyCode::Enter {
                state.move_focus(true);
                return;
            }
            if let KeyCode::Char(c) = code {
                if is_numeric_field(tf) && !(c.is_ascii_digit() || c == '.') {
                    return;
                }
            }
            let input = state.inputs.entry(tf).or_default();
            let (_, changed) = input.handle_key(code);
            if changed {
                let value = input.value.clone();
                state.wizard.merge(AssessmentPatch::text(tf, value));
                state.notice = None;
            }
        }
        Field::Skill(i) => {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
                if let Some(skill) = COMMON_SKILLS.get(i) {
                    let patch = state.wizard.input().toggle_skill(skill);
                    state.wizard.merge(patch);
                }
            } else if code == KeyCode::Right {
                state.move_focus(true);
            } else if code == KeyCode::Left {
                state.move_focus(false);
            }
        }
        Field::CustomSkill => {
            if code == KeyCode::Enter {
                if let Some(patch) = state
                    .wizard
                    .input()
                    .add_custom_skill(&state.custom_skill.value)
                {
                    state.wizard.merge(patch);
                }
                state.custom_skill.clear();
                return;
            }
            state.custom_skill.handle_key(code);
        }
        Field::Education => {
            let current = state.wizard.input().education_level;
            let next = match code {
                KeyCode::Left => current.prev(),
                KeyCode::Right | KeyCode::Char(' ') => current.next(),
                KeyCode::Enter => {
                    state.move_focus(true);
                    return;
                }
                _ => return,
            };
            state.wizard.merge(AssessmentPatch {
                education_level: Some(next),
                ..Default::default()
            });
        }
        Field::Rating(rf) => {
            let current = state.wizard.input().rating(rf);
            let next = match code {
                KeyCode::Left | KeyCode::Char('-') => current.decrement(),
                KeyCode::Right | KeyCode::Char('+') => current.increment(),
                KeyCode::Char('0') => Rating::new(10),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    Rating::new(c.to_digit(10).map(i64::from).unwrap_or(5))
                }
                KeyCode::Enter => {
                    state.move_focus(true);
                    return;
                }
                _ => return,
            };
            state.wizard.merge(AssessmentPatch::rating(rf, next));
        }
    }
}

fn activate_button(state: &mut WizardState, button: ButtonFocus) {
    match button {
        ButtonFocus::Back => {
            if state.wizard.can_retreat() {
                state.wizard.retreat();
                state.reset_focus();
            }
        }
        ButtonFocus::Next => {
            if state.wizard.step() == Step::Complete {
                match state.complete_action() {
                    Some(CompleteAction::OpenLink { url, .. }) => {
                        if let Err(e) = open_in_browser(&url) {
                            warn!("[PHASE: browser] Failed to open {}: {:#}", url, e);
                            state.notice = Some(format!("Open this link manually: {}", url));
                        }
                    }
                    Some(CompleteAction::StartOver) => {
                        state.wizard.reset();
                        state.inputs.clear();
                        state.custom_skill.clear();
                        state.reset_focus();
                    }
                    None => state.quit = true,
                }
                return;
            }

            if state.wizard.can_advance() {
                state.wizard.advance();
                state.reset_focus();
            } else {
                state.notice = Some(format!(
                    "Please complete: {}",
                    state.wizard.missing_fields().join(", ")
                ));
            }
        }
        ButtonFocus::Quit => {
            if state.wizard.step() == Step::Complete {
                state.quit = true;
            } else {
                state.modal = Some(Modal::ConfirmQuit);
            }
        }
    }
}

// =========================
// Drawing
// =========================

pub(crate) fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &WizardState) {
    let window_area = centered_window(area, 100, 30);

    let outer_block = Block::default().borders(Borders::ALL).title(WINDOW_TITLE);
    f.render_widget(outer_block, window_area);

    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let body = rows[0];
    let buttons = rows[1];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)].as_ref())
        .split(body);

    draw_banner(f, cols[0], state.wizard.step());
    draw_content(f, cols[1], state);
    draw_buttons(f, buttons, state);

    if let Some(Modal::ConfirmQuit) = state.modal {
        draw_quit_modal(f, window_area);
    }
}

fn draw_banner(f: &mut ratatui::Frame<'_>, area: Rect, current: Step) {
    let mut lines: Vec<Line> = ASCII_LOGO.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    for step in Step::ALL {
        let (marker, style) = if step == current {
            ("▶", Style::default().add_modifier(Modifier::BOLD))
        } else if step.index() < current.index() {
            ("✓", Style::default().fg(Color::Green))
        } else {
            (" ", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {}", marker, step.title()),
            style,
        )));
    }

    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(p, area);
}

fn draw_content(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let step = state.wizard.step();
    let block = Block::default().borders(Borders::ALL).title(step.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(step.progress_percent())
        .label(format!(
            "Step {} of {}",
            step.index() + 1,
            Step::ALL.len()
        ));
    f.render_widget(gauge, rows[0]);

    let mut lines = content_lines(state);
    if let Some(notice) = &state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let mut p = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    if step == Step::Complete {
        p = p.scroll((state.report_scroll, 0));
    }
    f.render_widget(p, rows[2]);
}

fn content_lines(state: &WizardState) -> Vec<Line<'static>> {
    let fields = state.fields();
    let focused = state.focused_field();
    let step = state.wizard.step();

    let mut lines = match step {
        Step::Welcome => vec![
            Line::from(Span::styled(
                "Discover Your Career Flow",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Are you leaving 10-30% on the table?"),
            Line::from(""),
            Line::from(
                "Most STEM professionals are significantly underpaid. Not because they lack \
                 skills, but because they haven't mastered strategic positioning.",
            ),
            Line::from(""),
            Line::from("💰 Compensation Gap Analysis: see exactly where you stand vs. market rates"),
            Line::from("🎯 Highest-Leverage Improvements: focus on what moves the needle fastest"),
            Line::from("🚀 Custom 90-Day Roadmap: concrete steps tailored to your situation"),
            Line::from(""),
            Line::from("⏱ Time commitment: 15-20 minutes"),
        ],
        Step::Compensation => vec![description(
            "Let's establish your baseline. This helps us calculate your exact market gap.",
        )],
        Step::Technical => vec![description(
            "Your technical skills are the foundation, but positioning determines how they're valued.",
        )],
        Step::Positioning => vec![description(
            "This is where most STEM professionals lose 20-30% of their potential compensation.",
        )],
        Step::Alignment => vec![description(
            "Alignment isn't just about happiness. It directly affects your negotiation leverage.",
        )],
        Step::Contact => vec![
            Line::from(Span::styled(
                "Where Should We Send Your Report?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            description(
                "Your personalized Career Flow Diagnostic Report will be generated instantly and sent to your email.",
            ),
        ],
        Step::Processing => vec![
            Line::from(Span::styled(
                "Analyzing Your Assessment...",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(
                "Our AI is analyzing your responses and generating your personalized report.",
            ),
            Line::from(""),
            Line::from("✓ Calculating compensation gap"),
            Line::from("✓ Identifying leverage points"),
            Line::from("✓ Analyzing positioning"),
            Line::from("✓ Creating your roadmap"),
        ],
        Step::Complete => state
            .completion_view()
            .map(|view| view.lines())
            .unwrap_or_default(),
    };

    if step == Step::Technical {
        lines.extend(technical_lines(state, focused));
    } else {
        for field in fields {
            lines.extend(field_lines(state, field, focused == Some(field)));
        }
    }

    if step == Step::Contact {
        let email = &state.wizard.input().email;
        if is_present(email) && !looks_like_email(email) {
            lines.push(Line::from(Span::styled(
                "   That email address looks incomplete.",
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(
            "🔒 Your information is confidential and will never be shared.",
        ));
    }

    let missing = state.wizard.missing_fields();
    if !missing.is_empty() && state.notice.is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Required: {}", missing.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn description(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray),
    ))
}

fn marker(focused: bool) -> &'static str {
    if focused {
        ">"
    } else {
        " "
    }
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn field_lines(state: &WizardState, field: Field, focused: bool) -> Vec<Line<'static>> {
    match field {
        Field::Text(tf) => {
            let value = state
                .input(tf)
                .map(|i| i.display(focused))
                .unwrap_or_else(|| state.wizard.input().text(tf).to_string());
            let shown = if value.is_empty() || (focused && value == "▏") {
                Span::styled(
                    format!("{}{}", if focused { "▏" } else { "" }, tf.placeholder()),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::raw(value)
            };
            vec![
                Line::from(Span::styled(
                    format!("{} {}", marker(focused), tf.label()),
                    label_style(focused),
                )),
                Line::from(vec![Span::raw("   "), shown]),
            ]
        }
        Field::Rating(rf) => {
            let value = state.wizard.input().rating(rf).value();
            let (low, high) = rf.anchors();
            let bar = format!(
                "{}{}",
                "■".repeat(value as usize),
                "□".repeat((Rating::MAX - value) as usize)
            );
            vec![
                Line::from(Span::styled(
                    format!("{} {}", marker(focused), rf.prompt()),
                    label_style(focused),
                )),
                Line::from(format!(
                    "   {} ◀ {} ▶ {}  {}/{}",
                    low,
                    bar,
                    high,
                    value,
                    Rating::MAX
                )),
            ]
        }
        Field::Skill(_) | Field::CustomSkill | Field::Education => Vec::new(),
    }
}

fn technical_lines(state: &WizardState, focused: Option<Field>) -> Vec<Line<'static>> {
    let input = state.wizard.input();
    let mut lines = vec![Line::from("Core Technical Skills (Space to select):")];

    for pair in COMMON_SKILLS.chunks(2).enumerate() {
        let (row, skills) = pair;
        let mut spans = Vec::new();
        for (col, skill) in skills.iter().enumerate() {
            let idx = row * 2 + col;
            let is_focused = focused == Some(Field::Skill(idx));
            let check = if input.has_skill(skill) { "x" } else { " " };
            spans.push(Span::styled(
                format!("{} [{}] {:<22}", marker(is_focused), check, skill),
                label_style(is_focused),
            ));
        }
        lines.push(Line::from(spans));
    }

    let custom: Vec<&str> = input.custom_skills().collect();
    if !custom.is_empty() {
        lines.push(Line::from(format!("  Added: {}", custom.join(", "))));
    }

    let custom_focused = focused == Some(Field::CustomSkill);
    let custom_value = if state.custom_skill.value.is_empty() && !custom_focused {
        Span::styled("Add custom skill...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.custom_skill.display(custom_focused))
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} Custom skill (Enter to add): ", marker(custom_focused)),
            label_style(custom_focused),
        ),
        custom_value,
    ]));

    lines.extend(field_lines(
        state,
        Field::Text(TextField::Certifications),
        focused == Some(Field::Text(TextField::Certifications)),
    ));

    let edu_focused = focused == Some(Field::Education);
    let level: EducationLevel = input.education_level;
    lines.push(Line::from(Span::styled(
        format!(
            "{} Highest Education Level: ◀ {} ▶",
            marker(edu_focused),
            level.as_str()
        ),
        label_style(edu_focused),
    )));

    lines
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let mut spans = Vec::new();
    for b in state.buttons() {
        let (label, enabled) = match b {
            ButtonFocus::Back => ("Back", state.wizard.can_retreat()),
            ButtonFocus::Next => (
                state.next_label(),
                state.wizard.step() == Step::Complete || state.wizard.can_advance(),
            ),
            ButtonFocus::Quit => ("Quit", true),
        };
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(button_text(
            label,
            state.focus == FocusTarget::Button(b),
            enabled,
        ));
    }

    let p = Paragraph::new(Text::from(Line::from(spans))).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn draw_quit_modal(f: &mut ratatui::Frame<'_>, window_area: Rect) {
    let modal_w = 56u16.min(window_area.width.saturating_sub(4)).max(40);
    let modal_h = 7u16;
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Quit Assessment?");
    let body = Paragraph::new(Text::from(vec![
        Line::from("If you quit now, your answers will be lost."),
        Line::from(""),
        Line::from("[ Y ] Yes, quit    [ N ] No, keep going"),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

// =========================
// Smoke
// =========================

/// Seeded state for deterministic single-frame rendering. Interactive runs never seed values.
pub(crate) fn smoke_state(target: &str, settings: &Settings) -> Result<WizardState> {
    let step = match target {
        "" | "welcome" => Step::Welcome,
        "compensation" => Step::Compensation,
        "technical" => Step::Technical,
        "positioning" => Step::Positioning,
        "alignment" => Step::Alignment,
        "contact" => Step::Contact,
        "processing" => Step::Processing,
        "complete" | "complete-processing" | "complete-error" => Step::Complete,
        other => anyhow::bail!("Unknown TUI smoke target: {}", other),
    };

    let api_base = crate::api::endpoints::parse_api_base(&settings.api_base)?;
    let mut state = WizardState::new(settings, api_base);

    if step.index() > Step::Compensation.index() {
        state.set_text(TextField::CurrentSalary, "95000");
        state.set_text(TextField::YearsExperience, "7");
        state.set_text(TextField::Role, "Senior Mechanical Engineer");
        state.set_text(TextField::Industry, "Aerospace");
        state.set_text(TextField::Location, "Seattle, WA");
        let patch = state.wizard.input().toggle_skill("CAD");
        state.wizard.merge(patch);
    }
    if step.index() > Step::Positioning.index() {
        state.set_text(TextField::RoleDescription, "I design components and run simulations.");
        state.set_text(TextField::ValueArticulation, "I delivered my projects on time.");
        state.set_text(TextField::NegotiationExperience, "Accepted the first offer.");
    }
    if step.index() > Step::Contact.index() {
        state.set_text(TextField::Name, "Jordan Smith");
        state.set_text(TextField::Email, "jordan@example.com");
    }

    while state.wizard.step() != step {
        if state.wizard.step() == Step::Processing {
            let _ = state.wizard.take_pending_submission();
            state
                .wizard
                .complete_submission(smoke_result(target, &settings.api_base));
        } else {
            state.wizard.advance();
        }
    }
    state.reset_focus();
    Ok(state)
}

fn smoke_result(target: &str, api_base: &str) -> SubmissionResult {
    match target {
        "complete-processing" => SubmissionResult {
            success: true,
            status: Some("processing".to_string()),
            message: Some("Assessment submitted successfully!".to_string()),
            assessment_id: Some(1),
            email: Some("jordan@example.com".to_string()),
            download_url: Some(format!("{}/api/download-report/1", api_base.trim_end_matches('/'))),
            ..Default::default()
        },
        "complete-error" => SubmissionResult::failure("Missing required field: email"),
        _ => SubmissionResult {
            success: true,
            analysis: Some(sample_analysis()),
            ..Default::default()
        },
    }
}
