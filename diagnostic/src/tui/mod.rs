//! Terminal front ends.
//!
//! - Centered window framed as "Career Flow Diagnostic"
//! - Left banner panel with the logo (the wizard adds its step list)
//! - Main content panel plus a bottom button/key row
//! - Network calls run on a worker thread and come back as [`UiMsg`]s drained each tick
//!
//! Note: Logging is file-only while a terminal UI is active (stdout logging is disabled) to avoid
//! corrupting the screen.

pub mod admin;
pub mod wizard;

use crate::config::Settings;
use crate::errors::ClientError;
use crate::models::responses::{
    AnalysisReport, AssessmentDetail, AssessmentSummary, CompensationGap, LeveragePoint,
    PositioningDiagnosis, RoadmapPhase, SubmissionResult,
};
use anyhow::Result;
use crossterm::event::KeyCode;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::info;
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Terminal;
use std::future::Future;
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread;

const ASCII_LOGO: &str = r#" ___   _   ___ ___ ___ ___
/ __| /_\ | _ \ __| __| _ \
| (__ / _ \|   / _|| _||   /
\___/_/ \_\_|_\___|___|_|_\
  ___ _    _____      __
 | __| |  / _ \ \    / /
 | _|| |_| (_) \ \/\/ /
 |_| |____\___/ \_/\_/"#;

const WINDOW_TITLE: &str = "Career Flow Diagnostic";
const SMOKE_WIDTH: u16 = 100;
const SMOKE_HEIGHT: u16 = 30;

/// Results handed from worker threads back to the UI loop.
pub(crate) enum UiMsg {
    SubmissionFinished(SubmissionResult),
    AssessmentsLoaded(Result<Vec<AssessmentSummary>, ClientError>),
    DetailLoaded(Result<AssessmentDetail, ClientError>),
}

/// Run `request` on a short-lived thread with its own current-thread runtime and post the
/// outcome back through `tx`.
pub(crate) fn spawn_request<T, F, Fut>(
    tx: &mpsc::Sender<UiMsg>,
    request: F,
    into_msg: fn(Result<T, ClientError>) -> UiMsg,
) where
    T: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let tx = tx.clone();
    thread::spawn(move || {
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientError::from)
            .and_then(|rt| rt.block_on(request()));
        let _ = tx.send(into_msg(result));
    });
}

/// Single-line text field. `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextInput {
    pub value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            cursor: value.chars().count(),
            value,
        }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.set("");
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Value with a bar drawn at the cursor.
    pub fn display(&self, focused: bool) -> String {
        if !focused {
            return self.value.clone();
        }
        let mut shown = self.value.clone();
        shown.insert(self.byte_index(self.cursor), '▏');
        shown
    }

    /// Returns `(consumed, changed)`.
    pub fn handle_key(&mut self, code: KeyCode) -> (bool, bool) {
        let len = self.value.chars().count();
        match code {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                (true, true)
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                    return (true, true);
                }
                (true, false)
            }
            KeyCode::Delete => {
                if self.cursor < len {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    return (true, true);
                }
                (true, false)
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                (true, false)
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                (true, false)
            }
            KeyCode::Home => {
                self.cursor = 0;
                (true, false)
            }
            KeyCode::End => {
                self.cursor = len;
                (true, false)
            }
            _ => (false, false),
        }
    }
}

pub(crate) fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub(crate) fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub(crate) fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

pub(crate) fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

/// Non-interactive smoke mode: render a single frame of `target` into an in-memory backend.
///
/// Targets: welcome|compensation|technical|positioning|alignment|contact|processing|complete|
/// complete-processing|complete-error|admin|admin-detail
pub fn smoke(target: &str, settings: &Settings) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );
    render_target(target, settings, SMOKE_WIDTH, SMOKE_HEIGHT).map(|_| ())
}

/// Fixed report used by smoke rendering.
pub(crate) fn sample_analysis() -> AnalysisReport {
    let text = |s: &str| Some(s.to_string());
    AnalysisReport {
        executive_summary: text(
            "You are paid below market for your experience. Your technical depth is strong, \
             but your impact is not visible to decision-makers.",
        ),
        compensation_gap: Some(CompensationGap {
            market_salary_range: text("$110,000 - $135,000"),
            gap_percentage: text("15-25%"),
            annual_opportunity: text("$15,000 - $40,000"),
            key_insight: text("Your title understates the scope you already own."),
        }),
        leverage_points: Some(vec![
            LeveragePoint {
                area: text("Visibility"),
                current_state: text("Work is known only to your direct manager."),
                impact: text("High"),
                quick_win: text("Send a monthly results summary to your skip-level."),
            },
            LeveragePoint {
                area: text("Value language"),
                current_state: text("You describe tasks, not outcomes."),
                impact: text("High"),
                quick_win: text("Rewrite three accomplishments as dollar outcomes."),
            },
        ]),
        positioning_diagnosis: Some(PositioningDiagnosis {
            language_gaps: text("Activity-focused descriptions."),
            visibility_issues: text("No executive exposure."),
            narrative_coherence: text("Strong but untold."),
            specific_fixes: Some(vec![
                "Lead with business impact".to_string(),
                "Quantify simulation savings".to_string(),
            ]),
        }),
        alignment_assessment: None,
        ninety_day_roadmap: Some(vec![RoadmapPhase {
            week_range: text("Weeks 1-4"),
            focus: text("Document impact"),
            actions: Some(vec!["Build a wins log".to_string()]),
            success_metric: text("Five quantified wins"),
        }]),
        next_step: text("Book a strategy session to plan your next review."),
        error: None,
    }
}

/// Render `target` and return the frame as text, one line per row.
pub(crate) fn render_target(
    target: &str,
    settings: &Settings,
    width: u16,
    height: u16,
) -> Result<String> {
    let t = target.trim().to_ascii_lowercase();

    // In-memory backend: no raw mode or alternate screen.
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    match t.as_str() {
        "admin" | "admin-detail" => {
            let state = admin::smoke_state(&t, settings)?;
            terminal.draw(|f| admin::draw(f.size(), f, &state))?;
        }
        _ => {
            let state = wizard::smoke_state(&t, settings)?;
            terminal.draw(|f| wizard::draw(f.size(), f, &state))?;
        }
    }

    let buffer = terminal.backend().buffer();
    let rows = buffer
        .content()
        .chunks(buffer.area.width.max(1) as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>();
    Ok(rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_edits_multibyte_values() {
        let mut input = TextInput::new("Zoë");
        assert_eq!(input.handle_key(KeyCode::Backspace), (true, true));
        assert_eq!(input.value, "Zo");
        input.handle_key(KeyCode::Char('é'));
        input.handle_key(KeyCode::Home);
        input.handle_key(KeyCode::Char('>'));
        assert_eq!(input.value, ">Zoé");
        assert_eq!(input.display(true), ">▏Zoé");
        input.handle_key(KeyCode::End);
        assert_eq!(input.handle_key(KeyCode::Delete), (true, false));
    }

    #[test]
    fn unhandled_keys_are_not_consumed() {
        let mut input = TextInput::new("x");
        assert_eq!(input.handle_key(KeyCode::Tab), (false, false));
    }

    #[test]
    fn centered_window_fits_small_terminals() {
        let area = Rect::new(0, 0, 50, 15);
        let win = centered_window(area, 100, 30);
        assert!(win.width <= 50 && win.height <= 15);
    }

    #[test]
    fn every_smoke_target_renders() {
        let settings = Settings::default();
        for target in [
            "welcome",
            "compensation",
            "technical",
            "positioning",
            "alignment",
            "contact",
            "processing",
            "complete",
            "complete-processing",
            "complete-error",
            "admin",
            "admin-detail",
        ] {
            let frame = render_target(target, &settings, SMOKE_WIDTH, SMOKE_HEIGHT)
                .unwrap_or_else(|e| panic!("{} failed: {}", target, e));
            assert!(frame.contains(WINDOW_TITLE), "{} missing frame title", target);
        }
    }

    #[test]
    fn unknown_smoke_target_is_an_error() {
        assert!(smoke("license", &Settings::default()).is_err());
    }
}
