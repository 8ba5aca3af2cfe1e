//! Terminal rendering of the submission outcome and of an analysis report.

pub mod format;

use crate::models::responses::{AnalysisReport, SubmissionResult};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const GENERIC_FAILURE: &str =
    "We encountered an error generating your report. Please try again or contact support.";

/// What the terminal step shows for a given result.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionView<'a> {
    Full {
        analysis: &'a AnalysisReport,
        schedule_call_url: &'a str,
    },
    Processing {
        message: Option<&'a str>,
        email: Option<&'a str>,
        download_url: Option<&'a str>,
    },
    Failed {
        message: &'a str,
    },
}

impl<'a> CompletionView<'a> {
    pub fn select(result: &'a SubmissionResult, default_schedule_call_url: &'a str) -> Self {
        match (&result.analysis, result.success) {
            (Some(analysis), true) => CompletionView::Full {
                analysis,
                schedule_call_url: result
                    .schedule_call_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or(default_schedule_call_url),
            },
            (None, true) if result.is_processing() => CompletionView::Processing {
                message: result.message.as_deref(),
                email: result.email.as_deref(),
                download_url: result.download_url.as_deref(),
            },
            _ => CompletionView::Failed {
                message: result.error.as_deref().unwrap_or(GENERIC_FAILURE),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CompletionView::Failed { .. })
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        match self {
            CompletionView::Full {
                analysis,
                schedule_call_url,
            } => {
                let mut lines = vec![
                    title("Your Career Flow Diagnostic Report"),
                    Line::from(
                        "Your personalized analysis is ready. Here's your comprehensive assessment:",
                    ),
                ];
                lines.extend(analysis_lines(analysis));
                lines.push(Line::from(""));
                lines.push(heading("Ready to Implement These Strategies?"));
                lines.push(Line::from(
                    "Schedule a free 30-minute strategy session to discuss your specific situation.",
                ));
                lines.push(field("Schedule Strategy Session", schedule_call_url));
                lines
            }
            CompletionView::Processing {
                message,
                email,
                download_url,
            } => {
                let mut lines = vec![
                    title("✓ Your Assessment is Being Processed!"),
                    Line::from(""),
                    Line::from(
                        "Your comprehensive Career Flow Diagnostic Report is being generated.",
                    ),
                    Line::from("This usually takes 30-60 seconds..."),
                ];
                if let Some(message) = message {
                    lines.push(Line::from(""));
                    lines.push(Line::from(message.to_string()));
                }
                if let Some(email) = email {
                    lines.push(Line::from(""));
                    lines.push(field("Report will be sent to", email));
                }
                if let Some(url) = download_url {
                    lines.push(field("Download", url));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "⏳ Please wait while we analyze your responses...",
                    Style::default().fg(Color::Yellow),
                )));
                lines
            }
            CompletionView::Failed { message } => vec![
                Line::from(Span::styled(
                    "⚠ Something Went Wrong",
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.to_string()),
            ],
        }
    }
}

fn title(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn indented_field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

fn push_field(lines: &mut Vec<Line<'static>>, label: &str, value: &Option<String>) {
    if let Some(v) = value {
        lines.push(field(label, v));
    }
}

fn push_indented(lines: &mut Vec<Line<'static>>, label: &str, value: &Option<String>) {
    if let Some(v) = value {
        lines.push(indented_field(label, v));
    }
}

fn section(lines: &mut Vec<Line<'static>>, name: &str) {
    lines.push(Line::from(""));
    lines.push(heading(name));
}

/// Sections of an analysis report, in display order. Shared with the admin detail view.
pub fn analysis_lines(report: &AnalysisReport) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = &report.error {
        section(&mut lines, "Analysis unavailable");
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
        return lines;
    }

    if let Some(summary) = &report.executive_summary {
        section(&mut lines, "Executive Summary");
        lines.push(Line::from(summary.clone()));
    }

    if let Some(gap) = &report.compensation_gap {
        section(&mut lines, "💰 Compensation Gap Analysis");
        push_field(&mut lines, "Market Range", &gap.market_salary_range);
        push_field(&mut lines, "Gap", &gap.gap_percentage);
        push_field(&mut lines, "Annual Opportunity", &gap.annual_opportunity);
        push_field(&mut lines, "Key Insight", &gap.key_insight);
    }

    if let Some(points) = report.leverage_points.as_ref().filter(|p| !p.is_empty()) {
        section(&mut lines, "🎯 Top Leverage Points");
        for (i, point) in points.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("{}. {}", i + 1, point.area.as_deref().unwrap_or("")),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            push_indented(&mut lines, "Current State", &point.current_state);
            push_indented(&mut lines, "Impact", &point.impact);
            push_indented(&mut lines, "Quick Win", &point.quick_win);
        }
    }

    if let Some(diagnosis) = &report.positioning_diagnosis {
        section(&mut lines, "💬 Positioning Diagnosis");
        push_field(&mut lines, "Language Gaps", &diagnosis.language_gaps);
        push_field(&mut lines, "Visibility Issues", &diagnosis.visibility_issues);
        push_field(&mut lines, "Narrative Coherence", &diagnosis.narrative_coherence);
        if let Some(fixes) = diagnosis.specific_fixes.as_ref().filter(|f| !f.is_empty()) {
            lines.push(title("Specific Fixes"));
            for (i, fix) in fixes.iter().enumerate() {
                lines.push(Line::from(format!("  {}. ✓ {}", i + 1, fix)));
            }
        }
    }

    if let Some(alignment) = &report.alignment_assessment {
        section(&mut lines, "🧭 Alignment Insights");
        push_field(&mut lines, "Values", &alignment.values_insight);
        push_field(&mut lines, "Energy Pattern", &alignment.energy_pattern);
        push_field(
            &mut lines,
            "Strategic Implication",
            &alignment.strategic_implication,
        );
    }

    if let Some(roadmap) = report.ninety_day_roadmap.as_ref().filter(|r| !r.is_empty()) {
        section(&mut lines, "🗓 Your 90-Day Roadmap");
        for (i, phase) in roadmap.iter().enumerate() {
            let mut header = format!("{}. {}", i + 1, phase.week_range.as_deref().unwrap_or(""));
            if let Some(focus) = &phase.focus {
                header.push_str(&format!(" - {}", focus));
            }
            lines.push(Line::from(Span::styled(
                header,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(actions) = phase.actions.as_ref().filter(|a| !a.is_empty()) {
                lines.push(Line::from("   Actions:"));
                for action in actions {
                    lines.push(Line::from(format!("     • {}", action)));
                }
            }
            push_indented(&mut lines, "Success Metric", &phase.success_metric);
        }
    }

    if let Some(next_step) = &report.next_step {
        section(&mut lines, "Next Step");
        lines.push(Line::from(next_step.clone()));
    }

    lines
}

/// Plain text of rendered lines, for assertions and log output.
pub fn lines_to_string(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::responses::{LeveragePoint, PositioningDiagnosis, RoadmapPhase};

    const DEFAULT_URL: &str = "https://calendly.test/default";

    fn point(area: &str) -> LeveragePoint {
        LeveragePoint {
            area: Some(area.to_string()),
            ..Default::default()
        }
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            executive_summary: Some("You are underpaid.".to_string()),
            leverage_points: Some(vec![point("Visibility"), point("Negotiation"), point("Skills")]),
            ..Default::default()
        }
    }

    #[test]
    fn success_with_analysis_selects_full_report() {
        let result = SubmissionResult {
            success: true,
            analysis: Some(report()),
            ..Default::default()
        };
        match CompletionView::select(&result, DEFAULT_URL) {
            CompletionView::Full {
                schedule_call_url, ..
            } => assert_eq!(schedule_call_url, DEFAULT_URL),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn server_schedule_url_wins() {
        let result = SubmissionResult {
            success: true,
            analysis: Some(report()),
            schedule_call_url: Some("https://cal.test/me".to_string()),
            ..Default::default()
        };
        let text = lines_to_string(&CompletionView::select(&result, DEFAULT_URL).lines());
        assert!(text.contains("https://cal.test/me"));
        assert!(!text.contains(DEFAULT_URL));
    }

    #[test]
    fn processing_status_without_analysis_selects_placeholder() {
        let result = SubmissionResult {
            success: true,
            status: Some("processing".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        let view = CompletionView::select(&result, DEFAULT_URL);
        assert!(matches!(view, CompletionView::Processing { .. }));
        let text = lines_to_string(&view.lines());
        assert!(text.contains("30-60 seconds"));
        assert!(text.contains("ada@example.com"));
        assert!(!text.contains("Download"));
    }

    #[test]
    fn error_is_shown_verbatim() {
        let result = SubmissionResult::failure("X");
        let view = CompletionView::select(&result, DEFAULT_URL);
        assert_eq!(view, CompletionView::Failed { message: "X" });
        assert!(lines_to_string(&view.lines()).ends_with("\nX"));
    }

    #[test]
    fn success_without_analysis_or_status_is_a_failure() {
        let result = SubmissionResult {
            success: true,
            ..Default::default()
        };
        assert_eq!(
            CompletionView::select(&result, DEFAULT_URL),
            CompletionView::Failed {
                message: GENERIC_FAILURE
            }
        );
    }

    #[test]
    fn failed_result_with_analysis_is_still_a_failure() {
        let result = SubmissionResult {
            success: false,
            analysis: Some(report()),
            error: Some("quota".to_string()),
            ..Default::default()
        };
        assert!(CompletionView::select(&result, DEFAULT_URL).is_failure());
    }

    #[test]
    fn leverage_points_keep_received_order() {
        let text = lines_to_string(&analysis_lines(&report()));
        let a = text.find("1. Visibility").expect("first");
        let b = text.find("2. Negotiation").expect("second");
        let c = text.find("3. Skills").expect("third");
        assert!(a < b && b < c);
    }

    #[test]
    fn absent_and_empty_sequences_render_nothing() {
        let report = AnalysisReport {
            leverage_points: Some(Vec::new()),
            ninety_day_roadmap: None,
            positioning_diagnosis: Some(PositioningDiagnosis {
                language_gaps: Some("jargon".to_string()),
                specific_fixes: Some(Vec::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let text = lines_to_string(&analysis_lines(&report));
        assert!(!text.contains("Leverage"));
        assert!(!text.contains("Roadmap"));
        assert!(!text.contains("Specific Fixes"));
        assert!(text.contains("Language Gaps: jargon"));
    }

    #[test]
    fn roadmap_lists_actions_under_each_phase() {
        let report = AnalysisReport {
            ninety_day_roadmap: Some(vec![RoadmapPhase {
                week_range: Some("Weeks 1-4".to_string()),
                focus: Some("Visibility".to_string()),
                actions: Some(vec!["Share wins".to_string()]),
                success_metric: Some("2 demos".to_string()),
            }]),
            ..Default::default()
        };
        let text = lines_to_string(&analysis_lines(&report));
        assert!(text.contains("1. Weeks 1-4 - Visibility"));
        assert!(text.contains("• Share wins"));
        assert!(text.contains("Success Metric: 2 demos"));
    }

    #[test]
    fn analysis_error_renders_single_notice() {
        let report = AnalysisReport {
            error: Some("model timeout".to_string()),
            executive_summary: Some("ignored".to_string()),
            ..Default::default()
        };
        let text = lines_to_string(&analysis_lines(&report));
        assert!(text.contains("model timeout"));
        assert!(!text.contains("ignored"));
    }
}
