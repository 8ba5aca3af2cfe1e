//! Assessment wizard state machine.
//!
//! Holds the current step and the session's [`AssessmentInput`]. Rendering and key handling live
//! in `tui::wizard`; this module only decides what is allowed to happen.

use crate::api::client::AssessmentApi;
use crate::errors::ClientError;
use crate::models::requests::{AssessmentInput, AssessmentPatch};
use crate::models::responses::SubmissionResult;
use crate::utils::logging::mask_email;
use crate::utils::validation::missing_required;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    Compensation,
    Technical,
    Positioning,
    Alignment,
    Contact,
    Processing,
    Complete,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::Welcome,
        Step::Compensation,
        Step::Technical,
        Step::Positioning,
        Step::Alignment,
        Step::Contact,
        Step::Processing,
        Step::Complete,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::Welcome => 0,
            Step::Compensation => 1,
            Step::Technical => 2,
            Step::Positioning => 3,
            Step::Alignment => 4,
            Step::Contact => 5,
            Step::Processing => 6,
            Step::Complete => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Welcome => "Welcome",
            Step::Compensation => "Compensation Reality",
            Step::Technical => "Technical Foundation",
            Step::Positioning => "Positioning & Communication",
            Step::Alignment => "Alignment Assessment",
            Step::Contact => "Contact Information",
            Step::Processing => "Processing",
            Step::Complete => "Complete",
        }
    }

    /// Label of the forward button.
    pub fn next_label(self) -> &'static str {
        match self {
            Step::Welcome => "Start Your Assessment",
            Step::Contact => "Generate My Report",
            _ => "Continue",
        }
    }

    /// Percentage shown in the progress bar, `(index + 1) / 8 * 100`.
    pub fn progress_percent(self) -> u16 {
        ((self.index() + 1) * 100 / Step::ALL.len()) as u16
    }

    fn next(self) -> Step {
        match self {
            Step::Welcome => Step::Compensation,
            Step::Compensation => Step::Technical,
            Step::Technical => Step::Positioning,
            Step::Positioning => Step::Alignment,
            Step::Alignment => Step::Contact,
            Step::Contact => Step::Processing,
            Step::Processing => Step::Complete,
            Step::Complete => Step::Complete,
        }
    }

    fn prev(self) -> Step {
        match self {
            Step::Welcome => Step::Welcome,
            Step::Compensation => Step::Welcome,
            Step::Technical => Step::Compensation,
            Step::Positioning => Step::Technical,
            Step::Alignment => Step::Positioning,
            Step::Contact => Step::Alignment,
            Step::Processing => Step::Contact,
            Step::Complete => Step::Processing,
        }
    }
}

/// Lifecycle of the one submission a session is allowed.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPhase {
    NotStarted,
    /// Processing was entered; the submission is armed but not yet taken.
    Pending,
    InFlight,
    Completed(SubmissionResult),
}

#[derive(Debug, Clone)]
pub struct WizardController {
    step: Step,
    input: AssessmentInput,
    phase: SubmissionPhase,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            step: Step::Welcome,
            input: AssessmentInput::default(),
            phase: SubmissionPhase::NotStarted,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn input(&self) -> &AssessmentInput {
        &self.input
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        match &self.phase {
            SubmissionPhase::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == SubmissionPhase::InFlight
    }

    /// Move one step forward. Gating is the caller's job.
    pub fn advance(&mut self) {
        if self.is_in_flight() || self.step == Step::Complete {
            return;
        }
        self.step = self.step.next();
        info!("[PHASE: wizard] [STEP: navigate] -> {}", self.step.title());

        if self.step == Step::Processing && self.phase == SubmissionPhase::NotStarted {
            self.phase = SubmissionPhase::Pending;
        }
    }

    pub fn retreat(&mut self) {
        if self.is_in_flight() || self.step == Step::Welcome {
            return;
        }
        self.step = self.step.prev();
        info!("[PHASE: wizard] [STEP: navigate] <- {}", self.step.title());
    }

    /// Whether the Back button is offered on the current step.
    pub fn can_retreat(&self) -> bool {
        !matches!(
            self.step,
            Step::Welcome | Step::Processing | Step::Complete
        )
    }

    pub fn merge(&mut self, patch: AssessmentPatch) {
        if self.is_in_flight() {
            return;
        }
        self.input.merge(patch);
    }

    /// Required fields of the current step that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let i = &self.input;
        match self.step {
            Step::Compensation => missing_required(&[
                ("Current salary", i.current_salary.as_str()),
                ("Years of experience", i.years_experience.as_str()),
                ("Role", i.role.as_str()),
                ("Industry", i.industry.as_str()),
                ("Location", i.location.as_str()),
            ]),
            Step::Positioning => missing_required(&[
                ("Role description", i.role_description.as_str()),
                ("Value articulation", i.value_articulation.as_str()),
                ("Negotiation experience", i.negotiation_experience.as_str()),
            ]),
            Step::Contact => missing_required(&[
                ("Full name", i.name.as_str()),
                ("Email", i.email.as_str()),
            ]),
            Step::Welcome | Step::Technical | Step::Alignment => Vec::new(),
            Step::Processing | Step::Complete => Vec::new(),
        }
    }

    /// Forward gating for the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Processing | Step::Complete => false,
            Step::Compensation | Step::Positioning | Step::Contact => {
                self.missing_fields().is_empty()
            }
            Step::Welcome | Step::Technical | Step::Alignment => true,
        }
    }

    /// Take the armed submission. Returns the record to send exactly once per session.
    pub fn take_pending_submission(&mut self) -> Option<AssessmentInput> {
        if self.step != Step::Processing || self.phase != SubmissionPhase::Pending {
            return None;
        }
        self.phase = SubmissionPhase::InFlight;
        info!(
            "[PHASE: submit] [STEP: start] Submitting assessment for {}",
            mask_email(&self.input.email)
        );
        Some(self.input.clone())
    }

    /// Store the outcome of the in-flight submission and move to the terminal step.
    pub fn complete_submission(&mut self, result: SubmissionResult) {
        if !self.is_in_flight() {
            warn!("[PHASE: submit] [STEP: complete] Ignoring result with no submission in flight");
            return;
        }
        info!(
            "[PHASE: submit] [STEP: complete] success={} status={:?} analysis={}",
            result.success,
            result.status,
            result.analysis.is_some()
        );
        self.phase = SubmissionPhase::Completed(result);
        self.advance();
    }

    /// Send the armed submission and wait for it. Transport and decode failures become a failed
    /// result so the terminal step always renders.
    pub async fn submit(&mut self, api: &dyn AssessmentApi) {
        let Some(input) = self.take_pending_submission() else {
            return;
        };

        let result = api.submit_assessment(&input).await;
        self.complete_submission(submission_outcome(result));
    }

    /// Drop the session and start over from the welcome step.
    pub fn reset(&mut self) {
        info!("[PHASE: wizard] [STEP: reset] Starting a new session");
        *self = Self::new();
    }
}

/// Collapse a submission attempt into the result the terminal step renders.
pub fn submission_outcome(result: Result<SubmissionResult, ClientError>) -> SubmissionResult {
    match result {
        Ok(result) => result,
        Err(e) => {
            warn!("[PHASE: submit] [STEP: request] Submission failed: {}", e);
            SubmissionResult::failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::requests::TextField;

    fn at(step: Step) -> WizardController {
        let mut wizard = WizardController::new();
        while wizard.step() != step {
            wizard.advance();
        }
        wizard
    }

    fn filled_contact() -> WizardController {
        let mut wizard = at(Step::Contact);
        wizard.merge(AssessmentPatch::text(TextField::Name, "Ada"));
        wizard.merge(AssessmentPatch::text(TextField::Email, "ada@example.com"));
        wizard
    }

    #[test]
    fn advance_and_retreat_stop_at_the_ends() {
        let mut wizard = WizardController::new();
        wizard.retreat();
        assert_eq!(wizard.step(), Step::Welcome);

        let mut wizard = at(Step::Processing);
        wizard.advance();
        assert_eq!(wizard.step(), Step::Complete);
        wizard.advance();
        assert_eq!(wizard.step(), Step::Complete);
    }

    #[test]
    fn progress_follows_step_index() {
        assert_eq!(Step::Welcome.progress_percent(), 12);
        assert_eq!(Step::Positioning.progress_percent(), 50);
        assert_eq!(Step::Complete.progress_percent(), 100);
    }

    #[test]
    fn compensation_gate_requires_every_field() {
        let mut wizard = at(Step::Compensation);
        assert!(!wizard.can_advance());

        wizard.merge(AssessmentPatch {
            current_salary: Some("0".to_string()),
            years_experience: Some("7".to_string()),
            role: Some("Engineer".to_string()),
            industry: Some("Aerospace".to_string()),
            ..Default::default()
        });
        assert!(!wizard.can_advance());
        assert_eq!(wizard.missing_fields(), vec!["Location"]);

        wizard.merge(AssessmentPatch::text(TextField::Location, "   "));
        assert!(!wizard.can_advance());

        wizard.merge(AssessmentPatch::text(TextField::Location, "Seattle, WA"));
        assert!(wizard.can_advance());
    }

    #[test]
    fn positioning_and_contact_gates() {
        let mut wizard = at(Step::Positioning);
        assert!(!wizard.can_advance());
        wizard.merge(AssessmentPatch {
            role_description: Some("I design parts".to_string()),
            value_articulation: Some("Shipped on time".to_string()),
            negotiation_experience: Some("Asked for 5%".to_string()),
            ..Default::default()
        });
        assert!(wizard.can_advance());

        let mut wizard = at(Step::Contact);
        assert!(!wizard.can_advance());
        wizard.merge(AssessmentPatch::text(TextField::Name, "Ada"));
        assert!(!wizard.can_advance());
        wizard.merge(AssessmentPatch::text(TextField::Email, "ada@example.com"));
        assert!(wizard.can_advance());
    }

    #[test]
    fn ungated_and_terminal_steps() {
        assert!(at(Step::Welcome).can_advance());
        assert!(at(Step::Technical).can_advance());
        assert!(at(Step::Alignment).can_advance());
        assert!(!at(Step::Processing).can_advance());
        assert!(!at(Step::Complete).can_advance());
    }

    #[test]
    fn entering_processing_arms_a_single_submission() {
        let mut wizard = filled_contact();
        assert_eq!(wizard.phase(), &SubmissionPhase::NotStarted);
        wizard.advance();
        assert_eq!(wizard.phase(), &SubmissionPhase::Pending);

        assert!(wizard.take_pending_submission().is_some());
        assert!(wizard.take_pending_submission().is_none());
        assert!(wizard.is_in_flight());
    }

    #[test]
    fn in_flight_ignores_navigation_and_edits() {
        let mut wizard = filled_contact();
        wizard.advance();
        let _ = wizard.take_pending_submission();

        wizard.retreat();
        wizard.advance();
        wizard.merge(AssessmentPatch::text(TextField::Name, "Changed"));

        assert_eq!(wizard.step(), Step::Processing);
        assert_eq!(wizard.input().name, "Ada");
    }

    #[test]
    fn stray_result_is_ignored() {
        let mut wizard = filled_contact();
        wizard.complete_submission(SubmissionResult::failure("late"));
        assert_eq!(wizard.step(), Step::Contact);
        assert!(wizard.result().is_none());
    }

    #[tokio::test]
    async fn submit_stores_result_and_advances() {
        let api = FakeApi::new().with_submission(SubmissionResult {
            success: true,
            status: Some("processing".to_string()),
            ..Default::default()
        });
        let mut wizard = filled_contact();
        wizard.advance();

        wizard.submit(&api).await;

        assert_eq!(wizard.step(), Step::Complete);
        assert!(wizard.result().is_some_and(|r| r.is_processing()));
        assert_eq!(api.submit_count(), 1);
        let sent = api.submitted.lock().expect("lock");
        assert_eq!(sent[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn repeated_submit_sends_once() {
        let api = FakeApi::new().with_submission(SubmissionResult {
            success: true,
            ..Default::default()
        });
        let mut wizard = filled_contact();
        wizard.advance();

        wizard.submit(&api).await;
        wizard.submit(&api).await;

        assert_eq!(api.submit_count(), 1);
    }

    #[tokio::test]
    async fn transport_failure_still_reaches_complete() {
        // No submission configured: the fake answers with an error.
        let api = FakeApi::new();
        let mut wizard = filled_contact();
        wizard.advance();

        wizard.submit(&api).await;

        assert_eq!(wizard.step(), Step::Complete);
        let result = wizard.result().expect("failure stored");
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn reset_returns_to_a_fresh_session() {
        let mut wizard = filled_contact();
        wizard.reset();
        assert_eq!(wizard.step(), Step::Welcome);
        assert_eq!(wizard.input(), &AssessmentInput::default());
        assert_eq!(wizard.phase(), &SubmissionPhase::NotStarted);
    }
}
