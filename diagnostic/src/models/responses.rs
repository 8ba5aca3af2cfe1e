// API response models
// Shapes returned by the diagnostic backend. Everything here is a read-only snapshot.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =========================
// Lenient text
// =========================

// The analysis is model-authored JSON; a leaf that should be text occasionally arrives as a
// number or boolean.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(value_to_text).collect()),
        Some(other) => value_to_text(other).map(|s| vec![s]),
        None => None,
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// Stored numbers come back as whatever the database kept; a salary typed as `95000.5` is a
// float on the way out. Rounded to whole units, non-numeric values read as absent.
fn lenient_whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Some(Value::String(s)) => {
            let t = s.trim();
            t.parse::<i64>().ok().or_else(|| {
                t.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    })
}

// =========================
// Submission
// =========================

/// Response of `POST /api/submit-assessment`.
///
/// The backend answers business failures with `success: false` bodies (HTTP 4xx/5xx), so this is
/// parsed regardless of the status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_call_url: Option<String>,
    // Server stack trace, only populated by development deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SubmissionResult {
    /// Local stand-in for a submission that never produced a usable response.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn is_processing(&self) -> bool {
        self.status.as_deref() == Some("processing")
    }
}

// =========================
// Analysis report
// =========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, deserialize_with = "lenient_text")]
    pub executive_summary: Option<String>,
    #[serde(default)]
    pub compensation_gap: Option<CompensationGap>,
    #[serde(default)]
    pub leverage_points: Option<Vec<LeveragePoint>>,
    #[serde(default)]
    pub positioning_diagnosis: Option<PositioningDiagnosis>,
    #[serde(default)]
    pub alignment_assessment: Option<AlignmentAssessment>,
    #[serde(default)]
    pub ninety_day_roadmap: Option<Vec<RoadmapPhase>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub next_step: Option<String>,
    /// Set instead of the sections when background analysis failed server-side.
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompensationGap {
    #[serde(default, deserialize_with = "lenient_text")]
    pub market_salary_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gap_percentage: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub annual_opportunity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub key_insight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeveragePoint {
    #[serde(default, deserialize_with = "lenient_text")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quick_win: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositioningDiagnosis {
    #[serde(default, deserialize_with = "lenient_text")]
    pub language_gaps: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub visibility_issues: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub narrative_coherence: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub specific_fixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentAssessment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub values_insight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub energy_pattern: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub strategic_implication: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    #[serde(default, deserialize_with = "lenient_text")]
    pub week_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub focus: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub actions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub success_metric: Option<String>,
}

// =========================
// Admin
// =========================

/// Row of `GET /api/admin/assessments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: i64,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub current_salary: Option<i64>,
    #[serde(default)]
    pub report_sent: bool,
}

/// `GET /api/admin/assessment/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDetail {
    pub id: i64,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub compensation: CompensationProfile,
    #[serde(default)]
    pub analysis: Option<AnalysisReport>,
    #[serde(default)]
    pub report_sent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompensationProfile {
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub current_salary: Option<i64>,
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub years_experience: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_result_parses_processing_response() {
        let body = json!({
            "success": true,
            "message": "Assessment submitted successfully!",
            "assessment_id": 17,
            "status": "processing"
        });
        let r: SubmissionResult = serde_json::from_value(body).expect("parse");
        assert!(r.success);
        assert!(r.is_processing());
        assert_eq!(r.assessment_id, Some(17));
        assert!(r.analysis.is_none());
    }

    #[test]
    fn submission_result_parses_server_failure_with_null_details() {
        let body = json!({"success": false, "error": "Missing required fields: email", "details": null});
        let r: SubmissionResult = serde_json::from_value(body).expect("parse");
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("Missing required fields: email"));
        assert!(r.details.is_none());
    }

    #[test]
    fn analysis_accepts_numeric_leaves_and_missing_sections() {
        let body = json!({
            "executive_summary": "You are underpaid.",
            "compensation_gap": {"gap_percentage": 18, "annual_opportunity": "$17,000"},
            "positioning_diagnosis": {"specific_fixes": ["Lead with outcomes", 2]}
        });
        let a: AnalysisReport = serde_json::from_value(body).expect("parse");
        let gap = a.compensation_gap.expect("gap");
        assert_eq!(gap.gap_percentage.as_deref(), Some("18"));
        assert!(gap.market_salary_range.is_none());
        assert_eq!(
            a.positioning_diagnosis.and_then(|p| p.specific_fixes),
            Some(vec!["Lead with outcomes".to_string(), "2".to_string()])
        );
        assert!(a.leverage_points.is_none());
        assert!(a.ninety_day_roadmap.is_none());
    }

    #[test]
    fn analysis_captures_background_failure_marker() {
        let a: AnalysisReport =
            serde_json::from_value(json!({"error": "Failed to generate analysis"})).expect("parse");
        assert_eq!(a.error.as_deref(), Some("Failed to generate analysis"));
        assert!(a.executive_summary.is_none());
    }

    #[test]
    fn admin_detail_parses_backend_shape() {
        let body = json!({
            "id": 42,
            "name": "Ada",
            "email": "ada@example.com",
            "submitted_at": "2024-05-01T12:34:56.123456",
            "compensation": {
                "current_salary": 0,
                "years_experience": 7,
                "role": "Engineer",
                "industry": "Aerospace",
                "location": "Seattle, WA"
            },
            "analysis": null,
            "report_sent": false
        });
        let d: AssessmentDetail = serde_json::from_value(body).expect("parse");
        assert_eq!(d.id, 42);
        assert_eq!(d.compensation.current_salary, Some(0));
        assert!(d.analysis.is_none());
    }

    #[test]
    fn admin_list_accepts_fractional_salaries() {
        let body = json!([
            {"id": 1, "name": "Ada", "email": "ada@example.com", "current_salary": 90000},
            {"id": 2, "name": "Bo", "email": "bo@example.com", "current_salary": 95000.5},
            {"id": 3, "name": "Cy", "email": "cy@example.com", "current_salary": null},
            {"id": 4, "name": "Di", "email": "di@example.com", "current_salary": "82000"}
        ]);
        let rows: Vec<AssessmentSummary> = serde_json::from_value(body).expect("parse");
        let salaries: Vec<Option<i64>> = rows.iter().map(|r| r.current_salary).collect();
        assert_eq!(salaries, vec![Some(90000), Some(95001), None, Some(82000)]);
    }

    #[test]
    fn fractional_salary_sent_by_the_wizard_reads_back() {
        use crate::models::requests::{AssessmentInput, AssessmentPatch, TextField};

        let mut input = AssessmentInput::default();
        input.merge(AssessmentPatch::text(TextField::CurrentSalary, "95000.5"));
        input.merge(AssessmentPatch::text(TextField::YearsExperience, "7.5"));
        let sent = serde_json::to_value(&input).expect("serialize");

        let stored = json!({
            "current_salary": sent["current_salary"],
            "years_experience": sent["years_experience"]
        });
        let profile: CompensationProfile = serde_json::from_value(stored).expect("parse");
        assert_eq!(profile.current_salary, Some(95001));
        assert_eq!(profile.years_experience, Some(8));
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let h = HealthStatus {
            status: "Healthy".to_string(),
        };
        assert!(h.is_healthy());
    }
}
