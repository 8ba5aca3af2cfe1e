//! Admin dashboard state: assessment list, summary stats and the detail view.

use crate::api::client::AssessmentApi;
use crate::api::endpoints::Endpoints;
use crate::errors::ClientError;
use crate::models::responses::{AssessmentDetail, AssessmentSummary};
use log::{error, info};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub reports_sent: usize,
    /// Mean salary over every fetched record, missing salaries counted as 0.
    pub average_salary: i64,
}

#[derive(Debug, Clone)]
pub struct AdminController {
    summaries: Vec<AssessmentSummary>,
    selected: Option<AssessmentDetail>,
    view: AdminView,
    loading: bool,
    status: Option<String>,
    list_index: usize,
}

impl Default for AdminController {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminController {
    pub fn new() -> Self {
        Self {
            summaries: Vec::new(),
            selected: None,
            view: AdminView::List,
            loading: false,
            status: None,
            list_index: 0,
        }
    }

    pub fn summaries(&self) -> &[AssessmentSummary] {
        &self.summaries
    }

    pub fn selected(&self) -> Option<&AssessmentDetail> {
        self.selected.as_ref()
    }

    pub fn view(&self) -> AdminView {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last fetch failure, cleared by the next successful fetch.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn list_index(&self) -> usize {
        self.list_index
    }

    pub fn highlighted(&self) -> Option<&AssessmentSummary> {
        self.summaries.get(self.list_index)
    }

    pub fn select_next(&mut self) {
        if self.list_index + 1 < self.summaries.len() {
            self.list_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    pub fn stats(&self) -> DashboardStats {
        let total = self.summaries.len();
        let reports_sent = self.summaries.iter().filter(|s| s.report_sent).count();
        let average_salary = if total == 0 {
            0
        } else {
            let sum: i64 = self
                .summaries
                .iter()
                .map(|s| s.current_salary.unwrap_or(0))
                .sum();
            (sum as f64 / total as f64).round() as i64
        };

        DashboardStats {
            total,
            reports_sent,
            average_salary,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn apply_list(&mut self, result: Result<Vec<AssessmentSummary>, ClientError>) {
        self.loading = false;
        match result {
            Ok(summaries) => {
                info!(
                    "[PHASE: admin] [STEP: list] Loaded {} assessments",
                    summaries.len()
                );
                self.summaries = summaries;
                self.list_index = self
                    .list_index
                    .min(self.summaries.len().saturating_sub(1));
                self.status = None;
            }
            Err(e) => {
                error!("[PHASE: admin] [STEP: list] Error fetching assessments: {}", e);
                self.status = Some(format!("Failed to load assessments: {}", e));
            }
        }
    }

    pub fn apply_detail(&mut self, result: Result<AssessmentDetail, ClientError>) {
        self.loading = false;
        match result {
            Ok(detail) => {
                info!("[PHASE: admin] [STEP: detail] Loaded assessment {}", detail.id);
                self.selected = Some(detail);
                self.view = AdminView::Detail;
                self.status = None;
            }
            Err(e) => {
                error!("[PHASE: admin] [STEP: detail] Error fetching details: {}", e);
                self.status = Some(format!("Failed to load assessment: {}", e));
            }
        }
    }

    /// Back to the list; the list is not re-fetched.
    pub fn back(&mut self) {
        self.view = AdminView::List;
    }

    pub async fn fetch_list(&mut self, api: &dyn AssessmentApi) {
        self.begin_fetch();
        let result = api.list_assessments().await;
        self.apply_list(result);
    }

    pub async fn fetch_detail(&mut self, api: &dyn AssessmentApi, id: i64) {
        self.begin_fetch();
        let result = api.assessment_detail(id).await;
        self.apply_detail(result);
    }
}

pub fn download_url(endpoints: &Endpoints, id: i64) -> Url {
    endpoints.download_report(id)
}
