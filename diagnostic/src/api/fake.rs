// In-memory backend used by unit tests.

use super::client::AssessmentApi;
use super::endpoints::Endpoints;
use crate::errors::ClientError;
use crate::models::requests::AssessmentInput;
use crate::models::responses::{AssessmentDetail, AssessmentSummary, HealthStatus, SubmissionResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct FakeApi {
    endpoints: Endpoints,
    pub submission: Mutex<Option<SubmissionResult>>,
    pub summaries: Mutex<Option<Vec<AssessmentSummary>>>,
    pub details: Mutex<HashMap<i64, AssessmentDetail>>,
    pub submit_calls: AtomicUsize,
    pub submitted: Mutex<Vec<AssessmentInput>>,
    /// Paths of every GET, in call order.
    pub requested: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::new("http://backend.test").expect("static base"),
            submission: Mutex::new(None),
            summaries: Mutex::new(None),
            details: Mutex::new(HashMap::new()),
            submit_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submission(self, result: SubmissionResult) -> Self {
        *self.submission.lock().expect("lock") = Some(result);
        self
    }

    pub fn with_summaries(self, summaries: Vec<AssessmentSummary>) -> Self {
        *self.summaries.lock().expect("lock") = Some(summaries);
        self
    }

    pub fn with_detail(self, detail: AssessmentDetail) -> Self {
        self.details.lock().expect("lock").insert(detail.id, detail);
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requested.lock().expect("lock").clone()
    }

    fn record(&self, url: url::Url) {
        self.requested
            .lock()
            .expect("lock")
            .push(url.path().to_string());
    }
}

fn offline() -> ClientError {
    ClientError::Decode("fake backend has no response configured".to_string())
}

#[async_trait]
impl AssessmentApi for FakeApi {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn submit_assessment(
        &self,
        input: &AssessmentInput,
    ) -> Result<SubmissionResult, ClientError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().expect("lock").push(input.clone());
        self.submission.lock().expect("lock").clone().ok_or_else(offline)
    }

    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>, ClientError> {
        self.record(self.endpoints.admin_assessments());
        self.summaries.lock().expect("lock").clone().ok_or_else(offline)
    }

    async fn assessment_detail(&self, id: i64) -> Result<AssessmentDetail, ClientError> {
        self.record(self.endpoints.admin_assessment(id));
        self.details
            .lock()
            .expect("lock")
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.record(self.endpoints.health());
        Ok(HealthStatus {
            status: "healthy".to_string(),
        })
    }
}
