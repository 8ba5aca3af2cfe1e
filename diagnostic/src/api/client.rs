// HTTP client for the diagnostic backend
//
// No retries, no auth headers. A request only times out when `request_timeout_secs` is set.

use super::endpoints::Endpoints;
use crate::config::Settings;
use crate::errors::ClientError;
use crate::models::requests::AssessmentInput;
use crate::models::responses::{AssessmentDetail, AssessmentSummary, HealthStatus, SubmissionResult};
use crate::utils::logging::mask_email;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Operations the wizard and admin dashboard need from the backend.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    fn endpoints(&self) -> &Endpoints;

    async fn submit_assessment(
        &self,
        input: &AssessmentInput,
    ) -> Result<SubmissionResult, ClientError>;

    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>, ClientError>;

    async fn assessment_detail(&self, id: i64) -> Result<AssessmentDetail, ClientError>;

    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

pub struct HttpApiClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpApiClient {
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoints,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let endpoints = Endpoints::new(&settings.api_base)?;
        Self::new(
            endpoints,
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        info!("[PHASE: api] [STEP: request] GET {}", url);
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            warn!("[PHASE: api] [STEP: response] GET {} -> HTTP {}", url, status);
            return Err(status_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AssessmentApi for HttpApiClient {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn submit_assessment(
        &self,
        input: &AssessmentInput,
    ) -> Result<SubmissionResult, ClientError> {
        let url = self.endpoints.submit_assessment();
        info!(
            "[PHASE: submit] [STEP: request] POST {} for {}",
            url,
            mask_email(&input.email)
        );

        let resp = self.client.post(url.clone()).json(input).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        // Business failures come back as `success: false` bodies on 4xx/5xx; prefer those.
        match serde_json::from_slice::<SubmissionResult>(&body) {
            Ok(result) => {
                info!(
                    "[PHASE: submit] [STEP: response] HTTP {} success={} status={:?}",
                    status, result.success, result.status
                );
                Ok(result)
            }
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(status_error(status, &body)),
        }
    }

    async fn list_assessments(&self) -> Result<Vec<AssessmentSummary>, ClientError> {
        self.get_json(self.endpoints.admin_assessments()).await
    }

    async fn assessment_detail(&self, id: i64) -> Result<AssessmentDetail, ClientError> {
        self.get_json(self.endpoints.admin_assessment(id)).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json(self.endpoints.health()).await
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ClientError {
    ClientError::Status {
        status: status.as_u16(),
        message: error_message_from_body(status, body),
    }
}

/// Prefer the backend's `{"error": "..."}` text, else the canonical reason phrase.
fn error_message_from_body(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        })
}
