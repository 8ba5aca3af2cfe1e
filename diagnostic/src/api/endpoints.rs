// Backend route table
//
// Every URL the client touches is derived here from the configured API base, so the paths stay
// in one place and a base with a path prefix (e.g. behind a reverse proxy) keeps working.

use crate::errors::ClientError;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base: parse_api_base(api_base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn submit_assessment(&self) -> Url {
        self.at(&["api", "submit-assessment"])
    }

    pub fn admin_assessments(&self) -> Url {
        self.at(&["api", "admin", "assessments"])
    }

    pub fn admin_assessment(&self, id: i64) -> Url {
        self.at(&["api", "admin", "assessment", &id.to_string()])
    }

    /// Opened in a browser, never fetched by the client.
    pub fn download_report(&self, id: i64) -> Url {
        self.at(&["api", "download-report", &id.to_string()])
    }

    pub fn health(&self) -> Url {
        self.at(&["health"])
    }

    fn at(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `parse_api_base` only accepts http(s) URLs, which always have path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Validate an API base: absolute http(s) URL with a host. Query and fragment are dropped.
pub fn parse_api_base(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: &str| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("value is empty"));
    }

    let mut url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().map(|h| h.is_empty()).unwrap_or(true) {
        return Err(invalid("host is missing"));
    }

    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
