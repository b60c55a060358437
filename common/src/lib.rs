//! Shared data model for the job tracker.
//!
//! These types mirror the JSON exchanged with the search API at
//! `POST /api/search`.

use serde::{Deserialize, Serialize};

/// What the user typed into the two search fields.
///
/// Both fields are free text and may be empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
        }
    }
}

/// A single job listing as returned by the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
}

/// One `(company, job count)` entry of `top_companies`.
///
/// On the wire this is a two-element array: `["Acme", 3]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CompanyCount(pub String, pub u64);

impl CompanyCount {
    pub fn new(company: impl Into<String>, count: u64) -> Self {
        Self(company.into(), count)
    }

    pub fn company(&self) -> &str {
        &self.0
    }

    pub fn count(&self) -> u64 {
        self.1
    }
}

/// Aggregated view computed by the service.
///
/// `top_companies` keeps the order the service sent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub top_companies: Vec<CompanyCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_jobs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a successful search response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_jobs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SearchResult {
    pub fn new(jobs: Vec<JobRecord>, analysis: Option<AnalysisResult>) -> Self {
        Self {
            jobs,
            analysis,
            total_jobs: None,
            message: None,
            warnings: Vec::new(),
        }
    }
}

/// Error body sent by the service alongside a 4xx/5xx status.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
}
