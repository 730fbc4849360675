use serde::{Deserialize, Serialize};

use crate::models::domain::{Job, Profile, RankedCandidate, RankedJob, WithDistance};

/// Response for the job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<WithDistance<Job>>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    /// False when the location parameters were unusable and no distance
    /// filter was applied
    #[serde(rename = "distanceApplied")]
    pub distance_applied: bool,
}

/// Response for the recruiter candidate search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSearchResponse {
    pub candidates: Vec<WithDistance<Profile>>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendationsResponse {
    pub recommendations: Vec<RankedJob>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecommendationsResponse {
    pub recommendations: Vec<RankedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionResponse {
    pub action: String,
    pub updated: u64,
}
