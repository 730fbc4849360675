use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CandidateCriteria, JobCriteria, Role};

/// Register a seeker or recruiter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

/// Create or edit a job posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobRequest {
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    /// Skill names; unknown names are created
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "minSalary")]
    #[validate(range(min = 0.0))]
    pub min_salary: Option<f64>,
    #[serde(rename = "maxSalary")]
    #[validate(range(min = 0.0))]
    pub max_salary: Option<f64>,
    #[serde(default)]
    pub remote: bool,
    #[serde(rename = "visaSponsorship", default)]
    pub visa_sponsorship: bool,
    #[serde(default = "default_true")]
    pub approved: bool,
}

/// Create or update a seeker profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub headline: String,
    #[serde(default)]
    pub education: String,
    #[serde(rename = "workExperience", default)]
    pub work_experience: String,
    #[serde(default)]
    pub links: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "commuteRadiusMiles")]
    #[validate(range(min = 0.0))]
    pub commute_radius_miles: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[serde(rename = "applicantId")]
    pub applicant_id: i64,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavedSearchRequest {
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub criteria: CandidateCriteria,
    #[serde(rename = "notifyOnNewMatches", default = "default_true")]
    pub notify_on_new_matches: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionRequest {
    pub action: String,
    #[serde(rename = "jobIds")]
    pub job_ids: Vec<i64>,
}

/// Location parameters shared by every distance-aware query.
///
/// Kept as raw text so malformed numbers can be ignored instead of
/// rejecting the whole request. Radius is in miles.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationParams<'a> {
    pub lat: Option<&'a str>,
    pub lon: Option<&'a str>,
    pub radius: Option<&'a str>,
}

macro_rules! location_params {
    ($($query:ty),*) => {
        $(
            impl $query {
                pub fn location_params(&self) -> LocationParams<'_> {
                    LocationParams {
                        lat: self.lat.as_deref(),
                        lon: self.lon.as_deref(),
                        radius: self.radius.as_deref(),
                    }
                }
            }
        )*
    };
}

location_params!(
    JobSearchQuery,
    CandidateSearchQuery,
    JobRecommendationQuery,
    CandidateRecommendationQuery
);

/// GET /jobs query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSearchQuery {
    pub title: Option<String>,
    /// Comma separated skill ids
    pub skills: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    /// "remote" or "onsite"
    pub remote: Option<String>,
    /// "yes" or "no"
    pub visa: Option<String>,
    #[serde(rename = "profileId")]
    pub profile_id: Option<i64>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
}

impl JobSearchQuery {
    pub fn criteria(&self) -> JobCriteria {
        JobCriteria {
            title: non_empty(&self.title),
            skill_ids: parse_id_list(self.skills.as_deref()),
            location: non_empty(&self.location),
            min_salary: self.min_salary.as_deref().and_then(parse_number),
            max_salary: self.max_salary.as_deref().and_then(parse_number),
            remote: non_empty(&self.remote).map(|v| v == "remote"),
            visa_sponsorship: non_empty(&self.visa).map(|v| v == "yes"),
        }
    }
}

/// GET /candidates/search query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateSearchQuery {
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    pub skills: Option<String>,
    #[serde(rename = "locationContains")]
    pub location_contains: Option<String>,
    pub keywords: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
}

impl CandidateSearchQuery {
    pub fn criteria(&self) -> CandidateCriteria {
        CandidateCriteria {
            skill_ids: parse_id_list(self.skills.as_deref()),
            location_contains: non_empty(&self.location_contains),
            keywords: non_empty(&self.keywords),
        }
    }
}

/// GET /recommendations/jobs query string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendationQuery {
    #[serde(rename = "profileId")]
    pub profile_id: i64,
    pub limit: Option<usize>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
}

/// GET /jobs/{id}/candidates query string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecommendationQuery {
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    pub limit: Option<usize>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterQuery {
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
}

fn default_true() -> bool {
    true
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse "1, 2,3" into ids, skipping anything that is not an integer
pub fn parse_id_list(value: Option<&str>) -> Vec<i64> {
    value
        .unwrap_or_default()
        .split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}
