use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a point from optional stored coordinates. Both halves must be set.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::checked(lat, lon),
            _ => None,
        }
    }

    /// Parse a point from raw request text.
    ///
    /// Returns `None` for anything that is not a pair of finite, in-range
    /// numbers; callers treat that as "no reference point".
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let lat = latitude.trim().parse::<f64>().ok()?;
        let lon = longitude.trim().parse::<f64>().ok()?;
        Self::checked(lat, lon)
    }

    fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
            return None;
        }
        Some(Self { latitude, longitude })
    }
}

/// A named skill, unique by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seeker,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "seeker",
            Role::Recruiter => "recruiter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "seeker" => Some(Role::Seeker),
            "recruiter" => Some(Role::Recruiter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(rename = "minSalary")]
    pub min_salary: Option<f64>,
    #[serde(rename = "maxSalary")]
    pub max_salary: Option<f64>,
    #[serde(default)]
    pub remote: bool,
    #[serde(rename = "visaSponsorship", default)]
    pub visa_sponsorship: bool,
    #[serde(default = "default_true")]
    pub approved: bool,
    #[serde(rename = "createdBy")]
    pub created_by: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// Job seeker profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub education: String,
    #[serde(rename = "workExperience", default)]
    pub work_experience: String,
    #[serde(default)]
    pub links: String,
    #[serde(default)]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(rename = "commuteRadiusMiles")]
    pub commute_radius_miles: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

fn default_true() -> bool { true }

/// A seeker's application to a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(rename = "jobId")]
    pub job_id: i64,
    #[serde(rename = "applicantId")]
    pub applicant_id: Option<i64>,
    pub note: String,
    #[serde(rename = "appliedAt")]
    pub applied_at: DateTime<Utc>,
}

/// Filters for the job listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCriteria {
    pub title: Option<String>,
    /// Every listed skill must be required by the job
    #[serde(rename = "skillIds", default)]
    pub skill_ids: Vec<i64>,
    pub location: Option<String>,
    #[serde(rename = "minSalary")]
    pub min_salary: Option<f64>,
    #[serde(rename = "maxSalary")]
    pub max_salary: Option<f64>,
    pub remote: Option<bool>,
    #[serde(rename = "visaSponsorship")]
    pub visa_sponsorship: Option<bool>,
}

/// Filters for the recruiter candidate search, also stored on saved searches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateCriteria {
    /// A profile matches when it holds at least one of these
    #[serde(rename = "skillIds", default)]
    pub skill_ids: Vec<i64>,
    #[serde(rename = "locationContains")]
    pub location_contains: Option<String>,
    /// Matched against work experience, education and headline
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: i64,
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    pub name: String,
    pub criteria: CandidateCriteria,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "notifyOnNewMatches")]
    pub notify_on_new_matches: bool,
    #[serde(rename = "lastNotifiedAt")]
    pub last_notified_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchNotification {
    pub id: i64,
    #[serde(rename = "savedSearchId")]
    pub saved_search_id: i64,
    pub message: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Skill overlap between a requirement set and a held set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub score: f64,
    pub common: Vec<String>,
    pub missing: Vec<String>,
}

/// An entity annotated with its distance from the searcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithDistance<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: Option<f64>,
}

/// Ranked job recommendation for a seeker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: Option<f64>,
    #[serde(rename = "match")]
    pub skill_match: SkillMatch,
}

/// Ranked candidate recommendation for a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: Option<f64>,
    #[serde(rename = "match")]
    pub skill_match: SkillMatch,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Scoring constants for the skill match heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Score given when the requirement set is empty
    pub empty_requirement_score: f64,
    /// Added once per common skill on top of the coverage ratio
    pub overlap_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            empty_requirement_score: 0.5,
            overlap_bonus: 0.1,
        }
    }
}
