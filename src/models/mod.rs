// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Application, BoundingBox, CandidateCriteria, GeoPoint, Job, JobCriteria, Profile,
    RankedCandidate, RankedJob, Role, SavedSearch, ScoringWeights, SearchNotification, Skill,
    SkillMatch, User, WithDistance,
};
pub use requests::{
    AdminActionRequest, ApplyRequest, CandidateRecommendationQuery, CandidateSearchQuery,
    JobRecommendationQuery, JobRequest, JobSearchQuery, LocationParams, ProfileRequest,
    RecruiterQuery, RegisterUserRequest, SavedSearchRequest,
};
pub use responses::{
    AdminActionResponse, CandidateRecommendationsResponse, CandidateSearchResponse,
    ErrorResponse, HealthResponse, JobListResponse, JobRecommendationsResponse,
};
