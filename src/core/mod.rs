// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod notifications;
pub mod scoring;

pub use distance::{haversine_distance, distance_miles, calculate_bounding_box, is_within_bounding_box};
pub use filters::{DistanceFilter, Located, matches_job_criteria, matches_candidate_criteria};
pub use matcher::{Matcher, MatchResult};
pub use scoring::{score_skills, rank_by_score};
