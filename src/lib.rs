//! Jobmatch - job board matching service
//!
//! Seekers get jobs ranked by skill overlap, recruiters get candidates ranked
//! the same way, and both sides can restrict results to a commute radius
//! around a reference point.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    distance::{distance_miles, haversine_distance},
    DistanceFilter, Matcher,
};
pub use models::{GeoPoint, Job, Profile, ScoringWeights, Skill, SkillMatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let nyc = GeoPoint::new(40.7128, -74.0060);
        assert_eq!(distance_miles(nyc, nyc), 0.0);
        assert!(!DistanceFilter::disabled().is_active());
    }
}
