// Unit tests for jobmatch

use chrono::Utc;
use geo::{HaversineDistance, Point};
use jobmatch::core::{
    distance::{calculate_bounding_box, distance_miles, haversine_distance, is_within_bounding_box, KM_TO_MILES},
    filters::{resolve_radius, DistanceFilter},
    scoring::{rank_by_score, score_skills},
};
use jobmatch::models::{GeoPoint, Job, LocationParams, ScoringWeights, Skill};

fn skill(id: i64, name: &str) -> Skill {
    Skill {
        id,
        name: name.to_string(),
    }
}

fn job_at(id: i64, point: Option<(f64, f64)>, remote: bool) -> Job {
    Job {
        id,
        title: format!("Job {}", id),
        description: String::new(),
        location: String::new(),
        latitude: point.map(|p| p.0),
        longitude: point.map(|p| p.1),
        skills: vec![],
        min_salary: None,
        max_salary: None,
        remote,
        visa_sponsorship: false,
        approved: true,
        created_by: 1,
        created_at: Utc::now(),
    }
}

const NYC: (f64, f64) = (40.7128, -74.0060);
const BOSTON: (f64, f64) = (42.3601, -71.0589);
const PHILADELPHIA: (f64, f64) = (39.9526, -75.1652);

#[test]
fn test_haversine_identical_points() {
    assert_eq!(haversine_distance(NYC.0, NYC.1, NYC.0, NYC.1), 0.0);
    assert_eq!(haversine_distance(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
}

#[test]
fn test_haversine_symmetry() {
    let there = haversine_distance(NYC.0, NYC.1, BOSTON.0, BOSTON.1);
    let back = haversine_distance(BOSTON.0, BOSTON.1, NYC.0, NYC.1);
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn test_haversine_triangle_inequality() {
    let nyc_boston = haversine_distance(NYC.0, NYC.1, BOSTON.0, BOSTON.1);
    let nyc_philly = haversine_distance(NYC.0, NYC.1, PHILADELPHIA.0, PHILADELPHIA.1);
    let philly_boston = haversine_distance(PHILADELPHIA.0, PHILADELPHIA.1, BOSTON.0, BOSTON.1);

    assert!(philly_boston <= nyc_philly + nyc_boston + 1e-9);
    assert!(nyc_boston <= nyc_philly + philly_boston + 1e-9);
    assert!(nyc_philly <= nyc_boston + philly_boston + 1e-9);
}

#[test]
fn test_haversine_matches_geo_crate() {
    // geo takes (x = lon, y = lat) and returns meters on a 6371.0088 km sphere
    let expected_km = Point::new(NYC.1, NYC.0).haversine_distance(&Point::new(BOSTON.1, BOSTON.0)) / 1000.0;
    let actual_km = haversine_distance(NYC.0, NYC.1, BOSTON.0, BOSTON.1);

    assert!((actual_km - expected_km).abs() / expected_km < 0.001);
}

#[test]
fn test_haversine_known_distance() {
    // New York to Boston is roughly 306 km
    let km = haversine_distance(NYC.0, NYC.1, BOSTON.0, BOSTON.1);
    assert!(km > 295.0 && km < 315.0);

    let miles = distance_miles(GeoPoint::new(NYC.0, NYC.1), GeoPoint::new(BOSTON.0, BOSTON.1));
    assert!((miles - km * KM_TO_MILES).abs() < 1e-9);
}

#[test]
fn test_bounding_box_contains_center() {
    let bbox = calculate_bounding_box(NYC.0, NYC.1, 50.0);
    assert!(is_within_bounding_box(NYC.0, NYC.1, &bbox));
    assert!(!is_within_bounding_box(BOSTON.0, BOSTON.1, &bbox));
}

#[test]
fn test_bounding_box_keeps_far_east_point_at_mid_latitude() {
    // 1000 miles around (50, 10): the circle's easternmost point sits near
    // (52.29, 32.87), beyond a flat-earth longitude estimate
    let radius_km = 1000.0 / KM_TO_MILES;
    let (lat, lon) = (52.2903, 32.8662);

    let km = haversine_distance(50.0, 10.0, lat, lon);
    assert!(km < radius_km, "expected a point inside the radius, got {} km", km);

    let bbox = calculate_bounding_box(50.0, 10.0, radius_km);
    assert!(is_within_bounding_box(lat, lon, &bbox), "{:?}", bbox);
    assert!(is_within_bounding_box(lat, 10.0 - (lon - 10.0), &bbox));
}

#[test]
fn test_filter_without_radius_annotates_everything() {
    let filter = DistanceFilter::new(Some(GeoPoint::new(NYC.0, NYC.1)), None);
    let jobs = vec![
        job_at(1, Some(BOSTON), false),
        job_at(2, Some(PHILADELPHIA), false),
        job_at(3, None, false),
    ];

    let result = filter.apply(jobs);

    assert_eq!(result.len(), 3);
    assert!(result[0].distance_miles.is_some());
    assert!(result[1].distance_miles.is_some());
    assert!(result[2].distance_miles.is_none());
}

#[test]
fn test_filter_excludes_far_jobs_but_keeps_remote() {
    let filter = DistanceFilter::new(Some(GeoPoint::new(NYC.0, NYC.1)), Some(100.0));
    let jobs = vec![
        job_at(1, Some(BOSTON), false),       // ~190 miles
        job_at(2, Some(PHILADELPHIA), false), // ~80 miles
        job_at(3, Some(BOSTON), true),        // remote
        job_at(4, None, false),               // no coordinates
    ];

    let ids: Vec<i64> = filter.apply(jobs).iter().map(|entry| entry.item.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[test]
fn test_filter_without_reference_passes_through() {
    let filter = DistanceFilter::disabled();
    let result = filter.apply(vec![job_at(1, Some(BOSTON), false), job_at(2, None, true)]);

    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|entry| entry.distance_miles.is_none()));
}

#[test]
fn test_malformed_params_skip_filtering() {
    let params = LocationParams {
        lat: Some("forty"),
        lon: Some("-74.0"),
        radius: Some("10"),
    };
    let filter = DistanceFilter::from_params(params, None, Some(25.0));

    assert!(!filter.is_active());
    let result = filter.apply(vec![job_at(1, Some(BOSTON), false)]);
    assert_eq!(result.len(), 1);
    assert!(result[0].distance_miles.is_none());
}

#[test]
fn test_radius_precedence() {
    // Explicit wins
    assert_eq!(resolve_radius(Some("10"), Some(25.0)), Ok(Some(10.0)));
    // Stored preference otherwise
    assert_eq!(resolve_radius(None, Some(25.0)), Ok(Some(25.0)));
    // Zero or unset means no limit
    assert_eq!(resolve_radius(None, Some(0.0)), Ok(None));
    assert_eq!(resolve_radius(None, None), Ok(None));
    assert!(resolve_radius(Some("far"), Some(25.0)).is_err());
}

#[test]
fn test_score_partial_overlap() {
    let required = vec![skill(1, "Python"), skill(2, "SQL")];
    let held = vec![skill(1, "Python")];

    let result = score_skills(&required, &held, &ScoringWeights::default());

    assert!((result.score - 0.6).abs() < 1e-9);
    assert_eq!(result.common, vec!["Python".to_string()]);
    assert_eq!(result.missing, vec!["SQL".to_string()]);
}

#[test]
fn test_score_full_overlap_exceeds_one() {
    let required = vec![skill(1, "A"), skill(2, "B")];
    let result = score_skills(&required, &required, &ScoringWeights::default());
    assert!((result.score - 1.2).abs() < 1e-9);
}

#[test]
fn test_score_no_overlap() {
    let required = vec![skill(1, "Rust")];
    let held = vec![skill(2, "Go"), skill(3, "Java")];
    assert_eq!(score_skills(&required, &held, &ScoringWeights::default()).score, 0.0);
}

#[test]
fn test_score_empty_requirements() {
    let weights = ScoringWeights::default();
    assert_eq!(score_skills(&[], &[], &weights).score, 0.5);
    assert_eq!(score_skills(&[], &[skill(1, "Rust"), skill(2, "Go")], &weights).score, 0.5);
}

#[test]
fn test_ranking_is_stable_descending() {
    let mut items = vec![("first", 0.6), ("second", 1.2), ("third", 0.6)];
    rank_by_score(&mut items, |item| item.1);

    let order: Vec<&str> = items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec!["second", "first", "third"]);
}
