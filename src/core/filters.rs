use crate::core::distance::{calculate_bounding_box, distance_miles, miles_to_km};
use crate::models::{
    BoundingBox, CandidateCriteria, GeoPoint, Job, JobCriteria, LocationParams, Profile,
    WithDistance,
};

/// Anything that can sit on the map for commute filtering
pub trait Located {
    fn point(&self) -> Option<GeoPoint>;

    /// Entities that pass the radius check regardless of distance
    fn always_include(&self) -> bool {
        false
    }
}

impl Located for Job {
    fn point(&self) -> Option<GeoPoint> {
        Job::point(self)
    }

    fn always_include(&self) -> bool {
        self.remote
    }
}

impl Located for Profile {
    fn point(&self) -> Option<GeoPoint> {
        Profile::point(self)
    }
}

/// Marker for location text that could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedInput;

/// Pick the radius to filter by, in miles.
///
/// An explicit request value wins over the stored preference. Zero or unset
/// means no limit. Unparseable or negative explicit values are reported so the
/// caller can skip distance handling altogether.
pub fn resolve_radius(
    explicit: Option<&str>,
    preference_miles: Option<f64>,
) -> Result<Option<f64>, MalformedInput> {
    match explicit.map(str::trim).filter(|v| !v.is_empty()) {
        Some(text) => {
            let miles = text.parse::<f64>().map_err(|_| MalformedInput)?;
            if !miles.is_finite() || miles < 0.0 {
                return Err(MalformedInput);
            }
            Ok(Some(miles).filter(|m| *m > 0.0))
        }
        None => Ok(preference_miles.filter(|m| m.is_finite() && *m > 0.0)),
    }
}

/// Pick the reference point: explicit coordinates, else the fallback.
///
/// Supplying only one of lat/lon, or either one unparseable, is malformed.
pub fn resolve_reference(
    lat: Option<&str>,
    lon: Option<&str>,
    fallback: Option<GeoPoint>,
) -> Result<Option<GeoPoint>, MalformedInput> {
    let lat = lat.map(str::trim).filter(|v| !v.is_empty());
    let lon = lon.map(str::trim).filter(|v| !v.is_empty());

    match (lat, lon) {
        (None, None) => Ok(fallback),
        (Some(lat), Some(lon)) => GeoPoint::parse(lat, lon).map(Some).ok_or(MalformedInput),
        _ => Err(MalformedInput),
    }
}

/// Commute filter: annotates entities with their distance from a reference
/// point and drops the ones beyond the radius.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceFilter {
    reference: Option<GeoPoint>,
    radius_miles: Option<f64>,
}

impl DistanceFilter {
    /// No annotation, no filtering
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(reference: Option<GeoPoint>, radius_miles: Option<f64>) -> Self {
        Self {
            reference,
            radius_miles: radius_miles.filter(|m| m.is_finite() && *m > 0.0),
        }
    }

    /// Build a filter from raw request parameters.
    ///
    /// `fallback_reference` and `preference_miles` come from the searcher's
    /// stored profile, if any. Malformed input yields a disabled filter.
    pub fn from_params(
        params: LocationParams<'_>,
        fallback_reference: Option<GeoPoint>,
        preference_miles: Option<f64>,
    ) -> Self {
        let reference = resolve_reference(params.lat, params.lon, fallback_reference);
        let radius = resolve_radius(params.radius, preference_miles);

        match (reference, radius) {
            (Ok(reference), Ok(radius)) => Self::new(reference, radius),
            _ => {
                tracing::debug!(
                    "Ignoring malformed location parameters: lat={:?} lon={:?} radius={:?}",
                    params.lat,
                    params.lon,
                    params.radius
                );
                Self::disabled()
            }
        }
    }

    pub fn reference(&self) -> Option<GeoPoint> {
        self.reference
    }

    /// Effective radius; `None` unless a reference point is also set
    pub fn radius_miles(&self) -> Option<f64> {
        self.reference.and(self.radius_miles)
    }

    pub fn is_active(&self) -> bool {
        self.reference.is_some()
    }

    /// Coarse box for storage-side pre-filtering, when a radius applies
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let reference = self.reference?;
        let radius = self.radius_miles?;
        Some(calculate_bounding_box(
            reference.latitude,
            reference.longitude,
            miles_to_km(radius),
        ))
    }

    /// Distance from the reference point, if both points are known
    pub fn distance_to<T: Located>(&self, entity: &T) -> Option<f64> {
        let reference = self.reference?;
        entity.point().map(|point| distance_miles(reference, point))
    }

    /// Whether the entity survives the radius check
    pub fn keeps<T: Located>(&self, entity: &T, distance: Option<f64>) -> bool {
        match (self.radius_miles(), distance) {
            (Some(radius), Some(distance)) => distance <= radius || entity.always_include(),
            // No radius, or no coordinates to judge by
            _ => true,
        }
    }

    /// Annotate and filter, preserving input order
    pub fn apply<T: Located>(&self, items: Vec<T>) -> Vec<WithDistance<T>> {
        items
            .into_iter()
            .filter_map(|item| {
                let distance = self.distance_to(&item);
                self.keeps(&item, distance).then_some(WithDistance {
                    item,
                    distance_miles: distance,
                })
            })
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Check a job against the listing filters
pub fn matches_job_criteria(job: &Job, criteria: &JobCriteria) -> bool {
    if let Some(title) = &criteria.title {
        if !contains_ignore_case(&job.title, title) {
            return false;
        }
    }

    // Every selected skill must be required by the job
    if !criteria
        .skill_ids
        .iter()
        .all(|id| job.skills.iter().any(|skill| skill.id == *id))
    {
        return false;
    }

    if let Some(location) = &criteria.location {
        if !contains_ignore_case(&job.location, location) {
            return false;
        }
    }

    if let Some(min) = criteria.min_salary {
        if !job.min_salary.is_some_and(|salary| salary >= min) {
            return false;
        }
    }

    if let Some(max) = criteria.max_salary {
        if !job.max_salary.is_some_and(|salary| salary <= max) {
            return false;
        }
    }

    if let Some(remote) = criteria.remote {
        if job.remote != remote {
            return false;
        }
    }

    if let Some(visa) = criteria.visa_sponsorship {
        if job.visa_sponsorship != visa {
            return false;
        }
    }

    true
}

/// Check a profile against recruiter search filters
pub fn matches_candidate_criteria(profile: &Profile, criteria: &CandidateCriteria) -> bool {
    // Any one of the selected skills is enough
    if !criteria.skill_ids.is_empty()
        && !profile
            .skills
            .iter()
            .any(|skill| criteria.skill_ids.contains(&skill.id))
    {
        return false;
    }

    if let Some(location) = &criteria.location_contains {
        if !contains_ignore_case(&profile.location, location) {
            return false;
        }
    }

    if let Some(keywords) = &criteria.keywords {
        let found = contains_ignore_case(&profile.work_experience, keywords)
            || contains_ignore_case(&profile.education, keywords)
            || contains_ignore_case(&profile.headline, keywords);
        if !found {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;
    use chrono::Utc;

    fn skill(id: i64, name: &str) -> Skill {
        Skill { id, name: name.to_string() }
    }

    fn create_test_job(id: i64, point: Option<(f64, f64)>, remote: bool) -> Job {
        Job {
            id,
            title: "Backend Engineer".to_string(),
            description: String::new(),
            location: "Atlanta, GA".to_string(),
            latitude: point.map(|p| p.0),
            longitude: point.map(|p| p.1),
            skills: vec![skill(1, "Python"), skill(2, "SQL")],
            min_salary: Some(90_000.0),
            max_salary: Some(120_000.0),
            remote,
            visa_sponsorship: false,
            approved: true,
            created_by: 7,
            created_at: Utc::now(),
        }
    }

    fn create_test_profile() -> Profile {
        Profile {
            id: 1,
            user_id: 10,
            username: "dana".to_string(),
            headline: "Data engineer".to_string(),
            education: "Georgia Tech".to_string(),
            work_experience: "Built ETL pipelines in Rust".to_string(),
            links: String::new(),
            location: "Atlanta".to_string(),
            latitude: Some(33.749),
            longitude: Some(-84.388),
            skills: vec![skill(1, "Python")],
            commute_radius_miles: Some(25.0),
            visible: true,
            updated_at: Utc::now(),
        }
    }

    const ATLANTA: GeoPoint = GeoPoint { latitude: 33.749, longitude: -84.388 };

    #[test]
    fn test_resolve_radius_precedence() {
        assert_eq!(resolve_radius(Some("10"), Some(50.0)), Ok(Some(10.0)));
        assert_eq!(resolve_radius(None, Some(50.0)), Ok(Some(50.0)));
        assert_eq!(resolve_radius(Some(""), Some(50.0)), Ok(Some(50.0)));
        assert_eq!(resolve_radius(None, Some(0.0)), Ok(None));
        assert_eq!(resolve_radius(None, None), Ok(None));
        assert_eq!(resolve_radius(Some("0"), Some(50.0)), Ok(None));
        assert_eq!(resolve_radius(Some("ten"), Some(50.0)), Err(MalformedInput));
        assert_eq!(resolve_radius(Some("-5"), None), Err(MalformedInput));
    }

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference(None, None, Some(ATLANTA)), Ok(Some(ATLANTA)));
        assert_eq!(
            resolve_reference(Some("40.0"), Some("-74.0"), Some(ATLANTA)),
            Ok(Some(GeoPoint::new(40.0, -74.0)))
        );
        assert_eq!(resolve_reference(Some("40.0"), None, None), Err(MalformedInput));
        assert_eq!(resolve_reference(Some("north"), Some("1"), None), Err(MalformedInput));
    }

    #[test]
    fn test_filter_without_reference_passes_everything() {
        let jobs = vec![
            create_test_job(1, Some((40.7, -74.0)), false),
            create_test_job(2, None, false),
        ];

        let result = DistanceFilter::new(None, Some(5.0)).apply(jobs);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|j| j.distance_miles.is_none()));
    }

    #[test]
    fn test_filter_without_radius_annotates_only() {
        let jobs = vec![
            create_test_job(1, Some((33.75, -84.39)), false),
            create_test_job(2, Some((40.7, -74.0)), false),
        ];

        let result = DistanceFilter::new(Some(ATLANTA), None).apply(jobs);

        assert_eq!(result.len(), 2);
        assert!(result[0].distance_miles.unwrap() < 1.0);
        assert!(result[1].distance_miles.unwrap() > 700.0);
    }

    #[test]
    fn test_filter_excludes_far_onsite_keeps_remote_and_unknown() {
        let jobs = vec![
            create_test_job(1, Some((33.80, -84.40)), false), // a few miles
            create_test_job(2, Some((40.7, -74.0)), false),   // New York
            create_test_job(3, Some((40.7, -74.0)), true),    // New York, remote
            create_test_job(4, None, false),                  // no coordinates
        ];

        let result = DistanceFilter::new(Some(ATLANTA), Some(25.0)).apply(jobs);
        let ids: Vec<i64> = result.iter().map(|j| j.item.id).collect();

        assert_eq!(ids, vec![1, 3, 4]);
        assert!(result[1].distance_miles.is_some());
        assert!(result[2].distance_miles.is_none());
    }

    #[test]
    fn test_malformed_params_disable_filter() {
        let params = LocationParams {
            lat: Some("33.7"),
            lon: Some("-84.3"),
            radius: Some("far"),
        };
        let filter = DistanceFilter::from_params(params, None, Some(10.0));
        assert_eq!(filter, DistanceFilter::disabled());

        let jobs = vec![create_test_job(1, Some((40.7, -74.0)), false)];
        let result = filter.apply(jobs);
        assert_eq!(result.len(), 1);
        assert!(result[0].distance_miles.is_none());
    }

    #[test]
    fn test_from_params_falls_back_to_profile() {
        let filter = DistanceFilter::from_params(LocationParams::default(), Some(ATLANTA), Some(30.0));
        assert_eq!(filter.reference(), Some(ATLANTA));
        assert_eq!(filter.radius_miles(), Some(30.0));
        assert!(filter.bounding_box().is_some());
    }

    #[test]
    fn test_job_criteria() {
        let job = create_test_job(1, None, false);

        assert!(matches_job_criteria(&job, &JobCriteria::default()));

        let criteria = JobCriteria {
            title: Some("backend".to_string()),
            skill_ids: vec![1, 2],
            location: Some("atlanta".to_string()),
            min_salary: Some(80_000.0),
            max_salary: Some(150_000.0),
            remote: Some(false),
            visa_sponsorship: Some(false),
        };
        assert!(matches_job_criteria(&job, &criteria));

        let needs_rust = JobCriteria { skill_ids: vec![1, 3], ..Default::default() };
        assert!(!matches_job_criteria(&job, &needs_rust));

        let higher_floor = JobCriteria { min_salary: Some(95_000.0), ..Default::default() };
        assert!(!matches_job_criteria(&job, &higher_floor));

        let remote_only = JobCriteria { remote: Some(true), ..Default::default() };
        assert!(!matches_job_criteria(&job, &remote_only));
    }

    #[test]
    fn test_job_without_salary_fails_salary_filter() {
        let mut job = create_test_job(1, None, false);
        job.min_salary = None;
        let criteria = JobCriteria { min_salary: Some(1.0), ..Default::default() };
        assert!(!matches_job_criteria(&job, &criteria));
    }

    #[test]
    fn test_candidate_criteria() {
        let profile = create_test_profile();

        assert!(matches_candidate_criteria(&profile, &CandidateCriteria::default()));

        let any_skill = CandidateCriteria { skill_ids: vec![1, 9], ..Default::default() };
        assert!(matches_candidate_criteria(&profile, &any_skill));

        let no_skill = CandidateCriteria { skill_ids: vec![9], ..Default::default() };
        assert!(!matches_candidate_criteria(&profile, &no_skill));

        let keyword = CandidateCriteria { keywords: Some("etl".to_string()), ..Default::default() };
        assert!(matches_candidate_criteria(&profile, &keyword));

        let wrong_city = CandidateCriteria {
            location_contains: Some("Boston".to_string()),
            ..Default::default()
        };
        assert!(!matches_candidate_criteria(&profile, &wrong_city));
    }
}
