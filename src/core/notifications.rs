use chrono::{DateTime, Duration, Utc};

use crate::core::filters::matches_candidate_criteria;
use crate::models::{Profile, SavedSearch};

/// Whether a saved search takes part in new-match notifications
#[inline]
pub fn is_watching(search: &SavedSearch) -> bool {
    search.is_active && search.notify_on_new_matches
}

/// Saved searches that a freshly saved profile should trigger
pub fn searches_matching_profile<'a>(
    profile: &Profile,
    searches: &'a [SavedSearch],
) -> Vec<&'a SavedSearch> {
    if !profile.visible {
        return Vec::new();
    }

    searches
        .iter()
        .filter(|search| is_watching(search))
        .filter(|search| matches_candidate_criteria(profile, &search.criteria))
        .collect()
}

/// Visible profiles matching a search that changed since it last notified.
///
/// A search that never notified counts every match as new.
pub fn new_matches_for_search<'a>(search: &SavedSearch, profiles: &'a [Profile]) -> Vec<&'a Profile> {
    profiles
        .iter()
        .filter(|profile| profile.visible)
        .filter(|profile| match search.last_notified_at {
            Some(since) => profile.updated_at > since,
            None => true,
        })
        .filter(|profile| matches_candidate_criteria(profile, &search.criteria))
        .collect()
}

/// Cooldown gate: no notification newer than `cooldown` may exist
pub fn should_notify(
    latest_notification_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> bool {
    match latest_notification_at {
        Some(latest) => latest < now - cooldown,
        None => true,
    }
}

pub fn single_match_message(username: &str, search_name: &str) -> String {
    format!("New candidate {} matches your '{}' search", username, search_name)
}

pub fn batch_match_message(count: usize, search_name: &str) -> String {
    format!(
        "{} new candidate{} match your '{}' search",
        count,
        if count > 1 { "s" } else { "" },
        search_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateCriteria, Skill};

    fn create_search(last_notified_at: Option<DateTime<Utc>>) -> SavedSearch {
        SavedSearch {
            id: 1,
            recruiter_id: 2,
            name: "Rust devs".to_string(),
            criteria: CandidateCriteria {
                skill_ids: vec![1],
                ..Default::default()
            },
            is_active: true,
            notify_on_new_matches: true,
            last_notified_at,
            created_at: Utc::now(),
        }
    }

    fn create_profile(id: i64, skill_id: i64, updated_at: DateTime<Utc>) -> Profile {
        Profile {
            id,
            user_id: id,
            username: format!("user{}", id),
            headline: String::new(),
            education: String::new(),
            work_experience: String::new(),
            links: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            skills: vec![Skill { id: skill_id, name: format!("skill{}", skill_id) }],
            commute_radius_miles: None,
            visible: true,
            updated_at,
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(batch_match_message(1, "Rust devs"), "1 new candidate match your 'Rust devs' search");
        assert_eq!(batch_match_message(3, "Rust devs"), "3 new candidates match your 'Rust devs' search");
        assert_eq!(
            single_match_message("dana", "Rust devs"),
            "New candidate dana matches your 'Rust devs' search"
        );
    }

    #[test]
    fn test_cooldown() {
        let now = Utc::now();
        let hour = Duration::hours(1);

        assert!(should_notify(None, now, hour));
        assert!(!should_notify(Some(now - Duration::minutes(30)), now, hour));
        assert!(should_notify(Some(now - Duration::minutes(61)), now, hour));
    }

    #[test]
    fn test_new_matches_since_last_notification() {
        let now = Utc::now();
        let search = create_search(Some(now - Duration::hours(2)));

        let profiles = vec![
            create_profile(1, 1, now - Duration::hours(3)), // before last notification
            create_profile(2, 1, now),                      // new match
            create_profile(3, 9, now),                      // wrong skill
        ];

        let matches = new_matches_for_search(&search, &profiles);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 2);

        let first_run = create_search(None);
        assert_eq!(new_matches_for_search(&first_run, &profiles).len(), 2);
    }

    #[test]
    fn test_profile_saved_during_sweep_counts_next_time() {
        // Sweep reads profiles at `checked_at` and stamps that same instant
        let checked_at = Utc::now();
        let before = create_profile(1, 1, checked_at - Duration::seconds(5));
        let during = create_profile(2, 1, checked_at + Duration::milliseconds(200));

        let first = create_search(None);
        let seen = new_matches_for_search(&first, std::slice::from_ref(&before));
        assert_eq!(seen.len(), 1);

        let next = create_search(Some(checked_at));
        let profiles = vec![before, during];
        let matches = new_matches_for_search(&next, &profiles);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 2);
    }

    #[test]
    fn test_searches_matching_profile() {
        let now = Utc::now();
        let mut inactive = create_search(None);
        inactive.id = 2;
        inactive.is_active = false;
        let searches = vec![create_search(None), inactive];

        let profile = create_profile(1, 1, now);
        let hits = searches_matching_profile(&profile, &searches);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let mut hidden = profile.clone();
        hidden.visible = false;
        assert!(searches_matching_profile(&hidden, &searches).is_empty());
    }
}
