use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::core::notifications::{
    batch_match_message, new_matches_for_search, searches_matching_profile, should_notify,
    single_match_message,
};
use crate::models::{Profile, SavedSearch};
use crate::services::postgres::{PostgresClient, PostgresError};

/// Outcome of one saved search in a batch run
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    #[serde(rename = "savedSearchId")]
    pub saved_search_id: i64,
    pub name: String,
    #[serde(rename = "newMatches")]
    pub new_matches: usize,
}

/// Outcome of a whole batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    #[serde(rename = "searchesChecked")]
    pub searches_checked: usize,
    pub notified: Vec<SearchReport>,
}

impl BatchReport {
    pub fn notifications_created(&self) -> usize {
        self.notified.len()
    }
}

/// Creates saved-search notifications for recruiters
///
/// Two entry points: `on_profile_saved` runs after a profile upsert and
/// honours the cooldown, `run_batch` is the periodic sweep driven by the
/// `check-new-matches` binary.
#[derive(Clone)]
pub struct Notifier {
    postgres: Arc<PostgresClient>,
    cooldown: Duration,
}

impl Notifier {
    pub fn new(postgres: Arc<PostgresClient>, cooldown: Duration) -> Self {
        Self { postgres, cooldown }
    }

    /// Notify every watching search the profile now matches.
    ///
    /// Returns the number of notifications created.
    pub async fn on_profile_saved(&self, profile: &Profile) -> Result<usize, PostgresError> {
        if !profile.visible {
            return Ok(0);
        }

        let checked_at = Utc::now();
        let searches = self.postgres.list_watching_searches().await?;
        let mut created = 0;

        for search in searches_matching_profile(profile, &searches) {
            let latest = self.postgres.latest_notification_at(search.id).await?;
            if !should_notify(latest, checked_at, self.cooldown) {
                tracing::debug!("Search {} notified recently, skipping", search.id);
                continue;
            }

            let message = single_match_message(&profile.username, &search.name);
            self.postgres
                .create_notification(search.id, &message, checked_at)
                .await?;
            created += 1;

            tracing::info!("Profile {} matched saved search {}", profile.id, search.id);
        }

        Ok(created)
    }

    /// Sweep every watching search for matches since its last notification
    pub async fn run_batch(&self) -> Result<BatchReport, PostgresError> {
        // Taken before the profiles are read; becomes each search's new watermark
        let checked_at = Utc::now();
        let searches = self.postgres.list_watching_searches().await?;
        let profiles = self.postgres.list_visible_profiles().await?;

        let mut report = BatchReport {
            searches_checked: searches.len(),
            notified: Vec::new(),
        };

        for search in &searches {
            if let Some(entry) = self.notify_search(search, &profiles, checked_at).await? {
                report.notified.push(entry);
            }
        }

        Ok(report)
    }

    async fn notify_search(
        &self,
        search: &SavedSearch,
        profiles: &[Profile],
        checked_at: DateTime<Utc>,
    ) -> Result<Option<SearchReport>, PostgresError> {
        let matches = new_matches_for_search(search, profiles);
        if matches.is_empty() {
            return Ok(None);
        }

        let message = batch_match_message(matches.len(), &search.name);
        self.postgres
            .create_notification(search.id, &message, checked_at)
            .await?;

        tracing::debug!(
            "Search {} (\"{}\") has {} new matches",
            search.id,
            search.name,
            matches.len()
        );

        Ok(Some(SearchReport {
            saved_search_id: search.id,
            name: search.name.clone(),
            new_matches: matches.len(),
        }))
    }
}
