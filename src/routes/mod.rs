// Route exports
pub mod admin;
pub mod error;
pub mod health;
pub mod jobs;
pub mod profiles;
pub mod recommendations;
pub mod saved_searches;

use actix_web::web;
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{GeoPoint, LocationParams, Role, User};
use crate::services::{CacheKey, CacheManager, GeocoderClient, Notifier, PostgresClient};

pub use admin::AdminRegistry;
pub use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub geocoder: Option<Arc<GeocoderClient>>,
    pub notifier: Notifier,
    pub admin: Arc<AdminRegistry>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Clamp a requested page size to the configured bounds
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.matching.default_limit)
            .clamp(1, self.matching.max_limit.max(1))
    }

    /// Load a user and check their role
    pub async fn require_user(&self, user_id: i64, role: Role) -> Result<User, ApiError> {
        let user = self
            .postgres
            .get_user(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;

        if user.role != role {
            return Err(ApiError::Forbidden(format!(
                "User {} is not a {}",
                user_id,
                role.as_str()
            )));
        }

        Ok(user)
    }

    /// Coordinates for a record: explicit ones, else the geocoder's best guess
    pub async fn locate(
        &self,
        location: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Option<GeoPoint> {
        let explicit = GeoPoint::from_parts(latitude, longitude);
        match &self.geocoder {
            Some(geocoder) => geocoder.resolve_or_keep(location, explicit).await,
            None => explicit,
        }
    }

    /// Drop cached data derived from jobs, profiles and skills after a write
    pub async fn invalidate_after_write(&self) {
        if let Err(e) = self.cache.delete(&CacheKey::skills()).await {
            tracing::warn!("Failed to invalidate skill cache: {}", e);
        }
        if let Err(e) = self
            .cache
            .invalidate_pattern(CacheKey::RECOMMENDATIONS_PATTERN)
            .await
        {
            tracing::warn!("Failed to invalidate recommendation cache: {}", e);
        }
    }
}

/// Cache key fragment for location parameters
pub fn location_key(params: LocationParams<'_>) -> String {
    format!(
        "{},{},{}",
        params.lat.unwrap_or_default().trim(),
        params.lon.unwrap_or_default().trim(),
        params.radius.unwrap_or_default().trim()
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(profiles::configure)
            .configure(recommendations::configure)
            .configure(jobs::configure)
            .configure(saved_searches::configure)
            .configure(admin::configure),
    );
}
