use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{ProfileRequest, RegisterUserRequest, Role, Skill};
use crate::routes::{ApiError, AppState};
use crate::services::CacheKey;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(register_user))
        .route("/skills", web::get().to(list_skills))
        .route("/profiles/{user_id}", web::get().to(get_profile))
        .route("/profiles/{user_id}", web::put().to(upsert_profile));
}

/// Register a user
///
/// POST /api/v1/users
///
/// Seekers always get an (empty) profile.
async fn register_user(
    state: web::Data<AppState>,
    req: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let user = state
        .postgres
        .create_user(req.username.trim(), req.email.trim(), req.role)
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Skill catalogue, served from cache when possible
async fn list_skills(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let key = CacheKey::skills();

    match state.cache.get::<Vec<Skill>>(&key).await {
        Ok(Some(skills)) => return Ok(HttpResponse::Ok().json(skills)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Skill cache lookup failed: {}", e),
    }

    let skills = state.postgres.list_skills().await?;

    if let Err(e) = state.cache.set(&key, &skills).await {
        tracing::warn!("Failed to cache skills: {}", e);
    }

    Ok(HttpResponse::Ok().json(skills))
}

async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let profile = state
        .postgres
        .get_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No profile for user {}", user_id)))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Create or update a seeker profile
///
/// PUT /api/v1/profiles/{userId}
///
/// Saving a visible profile checks the watching saved searches and may
/// notify recruiters.
async fn upsert_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let user_id = path.into_inner();
    state.require_user(user_id, Role::Seeker).await?;

    let point = state.locate(&req.location, req.latitude, req.longitude).await;
    let profile = state.postgres.upsert_profile(user_id, &req, point).await?;

    tracing::info!("Saved profile {} for user {}", profile.id, user_id);

    // Notifications are a side effect; the save already succeeded
    match state.notifier.on_profile_saved(&profile).await {
        Ok(0) => {}
        Ok(created) => tracing::info!("Profile {} triggered {} notifications", profile.id, created),
        Err(e) => tracing::warn!("Saved-search check failed for profile {}: {}", profile.id, e),
    }

    state.invalidate_after_write().await;

    Ok(HttpResponse::Ok().json(profile))
}
