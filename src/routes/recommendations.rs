use actix_web::{web, HttpResponse};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::DistanceFilter;
use crate::models::{
    CandidateRecommendationQuery, CandidateRecommendationsResponse, JobRecommendationQuery,
    JobRecommendationsResponse, Role,
};
use crate::routes::{jobs::find_job, location_key, ApiError, AppState};
use crate::services::CacheKey;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations/jobs", web::get().to(recommend_jobs))
        .route("/jobs/{id}/candidates", web::get().to(recommend_candidates));
}

/// Job recommendations for a seeker
///
/// GET /api/v1/recommendations/jobs?profileId=&limit=&lat=&lon=&radius=
///
/// Ranked by skill match. The profile's stored location and commute radius
/// apply unless overridden by the query.
async fn recommend_jobs(
    state: web::Data<AppState>,
    query: web::Query<JobRecommendationQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = state.limit(query.limit);
    let cache_key =
        CacheKey::job_recommendations(query.profile_id, limit, &location_key(query.location_params()));

    if let Some(cached) = cached::<JobRecommendationsResponse>(&state, &cache_key).await {
        tracing::debug!("Cache hit for job recommendations of profile {}", query.profile_id);
        return Ok(HttpResponse::Ok().json(cached));
    }

    let profile = state
        .postgres
        .get_profile(query.profile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", query.profile_id)))?;

    let filter = DistanceFilter::from_params(
        query.location_params(),
        profile.point(),
        profile.commute_radius_miles,
    );

    let jobs = state.postgres.list_jobs(true, filter.bounding_box()).await?;
    let result = state.matcher.recommend_jobs(&profile, jobs, &filter, limit);

    let response = JobRecommendationsResponse {
        recommendations: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} job recommendations for profile {} (from {} jobs)",
        response.recommendations.len(),
        profile.id,
        response.total_candidates
    );

    store(&state, &cache_key, &response).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Candidate recommendations for a recruiter's job
///
/// GET /api/v1/jobs/{id}/candidates?recruiterId=&limit=&lat=&lon=&radius=
///
/// Distances are measured from the job unless `lat`/`lon` are given. No
/// radius applies unless the query sets one.
async fn recommend_candidates(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<CandidateRecommendationQuery>,
) -> Result<HttpResponse, ApiError> {
    state.require_user(query.recruiter_id, Role::Recruiter).await?;

    let job = find_job(&state, path.into_inner()).await?;
    if job.created_by != query.recruiter_id {
        return Err(ApiError::Forbidden(format!(
            "Job {} does not belong to recruiter {}",
            job.id, query.recruiter_id
        )));
    }

    let limit = state.limit(query.limit);
    let cache_key =
        CacheKey::candidate_recommendations(job.id, limit, &location_key(query.location_params()));

    if let Some(cached) = cached::<CandidateRecommendationsResponse>(&state, &cache_key).await {
        tracing::debug!("Cache hit for candidate recommendations of job {}", job.id);
        return Ok(HttpResponse::Ok().json(cached));
    }

    let filter = DistanceFilter::from_params(query.location_params(), job.point(), None);
    let profiles = state.postgres.list_visible_profiles().await?;
    let result = state.matcher.recommend_candidates(&job, profiles, &filter, limit);

    let response = CandidateRecommendationsResponse {
        recommendations: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} candidates for job {} (from {} profiles)",
        response.recommendations.len(),
        job.id,
        response.total_candidates
    );

    store(&state, &cache_key, &response).await;
    Ok(HttpResponse::Ok().json(response))
}

async fn cached<T: DeserializeOwned>(state: &AppState, key: &str) -> Option<T> {
    match state.cache.get::<T>(key).await {
        Ok(hit) => hit,
        Err(e) => {
            tracing::warn!("Cache lookup failed for {}: {}", key, e);
            None
        }
    }
}

async fn store<T: Serialize>(state: &AppState, key: &str, value: &T) {
    if let Err(e) = state.cache.set(key, value).await {
        tracing::warn!("Failed to cache {}: {}", key, e);
    }
}
