use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{matches_candidate_criteria, DistanceFilter};
use crate::models::{
    CandidateSearchQuery, CandidateSearchResponse, Profile, RecruiterQuery, Role, SavedSearch,
    SavedSearchRequest,
};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/candidates/search", web::get().to(search_candidates))
        .route("/saved-searches", web::post().to(create_saved_search))
        .route("/saved-searches", web::get().to(list_saved_searches))
        .route(
            "/saved-searches/{id}/notifications",
            web::get().to(list_notifications),
        )
        .route("/notifications/{id}/read", web::post().to(mark_read));
}

/// Recruiter candidate search
///
/// GET /api/v1/candidates/search?recruiterId=&skills=1,2&locationContains=
///     &keywords=&lat=&lon=&radius=
///
/// Any listed skill matches. Keywords are looked up in work experience,
/// education and headline. Results keep username order.
async fn search_candidates(
    state: web::Data<AppState>,
    query: web::Query<CandidateSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    state.require_user(query.recruiter_id, Role::Recruiter).await?;

    let criteria = query.criteria();
    let filter = DistanceFilter::from_params(query.location_params(), None, None);

    let profiles: Vec<Profile> = state
        .postgres
        .list_visible_profiles()
        .await?
        .into_iter()
        .filter(|profile| matches_candidate_criteria(profile, &criteria))
        .collect();

    let candidates = filter.apply(profiles);

    tracing::debug!(
        "Candidate search for recruiter {} returned {} profiles",
        query.recruiter_id,
        candidates.len()
    );

    Ok(HttpResponse::Ok().json(CandidateSearchResponse {
        total_results: candidates.len(),
        candidates,
    }))
}

/// Save a candidate search
///
/// POST /api/v1/saved-searches
async fn create_saved_search(
    state: web::Data<AppState>,
    req: web::Json<SavedSearchRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    state.require_user(req.recruiter_id, Role::Recruiter).await?;

    let search = state
        .postgres
        .create_saved_search(
            req.recruiter_id,
            req.name.trim(),
            &req.criteria,
            req.notify_on_new_matches,
        )
        .await?;

    tracing::info!("Recruiter {} saved search \"{}\"", req.recruiter_id, search.name);

    Ok(HttpResponse::Created().json(search))
}

async fn list_saved_searches(
    state: web::Data<AppState>,
    query: web::Query<RecruiterQuery>,
) -> Result<HttpResponse, ApiError> {
    state.require_user(query.recruiter_id, Role::Recruiter).await?;

    let searches = state.postgres.list_saved_searches(query.recruiter_id).await?;
    Ok(HttpResponse::Ok().json(searches))
}

/// Notifications of one saved search, newest first
///
/// GET /api/v1/saved-searches/{id}/notifications?recruiterId=
async fn list_notifications(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<RecruiterQuery>,
) -> Result<HttpResponse, ApiError> {
    let search = owned_search(&state, path.into_inner(), query.recruiter_id).await?;

    let notifications = state.postgres.list_notifications(search.id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// Mark one of the recruiter's notifications as read
///
/// POST /api/v1/notifications/{id}/read?recruiterId=
async fn mark_read(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<RecruiterQuery>,
) -> Result<HttpResponse, ApiError> {
    let notification_id = path.into_inner();

    let notification = state
        .postgres
        .get_notification(notification_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Notification {} not found", notification_id)))?;

    owned_search(&state, notification.saved_search_id, query.recruiter_id).await?;

    if !state.postgres.mark_notification_read(notification.id).await? {
        return Err(ApiError::NotFound(format!(
            "Notification {} not found",
            notification_id
        )));
    }

    Ok(HttpResponse::NoContent().finish())
}

async fn owned_search(
    state: &AppState,
    search_id: i64,
    recruiter_id: i64,
) -> Result<SavedSearch, ApiError> {
    let search = state
        .postgres
        .get_saved_search(search_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Saved search {} not found", search_id)))?;

    ensure_owner(&search, recruiter_id)?;
    Ok(search)
}

fn ensure_owner(search: &SavedSearch, recruiter_id: i64) -> Result<(), ApiError> {
    if search.recruiter_id != recruiter_id {
        return Err(ApiError::Forbidden(format!(
            "Saved search {} does not belong to recruiter {}",
            search.id, recruiter_id
        )));
    }
    Ok(())
}
