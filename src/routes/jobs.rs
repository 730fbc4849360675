use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{matches_job_criteria, DistanceFilter};
use crate::models::{
    ApplyRequest, Job, JobListResponse, JobRequest, JobSearchQuery, RecruiterQuery, Role,
};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/jobs", web::get().to(search_jobs))
        .route("/jobs", web::post().to(create_job))
        .route("/jobs/{id}", web::get().to(get_job))
        .route("/jobs/{id}", web::put().to(update_job))
        .route("/jobs/{id}/apply", web::post().to(apply))
        .route("/jobs/{id}/applications", web::get().to(list_applications))
        .route("/recruiters/{id}/jobs", web::get().to(recruiter_dashboard));
}

/// Job listing with filters and commute radius
///
/// GET /api/v1/jobs?title=&skills=1,2&location=&min_salary=&max_salary=
///     &remote=remote|onsite&visa=yes|no&lat=&lon=&radius=&profileId=
///
/// With `profileId`, the seeker's stored location and commute radius are
/// used unless `lat`/`lon`/`radius` are given explicitly.
async fn search_jobs(
    state: web::Data<AppState>,
    query: web::Query<JobSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let profile = match query.profile_id {
        Some(profile_id) => Some(
            state
                .postgres
                .get_profile(profile_id)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", profile_id)))?,
        ),
        None => None,
    };

    let filter = DistanceFilter::from_params(
        query.location_params(),
        profile.as_ref().and_then(|p| p.point()),
        profile.as_ref().and_then(|p| p.commute_radius_miles),
    );

    let criteria = query.criteria();
    let jobs: Vec<Job> = state
        .postgres
        .list_jobs(true, filter.bounding_box())
        .await?
        .into_iter()
        .filter(|job| matches_job_criteria(job, &criteria))
        .collect();

    let jobs = filter.apply(jobs);

    tracing::debug!(
        "Job search returned {} jobs (distance filter active: {})",
        jobs.len(),
        filter.is_active()
    );

    Ok(HttpResponse::Ok().json(JobListResponse {
        total_results: jobs.len(),
        distance_applied: filter.is_active(),
        jobs,
    }))
}

async fn get_job(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let job_id = path.into_inner();
    let job = find_job(&state, job_id).await?;
    Ok(HttpResponse::Ok().json(job))
}

/// Create a job posting
///
/// POST /api/v1/jobs
async fn create_job(
    state: web::Data<AppState>,
    req: web::Json<JobRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_job_request(&req)?;
    state.require_user(req.recruiter_id, Role::Recruiter).await?;

    let point = state.locate(&req.location, req.latitude, req.longitude).await;
    let job = state.postgres.create_job(&req, point).await?;

    state.invalidate_after_write().await;

    Ok(HttpResponse::Created().json(job))
}

/// Edit a job posting; only its creator may do so
///
/// PUT /api/v1/jobs/{id}
async fn update_job(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<JobRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_job_request(&req)?;
    state.require_user(req.recruiter_id, Role::Recruiter).await?;

    let job_id = path.into_inner();
    let point = state.locate(&req.location, req.latitude, req.longitude).await;

    match state.postgres.update_job(job_id, &req, point).await? {
        Some(job) => {
            state.invalidate_after_write().await;
            Ok(HttpResponse::Ok().json(job))
        }
        None => {
            // Distinguish "missing" from "someone else's"
            find_job(&state, job_id).await?;
            Err(ApiError::Forbidden(format!(
                "Job {} does not belong to recruiter {}",
                job_id, req.recruiter_id
            )))
        }
    }
}

/// Apply to a job
///
/// POST /api/v1/jobs/{id}/apply
async fn apply(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<ApplyRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    state.require_user(req.applicant_id, Role::Seeker).await?;

    let job = find_job(&state, path.into_inner()).await?;
    if !job.approved {
        return Err(ApiError::NotFound(format!("Job {} not found", job.id)));
    }

    let application = state
        .postgres
        .create_application(job.id, req.applicant_id, req.note.trim())
        .await?;

    tracing::info!("User {} applied to job {}", req.applicant_id, job.id);

    Ok(HttpResponse::Created().json(application))
}

/// Applications on a recruiter's own job
///
/// GET /api/v1/jobs/{id}/applications?recruiterId=
async fn list_applications(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<RecruiterQuery>,
) -> Result<HttpResponse, ApiError> {
    state.require_user(query.recruiter_id, Role::Recruiter).await?;

    let job = find_job(&state, path.into_inner()).await?;
    if job.created_by != query.recruiter_id {
        return Err(ApiError::Forbidden(format!(
            "Job {} does not belong to recruiter {}",
            job.id, query.recruiter_id
        )));
    }

    let applications = state.postgres.list_applications(job.id).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// Recruiter dashboard: own postings, newest first
///
/// GET /api/v1/recruiters/{id}/jobs
async fn recruiter_dashboard(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let recruiter_id = path.into_inner();
    state.require_user(recruiter_id, Role::Recruiter).await?;

    let jobs = state.postgres.jobs_by_recruiter(recruiter_id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

pub(crate) async fn find_job(state: &AppState, job_id: i64) -> Result<Job, ApiError> {
    state
        .postgres
        .get_job(job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Job {} not found", job_id)))
}

fn validate_job_request(req: &JobRequest) -> Result<(), ApiError> {
    req.validate()?;

    if let (Some(min), Some(max)) = (req.min_salary, req.max_salary) {
        if min > max {
            return Err(ApiError::Validation(
                "minSalary must not exceed maxSalary".to_string(),
            ));
        }
    }

    if req.latitude.is_some() != req.longitude.is_some() {
        return Err(ApiError::Validation(
            "latitude and longitude must be given together".to_string(),
        ));
    }

    Ok(())
}
