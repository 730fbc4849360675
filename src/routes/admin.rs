use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::models::{AdminActionRequest, AdminActionResponse};
use crate::routes::{ApiError, AppState};
use crate::services::{PostgresClient, PostgresError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/actions", web::get().to(list_actions))
        .route("/admin/jobs/actions", web::post().to(run_job_action));
}

/// What a moderation action does to the selected jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobModeration {
    Approve,
    Reject,
}

/// A named bulk action over job postings
#[derive(Debug, Clone, Serialize)]
pub struct AdminAction {
    pub name: &'static str,
    pub description: &'static str,
    pub effect: JobModeration,
}

impl AdminAction {
    pub const fn new(name: &'static str, description: &'static str, effect: JobModeration) -> Self {
        Self {
            name,
            description,
            effect,
        }
    }

    /// Apply the action; returns the number of jobs updated
    pub async fn run(&self, postgres: &PostgresClient, job_ids: &[i64]) -> Result<u64, PostgresError> {
        let approved = self.effect == JobModeration::Approve;
        postgres.set_jobs_approved(job_ids, approved).await
    }
}

/// Admin actions known to the server.
///
/// Built once in `main` and shared through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    actions: Vec<AdminAction>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the job moderation pair installed
    pub fn with_job_moderation() -> Self {
        let mut registry = Self::new();
        registry.register(AdminAction::new(
            "approve_posts",
            "Approve selected job posts",
            JobModeration::Approve,
        ));
        registry.register(AdminAction::new(
            "reject_posts",
            "Reject selected job posts",
            JobModeration::Reject,
        ));
        registry
    }

    /// Add an action, replacing any previous one with the same name
    pub fn register(&mut self, action: AdminAction) {
        self.actions.retain(|existing| existing.name != action.name);
        tracing::info!("Registered admin action: {}", action.name);
        self.actions.push(action);
    }

    pub fn get(&self, name: &str) -> Option<&AdminAction> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn list(&self) -> &[AdminAction] {
        &self.actions
    }
}

async fn list_actions(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.admin.list())
}

/// Run a bulk action over job postings
///
/// POST /api/v1/admin/jobs/actions
///
/// Request body:
/// ```json
/// { "action": "approve_posts", "jobIds": [1, 2, 3] }
/// ```
async fn run_job_action(
    state: web::Data<AppState>,
    req: web::Json<AdminActionRequest>,
) -> Result<HttpResponse, ApiError> {
    let action = state
        .admin
        .get(req.action.trim())
        .ok_or_else(|| ApiError::Validation(format!("Unknown admin action: {}", req.action)))?;

    if req.job_ids.is_empty() {
        return Err(ApiError::Validation("jobIds must not be empty".to_string()));
    }

    let updated = action.run(&state.postgres, &req.job_ids).await?;

    tracing::info!(
        "Admin action {} updated {} of {} jobs",
        action.name,
        updated,
        req.job_ids.len()
    );

    state.invalidate_after_write().await;

    Ok(HttpResponse::Ok().json(AdminActionResponse {
        action: action.name.to_string(),
        updated,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_moderation_registered() {
        let registry = AdminRegistry::with_job_moderation();

        let names: Vec<&str> = registry.list().iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["approve_posts", "reject_posts"]);

        assert_eq!(
            registry.get("approve_posts").map(|a| a.effect),
            Some(JobModeration::Approve)
        );
        assert_eq!(
            registry.get("reject_posts").map(|a| a.effect),
            Some(JobModeration::Reject)
        );
        assert!(registry.get("delete_everything").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = AdminRegistry::with_job_moderation();
        registry.register(AdminAction::new(
            "approve_posts",
            "Approve again",
            JobModeration::Approve,
        ));

        assert_eq!(registry.list().len(), 2);
        assert_eq!(
            registry.get("approve_posts").map(|a| a.description),
            Some("Approve again")
        );
    }

    #[test]
    fn test_empty_registry() {
        assert!(AdminRegistry::new().list().is_empty());
    }

    #[test]
    fn test_action_serialization() {
        let action = AdminAction::new("reject_posts", "Reject selected job posts", JobModeration::Reject);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["name"], "reject_posts");
        assert_eq!(json["effect"], "reject");
    }
}
