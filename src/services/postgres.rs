use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;
use crate::models::{
    Application, BoundingBox, CandidateCriteria, GeoPoint, Job, JobRequest, Profile,
    ProfileRequest, Role, SavedSearch, SearchNotification, Skill, User,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Database representation of a user's role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Seeker,
    Recruiter,
}

impl From<Role> for UserRole {
    fn from(value: Role) -> Self {
        match value {
            Role::Seeker => UserRole::Seeker,
            Role::Recruiter => UserRole::Recruiter,
        }
    }
}

impl From<UserRole> for Role {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Seeker => Role::Seeker,
            UserRole::Recruiter => Role::Recruiter,
        }
    }
}

const JOB_COLUMNS: &str = r#"
    id, title, description, location, latitude, longitude, min_salary, max_salary,
    remote, visa_sponsorship, approved, created_by, created_at
"#;

const PROFILE_COLUMNS: &str = r#"
    p.id, p.user_id, u.username, p.headline, p.education, p.work_experience, p.links,
    p.location, p.latitude, p.longitude, p.commute_radius_miles, p.visible, p.updated_at
"#;

/// PostgreSQL client for the job board
///
/// Owns the connection pool and runs migrations on startup. Skill sets are
/// loaded with a second query per batch and attached to their rows.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    // ---- users ----

    /// Register a user. Seekers get an empty profile in the same transaction.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        role: Role,
    ) -> Result<User, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT 1 FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(PostgresError::InvalidInput(format!(
                "Username {} is already taken",
                username
            )));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, role
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(UserRole::from(role))
        .fetch_one(&mut *tx)
        .await?;

        let user = user_from_row(&row);

        if user.role == Role::Seeker {
            sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Registered {} {} (id {})", user.role.as_str(), user.username, user.id);

        Ok(user)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, PostgresError> {
        let row = sqlx::query("SELECT id, username, email, role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    // ---- skills ----

    pub async fn list_skills(&self) -> Result<Vec<Skill>, PostgresError> {
        let rows = sqlx::query("SELECT id, name FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(skill_from_row).collect())
    }

    /// Resolve skill names to rows, creating the unknown ones
    async fn ensure_skills(
        tx: &mut Transaction<'_, Postgres>,
        names: &[String],
    ) -> Result<Vec<Skill>, PostgresError> {
        let mut skills: Vec<Skill> = Vec::with_capacity(names.len());

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let row = sqlx::query(
                r#"
                INSERT INTO skills (name) VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id, name
                "#,
            )
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

            let skill = skill_from_row(&row);
            if !skills.iter().any(|s| s.id == skill.id) {
                skills.push(skill);
            }
        }

        Ok(skills)
    }

    // ---- jobs ----

    /// List jobs, newest first.
    ///
    /// The optional bounding box is a coarse pre-filter; remote jobs and jobs
    /// without coordinates always come back.
    pub async fn list_jobs(
        &self,
        approved_only: bool,
        bbox: Option<BoundingBox>,
    ) -> Result<Vec<Job>, PostgresError> {
        // Boxes wrapping the antimeridian are not worth a special case
        let bbox = bbox.filter(|b| b.min_lon >= -180.0 && b.max_lon <= 180.0);

        let query = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE ($1 = FALSE OR approved)
              AND ($2::DOUBLE PRECISION IS NULL
                   OR remote
                   OR latitude IS NULL
                   OR longitude IS NULL
                   OR (latitude BETWEEN $2 AND $3 AND longitude BETWEEN $4 AND $5))
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query(&query)
            .bind(approved_only)
            .bind(bbox.map(|b| b.min_lat))
            .bind(bbox.map(|b| b.max_lat))
            .bind(bbox.map(|b| b.min_lon))
            .bind(bbox.map(|b| b.max_lon))
            .fetch_all(&self.pool)
            .await?;

        let jobs = self.attach_job_skills(rows.iter().map(job_from_row).collect()).await?;

        tracing::debug!("Loaded {} jobs (bbox: {})", jobs.len(), bbox.is_some());

        Ok(jobs)
    }

    pub async fn get_job(&self, job_id: i64) -> Result<Option<Job>, PostgresError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.attach_job_skills(vec![job_from_row(&row)]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Recruiter dashboard: own postings, newest first
    pub async fn jobs_by_recruiter(&self, recruiter_id: i64) -> Result<Vec<Job>, PostgresError> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE created_by = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query(&query)
            .bind(recruiter_id)
            .fetch_all(&self.pool)
            .await?;

        self.attach_job_skills(rows.iter().map(job_from_row).collect()).await
    }

    pub async fn create_job(
        &self,
        request: &JobRequest,
        point: Option<GeoPoint>,
    ) -> Result<Job, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO jobs (title, description, location, latitude, longitude, min_salary,
                              max_salary, remote, visa_sponsorship, approved, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {JOB_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.location)
            .bind(point.map(|p| p.latitude))
            .bind(point.map(|p| p.longitude))
            .bind(request.min_salary)
            .bind(request.max_salary)
            .bind(request.remote)
            .bind(request.visa_sponsorship)
            .bind(request.approved)
            .bind(request.recruiter_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut job = job_from_row(&row);
        job.skills = Self::replace_skills(&mut tx, SkillLink::Job, job.id, &request.skills).await?;

        tx.commit().await?;

        tracing::info!("Recruiter {} created job {} ({})", job.created_by, job.id, job.title);

        Ok(job)
    }

    /// Edit a job owned by `request.recruiter_id`; `None` when there is no such job
    pub async fn update_job(
        &self,
        job_id: i64,
        request: &JobRequest,
        point: Option<GeoPoint>,
    ) -> Result<Option<Job>, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            UPDATE jobs SET
                title = $3, description = $4, location = $5, latitude = $6, longitude = $7,
                min_salary = $8, max_salary = $9, remote = $10, visa_sponsorship = $11,
                approved = $12
            WHERE id = $1 AND created_by = $2
            RETURNING {JOB_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(job_id)
            .bind(request.recruiter_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.location)
            .bind(point.map(|p| p.latitude))
            .bind(point.map(|p| p.longitude))
            .bind(request.min_salary)
            .bind(request.max_salary)
            .bind(request.remote)
            .bind(request.visa_sponsorship)
            .bind(request.approved)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut job = job_from_row(&row);
        job.skills = Self::replace_skills(&mut tx, SkillLink::Job, job.id, &request.skills).await?;

        tx.commit().await?;

        Ok(Some(job))
    }

    /// Moderation: flip the approved flag on a batch of jobs
    pub async fn set_jobs_approved(&self, job_ids: &[i64], approved: bool) -> Result<u64, PostgresError> {
        let result = sqlx::query("UPDATE jobs SET approved = $2 WHERE id = ANY($1)")
            .bind(job_ids)
            .bind(approved)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn attach_job_skills(&self, mut jobs: Vec<Job>) -> Result<Vec<Job>, PostgresError> {
        let ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        let mut skills = self.load_skills(SkillLink::Job, &ids).await?;

        for job in &mut jobs {
            job.skills = skills.remove(&job.id).unwrap_or_default();
        }

        Ok(jobs)
    }

    // ---- profiles ----

    pub async fn get_profile(&self, profile_id: i64) -> Result<Option<Profile>, PostgresError> {
        self.find_profile("p.id = $1", profile_id).await
    }

    pub async fn get_profile_by_user(&self, user_id: i64) -> Result<Option<Profile>, PostgresError> {
        self.find_profile("p.user_id = $1", user_id).await
    }

    async fn find_profile(&self, condition: &str, value: i64) -> Result<Option<Profile>, PostgresError> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles p JOIN users u ON u.id = p.user_id WHERE {condition}"
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.attach_profile_skills(vec![profile_from_row(&row)]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Visible seeker profiles, ordered by username
    pub async fn list_visible_profiles(&self) -> Result<Vec<Profile>, PostgresError> {
        let query = format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE u.role = 'seeker' AND p.visible
            ORDER BY u.username
            "#
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        self.attach_profile_skills(rows.iter().map(profile_from_row).collect()).await
    }

    /// Create or replace a seeker's profile
    pub async fn upsert_profile(
        &self,
        user_id: i64,
        request: &ProfileRequest,
        point: Option<GeoPoint>,
    ) -> Result<Profile, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO profiles (user_id, headline, education, work_experience, links, location,
                                  latitude, longitude, commute_radius_miles, visible, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                headline = EXCLUDED.headline,
                education = EXCLUDED.education,
                work_experience = EXCLUDED.work_experience,
                links = EXCLUDED.links,
                location = EXCLUDED.location,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                commute_radius_miles = EXCLUDED.commute_radius_miles,
                visible = EXCLUDED.visible,
                updated_at = EXCLUDED.updated_at
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&request.headline)
        .bind(&request.education)
        .bind(&request.work_experience)
        .bind(&request.links)
        .bind(&request.location)
        .bind(point.map(|p| p.latitude))
        .bind(point.map(|p| p.longitude))
        .bind(request.commute_radius_miles)
        .bind(request.visible)
        .fetch_one(&mut *tx)
        .await?;

        let profile_id: i64 = row.get("id");
        Self::replace_skills(&mut tx, SkillLink::Profile, profile_id, &request.skills).await?;

        tx.commit().await?;

        self.get_profile(profile_id)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Profile {}", profile_id)))
    }

    async fn attach_profile_skills(&self, mut profiles: Vec<Profile>) -> Result<Vec<Profile>, PostgresError> {
        let ids: Vec<i64> = profiles.iter().map(|p| p.id).collect();
        let mut skills = self.load_skills(SkillLink::Profile, &ids).await?;

        for profile in &mut profiles {
            profile.skills = skills.remove(&profile.id).unwrap_or_default();
        }

        Ok(profiles)
    }

    // ---- skill links ----

    async fn load_skills(
        &self,
        link: SkillLink,
        owner_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Skill>>, PostgresError> {
        let mut by_owner: HashMap<i64, Vec<Skill>> = HashMap::new();
        if owner_ids.is_empty() {
            return Ok(by_owner);
        }

        let query = format!(
            r#"
            SELECT l.{owner} AS owner_id, s.id, s.name
            FROM {table} l
            JOIN skills s ON s.id = l.skill_id
            WHERE l.{owner} = ANY($1)
            ORDER BY s.name
            "#,
            owner = link.owner_column(),
            table = link.table(),
        );

        let rows = sqlx::query(&query)
            .bind(owner_ids)
            .fetch_all(&self.pool)
            .await?;

        for row in &rows {
            by_owner
                .entry(row.get("owner_id"))
                .or_default()
                .push(skill_from_row(row));
        }

        Ok(by_owner)
    }

    async fn replace_skills(
        tx: &mut Transaction<'_, Postgres>,
        link: SkillLink,
        owner_id: i64,
        names: &[String],
    ) -> Result<Vec<Skill>, PostgresError> {
        let skills = Self::ensure_skills(tx, names).await?;

        let delete = format!("DELETE FROM {} WHERE {} = $1", link.table(), link.owner_column());
        sqlx::query(&delete).bind(owner_id).execute(&mut **tx).await?;

        let insert = format!(
            "INSERT INTO {} ({}, skill_id) SELECT $1, UNNEST($2::BIGINT[])",
            link.table(),
            link.owner_column()
        );
        let skill_ids: Vec<i64> = skills.iter().map(|s| s.id).collect();
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(&skill_ids)
            .execute(&mut **tx)
            .await?;

        Ok(skills)
    }

    // ---- applications ----

    pub async fn create_application(
        &self,
        job_id: i64,
        applicant_id: i64,
        note: &str,
    ) -> Result<Application, PostgresError> {
        let row = sqlx::query(
            r#"
            INSERT INTO applications (job_id, applicant_id, note)
            VALUES ($1, $2, $3)
            RETURNING id, job_id, applicant_id, note, applied_at
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("User {} applied to job {}", applicant_id, job_id);

        Ok(application_from_row(&row))
    }

    pub async fn list_applications(&self, job_id: i64) -> Result<Vec<Application>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_id, applicant_id, note, applied_at
            FROM applications
            WHERE job_id = $1
            ORDER BY applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(application_from_row).collect())
    }

    // ---- saved searches ----

    pub async fn create_saved_search(
        &self,
        recruiter_id: i64,
        name: &str,
        criteria: &CandidateCriteria,
        notify_on_new_matches: bool,
    ) -> Result<SavedSearch, PostgresError> {
        let row = sqlx::query(
            r#"
            INSERT INTO saved_searches (recruiter_id, name, criteria, notify_on_new_matches)
            VALUES ($1, $2, $3, $4)
            RETURNING id, recruiter_id, name, criteria, is_active, notify_on_new_matches,
                      last_notified_at, created_at
            "#,
        )
        .bind(recruiter_id)
        .bind(name)
        .bind(Json(criteria))
        .bind(notify_on_new_matches)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved_search_from_row(&row))
    }

    pub async fn get_saved_search(&self, search_id: i64) -> Result<Option<SavedSearch>, PostgresError> {
        let row = sqlx::query(
            r#"
            SELECT id, recruiter_id, name, criteria, is_active, notify_on_new_matches,
                   last_notified_at, created_at
            FROM saved_searches
            WHERE id = $1
            "#,
        )
        .bind(search_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(saved_search_from_row))
    }

    pub async fn list_saved_searches(&self, recruiter_id: i64) -> Result<Vec<SavedSearch>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recruiter_id, name, criteria, is_active, notify_on_new_matches,
                   last_notified_at, created_at
            FROM saved_searches
            WHERE recruiter_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(saved_search_from_row).collect())
    }

    /// Active searches that want new-match notifications
    pub async fn list_watching_searches(&self) -> Result<Vec<SavedSearch>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recruiter_id, name, criteria, is_active, notify_on_new_matches,
                   last_notified_at, created_at
            FROM saved_searches
            WHERE is_active AND notify_on_new_matches
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(saved_search_from_row).collect())
    }

    // ---- notifications ----

    /// Store a notification and stamp the search's `last_notified_at`.
    ///
    /// `checked_at` is when the matching profiles were read, so that profiles
    /// saved after that moment still count as new on the next sweep.
    pub async fn create_notification(
        &self,
        search_id: i64,
        message: &str,
        checked_at: DateTime<Utc>,
    ) -> Result<SearchNotification, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO search_notifications (saved_search_id, message)
            VALUES ($1, $2)
            RETURNING id, saved_search_id, message, is_read, created_at
            "#,
        )
        .bind(search_id)
        .bind(message)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE saved_searches SET last_notified_at = $2 WHERE id = $1")
            .bind(search_id)
            .bind(checked_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(notification_from_row(&row))
    }

    pub async fn latest_notification_at(
        &self,
        search_id: i64,
    ) -> Result<Option<DateTime<Utc>>, PostgresError> {
        let row = sqlx::query(
            "SELECT MAX(created_at) AS latest FROM search_notifications WHERE saved_search_id = $1",
        )
        .bind(search_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("latest"))
    }

    pub async fn list_notifications(&self, search_id: i64) -> Result<Vec<SearchNotification>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, saved_search_id, message, is_read, created_at
            FROM search_notifications
            WHERE saved_search_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(search_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(notification_from_row).collect())
    }

    pub async fn get_notification(
        &self,
        notification_id: i64,
    ) -> Result<Option<SearchNotification>, PostgresError> {
        let row = sqlx::query(
            "SELECT id, saved_search_id, message, is_read, created_at FROM search_notifications WHERE id = $1",
        )
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(notification_from_row))
    }

    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<bool, PostgresError> {
        let result = sqlx::query("UPDATE search_notifications SET is_read = TRUE WHERE id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Which join table links skills to their owner
#[derive(Debug, Clone, Copy)]
enum SkillLink {
    Job,
    Profile,
}

impl SkillLink {
    fn table(&self) -> &'static str {
        match self {
            SkillLink::Job => "job_skills",
            SkillLink::Profile => "profile_skills",
        }
    }

    fn owner_column(&self) -> &'static str {
        match self {
            SkillLink::Job => "job_id",
            SkillLink::Profile => "profile_id",
        }
    }
}

fn user_from_row(row: &PgRow) -> User {
    let role: UserRole = row.get("role");
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        role: role.into(),
    }
}

fn skill_from_row(row: &PgRow) -> Skill {
    Skill {
        id: row.get("id"),
        name: row.get("name"),
    }
}

fn job_from_row(row: &PgRow) -> Job {
    Job {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        location: row.get("location"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        skills: Vec::new(),
        min_salary: row.get("min_salary"),
        max_salary: row.get("max_salary"),
        remote: row.get("remote"),
        visa_sponsorship: row.get("visa_sponsorship"),
        approved: row.get("approved"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }
}

fn profile_from_row(row: &PgRow) -> Profile {
    Profile {
        id: row.get("id"),
        user_id: row.get("user_id"),
        username: row.get("username"),
        headline: row.get("headline"),
        education: row.get("education"),
        work_experience: row.get("work_experience"),
        links: row.get("links"),
        location: row.get("location"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        skills: Vec::new(),
        commute_radius_miles: row.get("commute_radius_miles"),
        visible: row.get("visible"),
        updated_at: row.get("updated_at"),
    }
}

fn application_from_row(row: &PgRow) -> Application {
    Application {
        id: row.get("id"),
        job_id: row.get("job_id"),
        applicant_id: row.get("applicant_id"),
        note: row.get("note"),
        applied_at: row.get("applied_at"),
    }
}

fn saved_search_from_row(row: &PgRow) -> SavedSearch {
    let Json(criteria): Json<CandidateCriteria> = row.get("criteria");
    SavedSearch {
        id: row.get("id"),
        recruiter_id: row.get("recruiter_id"),
        name: row.get("name"),
        criteria,
        is_active: row.get("is_active"),
        notify_on_new_matches: row.get("notify_on_new_matches"),
        last_notified_at: row.get("last_notified_at"),
        created_at: row.get("created_at"),
    }
}

fn notification_from_row(row: &PgRow) -> SearchNotification {
    SearchNotification {
        id: row.get("id"),
        saved_search_id: row.get("saved_search_id"),
        message: row.get("message"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}
