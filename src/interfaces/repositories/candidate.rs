use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::candidate::{Candidate, CandidateInsert, CandidateUpdate},
    errors::AppError,
    repositories::sqlx_repo::SqlxCandidateRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn find_candidate_by_user(&self, user_id: &Uuid) -> Result<Option<Candidate>, AppError>;
    async fn get_candidate_by_id(&self, id: &Uuid) -> Result<Option<Candidate>, AppError>;
    async fn create_candidate(&self, candidate: &CandidateInsert) -> Result<Candidate, AppError>;
    /// Applies the provided fields to the profile owned by `user_id`.
    async fn update_candidate(
        &self,
        user_id: &Uuid,
        changes: &CandidateUpdate,
    ) -> Result<Option<Candidate>, AppError>;
}

impl SqlxCandidateRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCandidateRepo { pool }
    }
}

#[async_trait]
impl CandidateRepository for SqlxCandidateRepo {
    async fn find_candidate_by_user(&self, user_id: &Uuid) -> Result<Option<Candidate>, AppError> {
        let candidate = sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(candidate)
    }

    async fn get_candidate_by_id(&self, id: &Uuid) -> Result<Option<Candidate>, AppError> {
        sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_candidate(&self, candidate: &CandidateInsert) -> Result<Candidate, AppError> {
        sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (
                user_id, full_name, phone, headline, bio, location,
                experience_in_months, expected_salary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(candidate.user_id)
        .bind(&candidate.full_name)
        .bind(&candidate.phone)
        .bind(&candidate.headline)
        .bind(&candidate.bio)
        .bind(&candidate.location)
        .bind(candidate.experience_in_months)
        .bind(candidate.expected_salary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Candidate profile already exists".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn update_candidate(
        &self,
        user_id: &Uuid,
        changes: &CandidateUpdate,
    ) -> Result<Option<Candidate>, AppError> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                headline = COALESCE($4, headline),
                bio = COALESCE($5, bio),
                location = COALESCE($6, location),
                experience_in_months = COALESCE($7, experience_in_months),
                expected_salary = COALESCE($8, expected_salary),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&changes.full_name)
        .bind(&changes.phone)
        .bind(&changes.headline)
        .bind(&changes.bio)
        .bind(&changes.location)
        .bind(changes.experience_in_months)
        .bind(changes.expected_salary)
        .fetch_optional(&self.pool)
        .await?;

        Ok(candidate)
    }
}
