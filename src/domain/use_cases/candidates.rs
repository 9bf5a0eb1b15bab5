use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::candidate::{Candidate, CandidateUpdate, CreateCandidateRequest, UpdateCandidateRequest},
    errors::AppError,
    repositories::candidate::CandidateRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct CandidateHandler<R>
where
    R: CandidateRepository + ?Sized,
{
    pub candidate_repo: Arc<R>,
}

impl<R> CandidateHandler<R>
where
    R: CandidateRepository + ?Sized,
{
    pub fn new(candidate_repo: Arc<R>) -> Self {
        CandidateHandler { candidate_repo }
    }

    /// Creates the caller's profile. Each candidate account owns at most one.
    pub async fn create_profile(
        &self,
        user_id: &Uuid,
        request: CreateCandidateRequest,
    ) -> Result<Candidate, AppError> {
        if self.candidate_repo.find_candidate_by_user(user_id).await?.is_some() {
            return Err(AppError::Conflict("Candidate profile already exists".to_string()));
        }

        let candidate = self
            .candidate_repo
            .create_candidate(&request.into_insert(*user_id))
            .await?;

        tracing::info!(candidate_id = %candidate.id, user_id = %user_id, "Candidate profile created");
        Ok(candidate)
    }

    pub async fn get_my_profile(&self, user_id: &Uuid) -> Result<Candidate, AppError> {
        self.candidate_repo
            .find_candidate_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate profile not found".to_string()))
    }

    pub async fn update_my_profile(
        &self,
        user_id: &Uuid,
        request: UpdateCandidateRequest,
    ) -> Result<Candidate, AppError> {
        let changes = CandidateUpdate::from(request);

        match self.candidate_repo.update_candidate(user_id, &changes).await? {
            Some(candidate) => {
                tracing::info!(candidate_id = %candidate.id, "Candidate profile updated");
                Ok(candidate)
            }
            None => Err(AppError::NotFound("Candidate profile not found".to_string())),
        }
    }

    pub async fn get_profile(&self, candidate_id: &str) -> Result<Candidate, AppError> {
        let candidate_id = valid_uuid(candidate_id)?;

        self.candidate_repo
            .get_candidate_by_id(&candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate profile not found".to_string()))
    }
}
