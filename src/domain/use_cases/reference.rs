use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::reference::{NewReferenceRequest, ReferenceItem, ReferenceKind},
    errors::AppError,
    repositories::reference::ReferenceRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ReferenceHandler<R>
where
    R: ReferenceRepository + ?Sized,
{
    pub reference_repo: Arc<R>,
}

impl<R> ReferenceHandler<R>
where
    R: ReferenceRepository + ?Sized,
{
    pub fn new(reference_repo: Arc<R>) -> Self {
        ReferenceHandler { reference_repo }
    }

    /// Adds an industry or department. The name is trimmed before validation.
    pub async fn create(&self, kind: ReferenceKind, request: NewReferenceRequest) -> Result<ReferenceItem, AppError> {
        let request = NewReferenceRequest { name: request.name.trim().to_string() };
        request.validate()?;

        let item = self.reference_repo.create_reference(kind, &request.name).await?;

        tracing::info!(kind = %kind, id = %item.id, "Reference item created");
        Ok(item)
    }

    pub async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, AppError> {
        self.reference_repo.list_references(kind).await
    }

    pub async fn get_by_id(&self, kind: ReferenceKind, id: &str) -> Result<ReferenceItem, AppError> {
        let id = valid_uuid(id)?;

        self.reference_repo
            .get_reference_by_id(kind, &id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", kind)))
    }
}
