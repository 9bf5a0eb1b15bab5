use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::reference::{ReferenceItem, ReferenceKind},
    errors::AppError,
    repositories::sqlx_repo::SqlxReferenceRepo,
};

/// Industries and departments share one table shape, so one repository serves both.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn create_reference(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceItem, AppError>;
    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, AppError>;
    async fn get_reference_by_id(&self, kind: ReferenceKind, id: &Uuid) -> Result<Option<ReferenceItem>, AppError>;
}

impl SqlxReferenceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxReferenceRepo { pool }
    }
}

#[async_trait]
impl ReferenceRepository for SqlxReferenceRepo {
    async fn create_reference(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceItem, AppError> {
        // Table names come from a closed enum, never from input.
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name, created_at",
            kind.table()
        );

        sqlx::query_as::<_, ReferenceItem>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict(format!("{} '{}' already exists", kind, name))
                }
                _ => AppError::from(e),
            })
    }

    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, AppError> {
        let sql = format!("SELECT id, name, created_at FROM {} ORDER BY name ASC", kind.table());

        let items = sqlx::query_as::<_, ReferenceItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn get_reference_by_id(&self, kind: ReferenceKind, id: &Uuid) -> Result<Option<ReferenceItem>, AppError> {
        let sql = format!("SELECT id, name, created_at FROM {} WHERE id = $1", kind.table());

        sqlx::query_as::<_, ReferenceItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
