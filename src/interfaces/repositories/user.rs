use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::user::{User, UserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    /// Inserts the user and, for employers, their company in one transaction.
    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        if let Some(company_name) = &user.company_name {
            sqlx::query("INSERT INTO companies (user_id, company_name) VALUES ($1, $2)")
                .bind(id)
                .bind(company_name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(id)
    }
}
