use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::token::{AuthResponse, Claims};
use crate::entities::user::{LoginUser, NewUser, NewUserResponse, PublicUser, User};
use crate::errors::{AppError, AuthError};
use crate::repositories::token::TokenService;
use crate::repositories::user::UserRepository;
use crate::settings::PasswordHashConfig;

pub struct AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenService,
{
    pub user_repo: Arc<R>,
    pub token_service: T,
    hash_config: PasswordHashConfig,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenService,
{
    pub fn new(user_repo: Arc<R>, token_service: T, hash_config: PasswordHashConfig) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            hash_config,
        }
    }

    /// Registers a user; employers get their company row in the same transaction.
    /// The request is expected to have passed validation already.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        let hashed_password = hash_password(&request.password, self.hash_config).await?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let id = self.user_repo.create_user(&user_insert).await.map_err(|e| {
            tracing::warn!(error = %e, role = %user_insert.role, "Registration failed");
            e
        })?;

        tracing::info!(user_id = %id, role = %user_insert.role, "User registered");
        Ok(NewUserResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    /// Checks credentials and issues an access token
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        let user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "User lookup failed during login");
                AuthError::WrongCredentials
            })?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)?;
        Ok(AuthResponse::new(access_token, self.token_service.expires_in()))
    }

    /// Public profile of the token holder
    pub async fn me(&self, claims: &Claims) -> Result<PublicUser, AppError> {
        let user_id = claims.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

        self.user_repo
            .get_user_by_id(&user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
