use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::user::{LoginUser, NewUser};
use crate::errors::{AppError, AuthError};
use crate::use_cases::extractors::{AuthClaims, ValidatedJson};
use crate::AppState;

#[instrument(skip(state, user))]
pub async fn register(
    state: web::Data<AppState>,
    user: ValidatedJson<NewUser>,
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(user.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, user))]
pub async fn login(
    state: web::Data<AppState>,
    user: ValidatedJson<LoginUser>,
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.login(user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(auth_response))
}

#[instrument(skip(claims, state))]
pub async fn me(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.me(&claims.0).await?;
    Ok(HttpResponse::Ok().json(user))
}
