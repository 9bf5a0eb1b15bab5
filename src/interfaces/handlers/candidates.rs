use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::candidate::{CreateCandidateRequest, UpdateCandidateRequest},
    errors::AppError,
    use_cases::extractors::{AuthClaims, CandidateClaims, ValidatedJson},
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn create_profile(
    claims: CandidateClaims,
    state: web::Data<AppState>,
    data: ValidatedJson<CreateCandidateRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;

    let candidate = state.candidate_handler.create_profile(&user_id, data.into_inner()).await?;

    Ok(HttpResponse::Created().json(candidate))
}

#[instrument(skip(claims, state))]
pub async fn get_my_profile(
    claims: CandidateClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;
    let candidate = state.candidate_handler.get_my_profile(&user_id).await?;
    Ok(HttpResponse::Ok().json(candidate))
}

#[instrument(skip(claims, state, data))]
pub async fn update_my_profile(
    claims: CandidateClaims,
    state: web::Data<AppState>,
    data: ValidatedJson<UpdateCandidateRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;

    let candidate = state.candidate_handler.update_my_profile(&user_id, data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(candidate))
}

/// Any signed-in account may read a profile by id.
#[instrument(skip(_claims, state))]
pub async fn get_profile(
    _claims: AuthClaims,
    candidate_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let candidate = state.candidate_handler.get_profile(&candidate_id).await?;
    Ok(HttpResponse::Ok().json(candidate))
}
