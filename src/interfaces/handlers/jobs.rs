use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::job::CreateJobRequest,
    errors::AppError,
    pagination::PaginationOptions,
    search::JobFilters,
    use_cases::extractors::{EmployerClaims, ValidatedJson},
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn create_job(
    claims: EmployerClaims,
    state: web::Data<AppState>,
    data: ValidatedJson<CreateJobRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;

    let response = state.job_handler.create_job(data.into_inner(), &user_id).await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(claims, state))]
pub async fn delete_job(
    claims: EmployerClaims,
    job_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;

    let deleted = state.job_handler.delete_job(&job_id, &user_id).await?;

    Ok(HttpResponse::Ok().json(deleted))
}

#[instrument(skip(claims, state, options))]
pub async fn get_my_posted_jobs(
    claims: EmployerClaims,
    state: web::Data<AppState>,
    options: web::Query<PaginationOptions>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.claims().user_id()?;

    let jobs = state.job_handler.get_my_posted_jobs(&user_id, &options).await?;

    Ok(HttpResponse::Ok().json(jobs))
}

#[instrument(skip(state))]
pub async fn get_single_job(
    job_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let job = state.job_handler.get_single_job(&job_id).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[instrument(skip(state, filters, options))]
pub async fn get_all_jobs(
    state: web::Data<AppState>,
    filters: web::Query<JobFilters>,
    options: web::Query<PaginationOptions>,
) -> Result<impl Responder, AppError> {
    let jobs = state.job_handler.get_all_jobs(&filters, &options).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[instrument(skip(state, filters))]
pub async fn get_jobs_count(
    state: web::Data<AppState>,
    filters: web::Query<JobFilters>,
) -> Result<impl Responder, AppError> {
    let count = state.job_handler.get_jobs_count(&filters).await?;
    Ok(HttpResponse::Ok().json(count))
}
