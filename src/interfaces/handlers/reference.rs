use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::reference::{NewReferenceRequest, ReferenceKind},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

/// Handlers shared by `/industry` and `/department`; the route picks the kind.
#[instrument(skip(_claims, kind, state, data))]
pub async fn create_reference(
    _claims: AdminClaims,
    kind: web::Data<ReferenceKind>,
    state: web::Data<AppState>,
    data: web::Json<NewReferenceRequest>,
) -> Result<impl Responder, AppError> {
    let item = state.reference_handler.create(*kind.get_ref(), data.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

#[instrument(skip(kind, state))]
pub async fn list_references(
    kind: web::Data<ReferenceKind>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let items = state.reference_handler.list(*kind.get_ref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[instrument(skip(kind, state))]
pub async fn get_reference(
    kind: web::Data<ReferenceKind>,
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let item = state.reference_handler.get_by_id(*kind.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(item))
}
