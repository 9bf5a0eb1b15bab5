use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, repositories::token::TokenService, AppState};

/// Decodes the bearer token of every non-public request and stores its
/// `Claims` in the request extensions. Role checks happen in the extractors.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method()) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), error = %e, "Rejected unauthenticated request");
                    return Ok(custom_error_response(req, e.error_response()));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &Method) -> bool {
    if *method == Method::OPTIONS {
        return true;
    }

    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if *method == Method::GET {
        matches!(
            path,
            "/" | "/api/v1/health"
                | "/api/v1/jobs/get-all"
                | "/api/v1/jobs/count"
                | "/api/v1/industry"
                | "/api/v1/department"
        ) || path.starts_with("/api/v1/jobs/get-single/")
            || path.starts_with("/api/v1/industry/")
            || path.starts_with("/api/v1/department/")
    } else if *method == Method::POST {
        matches!(path, "/api/v1/auth/login" | "/api/v1/auth/register")
    } else {
        false
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState missing in middleware");
        AuthError::MissingJwtService
    })?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_reads_skip_authentication() {
        assert!(is_public_route("/", &Method::GET));
        assert!(is_public_route("/api/v1/jobs/get-all", &Method::GET));
        assert!(is_public_route("/api/v1/jobs/count/", &Method::GET));
        assert!(is_public_route("/api/v1/jobs/get-single/abc", &Method::GET));
        assert!(is_public_route("/api/v1/department/abc", &Method::GET));
        assert!(is_public_route("/api/v1/auth/login", &Method::POST));
        assert!(is_public_route("/api/v1/jobs/create-job", &Method::OPTIONS));
    }

    #[test]
    fn writes_and_private_reads_need_a_token() {
        assert!(!is_public_route("/api/v1/jobs/create-job", &Method::POST));
        assert!(!is_public_route("/api/v1/jobs/me/all", &Method::GET));
        assert!(!is_public_route("/api/v1/jobs/get-all", &Method::DELETE));
        assert!(!is_public_route("/api/v1/industry", &Method::POST));
        assert!(!is_public_route("/api/v1/auth/me", &Method::GET));
        assert!(!is_public_route("/api/v1/candidates/me", &Method::GET));
        assert!(!is_public_route("/api/v1/candidates/me", &Method::PATCH));
        assert!(!is_public_route("/api/v1/industries", &Method::GET));
    }
}
