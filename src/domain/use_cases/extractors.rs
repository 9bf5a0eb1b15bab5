use std::marker::PhantomData;

use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    entities::{token::Claims, user::Role},
    errors::{AppError, AuthError},
};

/// Extractor for authenticated claims, ensuring the user is authenticated.
/// Returns 401 if the user is not authenticated.
/// Usage: Add `claims: AuthClaims` as a parameter to your handler function.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Fails with `Forbidden` unless the claims carry exactly `role`.
pub fn require_role(claims: &Claims, role: Role) -> Result<(), AuthError> {
    if claims.role == role {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!("{} role required", role)))
    }
}

pub trait RequiredRole {
    const ROLE: Role;
}

#[derive(Debug)]
pub struct EmployerRole;

impl RequiredRole for EmployerRole {
    const ROLE: Role = Role::Employer;
}

#[derive(Debug)]
pub struct AdminRole;

impl RequiredRole for AdminRole {
    const ROLE: Role = Role::Admin;
}

#[derive(Debug)]
pub struct CandidateRole;

impl RequiredRole for CandidateRole {
    const ROLE: Role = Role::Candidate;
}

/// Extractor for claims holding a specific role.
/// Returns 401 if the user is not authenticated and 403 on any other role.
///
/// List it before body extractors so a wrong role is rejected before the
/// payload is read.
#[derive(Debug)]
pub struct RoleClaims<R: RequiredRole>(pub Claims, PhantomData<R>);

impl<R: RequiredRole> RoleClaims<R> {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

pub type EmployerClaims = RoleClaims<EmployerRole>;
pub type AdminClaims = RoleClaims<AdminRole>;
pub type CandidateClaims = RoleClaims<CandidateRole>;

impl<R: RequiredRole> FromRequest for RoleClaims<R> {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let outcome = match req.extensions().get::<Claims>() {
            Some(claims) => require_role(claims, R::ROLE)
                .map(|_| RoleClaims(claims.clone(), PhantomData)),
            None => Err(AuthError::MissingCredentials),
        };
        ready(outcome.map_err(Into::into))
    }
}

/// JSON body that has passed its `validator` rules.
/// Malformed JSON is rejected by the app's `JsonConfig`; rule violations become
/// `AppError::ValidationError`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let json = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let value = json.await?.into_inner();
            value.validate().map_err(AppError::from)?;
            Ok(ValidatedJson(value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn claims(role: Role) -> Claims {
        Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "someone@jobs.test".into(),
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn require_role_is_an_exact_match() {
        assert!(require_role(&claims(Role::Employer), Role::Employer).is_ok());
        assert!(matches!(
            require_role(&claims(Role::Admin), Role::Employer),
            Err(AuthError::Forbidden(_))
        ));
    }

    #[actix_rt::test]
    async fn role_claims_reject_other_roles() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims(Role::Candidate));

        let err = EmployerClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 403);
    }

    #[actix_rt::test]
    async fn candidate_claims_turn_away_employers() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims(Role::Employer));

        let err = CandidateClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 403);
    }

    #[actix_rt::test]
    async fn role_claims_require_authentication() {
        let req = TestRequest::default().to_http_request();

        let err = AdminClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 401);
    }

    #[actix_rt::test]
    async fn role_claims_pass_matching_role() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims(Role::Admin));

        let extracted = AdminClaims::extract(&req).await.unwrap();
        assert_eq!(extracted.claims().role, Role::Admin);
    }
}
