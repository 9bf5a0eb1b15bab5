
use actix_web::{http::StatusCode, test};
use chrono::Utc;
use job_board_backend::{
    auth::{jwt::JwtService, password::hash_password},
    entities::{reference::{ReferenceItem, ReferenceKind}, user::Role},
    errors::AppError,
    repositories::token::TokenService,
    settings::PasswordHashConfig,
};
use serde_json::{json, Value};
use uuid::Uuid;

use test_utils::*;

#[actix_rt::test]
async fn register_rejects_admin_self_signup() {
    let mut users = MockUserRepo::new();
    users.expect_create_user().never();
    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "root@jobs.test", "password": STRONG_PASSWORD, "role": "ADMIN" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn register_requires_company_for_employers() {
    let mut users = MockUserRepo::new();
    users.expect_create_user().never();
    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "hr@acme.test", "password": STRONG_PASSWORD, "role": "EMPLOYER" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_rt::test]
async fn register_hashes_password_before_storing() {
    let id = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users.expect_create_user()
        .withf(|insert| {
            insert.password_hash.starts_with("$argon2id$")
                && insert.email == "hr@acme.test"
                && insert.role == Role::Employer
                && insert.company_name.as_deref() == Some("Acme Ltd")
        })
        .times(1)
        .returning(move |_| Ok(id));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "HR@acme.test",
            "password": STRONG_PASSWORD,
            "role": "EMPLOYER",
            "companyName": "Acme Ltd"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id.to_string());
}

#[actix_rt::test]
async fn register_reports_duplicate_email_as_conflict() {
    let mut users = MockUserRepo::new();
    users.expect_create_user()
        .returning(|_| Err(AppError::Conflict("User with this email already exists".into())));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "dup@jobs.test", "password": STRONG_PASSWORD, "role": "CANDIDATE" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn login_returns_a_verifiable_token() {
    let mut user = user_with_role(Role::Employer);
    user.password_hash = hash_password(STRONG_PASSWORD, PasswordHashConfig::from(&test_config()))
        .await
        .unwrap();
    let user_id = user.id;

    let mut users = MockUserRepo::new();
    users.expect_get_user_by_email().returning(move |_| Ok(Some(user.clone())));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "employer@jobs.test", "password": STRONG_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 30 * 60);

    let token = body["accessToken"].as_str().unwrap();
    let claims = JwtService::new(&test_config()).decode_jwt(token).unwrap().claims;
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, Role::Employer);
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let mut user = user_with_role(Role::Candidate);
    user.password_hash = hash_password(STRONG_PASSWORD, PasswordHashConfig::from(&test_config()))
        .await
        .unwrap();

    let mut users = MockUserRepo::new();
    users.expect_get_user_by_email().returning(move |_| Ok(Some(user.clone())));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "candidate@jobs.test", "password": "Wr0ng!Guess#22" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn me_returns_public_profile() {
    let user = user_with_role(Role::Candidate);
    let header = bearer_for(&user);
    let user_id = user.id;

    let mut users = MockUserRepo::new();
    users.expect_get_user_by_id().returning(move |_| Ok(Some(user.clone())));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", header))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["role"], "CANDIDATE");
    assert!(body.get("passwordHash").is_none());
}

#[actix_rt::test]
async fn tampered_token_is_rejected() {
    let app = spawn_app(build_state(MockUserRepo::new(), MockJobRepo::new(), MockReferenceRepo::new())).await;

    let mut header = bearer_for(&user_with_role(Role::Employer));
    header.push('x');

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", header))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn only_admins_create_industries() {
    let mut references = MockReferenceRepo::new();
    references.expect_create_reference()
        .times(1)
        .returning(|_, name| {
            Ok(ReferenceItem { id: Uuid::new_v4(), name: name.to_string(), created_at: Utc::now() })
        });

    let app = spawn_app(build_state(MockUserRepo::new(), MockJobRepo::new(), references)).await;

    let as_employer = test::TestRequest::post()
        .uri("/api/v1/industry")
        .insert_header(("Authorization", bearer_for(&user_with_role(Role::Employer))))
        .set_json(json!({ "name": "Fintech" }))
        .to_request();
    assert_eq!(test::call_service(&app, as_employer).await.status(), StatusCode::FORBIDDEN);

    let as_admin = test::TestRequest::post()
        .uri("/api/v1/industry")
        .insert_header(("Authorization", bearer_for(&user_with_role(Role::Admin))))
        .set_json(json!({ "name": " Fintech " }))
        .to_request();
    let resp = test::call_service(&app, as_admin).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Fintech");
}

#[actix_rt::test]
async fn departments_are_publicly_listed() {
    let mut references = MockReferenceRepo::new();
    references.expect_list_references()
        .returning(|kind| {
            assert_eq!(kind.table(), "departments");
            Ok(vec![ReferenceItem { id: Uuid::new_v4(), name: "Engineering".into(), created_at: Utc::now() }])
        });

    let app = spawn_app(build_state(MockUserRepo::new(), MockJobRepo::new(), references)).await;

    let req = test::TestRequest::get().uri("/api/v1/department").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["name"], "Engineering");
}

#[actix_rt::test]
async fn single_industry_is_public_and_missing_ids_are_not_found() {
    let known = Uuid::new_v4();

    let mut references = MockReferenceRepo::new();
    references.expect_get_reference_by_id()
        .returning(move |kind, id| {
            assert_eq!(kind, ReferenceKind::Industry);
            Ok((*id == known).then(|| ReferenceItem {
                id: known,
                name: "Fintech".into(),
                created_at: Utc::now(),
            }))
        });

    let app = spawn_app(build_state(MockUserRepo::new(), MockJobRepo::new(), references)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/industry/{}", known))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Fintech");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/industry/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found: Industry not found");
}

#[actix_rt::test]
async fn plural_reference_paths_are_not_mounted() {
    let app = spawn_app(build_state(MockUserRepo::new(), MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/industries").to_request();
    let resp = test::call_service(&app, req).await;

    // Not on the public list, so the auth layer answers first.
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn health_reports_database_state() {
    let mut users = MockUserRepo::new();
    users.expect_check_connection().returning(|| Ok(()));

    let app = spawn_app(build_state(users, MockJobRepo::new(), MockReferenceRepo::new())).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "OK");
    assert_eq!(body["status"], "healthy");
}
