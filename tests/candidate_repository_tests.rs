//! Runs `SqlxCandidateRepo` against a real Postgres database.
//! Set `DATABASE_URL` to enable; without it each test returns early.

mod db_utils;

use db_utils::*;
use job_board_backend::{
    entities::candidate::{CandidateInsert, CandidateUpdate},
    errors::AppError,
    repositories::candidate::CandidateRepository,
};
use uuid::Uuid;

fn profile(user_id: Uuid) -> CandidateInsert {
    CandidateInsert {
        user_id,
        full_name: "Nadia Rahman".into(),
        phone: Some("+880 1711-000000".into()),
        headline: Some("Backend developer".into()),
        bio: None,
        location: Some("Dhaka".into()),
        experience_in_months: 30,
        expected_salary: Some(70000),
    }
}

#[actix_rt::test]
async fn one_profile_per_user() {
    let Some(db) = TestDb::spawn().await else { return };
    let user_id = db.seed_candidate_user().await;

    let created = db.candidates.create_candidate(&profile(user_id)).await.unwrap();
    let again = db.candidates.create_candidate(&profile(user_id)).await;

    assert_eq!(created.user_id, user_id);
    assert!(matches!(again, Err(AppError::Conflict(_))));
    assert_eq!(
        db.candidates.find_candidate_by_user(&user_id).await.unwrap().map(|c| c.id),
        Some(created.id)
    );
}

#[actix_rt::test]
async fn update_changes_only_provided_fields() {
    let Some(db) = TestDb::spawn().await else { return };
    let user_id = db.seed_candidate_user().await;
    let created = db.candidates.create_candidate(&profile(user_id)).await.unwrap();

    let changes = CandidateUpdate {
        headline: Some("Staff engineer".into()),
        expected_salary: Some(90000),
        ..Default::default()
    };
    let updated = db
        .candidates
        .update_candidate(&user_id, &changes)
        .await
        .unwrap()
        .expect("Profile should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.headline.as_deref(), Some("Staff engineer"));
    assert_eq!(updated.expected_salary, Some(90000));
    assert_eq!(updated.full_name, "Nadia Rahman");
    assert_eq!(updated.location.as_deref(), Some("Dhaka"));
    assert!(updated.updated_at >= created.updated_at);
}

#[actix_rt::test]
async fn update_without_profile_returns_none() {
    let Some(db) = TestDb::spawn().await else { return };
    let user_id = db.seed_candidate_user().await;

    let changes = CandidateUpdate { bio: Some("Hello".into()), ..Default::default() };
    let result = db.candidates.update_candidate(&user_id, &changes).await.unwrap();

    assert!(result.is_none());
}
