//! Runs `SqlxJobRepo` against a real Postgres database.
//! Set `DATABASE_URL` to enable; without it each test returns early.

mod db_utils;

use db_utils::*;
use job_board_backend::{
    entities::{job::AddressInsert, user::{Role, UserInsert}},
    errors::AppError,
    pagination::{calculate_pagination, Pagination, PaginationOptions},
    repositories::{job::JobRepository, user::UserRepository},
    search::{JobFilters, JobPredicate},
};
use uuid::Uuid;

fn by_title() -> Pagination {
    calculate_pagination(&PaginationOptions {
        sort_by: Some("title".into()),
        sort_order: Some("asc".into()),
        ..Default::default()
    })
}

async fn titles(db: &TestDb, predicates: &[JobPredicate]) -> Vec<String> {
    db.jobs
        .list_jobs(predicates, &by_title())
        .await
        .expect("Listing failed")
        .into_iter()
        .map(|listing| listing.job.title)
        .collect()
}

#[actix_rt::test]
async fn create_job_writes_job_address_and_skills_together() {
    let Some(db) = TestDb::spawn().await else { return };
    let employer = db.seed_employer(&unique_tag()).await;

    let (job, address) = db
        .jobs
        .create_job(&employer.job("Engineer", 6000, 8000, true), &address("Dhaka"), &skills(&["Rust", "SQL"]))
        .await
        .expect("Create should succeed");

    assert_eq!(address.job_id, job.id);
    assert_eq!(db.count_for_job("jobs", &job.id).await, 1);
    assert_eq!(db.count_for_job("addresses", &job.id).await, 1);
    assert_eq!(db.count_for_job("job_skills", &job.id).await, 2);
}

#[actix_rt::test]
async fn failed_create_leaves_no_rows_behind() {
    let Some(db) = TestDb::spawn().await else { return };
    let employer = db.seed_employer(&unique_tag()).await;
    let marker = format!("skill-{}", unique_tag());

    // Postgres rejects NUL in text, so the address insert fails after the
    // job and skills were already written inside the transaction.
    let broken = AddressInsert {
        address_line: "12 Harbour\0Road".into(),
        district: "Dhaka".into(),
    };
    let result = db
        .jobs
        .create_job(&employer.job("Engineer", 6000, 8000, false), &broken, &skills(&[marker.as_str()]))
        .await;

    assert!(result.is_err());
    assert_eq!(db.count_company_jobs(&employer.company.id).await, 0);
    assert_eq!(db.count_skills_named(&marker).await, 0);
}

#[actix_rt::test]
async fn owner_delete_removes_children_then_job() {
    let Some(db) = TestDb::spawn().await else { return };
    let employer = db.seed_employer(&unique_tag()).await;

    let (job, _) = db
        .jobs
        .create_job(&employer.job("Engineer", 6000, 8000, false), &address("Dhaka"), &skills(&["Rust"]))
        .await
        .unwrap();

    let deleted = db.jobs.delete_job(&job.id, &employer.company.id).await.unwrap();

    assert_eq!(deleted.map(|j| j.id), Some(job.id));
    assert_eq!(db.count_for_job("jobs", &job.id).await, 0);
    assert_eq!(db.count_for_job("addresses", &job.id).await, 0);
    assert_eq!(db.count_for_job("job_skills", &job.id).await, 0);
    assert!(db.jobs.get_job_by_id(&job.id).await.unwrap().is_none());
}

#[actix_rt::test]
async fn non_owner_delete_changes_nothing() {
    let Some(db) = TestDb::spawn().await else { return };
    let owner = db.seed_employer(&unique_tag()).await;
    let stranger = db.seed_company(&format!("{} Rival", unique_tag())).await;

    let (job, _) = db
        .jobs
        .create_job(&owner.job("Engineer", 6000, 8000, false), &address("Dhaka"), &skills(&["Rust", "SQL"]))
        .await
        .unwrap();

    let deleted = db.jobs.delete_job(&job.id, &stranger.id).await.unwrap();

    assert!(deleted.is_none());
    assert_eq!(db.count_for_job("jobs", &job.id).await, 1);
    assert_eq!(db.count_for_job("addresses", &job.id).await, 1);
    assert_eq!(db.count_for_job("job_skills", &job.id).await, 2);
}

#[actix_rt::test]
async fn job_without_address_can_still_be_deleted() {
    let Some(db) = TestDb::spawn().await else { return };
    let employer = db.seed_employer(&unique_tag()).await;

    let (job, _) = db
        .jobs
        .create_job(&employer.job("Engineer", 6000, 8000, false), &address("Dhaka"), &[])
        .await
        .unwrap();
    sqlx::query("DELETE FROM addresses WHERE job_id = $1")
        .bind(job.id)
        .execute(&db.pool)
        .await
        .unwrap();

    let deleted = db.jobs.delete_job(&job.id, &employer.company.id).await.unwrap();

    assert!(deleted.is_some());
    assert_eq!(db.count_for_job("jobs", &job.id).await, 0);
}

#[actix_rt::test]
async fn filters_match_real_rows() {
    let Some(db) = TestDb::spawn().await else { return };
    let tag = unique_tag();
    let employer = db.seed_employer(&tag).await;
    let company = JobPredicate::CompanyId(employer.company.id);

    for (title, min, max, negotiable, district) in [
        ("Engineer", 6000, 8000, true, "Dhaka"),
        ("Designer", 3000, 4000, false, "Chattogram"),
        ("Analyst", 5000, 12000, false, "Sylhet"),
    ] {
        db.jobs
            .create_job(&employer.job(title, min, max, negotiable), &address(district), &[])
            .await
            .unwrap();
    }

    let negotiable = JobFilters { negotiable: Some("TRUE".into()), ..Default::default() };
    let mut predicates = negotiable.predicates();
    predicates.push(company.clone());
    assert_eq!(titles(&db, &predicates).await, ["Engineer"]);

    let salary_band = JobFilters {
        min_salary: Some("5000".into()),
        max_salary: Some("9000".into()),
        ..Default::default()
    };
    let mut predicates = salary_band.predicates();
    predicates.push(company.clone());
    assert_eq!(titles(&db, &predicates).await, ["Engineer"]);

    let fractional = JobFilters { min_salary: Some("5999.5".into()), ..Default::default() };
    let mut predicates = fractional.predicates();
    predicates.push(company.clone());
    assert_eq!(titles(&db, &predicates).await, ["Engineer"]);

    // Company name matches every posting; title matching ignores case.
    let by_company = vec![JobPredicate::TitleOrCompanyContains(tag.to_uppercase()), company.clone()];
    assert_eq!(titles(&db, &by_company).await, ["Analyst", "Designer", "Engineer"]);
    assert_eq!(db.jobs.count_jobs(&by_company).await.unwrap(), 3);

    let by_title = vec![JobPredicate::TitleOrCompanyContains("engin".into()), company.clone()];
    assert_eq!(titles(&db, &by_title).await, ["Engineer"]);

    let by_district = vec![JobPredicate::LocationContains("sylh".into()), company.clone()];
    assert_eq!(titles(&db, &by_district).await, ["Analyst"]);

    let by_industry = vec![JobPredicate::IndustryNameContains(format!("{} industry", tag)), company.clone()];
    assert_eq!(db.jobs.count_jobs(&by_industry).await.unwrap(), 3);

    let wildcard = vec![JobPredicate::TitleOrCompanyContains("%".into()), company];
    assert!(titles(&db, &wildcard).await.is_empty());
}

#[actix_rt::test]
async fn listing_carries_reference_names() {
    let Some(db) = TestDb::spawn().await else { return };
    let tag = unique_tag();
    let employer = db.seed_employer(&tag).await;

    db.jobs
        .create_job(&employer.job("Engineer", 6000, 8000, false), &address("Dhaka"), &[])
        .await
        .unwrap();

    let listings = db
        .jobs
        .list_jobs(&[JobPredicate::CompanyId(employer.company.id)], &Pagination::default())
        .await
        .unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].industry.name, format!("{} Industry", tag));
    assert_eq!(listings[0].department.name, format!("{} Department", tag));
}

#[actix_rt::test]
async fn duplicate_email_is_a_conflict() {
    let Some(db) = TestDb::spawn().await else { return };
    let email = format!("candidate-{}@jobs.test", Uuid::new_v4());
    let insert = UserInsert {
        email,
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$placeholder".into(),
        role: Role::Candidate,
        company_name: None,
    };

    db.users.create_user(&insert).await.expect("First insert should succeed");
    let second = db.users.create_user(&insert).await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
}
