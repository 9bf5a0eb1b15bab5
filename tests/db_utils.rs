#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use job_board_backend::{
    entities::{
        company::Company,
        job::{AddressInsert, JobInsert},
        reference::ReferenceKind,
        skill::SkillInsert,
        user::{Role, UserInsert},
    },
    repositories::{
        job::JobRepository,
        reference::ReferenceRepository,
        sqlx_repo::{SqlxCandidateRepo, SqlxJobRepo, SqlxReferenceRepo, SqlxUserRepo},
        user::UserRepository,
    },
};

/// A migrated Postgres database shared by the repository tests.
///
/// Every test seeds its own users, companies and reference rows under unique
/// names, so tests can run concurrently against the same database.
pub struct TestDb {
    pub pool: PgPool,
    pub users: SqlxUserRepo,
    pub jobs: SqlxJobRepo,
    pub references: SqlxReferenceRepo,
    pub candidates: SqlxCandidateRepo,
}

impl TestDb {
    /// Connects to `DATABASE_URL` and applies migrations.
    /// Returns `None` when no database is configured.
    pub async fn spawn() -> Option<Self> {
        dotenv::dotenv().ok();

        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set; skipping database-backed test");
            return None;
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(TestDb {
            users: SqlxUserRepo::new(pool.clone()),
            jobs: SqlxJobRepo::new(pool.clone()),
            references: SqlxReferenceRepo::new(pool.clone()),
            candidates: SqlxCandidateRepo::new(pool.clone()),
            pool,
        })
    }

    /// Registers an employer and returns the company created with it.
    pub async fn seed_company(&self, company_name: &str) -> Company {
        let user_id = self
            .users
            .create_user(&UserInsert {
                email: format!("employer-{}@jobs.test", Uuid::new_v4()),
                password_hash: "$argon2id$v=19$m=1024,t=1,p=1$placeholder".into(),
                role: Role::Employer,
                company_name: Some(company_name.to_string()),
            })
            .await
            .expect("Failed to insert employer");

        self.jobs
            .find_company_by_user(&user_id)
            .await
            .expect("Company lookup failed")
            .expect("Company should be created with the employer")
    }

    pub async fn seed_candidate_user(&self) -> Uuid {
        self.users
            .create_user(&UserInsert {
                email: format!("candidate-{}@jobs.test", Uuid::new_v4()),
                password_hash: "$argon2id$v=19$m=1024,t=1,p=1$placeholder".into(),
                role: Role::Candidate,
                company_name: None,
            })
            .await
            .expect("Failed to insert candidate")
    }

    pub async fn seed_reference(&self, kind: ReferenceKind, name: &str) -> Uuid {
        self.references
            .create_reference(kind, name)
            .await
            .expect("Failed to insert reference row")
            .id
    }

    /// A company together with an industry and department to post under.
    pub async fn seed_employer(&self, tag: &str) -> Employer {
        let company = self.seed_company(&format!("{} Holdings", tag)).await;
        let industry_id = self
            .seed_reference(ReferenceKind::Industry, &format!("{} Industry", tag))
            .await;
        let department_id = self
            .seed_reference(ReferenceKind::Department, &format!("{} Department", tag))
            .await;

        Employer { company, industry_id, department_id }
    }

    pub async fn count_for_job(&self, table: &str, job_id: &Uuid) -> i64 {
        let column = if table == "jobs" { "id" } else { "job_id" };
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);

        sqlx::query_scalar(&sql)
            .bind(job_id)
            .fetch_one(&self.pool)
            .await
            .expect("Count query failed")
    }

    pub async fn count_company_jobs(&self, company_id: &Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await
            .expect("Count query failed")
    }

    pub async fn count_skills_named(&self, skill: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM job_skills WHERE skill = $1")
            .bind(skill)
            .fetch_one(&self.pool)
            .await
            .expect("Count query failed")
    }
}

pub struct Employer {
    pub company: Company,
    pub industry_id: Uuid,
    pub department_id: Uuid,
}

impl Employer {
    pub fn job(&self, title: &str, min_salary: i32, max_salary: i32, negotiable: bool) -> JobInsert {
        JobInsert {
            title: title.to_string(),
            vacancy: 1,
            deadline: Utc::now() + Duration::days(30),
            min_salary,
            max_salary,
            experience_in_months: 12,
            job_type: "FULL_TIME".into(),
            min_age: None,
            job_description: "Build and run the hiring platform APIs.".into(),
            job_requirements: None,
            degree_name: None,
            degree_title: None,
            compensation_benefits: None,
            negotiable,
            industry_id: self.industry_id,
            department_id: self.department_id,
            company_id: self.company.id,
        }
    }
}

pub fn address(district: &str) -> AddressInsert {
    AddressInsert {
        address_line: "12 Harbour Road".into(),
        district: district.into(),
    }
}

pub fn skills(names: &[&str]) -> Vec<SkillInsert> {
    names
        .iter()
        .map(|name| SkillInsert { skill: name.to_string(), duration: 6 })
        .collect()
}

/// Short unique token for names that must not collide across test runs.
pub fn unique_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
