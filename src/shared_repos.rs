use crate::repositories::sqlx_repo::{SqlxCandidateRepo, SqlxJobRepo, SqlxReferenceRepo, SqlxUserRepo};

/// Postgres-backed repositories sharing one connection pool.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: SqlxUserRepo,
    pub job_repo: SqlxJobRepo,
    pub reference_repo: SqlxReferenceRepo,
    pub candidate_repo: SqlxCandidateRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: SqlxUserRepo::new(pool.clone()),
            job_repo: SqlxJobRepo::new(pool.clone()),
            reference_repo: SqlxReferenceRepo::new(pool.clone()),
            candidate_repo: SqlxCandidateRepo::new(pool),
        }
    }
}
