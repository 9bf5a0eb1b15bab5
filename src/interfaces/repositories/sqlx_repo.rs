use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxJobRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxReferenceRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCandidateRepo {
    pub pool: PgPool,
}
