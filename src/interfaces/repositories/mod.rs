pub mod candidate;
pub mod job;
pub mod reference;
pub mod sqlx_repo;
pub mod token;
pub mod user;
