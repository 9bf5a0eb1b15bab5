use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases, pagination, password, search};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, utils};

use auth::jwt::JwtService;
use repositories::{
    candidate::CandidateRepository, job::JobRepository, reference::ReferenceRepository,
    user::UserRepository,
};
use settings::{AppConfig, PasswordHashConfig};
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler, candidates::CandidateHandler, jobs::JobHandler, reference::ReferenceHandler,
};

pub type AppAuthHandler = AuthHandler<dyn UserRepository, JwtService>;
pub type AppJobHandler = JobHandler<dyn JobRepository>;
pub type AppReferenceHandler = ReferenceHandler<dyn ReferenceRepository>;
pub type AppCandidateHandler = CandidateHandler<dyn CandidateRepository>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub job_handler: AppJobHandler,
    pub reference_handler: AppReferenceHandler,
    pub candidate_handler: AppCandidateHandler,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Self {
        let repos = SharedRepositories::new(pool);

        AppState::from_parts(
            Arc::new(repos.user_repo),
            Arc::new(repos.job_repo),
            Arc::new(repos.reference_repo),
            Arc::new(repos.candidate_repo),
            config,
        )
    }

    /// Wires the use cases over any repository implementations.
    pub fn from_parts(
        user_repo: Arc<dyn UserRepository>,
        job_repo: Arc<dyn JobRepository>,
        reference_repo: Arc<dyn ReferenceRepository>,
        candidate_repo: Arc<dyn CandidateRepository>,
        config: &AppConfig,
    ) -> Self {
        AppState {
            auth_handler: AuthHandler::new(
                user_repo,
                JwtService::new(config),
                PasswordHashConfig::from(config),
            ),
            job_handler: JobHandler::new(job_repo),
            reference_handler: ReferenceHandler::new(reference_repo),
            candidate_handler: CandidateHandler::new(candidate_repo),
        }
    }
}
