use actix_web::web;

use crate::{constants::API_PREFIX, handlers::{home::home, system}};

mod auth;
mod candidates;
mod jobs;
mod reference;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope(API_PREFIX)
            .route("/health", web::get().to(system::health_check))
            .configure(auth::config_routes)
            .configure(jobs::config_routes)
            .configure(reference::config_routes)
            .configure(candidates::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
