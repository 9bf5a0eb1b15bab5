use actix_web::web;

use crate::handlers::candidates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/candidates")
            .service(
                web::resource("")
                    .route(web::post().to(candidates::create_profile))
            )
            .service(
                web::resource("/me")
                    .route(web::get().to(candidates::get_my_profile))
                    .route(web::patch().to(candidates::update_my_profile))
            )
            .service(
                web::resource("/{candidate_id}")
                    .route(web::get().to(candidates::get_profile))
            )
    );
}
