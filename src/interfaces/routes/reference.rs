use actix_web::web;

use crate::{entities::reference::ReferenceKind, handlers::reference};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(reference_scope("/industry", ReferenceKind::Industry));
    cfg.service(reference_scope("/department", ReferenceKind::Department));
}

fn reference_scope(path: &str, kind: ReferenceKind) -> actix_web::Scope {
    web::scope(path)
        .app_data(web::Data::new(kind))
        .service(
            web::resource("")
                .route(web::get().to(reference::list_references))
                .route(web::post().to(reference::create_reference))
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(reference::get_reference))
        )
}
