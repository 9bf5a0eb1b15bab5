use actix_web::web;

use crate::handlers::jobs;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments are registered before `/{job_id}`.
    cfg.service(
        web::scope("/jobs")
            .service(
                web::resource("/create-job")
                    .route(web::post().to(jobs::create_job))
            )
            .service(
                web::resource("/me/all")
                    .route(web::get().to(jobs::get_my_posted_jobs))
            )
            .service(
                web::resource("/get-single/{job_id}")
                    .route(web::get().to(jobs::get_single_job))
            )
            .service(
                web::resource("/get-all")
                    .route(web::get().to(jobs::get_all_jobs))
            )
            .service(
                web::resource("/count")
                    .route(web::get().to(jobs::get_jobs_count))
            )
            .service(
                web::resource("/{job_id}")
                    .route(web::delete().to(jobs::delete_job))
            )
    );
}
