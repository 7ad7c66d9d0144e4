pub mod file;
pub mod upload;

use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(file::list_files)),
    )
    .service(
        web::resource("/upload")
            .route(web::get().to(upload::upload_form))
            .route(web::post().to(upload::upload_files)),
    );
}
