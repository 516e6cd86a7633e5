use actix_web::web;

use crate::errors::AppError;

pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid JSON payload: {}", err)).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {}", err)).into()
    })
}

use super::tasks::tasks_handlers;

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .route("", web::get().to(tasks_handlers::tasks_get))
            .route("/", web::get().to(tasks_handlers::tasks_get))
            .route("/analyze", web::get().to(tasks_handlers::analyze_get))
            .route("/analyze/", web::get().to(tasks_handlers::analyze_get))
            .route("/analyze", web::post().to(tasks_handlers::analyze))
            .route("/analyze/", web::post().to(tasks_handlers::analyze))
            .route("/suggest", web::get().to(tasks_handlers::suggest_get))
            .route("/suggest/", web::get().to(tasks_handlers::suggest_get))
            .route("/suggest", web::post().to(tasks_handlers::suggest_post))
            .route("/suggest/", web::post().to(tasks_handlers::suggest_post))
            .route("/strategies", web::get().to(tasks_handlers::strategies))
            .route("/strategies/", web::get().to(tasks_handlers::strategies))
    );
}

use super::frontend::frontend_handlers;

pub fn frontend_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(frontend_handlers::root_redirect))
        .route("/static/index.html", web::get().to(frontend_handlers::index_html));
}
