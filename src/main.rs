use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::io;

mod config;
mod errors;
mod models;
mod routes;
mod scoring;
mod store;

use config::Config;

fn cors(config: &Config) -> Cors {
    if config.allowed_origins.is_empty() {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
    }
    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(io::Error::other)?;
    let pool = store::connect(&config.database_url, config.max_connections)
        .await
        .map_err(io::Error::other)?;

    let server_address = config.bind_address.clone();
    info!("Server running at http://{}", server_address);

    let app_config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&app_config))
            .app_data(web::Data::new(pool.clone()))
            .app_data(app_config.clone())
            .app_data(routes::routes::json_config(app_config.json_limit_bytes))
            .app_data(routes::routes::query_config())
            .configure(routes::routes::tasks_configure)
            .configure(routes::routes::frontend_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
