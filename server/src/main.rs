mod assets;
mod config;
mod error;
mod proxy;

use std::io;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use crate::config::ServerConfig;
use crate::proxy::Upstream;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        error!("{e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let upstream = web::Data::new(Upstream::new(&config.api_upstream).map_err(io::Error::other)?);
    let request_limit = config.request_limit;

    info!(
        "Server running at http://{}:{}, proxying /api to {}",
        config.host, config.port, config.api_upstream
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::PayloadConfig::new(request_limit))
            .app_data(upstream.clone())
            .service(proxy::configure_routes())
            .default_service(web::route().to(assets::serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
