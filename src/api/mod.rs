pub mod handlers;
pub mod models;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::pipeline::UrlClassifierService;

/// Shared server-level state handed to handlers that need more than the
/// classification service itself
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<UrlClassifierService>,
    pub started_at: Instant,
}

/// Starts the API server with the given service.
///
/// The service object is built once by the caller (model loaded or not)
/// and shared read-only across all workers; no request-path code mutates
/// it, so no synchronization is needed.
///
/// # Arguments
/// * `host` - Host address to bind to (e.g., "0.0.0.0")
/// * `port` - Port to listen on
/// * `service` - Shared classification service
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(service))]
pub async fn start_server(host: &str, port: u16, service: Arc<UrlClassifierService>) -> Result<()> {
    info!("Starting URL safety API server on {}:{}", host, port);

    let state = ServerState {
        service: service.clone(),
        started_at: Instant::now(),
    };
    let service_data = web::Data::new(service);
    let state_data = web::Data::new(state);

    HttpServer::new(move || {
        // the original deployment serves a mobile client from arbitrary
        // origins, so CORS stays permissive
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(service_data.clone())
            .app_data(state_data.clone())
            .service(
                web::resource("/api/v1/check-url")
                    .route(web::post().to(handlers::check_url_post))
                    .route(web::get().to(handlers::check_url_get)),
            )
            .service(web::resource("/api/health").route(web::get().to(handlers::health_check)))
            .service(web::resource("/api/ping").route(web::get().to(handlers::ping)))
    })
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })?
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
