use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::api::models::{CheckUrlRequest, ErrorResponse, HealthStatus, PingResponse};
use crate::api::ServerState;
use crate::pipeline::UrlClassifierService;

/// HTTP handler for URL checks submitted as a JSON body.
///
/// Validates that a URL is present, then runs the classification pipeline.
/// The pipeline itself is total, so every well-formed request gets a 200
/// with a populated verdict; only a missing URL yields a 400.
///
/// # Arguments
/// * `request` - JSON request containing the URL to classify
/// * `service` - Shared classification service
///
/// # Returns
/// * HTTP response with the classification result or error information
#[instrument(skip(service))]
pub async fn check_url_post(
    request: web::Json<CheckUrlRequest>,
    service: web::Data<Arc<UrlClassifierService>>,
) -> impl Responder {
    classify_request(request.into_inner(), &service)
}

/// Same contract as the POST handler, with the URL passed as a query
/// parameter for quick manual checks
#[instrument(skip(service))]
pub async fn check_url_get(
    query: web::Query<CheckUrlRequest>,
    service: web::Data<Arc<UrlClassifierService>>,
) -> impl Responder {
    classify_request(query.into_inner(), &service)
}

fn classify_request(
    request: CheckUrlRequest,
    service: &UrlClassifierService,
) -> HttpResponse {
    let url = match request.url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => {
            warn!("Rejected request with no URL");
            return HttpResponse::BadRequest().json(ErrorResponse::new("No URL provided"));
        }
    };

    info!("Received request to check URL: {}", url);
    let result = service.classify(url);
    HttpResponse::Ok().json(result)
}

/// Health check endpoint for monitoring service status.
///
/// Reports whether the trained model is backing the service; when it is
/// not, callers still get verdicts, produced by the heuristic fallback.
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<ServerState>) -> impl Responder {
    debug!("Processing health check request");

    let model_loaded = state.service.classifier_loaded();
    let uptime = state.started_at.elapsed().as_secs();

    info!(
        "Health check: model_loaded={}, uptime={}s",
        model_loaded, uptime
    );
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
        model_loaded,
        uptime_secs: uptime,
    })
}

/// Connectivity probe, kept deliberately free of any pipeline work
#[instrument]
pub async fn ping() -> impl Responder {
    debug!("Ping request received");
    HttpResponse::Ok().json(PingResponse {
        message: "pong".to_string(),
    })
}
