use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::RqState;

/// Liveness check - the process is up and serving
#[get("")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check - both secrets are configured, so feeds can actually be served
#[get("/ready")]
pub async fn readiness_check(state: RqState) -> impl Responder {
    let config = &state.config;
    let status = if config.is_ready() { "ready" } else { "not_ready" };
    let body = json!({
        "status": status,
        "upstream_token": config.podme_token.is_some(),
        "secret": config.secret.is_some(),
    });

    if config.is_ready() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/health")
        .service(health_check)
        .service(readiness_check)
}
