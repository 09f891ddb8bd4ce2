pub mod chat;
pub mod events;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use thiserror::Error;

use crate::database::Database;
use crate::helpers::identity;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing X-Owner-Id header")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Event not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = shared_types::ErrorResponse {
            error: self.to_string(),
        };
        match self {
            ApiError::Unauthorized => HttpResponse::Unauthorized().json(body),
            ApiError::Validation(_) => HttpResponse::BadRequest().json(body),
            ApiError::NotFound => HttpResponse::NotFound().json(body),
            ApiError::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

pub(crate) fn require_owner(req: &HttpRequest) -> Result<String, ApiError> {
    identity::owner_id(req).ok_or(ApiError::Unauthorized)
}

pub async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Every route the API serves; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/events", web::get().to(events::list_events))
        .route("/api/events", web::post().to(events::create_event))
        .route("/api/events/{id}", web::get().to(events::get_event))
        .route("/api/events/{id}", web::put().to(events::update_event))
        .route("/api/events/{id}", web::delete().to(events::delete_event))
        .route("/api/chat", web::post().to(chat::post_message))
        .route("/api/chat", web::get().to(chat::get_history));
}
