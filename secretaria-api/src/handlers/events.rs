use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{CreateEventRequest, EventsResponse, UpdateEventRequest};
use std::sync::Arc;

use super::{require_owner, ApiError};
use crate::jobs::NotificationScheduler;
use crate::storage::EventStore;

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub async fn list_events(
    req: HttpRequest,
    store: web::Data<Arc<dyn EventStore>>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let events = store.list(&owner_id).await?;

    Ok(HttpResponse::Ok().json(EventsResponse { events }))
}

pub async fn get_event(
    req: HttpRequest,
    store: web::Data<Arc<dyn EventStore>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let event = store
        .get(path.into_inner(), &owner_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(event))
}

pub async fn create_event(
    req: HttpRequest,
    store: web::Data<Arc<dyn EventStore>>,
    scheduler: web::Data<Arc<NotificationScheduler>>,
    request: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let request = request.into_inner();
    request.validate().map_err(ApiError::Validation)?;

    let event = store.create(&owner_id, request).await?;

    scheduler.notify_created(&owner_id, &event).await;
    scheduler
        .refresh_from_store(store.get_ref().as_ref(), &owner_id, now())
        .await;

    Ok(HttpResponse::Created().json(event))
}

pub async fn update_event(
    req: HttpRequest,
    store: web::Data<Arc<dyn EventStore>>,
    scheduler: web::Data<Arc<NotificationScheduler>>,
    path: web::Path<i64>,
    request: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let request = request.into_inner();
    if request.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }

    let event_id = path.into_inner();
    let existing = store
        .get(event_id, &owner_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let merged = request.apply_to(&existing);
    if merged.title.trim().is_empty() {
        return Err(ApiError::Validation("Event title cannot be empty".to_string()));
    }
    if merged.end <= merged.start {
        return Err(ApiError::Validation(
            "Event end must be after its start".to_string(),
        ));
    }

    let event = store
        .update(event_id, &owner_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    scheduler
        .refresh_from_store(store.get_ref().as_ref(), &owner_id, now())
        .await;

    Ok(HttpResponse::Ok().json(event))
}

pub async fn delete_event(
    req: HttpRequest,
    store: web::Data<Arc<dyn EventStore>>,
    scheduler: web::Data<Arc<NotificationScheduler>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let event = store
        .delete(path.into_inner(), &owner_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    scheduler
        .refresh_from_store(store.get_ref().as_ref(), &owner_id, now())
        .await;

    Ok(HttpResponse::Ok().json(event))
}
