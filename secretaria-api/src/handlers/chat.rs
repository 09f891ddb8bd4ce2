use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{ChatHistoryResponse, ChatRequest, ChatResponse};
use std::sync::Arc;

use super::{require_owner, ApiError};
use crate::database::chat_messages as db;
use crate::database::Database;
use crate::interpreter::CommandInterpreter;

const HISTORY_LIMIT: usize = 200;

pub async fn post_message(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
    interpreter: web::Data<Arc<CommandInterpreter>>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let message = request.into_inner().message;
    let message = message.trim();
    if message.is_empty() {
        return Err(ApiError::Validation("Mensagem não fornecida".to_string()));
    }

    // History is best effort; a failed write must not block the command
    if let Err(e) = db::insert_message(db.async_connection.clone(), &owner_id, message, true).await {
        tracing::warn!("Failed to store chat message for {}: {}", owner_id, e);
    }

    let reply = interpreter.handle_message(&owner_id, message).await;

    if let Err(e) = db::insert_message(db.async_connection.clone(), &owner_id, &reply.text, false).await {
        tracing::warn!("Failed to store chat reply for {}: {}", owner_id, e);
    }

    Ok(HttpResponse::Ok().json(ChatResponse {
        response: reply.text,
        success: reply.success,
    }))
}

pub async fn get_history(
    req: HttpRequest,
    db: web::Data<Arc<Database>>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = require_owner(&req)?;
    let messages = db::list_messages(db.async_connection.clone(), &owner_id, HISTORY_LIMIT).await?;

    Ok(HttpResponse::Ok().json(ChatHistoryResponse { messages }))
}
