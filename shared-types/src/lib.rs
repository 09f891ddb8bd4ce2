use serde::{Deserialize, Serialize};

pub mod chat;
pub mod event;

pub use chat::{ChatHistoryResponse, ChatMessage, ChatRequest, ChatResponse};
pub use event::{CreateEventRequest, Event, EventType, EventsResponse, UpdateEventRequest};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
