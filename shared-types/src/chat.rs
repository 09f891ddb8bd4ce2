use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatResponse {
    pub response: String,
    /// False when the command was not understood or could not be carried out
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: i64,
    pub owner_id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}
