use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EventType {
    Meeting,
    #[default]
    Event,
    Training,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meeting => "meeting",
            EventType::Event => "event",
            EventType::Training => "training",
        }
    }

    /// Name shown to the user in chat replies and emails
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Meeting => "Reunião",
            EventType::Event => "Evento",
            EventType::Training => "Treinamento",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            EventType::Meeting => "👥",
            EventType::Training => "📚",
            EventType::Event => "🎯",
        }
    }

    /// Parse the stored representation; unknown values fall back to `Event`
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "meeting" => EventType::Meeting,
            "training" => EventType::Training,
            _ => EventType::Event,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Event {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub start: i64, // Unix timestamp
    pub end: i64,   // Unix timestamp
    pub event_type: EventType,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Event {
    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateEventRequest {
    pub title: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub event_type: EventType,
    pub description: Option<String>,
}

impl CreateEventRequest {
    /// Checks the invariants every stored event must satisfy
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }
        if self.end <= self.start {
            return Err("Event end must be after its start".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.event_type.is_none()
            && self.description.is_none()
    }

    /// Applies the update on top of an existing event, returning the merged copy
    pub fn apply_to(&self, event: &Event) -> Event {
        let mut merged = event.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(start) = self.start {
            merged.start = start;
        }
        if let Some(end) = self.end {
            merged.end = end;
        }
        if let Some(event_type) = self.event_type {
            merged.event_type = event_type;
        }
        if let Some(description) = &self.description {
            merged.description = Some(description.clone());
        }
        merged
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}
