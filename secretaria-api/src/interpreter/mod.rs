//! Turns a chat message into a calendar operation.
//!
//! Classification and field extraction are pure (see the `extractors`
//! crate); this module owns the orchestration: it reads the caller's
//! current events from the store, makes at most one mutating store call per
//! message and keeps the notification scheduler's mirror in sync.

pub mod format;

use crate::helpers::local_time::{format_date, format_time, from_local, local_date, to_local};
use crate::jobs::NotificationScheduler;
use crate::storage::EventStore;
use chrono::{Datelike, FixedOffset};
use extractors::{classify, extract, resolve, ExtractedFields, Intent};
use regex::Regex;
use shared_types::{CreateEventRequest, Event, EventType, UpdateEventRequest};
use std::sync::{Arc, LazyLock};

const NO_UPCOMING_EVENTS: &str = "Não há eventos futuros agendados.";
const VIEW_FAILED: &str = "Não foi possível buscar os eventos. Por favor, tente novamente.";

const CREATE_USAGE: &str = "Formato inválido. Por favor, use o formato: \"crie um evento [título] para o dia [dd/mm/yyyy] às [hh:mm]\"";
const CREATE_FAILED: &str = "Não foi possível criar o evento. Por favor, tente novamente.";

const DELETE_USAGE: &str =
    "Formato inválido. Por favor, use o formato: \"deletar evento [título] do dia [dd]\"";
const DELETE_NOT_FOUND: &str = "Evento não encontrado para deletar.";
const DELETE_FAILED: &str = "Não foi possível deletar o evento. Por favor, tente novamente.";

const EDIT_USAGE: &str = "Formato inválido. Por favor, use o formato: \"editar evento [título] para o dia [dd/mm/yyyy] às [hh:mm]\"";
const EDIT_FAILED: &str = "Não foi possível editar o evento. Por favor, tente novamente.";
const EDIT_NOT_CONFIRMED: &str = "A alteração não foi confirmada pela agenda. Por favor, verifique o evento e tente novamente.";

const UNRECOGNIZED: &str = "Comando não reconhecido. Use um dos seguintes formatos:\n\
- \"mostrar próximos eventos\"\n\
- \"crie um evento [título] para o dia [dd/mm/yyyy] às [hh:mm]\"\n\
- \"editar evento [título] para o dia [dd/mm/yyyy] às [hh:mm]\"\n\
- \"deletar evento [título] do dia [dd]\"";

/// Slack allowed between the requested and the stored start time
const START_TOLERANCE_SECS: i64 = 60;

const DEFAULT_DURATION_SECS: i64 = 3600;

static MEETING_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breuni[ãa]o\b").expect("Invalid regex"));
static TRAINING_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btreinamento\b").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub success: bool,
    pub text: String,
}

impl ChatReply {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    fn fail(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

pub fn infer_event_type(text: &str) -> EventType {
    if MEETING_WORD.is_match(text) {
        EventType::Meeting
    } else if TRAINING_WORD.is_match(text) {
        EventType::Training
    } else {
        EventType::Event
    }
}

pub struct CommandInterpreter {
    store: Arc<dyn EventStore>,
    scheduler: Arc<NotificationScheduler>,
    offset: FixedOffset,
}

impl CommandInterpreter {
    pub fn new(
        store: Arc<dyn EventStore>,
        scheduler: Arc<NotificationScheduler>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            store,
            scheduler,
            offset,
        }
    }

    pub async fn handle_message(&self, owner_id: &str, text: &str) -> ChatReply {
        self.handle_message_at(owner_id, text, chrono::Utc::now().timestamp())
            .await
    }

    /// `now` is a Unix timestamp; it decides what counts as upcoming and
    /// which day "hoje" is
    pub async fn handle_message_at(&self, owner_id: &str, text: &str, now: i64) -> ChatReply {
        let intent = classify(text);
        let today = local_date(now, self.offset).unwrap_or_default();
        let fields = extract(text, intent, today);

        tracing::debug!(owner_id, %intent, ?fields, "Interpreting chat message");

        match intent {
            Intent::View => self.view(owner_id, now).await,
            Intent::Create => self.create(owner_id, text, &fields, now).await,
            Intent::Delete => self.delete(owner_id, &fields, now).await,
            Intent::Edit => self.edit(owner_id, &fields, now).await,
            Intent::Unrecognized => ChatReply::fail(UNRECOGNIZED),
        }
    }

    async fn view(&self, owner_id: &str, now: i64) -> ChatReply {
        match self.store.list_future(owner_id, now).await {
            Ok(events) if events.is_empty() => ChatReply::ok(NO_UPCOMING_EVENTS),
            Ok(events) => ChatReply::ok(format::format_agenda(&events, self.offset)),
            Err(e) => {
                tracing::error!("Failed to list events for {}: {}", owner_id, e);
                ChatReply::fail(VIEW_FAILED)
            }
        }
    }

    async fn create(
        &self,
        owner_id: &str,
        text: &str,
        fields: &ExtractedFields,
        now: i64,
    ) -> ChatReply {
        let (Some(title), Some(date), Some(time)) = (&fields.title, fields.date, fields.time) else {
            return ChatReply::fail(CREATE_USAGE);
        };

        let start = date
            .to_naive_date()
            .zip(time.to_naive_time())
            .and_then(|(date, time)| from_local(date, time, self.offset));
        let Some(start) = start else {
            return ChatReply::fail(CREATE_USAGE);
        };

        let request = CreateEventRequest {
            title: title.clone(),
            start,
            end: start + DEFAULT_DURATION_SECS,
            event_type: infer_event_type(text),
            description: fields.description.clone(),
        };

        let event = match self.store.create(owner_id, request).await {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Failed to create event for {}: {}", owner_id, e);
                return ChatReply::fail(CREATE_FAILED);
            }
        };

        tracing::info!("Created event {} \"{}\" for {}", event.id, event.title, owner_id);
        self.scheduler.notify_created(owner_id, &event).await;
        self.refresh_schedule(owner_id, now).await;

        ChatReply::ok(format!(
            "Evento \"{}\" criado com sucesso para o dia {} às {}. A agenda foi atualizada.",
            event.title,
            format_date(event.start, self.offset),
            format_time(event.start, self.offset)
        ))
    }

    async fn delete(&self, owner_id: &str, fields: &ExtractedFields, now: i64) -> ChatReply {
        let Some(title) = &fields.title else {
            return ChatReply::fail(DELETE_USAGE);
        };

        let events = match self.store.list_future(owner_id, now).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed to list events for {}: {}", owner_id, e);
                return ChatReply::fail(DELETE_FAILED);
            }
        };

        let candidates: Vec<Event> = events
            .into_iter()
            .filter(|event| self.on_requested_day(event, fields))
            .collect();

        let Some(target) = resolve(title, &candidates) else {
            tracing::info!("No event matching \"{}\" for {}", title, owner_id);
            return ChatReply::fail(DELETE_NOT_FOUND);
        };

        match self.store.delete(target.id, owner_id).await {
            Ok(Some(deleted)) => {
                tracing::info!("Deleted event {} for {}", deleted.id, owner_id);
                self.refresh_schedule(owner_id, now).await;
                ChatReply::ok(format!(
                    "Evento \"{}\" do dia {} foi excluído com sucesso. A agenda foi atualizada.",
                    deleted.title,
                    format_date(deleted.start, self.offset)
                ))
            }
            Ok(None) => ChatReply::fail(DELETE_NOT_FOUND),
            Err(e) => {
                tracing::error!("Failed to delete event {} for {}: {}", target.id, owner_id, e);
                ChatReply::fail(DELETE_FAILED)
            }
        }
    }

    /// True when the event starts on the date (or day of month) named in the message
    fn on_requested_day(&self, event: &Event, fields: &ExtractedFields) -> bool {
        let Some(day) = local_date(event.start, self.offset) else {
            return false;
        };

        if let Some(date) = fields.date.and_then(|d| d.to_naive_date()) {
            return day == date;
        }
        if let Some(day_of_month) = fields.day_of_month {
            return day.day() == day_of_month;
        }
        true
    }

    async fn edit(&self, owner_id: &str, fields: &ExtractedFields, now: i64) -> ChatReply {
        let Some(title) = &fields.title else {
            return ChatReply::fail(EDIT_USAGE);
        };

        let events = match self.store.list_future(owner_id, now).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed to list events for {}: {}", owner_id, e);
                return ChatReply::fail(EDIT_FAILED);
            }
        };

        let Some(target) = resolve(title, &events) else {
            let listing = if events.is_empty() {
                NO_UPCOMING_EVENTS.to_string()
            } else {
                format!(
                    "Seus próximos eventos:\n{}",
                    format::format_event_list(&events, self.offset)
                )
            };
            return ChatReply::fail(format!(
                "Não encontrei o evento \"{}\".\n\n{}\n\n{}",
                title, listing, EDIT_USAGE
            ));
        };

        let Some(update) = self.build_update(target, fields) else {
            return ChatReply::fail(format!(
                "O que você deseja alterar no evento \"{}\"? Informe um novo título, data, horário ou descrição.",
                target.title
            ));
        };

        let updated = match self.store.update(target.id, owner_id, update.clone()).await {
            Ok(Some(updated)) => updated,
            Ok(None) => return ChatReply::fail(EDIT_FAILED),
            Err(e) => {
                tracing::error!("Failed to update event {} for {}: {}", target.id, owner_id, e);
                return ChatReply::fail(EDIT_FAILED);
            }
        };

        self.refresh_schedule(owner_id, now).await;

        if !update_confirmed(&update, &updated) {
            tracing::error!(
                "Store echoed event {} without the requested change: {:?}",
                updated.id,
                update
            );
            return ChatReply::fail(EDIT_NOT_CONFIRMED);
        }

        tracing::info!("Updated event {} for {}", updated.id, owner_id);
        ChatReply::ok(format!(
            "Evento \"{}\" atualizado com sucesso para o dia {} às {}. A agenda foi atualizada.",
            updated.title,
            format_date(updated.start, self.offset),
            format_time(updated.start, self.offset)
        ))
    }

    /// Partial update from whatever the message carried; `None` when it asks
    /// for no change.
    ///
    /// A new date keeps the event's time of day and a new time keeps its date.
    /// The duration never changes.
    fn build_update(&self, target: &Event, fields: &ExtractedFields) -> Option<UpdateEventRequest> {
        let mut update = UpdateEventRequest {
            title: fields.new_title.clone(),
            description: fields.description.clone(),
            ..Default::default()
        };

        if fields.date.is_some() || fields.time.is_some() {
            let current = to_local(target.start, self.offset)?;
            let date = fields
                .date
                .and_then(|d| d.to_naive_date())
                .unwrap_or(current.date_naive());
            let time = fields
                .time
                .and_then(|t| t.to_naive_time())
                .unwrap_or(current.time());

            let start = from_local(date, time, self.offset)?;
            update.start = Some(start);
            update.end = Some(start + target.duration_secs());
        }

        (!update.is_empty()).then_some(update)
    }

    async fn refresh_schedule(&self, owner_id: &str, now: i64) {
        self.scheduler
            .refresh_from_store(self.store.as_ref(), owner_id, now)
            .await;
    }
}

fn update_confirmed(requested: &UpdateEventRequest, stored: &Event) -> bool {
    let title_ok = requested
        .title
        .as_ref()
        .map_or(true, |title| title.trim() == stored.title.trim());
    let start_ok = requested
        .start
        .map_or(true, |start| (stored.start - start).abs() <= START_TOLERANCE_SECS);

    title_ok && start_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationsConfig;
    use crate::integrations::{MailTransport, MailTransportError};
    use crate::jobs::{DispatcherSettings, MailDispatcher, MailWorker};
    use crate::storage::InMemoryEventStore;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingTransport {
        subjects: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, _recipient: &str, subject: &str, _body: &str) -> Result<(), MailTransportError> {
            self.subjects.lock().unwrap().push(subject.to_string());
            Ok(())
        }
    }

    /// Store double whose writes always fail
    struct BrokenStore;

    #[async_trait]
    impl EventStore for BrokenStore {
        async fn create(&self, _: &str, _: CreateEventRequest) -> anyhow::Result<Event> {
            anyhow::bail!("disk full")
        }
        async fn get(&self, _: i64, _: &str) -> anyhow::Result<Option<Event>> {
            Ok(None)
        }
        async fn list(&self, _: &str) -> anyhow::Result<Vec<Event>> {
            Ok(vec![])
        }
        async fn update(&self, _: i64, _: &str, _: UpdateEventRequest) -> anyhow::Result<Option<Event>> {
            anyhow::bail!("disk full")
        }
        async fn delete(&self, _: i64, _: &str) -> anyhow::Result<Option<Event>> {
            anyhow::bail!("disk full")
        }
        async fn list_future(&self, _: &str, _: i64) -> anyhow::Result<Vec<Event>> {
            anyhow::bail!("disk full")
        }
        async fn list_future_all(&self, _: i64) -> anyhow::Result<Vec<Event>> {
            anyhow::bail!("disk full")
        }
    }

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn local_ts(month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        from_local(
            NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
            offset(),
        )
        .unwrap()
    }

    /// 2026-06-01 12:00 local
    fn now() -> i64 {
        local_ts(6, 1, 12, 0)
    }

    struct Harness {
        interpreter: CommandInterpreter,
        store: Arc<InMemoryEventStore>,
        worker: MailWorker,
        transport: Arc<RecordingTransport>,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryEventStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let (dispatcher, worker) = MailDispatcher::new(
            transport.clone(),
            DispatcherSettings {
                max_retries: 3,
                send_delay: Duration::ZERO,
                queue_capacity: 64,
            },
        );
        let config = NotificationsConfig {
            recipient: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        let scheduler = Arc::new(NotificationScheduler::new(dispatcher, &config, offset()));
        let interpreter = CommandInterpreter::new(store.clone(), scheduler, offset());

        Harness {
            interpreter,
            store,
            worker,
            transport,
        }
    }

    async fn seed(store: &InMemoryEventStore, title: &str, start: i64) -> Event {
        store
            .create(
                "ana",
                CreateEventRequest {
                    title: title.to_string(),
                    start,
                    end: start + 3600,
                    event_type: EventType::Event,
                    description: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_event() {
        let mut h = harness();

        let reply = h
            .interpreter
            .handle_message_at("ana", "criar evento Dentista no dia 20/06 às 09:00", now())
            .await;

        assert!(reply.success, "{}", reply.text);
        assert!(reply.text.contains("20/06"));
        assert!(reply.text.contains("09:00"));

        let events = h.store.list("ana").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Dentista");
        assert_eq!(events[0].start, local_ts(6, 20, 9, 0));
        assert_eq!(events[0].end, events[0].start + 3600);

        h.worker.drain().await;
        assert_eq!(*h.transport.subjects.lock().unwrap(), vec!["Novo Evento: Dentista"]);
    }

    #[tokio::test]
    async fn test_create_infers_type_and_description() {
        let h = harness();

        let reply = h
            .interpreter
            .handle_message_at(
                "ana",
                "crie um evento Reunião de equipe para o dia 22/06 às 14h descrição: pauta do trimestre",
                now(),
            )
            .await;
        assert!(reply.success, "{}", reply.text);

        let event = &h.store.list("ana").await.unwrap()[0];
        assert_eq!(event.title, "Reunião de equipe");
        assert_eq!(event.event_type, EventType::Meeting);
        assert_eq!(event.description.as_deref(), Some("pauta do trimestre"));
    }

    #[tokio::test]
    async fn test_create_without_time_gives_usage_and_stores_nothing() {
        let h = harness();

        let reply = h
            .interpreter
            .handle_message_at("ana", "criar evento Dentista no dia 20/06", now())
            .await;

        assert!(!reply.success);
        assert_eq!(reply.text, CREATE_USAGE);
        assert!(h.store.list("ana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_view_events() {
        let h = harness();
        let reply = h
            .interpreter
            .handle_message_at("ana", "mostrar próximos eventos", now())
            .await;
        assert!(reply.success);
        assert_eq!(reply.text, NO_UPCOMING_EVENTS);

        seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;
        seed(&h.store, "Passado", local_ts(5, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "mostrar próximos eventos", now())
            .await;
        assert!(reply.text.starts_with("📅 **Sábado, 20/06/2026**"));
        assert!(reply.text.contains("1. Dentista"));
        assert!(!reply.text.contains("Passado"));
    }

    #[tokio::test]
    async fn test_delete_event() {
        let h = harness();
        let event = seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "deletar evento dentista", now())
            .await;

        assert!(reply.success, "{}", reply.text);
        // the stored title, not the typed one
        assert!(reply.text.contains("\"Dentista\""));
        assert!(h.store.get(event.id, "ana").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_narrows_by_day_of_month() {
        let h = harness();
        let first = seed(&h.store, "Aula", local_ts(6, 10, 9, 0)).await;
        let second = seed(&h.store, "Aula", local_ts(6, 15, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "deletar evento Aula do dia 15", now())
            .await;

        assert!(reply.success, "{}", reply.text);
        assert!(h.store.get(first.id, "ana").await.unwrap().is_some());
        assert!(h.store.get(second.id, "ana").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let h = harness();
        seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "deletar evento Academia", now())
            .await;
        assert!(!reply.success);
        assert_eq!(reply.text, DELETE_NOT_FOUND);

        let reply = h
            .interpreter
            .handle_message_at("ana", "deletar evento Dentista do dia 21", now())
            .await;
        assert_eq!(reply.text, DELETE_NOT_FOUND);
        assert_eq!(h.store.list("ana").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_date_keeps_time_and_duration() {
        let h = harness();
        let event = h
            .store
            .create(
                "ana",
                CreateEventRequest {
                    title: "Dentista".to_string(),
                    start: local_ts(6, 20, 9, 0),
                    end: local_ts(6, 20, 10, 30),
                    event_type: EventType::Event,
                    description: None,
                },
            )
            .await
            .unwrap();

        let reply = h
            .interpreter
            .handle_message_at("ana", "editar evento Dentista para o dia 25/06", now())
            .await;
        assert!(reply.success, "{}", reply.text);

        let updated = h.store.get(event.id, "ana").await.unwrap().unwrap();
        assert_eq!(updated.start, local_ts(6, 25, 9, 0));
        assert_eq!(updated.end, local_ts(6, 25, 10, 30));
        assert_eq!(updated.title, "Dentista");
    }

    #[tokio::test]
    async fn test_edit_time_and_title() {
        let h = harness();
        let event = seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "alterar o evento Dentista para as 15h", now())
            .await;
        assert!(reply.success, "{}", reply.text);
        let updated = h.store.get(event.id, "ana").await.unwrap().unwrap();
        assert_eq!(updated.start, local_ts(6, 20, 15, 0));

        let reply = h
            .interpreter
            .handle_message_at("ana", "renomear o evento Dentista para Consulta Médica", now())
            .await;
        assert!(reply.success, "{}", reply.text);
        assert!(reply.text.contains("Consulta Médica"));
        let updated = h.store.get(event.id, "ana").await.unwrap().unwrap();
        assert_eq!(updated.title, "Consulta Médica");
        assert_eq!(updated.start, local_ts(6, 20, 15, 0));
    }

    #[tokio::test]
    async fn test_edit_naming_old_and_new_values_applies_the_new_one() {
        let h = harness();
        let event = seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "mudar o evento Dentista do dia 20/06 para o dia 25/06", now())
            .await;
        assert!(reply.success, "{}", reply.text);
        assert!(reply.text.contains("25/06/2026 às 09:00"), "{}", reply.text);
        let updated = h.store.get(event.id, "ana").await.unwrap().unwrap();
        assert_eq!(updated.start, local_ts(6, 25, 9, 0));

        let reply = h
            .interpreter
            .handle_message_at("ana", "mudar o evento Dentista das 9h para as 15h", now())
            .await;
        assert!(reply.success, "{}", reply.text);
        let updated = h.store.get(event.id, "ana").await.unwrap().unwrap();
        assert_eq!(updated.start, local_ts(6, 25, 15, 0));
        assert_eq!(updated.duration_secs(), 3600);
    }

    #[tokio::test]
    async fn test_edit_without_changes_asks_for_clarification() {
        let h = harness();
        seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "editar evento Dentista", now())
            .await;
        assert!(!reply.success);
        assert!(reply.text.starts_with("O que você deseja alterar no evento \"Dentista\"?"));
    }

    #[tokio::test]
    async fn test_edit_unknown_event_lists_current_events() {
        let h = harness();
        seed(&h.store, "Dentista", local_ts(6, 20, 9, 0)).await;

        let reply = h
            .interpreter
            .handle_message_at("ana", "editar evento Academia para o dia 25/06", now())
            .await;
        assert!(!reply.success);
        assert!(reply.text.contains("1. Dentista - 20/06/2026 às 09:00"));
        assert!(reply.text.ends_with(EDIT_USAGE));
    }

    #[tokio::test]
    async fn test_store_failures_are_reported() {
        let transport = Arc::new(RecordingTransport::default());
        let (dispatcher, _worker) = MailDispatcher::new(transport, DispatcherSettings::default());
        let scheduler = Arc::new(NotificationScheduler::new(
            dispatcher,
            &NotificationsConfig::default(),
            offset(),
        ));
        let interpreter = CommandInterpreter::new(Arc::new(BrokenStore), scheduler, offset());

        let reply = interpreter
            .handle_message_at("ana", "criar evento Dentista no dia 20/06 às 09:00", now())
            .await;
        assert_eq!(reply, ChatReply::fail(CREATE_FAILED));

        let reply = interpreter
            .handle_message_at("ana", "mostrar próximos eventos", now())
            .await;
        assert_eq!(reply, ChatReply::fail(VIEW_FAILED));

        let reply = interpreter
            .handle_message_at("ana", "deletar evento Dentista", now())
            .await;
        assert_eq!(reply, ChatReply::fail(DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_unrecognized() {
        let h = harness();
        let reply = h.interpreter.handle_message_at("ana", "bom dia", now()).await;
        assert!(!reply.success);
        assert!(reply.text.starts_with("Comando não reconhecido."));
    }

    #[test]
    fn test_update_confirmation_tolerance() {
        let stored = Event {
            id: 1,
            owner_id: "ana".to_string(),
            title: "Dentista".to_string(),
            start: 10_000,
            end: 13_600,
            event_type: EventType::Event,
            description: None,
            created_at: 0,
            updated_at: 0,
        };

        let within = UpdateEventRequest {
            start: Some(10_045),
            ..Default::default()
        };
        assert!(update_confirmed(&within, &stored));

        let outside = UpdateEventRequest {
            start: Some(10_100),
            ..Default::default()
        };
        assert!(!update_confirmed(&outside, &stored));

        let renamed = UpdateEventRequest {
            title: Some("Consulta".to_string()),
            ..Default::default()
        };
        assert!(!update_confirmed(&renamed, &stored));
    }

    #[test]
    fn test_infer_event_type() {
        assert_eq!(infer_event_type("criar evento Reunião de pais"), EventType::Meeting);
        assert_eq!(infer_event_type("criar evento reuniao"), EventType::Meeting);
        assert_eq!(infer_event_type("criar evento Treinamento Rust"), EventType::Training);
        assert_eq!(infer_event_type("criar evento Dentista"), EventType::Event);
    }
}
