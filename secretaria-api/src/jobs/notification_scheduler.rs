use crate::config::{NotificationsConfig, ReminderThreshold};
use crate::helpers::local_time::{format_date, format_time};
use crate::jobs::mail_dispatcher::MailDispatcher;
use crate::storage::EventStore;
use anyhow::Result;
use chrono::FixedOffset;
use shared_types::Event;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Created,
    /// Keyed by the threshold label
    Reminder(String),
}

#[derive(Default)]
struct SchedulerState {
    /// Last known upcoming events per owner
    mirrors: HashMap<String, Vec<Event>>,
    sent: HashSet<(i64, NotificationKind)>,
    /// Set once every stored owner has a mirror; a missing mirror then means no events
    seeded: bool,
}

pub struct NotificationScheduler {
    state: Mutex<SchedulerState>,
    dispatcher: MailDispatcher,
    recipient: Option<String>,
    thresholds: Vec<ReminderThreshold>,
    window_minutes: i64,
    offset: FixedOffset,
    shutting_down: AtomicBool,
}

impl NotificationScheduler {
    pub fn new(dispatcher: MailDispatcher, config: &NotificationsConfig, offset: FixedOffset) -> Self {
        if config.recipient.is_none() {
            tracing::warn!("No notification recipient configured, reminders will not be sent");
        }

        Self {
            state: Mutex::new(SchedulerState::default()),
            dispatcher,
            recipient: config.recipient.clone(),
            thresholds: config.thresholds.clone(),
            window_minutes: config.window_minutes,
            offset,
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Load every owner's upcoming events so a restart does not re-announce them
    pub async fn seed_from_store(&self, store: &dyn EventStore, now: i64) -> Result<usize> {
        let events = store.list_future_all(now).await?;
        let count = events.len();

        let mut by_owner: HashMap<String, Vec<Event>> = HashMap::new();
        for event in events {
            by_owner.entry(event.owner_id.clone()).or_default().push(event);
        }

        let mut state = self.state.lock().await;
        let owners = by_owner.len();
        state.mirrors.extend(by_owner);
        state.seeded = true;
        drop(state);

        tracing::info!("Seeded scheduler with {} events for {} owners", count, owners);
        Ok(count)
    }

    /// Replace an owner's mirror, announcing events it did not contain before.
    ///
    /// After `seed_from_store` an owner without a mirror is diffed against an
    /// empty one. Before it, the first update for an owner only seeds the
    /// mirror. Returns the number of notices queued.
    pub async fn update_events(&self, owner_id: &str, events: Vec<Event>) -> usize {
        let mut state = self.state.lock().await;

        let previous: Option<HashSet<i64>> = state
            .mirrors
            .get(owner_id)
            .map(|mirror| mirror.iter().map(|e| e.id).collect());

        let known = match previous {
            Some(known) => known,
            None if state.seeded => HashSet::new(),
            None => {
                tracing::debug!("Seeding mirror for {} with {} events", owner_id, events.len());
                state.mirrors.insert(owner_id.to_string(), events);
                return 0;
            }
        };

        let added: Vec<Event> = events
            .iter()
            .filter(|e| !known.contains(&e.id))
            .cloned()
            .collect();

        state.mirrors.insert(owner_id.to_string(), events);

        let mut queued = 0;
        for event in &added {
            if self.send_created_notice(&mut state, event) {
                queued += 1;
            }
        }

        if queued > 0 {
            tracing::info!("Queued {} new-event notices for {}", queued, owner_id);
        }
        queued
    }

    /// Re-read an owner's upcoming events and diff them into the mirror
    pub async fn refresh_from_store(&self, store: &dyn EventStore, owner_id: &str, now: i64) {
        match store.list_future(owner_id, now).await {
            Ok(events) => {
                self.update_events(owner_id, events).await;
            }
            Err(e) => {
                tracing::warn!("Failed to refresh notification schedule for {}: {}", owner_id, e);
            }
        }
    }

    /// Announce a freshly created event right away
    pub async fn notify_created(&self, owner_id: &str, event: &Event) -> bool {
        let mut state = self.state.lock().await;

        let seeded = state.seeded;
        let mirror = if seeded {
            Some(state.mirrors.entry(owner_id.to_string()).or_default())
        } else {
            state.mirrors.get_mut(owner_id)
        };
        if let Some(mirror) = mirror {
            if !mirror.iter().any(|e| e.id == event.id) {
                mirror.push(event.clone());
                mirror.sort_by_key(|e| (e.start, e.id));
            }
        }

        self.send_created_notice(&mut state, event)
    }

    /// One pass over all mirrors. Returns the number of reminders queued.
    pub async fn check_reminders(&self, now: i64) -> usize {
        let mut state = self.state.lock().await;

        let mut due: Vec<(Event, ReminderThreshold)> = Vec::new();
        for event in state.mirrors.values().flatten() {
            if event.start <= now {
                continue;
            }

            let minutes_until = ((event.start - now) as f64 / 60.0).round() as i64;

            for threshold in &self.thresholds {
                let window_start = threshold.minutes - self.window_minutes;
                if minutes_until < window_start || minutes_until > threshold.minutes {
                    continue;
                }
                let key = (event.id, NotificationKind::Reminder(threshold.label.clone()));
                if !state.sent.contains(&key) {
                    due.push((event.clone(), threshold.clone()));
                }
            }
        }

        let mut queued = 0;
        for (event, threshold) in due {
            let subject = format!("Lembrete: {} - Em {}", event.title, threshold.label);
            let body = email_body(&event, Some(&threshold.label), self.offset);
            let kind = NotificationKind::Reminder(threshold.label);

            if self.enqueue_once(&mut state, event.id, kind, subject, body) {
                queued += 1;
            }
        }

        queued
    }

    fn send_created_notice(&self, state: &mut SchedulerState, event: &Event) -> bool {
        let subject = format!("Novo Evento: {}", event.title);
        let body = email_body(event, None, self.offset);
        self.enqueue_once(state, event.id, NotificationKind::Created, subject, body)
    }

    /// Queues the mail unless `(event_id, kind)` was already sent; records it on success
    fn enqueue_once(
        &self,
        state: &mut SchedulerState,
        event_id: i64,
        kind: NotificationKind,
        subject: String,
        body: String,
    ) -> bool {
        let key = (event_id, kind);
        if state.sent.contains(&key) {
            return false;
        }

        let Some(recipient) = &self.recipient else {
            tracing::error!("Notification recipient not configured, skipping \"{}\"", subject);
            return false;
        };

        match self.dispatcher.enqueue(recipient.as_str(), subject, body) {
            Ok(_) => {
                state.sent.insert(key);
                true
            }
            Err(e) => {
                tracing::warn!("Could not queue notification for event {}: {}", event_id, e);
                false
            }
        }
    }

    pub async fn run(self: Arc<Self>, period: Duration) {
        tracing::info!("Notification scheduler ticking every {:?}", period);
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;
            if self.is_shutting_down() {
                break;
            }

            let now = chrono::Utc::now().timestamp();
            let queued = self.check_reminders(now).await;
            if queued > 0 {
                tracing::info!("Queued {} reminders", queued);
            }
        }

        tracing::info!("Notification scheduler stopped");
    }

    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}

/// Plain-text mail body; `lead` is the reminder lead time, `None` for a new event
pub fn email_body(event: &Event, lead: Option<&str>, offset: FixedOffset) -> String {
    let intro = match lead {
        None => "Um novo evento foi adicionado à sua agenda:".to_string(),
        Some(lead) => format!("Este é um lembrete para seu evento que acontecerá em {}:", lead),
    };

    let mut body = format!(
        "Olá!\n\n{}\n\nEvento: {}\nData: {} às {}\n",
        intro,
        event.title,
        format_date(event.start, offset),
        format_time(event.start, offset),
    );
    if let Some(description) = &event.description {
        body.push_str(&format!("Descrição: {}\n", description));
    }
    body.push_str("\nAtenciosamente,\nSecretarIA");

    body
}
