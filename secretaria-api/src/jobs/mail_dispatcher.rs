use crate::config::MailConfig;
use crate::integrations::MailTransport;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MailJob {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Failed delivery attempts so far
    pub attempts: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Mail queue is full")]
    QueueFull,

    #[error("Mail worker is not running")]
    WorkerGone,
}

#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub max_retries: u32,
    pub send_delay: Duration,
    pub queue_capacity: usize,
}

impl From<&MailConfig> for DispatcherSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            send_delay: Duration::from_millis(config.send_delay_ms),
            queue_capacity: config.queue_capacity.max(1),
        }
    }
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self::from(&MailConfig::default())
    }
}

/// Producer side of the mail queue. Cheap to clone; never waits.
#[derive(Clone)]
pub struct MailDispatcher {
    sender: mpsc::Sender<MailJob>,
}

impl MailDispatcher {
    /// Creates the handle and the single worker that owns the queue
    pub fn new(transport: Arc<dyn MailTransport>, settings: DispatcherSettings) -> (Self, MailWorker) {
        let (sender, receiver) = mpsc::channel(settings.queue_capacity);

        let worker = MailWorker {
            receiver,
            queue: VecDeque::new(),
            transport,
            max_retries: settings.max_retries,
            send_delay: settings.send_delay,
            capacity: settings.queue_capacity,
        };

        (Self { sender }, worker)
    }

    pub fn enqueue(
        &self,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Uuid, DispatchError> {
        let job = MailJob {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            attempts: 0,
        };
        let id = job.id;

        match self.sender.try_send(job) {
            Ok(()) => {
                tracing::debug!("Queued mail {}", id);
                Ok(id)
            }
            Err(mpsc::error::TrySendError::Full(job)) => {
                tracing::warn!("Mail queue full, dropping \"{}\" for {}", job.subject, job.recipient);
                Err(DispatchError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                tracing::error!("Mail worker stopped, dropping \"{}\"", job.subject);
                Err(DispatchError::WorkerGone)
            }
        }
    }
}

pub struct MailWorker {
    receiver: mpsc::Receiver<MailJob>,
    queue: VecDeque<MailJob>,
    transport: Arc<dyn MailTransport>,
    max_retries: u32,
    send_delay: Duration,
    /// Jobs held past this stay in the channel, so `enqueue` sees it full
    capacity: usize,
}

impl MailWorker {
    /// Runs until every `MailDispatcher` handle is dropped, then drains what is left
    pub async fn run(mut self) {
        tracing::info!("Mail worker started");

        while let Some(job) = self.receiver.recv().await {
            self.queue.push_back(job);
            self.drain().await;
        }

        self.drain().await;
        tracing::info!("Mail worker stopped");
    }

    /// Sends everything already queued or waiting in the channel
    pub async fn drain(&mut self) {
        self.collect_arrivals();

        while let Some(mut job) = self.queue.pop_front() {
            match self
                .transport
                .send(&job.recipient, &job.subject, &job.body)
                .await
            {
                Ok(()) => {
                    tracing::info!("Mail \"{}\" sent to {}", job.subject, job.recipient);
                }
                Err(e) => {
                    job.attempts += 1;
                    if job.attempts <= self.max_retries {
                        tracing::warn!(
                            "Mail \"{}\" failed (attempt {}/{}): {}",
                            job.subject,
                            job.attempts,
                            self.max_retries + 1,
                            e
                        );
                        self.queue.push_back(job);
                    } else {
                        tracing::error!(
                            "Dropping mail \"{}\" for {} after {} attempts: {}",
                            job.subject,
                            job.recipient,
                            job.attempts,
                            e
                        );
                    }
                }
            }

            if !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }
            self.collect_arrivals();
        }
    }

    fn collect_arrivals(&mut self) {
        while self.queue.len() < self.capacity {
            match self.receiver.try_recv() {
                Ok(job) => self.queue.push_back(job),
                Err(_) => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
