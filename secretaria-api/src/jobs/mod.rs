pub mod mail_dispatcher;
pub mod notification_scheduler;

pub use mail_dispatcher::{DispatchError, DispatcherSettings, MailDispatcher, MailJob, MailWorker};
pub use notification_scheduler::{NotificationKind, NotificationScheduler};
