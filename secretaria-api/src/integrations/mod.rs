pub mod mail_transport;

pub use mail_transport::{HttpRelayTransport, LogMailTransport, MailTransport, MailTransportError};
