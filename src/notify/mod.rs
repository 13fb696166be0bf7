//! Outbound notification traits and the best-effort facade.
//!
//! Domain code emits emails and real-time events without coupling to a
//! delivery transport. Concrete adapters (SMTP relay, socket gateway)
//! implement the traits; the [`Notifier`] facade swallows their failures,
//! because a state transition is considered successful even when its
//! notification never arrives.

pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors returned by notification adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No delivery transport is configured for this runtime.
    #[error("notification transport unavailable")]
    Unavailable,
    /// The transport refused the message.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Unavailable`] if no transport is configured,
    /// or [`NotifyError::Rejected`] if delivery fails.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Real-time event delivery to a named channel.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to a channel.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Unavailable`] if no transport is configured,
    /// or [`NotifyError::Rejected`] if delivery fails.
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError>;
}

/// Mailer that reports an unavailable transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable)
    }
}

/// Publisher that reports an unavailable transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(
        &self,
        _channel: &str,
        _event: &str,
        _payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Unavailable)
    }
}

/// Fire-and-forget notification facade.
///
/// Failures are logged and dropped; callers never see them.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    events: Arc<dyn EventPublisher>,
}

impl Notifier {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, events: Arc<dyn EventPublisher>) -> Self {
        Self { mailer, events }
    }

    /// A notifier with no transports; every delivery is dropped (and logged).
    #[must_use]
    pub fn disconnected() -> Self {
        Self::new(Arc::new(NoopMailer), Arc::new(NoopPublisher))
    }

    /// Private channel name for a user's real-time events.
    #[must_use]
    pub fn user_channel(user_id: i32) -> String { format!("user:{user_id}") }

    /// Send an email, dropping any delivery failure.
    pub async fn email(&self, to: &str, subject: &str, body: &str) {
        if let Err(err) = self.mailer.send(to, subject, body).await {
            warn!(%err, to, subject, "dropping undeliverable email");
        }
    }

    /// Publish a real-time event, dropping any delivery failure.
    pub async fn publish(&self, channel: &str, event: &str, payload: serde_json::Value) {
        if let Err(err) = self.events.publish(channel, event, payload).await {
            warn!(%err, channel, event, "dropping undeliverable event");
        }
    }
}
