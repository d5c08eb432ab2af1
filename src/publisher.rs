//! Publishes domain events to NATS when a server is configured.

use std::fmt;

use crate::domain::events::DomainEvent;

#[derive(Clone, Default)]
pub struct EventPublisher {
    nats: Option<async_nats::Client>,
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher").field("enabled", &self.is_enabled()).finish()
    }
}

impl EventPublisher {
    /// Events are logged and dropped.
    pub fn disabled() -> Self { Self::default() }

    /// Connects to `url` if given. A failed connection disables publishing rather
    /// than stopping the store.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else { return Self::disabled() };
        match async_nats::connect(url).await {
            Ok(client) => {
                tracing::info!(url, "connected to NATS");
                Self { nats: Some(client) }
            }
            Err(error) => {
                tracing::warn!(url, %error, "NATS unavailable, order events will not be published");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool { self.nats.is_some() }

    pub async fn publish(&self, event: &DomainEvent) {
        let subject = event.subject();
        let Some(client) = &self.nats else {
            tracing::debug!(subject, ?event, "event publishing disabled");
            return;
        };
        let payload = match event.to_json() {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(subject, %error, "failed to encode event");
                return;
            }
        };
        if let Err(error) = client.publish(subject.to_string(), payload.into()).await {
            tracing::warn!(subject, %error, "failed to publish event");
        }
    }
}
