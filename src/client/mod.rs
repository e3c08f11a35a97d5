use std::sync::Arc;

use tracing::debug;

use crate::broker::MockBroker;

pub mod consumer;
pub mod error;
pub mod producer;

use consumer::ConsumerBuilder;
use producer::Producer;

/// Client ID used when none is configured.
pub const DEFAULT_CLIENT_ID: &str = "hop-mock";

/// Builder for [`Client`].
pub struct ClientBuilder {
    broker: Arc<MockBroker>,
    client_id: Option<Arc<str>>,
}

impl ClientBuilder {
    /// Create a new [`ClientBuilder`] bound to the given broker.
    pub fn new(broker: Arc<MockBroker>) -> Self {
        Self {
            broker,
            client_id: None,
        }
    }

    /// Sets client ID.
    pub fn client_id(mut self, client_id: impl Into<Arc<str>>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Build [`Client`].
    pub fn build(self) -> Client {
        Client {
            broker: self.broker,
            client_id: self
                .client_id
                .unwrap_or_else(|| Arc::from(DEFAULT_CLIENT_ID)),
        }
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder").finish_non_exhaustive()
    }
}

/// Top-level client.
///
/// Hands out [`Producer`]s and consumers that share one [`MockBroker`].
///
/// Must be constructed using [`ClientBuilder`].
#[derive(Debug, Clone)]
pub struct Client {
    broker: Arc<MockBroker>,
    client_id: Arc<str>,
}

impl Client {
    /// Opens a producer writing to `topic`.
    pub fn producer(&self, topic: impl Into<String>) -> Producer {
        let topic = topic.into();
        debug!(client_id = %self.client_id, topic = topic.as_str(), "Opening producer");

        Producer::new(Arc::clone(&self.broker), topic)
    }

    /// Returns a builder for a consumer reading `topics` as part of `group`.
    pub fn consumer<I, T>(&self, topics: I, group: impl Into<String>) -> ConsumerBuilder
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ConsumerBuilder::new(Arc::clone(&self.broker), topics, group)
            .with_client_id(Arc::clone(&self.client_id))
    }

    /// The broker shared by everything this client opens.
    pub fn broker(&self) -> &Arc<MockBroker> {
        &self.broker
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}
