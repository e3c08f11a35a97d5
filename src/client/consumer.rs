//! Consumers read the topics they are bound to as part of a consumer group.
//!
//! The broker keeps one offset per (topic, group). A new group starts at the position picked by
//! its [`StartOffset`], resolved when the first [`Consumer`] of that group is built; after that every [`Consumer::stream`] call picks up where the previous
//! one left off, no matter which [`Consumer`] instance of that group made it.
//!
//! ```
//! use std::sync::Arc;
//!
//! use hop_mock::client::ClientBuilder;
//! use hop_mock::{MockBroker, StartOffset};
//!
//! let client = ClientBuilder::new(Arc::new(MockBroker::new())).build();
//! let producer = client.producer("lvk.alerts");
//! producer.write("S200105ae", vec![]);
//!
//! let consumer = client
//!     .consumer(["lvk.alerts"], "archiver")
//!     .with_start_offset(StartOffset::Earliest)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(consumer.stream().count(), 1);
//! assert_eq!(consumer.stream().count(), 0);
//! ```

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tracing::debug;

use crate::broker::{MockBroker, ReadBatch};
use crate::client::error::{Error, Result};
use crate::client::DEFAULT_CLIENT_ID;
use crate::record::Message;

/// Where a consumer group starts reading a topic it has never read before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartOffset {
    /// At the earliest known offset
    Earliest,
    /// After everything currently in the log, so only future writes are seen
    #[default]
    Latest,
    /// At a specific offset
    At(usize),
}

impl StartOffset {
    /// Resolves to a concrete offset for a log that currently holds `len` entries.
    pub(crate) fn resolve(self, len: usize) -> usize {
        match self {
            Self::Earliest => 0,
            Self::Latest => len,
            Self::At(offset) => offset,
        }
    }
}

/// Builder for [`Consumer`].
#[derive(Debug)]
pub struct ConsumerBuilder {
    broker: Arc<MockBroker>,
    topics: Vec<String>,
    group: String,
    start_offset: StartOffset,
    client_id: Arc<str>,
}

impl ConsumerBuilder {
    /// Create a new [`ConsumerBuilder`] for `topics`, tracking progress under `group`.
    pub fn new<I, T>(broker: Arc<MockBroker>, topics: I, group: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            broker,
            topics: topics.into_iter().map(Into::into).collect(),
            group: group.into(),
            start_offset: StartOffset::default(),
            client_id: Arc::from(DEFAULT_CLIENT_ID),
        }
    }

    /// Sets where a group without a stored offset starts. Defaults to [`StartOffset::Latest`].
    pub fn with_start_offset(self, start_offset: StartOffset) -> Self {
        Self {
            start_offset,
            ..self
        }
    }

    pub(crate) fn with_client_id(self, client_id: Arc<str>) -> Self {
        Self { client_id, ..self }
    }

    pub fn build(self) -> Result<Consumer> {
        if self.topics.is_empty() {
            return Err(Error::NoTopics);
        }
        if self.group.is_empty() {
            return Err(Error::EmptyGroupId);
        }

        let mut topics = self.topics;
        // keep first occurrence so reads still follow the requested order
        let mut seen = std::collections::HashSet::new();
        topics.retain(|topic| seen.insert(topic.clone()));

        // pin the start position now, so writes between build and the first stream are seen
        self.broker.join(&topics, &self.group, self.start_offset);

        debug!(
            client_id = %self.client_id,
            group = self.group.as_str(),
            ?topics,
            start_offset = ?self.start_offset,
            "Opening consumer",
        );

        Ok(Consumer {
            broker: self.broker,
            topics,
            group: self.group,
            start_offset: self.start_offset,
        })
    }
}

/// Reads a fixed set of topics as part of a consumer group.
#[derive(Debug)]
pub struct Consumer {
    broker: Arc<MockBroker>,
    topics: Vec<String>,
    group: String,
    start_offset: StartOffset,
}

impl Consumer {
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn start_offset(&self) -> StartOffset {
        self.start_offset
    }

    /// Checks that every topic in `topics` is one this consumer was built with.
    ///
    /// This never changes what the consumer reads.
    pub fn subscribe<I, T>(&self, topics: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for topic in topics {
            let topic = topic.as_ref();
            if !self.topics.iter().any(|t| t == topic) {
                return Err(Error::NotSubscribed {
                    topic: topic.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns every message the group has not seen yet, topic by topic.
    ///
    /// The group's offsets are advanced when this is called, not while the stream is consumed.
    pub fn stream(&self) -> MessageStream {
        MessageStream {
            batch: self
                .broker
                .read(&self.topics, &self.group, self.start_offset),
        }
    }

    /// Releases the consumer. Offsets stay with the broker.
    pub fn close(self) {}
}

/// Messages produced by [`Consumer::stream`].
///
/// Usable both as an [`Iterator`] and as a [`Stream`] that is always ready.
#[derive(Debug)]
pub struct MessageStream {
    batch: ReadBatch,
}

impl MessageStream {
    /// Number of messages not yet yielded.
    pub fn remaining(&self) -> usize {
        self.batch.remaining()
    }
}

impl Iterator for MessageStream {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        self.batch.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.batch.size_hint()
    }
}

impl ExactSizeIterator for MessageStream {}

impl Stream for MessageStream {
    type Item = Message;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().batch.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.batch.size_hint()
    }
}
