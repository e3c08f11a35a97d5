use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Ordered message headers.
///
/// Keys may repeat and order is significant, so two header lists with the same pairs in a
/// different order are different.
pub type Headers = Vec<(String, Bytes)>;

/// A payload together with its headers, as written by a producer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub value: Bytes,
    pub headers: Headers,
}

impl Record {
    pub fn new(value: impl Into<Bytes>, headers: Headers) -> Self {
        Self {
            value: value.into(),
            headers,
        }
    }

    /// Approximate in-memory size of the payload and headers.
    pub fn approximate_size(&self) -> usize {
        self.value.len()
            + self
                .headers
                .iter()
                .map(|(k, v)| k.len() + v.len())
                .sum::<usize>()
    }
}

/// A [`Record`] with the position and time at which it was appended to a topic log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAndOffset {
    pub record: Record,
    pub offset: usize,
    pub timestamp: DateTime<Utc>,
}

/// A message handed out by a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    topic: String,
    inner: RecordAndOffset,
}

impl Message {
    pub(crate) fn new(topic: String, inner: RecordAndOffset) -> Self {
        Self { topic, inner }
    }

    /// The message payload.
    pub fn value(&self) -> &Bytes {
        &self.inner.record.value
    }

    /// The message headers, in write order.
    pub fn headers(&self) -> &[(String, Bytes)] {
        &self.inner.record.headers
    }

    /// Topic the message was read from.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Position of the message within its topic log.
    pub fn offset(&self) -> usize {
        self.inner.offset
    }

    /// Time at which the message was written.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.inner.timestamp
    }

    pub fn record(&self) -> &Record {
        &self.inner.record
    }

    pub fn into_record(self) -> Record {
        self.inner.record
    }
}
