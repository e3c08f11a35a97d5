use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::broker::MockBroker;
use crate::client::error::Result;
use crate::record::{Headers, Record};

/// Writes messages to a single topic of a [`MockBroker`].
///
/// Writes are applied to the broker immediately. Delivery reports are not modeled: a callback
/// passed to [`Producer::write_with_callback`] is accepted and never called.
#[derive(Debug)]
pub struct Producer {
    broker: Arc<MockBroker>,
    topic: String,
}

impl Producer {
    pub(crate) fn new(broker: Arc<MockBroker>, topic: String) -> Self {
        Self { broker, topic }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Appends a message to the topic and returns its offset.
    pub fn write(&self, value: impl Into<Bytes>, headers: Headers) -> usize {
        self.broker.write(&self.topic, Record::new(value, headers))
    }

    /// Like [`write`](Self::write), but takes a delivery callback.
    pub fn write_with_callback<F>(
        &self,
        value: impl Into<Bytes>,
        headers: Headers,
        callback: F,
    ) -> usize
    where
        F: FnOnce(Result<usize>),
    {
        trace!(topic = self.topic.as_str(), "Dropping delivery callback");
        drop(callback);

        self.write(value, headers)
    }

    /// Releases the producer.
    pub fn close(self) {}
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::client::consumer::StartOffset;

    use super::*;

    #[test]
    fn write_appends_to_topic() {
        let broker = Arc::new(MockBroker::new());
        let producer = Producer::new(Arc::clone(&broker), "t".to_owned());

        assert_eq!(producer.write("a", vec![]), 0);
        assert_eq!(producer.write("b", vec![("k".to_owned(), "v".into())]), 1);
        producer.close();

        assert!(broker.has_message(
            "t",
            &Record::new("b", vec![("k".to_owned(), "v".into())])
        ));
        assert_eq!(broker.read(["t"], "g", StartOffset::Earliest).count(), 2);
    }

    #[test]
    fn delivery_callback_is_never_called() {
        let broker = Arc::new(MockBroker::new());
        let producer = Producer::new(Arc::clone(&broker), "t".to_owned());

        let called = Cell::new(false);
        producer.write_with_callback("a", vec![], |_| called.set(true));

        assert!(!called.get());
        assert_eq!(broker.len("t"), 1);
    }
}
