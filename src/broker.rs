//! In-memory broker.
//!
//! Every topic is an append-only log. Consumer groups track their progress with one cursor per
//! (topic, group) pair, created when a consumer of that group joins the topic (or on the first
//! read, for callers going straight to the broker) and moved forward by every read after that. Nothing is ever persisted, and [`MockBroker::reset`] drops all logs and cursors.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::client::consumer::StartOffset;
use crate::record::{Message, Record};
use crate::topic::{Topic, TopicLog};

#[derive(Debug, Default)]
struct State {
    /// Topic logs keyed by topic name
    logs: HashMap<String, TopicLog>,

    /// topic -> group -> next offset to read
    offsets: HashMap<String, BTreeMap<String, usize>>,
}

/// An in-memory topic store with per-group read cursors.
///
/// The broker is meant to be constructed by a test, wrapped in an [`Arc`](std::sync::Arc) and
/// passed to the [`Client`](crate::client::Client) instead of living in global state.
#[derive(Debug, Default)]
pub struct MockBroker {
    state: RwLock<State>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the log of `topic`, creating the topic if needed.
    ///
    /// Returns the offset of the new entry. Existing consumer offsets are untouched.
    pub fn write(&self, topic: &str, record: Record) -> usize {
        let size = record.approximate_size();

        let mut state = self.state.write();
        let offset = state
            .logs
            .entry(topic.to_string())
            .or_default()
            .append(record);

        debug!(topic, offset, size, "Appended message");

        offset
    }

    /// Returns true if an identical record exists anywhere in the log of `topic`.
    pub fn has_message(&self, topic: &str, record: &Record) -> bool {
        self.state
            .read()
            .logs
            .get(topic)
            .map(|log| log.contains(record))
            .unwrap_or_default()
    }

    /// Reads everything the group has not seen yet from each topic, in the order given.
    ///
    /// On the first read of a (topic, group) pair its offset is initialized from `start_at`.
    /// The unread entries are copied out and the offset is moved past them before this
    /// function returns, so the returned batch can be consumed partially or dropped without
    /// affecting what the next read returns.
    pub fn read<I, T>(&self, topics: I, group: &str, start_at: StartOffset) -> ReadBatch
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut state = self.state.write();
        let State { logs, offsets } = &mut *state;

        let mut messages = Vec::new();
        for topic in topics {
            let topic = topic.as_ref();
            let log = logs.get(topic);
            let len = log.map(TopicLog::len).unwrap_or_default();

            let offset = group_offset(offsets, topic, group, len, start_at);

            let Some(log) = log else {
                continue;
            };

            let tail = log.tail(*offset);
            *offset += tail.len();

            debug!(
                topic,
                group,
                count = tail.len(),
                next_offset = *offset,
                "Read messages",
            );

            messages.extend(
                tail.iter()
                    .cloned()
                    .map(|entry| Message::new(topic.to_string(), entry)),
            );
        }

        ReadBatch {
            inner: messages.into_iter(),
        }
    }

    /// Records where `group` starts reading each of `topics`, without reading anything.
    ///
    /// Pairs that already have an offset keep it. Joining at [`StartOffset::Latest`] pins the
    /// offset to the current end of the log, so every write after this call is delivered.
    pub fn join<I, T>(&self, topics: I, group: &str, start_at: StartOffset)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut state = self.state.write();
        let State { logs, offsets } = &mut *state;

        for topic in topics {
            let topic = topic.as_ref();
            let len = logs.get(topic).map(TopicLog::len).unwrap_or_default();
            group_offset(offsets, topic, group, len, start_at);
        }
    }

    /// Drops all topic logs and consumer offsets.
    pub fn reset(&self) {
        let mut state = self.state.write();
        let topics = state.logs.len();
        state.logs.clear();
        state.offsets.clear();

        info!(topics, "Reset broker");
    }

    /// Returns the next offset `group` will read from `topic`, if the group has read it before.
    pub fn offset(&self, topic: &str, group: &str) -> Option<usize> {
        self.state
            .read()
            .offsets
            .get(topic)
            .and_then(|groups| groups.get(group))
            .copied()
    }

    /// Number of entries in the log of `topic`.
    pub fn len(&self, topic: &str) -> usize {
        self.state
            .read()
            .logs
            .get(topic)
            .map(TopicLog::len)
            .unwrap_or_default()
    }

    /// Names of all topics that have been written to, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut topics = self.state.read().logs.keys().cloned().collect::<Vec<_>>();
        topics.sort();
        topics
    }

    /// Returns every known topic with its size and consumer group offsets, sorted by name.
    ///
    /// Topics that were only ever read (never written) are included with a length of zero.
    pub fn list_topics(&self) -> Vec<Topic> {
        let state = self.state.read();

        let mut names = state
            .logs
            .keys()
            .chain(state.offsets.keys())
            .cloned()
            .collect::<Vec<_>>();
        names.sort();
        names.dedup();

        names
            .into_iter()
            .map(|name| Topic {
                len: state.logs.get(&name).map(TopicLog::len).unwrap_or_default(),
                groups: state.offsets.get(&name).cloned().unwrap_or_default(),
                name,
            })
            .collect()
    }
}

/// Offset of (topic, group), initialized from `start_at` if the pair has none yet.
fn group_offset<'a>(
    offsets: &'a mut HashMap<String, BTreeMap<String, usize>>,
    topic: &str,
    group: &str,
    len: usize,
    start_at: StartOffset,
) -> &'a mut usize {
    offsets
        .entry(topic.to_string())
        .or_default()
        .entry(group.to_string())
        .or_insert_with(|| {
            let offset = start_at.resolve(len);
            info!(
                topic,
                group,
                offset,
                ?start_at,
                "Initialized consumer group offset",
            );
            offset
        })
}

/// Messages returned by a single [`MockBroker::read`] call.
///
/// The batch is a snapshot: it owns its messages and holds no reference to the broker.
#[derive(Debug)]
pub struct ReadBatch {
    inner: std::vec::IntoIter<Message>,
}

impl ReadBatch {
    /// Number of messages not yet yielded.
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }
}

impl Iterator for ReadBatch {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ReadBatch {}
