use std::collections::BTreeMap;

use chrono::Utc;

use crate::record::{Record, RecordAndOffset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// The name of this topic.
    pub name: String,

    /// Number of entries in the topic log.
    pub len: usize,

    /// Next-read offset of every consumer group that has read this topic.
    pub groups: BTreeMap<String, usize>,
}

/// Append-only log backing a single topic.
#[derive(Debug, Default)]
pub(crate) struct TopicLog {
    entries: Vec<RecordAndOffset>,
}

impl TopicLog {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends a record and returns its offset.
    pub(crate) fn append(&mut self, record: Record) -> usize {
        let offset = self.entries.len();
        self.entries.push(RecordAndOffset {
            record,
            offset,
            timestamp: Utc::now(),
        });
        offset
    }

    pub(crate) fn contains(&self, record: &Record) -> bool {
        self.entries.iter().any(|entry| &entry.record == record)
    }

    /// Entries from `offset` to the current end of the log.
    ///
    /// Offsets past the end yield an empty slice.
    pub(crate) fn tail(&self, offset: usize) -> &[RecordAndOffset] {
        self.entries.get(offset..).unwrap_or_default()
    }
}
