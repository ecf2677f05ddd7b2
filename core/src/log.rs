use std::fmt;

use serde::{Deserialize, Serialize};

/// Distinguishes informational entries from error entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Progress message emitted while the simulation runs.
    Info,
    /// Anomaly affecting a single rover, such as a blocked move.
    Error,
}

/// Single entry of the execution log.
///
/// Entries carry no structure beyond their kind; consumers rely on emission
/// order only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    kind: LogKind,
    message: String,
}

impl LogEntry {
    /// Creates an informational entry.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Info,
            message: message.into(),
        }
    }

    /// Creates an error entry.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Error,
            message: message.into(),
        }
    }

    /// Kind of the entry.
    #[must_use]
    pub const fn kind(&self) -> LogKind {
        self.kind
    }

    /// Reports whether the entry describes an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == LogKind::Error
    }

    /// Plain text payload of the entry.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Destination for entries produced by the plateau and its rovers.
pub trait LogSink {
    /// Appends an entry. Entries are never removed by the engine.
    fn record(&mut self, entry: LogEntry);
}

impl LogSink for Vec<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}

impl<S> LogSink for &mut S
where
    S: LogSink + ?Sized,
{
    fn record(&mut self, entry: LogEntry) {
        (**self).record(entry);
    }
}

/// Append-only, ordered log shared by a plateau and all of its rovers for
/// the duration of one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLog {
    entries: Vec<LogEntry>,
}

impl ExecutionLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Iterator over entries in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Iterator over the error entries only.
    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|entry| entry.is_error())
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whether any entry contains `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|entry| entry.message.contains(text))
    }

    /// Discards every entry. Used between simulation runs.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consumes the log, yielding the entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl LogSink for ExecutionLog {
    fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a ExecutionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
