//! Records log entries and mirrors them as tracing events.

use mars_rover_core::{LogEntry, LogSink};

pub(crate) fn info<L>(log: &mut L, message: impl Into<String>)
where
    L: LogSink + ?Sized,
{
    let entry = LogEntry::info(message);
    tracing::debug!(target: "mars_rover_world", "{entry}");
    log.record(entry);
}

pub(crate) fn error<L>(log: &mut L, message: impl Into<String>)
where
    L: LogSink + ?Sized,
{
    let entry = LogEntry::error(message);
    tracing::warn!(target: "mars_rover_world", "{entry}");
    log.record(entry);
}
