//! Scene log channels.
//!
//! The scene reports two kinds of events: collision decisions and population
//! changes (spawn, flush, cull). Both go through a [`SceneLog`] handed to the
//! scene at construction. [`TracingLog`] forwards them to `tracing` under the
//! [`COLLISION_TARGET`] and [`POPULATION_TARGET`] targets.
//!
//! Every line carries a `mm:ss.SSS` stamp of the frame that produced it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

pub const COLLISION_TARGET: &str = "hopline::collision";
pub const POPULATION_TARGET: &str = "hopline::population";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Collision,
    Population,
}

/// Formats a millisecond timestamp as `mm:ss.SSS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp(pub u64);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
        {
            Some(time) => write!(f, "{}", time.format("%M:%S%.3f")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Sink for scene log events. Implementations must not feed anything back
/// into the simulation.
pub trait SceneLog {
    fn record(&self, channel: Channel, stamp: Timestamp, message: fmt::Arguments<'_>);
}

/// Forwards scene events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl SceneLog for TracingLog {
    fn record(&self, channel: Channel, stamp: Timestamp, message: fmt::Arguments<'_>) {
        match channel {
            Channel::Collision => tracing::debug!(target: COLLISION_TARGET, "{stamp} {message}"),
            Channel::Population => tracing::debug!(target: POPULATION_TARGET, "{stamp} {message}"),
        }
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    entries: Rc<RefCell<Vec<(Channel, String)>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatted lines recorded on `channel`, oldest first.
    pub fn lines(&self, channel: Channel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl SceneLog for MemoryLog {
    fn record(&self, channel: Channel, stamp: Timestamp, message: fmt::Arguments<'_>) {
        self.entries
            .borrow_mut()
            .push((channel, format!("{stamp} {message}")));
    }
}

/// The scene's handle on its log: the sink plus the current frame stamp.
pub(crate) struct FrameLog {
    sink: Box<dyn SceneLog>,
    stamp: Timestamp,
}

impl FrameLog {
    pub(crate) fn new(sink: Box<dyn SceneLog>) -> Self {
        Self {
            sink,
            stamp: Timestamp(0),
        }
    }

    pub(crate) fn set_frame_time(&mut self, millis: u64) {
        self.stamp = Timestamp(millis);
    }

    pub(crate) fn collision(&self, message: fmt::Arguments<'_>) {
        self.sink.record(Channel::Collision, self.stamp, message);
    }

    pub(crate) fn population(&self, message: fmt::Arguments<'_>) {
        self.sink.record(Channel::Population, self.stamp, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        assert_eq!(Timestamp(0).to_string(), "00:00.000");
        assert_eq!(Timestamp(61_234).to_string(), "01:01.234");
        // Minutes wrap at the hour, like a wall clock.
        assert_eq!(Timestamp(3_600_000 + 5_007).to_string(), "00:05.007");
    }

    #[test]
    fn test_memory_log_separates_channels() {
        let log = MemoryLog::new();
        let mut frame_log = FrameLog::new(Box::new(log.clone()));
        frame_log.set_frame_time(1_500);
        frame_log.collision(format_args!("collision with block"));
        frame_log.population(format_args!("pop object"));

        assert_eq!(log.lines(Channel::Collision), vec!["00:01.500 collision with block"]);
        assert_eq!(log.lines(Channel::Population), vec!["00:01.500 pop object"]);
    }

    #[test]
    fn test_tracing_log_does_not_panic_without_subscriber() {
        TracingLog.record(Channel::Collision, Timestamp(10), format_args!("noop"));
    }
}
