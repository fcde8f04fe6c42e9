//! Accumulated timing data

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Total time spent per profiled operation
#[derive(Debug, Default)]
pub struct ProfilingState {
    timings: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the running total for `key`
    pub fn record(&self, key: &str, elapsed: Duration) {
        let mut timings = self.lock();
        *timings.entry(key.to_string()).or_default() += elapsed;
    }

    /// Total recorded for `key`, if it was ever called
    pub fn total(&self, key: &str) -> Option<Duration> {
        self.lock().get(key).copied()
    }

    /// Writes one `<key> took <duration>` line per operation, sorted by key
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (key, elapsed) in self.lock().iter() {
            writeln!(writer, "{} took {}", key, format_duration(*elapsed))?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Duration>> {
        self.timings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Formats as `<minutes>m <seconds>s <millis>ms`
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}
