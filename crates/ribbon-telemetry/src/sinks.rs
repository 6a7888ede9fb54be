//! Event consumers.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the simulation ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events into a buffer shared with the caller.
///
/// The sink itself is moved into the bus; keep a clone of
/// [`VecSink::buffer`] to read what it collected.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shared event buffer.
    pub fn buffer(&self) -> Arc<Mutex<Vec<SimulationEvent>>> {
        Arc::clone(&self.events)
    }

    /// Copy of everything collected so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing` at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let kind = event.kind_name();
        match self.level {
            tracing::Level::ERROR => tracing::error!(tick = event.tick, kind, event = ?event.kind, "simulation_event"),
            tracing::Level::WARN => tracing::warn!(tick = event.tick, kind, event = ?event.kind, "simulation_event"),
            tracing::Level::INFO => tracing::info!(tick = event.tick, kind, event = ?event.kind, "simulation_event"),
            tracing::Level::DEBUG => tracing::debug!(tick = event.tick, kind, event = ?event.kind, "simulation_event"),
            tracing::Level::TRACE => tracing::trace!(tick = event.tick, kind, event = ?event.kind, "simulation_event"),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per event, newline-delimited.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
    failed: bool,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failed: false,
        }
    }

    /// Number of events written.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &SimulationEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &SimulationEvent) {
        if self.failed {
            return;
        }
        match self.write_event(event) {
            Ok(()) => self.written += 1,
            Err(e) => {
                // Stop after the first failure rather than logging every tick.
                tracing::warn!(error = %e, "json lines sink disabled after write failure");
                self.failed = true;
            }
        }
    }

    fn finalize(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "json lines sink flush failed");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
