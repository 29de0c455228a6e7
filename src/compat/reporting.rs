//! Event sinks receiving difference events from the engine

use std::io::Write;

use crate::compat::types::{DiffEvent, DiffLevel};

/// Receives every difference event, including informational ones.
pub trait EventSink {
    /// Called once per detected difference. Must not fail.
    fn report(&mut self, event: DiffEvent);

    /// Called exactly once, after the last event of a completed diff.
    fn on_end(&mut self);
}

/// Writes one line per event and the totals on completion.
pub struct PrintingSink<W: Write> {
    out: W,
    breakage_count: usize,
    danger_count: usize,
}

impl PrintingSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> PrintingSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            breakage_count: 0,
            danger_count: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.out, "{line}") {
            tracing::warn!(%error, "failed to write difference report");
        }
    }
}

impl<W: Write> EventSink for PrintingSink<W> {
    fn report(&mut self, event: DiffEvent) {
        match event.level() {
            DiffLevel::Breaking => self.breakage_count += 1,
            DiffLevel::Dangerous => self.danger_count += 1,
            DiffLevel::Info => {}
        }
        let indent = if event.level() == DiffLevel::Info { "\t" } else { "" };
        self.write_line(&format!("{indent}{event}"));
    }

    fn on_end(&mut self) {
        let summary = format!(
            "\n{} errors\n{} warnings\n",
            self.breakage_count, self.danger_count
        );
        self.write_line(&summary);
        if let Err(error) = self.out.flush() {
            tracing::warn!(%error, "failed to flush difference report");
        }
    }
}

/// Buffers every event for later inspection.
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Vec<DiffEvent>,
    ended: bool,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DiffEvent] {
        &self.events
    }

    pub fn breakages(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| e.is_breaking())
    }

    pub fn dangers(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| e.is_dangerous())
    }

    pub fn breakage_count(&self) -> usize {
        self.breakages().count()
    }

    pub fn danger_count(&self) -> usize {
        self.dangers().count()
    }

    /// Whether `on_end` has been signaled.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_events(self) -> Vec<DiffEvent> {
        self.events
    }
}

impl EventSink for CapturingSink {
    fn report(&mut self, event: DiffEvent) {
        self.events.push(event);
    }

    fn on_end(&mut self) {
        self.ended = true;
    }
}

/// Fans events out to several sinks, in registration order.
#[derive(Default)]
pub struct ChainedSink<'a> {
    sinks: Vec<&'a mut dyn EventSink>,
}

impl<'a> ChainedSink<'a> {
    pub fn new(sinks: Vec<&'a mut dyn EventSink>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: &'a mut dyn EventSink) {
        self.sinks.push(sink);
    }
}

impl EventSink for ChainedSink<'_> {
    fn report(&mut self, event: DiffEvent) {
        if let Some((last, rest)) = self.sinks.split_last_mut() {
            for sink in rest {
                sink.report(event.clone());
            }
            last.report(event);
        }
    }

    fn on_end(&mut self) {
        for sink in &mut self.sinks {
            sink.on_end();
        }
    }
}

/// Counts breaking events on their way to a delegate sink.
pub struct CountingSink<'a> {
    delegate: &'a mut dyn EventSink,
    breaking_count: usize,
}

impl<'a> CountingSink<'a> {
    pub fn new(delegate: &'a mut dyn EventSink) -> Self {
        Self {
            delegate,
            breaking_count: 0,
        }
    }

    pub fn breaking_count(&self) -> usize {
        self.breaking_count
    }
}

impl EventSink for CountingSink<'_> {
    fn report(&mut self, event: DiffEvent) {
        if event.is_breaking() {
            self.breaking_count += 1;
        }
        self.delegate.report(event);
    }

    fn on_end(&mut self) {
        self.delegate.on_end();
    }
}
