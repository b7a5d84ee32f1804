//! Progress and diagnostic events emitted during an extraction.
//!
//! Events are observational: nothing a sink does can change the table.

use std::time::{Duration, Instant};

use crate::types::MissingColumnSet;

/// Something worth telling the user while an extraction runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// Row building is about to start.
    Started { total: usize },

    /// Another batch of records has been processed.
    Progress {
        processed: usize,
        total: usize,
        /// Percentage complete, rounded to one decimal.
        percent: f64,
        elapsed: Duration,
    },

    /// A matched node could not be turned into text and was skipped.
    UnsupportedMatch {
        /// Zero-based record index.
        row: usize,
        label: String,
        description: String,
    },

    /// The table is complete.
    Completed {
        rows: usize,
        elapsed: Duration,
        /// Labels missing on at least one row, in declared order.
        missing: Vec<String>,
    },
}

/// Receiver of extraction events.
pub trait EventSink {
    fn emit(&mut self, event: &ExtractionEvent);
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &ExtractionEvent) {}
}

/// Keeps every event, in emission order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub events: Vec<ExtractionEvent>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &ExtractionEvent) {
        self.events.push(event.clone());
    }
}

/// Writes events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::Started { total } => {
                tracing::info!(total, "Processing records");
            }
            ExtractionEvent::Progress {
                processed,
                total,
                percent,
                elapsed,
            } => {
                tracing::info!(
                    processed,
                    total,
                    percent,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Progress"
                );
            }
            ExtractionEvent::UnsupportedMatch {
                row,
                label,
                description,
            } => {
                tracing::warn!(
                    row,
                    label = %label,
                    kind = %description,
                    "Skipping unsupported match"
                );
            }
            ExtractionEvent::Completed {
                rows,
                elapsed,
                missing,
            } => {
                tracing::info!(
                    rows,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Extraction complete"
                );
                if !missing.is_empty() {
                    tracing::warn!("{}", missing_columns_message(missing));
                }
            }
        }
    }
}

/// Single-line warning naming every column missing somewhere.
#[must_use]
pub fn missing_columns_message(missing: &[String]) -> String {
    format!(
        "Some columns could not be found (at least in some of the rows): {}",
        missing.join(", ")
    )
}

/// Round a completion ratio to a percentage with one decimal.
pub(crate) fn percent(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let ratio = processed as f64 / total as f64;
    (ratio * 1000.0).round() / 10.0
}

/// Drives a sink through one extraction.
pub struct Reporter<'s> {
    sink: &'s mut dyn EventSink,
    interval: usize,
    total: usize,
    processed: usize,
    started: Instant,
}

impl<'s> Reporter<'s> {
    /// Create a reporter emitting progress every `interval` records.
    pub fn new(sink: &'s mut dyn EventSink, interval: usize) -> Self {
        Self {
            sink,
            interval: interval.max(1),
            total: 0,
            processed: 0,
            started: Instant::now(),
        }
    }

    pub fn start(&mut self, total: usize) {
        self.total = total;
        self.processed = 0;
        self.started = Instant::now();
        self.sink.emit(&ExtractionEvent::Started { total });
    }

    /// Count one processed record.
    pub fn record_done(&mut self) {
        self.processed += 1;
        if self.processed % self.interval == 0 {
            self.sink.emit(&ExtractionEvent::Progress {
                processed: self.processed,
                total: self.total,
                percent: percent(self.processed, self.total),
                elapsed: self.started.elapsed(),
            });
        }
    }

    pub fn unsupported(&mut self, row: usize, label: &str, description: &str) {
        self.sink.emit(&ExtractionEvent::UnsupportedMatch {
            row,
            label: label.to_string(),
            description: description.to_string(),
        });
    }

    pub fn complete(&mut self, rows: usize, missing: &MissingColumnSet) {
        self.sink.emit(&ExtractionEvent::Completed {
            rows,
            elapsed: self.started.elapsed(),
            missing: missing.iter().map(String::from).collect(),
        });
    }
}
