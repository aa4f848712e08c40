//! Load report models, the outcome of one loader run

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Which dump a pass reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Authors,
    Works,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Authors => f.write_str("authors"),
            PassKind::Works => f.write_str("works"),
        }
    }
}

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum PassOutcome {
    Completed,
    /// The dump could not be opened or stopped being readable
    Aborted(String),
}

/// Counters for a single pass over one dump.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub kind: PassKind,
    pub lines_read: u64,
    pub loaded: u64,
    pub skipped: u64,
    /// Skipped lines keyed by `LineError::kind`
    pub skipped_by_kind: BTreeMap<&'static str, u64>,
    pub outcome: PassOutcome,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl PassReport {
    pub fn new(kind: PassKind) -> Self {
        Self {
            kind,
            lines_read: 0,
            loaded: 0,
            skipped: 0,
            skipped_by_kind: BTreeMap::new(),
            outcome: PassOutcome::Completed,
            elapsed: Duration::ZERO,
        }
    }

    pub fn record_loaded(&mut self) {
        self.lines_read += 1;
        self.loaded += 1;
    }

    pub fn record_skipped(&mut self, kind: &'static str) {
        self.lines_read += 1;
        self.skipped += 1;
        *self.skipped_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == PassOutcome::Completed
    }
}

/// Report for a whole run: the author pass followed by the work pass.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub authors: PassReport,
    pub works: PassReport,
}

impl LoadReport {
    pub fn total_skipped(&self) -> u64 {
        self.authors.skipped + self.works.skipped
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
