//! Single-pass retention-window compaction.
//!
//! The compactor ingests an ordered sequence of raw lines and emits an
//! index-aligned sequence of [`Record`] slots. Per identity it keeps a window
//! of at most two pending positions; a third arrival is the compaction
//! trigger — both pending positions are tombstoned, the window is cleared,
//! and the triggering line starts a fresh window.
//!
//! # Window semantics
//!
//! The trigger check runs *before* the arriving line is appended, so it fires
//! strictly on window size == 2 at arrival time: every 3rd, 6th, 9th...
//! occurrence of an identity clears the two immediately preceding survivors.
//! Tombstoned positions never re-enter a window. After end of input an
//! identity trails one or two live records.
//!
//! All state — the output vector and the window map — is owned by the single
//! `compact` call frame. Nothing is global, nothing persists.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::parse::{MalformedPolicy, parse_line};
use crate::record::Record;

// ---------------------------------------------------------------------------
// CompactionReport
// ---------------------------------------------------------------------------

/// Counters from one compaction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompactionReport {
    /// Number of input lines consumed.
    pub lines_read: usize,
    /// Number of distinct identity tokens encountered.
    pub identities_seen: usize,
    /// Number of retention-window triggers that fired.
    pub triggers_fired: usize,
    /// Number of records tombstoned (two per trigger).
    pub records_tombstoned: usize,
}

/// Result of one compaction pass: the index-aligned record sequence plus its
/// report.
#[derive(Debug, Clone, Serialize)]
pub struct Compaction {
    pub records: Vec<Record>,
    pub report: CompactionReport,
}

impl Compaction {
    /// Count of records still live after the pass.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_live()).count()
    }
}

// ---------------------------------------------------------------------------
// Core pass
// ---------------------------------------------------------------------------

/// Compact an ordered sequence of raw lines.
///
/// Output length always equals input length; position `i` of the output
/// corresponds to input line `i`. Only the identity token participates in
/// window decisions — address and port are carried through opaquely.
///
/// # Errors
///
/// Under [`MalformedPolicy::Strict`], returns [`Error::MalformedRecord`] for
/// the first line with fewer than three tokens.
pub fn compact<I, S>(lines: I, policy: MalformedPolicy) -> Result<Compaction, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records: Vec<Record> = Vec::new();
    // Identity -> positions of its pending (un-compacted) records. Windows
    // never exceed length 2; the trigger clears them before a third push.
    let mut windows: HashMap<String, Vec<usize>> = HashMap::new();
    let mut report = CompactionReport::default();

    for (position, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let parsed = parse_line(line, position + 1, policy)?;

        let window = windows.entry(parsed.identity).or_default();

        // Trigger check runs before the arriving line is appended.
        if window.len() == 2 {
            debug!(position, cleared = ?window, "retention window trigger");
            for &pending in window.iter() {
                records[pending] = Record::Tombstone;
            }
            window.clear();
            report.triggers_fired += 1;
            report.records_tombstoned += 2;
        }

        records.push(Record::Live(line.to_string()));
        window.push(position);
        report.lines_read += 1;
    }

    report.identities_seen = windows.len();

    debug_assert_eq!(records.len(), report.lines_read);
    Ok(Compaction { records, report })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
