//! sweep-core library.
//!
//! Record model and the single-pass retention-window compactor: each identity
//! keeps at most its two most recent records; a third arrival tombstones both
//! predecessors and starts a fresh window.
//!
//! # Conventions
//!
//! - **Errors**: explicit [`Error`] results; the CLI layer wraps in `anyhow`.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod compactor;
pub mod error;
pub mod parse;
pub mod record;

pub use compactor::{Compaction, CompactionReport, compact};
pub use error::Error;
pub use parse::{MalformedPolicy, ParsedLine};
pub use record::Record;
