//! Domain layer for rask-error-consolidator.
//!
//! Contains the canonical types shared across all modules:
//! - `RawErrorRecord`: one observed error event as supplied by the log fetcher
//! - `ErrorGroup`: the unit of consolidation, keyed by fingerprint
//! - `ConsolidatedErrors`: the fingerprint → group mapping produced by one fold
//! - `ConsolidatorError`: Top-level error type

pub mod consolidated;
pub mod error;
pub mod error_group;
pub mod raw_record;

pub use consolidated::ConsolidatedErrors;
pub use error::ConsolidatorError;
pub use error_group::{ErrorGroup, OccurrenceSummary};
pub use raw_record::{HttpRequest, RawErrorRecord, UNKNOWN_SERVICE};
