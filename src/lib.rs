#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. AggregatorConfig in aggregator module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod aggregator;
pub mod app;
pub mod classifier;
pub mod domain;
pub mod fingerprint;
pub mod ingest;
pub mod normalizer;
pub mod report;

// Re-export main types for easy access
pub use aggregator::{ConsolidationConfig, ErrorAggregator};
pub use classifier::extract_error_type;
pub use domain::{
    ConsolidatedErrors, ConsolidatorError, ErrorGroup, HttpRequest, OccurrenceSummary,
    RawErrorRecord,
};
pub use fingerprint::{Fingerprinter, fingerprint};
pub use normalizer::normalize;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
