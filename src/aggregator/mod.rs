//! Folding raw error records into fingerprinted groups.

pub mod config;
pub mod selection;

pub use config::ConsolidationConfig;
pub use selection::RankedGroup;

use crate::domain::{ConsolidatedErrors, RawErrorRecord};
use crate::fingerprint::Fingerprinter;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Single-pass aggregation engine.
///
/// Holds no state between runs; every call returns a fresh mapping.
#[derive(Debug, Clone, Copy)]
pub struct ErrorAggregator {
    config: ConsolidationConfig,
    fingerprinter: Fingerprinter,
}

impl ErrorAggregator {
    pub fn new(config: ConsolidationConfig) -> Self {
        Self {
            fingerprinter: Fingerprinter::new(
                config.message_hash_prefix_length,
                config.fingerprint_length,
            ),
            config,
        }
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Fold `records` in input order. No record is ever dropped.
    pub fn aggregate<'a, I>(&self, records: I) -> ConsolidatedErrors
    where
        I: IntoIterator<Item = &'a RawErrorRecord>,
    {
        let mut groups = ConsolidatedErrors::new();
        let mut folded = 0usize;

        for record in records {
            let fingerprint = self
                .fingerprinter
                .fingerprint(&record.service, &record.message);
            let group = groups.group_mut(fingerprint);
            let opened = group.count == 0;
            group.record(record, self.config.occurrence_sample_cap);
            if opened {
                trace!(
                    service = %record.service,
                    error_type = %group.error_type,
                    "Opened error group"
                );
            }
            folded += 1;
        }

        debug!(records = folded, groups = groups.len(), "Aggregated error records");
        groups
    }

    /// Fold contiguous chunks on the rayon pool and merge them in input order.
    ///
    /// Produces the same mapping as [`ErrorAggregator::aggregate`]. A
    /// `chunk_size` of zero falls back to the sequential fold.
    pub fn aggregate_parallel(
        &self,
        records: &[RawErrorRecord],
        chunk_size: usize,
    ) -> ConsolidatedErrors {
        if chunk_size == 0 || records.len() <= chunk_size {
            return self.aggregate(records);
        }

        let partials: Vec<ConsolidatedErrors> = records
            .par_chunks(chunk_size)
            .map(|chunk| self.aggregate(chunk))
            .collect();

        debug!(
            partitions = partials.len(),
            chunk_size, "Merging partial aggregations"
        );

        let cap = self.config.occurrence_sample_cap;
        partials
            .into_iter()
            .reduce(|mut merged, later| {
                merged.merge(later, cap);
                merged
            })
            .unwrap_or_default()
    }

    /// Groups at or above the configured significance threshold.
    pub fn significant(&self, groups: &ConsolidatedErrors) -> ConsolidatedErrors {
        groups.significant(self.config.min_occurrences_for_significance)
    }

    /// Significant groups ranked by count, capped at the configured K.
    pub fn select_for_action<'a>(&self, groups: &'a ConsolidatedErrors) -> Vec<RankedGroup<'a>> {
        groups.select_for_action(
            self.config.min_occurrences_for_significance,
            self.config.max_groups_to_rank,
        )
    }
}

impl Default for ErrorAggregator {
    fn default() -> Self {
        Self::new(ConsolidationConfig::default())
    }
}
