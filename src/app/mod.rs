pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogLevel};
pub use logging::{InitializationError, setup_logging};

use crate::aggregator::ErrorAggregator;
use crate::domain::ConsolidatedErrors;
use crate::ingest::load_records;
use crate::report::RankedReport;
use anyhow::Context;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// What one consolidation run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub groups: ConsolidatedErrors,
    pub report: RankedReport,
}

/// Load records, consolidate them, and write whatever outputs are configured.
pub fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    let aggregator = ErrorAggregator::new(config.consolidation());

    let records = load_records(&config.input)
        .with_context(|| format!("Failed to load error records from {}", config.input.display()))?;
    info!(
        records = records.len(),
        input = %config.input.display(),
        "Loaded error records"
    );

    let groups = aggregator.aggregate_parallel(&records, config.parallel_chunk_size);
    let report = RankedReport::build(&groups, &aggregator);

    info!(
        total_errors = report.summary.total_errors,
        groups = report.summary.total_groups,
        significant = report.summary.significant_groups,
        min_occurrences = config.min_occurrences,
        selected = report.issues.len(),
        "Consolidation complete"
    );
    for issue in &report.issues {
        info!(
            issue_id = %issue.issue_id,
            count = issue.count,
            priority = issue.priority.as_str(),
            score = issue.score.score,
            level = issue.score.level.as_str(),
            "Selected group"
        );
    }

    if let Some(path) = &config.output {
        write_json(path, &groups)?;
        info!(path = %path.display(), "Wrote consolidated groups");
    }
    if let Some(path) = &config.ranked_output {
        write_json(path, &report)?;
        info!(path = %path.display(), "Wrote ranked report");
    }

    Ok(RunOutcome { groups, report })
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let config = Config::load(std::env::args_os())?;
    setup_logging(config.log_level)?;

    info!("Starting rask-error-consolidator v{}", crate::VERSION);
    run(&config)?;
    Ok(())
}
