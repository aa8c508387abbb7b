use std::path::Path;
use std::sync::Arc;

use crate::loader::{load_invoices, LoadedInvoice};
use crate::logger::RunLogger;
use crate::model::error::PipelineError;
use crate::model::outcome::{PostOutcome, ReportRow, ValidationResult};
use crate::poster::Poster;
use crate::report::write_report;
use crate::validator::validate;

/// Counters accumulated over one run and returned to the caller. This is
/// the only "shared" state in the pipeline and it is owned, not global.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub load_failures: usize,
    pub valid: usize,
    pub invalid: usize,
    pub posted: usize,
    pub post_failures: usize,
    pub skipped: usize,
}

pub struct Pipeline {
    poster: Poster,
    logger: Arc<RunLogger>,
}

impl Pipeline {
    pub fn new(poster: Poster, logger: Arc<RunLogger>) -> Self {
        Pipeline { poster, logger }
    }

    /// One complete sequential pass: Load, then per record Validate and
    /// Post-if-valid, then write the CSV. Every loaded or load-failed record
    /// appears exactly once in the report.
    pub fn run(&self, input_dir: &Path, output_csv: &Path) -> Result<RunSummary, PipelineError> {
        let records = load_invoices(input_dir, &self.logger)?;

        let mut summary = RunSummary::default();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            match record {
                LoadedInvoice::Parsed(invoice) => {
                    summary.loaded += 1;
                    let verdict = validate(&invoice);

                    let outcome = if verdict.is_valid {
                        summary.valid += 1;
                        self.poster.post(&invoice, &self.logger)
                    } else {
                        summary.invalid += 1;
                        self.logger.warn(&format!(
                            "invoice {} failed validation: {}",
                            invoice.display_id(),
                            verdict.reasons.join("; ")
                        ));
                        PostOutcome::NotAttempted
                    };

                    match outcome {
                        PostOutcome::Success(_) => summary.posted += 1,
                        PostOutcome::Failed(_) => summary.post_failures += 1,
                        PostOutcome::Skipped => summary.skipped += 1,
                        PostOutcome::NotAttempted => {}
                    }

                    rows.push(ReportRow::from_invoice(&invoice, &verdict, &outcome));
                }
                LoadedInvoice::Failed {
                    source_file,
                    reason,
                } => {
                    summary.load_failures += 1;
                    let verdict = ValidationResult::load_failure(&reason);
                    rows.push(ReportRow::from_load_failure(&source_file, &verdict));
                }
            }
        }

        write_report(output_csv, &rows)?;

        self.logger.info(&format!(
            "run complete: {} loaded, {} load failures, {} valid, {} invalid, {} posted, {} post failures, {} skipped",
            summary.loaded,
            summary.load_failures,
            summary.valid,
            summary.invalid,
            summary.posted,
            summary.post_failures,
            summary.skipped
        ));

        Ok(summary)
    }
}
