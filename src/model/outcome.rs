use serde::Serialize;

use crate::model::invoice::Invoice;

/// Verdict derived from one invoice by the validation pass.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub invoice_id: String,
    pub is_valid: bool,
    /// One entry per failed rule, in rule order. Empty when valid.
    pub reasons: Vec<String>,
}

impl ValidationResult {
    pub fn new(invoice_id: String, reasons: Vec<String>) -> Self {
        ValidationResult {
            invoice_id,
            is_valid: reasons.is_empty(),
            reasons,
        }
    }

    /// Verdict for a file that never produced an invoice at all.
    pub fn load_failure(reason: &str) -> Self {
        ValidationResult {
            invoice_id: String::new(),
            is_valid: false,
            reasons: vec![format!("invalid JSON: {}", reason)],
        }
    }
}

/// Result of attempting (or skipping) remote submission of one invoice.
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// 2xx response with the status code.
    Success(u16),
    /// Transport error or non-2xx response; the run continues regardless.
    Failed(String),
    /// Posting disabled for this run.
    Skipped,
    /// Invoice was invalid, so posting was never considered.
    NotAttempted,
}

impl PostOutcome {
    pub fn status_label(&self) -> &'static str {
        match self {
            PostOutcome::Success(_) => "success",
            PostOutcome::Failed(_) => "failed",
            PostOutcome::Skipped => "skipped",
            PostOutcome::NotAttempted => "not attempted",
        }
    }

    pub fn error_detail(&self) -> &str {
        match self {
            PostOutcome::Failed(detail) => detail,
            _ => "",
        }
    }
}

/// One row of the output CSV: invoice fields joined with the validation
/// verdict and the post outcome.
#[derive(Debug, Serialize, Clone)]
pub struct ReportRow {
    pub id: String,
    pub amount: String,
    pub currency: String,
    pub date: String,
    pub valid: String,
    pub reasons: String,
    pub post_status: String,
    pub post_error: String,
    pub source_file: String,
}

impl ReportRow {
    pub fn from_invoice(
        invoice: &Invoice,
        verdict: &ValidationResult,
        outcome: &PostOutcome,
    ) -> Self {
        ReportRow {
            id: invoice.id.clone().unwrap_or_default(),
            amount: invoice
                .amount
                .as_ref()
                .map(|a| a.render())
                .unwrap_or_default(),
            currency: invoice.currency.clone().unwrap_or_default(),
            date: invoice.date.clone().unwrap_or_default(),
            valid: verdict_label(verdict).to_string(),
            reasons: verdict.reasons.join("; "),
            post_status: outcome.status_label().to_string(),
            post_error: outcome.error_detail().to_string(),
            source_file: invoice.source_file.clone(),
        }
    }

    pub fn from_load_failure(source_file: &str, verdict: &ValidationResult) -> Self {
        ReportRow {
            id: String::new(),
            amount: String::new(),
            currency: String::new(),
            date: String::new(),
            valid: verdict_label(verdict).to_string(),
            reasons: verdict.reasons.join("; "),
            post_status: PostOutcome::NotAttempted.status_label().to_string(),
            post_error: String::new(),
            source_file: source_file.to_string(),
        }
    }
}

fn verdict_label(verdict: &ValidationResult) -> &'static str {
    if verdict.is_valid {
        "valid"
    } else {
        "invalid"
    }
}
