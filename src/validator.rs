use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::invoice::Invoice;
use crate::model::outcome::ValidationResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Applies the full rule set to one invoice. All rules are evaluated, never
/// short-circuited, so `reasons` lists every violation in rule order.
pub fn validate(invoice: &Invoice) -> ValidationResult {
    let mut reasons = Vec::new();

    if invoice
        .id
        .as_deref()
        .map_or(true, |id| id.trim().is_empty())
    {
        reasons.push("missing required field: id".to_string());
    }

    let amount = check_amount(invoice, &mut reasons);
    check_currency(invoice, &mut reasons);
    check_date(invoice, &mut reasons);

    if let (Some(amount), Some(total)) = (amount, line_item_total(invoice)) {
        if (amount - total).abs() > Decimal::new(1, 2) {
            reasons.push("amount does not match line item total".to_string());
        }
    }

    ValidationResult::new(invoice.id.clone().unwrap_or_default(), reasons)
}

fn check_amount(invoice: &Invoice, reasons: &mut Vec<String>) -> Option<Decimal> {
    let raw = match &invoice.amount {
        Some(raw) if !raw.is_blank() => raw,
        _ => {
            reasons.push("missing required field: amount".to_string());
            return None;
        }
    };

    let Some(amount) = raw.as_decimal() else {
        reasons.push("amount must be a number".to_string());
        return None;
    };

    if amount < Decimal::ZERO {
        reasons.push("amount must be non-negative".to_string());
    }
    Some(amount)
}

fn check_currency(invoice: &Invoice, reasons: &mut Vec<String>) {
    match invoice.currency.as_deref().map(str::trim) {
        None | Some("") => reasons.push("missing required field: currency".to_string()),
        Some(code) => {
            if !code.chars().all(|c| c.is_ascii_alphabetic()) {
                reasons.push("currency must be an alphabetic code".to_string());
            }
        }
    }
}

fn check_date(invoice: &Invoice, reasons: &mut Vec<String>) {
    match invoice.date.as_deref().map(str::trim) {
        None | Some("") => reasons.push("missing required field: date".to_string()),
        Some(date) => {
            if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                reasons.push(
                    "date must be a valid calendar date (YYYY-MM-DD)".to_string(),
                );
            }
        }
    }
}

/// Sum of `quantity * unit_price` over all line items, but only when every
/// item carries both values. Partially priced line items are not checked
/// against the header amount.
fn line_item_total(invoice: &Invoice) -> Option<Decimal> {
    let items = invoice.line_items.as_ref()?;
    if items.is_empty() {
        return None;
    }

    let mut total = Decimal::ZERO;
    for item in items {
        total += item.quantity? * item.unit_price?;
    }
    Some(total)
}
