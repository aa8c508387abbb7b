use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invoice record parsed from a JSON file.
///
/// Business fields are all optional so that a well-formed JSON object is
/// never rejected at load time; the validator reports every absent or
/// malformed field individually. An `Invoice` is immutable once loaded.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Invoice {
    pub id: Option<String>,
    pub amount: Option<RawAmount>,
    pub currency: Option<String>,
    pub date: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    /// Name of the file this record came from, stamped by the loader.
    #[serde(skip)]
    pub source_file: String,
}

impl Invoice {
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("?")
    }
}

/// Amount as it appeared in the input.
///
/// A JSON number (or a numeric string) lands in `Number`; anything else is
/// kept verbatim in `Raw` so the validator can distinguish "not a number"
/// from "absent".
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum RawAmount {
    Number(Decimal),
    Raw(Value),
}

impl RawAmount {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawAmount::Number(d) => Some(*d),
            RawAmount::Raw(Value::String(s)) => s.trim().parse().ok(),
            RawAmount::Raw(_) => None,
        }
    }

    /// True for values the original input left effectively empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawAmount::Raw(Value::String(s)) if s.trim().is_empty())
    }

    pub fn render(&self) -> String {
        match self {
            RawAmount::Number(d) => d.to_string(),
            RawAmount::Raw(Value::String(s)) => s.clone(),
            RawAmount::Raw(v) => v.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LineItem {
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
}
