use serde::{Deserialize, Serialize};

/// Subtotal, HST, Total and Deposit always close out the line items.
pub const SUMMARY_LINE_COUNT: usize = 4;

/// Outcome of a single price calculation.
///
/// Amounts keep full floating point precision. Only the line item strings are
/// formatted to cents, so never rebuild a total by summing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    pub subtotal: f64,
    pub hst: f64,
    pub total: f64,
    pub deposit: f64,
    pub line_items: Vec<String>,
}

impl PriceResult {
    /// Priced components without the trailing summary lines, as used by the
    /// itemized table on contracts and confirmation emails.
    pub fn cost_lines(&self) -> &[String] {
        let end = self.line_items.len().saturating_sub(SUMMARY_LINE_COUNT);
        &self.line_items[..end]
    }

    pub fn summary_lines(&self) -> &[String] {
        let start = self.line_items.len().saturating_sub(SUMMARY_LINE_COUNT);
        &self.line_items[start..]
    }
}

/// One of the two side-by-side offers on the quote page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub deposit: f64,
    pub services: Vec<String>,
}
