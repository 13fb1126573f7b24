//! CSV order loader.
//!
//! Parses order exports into `OrderCandidate` rows for the triage pipeline.
//! Expected CSV columns:
//!   id, customer, city, pincode, product, amount, payment_mode,
//!   quality_score, placed_at

use serde::Deserialize;
use std::io::Read;

use crate::types::{OrderCandidate, PaymentMode};

/// One CSV row as exported by the storefront.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer: String,
    pub city: String,
    #[serde(default)]
    pub pincode: String,
    pub product: String,
    pub amount: f64,
    #[serde(deserialize_with = "deserialize_payment_mode")]
    pub payment_mode: PaymentMode,
    pub quality_score: f64,
    #[serde(default)]
    pub placed_at: String,
}

impl OrderRecord {
    /// Convert to a pipeline candidate. Scores outside 0..=100 are clamped.
    pub fn to_candidate(&self) -> OrderCandidate {
        OrderCandidate {
            id: self.id.clone(),
            customer: self.customer.clone(),
            city: self.city.clone(),
            pincode: self.pincode.clone(),
            product: self.product.clone(),
            amount: self.amount,
            payment_mode: self.payment_mode,
            quality_score: self.quality_score.clamp(0.0, 100.0),
            placed_at: self.placed_at.clone(),
            ..OrderCandidate::default()
        }
    }
}

/// Load orders from a CSV reader. Non-finite amounts or scores are rejected.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<OrderCandidate>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut orders = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let line = line_num + 2;
        let record: OrderRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line, e))?;
        if !record.amount.is_finite() {
            return Err(format!(
                "CSV parse error at line {}: amount must be a finite number",
                line
            ));
        }
        if !record.quality_score.is_finite() {
            return Err(format!(
                "CSV parse error at line {}: quality_score must be a finite number",
                line
            ));
        }
        orders.push(record.to_candidate());
    }

    Ok(orders)
}

/// Load orders from a CSV file path.
pub fn load_orders_file(path: &str) -> Result<Vec<OrderCandidate>, String> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_orders(file)
}

fn deserialize_payment_mode<'de, D>(deserializer: D) -> Result<PaymentMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    PaymentMode::parse(&s).map_err(serde::de::Error::custom)
}
