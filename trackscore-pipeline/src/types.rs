use std::fmt;

use serde::{Deserialize, Serialize};
use trackscore_sim::Threshold;

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Which slice of the orders table to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderView {
    #[default]
    All,
    Ship,
    Flagged,
}

impl OrderView {
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "all" => Ok(OrderView::All),
            "ship" | "shipped" | "to-ship" => Ok(OrderView::Ship),
            "flagged" | "flag" => Ok(OrderView::Flagged),
            other => Err(format!("unknown view '{}' (expected all, ship or flagged)", other)),
        }
    }
}

/// Sortable columns of the orders table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Amount,
    QualityScore,
    PlacedAt,
    #[default]
    Priority,
}

impl SortKey {
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "amount" => Ok(SortKey::Amount),
            "quality" | "quality_score" | "score" => Ok(SortKey::QualityScore),
            "placed_at" | "date" | "time" => Ok(SortKey::PlacedAt),
            "priority" | "risk" => Ok(SortKey::Priority),
            other => Err(format!("unknown sort column '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// A request for one page of the orders table.
#[derive(Clone, Debug)]
pub struct OrderQuery {
    pub request_id: String,
    pub threshold: Threshold,
    pub search: Option<String>,
    pub view: OrderView,
    pub payment_mode: Option<PaymentMode>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub page_size: Option<usize>,
}

impl OrderQuery {
    pub fn new(request_id: impl Into<String>, threshold: Threshold) -> Self {
        Self {
            request_id: request_id.into(),
            threshold,
            search: None,
            view: OrderView::All,
            payment_mode: None,
            sort: SortKey::default(),
            direction: SortDirection::default(),
            page_size: None,
        }
    }
}

impl HasRequestId for OrderQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cod,
    Prepaid,
}

impl PaymentMode {
    /// Lenient parsing for CSV and CLI input.
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_lowercase().as_str() {
            "cod" | "cash" | "cash on delivery" => Ok(PaymentMode::Cod),
            "prepaid" | "upi" | "card" | "online" | "netbanking" => Ok(PaymentMode::Prepaid),
            other => Err(format!("expected a payment mode, got '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Cod => write!(f, "COD"),
            PaymentMode::Prepaid => write!(f, "Prepaid"),
        }
    }
}

/// Outcome of the quality threshold for one order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipDecision {
    #[default]
    Pending,
    Ship,
    Flagged,
}

impl fmt::Display for ShipDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipDecision::Pending => write!(f, "Pending"),
            ShipDecision::Ship => write!(f, "\u{2713} Ship"),
            ShipDecision::Flagged => write!(f, "\u{26a0} Flagged"),
        }
    }
}

/// Coarse return-to-origin risk derived from the quality score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Medium => write!(f, "Medium"),
            RiskBand::High => write!(f, "High"),
        }
    }
}

/// One row of the orders table.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderCandidate {
    pub id: String,
    pub customer: String,
    pub city: String,
    pub pincode: String,
    pub product: String,
    /// Order value in rupees.
    pub amount: f64,
    pub payment_mode: PaymentMode,
    /// Order quality score, 0 (certain RTO) to 100 (certain delivery).
    pub quality_score: f64,
    /// RFC 3339 placement time.
    pub placed_at: String,

    // Populated by hydrators
    pub decision: ShipDecision,
    pub risk_band: Option<RiskBand>,

    // Populated by scorers
    pub priority_score: Option<f64>,
}

impl OrderCandidate {
    /// Lower-cased text the search box matches against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.id, self.customer, self.city, self.pincode, self.product
        )
        .to_lowercase()
    }
}
