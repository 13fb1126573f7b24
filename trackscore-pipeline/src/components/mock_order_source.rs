use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::source::Source;
use crate::types::{OrderCandidate, OrderQuery, PaymentMode};

/// Orders in the default dashboard window.
pub const DEFAULT_ORDER_COUNT: usize = trackscore_sim::tuning::TOTAL_ORDERS as usize;
/// 2025-01-15T09:00:00Z, the newest order in a generated window.
const WINDOW_END_EPOCH: i64 = 1_736_931_600;
/// Minutes between consecutive generated orders.
const MINUTES_BETWEEN_ORDERS: i64 = 9;
/// Share of generated orders paid cash on delivery.
const COD_SHARE: f64 = 0.65;

const CUSTOMERS: [&str; 12] = [
    "Asha Verma",
    "Rohan Das",
    "Meera Nair",
    "Imran Shaikh",
    "Priya Iyer",
    "Karan Malhotra",
    "Sneha Kulkarni",
    "Arjun Reddy",
    "Fatima Khan",
    "Vikram Singh",
    "Neha Joshi",
    "Rahul Mehta",
];

const CITIES: [(&str, &str); 8] = [
    ("Pune", "411001"),
    ("Kolkata", "700019"),
    ("Kochi", "682011"),
    ("Lucknow", "226001"),
    ("Jaipur", "302001"),
    ("Bengaluru", "560034"),
    ("Indore", "452001"),
    ("Guwahati", "781001"),
];

const PRODUCTS: [(&str, f64); 6] = [
    ("Cotton T-Shirt", 499.0),
    ("Oversized T-Shirt", 699.0),
    ("Denim Jacket", 1899.0),
    ("Kurta Set", 1299.0),
    ("Joggers", 899.0),
    ("Graphic Hoodie", 1499.0),
];

/// Serves a fixed order list: either seeded synthetic orders or rows
/// loaded from a CSV export.
pub struct MockOrderSource {
    orders: Vec<OrderCandidate>,
}

impl MockOrderSource {
    pub fn new(orders: Vec<OrderCandidate>) -> Self {
        Self { orders }
    }

    /// Generate `count` synthetic orders from `seed`.
    pub fn generated(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(generate_orders(count, &mut rng))
    }

    pub fn orders(&self) -> &[OrderCandidate] {
        &self.orders
    }
}

/// Build a synthetic order window, newest first.
///
/// Quality scores are the mean of three uniform draws, which gives a
/// bell-shaped spread around 55 without a dedicated distribution.
pub fn generate_orders<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<OrderCandidate> {
    (0..count)
        .map(|i| {
            let (city, pincode) = CITIES[rng.gen_range(0..CITIES.len())];
            let (product, list_price) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
            let quantity = if rng.gen_bool(0.2) { 2.0 } else { 1.0 };
            let payment_mode = if rng.gen_bool(COD_SHARE) {
                PaymentMode::Cod
            } else {
                PaymentMode::Prepaid
            };
            let mut quality: f64 = (0..3).map(|_| rng.gen_range(10.0..100.0)).sum::<f64>() / 3.0;
            if payment_mode == PaymentMode::Prepaid {
                quality += 8.0;
            }
            let placed_at = DateTime::<Utc>::from_timestamp(
                WINDOW_END_EPOCH - i as i64 * MINUTES_BETWEEN_ORDERS * 60,
                0,
            )
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();

            OrderCandidate {
                id: format!("TS-{}", 10_001 + i),
                customer: CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())].to_string(),
                city: city.to_string(),
                pincode: pincode.to_string(),
                product: product.to_string(),
                amount: list_price * quantity,
                payment_mode,
                quality_score: (quality.clamp(0.0, 100.0) * 10.0).round() / 10.0,
                placed_at,
                ..OrderCandidate::default()
            }
        })
        .collect()
}

#[async_trait]
impl Source<OrderQuery, OrderCandidate> for MockOrderSource {
    fn enable(&self, _query: &OrderQuery) -> bool {
        !self.orders.is_empty()
    }

    async fn get_candidates(&self, _query: &OrderQuery) -> Result<Vec<OrderCandidate>, String> {
        Ok(self.orders.clone())
    }
}
