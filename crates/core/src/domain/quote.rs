use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named policy term and its value. Row order is significant: every
/// quote generated for the same request carries the same six rows in the
/// same order, which is what makes the coverage matrix line up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDetail {
    pub name: String,
    pub value: String,
}

/// A synthetic priced offer from one insurer. Whole-dollar amounts; never
/// mutated after generation and never persisted beyond the response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub insurer_id: String,
    pub insurer_name: String,
    pub insurer_logo: String,
    pub rating: f64,
    pub review_count: u32,
    /// Coverage-adjusted premium before the discount is applied.
    pub premium: i64,
    pub discount_percent: i64,
    pub discount_amount: i64,
    pub final_premium: i64,
    pub coverage_details: Vec<CoverageDetail>,
    pub unique_features: Vec<String>,
    pub payment_options: Vec<String>,
    /// Display-only marketing number, uncorrelated with `discount_amount`.
    pub estimated_savings: i64,
    /// Opaque display identifier, not guaranteed unique within a batch.
    pub quote_id: String,
    pub quote_expiry: DateTime<Utc>,
}

/// The full fan-out for a single request: one quote per roster entry,
/// sorted ascending by final premium.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl QuoteBatch {
    pub fn is_sorted_by_final_premium(&self) -> bool {
        self.quotes.windows(2).all(|pair| pair[0].final_premium <= pair[1].final_premium)
    }

    /// The cheapest quote, if the batch is non-empty.
    pub fn top_ranked(&self) -> Option<&Quote> {
        self.quotes.first()
    }
}
