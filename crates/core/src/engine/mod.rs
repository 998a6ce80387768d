//! Synthetic quote generation: one priced offer per carrier on the roster.

pub mod tables;

use std::collections::VecDeque;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::domain::insurer::InsurerProfile;
use crate::domain::quote::{Quote, QuoteBatch};
use crate::domain::request::{CoverageLevel, InsuranceType, QuoteRequest, QuoteRequestDraft};
use crate::errors::DomainError;

/// Days a generated quote stays valid.
const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Source of randomness for quote generation. Injected so tests can
/// substitute a fixed sequence and assert exact output; production uses
/// [`ThreadRngSource`].
pub trait RandomSource {
    /// Uniform draw from the half-open interval `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
    /// Uniform integer draw from the closed interval `[low, high]`.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..high)
    }

    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Replays a fixed sequence of unit-interval draws, yielding `0.0` once
/// exhausted. Each draw is scaled into the requested range, so a sequence
/// maps one-to-one onto the engine's draw order.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    draws: VecDeque<f64>,
}

impl SequenceSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self { draws: draws.into_iter().collect() }
    }

    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        let span = (high - low + 1) as f64;
        low + ((self.next_unit() * span) as i64).min(high - low)
    }
}

/// Stateless fan-out over the carrier roster. Pure function of the request,
/// the roster, and the random source; no caching between calls.
pub struct QuoteEngine<'r, R> {
    roster: &'r [InsurerProfile],
    rng: R,
}

impl<'r, R: RandomSource> QuoteEngine<'r, R> {
    pub fn new(roster: &'r [InsurerProfile], rng: R) -> Self {
        Self { roster, rng }
    }

    /// Validates the draft and prices it. Rejects before any computation
    /// when the insurance type or coverage level is absent.
    pub fn generate(&mut self, draft: &QuoteRequestDraft) -> Result<QuoteBatch, DomainError> {
        let request = draft.clone().into_request()?;
        Ok(self.generate_batch(&request))
    }

    pub fn generate_batch(&mut self, request: &QuoteRequest) -> QuoteBatch {
        let roster = self.roster;
        let mut quotes: Vec<Quote> =
            roster.iter().map(|insurer| self.generate_quote(insurer, request)).collect();

        // Stable sort: ties keep roster order.
        quotes.sort_by_key(|quote| quote.final_premium);

        QuoteBatch {
            quotes,
            request_id: format!("REQ-{}", self.rng.uniform_int(0, 999_999)),
            timestamp: Utc::now(),
        }
    }

    fn generate_quote(&mut self, insurer: &InsurerProfile, request: &QuoteRequest) -> Quote {
        let base_premium = match request.insurance_type {
            InsuranceType::Auto => self.rng.uniform(800.0, 1200.0),
            InsuranceType::Home => self.rng.uniform(1200.0, 1800.0),
        };

        let premium =
            (base_premium * tables::coverage_multiplier(request.coverage_level)).round() as i64;

        let discount_percent = self.rng.uniform_int(5, 15);
        let discount_amount = ((premium * discount_percent) as f64 / 100.0).round() as i64;
        let final_premium = premium - discount_amount;

        let mut unique_features: Vec<String> = tables::base_features(insurer.id)
            .into_iter()
            .map(str::to_string)
            .collect();
        if request.coverage_level == CoverageLevel::Premium {
            unique_features.push(tables::premium_feature(request.insurance_type).to_string());
        }

        let estimated_savings = self.rng.uniform_int(100, 300);
        let quote_id = format!("QT-{}", self.rng.uniform_int(0, 999_999));

        Quote {
            insurer_id: insurer.id.to_string(),
            insurer_name: insurer.name.to_string(),
            insurer_logo: insurer.logo.to_string(),
            rating: insurer.rating,
            review_count: insurer.review_count,
            premium,
            discount_percent,
            discount_amount,
            final_premium,
            coverage_details: tables::coverage_details(
                request.insurance_type,
                request.coverage_level,
            ),
            unique_features,
            payment_options: tables::PAYMENT_OPTIONS.iter().map(|s| s.to_string()).collect(),
            estimated_savings,
            quote_id,
            quote_expiry: Utc::now() + Duration::days(QUOTE_VALIDITY_DAYS),
        }
    }
}
