//! Comparison view state: request handoff, fetch lifecycle, and the three
//! render models (overview cards, coverage matrix, feature matrix).
//!
//! The handoff replaces implicit shared browser storage with an explicit
//! value passed from the wizard to the comparison controller. Fetch
//! completions carry a generation token so a stale response from an
//! abandoned mount can never overwrite a newer one.

use serde::{Deserialize, Serialize};

use crate::domain::quote::{CoverageDetail, Quote, QuoteBatch};
use crate::domain::request::QuoteRequest;
use crate::selection::{ExpansionState, SelectionState};

pub const MISSING_REQUEST_MESSAGE: &str = "No quote request data found";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch insurance quotes. Please try again.";

/// One-shot carrier for the submitted request. Reading it consumes it,
/// matching the single-session lifetime of a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestHandoff {
    request: Option<QuoteRequest>,
}

impl RequestHandoff {
    pub fn store(&mut self, request: QuoteRequest) {
        self.request = Some(request);
    }

    pub fn take(&mut self) -> Option<QuoteRequest> {
        self.request.take()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ComparisonPhase {
    Loading,
    /// Terminal: the view was mounted without a stored request. Distinct
    /// from a network failure and never retried.
    MissingRequest,
    /// Terminal for this mount; the only affordance is navigating home.
    FetchFailed { message: String },
    Loaded(ComparisonState),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonState {
    pub request: QuoteRequest,
    pub batch: QuoteBatch,
    pub selection: SelectionState,
    pub expansion: ExpansionState,
}

impl ComparisonState {
    fn new(request: QuoteRequest, batch: QuoteBatch) -> Self {
        let selection = SelectionState::default_for(&batch);
        let expansion = ExpansionState::default_for(&batch);
        Self { request, batch, selection, expansion }
    }

    /// Selected quotes in batch (premium-ascending) order.
    pub fn selected_quotes(&self) -> Vec<&Quote> {
        self.batch
            .quotes
            .iter()
            .filter(|quote| self.selection.contains(&quote.insurer_id))
            .collect()
    }
}

/// Token handed to whoever performs the fetch; completions quoting an
/// older generation are discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: QuoteRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonController {
    phase: ComparisonPhase,
    generation: u64,
}

impl ComparisonController {
    /// Mounts the view. With no stored request this is a terminal error
    /// state; otherwise the controller enters `Loading` and hands back a
    /// ticket for the single fetch of this mount.
    pub fn mount(handoff: &mut RequestHandoff) -> (Self, Option<FetchTicket>) {
        match handoff.take() {
            None => (Self { phase: ComparisonPhase::MissingRequest, generation: 0 }, None),
            Some(request) => {
                let mut controller = Self { phase: ComparisonPhase::Loading, generation: 0 };
                let ticket = controller.begin_fetch(request);
                (controller, Some(ticket))
            }
        }
    }

    pub fn phase(&self) -> &ComparisonPhase {
        &self.phase
    }

    /// Starts a new fetch, invalidating any still in flight.
    pub fn begin_fetch(&mut self, request: QuoteRequest) -> FetchTicket {
        self.generation += 1;
        self.phase = ComparisonPhase::Loading;
        FetchTicket { generation: self.generation, request }
    }

    /// Applies a fetch outcome. Returns `false` (and leaves the phase
    /// untouched) when the ticket is stale.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<QuoteBatch, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.phase = match result {
            Ok(batch) => ComparisonPhase::Loaded(ComparisonState::new(ticket.request, batch)),
            Err(_) => ComparisonPhase::FetchFailed { message: FETCH_FAILED_MESSAGE.to_string() },
        };
        true
    }

    /// Mutable access to the loaded state, for selection and expansion
    /// toggles. `None` until a fetch completes successfully.
    pub fn state_mut(&mut self) -> Option<&mut ComparisonState> {
        match &mut self.phase {
            ComparisonPhase::Loaded(state) => Some(state),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Render models
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverviewCard {
    pub insurer_id: String,
    pub insurer_name: String,
    pub rating: f64,
    pub review_count: u32,
    pub final_premium: i64,
    pub discount_percent: i64,
    /// Set on the lowest-premium card among the selection.
    pub best_value: bool,
    /// Top three coverage rows only.
    pub key_coverage: Vec<CoverageDetail>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub feature: String,
    pub present: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows: Vec<FeatureRow>,
    /// Payment options verbatim, comma-joined per insurer.
    pub payment_options: TableRow,
}

/// One card per selected quote. The selection is rendered in batch order,
/// so the first card is always the cheapest and carries the badge.
pub fn overview_cards(state: &ComparisonState) -> Vec<OverviewCard> {
    state
        .selected_quotes()
        .iter()
        .enumerate()
        .map(|(index, quote)| OverviewCard {
            insurer_id: quote.insurer_id.clone(),
            insurer_name: quote.insurer_name.clone(),
            rating: quote.rating,
            review_count: quote.review_count,
            final_premium: quote.final_premium,
            discount_percent: quote.discount_percent,
            best_value: index == 0,
            key_coverage: quote.coverage_details.iter().take(3).cloned().collect(),
        })
        .collect()
}

/// Full coverage matrix: one row per coverage field, using the first
/// selected quote's field order as the canonical row order, closed by an
/// "Annual Premium" row.
pub fn coverage_matrix(state: &ComparisonState) -> ComparisonTable {
    let selected = state.selected_quotes();
    let columns = selected.iter().map(|quote| quote.insurer_name.clone()).collect();

    let mut rows: Vec<TableRow> = selected
        .first()
        .map(|canonical| {
            canonical
                .coverage_details
                .iter()
                .enumerate()
                .map(|(index, detail)| TableRow {
                    label: detail.name.clone(),
                    cells: selected
                        .iter()
                        .map(|quote| {
                            quote
                                .coverage_details
                                .get(index)
                                .map(|row| row.value.clone())
                                .unwrap_or_default()
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    if !selected.is_empty() {
        rows.push(TableRow {
            label: "Annual Premium".to_string(),
            cells: selected.iter().map(|quote| format_currency(quote.final_premium)).collect(),
        });
    }

    ComparisonTable { columns, rows }
}

/// Presence/absence matrix over the union of unique features among the
/// selection, preserving first-seen order, plus the payment options row.
pub fn feature_matrix(state: &ComparisonState) -> FeatureTable {
    let selected = state.selected_quotes();
    let columns: Vec<String> = selected.iter().map(|quote| quote.insurer_name.clone()).collect();

    let mut features: Vec<&str> = Vec::new();
    for quote in &selected {
        for feature in &quote.unique_features {
            if !features.contains(&feature.as_str()) {
                features.push(feature);
            }
        }
    }

    let rows = features
        .iter()
        .map(|feature| FeatureRow {
            feature: feature.to_string(),
            present: selected
                .iter()
                .map(|quote| quote.unique_features.iter().any(|f| f == feature))
                .collect(),
        })
        .collect();

    let payment_options = TableRow {
        label: "Payment Options".to_string(),
        cells: selected.iter().map(|quote| quote.payment_options.join(", ")).collect(),
    };

    FeatureTable { columns, rows, payment_options }
}

/// Whole-dollar USD display, e.g. `$1,234`.
pub fn format_currency(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{
        coverage_matrix, feature_matrix, format_currency, overview_cards, ComparisonController,
        ComparisonPhase, RequestHandoff, FETCH_FAILED_MESSAGE,
    };
    use crate::domain::quote::{CoverageDetail, Quote, QuoteBatch};
    use crate::domain::request::{CoverageLevel, InsuranceType, QuoteRequest};

    fn request() -> QuoteRequest {
        QuoteRequest {
            insurance_type: InsuranceType::Auto,
            coverage_level: CoverageLevel::Standard,
            zip_code: "90210".to_string(),
            vehicle_year: None,
            vehicle_make: None,
            vehicle_model: None,
            home_type: None,
            home_year: None,
            square_feet: None,
        }
    }

    fn quote(insurer_id: &str, name: &str, final_premium: i64, features: &[&str]) -> Quote {
        Quote {
            insurer_id: insurer_id.to_string(),
            insurer_name: name.to_string(),
            insurer_logo: "/placeholder.svg".to_string(),
            rating: 4.5,
            review_count: 100,
            premium: final_premium + 60,
            discount_percent: 8,
            discount_amount: 60,
            final_premium,
            coverage_details: vec![
                CoverageDetail { name: "Liability".to_string(), value: "$50,000/$100,000".to_string() },
                CoverageDetail { name: "Property Damage".to_string(), value: "$25,000".to_string() },
                CoverageDetail { name: "Collision Deductible".to_string(), value: "$500".to_string() },
                CoverageDetail { name: "Comprehensive Deductible".to_string(), value: "$500".to_string() },
                CoverageDetail { name: "Uninsured Motorist".to_string(), value: "Included".to_string() },
                CoverageDetail { name: "Roadside Assistance".to_string(), value: "Not Included".to_string() },
            ],
            unique_features: features.iter().map(|f| f.to_string()).collect(),
            payment_options: vec![
                "Monthly".to_string(),
                "Quarterly".to_string(),
                "Annually".to_string(),
            ],
            estimated_savings: 150,
            quote_id: "QT-42".to_string(),
            quote_expiry: Utc::now(),
        }
    }

    fn batch() -> QuoteBatch {
        QuoteBatch {
            quotes: vec![
                quote("insurer-3", "Liberty Shield", 540, &["Bundle Discount", "Safe Driver Rewards"]),
                quote("insurer-1", "SafeGuard Insurance", 610, &["24/7 Claims Service", "Accident Forgiveness"]),
                quote("insurer-5", "Atlas Coverage", 700, &["Loyalty Rewards", "Multi-Policy Discount"]),
                quote("insurer-2", "Pinnacle Protection", 810, &["Vanishing Deductible", "New Car Replacement"]),
                quote("insurer-4", "Horizon Assurance", 920, &["Mobile App Claims", "Paperless Discount"]),
            ],
            request_id: "REQ-7".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn loaded_controller() -> ComparisonController {
        let mut handoff = RequestHandoff::default();
        handoff.store(request());
        let (mut controller, ticket) = ComparisonController::mount(&mut handoff);
        let applied = controller.complete_fetch(ticket.expect("ticket"), Ok(batch()));
        assert!(applied);
        controller
    }

    #[test]
    fn mount_without_stored_request_is_terminal() {
        let mut handoff = RequestHandoff::default();
        let (controller, ticket) = ComparisonController::mount(&mut handoff);

        assert!(ticket.is_none());
        assert_eq!(*controller.phase(), ComparisonPhase::MissingRequest);
    }

    #[test]
    fn handoff_is_consumed_by_the_first_mount() {
        let mut handoff = RequestHandoff::default();
        handoff.store(request());

        let (_, first_ticket) = ComparisonController::mount(&mut handoff);
        assert!(first_ticket.is_some());

        let (controller, second_ticket) = ComparisonController::mount(&mut handoff);
        assert!(second_ticket.is_none());
        assert_eq!(*controller.phase(), ComparisonPhase::MissingRequest);
    }

    #[test]
    fn fetch_failure_renders_the_retry_less_error_state() {
        let mut handoff = RequestHandoff::default();
        handoff.store(request());
        let (mut controller, ticket) = ComparisonController::mount(&mut handoff);

        controller.complete_fetch(ticket.expect("ticket"), Err("connection reset".to_string()));
        assert_eq!(
            *controller.phase(),
            ComparisonPhase::FetchFailed { message: FETCH_FAILED_MESSAGE.to_string() }
        );
    }

    #[test]
    fn stale_fetch_completion_is_discarded() {
        let mut handoff = RequestHandoff::default();
        handoff.store(request());
        let (mut controller, first) = ComparisonController::mount(&mut handoff);
        let first = first.expect("ticket");

        // A re-navigation starts a newer fetch before the first resolves.
        let second = controller.begin_fetch(request());

        let applied_late = controller.complete_fetch(first, Ok(batch()));
        assert!(!applied_late);
        assert_eq!(*controller.phase(), ComparisonPhase::Loading);

        assert!(controller.complete_fetch(second, Ok(batch())));
        assert!(matches!(controller.phase(), ComparisonPhase::Loaded(_)));
    }

    #[test]
    fn loaded_state_auto_selects_and_expands_per_ranking() {
        let controller = loaded_controller();
        let ComparisonPhase::Loaded(state) = controller.phase() else {
            panic!("expected loaded phase");
        };

        assert_eq!(state.selection.ids(), ["insurer-3", "insurer-1", "insurer-5"]);
        assert!(state.expansion.is_expanded("insurer-3"));
        assert!(!state.expansion.is_expanded("insurer-1"));
    }

    #[test]
    fn overview_badges_the_cheapest_card_and_trims_coverage() {
        let controller = loaded_controller();
        let ComparisonPhase::Loaded(state) = controller.phase() else {
            panic!("expected loaded phase");
        };

        let cards = overview_cards(state);
        assert_eq!(cards.len(), 3);
        assert!(cards[0].best_value);
        assert_eq!(cards[0].insurer_id, "insurer-3");
        assert!(!cards[1].best_value);
        assert_eq!(cards[0].key_coverage.len(), 3);
    }

    #[test]
    fn selection_changes_rerender_immediately() {
        let mut controller = loaded_controller();
        let state = controller.state_mut().expect("loaded state");
        state.selection.toggle("insurer-3").expect("deselect cheapest");

        let ComparisonPhase::Loaded(state) = controller.phase() else {
            panic!("expected loaded phase");
        };
        let cards = overview_cards(state);
        assert_eq!(cards.len(), 2);
        // The badge follows the new cheapest selected quote.
        assert_eq!(cards[0].insurer_id, "insurer-1");
        assert!(cards[0].best_value);
    }

    #[test]
    fn coverage_matrix_closes_with_the_premium_row() {
        let controller = loaded_controller();
        let ComparisonPhase::Loaded(state) = controller.phase() else {
            panic!("expected loaded phase");
        };

        let table = coverage_matrix(state);
        assert_eq!(table.columns, ["Liberty Shield", "SafeGuard Insurance", "Atlas Coverage"]);
        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.rows[0].label, "Liability");

        let premium_row = table.rows.last().expect("premium row");
        assert_eq!(premium_row.label, "Annual Premium");
        assert_eq!(premium_row.cells, ["$540", "$610", "$700"]);
    }

    #[test]
    fn feature_matrix_unions_features_and_joins_payment_options() {
        let controller = loaded_controller();
        let ComparisonPhase::Loaded(state) = controller.phase() else {
            panic!("expected loaded phase");
        };

        let table = feature_matrix(state);
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[0].feature, "Bundle Discount");
        assert_eq!(table.rows[0].present, [true, false, false]);

        assert_eq!(table.payment_options.label, "Payment Options");
        assert_eq!(table.payment_options.cells[0], "Monthly, Quarterly, Annually");
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(608), "$608");
        assert_eq!(format_currency(1_234), "$1,234");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }
}
