pub mod comparison;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod selection;
pub mod wizard;

pub use comparison::{
    format_currency, ComparisonController, ComparisonPhase, ComparisonState, FetchTicket,
    RequestHandoff,
};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::insurer::{roster, InsurerProfile};
pub use domain::quote::{CoverageDetail, Quote, QuoteBatch};
pub use domain::request::{CoverageLevel, InsuranceType, QuoteRequest, QuoteRequestDraft};
pub use engine::{QuoteEngine, RandomSource, SequenceSource, ThreadRngSource};
pub use errors::DomainError;
pub use selection::{ExpansionState, SelectionChange, SelectionState, MAX_COMPARED};
pub use wizard::{QuoteWizard, WizardStep, WizardTransitionError};
