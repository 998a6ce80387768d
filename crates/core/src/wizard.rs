//! Three-step quote request wizard.
//!
//! Forward transitions happen by making a selection on the current step;
//! the back action returns exactly one step and never discards entered
//! values. Submission enforces the required-field contract before the
//! request leaves the client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::request::{CoverageLevel, InsuranceType, QuoteRequest, QuoteRequestDraft};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    ChooseType,
    ChooseCoverage,
    EnterDetails,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardTransitionError {
    #[error("action is not valid at step {step:?}")]
    InvalidAction { step: WizardStep },
    #[error("missing required fields before submission: {fields:?}")]
    MissingRequiredFields { fields: Vec<&'static str> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteWizard {
    step: WizardStep,
    draft: QuoteRequestDraft,
}

impl Default for QuoteWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteWizard {
    pub fn new() -> Self {
        Self { step: WizardStep::ChooseType, draft: QuoteRequestDraft::default() }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &QuoteRequestDraft {
        &self.draft
    }

    pub fn select_type(&mut self, kind: InsuranceType) -> Result<(), WizardTransitionError> {
        self.expect_step(WizardStep::ChooseType)?;
        self.draft.insurance_type = Some(kind);
        self.step = WizardStep::ChooseCoverage;
        Ok(())
    }

    pub fn select_coverage(&mut self, level: CoverageLevel) -> Result<(), WizardTransitionError> {
        self.expect_step(WizardStep::ChooseCoverage)?;
        self.draft.coverage_level = Some(level);
        self.step = WizardStep::EnterDetails;
        Ok(())
    }

    /// Mutable access to the detail fields, only available on the final
    /// step. Values set here survive back-navigation.
    pub fn details_mut(&mut self) -> Result<&mut QuoteRequestDraft, WizardTransitionError> {
        self.expect_step(WizardStep::EnterDetails)?;
        Ok(&mut self.draft)
    }

    /// Returns exactly one step, preserving every entered field.
    pub fn back(&mut self) -> Result<(), WizardTransitionError> {
        let previous = match self.step() {
            WizardStep::ChooseType => {
                return Err(WizardTransitionError::InvalidAction { step: WizardStep::ChooseType })
            }
            WizardStep::ChooseCoverage => WizardStep::ChooseType,
            WizardStep::EnterDetails => WizardStep::ChooseCoverage,
        };
        self.step = previous;
        Ok(())
    }

    /// Finalizes the request. The zip code is the one required detail
    /// field; type-specific fields are optional convenience inputs.
    pub fn submit(&self) -> Result<QuoteRequest, WizardTransitionError> {
        self.expect_step(WizardStep::EnterDetails)?;

        let mut missing = self.draft.missing_engine_fields();
        if self.draft.zip_code.trim().is_empty() {
            missing.push("zipCode");
        }
        if !missing.is_empty() {
            return Err(WizardTransitionError::MissingRequiredFields { fields: missing });
        }

        self.draft
            .clone()
            .into_request()
            .map_err(|_| WizardTransitionError::MissingRequiredFields {
                fields: self.draft.missing_engine_fields(),
            })
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardTransitionError> {
        if self.step() == expected {
            Ok(())
        } else {
            Err(WizardTransitionError::InvalidAction { step: self.step() })
        }
    }
}
