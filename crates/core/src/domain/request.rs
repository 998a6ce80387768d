use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceType {
    Auto,
    Home,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    Basic,
    Standard,
    Premium,
}

/// A quote request as it arrives over the wire or accumulates in the form
/// wizard. Everything is optional so a partially filled request can be
/// represented; [`QuoteRequestDraft::into_request`] is the single place
/// where the required-parameter invariant is enforced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestDraft {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<InsuranceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_level: Option<CoverageLevel>,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<String>,
}

impl QuoteRequestDraft {
    /// Fields the quote engine refuses to price without.
    pub fn missing_engine_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.insurance_type.is_none() {
            missing.push("type");
        }
        if self.coverage_level.is_none() {
            missing.push("coverageLevel");
        }
        missing
    }

    pub fn into_request(self) -> Result<QuoteRequest, DomainError> {
        let (Some(insurance_type), Some(coverage_level)) =
            (self.insurance_type, self.coverage_level)
        else {
            return Err(DomainError::MissingRequiredParameters {
                fields: self.missing_engine_fields(),
            });
        };

        Ok(QuoteRequest {
            insurance_type,
            coverage_level,
            zip_code: self.zip_code,
            vehicle_year: self.vehicle_year,
            vehicle_make: self.vehicle_make,
            vehicle_model: self.vehicle_model,
            home_type: self.home_type,
            home_year: self.home_year,
            square_feet: self.square_feet,
        })
    }
}

/// A validated, immutable quote request. Lives for one comparison session;
/// the type-specific fields are convenience inputs only and do not affect
/// pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(rename = "type")]
    pub insurance_type: InsuranceType,
    pub coverage_level: CoverageLevel,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<String>,
}
