//! Insurer-agnostic pricing and coverage lookup tables.
//!
//! These are configuration data, not logic: `insurance type × coverage
//! level → value`, identical for every carrier on the roster.

use crate::domain::quote::CoverageDetail;
use crate::domain::request::{CoverageLevel, InsuranceType};

pub const PAYMENT_OPTIONS: [&str; 3] = ["Monthly", "Quarterly", "Annually"];

pub fn coverage_multiplier(level: CoverageLevel) -> f64 {
    match level {
        CoverageLevel::Basic => 0.8,
        CoverageLevel::Standard => 1.0,
        CoverageLevel::Premium => 1.3,
    }
}

/// The six coverage rows for a request, in display order.
pub fn coverage_details(kind: InsuranceType, level: CoverageLevel) -> Vec<CoverageDetail> {
    let rows: [(&str, &str); 6] = match kind {
        InsuranceType::Auto => [
            (
                "Liability",
                pick(level, "$25,000/$50,000", "$50,000/$100,000", "$100,000/$300,000"),
            ),
            ("Property Damage", pick(level, "$10,000", "$25,000", "$50,000")),
            ("Collision Deductible", pick(level, "$1,000", "$500", "$250")),
            ("Comprehensive Deductible", pick(level, "$1,000", "$500", "$250")),
            ("Uninsured Motorist", pick(level, "Not Included", "Included", "Included")),
            ("Roadside Assistance", pick(level, "Not Included", "Not Included", "Included")),
        ],
        InsuranceType::Home => [
            ("Dwelling Coverage", pick(level, "$200,000", "$300,000", "$500,000")),
            ("Personal Property", pick(level, "$100,000", "$150,000", "$250,000")),
            ("Liability", pick(level, "$100,000", "$300,000", "$500,000")),
            ("Deductible", pick(level, "$2,000", "$1,000", "$500")),
            ("Water Damage", pick(level, "Limited", "Standard", "Enhanced")),
            (
                "Replacement Cost",
                pick(level, "Actual Cash Value", "Replacement Cost", "Extended Replacement Cost"),
            ),
        ],
    };

    rows.into_iter()
        .map(|(name, value)| CoverageDetail { name: name.to_string(), value: value.to_string() })
        .collect()
}

/// The two marketing features every carrier always advertises.
pub fn base_features(insurer_id: &str) -> [&'static str; 2] {
    match insurer_id {
        "insurer-1" => ["24/7 Claims Service", "Accident Forgiveness"],
        "insurer-2" => ["Vanishing Deductible", "New Car Replacement"],
        "insurer-3" => ["Bundle Discount", "Safe Driver Rewards"],
        "insurer-4" => ["Mobile App Claims", "Paperless Discount"],
        _ => ["Loyalty Rewards", "Multi-Policy Discount"],
    }
}

/// The extra feature appended at the premium coverage level.
pub fn premium_feature(kind: InsuranceType) -> &'static str {
    match kind {
        InsuranceType::Auto => "Gap Coverage",
        InsuranceType::Home => "Identity Theft Protection",
    }
}

fn pick(level: CoverageLevel, basic: &'static str, standard: &'static str, premium: &'static str) -> &'static str {
    match level {
        CoverageLevel::Basic => basic,
        CoverageLevel::Standard => standard,
        CoverageLevel::Premium => premium,
    }
}

#[cfg(test)]
mod tests {
    use super::{coverage_details, coverage_multiplier};
    use crate::domain::request::{CoverageLevel, InsuranceType};

    #[test]
    fn multipliers_match_the_documented_values() {
        assert_eq!(coverage_multiplier(CoverageLevel::Basic), 0.8);
        assert_eq!(coverage_multiplier(CoverageLevel::Standard), 1.0);
        assert_eq!(coverage_multiplier(CoverageLevel::Premium), 1.3);
    }

    #[test]
    fn every_type_level_combination_yields_the_documented_rows() {
        let cases: [(InsuranceType, CoverageLevel, [(&str, &str); 6]); 6] = [
            (
                InsuranceType::Auto,
                CoverageLevel::Basic,
                [
                    ("Liability", "$25,000/$50,000"),
                    ("Property Damage", "$10,000"),
                    ("Collision Deductible", "$1,000"),
                    ("Comprehensive Deductible", "$1,000"),
                    ("Uninsured Motorist", "Not Included"),
                    ("Roadside Assistance", "Not Included"),
                ],
            ),
            (
                InsuranceType::Auto,
                CoverageLevel::Standard,
                [
                    ("Liability", "$50,000/$100,000"),
                    ("Property Damage", "$25,000"),
                    ("Collision Deductible", "$500"),
                    ("Comprehensive Deductible", "$500"),
                    ("Uninsured Motorist", "Included"),
                    ("Roadside Assistance", "Not Included"),
                ],
            ),
            (
                InsuranceType::Auto,
                CoverageLevel::Premium,
                [
                    ("Liability", "$100,000/$300,000"),
                    ("Property Damage", "$50,000"),
                    ("Collision Deductible", "$250"),
                    ("Comprehensive Deductible", "$250"),
                    ("Uninsured Motorist", "Included"),
                    ("Roadside Assistance", "Included"),
                ],
            ),
            (
                InsuranceType::Home,
                CoverageLevel::Basic,
                [
                    ("Dwelling Coverage", "$200,000"),
                    ("Personal Property", "$100,000"),
                    ("Liability", "$100,000"),
                    ("Deductible", "$2,000"),
                    ("Water Damage", "Limited"),
                    ("Replacement Cost", "Actual Cash Value"),
                ],
            ),
            (
                InsuranceType::Home,
                CoverageLevel::Standard,
                [
                    ("Dwelling Coverage", "$300,000"),
                    ("Personal Property", "$150,000"),
                    ("Liability", "$300,000"),
                    ("Deductible", "$1,000"),
                    ("Water Damage", "Standard"),
                    ("Replacement Cost", "Replacement Cost"),
                ],
            ),
            (
                InsuranceType::Home,
                CoverageLevel::Premium,
                [
                    ("Dwelling Coverage", "$500,000"),
                    ("Personal Property", "$250,000"),
                    ("Liability", "$500,000"),
                    ("Deductible", "$500"),
                    ("Water Damage", "Enhanced"),
                    ("Replacement Cost", "Extended Replacement Cost"),
                ],
            ),
        ];

        for (kind, level, expected) in cases {
            let rows = coverage_details(kind, level);
            let actual: Vec<(&str, &str)> =
                rows.iter().map(|row| (row.name.as_str(), row.value.as_str())).collect();
            assert_eq!(actual, expected, "{kind:?}/{level:?}");
        }
    }
}
