use super::{Finding, Rule};
use crate::models::{CropProfile, Parameter, Severity, SoilReading};

/// N:P ratios above this flag a nitrogen-heavy imbalance.
const NP_RATIO_LIMIT: f64 = 3.0;

/// N:K ratios above this flag a potassium shortfall relative to nitrogen.
const NK_RATIO_LIMIT: f64 = 2.0;

/// Nitrogen-to-phosphorus balance rule
///
/// The only cross-parameter checks in the ladder. A heavily skewed
/// ratio signals that feeding more nitrogen will not help until the
/// lagging nutrient is corrected. Skipped when the denominator is zero;
/// the corresponding deficiency rule already covers that case.
pub struct NitrogenPhosphorusRatioRule;

impl Rule for NitrogenPhosphorusRatioRule {
    fn id(&self) -> &'static str {
        "np_ratio"
    }

    fn name(&self) -> &'static str {
        "N:P Balance"
    }

    fn evaluate(&self, reading: &SoilReading, _profile: &CropProfile) -> Option<Finding> {
        if reading.phosphorus <= 0.0 {
            return None;
        }

        let ratio = reading.nitrogen / reading.phosphorus;
        if ratio <= NP_RATIO_LIMIT {
            return None;
        }

        Some(
            Finding::new(
                Parameter::Nitrogen,
                Severity::Medium,
                format!(
                    "Nitrogen-to-phosphorus imbalance (ratio {:.1}, expected at most {:.0})",
                    ratio, NP_RATIO_LIMIT
                ),
            )
            .with_recommendation(
                "Rebalance with a phosphate application instead of further nitrogen",
            ),
        )
    }
}

/// Nitrogen-to-potassium balance rule
pub struct NitrogenPotassiumRatioRule;

impl Rule for NitrogenPotassiumRatioRule {
    fn id(&self) -> &'static str {
        "nk_ratio"
    }

    fn name(&self) -> &'static str {
        "N:K Balance"
    }

    fn evaluate(&self, reading: &SoilReading, _profile: &CropProfile) -> Option<Finding> {
        if reading.potassium <= 0.0 {
            return None;
        }

        let ratio = reading.nitrogen / reading.potassium;
        if ratio <= NK_RATIO_LIMIT {
            return None;
        }

        Some(
            Finding::new(
                Parameter::Nitrogen,
                Severity::Medium,
                format!(
                    "Nitrogen-to-potassium imbalance (ratio {:.1}, expected at most {:.0})",
                    ratio, NK_RATIO_LIMIT
                ),
            )
            .with_recommendation("Rebalance with a potash application instead of further nitrogen"),
        )
    }
}
