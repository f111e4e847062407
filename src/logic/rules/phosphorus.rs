use super::{Finding, Rule};
use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Phosphorus supply rule
///
/// Phosphorus is immobile in soil and slow to correct, so deficiency
/// warrants earlier action than the other macronutrients. Excess is an
/// environmental problem before it is an agronomic one.
pub struct PhosphorusRule;

impl Rule for PhosphorusRule {
    fn id(&self) -> &'static str {
        "phosphorus_supply"
    }

    fn name(&self) -> &'static str {
        "Phosphorus"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let p = reading.phosphorus;
        let range = &profile.phosphorus;

        if p < 10.0 {
            return Some(
                Finding::new(
                    Parameter::Phosphorus,
                    Severity::Critical,
                    format!("Severe phosphorus deficiency ({:.0} ppm)", p),
                )
                .with_recommendation("Apply phosphate fertilizer banded near the root zone")
                .with_fertilizer(
                    FertilizerRecommendation::new(
                        "Triple superphosphate (0-46-0)",
                        120.0,
                        "Immediately, banded at planting depth",
                    )
                    .with_notes("Banding beats broadcasting in cold or high-pH soil"),
                )
                .with_risk("Poor root establishment and delayed maturity"),
            );
        }

        if p < range.acceptable.0 {
            return Some(
                Finding::new(
                    Parameter::Phosphorus,
                    Severity::High,
                    format!("Phosphorus deficiency ({:.0} ppm) for {}", p, profile.crop),
                )
                .with_recommendation("Apply a phosphate fertilizer before the next planting")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Diammonium phosphate (18-46-0)",
                    100.0,
                    "Before the next planting",
                )),
            );
        }

        if range.below_optimal(p) {
            return Some(
                Finding::new(
                    Parameter::Phosphorus,
                    Severity::Medium,
                    format!("Low phosphorus ({:.0} ppm) below the optimal window", p),
                )
                .with_recommendation("Include a phosphate starter in the next fertilizer pass"),
            );
        }

        if p > range.acceptable.1 {
            return Some(
                Finding::new(
                    Parameter::Phosphorus,
                    Severity::Medium,
                    format!("Excessive phosphorus ({:.0} ppm)", p),
                )
                .with_recommendation("Suspend phosphate applications until levels normalize")
                .with_risk("Phosphorus runoff feeds algal blooms in nearby waterways"),
            );
        }

        None
    }
}
