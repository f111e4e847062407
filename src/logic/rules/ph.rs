use super::{Finding, Rule};
use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Soil reaction rule
///
/// pH controls nutrient availability more than any single nutrient
/// level: below ~5.5 phosphorus binds to aluminum and iron, above
/// ~7.5 iron, manganese and zinc drop out of solution.
///
/// Ladder (generic profile; crop profiles shift the windows):
/// - <4.5 severely acidic, most nutrients locked out
/// - below acceptable range: acidic, lime correction
/// - below optimal range: slightly acidic
/// - above acceptable range: alkaline, sulfur correction
/// - above optimal range: slightly alkaline
pub struct PhRule;

impl Rule for PhRule {
    fn id(&self) -> &'static str {
        "ph_reaction"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let ph = reading.ph;
        let range = &profile.ph;

        if ph < 4.5 {
            return Some(
                Finding::new(
                    Parameter::Ph,
                    Severity::Critical,
                    format!(
                        "Severely acidic soil (pH {:.1}) - phosphorus and most micronutrients are locked out",
                        ph
                    ),
                )
                .with_recommendation(
                    "Apply agricultural lime at a corrective rate and retest in 4-6 weeks before planting",
                )
                .with_fertilizer(
                    FertilizerRecommendation::new("Agricultural lime (CaCO3)", 4000.0, "Immediately, incorporate into topsoil")
                        .with_notes("Split the application if the soil is sandy"),
                )
                .with_risk("Aluminum toxicity stunts root systems at very low pH"),
            );
        }

        if ph < range.acceptable.0 {
            return Some(
                Finding::new(
                    Parameter::Ph,
                    Severity::High,
                    format!("Acidic soil (pH {:.1}) below the acceptable range for {}", ph, profile.crop),
                )
                .with_recommendation("Apply agricultural lime to raise pH toward the optimal window")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Agricultural lime (CaCO3)",
                    2500.0,
                    "Before the next planting cycle",
                ))
                .with_risk("Phosphorus availability drops sharply in acidic soil"),
            );
        }

        if range.below_optimal(ph) {
            return Some(
                Finding::new(
                    Parameter::Ph,
                    Severity::Medium,
                    format!("Slightly acidic soil (pH {:.1})", ph),
                )
                .with_recommendation("Apply a light lime dressing and monitor pH next season")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Agricultural lime (CaCO3)",
                    1000.0,
                    "Next scheduled field pass",
                )),
            );
        }

        if ph > range.acceptable.1 {
            return Some(
                Finding::new(
                    Parameter::Ph,
                    Severity::High,
                    format!("Alkaline soil (pH {:.1}) above the acceptable range for {}", ph, profile.crop),
                )
                .with_recommendation("Apply elemental sulfur and work in acidifying organic matter")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Elemental sulfur",
                    500.0,
                    "Before the next planting cycle",
                ))
                .with_risk("Iron and zinc chlorosis is likely in alkaline soil"),
            );
        }

        if range.above_optimal(ph) {
            return Some(
                Finding::new(
                    Parameter::Ph,
                    Severity::Medium,
                    format!("Slightly alkaline soil (pH {:.1})", ph),
                )
                .with_recommendation(
                    "Work in acidifying organic matter (pine needles, peat) and monitor pH",
                ),
            );
        }

        None
    }
}
