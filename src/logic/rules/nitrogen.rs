use super::{Finding, Rule};
use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Nitrogen supply rule
///
/// Nitrogen drives vegetative growth and leaf color; it is also the
/// most mobile of the macronutrients, so both deficiency and excess
/// are common. Legume profiles tolerate lean nitrogen since the crop
/// fixes its own.
pub struct NitrogenRule;

impl Rule for NitrogenRule {
    fn id(&self) -> &'static str {
        "nitrogen_supply"
    }

    fn name(&self) -> &'static str {
        "Nitrogen"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let n = reading.nitrogen;
        let range = &profile.nitrogen;

        if n < 10.0 {
            return Some(
                Finding::new(
                    Parameter::Nitrogen,
                    Severity::Critical,
                    format!("Severe nitrogen deficiency ({:.0} ppm)", n),
                )
                .with_recommendation(
                    "Apply a fast-release nitrogen fertilizer application immediately",
                )
                .with_fertilizer(
                    FertilizerRecommendation::new("Urea (46-0-0)", 200.0, "Immediately, split into two passes")
                        .with_notes("Water in within 24 hours to limit volatilization"),
                )
                .with_risk("Stunted growth and major yield loss without prompt correction"),
            );
        }

        if n < range.acceptable.0 {
            if profile.crop.is_nitrogen_fixing() {
                return Some(Finding::new(
                    Parameter::Nitrogen,
                    Severity::Low,
                    format!(
                        "Lean soil nitrogen ({:.0} ppm) - expected for a nitrogen-fixing legume",
                        n
                    ),
                ));
            }
            return Some(
                Finding::new(
                    Parameter::Nitrogen,
                    Severity::High,
                    format!("Nitrogen deficiency ({:.0} ppm) for {}", n, profile.crop),
                )
                .with_recommendation("Schedule a nitrogen fertilizer application this week")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Urea (46-0-0)",
                    150.0,
                    "Within the week, before irrigation",
                ))
                .with_risk("Pale foliage and slowed growth while nitrogen stays low"),
            );
        }

        if range.below_optimal(n) {
            if profile.crop.is_nitrogen_fixing() {
                return None;
            }
            return Some(
                Finding::new(
                    Parameter::Nitrogen,
                    Severity::Medium,
                    format!("Low nitrogen ({:.0} ppm) below the optimal window", n),
                )
                .with_recommendation(
                    "Plan a nitrogen fertilizer application (urea or ammonium sulfate) before the next growth stage",
                )
                .with_fertilizer(FertilizerRecommendation::new(
                    "Urea (46-0-0)",
                    100.0,
                    "Before the next growth stage",
                )),
            );
        }

        if n > range.acceptable.1 {
            return Some(
                Finding::new(
                    Parameter::Nitrogen,
                    Severity::Medium,
                    format!("Excessive nitrogen ({:.0} ppm)", n),
                )
                .with_recommendation(
                    "Hold further nitrogen applications and plant a cover crop to take up the surplus",
                )
                .with_risk("Nitrate leaching into groundwater; lush growth at the expense of fruiting"),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;

    fn reading_with_n(n: f64) -> SoilReading {
        SoilReading::new(6.5, n, 40.0, 60.0, 50.0)
    }

    #[test]
    fn optimal_nitrogen_fires_nothing() {
        let profile = CropProfile::generic();
        for n in [40.0, 60.0, 80.0] {
            assert!(NitrogenRule.evaluate(&reading_with_n(n), &profile).is_none());
        }
    }

    #[test]
    fn deficiency_ladder() {
        let profile = CropProfile::generic();

        let severe = NitrogenRule.evaluate(&reading_with_n(5.0), &profile).unwrap();
        assert_eq!(severe.severity, Severity::Critical);
        assert!(severe.insight.to_lowercase().contains("deficiency"));

        let deficient = NitrogenRule.evaluate(&reading_with_n(15.0), &profile).unwrap();
        assert_eq!(deficient.severity, Severity::High);
        assert!(deficient.fertilizer.is_some());

        let low = NitrogenRule.evaluate(&reading_with_n(25.0), &profile).unwrap();
        assert_eq!(low.severity, Severity::Medium);
        assert!(low.insight.to_lowercase().contains("low nitrogen"));
        assert!(low
            .recommendation
            .as_ref()
            .unwrap()
            .to_lowercase()
            .contains("nitrogen fertilizer"));
    }

    #[test]
    fn excess_fires_leaching_risk() {
        let profile = CropProfile::generic();
        let excess = NitrogenRule.evaluate(&reading_with_n(150.0), &profile).unwrap();
        assert_eq!(excess.severity, Severity::Medium);
        assert!(excess.risk.as_ref().unwrap().to_lowercase().contains("leaching"));
    }

    #[test]
    fn legumes_tolerate_lean_nitrogen() {
        let soybean = CropProfile::for_crop(CropType::Soybean);

        // Below the soybean acceptable floor: informational only.
        let lean = NitrogenRule.evaluate(&reading_with_n(8.0), &soybean);
        // 8 ppm is below the severe cutoff regardless of crop
        assert_eq!(lean.unwrap().severity, Severity::Critical);

        let modest = NitrogenRule.evaluate(&reading_with_n(12.0), &soybean);
        // Below soybean optimal (20) but above its acceptable floor (10):
        // legume downgrade returns nothing actionable.
        assert!(modest.is_none());
    }
}
