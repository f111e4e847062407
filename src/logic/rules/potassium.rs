use super::{Finding, Rule};
use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Potassium supply rule
///
/// Potassium governs water regulation and stress tolerance. Deficient
/// stands scorch at leaf margins and lodge under wind; surplus mostly
/// antagonizes magnesium and calcium uptake.
pub struct PotassiumRule;

impl Rule for PotassiumRule {
    fn id(&self) -> &'static str {
        "potassium_supply"
    }

    fn name(&self) -> &'static str {
        "Potassium"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let k = reading.potassium;
        let range = &profile.potassium;

        if k < 15.0 {
            return Some(
                Finding::new(
                    Parameter::Potassium,
                    Severity::Critical,
                    format!("Severe potassium deficiency ({:.0} ppm)", k),
                )
                .with_recommendation("Apply potash fertilizer before the next irrigation")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Muriate of potash (0-0-60)",
                    150.0,
                    "Immediately, before irrigation",
                ))
                .with_risk("Weak stalks and drought intolerance under potassium starvation"),
            );
        }

        if k < range.acceptable.0 {
            return Some(
                Finding::new(
                    Parameter::Potassium,
                    Severity::High,
                    format!("Potassium deficiency ({:.0} ppm) for {}", k, profile.crop),
                )
                .with_recommendation("Schedule a potash application this season")
                .with_fertilizer(FertilizerRecommendation::new(
                    "Muriate of potash (0-0-60)",
                    100.0,
                    "This season, before fruit set",
                )),
            );
        }

        if range.below_optimal(k) {
            return Some(
                Finding::new(
                    Parameter::Potassium,
                    Severity::Medium,
                    format!("Low potassium ({:.0} ppm) below the optimal window", k),
                )
                .with_recommendation("Include potash in the next fertilizer pass"),
            );
        }

        if k > range.acceptable.1 {
            return Some(
                Finding::new(
                    Parameter::Potassium,
                    Severity::Medium,
                    format!("Excessive potassium ({:.0} ppm)", k),
                )
                .with_recommendation("Suspend potash applications until levels normalize")
                .with_risk("High potassium suppresses magnesium and calcium uptake"),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_with_k(k: f64) -> SoilReading {
        SoilReading::new(6.5, 60.0, 40.0, k, 50.0)
    }

    #[test]
    fn optimal_potassium_fires_nothing() {
        let profile = CropProfile::generic();
        for k in [40.0, 60.0, 80.0] {
            assert!(PotassiumRule.evaluate(&reading_with_k(k), &profile).is_none());
        }
    }

    #[test]
    fn deficiency_ladder() {
        let profile = CropProfile::generic();

        let severe = PotassiumRule.evaluate(&reading_with_k(10.0), &profile).unwrap();
        assert_eq!(severe.severity, Severity::Critical);

        let deficient = PotassiumRule.evaluate(&reading_with_k(20.0), &profile).unwrap();
        assert_eq!(deficient.severity, Severity::High);
        assert!(deficient
            .recommendation
            .as_ref()
            .unwrap()
            .to_lowercase()
            .contains("potash"));

        let low = PotassiumRule.evaluate(&reading_with_k(30.0), &profile).unwrap();
        assert_eq!(low.severity, Severity::Medium);
    }

    #[test]
    fn excess_fires_antagonism_risk() {
        let profile = CropProfile::generic();
        let excess = PotassiumRule.evaluate(&reading_with_k(120.0), &profile).unwrap();
        assert!(excess.risk.as_ref().unwrap().to_lowercase().contains("magnesium"));
    }
}
