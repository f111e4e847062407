use super::{Finding, Rule};
use crate::models::{CropProfile, Parameter, Severity, SoilReading};

/// Soil moisture rule
///
/// Both tails are actionable: drought stress shuts down nutrient
/// transport, saturation drives out oxygen and invites root disease.
/// Crop profiles widen or shift the window (rice runs flooded).
pub struct MoistureRule;

impl Rule for MoistureRule {
    fn id(&self) -> &'static str {
        "moisture_window"
    }

    fn name(&self) -> &'static str {
        "Moisture"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let moisture = reading.moisture;
        let range = &profile.moisture;

        if moisture < 15.0 {
            return Some(
                Finding::new(
                    Parameter::Moisture,
                    Severity::Critical,
                    format!("Severe drought stress ({:.0}% moisture)", moisture),
                )
                .with_recommendation("Irrigate immediately and check the irrigation system for failures")
                .with_risk("Wilting and crop loss within days without water"),
            );
        }

        if moisture < range.acceptable.0 {
            return Some(
                Finding::new(
                    Parameter::Moisture,
                    Severity::High,
                    format!("Dry soil ({:.0}% moisture) for {}", moisture, profile.crop),
                )
                .with_recommendation("Increase irrigation frequency until moisture recovers")
                .with_risk("Nutrient uptake slows sharply in dry soil"),
            );
        }

        if range.below_optimal(moisture) {
            return Some(
                Finding::new(
                    Parameter::Moisture,
                    Severity::Medium,
                    format!("Soil drier than optimal ({:.0}% moisture)", moisture),
                )
                .with_recommendation("Tighten the irrigation schedule and mulch to retain moisture"),
            );
        }

        if moisture > range.acceptable.1 {
            return Some(
                Finding::new(
                    Parameter::Moisture,
                    Severity::High,
                    format!("Waterlogged soil ({:.0}% moisture)", moisture),
                )
                .with_recommendation("Stop irrigation and improve drainage; check for standing water")
                .with_risk("Root rot and fungal disease establish quickly in saturated soil"),
            );
        }

        if range.above_optimal(moisture) {
            return Some(
                Finding::new(
                    Parameter::Moisture,
                    Severity::Medium,
                    format!("Soil wetter than optimal ({:.0}% moisture)", moisture),
                )
                .with_recommendation("Reduce irrigation until moisture returns to the optimal window"),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;

    fn reading_with_moisture(moisture: f64) -> SoilReading {
        SoilReading::new(6.5, 60.0, 40.0, 60.0, moisture)
    }

    #[test]
    fn optimal_moisture_fires_nothing() {
        let profile = CropProfile::generic();
        for moisture in [40.0, 50.0, 60.0] {
            assert!(MoistureRule
                .evaluate(&reading_with_moisture(moisture), &profile)
                .is_none());
        }
    }

    #[test]
    fn dry_ladder() {
        let profile = CropProfile::generic();

        let severe = MoistureRule
            .evaluate(&reading_with_moisture(10.0), &profile)
            .unwrap();
        assert_eq!(severe.severity, Severity::Critical);
        assert!(severe.insight.to_lowercase().contains("drought"));

        let dry = MoistureRule
            .evaluate(&reading_with_moisture(25.0), &profile)
            .unwrap();
        assert_eq!(dry.severity, Severity::High);

        let drier = MoistureRule
            .evaluate(&reading_with_moisture(35.0), &profile)
            .unwrap();
        assert_eq!(drier.severity, Severity::Medium);
    }

    #[test]
    fn wet_ladder() {
        let profile = CropProfile::generic();

        let saturated = MoistureRule
            .evaluate(&reading_with_moisture(80.0), &profile)
            .unwrap();
        assert_eq!(saturated.severity, Severity::High);
        assert!(saturated.risk.as_ref().unwrap().to_lowercase().contains("root rot"));

        let wet = MoistureRule
            .evaluate(&reading_with_moisture(65.0), &profile)
            .unwrap();
        assert_eq!(wet.severity, Severity::Medium);
    }

    #[test]
    fn rice_tolerates_paddy_moisture() {
        let rice = CropProfile::for_crop(CropType::Rice);
        assert!(MoistureRule
            .evaluate(&reading_with_moisture(80.0), &rice)
            .is_none());
    }
}
