use super::{Finding, Rule};
use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Organic matter rule
///
/// Skipped entirely when the channel was not measured. Low organic
/// matter degrades structure and water holding; very high levels are
/// usually just worth noting (peaty ground, heavy amendment history).
pub struct OrganicMatterRule;

impl Rule for OrganicMatterRule {
    fn id(&self) -> &'static str {
        "organic_matter"
    }

    fn name(&self) -> &'static str {
        "Organic Matter"
    }

    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding> {
        let om = reading.organic_matter?;
        let range = &profile.organic_matter;

        if om < range.acceptable.0 {
            return Some(
                Finding::new(
                    Parameter::OrganicMatter,
                    Severity::High,
                    format!("Low organic matter ({:.1}%)", om),
                )
                .with_recommendation(
                    "Incorporate compost or manure and plant cover crops between seasons",
                )
                .with_fertilizer(
                    FertilizerRecommendation::new("Composted manure", 10000.0, "Between seasons")
                        .with_notes("Spread and incorporate before tillage"),
                )
                .with_risk("Poor soil structure and weak water retention"),
            );
        }

        if range.below_optimal(om) {
            return Some(
                Finding::new(
                    Parameter::OrganicMatter,
                    Severity::Medium,
                    format!("Organic matter ({:.1}%) below the optimal window", om),
                )
                .with_recommendation("Add compost and retain crop residue after harvest"),
            );
        }

        if om > range.acceptable.1 {
            return Some(Finding::new(
                Parameter::OrganicMatter,
                Severity::Low,
                format!("Very high organic matter ({:.1}%)", om),
            ));
        }

        None
    }
}
