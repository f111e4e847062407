use super::{
    moisture::MoistureRule,
    nitrogen::NitrogenRule,
    nutrient_balance::{NitrogenPhosphorusRatioRule, NitrogenPotassiumRatioRule},
    organic_matter::OrganicMatterRule,
    ph::PhRule,
    phosphorus::PhosphorusRule,
    potassium::PotassiumRule,
    Finding, Rule,
};
use crate::models::{CropProfile, Insight, SoilAnalysis, SoilReading, Urgency};

pub struct InsightEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl InsightEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(PhRule),
            Box::new(NitrogenRule),
            Box::new(PhosphorusRule),
            Box::new(PotassiumRule),
            Box::new(MoistureRule),
            Box::new(OrganicMatterRule),
            Box::new(NitrogenPhosphorusRatioRule),
            Box::new(NitrogenPotassiumRatioRule),
        ];

        Self { rules }
    }

    /// Run every rule against the reading using the generic profile.
    pub fn analyze(&self, reading: &SoilReading) -> SoilAnalysis {
        self.analyze_for_crop(reading, &CropProfile::generic())
    }

    /// Run every rule against the reading with crop-aware thresholds.
    pub fn analyze_for_crop(&self, reading: &SoilReading, profile: &CropProfile) -> SoilAnalysis {
        let findings: Vec<Finding> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(reading, profile))
            .collect();

        let mut analysis = SoilAnalysis::default();

        for finding in findings {
            analysis.insights.push(Insight::new(
                finding.parameter,
                finding.severity,
                finding.insight,
            ));
            if let Some(recommendation) = finding.recommendation {
                analysis.recommendations.push(recommendation);
            }
            if let Some(risk) = finding.risk {
                analysis.risks.push(risk);
            }
            if let Some(fertilizer) = finding.fertilizer {
                analysis.fertilizer_recommendations.push(fertilizer);
            }
        }

        analysis.crop_suggestions = suggest_crops(reading);
        analysis.urgency = Urgency::from_severity(analysis.max_severity());
        analysis
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        reading: &SoilReading,
        profile: &CropProfile,
    ) -> Option<Finding> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(reading, profile))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Crops suited to the measured pH and moisture, most tolerant first.
fn suggest_crops(reading: &SoilReading) -> Vec<String> {
    let mut crops: Vec<&str> = if reading.ph < 5.5 {
        vec!["Potato", "Blueberry", "Sweet potato"]
    } else if reading.ph < 6.0 {
        vec!["Potato", "Rice", "Rye"]
    } else if reading.ph <= 7.0 {
        vec!["Corn", "Wheat", "Tomato", "Soybean"]
    } else {
        vec!["Asparagus", "Beet", "Cabbage"]
    };

    if reading.moisture >= 60.0 && !crops.contains(&"Rice") {
        crops.insert(0, "Rice");
    }

    crops.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropType, Severity};

    fn degraded_reading() -> SoilReading {
        SoilReading::new(5.2, 25.0, 18.0, 45.0, 52.0).with_organic_matter(2.1)
    }

    fn healthy_reading() -> SoilReading {
        SoilReading::new(6.8, 65.0, 42.0, 75.0, 48.0).with_organic_matter(3.2)
    }

    #[test]
    fn degraded_reading_fires_acid_and_nitrogen_rules() {
        let analysis = InsightEngine::new().analyze(&degraded_reading());

        assert!(
            analysis
                .insights
                .iter()
                .any(|i| i.message.to_lowercase().contains("acidic")),
            "expected an acidic-soil insight"
        );
        assert!(
            analysis
                .insights
                .iter()
                .any(|i| i.message.to_lowercase().contains("nitrogen")),
            "expected a low-nitrogen insight"
        );
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.to_lowercase().contains("lime")));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.to_lowercase().contains("nitrogen fertilizer")));
        assert_ne!(analysis.urgency, Urgency::Low);
    }

    #[test]
    fn healthy_reading_is_quiet() {
        let analysis = InsightEngine::new().analyze(&healthy_reading());
        assert_eq!(analysis.urgency, Urgency::Low);
        assert!(analysis.risks.is_empty());
        assert!(analysis.insights.is_empty());
        assert!(analysis.fertilizer_recommendations.is_empty());
        // Suggestions are advisory, not findings.
        assert!(!analysis.crop_suggestions.is_empty());
    }

    #[test]
    fn urgency_follows_worst_severity() {
        let engine = InsightEngine::new();

        let critical = SoilReading::new(4.0, 60.0, 40.0, 60.0, 50.0);
        assert_eq!(engine.analyze(&critical).urgency, Urgency::High);

        let medium = SoilReading::new(5.8, 60.0, 40.0, 60.0, 50.0);
        assert_eq!(engine.analyze(&medium).urgency, Urgency::Medium);
    }

    #[test]
    fn crop_profile_shifts_thresholds() {
        let engine = InsightEngine::new();
        let reading = SoilReading::new(5.3, 60.0, 40.0, 70.0, 50.0);

        let generic = engine.analyze(&reading);
        assert!(generic
            .insights
            .iter()
            .any(|i| i.severity >= Severity::High));

        let potato = engine.analyze_for_crop(&reading, &CropProfile::for_crop(CropType::Potato));
        assert!(!potato
            .insights
            .iter()
            .any(|i| i.parameter == crate::models::Parameter::Ph));
    }

    #[test]
    fn acidic_soil_suggests_acid_tolerant_crops() {
        let analysis = InsightEngine::new().analyze(&degraded_reading());
        assert!(analysis.crop_suggestions.iter().any(|c| c == "Potato"));
    }

    #[test]
    fn wet_fields_suggest_rice_first() {
        let reading = SoilReading::new(6.5, 60.0, 40.0, 60.0, 68.0);
        let analysis = InsightEngine::new().analyze(&reading);
        assert_eq!(analysis.crop_suggestions.first().map(String::as_str), Some("Rice"));
    }

    #[test]
    fn evaluate_single_rule_by_id() {
        let engine = InsightEngine::new();
        let profile = CropProfile::generic();
        let finding = engine.evaluate_rule("ph_reaction", &degraded_reading(), &profile);
        assert!(finding.is_some());
        assert!(engine
            .evaluate_rule("unknown_rule", &degraded_reading(), &profile)
            .is_none());
    }

    #[test]
    fn list_rules_exposes_ladder() {
        let rules = InsightEngine::new().list_rules();
        assert_eq!(rules.len(), 8);
        assert!(rules.iter().any(|(id, _)| *id == "np_ratio"));
    }
}
