use super::statistics::slope_direction;
use crate::models::{
    ActionRecommendation, CropProfile, Parameter, ParameterCorrelation, RiskAssessment,
    RiskLevel, Severity, SoilSummary, SynthesisReport, Trend,
};

/// Moisture stability below this reads as an erratic irrigation pattern.
const STABILITY_ERRATIC: f64 = 0.5;

/// Combine aggregated statistics into prioritized actions and a risk
/// assessment. All thresholds run against the window averages, not raw
/// readings; trend and stability checks supplement them.
pub fn synthesize(
    summary: &SoilSummary,
    correlations: &[ParameterCorrelation],
) -> SynthesisReport {
    synthesize_for_crop(summary, correlations, &CropProfile::generic())
}

pub fn synthesize_for_crop(
    summary: &SoilSummary,
    correlations: &[ParameterCorrelation],
    profile: &CropProfile,
) -> SynthesisReport {
    if summary.is_empty() {
        return SynthesisReport::empty();
    }

    let mut recommendations = collect_recommendations(summary, profile);
    let mut risks = collect_risks(summary, profile);

    if let Some(leached) = leaching_signal(correlations) {
        recommendations.push(ActionRecommendation::new(
            Severity::Medium,
            format!(
                "{} falls as moisture rises; split fertilizer into smaller doses around irrigation",
                leached
            ),
            "From the next application onward",
            "Less nutrient lost per irrigation event",
        ));
        risks.push(RiskAssessment::new(
            "nutrient_leaching",
            RiskLevel::Medium,
            0.5,
            "Irrigation events appear to wash nutrients below the root zone",
            "Smaller split applications timed away from heavy watering",
        ));
    }

    // Highest priority first; stable so same-priority actions keep
    // their parameter order.
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));

    let risk_by_category = risks
        .iter()
        .map(|r| (r.category.clone(), r.level))
        .collect();
    let overall_risk = overall_risk(&risks);

    SynthesisReport {
        recommendations,
        risks,
        risk_by_category,
        overall_risk,
    }
}

/// First nutrient whose series runs strongly opposite to moisture - the
/// classic signature of leaching under heavy irrigation.
fn leaching_signal(correlations: &[ParameterCorrelation]) -> Option<Parameter> {
    let nutrients = [
        Parameter::Nitrogen,
        Parameter::Phosphorus,
        Parameter::Potassium,
    ];
    correlations.iter().find_map(|c| {
        if c.coefficient > -0.6 {
            return None;
        }
        match (c.first, c.second) {
            (Parameter::Moisture, other) if nutrients.contains(&other) => Some(other),
            (other, Parameter::Moisture) if nutrients.contains(&other) => Some(other),
            _ => None,
        }
    })
}

fn collect_recommendations(
    summary: &SoilSummary,
    profile: &CropProfile,
) -> Vec<ActionRecommendation> {
    let mut actions = Vec::new();

    if let Some(ph) = summary.average(Parameter::Ph) {
        let range = &profile.ph;
        if ph < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Apply agricultural lime across the farm to correct acidity",
                "Before the next planting cycle",
                "pH rises into the optimal window within one season",
            ));
        } else if range.below_optimal(ph) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Apply a light lime dressing to nudge pH upward",
                "Next scheduled field pass",
                "pH drifts up by 0.3-0.5 units over the season",
            ));
        } else if ph > range.acceptable.1 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Apply elemental sulfur to bring alkaline soil down",
                "Before the next planting cycle",
                "pH falls toward the optimal window within one season",
            ));
        } else if range.above_optimal(ph) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Work in acidifying organic matter to ease pH down",
                "Between seasons",
                "pH drifts down by 0.2-0.4 units",
            ));
        }
    }

    if let Some(stats) = summary.stat(Parameter::Nitrogen) {
        let range = &profile.nitrogen;
        if stats.average < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Start a split nitrogen fertilization program",
                "First pass within the week",
                "Nitrogen recovers to the optimal window over 2-3 applications",
            ));
        } else if range.below_optimal(stats.average) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Top-dress nitrogen ahead of the next growth stage",
                "Before the next growth stage",
                "Average nitrogen rises into the optimal window",
            ));
        } else if stats.trend == Trend::Decreasing && !range.above_optimal(stats.average) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Nitrogen is trending down; retest and top-dress before deficiency shows",
                "Within two weeks",
                "Downward trend arrested before it costs yield",
            ));
        }
    }

    if let Some(p) = summary.average(Parameter::Phosphorus) {
        let range = &profile.phosphorus;
        if p < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Band phosphate fertilizer near the root zone",
                "Before the next planting",
                "Phosphorus recovers over the season; roots establish faster",
            ));
        } else if range.below_optimal(p) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Include a phosphate starter in the next fertilizer pass",
                "Next fertilizer pass",
                "Average phosphorus rises into the optimal window",
            ));
        }
    }

    if let Some(k) = summary.average(Parameter::Potassium) {
        let range = &profile.potassium;
        if k < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Apply muriate of potash before the next irrigation",
                "This week",
                "Potassium recovers; stress tolerance improves within weeks",
            ));
        } else if range.below_optimal(k) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Include potash in the next fertilizer pass",
                "Next fertilizer pass",
                "Average potassium rises into the optimal window",
            ));
        }
    }

    if let Some(stats) = summary.stat(Parameter::Moisture) {
        let range = &profile.moisture;
        if stats.average < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Increase irrigation frequency until moisture recovers",
                "Immediately",
                "Moisture returns to the optimal window within days",
            ));
        } else if range.below_optimal(stats.average) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Tighten the irrigation schedule and mulch exposed beds",
                "This week",
                "Average moisture rises into the optimal window",
            ));
        } else if stats.average > range.acceptable.1 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Improve drainage and pause irrigation",
                "Immediately",
                "Saturation clears; root-zone oxygen recovers",
            ));
        }

        if stats.stability < STABILITY_ERRATIC && stats.count >= 3 {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Moisture swings widely between readings; audit the irrigation schedule",
                "Within two weeks",
                "Steadier moisture curve and fewer stress cycles",
            ));
        }
    }

    if let Some(om) = summary.average(Parameter::OrganicMatter) {
        let range = &profile.organic_matter;
        if om < range.acceptable.0 {
            actions.push(ActionRecommendation::new(
                Severity::High,
                "Start an organic matter program: compost, manure, cover crops",
                "Between seasons",
                "Organic matter climbs ~0.5% per year with consistent inputs",
            ));
        } else if range.below_optimal(om) {
            actions.push(ActionRecommendation::new(
                Severity::Medium,
                "Add compost and retain crop residue after harvest",
                "After harvest",
                "Organic matter trends toward the optimal window",
            ));
        }
    }

    actions
}

fn collect_risks(summary: &SoilSummary, profile: &CropProfile) -> Vec<RiskAssessment> {
    let mut risks = Vec::new();

    if let Some(ph) = summary.average(Parameter::Ph) {
        if ph < 5.0 {
            risks.push(RiskAssessment::new(
                "nutrient_lockout",
                RiskLevel::High,
                0.8,
                "Phosphorus and micronutrients become unavailable; aluminum toxicity stunts roots",
                "Corrective lime application, retest in 4-6 weeks",
            ));
        } else if ph > 8.0 {
            risks.push(RiskAssessment::new(
                "micronutrient_chlorosis",
                RiskLevel::Medium,
                0.6,
                "Iron and zinc deficiency symptoms on new growth",
                "Elemental sulfur plus chelated micronutrient foliar feed",
            ));
        }
    }

    if let Some(stats) = summary.stat(Parameter::Nitrogen) {
        if stats.average < profile.nitrogen.acceptable.0 {
            risks.push(RiskAssessment::new(
                "yield_loss",
                RiskLevel::High,
                0.7,
                "Sustained nitrogen shortage cuts yield potential for the season",
                "Split nitrogen program starting this week",
            ));
        } else if stats.average > profile.nitrogen.acceptable.1 {
            risks.push(RiskAssessment::new(
                "nitrate_leaching",
                RiskLevel::Medium,
                0.6,
                "Surplus nitrate moves below the root zone and into groundwater",
                "Suspend nitrogen, plant a catch crop",
            ));
        } else if stats.trend == Trend::Decreasing {
            risks.push(RiskAssessment::new(
                "nitrogen_depletion",
                RiskLevel::Medium,
                0.5,
                "Current draw-down reaches deficiency within the season",
                "Retest within two weeks and plan a top-dress",
            ));
        }
    }

    if let Some(stats) = summary.stat(Parameter::Potassium) {
        // Regression slope rather than first-vs-last: potassium moves
        // slowly and endpoint noise would dominate the simple trend.
        if slope_direction(stats.slope) == Trend::Decreasing
            && profile.potassium.below_optimal(stats.average)
        {
            risks.push(RiskAssessment::new(
                "potassium_depletion",
                RiskLevel::Medium,
                0.5,
                "Falling potassium weakens stress tolerance ahead of fruit set",
                "Potash application in the next fertilizer pass",
            ));
        }
    }

    if let Some(stats) = summary.stat(Parameter::Moisture) {
        if stats.average > profile.moisture.acceptable.1 {
            risks.push(RiskAssessment::new(
                "waterlogging",
                RiskLevel::High,
                0.75,
                "Saturated root zone; root rot and fungal disease likely",
                "Improve drainage, pause irrigation until moisture recedes",
            ));
        } else if stats.average < profile.moisture.acceptable.0 {
            risks.push(RiskAssessment::new(
                "drought_stress",
                RiskLevel::High,
                0.7,
                "Sustained dryness shuts down nutrient transport and wilts the stand",
                "Immediate irrigation, then a tighter schedule",
            ));
        }

        if stats.stability < 0.4 && stats.count >= 3 {
            risks.push(RiskAssessment::new(
                "irrigation_inconsistency",
                RiskLevel::Medium,
                0.5,
                "Wet-dry cycling stresses roots and splits fruit",
                "Audit irrigation timers and emitter coverage",
            ));
        }
    }

    if let Some(om) = summary.average(Parameter::OrganicMatter) {
        if om < profile.organic_matter.acceptable.0 {
            risks.push(RiskAssessment::new(
                "soil_degradation",
                RiskLevel::Medium,
                0.6,
                "Structure and water holding decline; erosion accelerates",
                "Compost and cover-crop program between seasons",
            ));
        }
    }

    risks
}

/// Probability-weighted sum of the per-risk level scores, bucketed at
/// >=2 high and >=1 medium. Several moderate risks accumulate to high;
/// no fired risks means low.
fn overall_risk(risks: &[RiskAssessment]) -> RiskLevel {
    let weighted: f64 = risks.iter().map(|r| r.level.score() * r.probability).sum();
    if weighted >= 2.0 {
        RiskLevel::High
    } else if weighted >= 1.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
