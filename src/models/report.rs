use super::farm::CropType;
use super::insight::{Severity, SoilAnalysis};
use super::summary::{ParameterCorrelation, ParameterForecast, SoilSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One action derived from the aggregated statistics, tagged so the
/// presentation layer can order and group it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub priority: Severity,
    pub action: String,
    pub timing: String,
    pub expected_improvement: String,
}

impl ActionRecommendation {
    pub fn new(
        priority: Severity,
        action: impl Into<String>,
        timing: impl Into<String>,
        expected_improvement: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            action: action.into(),
            timing: timing.into(),
            expected_improvement: expected_improvement.into(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Numeric weight used for the probability-weighted overall level.
    pub fn score(&self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Medium => 2.0,
            RiskLevel::High => 3.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk entry produced by the synthesis threshold table. Probability is
/// fixed per rule, not computed from the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub category: String,
    pub level: RiskLevel,
    pub probability: f64,
    pub impact: String,
    pub mitigation: String,
}

impl RiskAssessment {
    pub fn new(
        category: impl Into<String>,
        level: RiskLevel,
        probability: f64,
        impact: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            level,
            probability,
            impact: impact.into(),
            mitigation: mitigation.into(),
        }
    }
}

/// Output of the recommendation synthesizer over one summary window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub recommendations: Vec<ActionRecommendation>,
    pub risks: Vec<RiskAssessment>,
    pub risk_by_category: BTreeMap<String, RiskLevel>,
    pub overall_risk: RiskLevel,
}

impl SynthesisReport {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Full analysis payload for one farm and reading window, as returned
/// to an HTTP handler or pushed over the notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmReport {
    pub farm_id: Uuid,
    pub farm_name: String,
    pub crop_type: CropType,
    pub generated_at: DateTime<Utc>,
    pub reading_count: usize,
    /// Score of the most recent reading; absent for an empty window.
    pub health_score: Option<u8>,
    /// Rule analysis of the most recent reading.
    pub latest_analysis: Option<SoilAnalysis>,
    pub summary: SoilSummary,
    pub correlations: Vec<ParameterCorrelation>,
    pub forecasts: Vec<ParameterForecast>,
    pub synthesis: SynthesisReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_scores() {
        assert!((RiskLevel::Low.score() - 1.0).abs() < f64::EPSILON);
        assert!((RiskLevel::Medium.score() - 2.0).abs() < f64::EPSILON);
        assert!((RiskLevel::High.score() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn risk_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }

    #[test]
    fn empty_synthesis_report() {
        let report = SynthesisReport::empty();
        assert!(report.recommendations.is_empty());
        assert!(report.risks.is_empty());
        assert_eq!(report.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }
}
