pub mod engine;
pub mod moisture;
pub mod nitrogen;
pub mod nutrient_balance;
pub mod organic_matter;
pub mod ph;
pub mod phosphorus;
pub mod potassium;

pub use engine::InsightEngine;

use crate::models::{CropProfile, FertilizerRecommendation, Parameter, Severity, SoilReading};

/// Trait for soil parameter rules.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against one reading and return a finding if a
    /// threshold condition is met
    fn evaluate(&self, reading: &SoilReading, profile: &CropProfile) -> Option<Finding>;
}

/// A fired rule: an insight plus whatever follow-ups the condition
/// warrants. Severity is fixed per threshold at definition time.
#[derive(Debug, Clone)]
pub struct Finding {
    pub parameter: Parameter,
    pub severity: Severity,
    pub insight: String,
    pub recommendation: Option<String>,
    pub fertilizer: Option<FertilizerRecommendation>,
    pub risk: Option<String>,
}

impl Finding {
    pub fn new(parameter: Parameter, severity: Severity, insight: impl Into<String>) -> Self {
        Self {
            parameter,
            severity,
            insight: insight.into(),
            recommendation: None,
            fertilizer: None,
            risk: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn with_fertilizer(mut self, fertilizer: FertilizerRecommendation) -> Self {
        self.fertilizer = Some(fertilizer);
        self
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk = Some(risk.into());
        self
    }
}
