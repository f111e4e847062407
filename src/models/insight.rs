use super::reading::Parameter;
use serde::{Deserialize, Serialize};

/// Severity is attached to each rule at definition time. Deriving
/// urgency from it keeps the analysis free of text sniffing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }

    /// Worst fired severity decides how urgently the farmer should act.
    pub fn from_severity(severity: Option<Severity>) -> Self {
        match severity {
            Some(Severity::Critical) | Some(Severity::High) => Urgency::High,
            Some(Severity::Medium) => Urgency::Medium,
            _ => Urgency::Low,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single observation about one parameter of one reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub parameter: Parameter,
    pub severity: Severity,
    pub message: String,
}

impl Insight {
    pub fn new(parameter: Parameter, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            parameter,
            severity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerRecommendation {
    pub product: String,
    pub rate_kg_per_ha: f64,
    pub timing: String,
    pub notes: Option<String>,
}

impl FertilizerRecommendation {
    pub fn new(product: impl Into<String>, rate_kg_per_ha: f64, timing: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            rate_kg_per_ha,
            timing: timing.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Result of running the rule ladder over one reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub risks: Vec<String>,
    pub fertilizer_recommendations: Vec<FertilizerRecommendation>,
    pub crop_suggestions: Vec<String>,
    pub urgency: Urgency,
}

impl SoilAnalysis {
    pub fn max_severity(&self) -> Option<Severity> {
        self.insights.iter().map(|i| i.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn urgency_from_severity() {
        assert_eq!(Urgency::from_severity(None), Urgency::Low);
        assert_eq!(Urgency::from_severity(Some(Severity::Low)), Urgency::Low);
        assert_eq!(
            Urgency::from_severity(Some(Severity::Medium)),
            Urgency::Medium
        );
        assert_eq!(Urgency::from_severity(Some(Severity::High)), Urgency::High);
        assert_eq!(
            Urgency::from_severity(Some(Severity::Critical)),
            Urgency::High
        );
    }

    #[test]
    fn max_severity_over_insights() {
        let mut analysis = SoilAnalysis::default();
        assert_eq!(analysis.max_severity(), None);

        analysis
            .insights
            .push(Insight::new(Parameter::Ph, Severity::Medium, "slightly acidic"));
        analysis
            .insights
            .push(Insight::new(Parameter::Nitrogen, Severity::High, "low nitrogen"));
        assert_eq!(analysis.max_severity(), Some(Severity::High));
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), "\"high\"");
    }
}
