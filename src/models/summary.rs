use super::reading::Parameter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive statistics for one parameter over a reading window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterStats {
    pub parameter: Parameter,
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub std_dev: f64,
    /// First-vs-last percent-change direction over the window.
    pub trend: Trend,
    /// Unitless consistency score in [0,1]; higher = steadier readings.
    pub stability: f64,
    /// Least-squares slope per reading step.
    pub slope: f64,
}

/// Per-parameter statistics over a time-ordered reading window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilSummary {
    pub count: usize,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub parameters: Vec<ParameterStats>,
}

impl SoilSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn stat(&self, parameter: Parameter) -> Option<&ParameterStats> {
        self.parameters.iter().find(|s| s.parameter == parameter)
    }

    pub fn average(&self, parameter: Parameter) -> Option<f64> {
        self.stat(parameter).map(|s| s.average)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    /// Buckets on |r|: <0.2 very weak, <0.4 weak, <0.6 moderate,
    /// <0.8 strong, otherwise very strong.
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r < 0.2 {
            CorrelationStrength::VeryWeak
        } else if r < 0.4 {
            CorrelationStrength::Weak
        } else if r < 0.6 {
            CorrelationStrength::Moderate
        } else if r < 0.8 {
            CorrelationStrength::Strong
        } else {
            CorrelationStrength::VeryStrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::VeryWeak => "Very Weak",
            CorrelationStrength::Weak => "Weak",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Strong => "Strong",
            CorrelationStrength::VeryStrong => "Very Strong",
        }
    }
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pearson correlation between two parameters' series over a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterCorrelation {
    pub first: Parameter,
    pub second: Parameter,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Naive linear projection of one parameter a few readings ahead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterForecast {
    pub parameter: Parameter,
    pub steps_ahead: usize,
    pub projected: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_strength_buckets() {
        assert_eq!(
            CorrelationStrength::from_coefficient(0.1),
            CorrelationStrength::VeryWeak
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.35),
            CorrelationStrength::Weak
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.5),
            CorrelationStrength::Moderate
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.7),
            CorrelationStrength::Strong
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.95),
            CorrelationStrength::VeryStrong
        );
    }

    #[test]
    fn correlation_strength_uses_absolute_value() {
        assert_eq!(
            CorrelationStrength::from_coefficient(-0.9),
            CorrelationStrength::VeryStrong
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(-0.25),
            CorrelationStrength::Weak
        );
    }

    #[test]
    fn bucket_bounds() {
        // Lower bound of each bucket is inclusive.
        assert_eq!(
            CorrelationStrength::from_coefficient(0.2),
            CorrelationStrength::Weak
        );
        assert_eq!(
            CorrelationStrength::from_coefficient(0.8),
            CorrelationStrength::VeryStrong
        );
    }

    #[test]
    fn empty_summary() {
        let summary = SoilSummary::empty();
        assert!(summary.is_empty());
        assert!(summary.parameters.is_empty());
        assert!(summary.stat(Parameter::Ph).is_none());
        assert!(summary.average(Parameter::Nitrogen).is_none());
    }
}
