use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measured soil quantities. pH is unitless, nutrients are ppm,
/// moisture and organic matter are percentages, temperature is °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
    Moisture,
    OrganicMatter,
    Temperature,
}

impl Parameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Nitrogen => "Nitrogen",
            Parameter::Phosphorus => "Phosphorus",
            Parameter::Potassium => "Potassium",
            Parameter::Moisture => "Moisture",
            Parameter::OrganicMatter => "Organic Matter",
            Parameter::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            Parameter::Nitrogen | Parameter::Phosphorus | Parameter::Potassium => "ppm",
            Parameter::Moisture | Parameter::OrganicMatter => "%",
            Parameter::Temperature => "°C",
        }
    }

    pub fn all() -> &'static [Parameter] {
        &[
            Parameter::Ph,
            Parameter::Nitrogen,
            Parameter::Phosphorus,
            Parameter::Potassium,
            Parameter::Moisture,
            Parameter::OrganicMatter,
            Parameter::Temperature,
        ]
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single soil sample for a farm. Immutable once scored; pH, NPK and
/// moisture are always present, organic matter and temperature are
/// optional sensor channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    pub timestamp: DateTime<Utc>,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub moisture: f64,
    pub organic_matter: Option<f64>,
    pub temperature: Option<f64>,
}

impl SoilReading {
    pub const PH_RANGE: (f64, f64) = (0.0, 14.0);
    pub const NUTRIENT_RANGE: (f64, f64) = (0.0, 200.0);
    pub const MOISTURE_RANGE: (f64, f64) = (0.0, 100.0);
    pub const ORGANIC_MATTER_RANGE: (f64, f64) = (0.0, 20.0);
    pub const TEMPERATURE_RANGE: (f64, f64) = (-10.0, 50.0);

    pub fn new(
        ph: f64,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        moisture: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            ph,
            nitrogen,
            phosphorus,
            potassium,
            moisture,
            organic_matter: None,
            temperature: None,
        }
    }

    pub fn with_organic_matter(mut self, organic_matter: f64) -> Self {
        self.organic_matter = Some(organic_matter);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Value of the given parameter, if the channel was measured.
    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Ph => Some(self.ph),
            Parameter::Nitrogen => Some(self.nitrogen),
            Parameter::Phosphorus => Some(self.phosphorus),
            Parameter::Potassium => Some(self.potassium),
            Parameter::Moisture => Some(self.moisture),
            Parameter::OrganicMatter => self.organic_matter,
            Parameter::Temperature => self.temperature,
        }
    }

    pub fn npk_average(&self) -> f64 {
        (self.nitrogen + self.phosphorus + self.potassium) / 3.0
    }

    /// Range check against the declared sensor ranges. Upstream input
    /// validation calls this before a reading reaches the analysis core.
    pub fn validate(&self) -> std::result::Result<(), String> {
        fn check(name: &str, value: f64, (lo, hi): (f64, f64)) -> std::result::Result<(), String> {
            if value.is_finite() && value >= lo && value <= hi {
                Ok(())
            } else {
                Err(format!("{} {} outside valid range [{}, {}]", name, value, lo, hi))
            }
        }

        check("pH", self.ph, Self::PH_RANGE)?;
        check("nitrogen", self.nitrogen, Self::NUTRIENT_RANGE)?;
        check("phosphorus", self.phosphorus, Self::NUTRIENT_RANGE)?;
        check("potassium", self.potassium, Self::NUTRIENT_RANGE)?;
        check("moisture", self.moisture, Self::MOISTURE_RANGE)?;
        if let Some(om) = self.organic_matter {
            check("organic matter", om, Self::ORGANIC_MATTER_RANGE)?;
        }
        if let Some(t) = self.temperature {
            check("temperature", t, Self::TEMPERATURE_RANGE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessor_covers_all_parameters() {
        let reading = SoilReading::new(6.5, 50.0, 40.0, 60.0, 45.0)
            .with_organic_matter(3.5)
            .with_temperature(22.0);

        assert_eq!(reading.value(Parameter::Ph), Some(6.5));
        assert_eq!(reading.value(Parameter::Nitrogen), Some(50.0));
        assert_eq!(reading.value(Parameter::Phosphorus), Some(40.0));
        assert_eq!(reading.value(Parameter::Potassium), Some(60.0));
        assert_eq!(reading.value(Parameter::Moisture), Some(45.0));
        assert_eq!(reading.value(Parameter::OrganicMatter), Some(3.5));
        assert_eq!(reading.value(Parameter::Temperature), Some(22.0));
    }

    #[test]
    fn optional_channels_default_to_none() {
        let reading = SoilReading::new(6.5, 50.0, 40.0, 60.0, 45.0);
        assert_eq!(reading.value(Parameter::OrganicMatter), None);
        assert_eq!(reading.value(Parameter::Temperature), None);
    }

    #[test]
    fn npk_average() {
        let reading = SoilReading::new(6.5, 60.0, 30.0, 90.0, 45.0);
        assert!((reading.npk_average() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_in_range_reading() {
        let reading = SoilReading::new(6.5, 50.0, 40.0, 60.0, 45.0)
            .with_organic_matter(3.5)
            .with_temperature(22.0);
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(SoilReading::new(15.0, 50.0, 40.0, 60.0, 45.0)
            .validate()
            .is_err());
        assert!(SoilReading::new(6.5, 250.0, 40.0, 60.0, 45.0)
            .validate()
            .is_err());
        assert!(SoilReading::new(6.5, 50.0, 40.0, 60.0, 120.0)
            .validate()
            .is_err());
        assert!(SoilReading::new(6.5, 50.0, 40.0, 60.0, 45.0)
            .with_temperature(80.0)
            .validate()
            .is_err());
        assert!(SoilReading::new(f64::NAN, 50.0, 40.0, 60.0, 45.0)
            .validate()
            .is_err());
    }

    #[test]
    fn parameter_serializes_snake_case() {
        let json = serde_json::to_string(&Parameter::OrganicMatter).unwrap();
        assert_eq!(json, "\"organic_matter\"");
    }
}
