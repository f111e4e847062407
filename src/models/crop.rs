use super::farm::CropType;
use super::reading::{Parameter, SoilReading};
use serde::{Deserialize, Serialize};

/// Three-tier banding of a measured value against a crop's target ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Optimal,
    Acceptable,
    Poor,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Optimal => "Optimal",
            Band::Acceptable => "Acceptable",
            Band::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target window for a single parameter. Bounds are inclusive on both
/// ends; the optimal window sits inside the acceptable window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetRange {
    pub optimal: (f64, f64),
    pub acceptable: (f64, f64),
}

impl TargetRange {
    pub const fn new(optimal: (f64, f64), acceptable: (f64, f64)) -> Self {
        Self {
            optimal,
            acceptable,
        }
    }

    pub fn classify(&self, value: f64) -> Band {
        if value >= self.optimal.0 && value <= self.optimal.1 {
            Band::Optimal
        } else if value >= self.acceptable.0 && value <= self.acceptable.1 {
            Band::Acceptable
        } else {
            Band::Poor
        }
    }

    pub fn below_optimal(&self, value: f64) -> bool {
        value < self.optimal.0
    }

    pub fn above_optimal(&self, value: f64) -> bool {
        value > self.optimal.1
    }
}

/// Per-crop soil targets used by both the scoring engine and the
/// insight rules. The generic profile is the fallback when no crop is
/// supplied (or the farm grows a mix).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CropProfile {
    pub crop: CropType,
    pub ph: TargetRange,
    pub nitrogen: TargetRange,
    pub phosphorus: TargetRange,
    pub potassium: TargetRange,
    pub moisture: TargetRange,
    pub organic_matter: TargetRange,
}

impl CropProfile {
    /// Crop-independent targets. pH 6.0-7.0 suits most field crops;
    /// nutrient windows follow common soil-test interpretation tables.
    pub fn generic() -> Self {
        Self {
            crop: CropType::Mixed,
            ph: TargetRange::new((6.0, 7.0), (5.5, 7.5)),
            nitrogen: TargetRange::new((40.0, 80.0), (20.0, 120.0)),
            phosphorus: TargetRange::new((30.0, 50.0), (20.0, 60.0)),
            potassium: TargetRange::new((40.0, 80.0), (25.0, 100.0)),
            moisture: TargetRange::new((40.0, 60.0), (30.0, 70.0)),
            organic_matter: TargetRange::new((3.0, 6.0), (2.0, 8.0)),
        }
    }

    pub fn for_crop(crop: CropType) -> Self {
        let generic = Self::generic();
        match crop {
            CropType::Corn => Self {
                crop,
                nitrogen: TargetRange::new((60.0, 120.0), (40.0, 150.0)),
                potassium: TargetRange::new((50.0, 100.0), (30.0, 130.0)),
                moisture: TargetRange::new((40.0, 65.0), (30.0, 75.0)),
                ..generic
            },
            CropType::Wheat => Self {
                crop,
                ph: TargetRange::new((6.0, 7.5), (5.5, 8.0)),
                nitrogen: TargetRange::new((50.0, 100.0), (30.0, 130.0)),
                ..generic
            },
            CropType::Rice => Self {
                crop,
                ph: TargetRange::new((5.5, 6.5), (5.0, 7.0)),
                moisture: TargetRange::new((60.0, 85.0), (45.0, 95.0)),
                ..generic
            },
            CropType::Soybean => Self {
                crop,
                nitrogen: TargetRange::new((20.0, 60.0), (10.0, 100.0)),
                ph: TargetRange::new((6.0, 7.0), (5.8, 7.5)),
                ..generic
            },
            CropType::Tomato => Self {
                crop,
                ph: TargetRange::new((6.0, 6.8), (5.5, 7.2)),
                potassium: TargetRange::new((60.0, 120.0), (40.0, 150.0)),
                ..generic
            },
            CropType::Potato => Self {
                crop,
                ph: TargetRange::new((5.0, 6.0), (4.8, 6.5)),
                potassium: TargetRange::new((60.0, 120.0), (40.0, 150.0)),
                ..generic
            },
            CropType::Lettuce => Self {
                crop,
                nitrogen: TargetRange::new((40.0, 80.0), (25.0, 110.0)),
                moisture: TargetRange::new((50.0, 70.0), (40.0, 80.0)),
                ..generic
            },
            CropType::Mixed => generic,
        }
    }

    pub fn range(&self, parameter: Parameter) -> Option<&TargetRange> {
        match parameter {
            Parameter::Ph => Some(&self.ph),
            Parameter::Nitrogen => Some(&self.nitrogen),
            Parameter::Phosphorus => Some(&self.phosphorus),
            Parameter::Potassium => Some(&self.potassium),
            Parameter::Moisture => Some(&self.moisture),
            Parameter::OrganicMatter => Some(&self.organic_matter),
            Parameter::Temperature => None,
        }
    }

    pub fn classify(&self, reading: &SoilReading, parameter: Parameter) -> Option<Band> {
        let range = self.range(parameter)?;
        let value = reading.value(parameter)?;
        Some(range.classify(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_inclusive() {
        let ph = CropProfile::generic().ph;
        assert_eq!(ph.classify(6.0), Band::Optimal);
        assert_eq!(ph.classify(7.0), Band::Optimal);
        assert_eq!(ph.classify(5.5), Band::Acceptable);
        assert_eq!(ph.classify(7.5), Band::Acceptable);
        assert_eq!(ph.classify(5.49), Band::Poor);
        assert_eq!(ph.classify(7.51), Band::Poor);
    }

    #[test]
    fn generic_profile_optimal_windows() {
        let profile = CropProfile::generic();
        assert_eq!(profile.nitrogen.classify(60.0), Band::Optimal);
        assert_eq!(profile.phosphorus.classify(40.0), Band::Optimal);
        assert_eq!(profile.potassium.classify(60.0), Band::Optimal);
        assert_eq!(profile.moisture.classify(50.0), Band::Optimal);
        assert_eq!(profile.organic_matter.classify(4.0), Band::Optimal);
    }

    #[test]
    fn crop_profiles_override_generic_targets() {
        let rice = CropProfile::for_crop(CropType::Rice);
        // Flooded paddies run far wetter than upland crops.
        assert_eq!(rice.moisture.classify(75.0), Band::Optimal);
        assert_eq!(CropProfile::generic().moisture.classify(75.0), Band::Poor);

        let potato = CropProfile::for_crop(CropType::Potato);
        assert_eq!(potato.ph.classify(5.3), Band::Optimal);
        assert_eq!(CropProfile::generic().ph.classify(5.3), Band::Poor);
    }

    #[test]
    fn temperature_has_no_target_range() {
        let profile = CropProfile::generic();
        assert!(profile.range(Parameter::Temperature).is_none());
    }

    #[test]
    fn classify_reads_optional_channels() {
        let profile = CropProfile::generic();
        let reading = SoilReading::new(6.5, 50.0, 40.0, 60.0, 45.0);
        assert_eq!(profile.classify(&reading, Parameter::Ph), Some(Band::Optimal));
        assert_eq!(profile.classify(&reading, Parameter::OrganicMatter), None);
    }
}
