use crate::models::{Band, CropProfile, SoilReading};

/// Soil health scoring.
///
/// Each factor earns band points against the crop's target ranges:
/// optimal 100, acceptable 70, poor 30. The NPK factor is the mean of
/// the three nutrient band scores so a single deficient nutrient drags
/// the factor instead of vanishing into an averaged concentration. The
/// final score is the rounded mean of the available factors.
///
/// Factors: pH, NPK, moisture, and organic matter when measured. A
/// missing organic-matter channel reduces the factor count rather than
/// penalizing the reading. Temperature is informational only.
const OPTIMAL_POINTS: f64 = 100.0;
const ACCEPTABLE_POINTS: f64 = 70.0;
const POOR_POINTS: f64 = 30.0;

fn band_points(band: Band) -> f64 {
    match band {
        Band::Optimal => OPTIMAL_POINTS,
        Band::Acceptable => ACCEPTABLE_POINTS,
        Band::Poor => POOR_POINTS,
    }
}

/// Score a reading against the generic crop profile. Pure and
/// deterministic; result is always in [0, 100].
pub fn score(reading: &SoilReading) -> u8 {
    score_for_crop(reading, &CropProfile::generic())
}

/// Score a reading against a specific crop's target ranges.
pub fn score_for_crop(reading: &SoilReading, profile: &CropProfile) -> u8 {
    let npk = (band_points(profile.nitrogen.classify(reading.nitrogen))
        + band_points(profile.phosphorus.classify(reading.phosphorus))
        + band_points(profile.potassium.classify(reading.potassium)))
        / 3.0;

    let mut factors = vec![
        band_points(profile.ph.classify(reading.ph)),
        npk,
        band_points(profile.moisture.classify(reading.moisture)),
    ];

    if let Some(om) = reading.organic_matter {
        factors.push(band_points(profile.organic_matter.classify(om)));
    }

    let total: f64 = factors.iter().sum();
    let averaged = total / factors.len() as f64;
    averaged.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropProfile, CropType};

    fn optimal_reading() -> SoilReading {
        SoilReading::new(6.5, 60.0, 40.0, 60.0, 50.0).with_organic_matter(4.0)
    }

    #[test]
    fn all_optimal_scores_at_least_80() {
        // Spot-check the corners of the optimal windows.
        for (ph, n, p, k, moisture) in [
            (6.0, 40.0, 30.0, 40.0, 40.0),
            (7.0, 80.0, 50.0, 80.0, 60.0),
            (6.5, 60.0, 40.0, 60.0, 50.0),
        ] {
            let reading = SoilReading::new(ph, n, p, k, moisture);
            assert!(
                score(&reading) >= 80,
                "expected >= 80 for ({}, {}, {}, {}, {})",
                ph,
                n,
                p,
                k,
                moisture
            );
        }
    }

    #[test]
    fn fully_optimal_reading_scores_100() {
        assert_eq!(score(&optimal_reading()), 100);
    }

    #[test]
    fn ph_band_bounds_are_inclusive() {
        let low_edge = SoilReading::new(6.0, 60.0, 40.0, 60.0, 50.0);
        let high_edge = SoilReading::new(7.0, 60.0, 40.0, 60.0, 50.0);
        assert_eq!(score(&low_edge), 100);
        assert_eq!(score(&high_edge), 100);
    }

    #[test]
    fn score_is_clamped_to_valid_range() {
        let worst = SoilReading::new(0.0, 0.0, 0.0, 0.0, 0.0).with_organic_matter(0.0);
        let best = optimal_reading();
        assert!(score(&worst) <= 100);
        assert!(score(&best) <= 100);
        // Everything poor lands on the poor floor, never below zero.
        assert_eq!(score(&worst), 30);
    }

    #[test]
    fn missing_organic_matter_degrades_factor_count() {
        // Three optimal factors without OM still average to 100.
        let reading = SoilReading::new(6.5, 60.0, 40.0, 60.0, 50.0);
        assert_eq!(score(&reading), 100);

        // Poor OM pulls a fully optimal reading down but stays >= 80.
        let with_poor_om = SoilReading::new(6.5, 60.0, 40.0, 60.0, 50.0).with_organic_matter(0.5);
        assert_eq!(score(&with_poor_om), 83);
    }

    #[test]
    fn single_deficient_nutrient_drags_npk_factor() {
        let reading = SoilReading::new(6.5, 5.0, 40.0, 60.0, 50.0);
        // npk = (30 + 100 + 100) / 3 = 76.67; factors avg = (100 + 76.67 + 100) / 3
        assert_eq!(score(&reading), 92);
    }

    #[test]
    fn degraded_reading_example() {
        let reading = SoilReading::new(5.2, 25.0, 18.0, 45.0, 52.0).with_organic_matter(2.1);
        // pH poor, N acceptable, P poor, K optimal, moisture optimal, OM acceptable
        let s = score(&reading);
        assert!(s < 80, "degraded soil must not score as healthy, got {}", s);
    }

    #[test]
    fn healthy_reading_example() {
        let reading = SoilReading::new(6.8, 65.0, 42.0, 75.0, 48.0).with_organic_matter(3.2);
        assert!(score(&reading) >= 75);
    }

    #[test]
    fn crop_profile_changes_the_verdict() {
        // Paddy-level moisture is poor for the generic profile but
        // optimal for rice.
        let reading = SoilReading::new(6.2, 60.0, 40.0, 60.0, 75.0);
        let rice = CropProfile::for_crop(CropType::Rice);
        assert!(score_for_crop(&reading, &rice) > score(&reading));
    }

    #[test]
    fn temperature_does_not_affect_score() {
        let without = optimal_reading();
        let with = optimal_reading().with_temperature(45.0);
        assert_eq!(score(&without), score(&with));
    }
}
