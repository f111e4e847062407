use super::rules::InsightEngine;
use super::scoring::score_for_crop;
use super::statistics::{correlations, forecasts, summarize};
use super::synthesis::synthesize_for_crop;
use crate::models::{CropProfile, Farm, FarmReport, SoilReading};
use chrono::Utc;

const DEFAULT_FORECAST_STEPS: usize = 7;

/// Composes the scoring engine, rule ladder, statistics and synthesis
/// into the per-farm payload the controller layer serves or pushes.
/// Stateless; safe to share or rebuild per request.
pub struct SoilAnalyzer {
    engine: InsightEngine,
    forecast_steps: usize,
}

impl SoilAnalyzer {
    pub fn new() -> Self {
        Self {
            engine: InsightEngine::new(),
            forecast_steps: DEFAULT_FORECAST_STEPS,
        }
    }

    pub fn with_forecast_steps(mut self, steps: usize) -> Self {
        self.forecast_steps = steps;
        self
    }

    /// Analyze one farm's reading window. Readings are re-sorted by
    /// timestamp internally; the latest reading drives the score and
    /// rule analysis, the whole window drives statistics and synthesis.
    pub fn report(&self, farm: &Farm, readings: &[SoilReading]) -> FarmReport {
        let profile = CropProfile::for_crop(farm.crop_type);

        let latest = readings.iter().max_by_key(|r| r.timestamp);
        let health_score = latest.map(|r| score_for_crop(r, &profile));
        let latest_analysis = latest.map(|r| self.engine.analyze_for_crop(r, &profile));

        let summary = summarize(readings);
        let correlations = correlations(readings);
        let forecasts = forecasts(readings, self.forecast_steps);
        let synthesis = synthesize_for_crop(&summary, &correlations, &profile);

        tracing::debug!(
            farm = %farm.name,
            readings = readings.len(),
            score = ?health_score,
            "farm analysis complete"
        );

        FarmReport {
            farm_id: farm.id,
            farm_name: farm.name.clone(),
            crop_type: farm.crop_type,
            generated_at: Utc::now(),
            reading_count: readings.len(),
            health_score,
            latest_analysis,
            summary,
            correlations,
            forecasts,
            synthesis,
        }
    }
}

impl Default for SoilAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
