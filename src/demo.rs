use crate::config::DemoConfig;
use crate::models::{CropType, Farm, SoilReading};
use chrono::{Duration, Utc};

/// Synthetic data provider for demo mode.
///
/// Selected once by configuration; request handlers never branch on
/// demo mode themselves. Generation is a seeded xorshift over plausible
/// per-parameter baselines with seasonal drift, so the same seed always
/// yields the same series and tests can pin exact values.
pub struct DemoDataProvider {
    seed: u64,
}

impl DemoDataProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.seed)
    }

    pub fn farm(&self) -> Farm {
        Farm::new("demo", "Demo Farm", CropType::Mixed).with_location("Greenfield Valley")
    }

    /// One reading per day, oldest first, ending today.
    pub fn readings(&self, days: u32) -> Vec<SoilReading> {
        let mut rng = XorShift::new(self.seed);
        let now = Utc::now();

        (0..days)
            .map(|day| {
                let t = day as f64;
                let ph = 6.4 + 0.3 * (t / 9.0).sin() + rng.jitter(0.25);
                let nitrogen = 58.0 - 0.3 * t + 10.0 * (t / 7.0).sin() + rng.jitter(6.0);
                let phosphorus = 38.0 + 4.0 * (t / 13.0).sin() + rng.jitter(4.0);
                let potassium = 62.0 + 8.0 * (t / 11.0).sin() + rng.jitter(5.0);
                let moisture = 48.0 + 10.0 * (t / 5.0).sin() + rng.jitter(4.0);
                let organic_matter = 3.4 + rng.jitter(0.3);
                let temperature = 18.0 + 5.0 * (t / 14.0).sin() + rng.jitter(1.5);

                SoilReading::new(
                    ph.clamp(0.0, 14.0),
                    nitrogen.clamp(0.0, 200.0),
                    phosphorus.clamp(0.0, 200.0),
                    potassium.clamp(0.0, 200.0),
                    moisture.clamp(0.0, 100.0),
                )
                .with_organic_matter(organic_matter.clamp(0.0, 20.0))
                .with_temperature(temperature.clamp(-10.0, 50.0))
                .with_timestamp(now - Duration::days((days - day) as i64))
            })
            .collect()
    }
}

/// xorshift64 - small, deterministic, good enough for demo noise.
struct XorShift {
    state: u64,
}

impl XorShift {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in [-magnitude, magnitude].
    fn jitter(&mut self, magnitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * magnitude
    }
}
