use crate::error::{Result, SoilSenseError};
use crate::models::{CropType, Farm};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub owner: String,
    pub crop_type: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// How far back the analysis window reaches.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Steps ahead for the naive linear forecast.
    #[serde(default = "default_forecast_steps")]
    pub forecast_steps: usize,
}

fn default_window_days() -> u32 {
    30
}

fn default_forecast_steps() -> usize {
    7
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            forecast_steps: default_forecast_steps(),
        }
    }
}

/// Demo mode swaps the reading input for the synthetic provider. The
/// selection happens here, once, not in per-command branches.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_demo_seed")]
    pub seed: u64,
    #[serde(default = "default_demo_days")]
    pub days: u32,
}

fn default_demo_seed() -> u64 {
    42
}

fn default_demo_days() -> u32 {
    30
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            seed: default_demo_seed(),
            days: default_demo_days(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SoilSenseError::Config(format!(
                "Config file not found at {:?}. Copy config/config.yaml.example or run with --config.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SoilSenseError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SoilSenseError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("soilsense").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| SoilSenseError::Config("Cannot determine config directory".into()))?
            .join("soilsense")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Build the configured farm, falling back to a mixed planting when
    /// the crop type string is unrecognized.
    pub fn farm(&self) -> Farm {
        let crop_type = CropType::from_str(&self.farm.crop_type).unwrap_or_else(|| {
            tracing::warn!(
                crop_type = %self.farm.crop_type,
                "unknown crop type in config, falling back to Mixed"
            );
            CropType::Mixed
        });

        let mut farm = Farm::new(self.farm.owner.clone(), self.farm.name.clone(), crop_type);
        if let Some(ref location) = self.farm.location {
            farm = farm.with_location(location.clone());
        }
        farm
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "Main Farm".into(),
                owner: "demo".into(),
                crop_type: "Mixed".into(),
                location: None,
            },
            analysis: AnalysisConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}
