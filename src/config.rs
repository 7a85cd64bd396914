use crate::error::{AgriWaterError, Result};
use crate::logic::thresholds::{default_crop_bands, CropBand, DEFAULT_FALLBACK_CROP};
use crate::logic::{BudgetPolicy, ClassificationPolicy};
use crate::models::{
    FarmInput, GroundwaterInput, IrrigationMethod, Language, Season, SoilMoisture,
};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Crop water requirement overrides (mm per season), merged over the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crops: Option<BTreeMap<String, f64>>,
    /// Irrigation efficiency overrides, merged over the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation: Option<BTreeMap<String, f64>>,
}

/// The farm evaluated by default. Values are kept as written and parsed
/// when a request is built, so a typo is reported with the field name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FarmConfig {
    pub district: String,
    pub crop: String,
    pub season: String,
    pub area_hectares: f64,
    pub irrigation: String,
    /// `Low`, `Medium`, `High`, or `district` to use the district's official status.
    pub groundwater: String,
    pub soil_moisture: String,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            district: "Indore".into(),
            crop: "Wheat".into(),
            season: "Rabi".into(),
            area_hectares: 1.0,
            irrigation: "Drip".into(),
            groundwater: "Medium".into(),
            soil_moisture: "High".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RainfallMode {
    /// One average per district.
    #[default]
    Static,
    /// Sum of daily observations over the most recent `window_days`.
    Window,
}

impl RainfallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainfallMode::Static => "static",
            RainfallMode::Window => "window",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default)]
    pub rainfall_csv: Option<PathBuf>,
    #[serde(default)]
    pub rainfall_mode: RainfallMode,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Restricts window observations to one state.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub groundwater_csv: Option<PathBuf>,
    #[serde(default = "default_groundwater_fraction")]
    pub default_groundwater_fraction: f64,
    #[serde(default)]
    pub columns: ColumnConfig,
}

fn default_window_days() -> u32 {
    7
}

fn default_groundwater_fraction() -> f64 {
    0.3
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            rainfall_csv: None,
            rainfall_mode: RainfallMode::Static,
            window_days: default_window_days(),
            state: None,
            groundwater_csv: None,
            default_groundwater_fraction: default_groundwater_fraction(),
            columns: ColumnConfig::default(),
        }
    }
}

/// CSV header names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub district: String,
    pub state: String,
    pub date: String,
    /// Static rainfall value column.
    pub rainfall: String,
    /// Daily rainfall value column.
    pub daily_rainfall: String,
    pub groundwater_status: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            district: "District".into(),
            state: "State".into(),
            date: "Date".into(),
            rainfall: "Total_Actual_Rainfall_mm".into(),
            daily_rainfall: "Avg_rainfall".into(),
            groundwater_status: "Status".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// `margin` or `viability`.
    #[serde(default = "default_classification")]
    pub classification: String,
    #[serde(default)]
    pub margin_m3: f64,
    #[serde(default = "default_true")]
    pub include_savings: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_bands: Option<Vec<CropBand>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_crop: Option<String>,
}

fn default_classification() -> String {
    "margin".into()
}

fn default_true() -> bool {
    true
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            classification: default_classification(),
            margin_m3: 0.0,
            include_savings: true,
            crop_bands: None,
            fallback_crop: None,
        }
    }
}

impl PolicyConfig {
    pub fn classification(&self) -> Result<ClassificationPolicy> {
        parse_classification(&self.classification, self.margin_m3)
    }
}

/// Parse a policy name; the margin only applies to `margin`.
pub fn parse_classification(name: &str, margin_m3: f64) -> Result<ClassificationPolicy> {
    match name.trim().to_lowercase().as_str() {
        "margin" => Ok(ClassificationPolicy::Margin { margin_m3 }),
        "viability" => Ok(ClassificationPolicy::Viability),
        _ => Err(AgriWaterError::unknown("classification policy", name)),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    #[serde(default = "default_language")]
    pub language: String,
    /// Artificial "analyzing" pause in the dashboard; 0 disables it.
    #[serde(default)]
    pub response_delay_ms: u64,
}

fn default_language() -> String {
    "English".into()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            response_delay_ms: 0,
        }
    }
}

impl AssistantConfig {
    pub fn language(&self) -> Result<Language> {
        Language::parse(&self.language)
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(AgriWaterError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => {
                let p = Self::find_config_path()?;
                if !p.exists() {
                    tracing::info!("No config file found; using built-in defaults");
                    return Ok(Self::default());
                }
                p
            }
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgriWaterError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` placeholders.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AgriWaterError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/agriwater/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgriWaterError::Config("Cannot determine config directory".into()))?
            .join("agriwater");
        Ok(config_dir.join("config.yaml"))
    }

    /// Build the default request from the `farm` section.
    pub fn to_farm_input(&self) -> Result<FarmInput> {
        let farm = &self.farm;
        Ok(FarmInput {
            district: farm.district.trim().to_string(),
            crop: farm.crop.trim().to_string(),
            season: Season::parse(&farm.season)?,
            area_hectares: farm.area_hectares,
            irrigation: IrrigationMethod::parse(&farm.irrigation)?,
            groundwater: GroundwaterInput::parse(&farm.groundwater)?,
            soil_moisture: SoilMoisture::parse(&farm.soil_moisture)?,
        })
    }

    pub fn budget_policy(&self) -> Result<BudgetPolicy> {
        Ok(BudgetPolicy {
            classification: self.policy.classification()?,
            include_savings: self.policy.include_savings,
            crop_bands: self
                .policy
                .crop_bands
                .clone()
                .unwrap_or_else(default_crop_bands),
            fallback_crop: self
                .policy
                .fallback_crop
                .clone()
                .unwrap_or_else(|| DEFAULT_FALLBACK_CROP.to_string()),
        })
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up AgriWater!");
        println!();

        let defaults = FarmConfig::default();

        println!("Farm");
        let district = prompt("  District", &defaults.district)?;
        let crop = prompt("  Crop (Rice, Wheat, Soybean, Maize)", &defaults.crop)?;
        let season = prompt("  Season (Kharif, Rabi)", &defaults.season)?;

        let area_hectares: f64 = Input::new()
            .with_prompt("  Area (hectares)")
            .default(defaults.area_hectares)
            .validate_with(|v: &f64| {
                if v.is_finite() && *v > 0.0 {
                    Ok(())
                } else {
                    Err("area must be greater than zero")
                }
            })
            .interact_text()
            .map_err(|e| AgriWaterError::Config(format!("Input error: {}", e)))?;

        let irrigation = prompt("  Irrigation (Flood, Sprinkler, Drip)", &defaults.irrigation)?;
        let groundwater = prompt(
            "  Groundwater (Low, Medium, High, district)",
            &defaults.groundwater,
        )?;
        let soil_moisture = prompt("  Soil moisture (Low, Medium, High)", &defaults.soil_moisture)?;

        println!();

        println!("Data (leave blank to use built-in tables)");
        let rainfall_csv = prompt("  Rainfall CSV", "")?;
        let groundwater_csv = prompt("  Groundwater status CSV", "")?;

        println!();

        let language = prompt("Assistant language (English, Hindi)", "English")?;

        let config = Config {
            farm: FarmConfig {
                district,
                crop,
                season,
                area_hectares,
                irrigation,
                groundwater,
                soil_moisture,
            },
            data: DataConfig {
                rainfall_csv: non_empty_path(rainfall_csv),
                groundwater_csv: non_empty_path(groundwater_csv),
                ..DataConfig::default()
            },
            policy: PolicyConfig::default(),
            assistant: AssistantConfig {
                language,
                response_delay_ms: 0,
            },
            crops: None,
            irrigation: None,
        };

        // Reject typos before anything is written.
        config.to_farm_input()?;
        config.assistant.language()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AgriWaterError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgriWater Configuration\n# Generated by `agriwater init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AgriWaterError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

fn prompt(label: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AgriWaterError::Config(format!("Input error: {}", e)))
}

fn non_empty_path(value: String) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.farm.district, "Indore");
        assert_eq!(config.data.window_days, 7);
        assert_eq!(config.data.default_groundwater_fraction, 0.3);
        assert_eq!(config.data.columns.daily_rainfall, "Avg_rainfall");
        assert!(config.policy.include_savings);
        assert_eq!(config.assistant.response_delay_ms, 0);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
farm:
  district: Bhopal
  crop: Rice
  season: kharif
  area_hectares: 2.5
  irrigation: sprinkler
  groundwater: district
  soil_moisture: low
data:
  rainfall_csv: data/daily.csv
  rainfall_mode: window
  window_days: 14
  state: Madhya Pradesh
  columns:
    daily_rainfall: Rain_mm
policy:
  classification: viability
  include_savings: false
assistant:
  language: Hindi
  response_delay_ms: 800
crops:
  Gram: 300
irrigation:
  Drip: 0.55
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let input = config.to_farm_input().unwrap();
        assert_eq!(input.season, Season::Kharif);
        assert_eq!(input.irrigation, IrrigationMethod::Sprinkler);
        assert_eq!(input.groundwater, GroundwaterInput::DistrictStatus);
        assert_eq!(input.soil_moisture, SoilMoisture::Low);

        assert_eq!(config.data.rainfall_mode, RainfallMode::Window);
        assert_eq!(config.data.window_days, 14);
        assert_eq!(config.data.columns.daily_rainfall, "Rain_mm");
        assert_eq!(config.data.columns.district, "District");

        let policy = config.budget_policy().unwrap();
        assert_eq!(policy.classification, ClassificationPolicy::Viability);
        assert!(!policy.include_savings);
        assert_eq!(policy.fallback_crop, "Wheat");

        assert_eq!(config.assistant.language().unwrap(), Language::Hindi);
        assert_eq!(config.crops.as_ref().unwrap()["Gram"], 300.0);
    }

    #[test]
    fn unknown_farm_values_fail_fast() {
        let mut config = Config::default();
        config.farm.irrigation = "Canal".into();
        let err = config.to_farm_input().unwrap_err();
        assert!(matches!(
            err,
            AgriWaterError::UnknownInput { field: "irrigation method", .. }
        ));

        let mut config = Config::default();
        config.policy.classification = "strict".into();
        assert!(config.budget_policy().is_err());
    }

    #[test]
    fn margin_policy_carries_margin() {
        assert_eq!(
            parse_classification("Margin", 2000.0).unwrap(),
            ClassificationPolicy::Margin { margin_m3: 2000.0 }
        );
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("AGRIWATER_TEST_DISTRICT", "Nagpur");
        let config = Config::from_yaml("farm:\n  district: ${AGRIWATER_TEST_DISTRICT}\n").unwrap();
        assert_eq!(config.farm.district, "Nagpur");
    }

    #[test]
    fn unset_env_vars_are_left_in_place() {
        let out = Config::substitute_env_vars("x: ${AGRIWATER_TEST_UNSET_VAR}").unwrap();
        assert_eq!(out, "x: ${AGRIWATER_TEST_UNSET_VAR}");
    }
}
