use crate::error::{AgriWaterError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationMethod {
    Flood,
    Sprinkler,
    Drip,
}

impl IrrigationMethod {
    pub const ALL: &'static [IrrigationMethod] = &[
        IrrigationMethod::Flood,
        IrrigationMethod::Sprinkler,
        IrrigationMethod::Drip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Flood => "Flood",
            IrrigationMethod::Sprinkler => "Sprinkler",
            IrrigationMethod::Drip => "Drip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flood" | "surface" => Some(IrrigationMethod::Flood),
            "sprinkler" => Some(IrrigationMethod::Sprinkler),
            "drip" | "micro" => Some(IrrigationMethod::Drip),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| AgriWaterError::unknown("irrigation method", s))
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative soil wetness. Wetter soil lowers crop demand, never raises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilMoisture {
    Low,
    Medium,
    High,
}

impl SoilMoisture {
    pub const ALL: &'static [SoilMoisture] =
        &[SoilMoisture::Low, SoilMoisture::Medium, SoilMoisture::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilMoisture::Low => "Low",
            SoilMoisture::Medium => "Medium",
            SoilMoisture::High => "High",
        }
    }

    pub fn demand_factor(&self) -> f64 {
        match self {
            SoilMoisture::High => 0.6,
            SoilMoisture::Medium => 0.8,
            SoilMoisture::Low => 1.0,
        }
    }

    /// Level for a volumetric moisture reading in percent.
    pub fn from_percent(percent: f64) -> Self {
        if percent < 30.0 {
            SoilMoisture::Low
        } else if percent < 60.0 {
            SoilMoisture::Medium
        } else {
            SoilMoisture::High
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "dry" => Some(SoilMoisture::Low),
            "medium" | "moderate" => Some(SoilMoisture::Medium),
            "high" | "wet" => Some(SoilMoisture::High),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| AgriWaterError::unknown("soil moisture", s))
    }
}

impl std::fmt::Display for SoilMoisture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse groundwater availability chosen by the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundwaterLevel {
    Low,
    Medium,
    High,
}

impl GroundwaterLevel {
    pub const ALL: &'static [GroundwaterLevel] = &[
        GroundwaterLevel::Low,
        GroundwaterLevel::Medium,
        GroundwaterLevel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroundwaterLevel::Low => "Low",
            GroundwaterLevel::Medium => "Medium",
            GroundwaterLevel::High => "High",
        }
    }

    pub fn fraction(&self) -> f64 {
        match self {
            GroundwaterLevel::Low => 0.2,
            GroundwaterLevel::Medium => 0.4,
            GroundwaterLevel::High => 0.6,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(GroundwaterLevel::Low),
            "medium" => Some(GroundwaterLevel::Medium),
            "high" => Some(GroundwaterLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroundwaterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Official groundwater assessment category for a district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundwaterStatus {
    Safe,
    SemiCritical,
    Critical,
    OverExploited,
}

impl GroundwaterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundwaterStatus::Safe => "Safe",
            GroundwaterStatus::SemiCritical => "Semi-critical",
            GroundwaterStatus::Critical => "Critical",
            GroundwaterStatus::OverExploited => "Over-exploited",
        }
    }

    pub fn fraction(&self) -> f64 {
        match self {
            GroundwaterStatus::Safe => 0.6,
            GroundwaterStatus::SemiCritical => 0.4,
            GroundwaterStatus::Critical => 0.2,
            GroundwaterStatus::OverExploited => 0.1,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "safe" => Some(GroundwaterStatus::Safe),
            "semicritical" => Some(GroundwaterStatus::SemiCritical),
            "critical" => Some(GroundwaterStatus::Critical),
            "overexploited" => Some(GroundwaterStatus::OverExploited),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroundwaterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
}

impl Season {
    pub const ALL: &'static [Season] = &[Season::Kharif, Season::Rabi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" | "monsoon" => Some(Season::Kharif),
            "rabi" | "winter" => Some(Season::Rabi),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| AgriWaterError::unknown("season", s))
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::English, Language::Hindi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "hindi" | "hi" | "हिंदी" | "हिन्दी" => Some(Language::Hindi),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| AgriWaterError::unknown("language", s))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
