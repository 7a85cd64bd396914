use super::farm::{IrrigationMethod, Season, SoilMoisture};
use super::reference::GroundwaterInput;
use serde::{Deserialize, Serialize};

/// One water budget request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmInput {
    pub district: String,
    pub crop: String,
    pub season: Season,
    pub area_hectares: f64,
    pub irrigation: IrrigationMethod,
    pub groundwater: GroundwaterInput,
    pub soil_moisture: SoilMoisture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    Surplus,
    Balanced,
    Deficit,
    Safe,
    ManageableRisk,
    NotViable,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Surplus => "SURPLUS",
            BudgetStatus::Balanced => "BALANCED",
            BudgetStatus::Deficit => "DEFICIT",
            BudgetStatus::Safe => "SAFE",
            BudgetStatus::ManageableRisk => "MANAGEABLE_RISK",
            BudgetStatus::NotViable => "NOT_VIABLE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Surplus => "Water Surplus",
            BudgetStatus::Balanced => "Balanced",
            BudgetStatus::Deficit => "Water Deficit",
            BudgetStatus::Safe => "Safe",
            BudgetStatus::ManageableRisk => "Manageable Risk",
            BudgetStatus::NotViable => "Not Viable",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            BudgetStatus::Surplus | BudgetStatus::Safe => Color::Green,
            BudgetStatus::Balanced | BudgetStatus::ManageableRisk => Color::Yellow,
            BudgetStatus::Deficit | BudgetStatus::NotViable => Color::Red,
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RiskLevel::Low => Color::Green,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::High => Color::Red,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Crop whose full-season demand fits within the available water.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateCrop {
    pub crop: String,
    pub demand_m3: f64,
}

/// Extra output of the viability policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityAssessment {
    pub recommended_usage_m3: f64,
    /// `None` when there is no shortage.
    pub shortage_ratio: Option<f64>,
    pub alternate_crops: Vec<AlternateCrop>,
}

/// Water saved by the chosen method against a flood-irrigation baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsReport {
    pub baseline_demand_m3: f64,
    pub water_saved_m3: f64,
    pub saving_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBudgetResult {
    pub rainfall_mm: f64,
    pub rainfall_water_m3: f64,
    pub groundwater_fraction: f64,
    pub groundwater_water_m3: f64,
    pub available_m3: f64,
    pub base_demand_m3: f64,
    pub adjusted_demand_m3: f64,
    pub balance_m3: f64,
    pub soil_moisture: SoilMoisture,
    pub status: BudgetStatus,
    pub water_per_hectare_m3: f64,
    pub recommended_crop: Option<String>,
    pub crop_mismatch: bool,
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viability: Option<ViabilityAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsReport>,
    /// Set when the rainfall depth came from a degraded source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall_warning: Option<String>,
    /// Every data warning, rainfall included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names() {
        assert_eq!(BudgetStatus::ManageableRisk.as_str(), "MANAGEABLE_RISK");
        assert_eq!(
            serde_json::to_string(&BudgetStatus::NotViable).unwrap(),
            "\"NOT_VIABLE\""
        );
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn risk_levels_order_by_severity() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }
}
