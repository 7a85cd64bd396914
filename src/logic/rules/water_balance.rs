use super::AdvisoryRule;
use crate::models::{
    Advisory, AdvisoryCategory, BudgetStatus, FarmInput, Severity, WaterBudgetResult,
};

/// Water balance rule - summarizes supply against demand
///
/// Severity levels:
/// - Info: SURPLUS or SAFE
/// - Advisory: BALANCED
/// - Warning: DEFICIT or MANAGEABLE_RISK
/// - Critical: NOT_VIABLE
pub struct WaterBalanceRule;

impl AdvisoryRule for WaterBalanceRule {
    fn id(&self) -> &'static str {
        "water_balance"
    }

    fn name(&self) -> &'static str {
        "Water Balance"
    }

    fn category(&self) -> AdvisoryCategory {
        AdvisoryCategory::Water
    }

    fn evaluate(&self, result: &WaterBudgetResult, _input: &FarmInput) -> Option<Advisory> {
        let severity = match result.status {
            BudgetStatus::Surplus | BudgetStatus::Safe => Severity::Info,
            BudgetStatus::Balanced => Severity::Advisory,
            BudgetStatus::Deficit | BudgetStatus::ManageableRisk => Severity::Warning,
            BudgetStatus::NotViable => Severity::Critical,
        };

        Some(self.build_advisory(severity, result))
    }
}

impl WaterBalanceRule {
    fn build_advisory(&self, severity: Severity, result: &WaterBudgetResult) -> Advisory {
        let description = format!(
            "Available water {:.0} m³ against a crop demand of {:.0} m³ leaves a balance of {:.0} m³.",
            result.available_m3, result.adjusted_demand_m3, result.balance_m3
        );

        let action = match result.status {
            BudgetStatus::Surplus | BudgetStatus::Safe => {
                "Supply covers the season's demand. Irrigate only to top up dry spells."
            }
            BudgetStatus::Balanced => {
                "Supply barely covers demand. Schedule irrigation carefully and avoid losses."
            }
            BudgetStatus::Deficit => {
                "Demand exceeds supply. Switch to a more efficient irrigation method or a \
                 less water-intensive crop."
            }
            BudgetStatus::ManageableRisk => {
                "Shortage is within 25% of demand. Limit usage to the available water and \
                 prioritize critical growth stages."
            }
            BudgetStatus::NotViable => {
                "Shortage exceeds 25% of demand. This crop is not viable with the water \
                 available; consider an alternate crop."
            }
        };

        let mut advisory = Advisory::new(
            self.id(),
            AdvisoryCategory::Water,
            severity,
            result.status.label(),
            description,
        )
        .with_data_point("Available", format!("{:.0} m³", result.available_m3))
        .with_data_point("Demand", format!("{:.0} m³", result.adjusted_demand_m3))
        .with_data_point("Balance", format!("{:.0} m³", result.balance_m3));

        if let Some(viability) = &result.viability {
            advisory = advisory.with_data_point(
                "Recommended Usage",
                format!("{:.0} m³", viability.recommended_usage_m3),
            );
            if let Some(ratio) = viability.shortage_ratio {
                advisory = advisory.with_data_point("Shortage", format!("{:.0}%", ratio * 100.0));
            }
        }

        if let Some(savings) = &result.savings {
            advisory = advisory.with_data_point(
                "Saved vs Flood",
                format!(
                    "{:.0} m³ ({:.1}%)",
                    savings.water_saved_m3, savings.saving_percent
                ),
            );
        }

        advisory.with_action(action)
    }
}
