use super::AdvisoryRule;
use crate::logic::messages;
use crate::models::{
    Advisory, AdvisoryCategory, FarmInput, Language, RiskLevel, Severity, WaterBudgetResult,
};

/// Risk rule - reports the water risk level
///
/// Severity levels:
/// - Info: LOW (balance of 2000 m³ or more)
/// - Warning: MEDIUM (balance below 2000 m³)
/// - Critical: HIGH (negative balance)
pub struct RiskRule;

impl AdvisoryRule for RiskRule {
    fn id(&self) -> &'static str {
        "risk_level"
    }

    fn name(&self) -> &'static str {
        "Risk Level"
    }

    fn category(&self) -> AdvisoryCategory {
        AdvisoryCategory::Risk
    }

    fn evaluate(&self, result: &WaterBudgetResult, _input: &FarmInput) -> Option<Advisory> {
        let risk = result.risk_level?;

        let (severity, title, action) = match risk {
            RiskLevel::High => (
                Severity::Critical,
                "High Water Risk",
                "Reduce planted area or change crop before committing inputs.",
            ),
            RiskLevel::Medium => (
                Severity::Warning,
                "Medium Water Risk",
                "Little buffer remains. Monitor soil moisture closely through the season.",
            ),
            RiskLevel::Low => (
                Severity::Info,
                "Low Water Risk",
                "Comfortable buffer. Keep irrigation scheduled to soil moisture.",
            ),
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::Risk,
                severity,
                title,
                messages::risk_line(Language::English, risk),
            )
            .with_data_point("Balance", format!("{:.0} m³", result.balance_m3))
            .with_action(action),
        )
    }
}
