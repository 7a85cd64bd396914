use super::AdvisoryRule;
use crate::logic::messages;
use crate::models::{
    Advisory, AdvisoryCategory, FarmInput, Language, Severity, SoilMoisture, WaterBudgetResult,
};

/// Soil moisture rule - irrigation timing from current soil wetness
///
/// Severity levels:
/// - Info: High moisture, no irrigation needed
/// - Advisory: Medium moisture, irrigate in 1-2 days
/// - Warning: Low moisture, irrigate now
pub struct SoilMoistureRule;

impl AdvisoryRule for SoilMoistureRule {
    fn id(&self) -> &'static str {
        "soil_moisture"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture"
    }

    fn category(&self) -> AdvisoryCategory {
        AdvisoryCategory::Moisture
    }

    fn evaluate(&self, result: &WaterBudgetResult, _input: &FarmInput) -> Option<Advisory> {
        let level = result.soil_moisture;
        let (severity, title) = match level {
            SoilMoisture::High => (Severity::Info, "Irrigation Not Required"),
            SoilMoisture::Medium => (Severity::Advisory, "Irrigate Within 1-2 Days"),
            SoilMoisture::Low => (Severity::Warning, "Irrigate Now"),
        };

        Some(
            Advisory::new(
                self.id(),
                AdvisoryCategory::Moisture,
                severity,
                title,
                messages::moisture_template(level).get(Language::English),
            )
            .with_data_point("Soil Moisture", level)
            .with_data_point("Demand Factor", format!("{:.1}", level.demand_factor())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{evaluate, input};
    use super::*;
    use crate::logic::budget::ClassificationPolicy;
    use crate::models::IrrigationMethod;

    #[test]
    fn dry_soil_warns() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::Low);
        let result = evaluate(&farm, ClassificationPolicy::default());
        let advisory = SoilMoistureRule.evaluate(&result, &farm).unwrap();
        assert_eq!(advisory.severity, Severity::Warning);
        assert!(advisory.description.contains("Immediate irrigation"));
    }

    #[test]
    fn uses_resolved_level_from_result() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::Low);
        let mut result = evaluate(&farm, ClassificationPolicy::default());
        // A sensor reading may have replaced the requested level
        result.soil_moisture = SoilMoisture::High;
        let advisory = SoilMoistureRule.evaluate(&result, &farm).unwrap();
        assert_eq!(advisory.severity, Severity::Info);
    }
}
