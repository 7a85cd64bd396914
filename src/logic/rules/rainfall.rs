use super::AdvisoryRule;
use crate::logic::messages;
use crate::models::{
    Advisory, AdvisoryCategory, FarmInput, Language, Severity, WaterBudgetResult,
};

/// Rainfall rule - reports the rainfall behind the budget
///
/// Severity levels:
/// - Info: rainfall data resolved normally
/// - Warning: zero rainfall, or a degraded data source was used
pub struct RainfallRule;

impl AdvisoryRule for RainfallRule {
    fn id(&self) -> &'static str {
        "rainfall"
    }

    fn name(&self) -> &'static str {
        "Rainfall"
    }

    fn category(&self) -> AdvisoryCategory {
        AdvisoryCategory::Rainfall
    }

    fn evaluate(&self, result: &WaterBudgetResult, input: &FarmInput) -> Option<Advisory> {
        let degraded = result.rainfall_warning.is_some() || result.rainfall_mm <= 0.0;
        let (severity, title) = if degraded {
            (Severity::Warning, "Rainfall Data Limited")
        } else {
            (Severity::Info, "Rainfall Contribution")
        };

        let mut advisory = Advisory::new(
            self.id(),
            AdvisoryCategory::Rainfall,
            severity,
            title,
            messages::rainfall_line(
                Language::English,
                input.district.trim(),
                result.rainfall_mm,
                result.rainfall_water_m3,
            ),
        )
        .with_data_point("Rainfall", format!("{:.1} mm", result.rainfall_mm))
        .with_data_point("Rain Water", format!("{:.0} m³", result.rainfall_water_m3))
        .with_data_point(
            "Groundwater",
            format!(
                "{:.0} m³ ({:.0}% of rain water)",
                result.groundwater_water_m3,
                result.groundwater_fraction * 100.0
            ),
        );

        if degraded {
            let detail = result
                .rainfall_warning
                .as_deref()
                .unwrap_or("No rainfall recorded for this district.");
            advisory = advisory.with_action(format!(
                "{} Treat the budget as a conservative estimate.",
                detail
            ));
        }

        Some(advisory)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{evaluate, input};
    use super::*;
    use crate::logic::budget::ClassificationPolicy;
    use crate::models::{IrrigationMethod, SoilMoisture};

    #[test]
    fn normal_rainfall_is_informational() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let result = evaluate(&farm, ClassificationPolicy::default());
        let advisory = RainfallRule.evaluate(&result, &farm).unwrap();
        assert_eq!(advisory.severity, Severity::Info);
        assert!(advisory.description.contains("Indore: 800 mm"));
        assert!(advisory.suggested_action.is_none());
    }

    #[test]
    fn rainfall_warning_marks_data_as_limited() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let mut result = evaluate(&farm, ClassificationPolicy::default());
        let warning = "Rainfall data unavailable (missing); using 0 mm".to_string();
        result.rainfall_warning = Some(warning.clone());
        result.warnings.push(warning);
        let advisory = RainfallRule.evaluate(&result, &farm).unwrap();
        assert_eq!(advisory.severity, Severity::Warning);
        assert_eq!(advisory.title, "Rainfall Data Limited");
        assert!(advisory.suggested_action.unwrap().contains("unavailable"));
    }

    #[test]
    fn groundwater_fallback_leaves_rainfall_informational() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let mut result = evaluate(&farm, ClassificationPolicy::default());
        result
            .warnings
            .push("No groundwater status for Indore; using default fraction 0.30".to_string());
        let advisory = RainfallRule.evaluate(&result, &farm).unwrap();
        assert_eq!(advisory.severity, Severity::Info);
        assert_eq!(advisory.title, "Rainfall Contribution");
        assert!(advisory.suggested_action.is_none());
    }
}
