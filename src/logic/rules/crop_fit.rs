use super::AdvisoryRule;
use crate::models::{
    Advisory, AdvisoryCategory, BudgetStatus, FarmInput, SeasonInfo, Severity, WaterBudgetResult,
};

/// Crop fit rule - compares the selected crop with the water-based recommendation
///
/// Conditions:
/// - A recommended crop was produced for the budget
///
/// Severity levels:
/// - Info: selected crop matches the recommendation
/// - Advisory: selected crop differs from the recommendation
/// - Critical: NOT_VIABLE, alternate crops are listed
pub struct CropFitRule;

impl AdvisoryRule for CropFitRule {
    fn id(&self) -> &'static str {
        "crop_fit"
    }

    fn name(&self) -> &'static str {
        "Crop Fit"
    }

    fn category(&self) -> AdvisoryCategory {
        AdvisoryCategory::Crop
    }

    fn evaluate(&self, result: &WaterBudgetResult, input: &FarmInput) -> Option<Advisory> {
        let recommended = result.recommended_crop.as_deref()?;
        let alternates: Vec<&str> = result
            .viability
            .as_ref()
            .map(|v| v.alternate_crops.iter().map(|a| a.crop.as_str()).collect())
            .unwrap_or_default();
        let not_viable = result.status == BudgetStatus::NotViable;

        let severity = if not_viable {
            Severity::Critical
        } else if result.crop_mismatch {
            Severity::Advisory
        } else {
            Severity::Info
        };

        let title = if result.crop_mismatch {
            format!("Consider {} Instead of {}", recommended, input.crop)
        } else {
            format!("{} Suits Your Water Supply", recommended)
        };

        let description = format!(
            "About {:.0} m³ per hectare is available, which best suits {}.",
            result.water_per_hectare_m3, recommended
        );

        let mut advisory = Advisory::new(
            self.id(),
            AdvisoryCategory::Crop,
            severity,
            title,
            description,
        )
        .with_data_point("Recommended Crop", recommended)
        .with_data_point("Selected Crop", &input.crop)
        .with_data_point(
            "Water per Hectare",
            format!("{:.0} m³", result.water_per_hectare_m3),
        );

        let season = SeasonInfo::for_season(input.season);
        if !season.is_common_crop(&input.crop) {
            advisory = advisory.with_data_point(
                "Season Note",
                format!("{} is not a common {} crop", input.crop, season.season),
            );
        }

        if not_viable {
            let action = if alternates.is_empty() {
                "No crop in the reference table fits the available water. Reduce the \
                 planted area or secure additional supply."
                    .to_string()
            } else {
                format!(
                    "Crops that fit the available water: {}.",
                    alternates.join(", ")
                )
            };
            advisory = advisory.with_action(action);
        } else if result.crop_mismatch {
            advisory = advisory.with_action(format!(
                "Consider planting {} to match the water available this season.",
                recommended
            ));
        }

        Some(advisory)
    }
}
