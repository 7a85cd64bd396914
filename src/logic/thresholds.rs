use crate::error::{AgriWaterError, Result};
use crate::models::{BudgetStatus, RiskLevel};
use serde::{Deserialize, Serialize};

/// Predicate over a single number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Threshold {
    AtLeast(f64),
    Above(f64),
    AtMost(f64),
    Below(f64),
}

impl Threshold {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Threshold::AtLeast(t) => value >= t,
            Threshold::Above(t) => value > t,
            Threshold::AtMost(t) => value <= t,
            Threshold::Below(t) => value < t,
        }
    }
}

/// Ordered decision table: bands are tried top-down, the first match wins,
/// and `fallback` catches everything else so every value maps to exactly one
/// outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable<T> {
    bands: Vec<(Threshold, T)>,
    fallback: T,
}

impl<T> ThresholdTable<T> {
    pub fn new(bands: Vec<(Threshold, T)>, fallback: T) -> Self {
        Self { bands, fallback }
    }

    pub fn classify(&self, value: f64) -> &T {
        self.bands
            .iter()
            .find(|(threshold, _)| threshold.matches(value))
            .map(|(_, outcome)| outcome)
            .unwrap_or(&self.fallback)
    }
}

/// SURPLUS above the margin, BALANCED in `[0, margin]`, DEFICIT below zero.
pub fn margin_status_table(margin_m3: f64) -> Result<ThresholdTable<BudgetStatus>> {
    if !margin_m3.is_finite() || margin_m3 < 0.0 {
        return Err(AgriWaterError::invalid(format!(
            "balance margin must be a non-negative number, got {}",
            margin_m3
        )));
    }

    Ok(ThresholdTable::new(
        vec![
            (Threshold::Above(margin_m3), BudgetStatus::Surplus),
            (Threshold::AtLeast(0.0), BudgetStatus::Balanced),
        ],
        BudgetStatus::Deficit,
    ))
}

/// Shortage ratio (|balance| / demand) → viability outcome.
pub fn shortage_table() -> ThresholdTable<BudgetStatus> {
    ThresholdTable::new(
        vec![(Threshold::AtMost(0.25), BudgetStatus::ManageableRisk)],
        BudgetStatus::NotViable,
    )
}

pub fn risk_table() -> ThresholdTable<RiskLevel> {
    ThresholdTable::new(
        vec![
            (Threshold::Below(0.0), RiskLevel::High),
            (Threshold::Below(2000.0), RiskLevel::Medium),
        ],
        RiskLevel::Low,
    )
}

/// Water-per-hectare floor for a recommended crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropBand {
    pub min_water_per_hectare_m3: f64,
    pub crop: String,
}

pub fn default_crop_bands() -> Vec<CropBand> {
    [(10000.0, "Rice"), (6000.0, "Maize"), (5000.0, "Soybean")]
        .into_iter()
        .map(|(min, crop)| CropBand {
            min_water_per_hectare_m3: min,
            crop: crop.to_string(),
        })
        .collect()
}

pub const DEFAULT_FALLBACK_CROP: &str = "Wheat";

/// Builds the crop recommendation table; bands are sorted so the highest
/// floor is tried first regardless of how they were written.
pub fn crop_recommendation_table(
    mut bands: Vec<CropBand>,
    fallback: &str,
) -> Result<ThresholdTable<String>> {
    if let Some(bad) = bands
        .iter()
        .find(|b| !b.min_water_per_hectare_m3.is_finite())
    {
        return Err(AgriWaterError::invalid(format!(
            "crop band for {} has a non-numeric floor",
            bad.crop
        )));
    }

    bands.sort_by(|a, b| b.min_water_per_hectare_m3.total_cmp(&a.min_water_per_hectare_m3));

    Ok(ThresholdTable::new(
        bands
            .into_iter()
            .map(|b| (Threshold::AtLeast(b.min_water_per_hectare_m3), b.crop))
            .collect(),
        fallback.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crops() -> ThresholdTable<String> {
        crop_recommendation_table(default_crop_bands(), DEFAULT_FALLBACK_CROP).unwrap()
    }

    #[test]
    fn margin_zero_partition() {
        let table = margin_status_table(0.0).unwrap();
        assert_eq!(*table.classify(0.001), BudgetStatus::Surplus);
        assert_eq!(*table.classify(0.0), BudgetStatus::Balanced);
        assert_eq!(*table.classify(-0.001), BudgetStatus::Deficit);
    }

    #[test]
    fn margin_2000_partition() {
        let table = margin_status_table(2000.0).unwrap();
        assert_eq!(*table.classify(2000.01), BudgetStatus::Surplus);
        assert_eq!(*table.classify(2000.0), BudgetStatus::Balanced);
        assert_eq!(*table.classify(1.0), BudgetStatus::Balanced);
        assert_eq!(*table.classify(0.0), BudgetStatus::Balanced);
        assert_eq!(*table.classify(-1.0), BudgetStatus::Deficit);
    }

    #[test]
    fn margin_partition_is_total_and_exclusive() {
        let table = margin_status_table(2000.0).unwrap();
        let mut value = -10_000.0;
        while value <= 10_000.0 {
            let expected = if value > 2000.0 {
                BudgetStatus::Surplus
            } else if value >= 0.0 {
                BudgetStatus::Balanced
            } else {
                BudgetStatus::Deficit
            };
            assert_eq!(*table.classify(value), expected, "balance {}", value);
            value += 250.0;
        }
        assert_eq!(*table.classify(f64::INFINITY), BudgetStatus::Surplus);
        assert_eq!(*table.classify(f64::NEG_INFINITY), BudgetStatus::Deficit);
    }

    #[test]
    fn negative_margin_rejected() {
        assert!(matches!(
            margin_status_table(-1.0),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
        assert!(margin_status_table(f64::NAN).is_err());
    }

    #[test]
    fn shortage_boundaries() {
        let table = shortage_table();
        assert_eq!(*table.classify(0.0), BudgetStatus::ManageableRisk);
        assert_eq!(*table.classify(0.25), BudgetStatus::ManageableRisk);
        assert_eq!(*table.classify(0.2501), BudgetStatus::NotViable);
        assert_eq!(*table.classify(3.0), BudgetStatus::NotViable);
    }

    #[test]
    fn risk_boundaries() {
        let table = risk_table();
        assert_eq!(*table.classify(-0.01), RiskLevel::High);
        assert_eq!(*table.classify(0.0), RiskLevel::Medium);
        assert_eq!(*table.classify(1999.99), RiskLevel::Medium);
        assert_eq!(*table.classify(2000.0), RiskLevel::Low);
        assert_eq!(*table.classify(9580.0), RiskLevel::Low);
    }

    #[test]
    fn crop_thresholds_closed_on_lower_bound() {
        let table = crops();
        assert_eq!(table.classify(10000.0), "Rice");
        assert_eq!(table.classify(9999.99), "Maize");
        assert_eq!(table.classify(6000.0), "Maize");
        assert_eq!(table.classify(5999.99), "Soybean");
        assert_eq!(table.classify(5000.0), "Soybean");
        assert_eq!(table.classify(4999.99), "Wheat");
        assert_eq!(table.classify(0.0), "Wheat");
    }

    #[test]
    fn crop_bands_sorted_descending() {
        let mut bands = default_crop_bands();
        bands.reverse();
        let table = crop_recommendation_table(bands, "Millet").unwrap();
        assert_eq!(table.classify(12000.0), "Rice");
        assert_eq!(table.classify(100.0), "Millet");
        assert_eq!(table.classify(7000.0), "Maize");
    }
}
