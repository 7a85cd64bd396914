use crate::error::{AgriWaterError, Result};
use crate::models::SavingsReport;

/// 1 mm of water over 1 hectare is 10 m³.
pub const M3_PER_MM_HECTARE: f64 = 10.0;

/// Farm area must be a positive, finite number of hectares.
pub fn validate_area(area_hectares: f64) -> Result<()> {
    if area_hectares.is_finite() && area_hectares > 0.0 {
        Ok(())
    } else {
        Err(AgriWaterError::invalid(format!(
            "farm area must be greater than zero hectares, got {}",
            area_hectares
        )))
    }
}

/// Convert a water depth over an area into a volume.
pub fn depth_to_volume_m3(depth_mm: f64, area_hectares: f64) -> f64 {
    depth_mm * area_hectares * M3_PER_MM_HECTARE
}

/// Irrigation demand for a crop before any soil moisture adjustment.
pub fn crop_demand_m3(requirement_mm: f64, area_hectares: f64, efficiency: f64) -> f64 {
    depth_to_volume_m3(requirement_mm, area_hectares) * efficiency
}

pub fn water_per_hectare(available_m3: f64, area_hectares: f64) -> Result<f64> {
    validate_area(area_hectares)?;
    Ok(available_m3 / area_hectares)
}

/// Fraction of demand that cannot be met.
pub fn shortage_ratio(balance_m3: f64, demand_m3: f64) -> Result<f64> {
    if !(demand_m3 > 0.0) {
        return Err(AgriWaterError::invalid(format!(
            "shortage ratio undefined for crop demand of {} m³",
            demand_m3
        )));
    }
    Ok(balance_m3.abs() / demand_m3)
}

/// Savings of the applied demand against the flood-irrigation baseline.
pub fn savings(baseline_demand_m3: f64, adjusted_demand_m3: f64) -> Result<SavingsReport> {
    if !(baseline_demand_m3 > 0.0) {
        return Err(AgriWaterError::invalid(format!(
            "saving percentage undefined for baseline demand of {} m³",
            baseline_demand_m3
        )));
    }

    let water_saved_m3 = baseline_demand_m3 - adjusted_demand_m3;
    Ok(SavingsReport {
        baseline_demand_m3,
        water_saved_m3,
        saving_percent: water_saved_m3 / baseline_demand_m3 * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_conversion_is_exact() {
        assert_eq!(depth_to_volume_m3(800.0, 1.0), 8000.0);
        assert_eq!(depth_to_volume_m3(1.0, 1.0), 10.0);
        assert_eq!(depth_to_volume_m3(450.0, 2.5), 11250.0);
    }

    #[test]
    fn crop_demand_applies_efficiency() {
        assert!((crop_demand_m3(450.0, 1.0, 0.6) - 2700.0).abs() < 1e-9);
        assert_eq!(crop_demand_m3(1200.0, 1.0, 1.0), 12000.0);
    }

    #[test]
    fn area_must_be_positive() {
        assert!(validate_area(0.1).is_ok());
        assert!(matches!(
            validate_area(0.0),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
        assert!(validate_area(-1.0).is_err());
        assert!(validate_area(f64::NAN).is_err());
        assert!(validate_area(f64::INFINITY).is_err());
    }

    #[test]
    fn water_per_hectare_divides_by_area() {
        assert_eq!(water_per_hectare(11200.0, 1.0).unwrap(), 11200.0);
        assert_eq!(water_per_hectare(11200.0, 2.0).unwrap(), 5600.0);
        assert!(water_per_hectare(11200.0, 0.0).is_err());
    }

    #[test]
    fn shortage_ratio_requires_demand() {
        assert!((shortage_ratio(-500.0, 2000.0).unwrap() - 0.25).abs() < 1e-12);
        assert!(matches!(
            shortage_ratio(-1.0, 0.0),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn savings_against_flood_baseline() {
        // Wheat, 1 ha: flood baseline 4500, drip + high moisture 1620
        let report = savings(4500.0, 1620.0).unwrap();
        assert_eq!(report.water_saved_m3, 2880.0);
        assert!((report.saving_percent - 64.0).abs() < 1e-9);
    }

    #[test]
    fn savings_undefined_for_zero_baseline() {
        assert!(matches!(
            savings(0.0, 0.0),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
    }
}
