use super::calculations::{
    crop_demand_m3, depth_to_volume_m3, savings, shortage_ratio, validate_area, water_per_hectare,
};
use super::thresholds::{
    crop_recommendation_table, default_crop_bands, margin_status_table, risk_table,
    shortage_table, CropBand, ThresholdTable, DEFAULT_FALLBACK_CROP,
};
use crate::error::Result;
use crate::models::{
    AlternateCrop, BudgetStatus, FarmInput, ReferenceData, RiskLevel, SensorReading,
    ViabilityAssessment, WaterBudgetResult,
};
use serde::{Deserialize, Serialize};

/// How a balance is turned into a status. The two policies are not
/// interchangeable; callers pick one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassificationPolicy {
    /// SURPLUS / BALANCED / DEFICIT with a BALANCED band of `[0, margin]`.
    Margin { margin_m3: f64 },
    /// SAFE / MANAGEABLE_RISK / NOT_VIABLE by shortage ratio.
    Viability,
}

impl ClassificationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationPolicy::Margin { .. } => "margin",
            ClassificationPolicy::Viability => "viability",
        }
    }
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        ClassificationPolicy::Margin { margin_m3: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPolicy {
    pub classification: ClassificationPolicy,
    pub include_savings: bool,
    pub crop_bands: Vec<CropBand>,
    pub fallback_crop: String,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            classification: ClassificationPolicy::default(),
            include_savings: true,
            crop_bands: default_crop_bands(),
            fallback_crop: DEFAULT_FALLBACK_CROP.to_string(),
        }
    }
}

/// Reference tables plus a classification policy, validated once and then
/// evaluated for any number of requests.
pub struct WaterBudgetEngine {
    refs: ReferenceData,
    policy: BudgetPolicy,
    status_table: Option<ThresholdTable<BudgetStatus>>,
    crop_table: ThresholdTable<String>,
    risk_table: ThresholdTable<RiskLevel>,
}

impl WaterBudgetEngine {
    pub fn new(refs: ReferenceData, policy: BudgetPolicy) -> Result<Self> {
        refs.validate()?;
        let status_table = Self::status_table_for(policy.classification)?;
        let crop_table =
            crop_recommendation_table(policy.crop_bands.clone(), &policy.fallback_crop)?;

        Ok(Self {
            refs,
            policy,
            status_table,
            crop_table,
            risk_table: risk_table(),
        })
    }

    fn status_table_for(
        classification: ClassificationPolicy,
    ) -> Result<Option<ThresholdTable<BudgetStatus>>> {
        match classification {
            ClassificationPolicy::Margin { margin_m3 } => margin_status_table(margin_m3).map(Some),
            ClassificationPolicy::Viability => Ok(None),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.refs
    }

    pub fn policy(&self) -> &BudgetPolicy {
        &self.policy
    }

    pub fn set_classification(&mut self, classification: ClassificationPolicy) -> Result<()> {
        self.status_table = Self::status_table_for(classification)?;
        self.policy.classification = classification;
        Ok(())
    }

    /// Compute the water budget for one request.
    ///
    /// A session sensor reading, when given, replaces the requested soil
    /// moisture level. Either a complete result is returned or a single
    /// error; nothing is computed before every input has been resolved.
    pub fn evaluate(
        &self,
        input: &FarmInput,
        sensor: Option<&SensorReading>,
    ) -> Result<WaterBudgetResult> {
        validate_area(input.area_hectares)?;

        let rainfall = self.refs.rainfall.depth_mm(&input.district)?;
        let crop_mm = self.refs.crops.lookup("crop", &input.crop)?;
        let efficiency = self.refs.efficiency(input.irrigation)?;
        let groundwater = self
            .refs
            .groundwater
            .fraction_for(input.groundwater, &input.district);
        let soil_moisture = sensor.map(|s| s.level()).unwrap_or(input.soil_moisture);

        let area = input.area_hectares;
        let rainfall_water_m3 = depth_to_volume_m3(rainfall.mm, area);
        let groundwater_water_m3 = rainfall_water_m3 * groundwater.fraction;
        let available_m3 = rainfall_water_m3 + groundwater_water_m3;

        let base_demand_m3 = crop_demand_m3(crop_mm, area, efficiency);
        let adjusted_demand_m3 = base_demand_m3 * soil_moisture.demand_factor();
        let balance_m3 = available_m3 - adjusted_demand_m3;

        tracing::debug!(
            district = %input.district,
            crop = %input.crop,
            rainfall_mm = rainfall.mm,
            available_m3,
            adjusted_demand_m3,
            balance_m3,
            "water budget computed"
        );

        let (status, viability) = match &self.status_table {
            Some(table) => (*table.classify(balance_m3), None),
            None => {
                let (status, assessment) =
                    self.assess_viability(balance_m3, available_m3, adjusted_demand_m3, area, efficiency)?;
                (status, Some(assessment))
            }
        };

        let water_per_hectare_m3 = water_per_hectare(available_m3, area)?;
        let recommended_crop = self.crop_table.classify(water_per_hectare_m3).clone();
        let crop_mismatch = !recommended_crop.eq_ignore_ascii_case(input.crop.trim());
        let risk_level = *self.risk_table.classify(balance_m3);

        let savings = if self.policy.include_savings {
            let baseline = crop_demand_m3(crop_mm, area, 1.0);
            Some(savings(baseline, adjusted_demand_m3)?)
        } else {
            None
        };

        let warnings: Vec<String> = [rainfall.warning.clone(), groundwater.warning]
            .into_iter()
            .flatten()
            .collect();
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        Ok(WaterBudgetResult {
            rainfall_mm: rainfall.mm,
            rainfall_water_m3,
            groundwater_fraction: groundwater.fraction,
            groundwater_water_m3,
            available_m3,
            base_demand_m3,
            adjusted_demand_m3,
            balance_m3,
            soil_moisture,
            status,
            water_per_hectare_m3,
            recommended_crop: Some(recommended_crop),
            crop_mismatch,
            risk_level: Some(risk_level),
            viability,
            savings,
            rainfall_warning: rainfall.warning,
            warnings,
        })
    }

    fn assess_viability(
        &self,
        balance_m3: f64,
        available_m3: f64,
        demand_m3: f64,
        area: f64,
        efficiency: f64,
    ) -> Result<(BudgetStatus, ViabilityAssessment)> {
        if balance_m3 >= 0.0 {
            return Ok((
                BudgetStatus::Safe,
                ViabilityAssessment {
                    recommended_usage_m3: demand_m3,
                    shortage_ratio: None,
                    alternate_crops: Vec::new(),
                },
            ));
        }

        let ratio = shortage_ratio(balance_m3, demand_m3)?;
        let status = *shortage_table().classify(ratio);

        let alternate_crops = if status == BudgetStatus::NotViable {
            self.alternate_crops(available_m3, area, efficiency)
        } else {
            Vec::new()
        };

        Ok((
            status,
            ViabilityAssessment {
                recommended_usage_m3: available_m3,
                shortage_ratio: Some(ratio),
                alternate_crops,
            },
        ))
    }

    /// Crops whose unadjusted demand fits within the available water.
    pub fn alternate_crops(&self, available_m3: f64, area: f64, efficiency: f64) -> Vec<AlternateCrop> {
        self.refs
            .crops
            .iter()
            .map(|(crop, mm)| AlternateCrop {
                crop: crop.to_string(),
                demand_m3: crop_demand_m3(mm, area, efficiency),
            })
            .filter(|alt| alt.demand_m3 <= available_m3)
            .collect()
    }
}

/// One-shot evaluation without keeping an engine around.
pub fn compute_water_budget(
    input: &FarmInput,
    refs: &ReferenceData,
    policy: &BudgetPolicy,
    sensor: Option<&SensorReading>,
) -> Result<WaterBudgetResult> {
    WaterBudgetEngine::new(refs.clone(), policy.clone())?.evaluate(input, sensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgriWaterError;
    use crate::models::{
        GroundwaterInput, GroundwaterLevel, GroundwaterStatus, GroundwaterTable,
        IrrigationMethod, LookupTable, RainfallSource, Season, SoilMoisture,
    };

    fn wheat_input() -> FarmInput {
        FarmInput {
            district: "Indore".to_string(),
            crop: "Wheat".to_string(),
            season: Season::Rabi,
            area_hectares: 1.0,
            irrigation: IrrigationMethod::Drip,
            groundwater: GroundwaterInput::Level(GroundwaterLevel::Medium),
            soil_moisture: SoilMoisture::High,
        }
    }

    fn engine(classification: ClassificationPolicy) -> WaterBudgetEngine {
        let policy = BudgetPolicy {
            classification,
            ..Default::default()
        };
        WaterBudgetEngine::new(ReferenceData::default(), policy).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn worked_example_indore_wheat() {
        let result = engine(ClassificationPolicy::default())
            .evaluate(&wheat_input(), None)
            .unwrap();

        assert_eq!(result.rainfall_water_m3, 8000.0);
        assert!(close(result.groundwater_water_m3, 3200.0));
        assert!(close(result.available_m3, 11200.0));
        assert!(close(result.base_demand_m3, 2700.0));
        assert!(close(result.adjusted_demand_m3, 1620.0));
        assert!(close(result.balance_m3, 9580.0));
        assert_eq!(result.status, BudgetStatus::Surplus);
        assert_eq!(result.risk_level, Some(RiskLevel::Low));
        assert!(close(result.water_per_hectare_m3, 11200.0));
        assert_eq!(result.recommended_crop.as_deref(), Some("Rice"));
        assert!(result.crop_mismatch);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn worked_example_surplus_under_2000_margin() {
        let result = engine(ClassificationPolicy::Margin { margin_m3: 2000.0 })
            .evaluate(&wheat_input(), None)
            .unwrap();
        assert_eq!(result.status, BudgetStatus::Surplus);
    }

    #[test]
    fn available_is_rainfall_plus_groundwater() {
        let engine = engine(ClassificationPolicy::default());
        for level in GroundwaterLevel::ALL {
            let mut input = wheat_input();
            input.groundwater = GroundwaterInput::Level(*level);
            input.area_hectares = 2.5;
            let r = engine.evaluate(&input, None).unwrap();
            assert_eq!(r.rainfall_water_m3, 800.0 * 2.5 * 10.0);
            assert_eq!(r.available_m3, r.rainfall_water_m3 + r.groundwater_water_m3);
        }
    }

    #[test]
    fn area_scales_linearly() {
        let engine = engine(ClassificationPolicy::default());
        let one = engine.evaluate(&wheat_input(), None).unwrap();
        let mut input = wheat_input();
        input.area_hectares = 3.0;
        let three = engine.evaluate(&input, None).unwrap();

        assert!(close(three.available_m3, one.available_m3 * 3.0));
        assert!(close(three.adjusted_demand_m3, one.adjusted_demand_m3 * 3.0));
        assert!(three.available_m3 > one.available_m3);
        assert!(three.adjusted_demand_m3 > one.adjusted_demand_m3);
    }

    #[test]
    fn higher_efficiency_factor_raises_demand() {
        let engine = engine(ClassificationPolicy::default());
        let demand = |method| {
            let mut input = wheat_input();
            input.irrigation = method;
            engine.evaluate(&input, None).unwrap().adjusted_demand_m3
        };
        assert!(demand(IrrigationMethod::Drip) < demand(IrrigationMethod::Sprinkler));
        assert!(demand(IrrigationMethod::Sprinkler) < demand(IrrigationMethod::Flood));
    }

    #[test]
    fn wetter_soil_never_raises_demand() {
        let engine = engine(ClassificationPolicy::default());
        let demand = |level| {
            let mut input = wheat_input();
            input.soil_moisture = level;
            engine.evaluate(&input, None).unwrap().adjusted_demand_m3
        };
        let high = demand(SoilMoisture::High);
        let medium = demand(SoilMoisture::Medium);
        let low = demand(SoilMoisture::Low);
        assert!(high <= medium && medium <= low);
        assert!(close(low, 2700.0));
    }

    #[test]
    fn sensor_reading_overrides_selected_moisture() {
        let engine = engine(ClassificationPolicy::default());
        let dry = SensorReading::new(15.0);
        let result = engine.evaluate(&wheat_input(), Some(&dry)).unwrap();
        assert_eq!(result.soil_moisture, SoilMoisture::Low);
        assert!(close(result.adjusted_demand_m3, 2700.0));
    }

    #[test]
    fn unknown_district_is_rejected() {
        let mut input = wheat_input();
        input.district = "Atlantis".to_string();
        let err = engine(ClassificationPolicy::default())
            .evaluate(&input, None)
            .unwrap_err();
        match err {
            AgriWaterError::UnknownInput { field, value } => {
                assert_eq!(field, "district");
                assert_eq!(value, "Atlantis");
            }
            other => panic!("expected UnknownInput, got {:?}", other),
        }
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let mut input = wheat_input();
        input.crop = "Cotton".to_string();
        assert!(matches!(
            engine(ClassificationPolicy::default()).evaluate(&input, None),
            Err(AgriWaterError::UnknownInput { field: "crop", .. })
        ));
    }

    #[test]
    fn missing_irrigation_factor_is_rejected() {
        let mut refs = ReferenceData::default();
        refs.irrigation = [("Flood", 1.0)].into_iter().collect();
        let engine = WaterBudgetEngine::new(refs, BudgetPolicy::default()).unwrap();
        assert!(matches!(
            engine.evaluate(&wheat_input(), None),
            Err(AgriWaterError::UnknownInput {
                field: "irrigation method",
                ..
            })
        ));
    }

    #[test]
    fn zero_area_is_invalid_configuration() {
        let mut input = wheat_input();
        input.area_hectares = 0.0;
        // Area is checked before the district lookup, so a bad district too
        // still reports the area problem.
        input.district = "Atlantis".to_string();
        assert!(matches!(
            engine(ClassificationPolicy::default()).evaluate(&input, None),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn deficit_with_high_risk() {
        let mut input = wheat_input();
        input.crop = "Rice".to_string();
        input.irrigation = IrrigationMethod::Flood;
        input.soil_moisture = SoilMoisture::Low;
        input.groundwater = GroundwaterInput::Level(GroundwaterLevel::Low);
        // available 9600, demand 12000
        let result = engine(ClassificationPolicy::default())
            .evaluate(&input, None)
            .unwrap();
        assert!(close(result.available_m3, 9600.0));
        assert!(close(result.balance_m3, -2400.0));
        assert_eq!(result.status, BudgetStatus::Deficit);
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        assert_eq!(result.recommended_crop.as_deref(), Some("Maize"));
    }

    #[test]
    fn viability_safe_recommends_full_demand() {
        let result = engine(ClassificationPolicy::Viability)
            .evaluate(&wheat_input(), None)
            .unwrap();
        assert_eq!(result.status, BudgetStatus::Safe);
        let viability = result.viability.unwrap();
        assert!(close(viability.recommended_usage_m3, 1620.0));
        assert!(viability.shortage_ratio.is_none());
    }

    #[test]
    fn viability_manageable_risk() {
        // Rice / flood / low moisture / low groundwater: shortage 2400 of 12000 = 0.2
        let mut input = wheat_input();
        input.crop = "Rice".to_string();
        input.irrigation = IrrigationMethod::Flood;
        input.soil_moisture = SoilMoisture::Low;
        input.groundwater = GroundwaterInput::Level(GroundwaterLevel::Low);

        let result = engine(ClassificationPolicy::Viability)
            .evaluate(&input, None)
            .unwrap();
        assert_eq!(result.status, BudgetStatus::ManageableRisk);
        let viability = result.viability.unwrap();
        assert!(close(viability.shortage_ratio.unwrap(), 0.2));
        assert!(close(viability.recommended_usage_m3, 9600.0));
        assert!(viability.alternate_crops.is_empty());
    }

    #[test]
    fn viability_not_viable_lists_alternates() {
        let mut refs = ReferenceData::default();
        refs.rainfall = RainfallSource::Static([("Dryland", 300.0)].into_iter().collect());
        let engine = WaterBudgetEngine::new(
            refs,
            BudgetPolicy {
                classification: ClassificationPolicy::Viability,
                ..Default::default()
            },
        )
        .unwrap();

        let input = FarmInput {
            district: "Dryland".to_string(),
            crop: "Rice".to_string(),
            season: Season::Kharif,
            area_hectares: 1.0,
            irrigation: IrrigationMethod::Flood,
            groundwater: GroundwaterInput::Level(GroundwaterLevel::High),
            soil_moisture: SoilMoisture::Low,
        };
        // available 3000 + 1800 = 4800; rice demand 12000
        let result = engine.evaluate(&input, None).unwrap();
        assert_eq!(result.status, BudgetStatus::NotViable);

        let viability = result.viability.unwrap();
        assert!(close(viability.recommended_usage_m3, 4800.0));
        let names: Vec<&str> = viability
            .alternate_crops
            .iter()
            .map(|a| a.crop.as_str())
            .collect();
        assert_eq!(names, vec!["Wheat"]);
        assert!(close(viability.alternate_crops[0].demand_m3, 4500.0));
    }

    #[test]
    fn viability_with_zero_demand_is_safe_not_an_error() {
        let mut refs = ReferenceData::default();
        refs.crops.insert("Fallow", 0.0);
        let engine = WaterBudgetEngine::new(
            refs,
            BudgetPolicy {
                classification: ClassificationPolicy::Viability,
                include_savings: false,
                ..Default::default()
            },
        )
        .unwrap();
        let mut input = wheat_input();
        input.crop = "Fallow".to_string();
        assert_eq!(
            engine.evaluate(&input, None).unwrap().status,
            BudgetStatus::Safe
        );
    }

    #[test]
    fn savings_against_flood_baseline() {
        let result = engine(ClassificationPolicy::default())
            .evaluate(&wheat_input(), None)
            .unwrap();
        let savings = result.savings.unwrap();
        assert!(close(savings.baseline_demand_m3, 4500.0));
        assert!(close(savings.water_saved_m3, 2880.0));
        assert!(close(savings.saving_percent, 64.0));
    }

    #[test]
    fn savings_with_zero_baseline_fails() {
        let mut refs = ReferenceData::default();
        refs.crops.insert("Fallow", 0.0);
        let engine = WaterBudgetEngine::new(refs, BudgetPolicy::default()).unwrap();
        let mut input = wheat_input();
        input.crop = "Fallow".to_string();
        assert!(matches!(
            engine.evaluate(&input, None),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn degraded_sources_surface_warnings() {
        let refs = ReferenceData {
            rainfall: RainfallSource::Unavailable {
                reason: "rainfall.csv missing".to_string(),
            },
            groundwater: GroundwaterTable {
                statuses: None,
                default_fraction: 0.3,
                unavailable_reason: Some("groundwater.csv missing".to_string()),
            },
            ..Default::default()
        };
        let engine = WaterBudgetEngine::new(refs, BudgetPolicy::default()).unwrap();
        let mut input = wheat_input();
        input.district = "Anywhere".to_string();
        input.groundwater = GroundwaterInput::DistrictStatus;

        let result = engine.evaluate(&input, None).unwrap();
        assert_eq!(result.available_m3, 0.0);
        assert_eq!(result.groundwater_fraction, 0.3);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.rainfall_warning.unwrap().contains("rainfall.csv missing"));
        assert_eq!(result.status, BudgetStatus::Deficit);
        assert_eq!(result.recommended_crop.as_deref(), Some("Wheat"));
    }

    #[test]
    fn district_groundwater_status_is_used() {
        let statuses: LookupTable<GroundwaterStatus> =
            [("Indore", GroundwaterStatus::OverExploited)].into_iter().collect();
        let refs = ReferenceData {
            groundwater: GroundwaterTable {
                statuses: Some(statuses),
                default_fraction: 0.3,
                unavailable_reason: None,
            },
            ..Default::default()
        };
        let engine = WaterBudgetEngine::new(refs, BudgetPolicy::default()).unwrap();
        let mut input = wheat_input();
        input.groundwater = GroundwaterInput::DistrictStatus;
        let result = engine.evaluate(&input, None).unwrap();
        assert!(close(result.groundwater_water_m3, 800.0));
    }

    #[test]
    fn switching_policy_changes_status_family() {
        let mut engine = engine(ClassificationPolicy::default());
        assert_eq!(
            engine.evaluate(&wheat_input(), None).unwrap().status,
            BudgetStatus::Surplus
        );
        engine
            .set_classification(ClassificationPolicy::Viability)
            .unwrap();
        assert_eq!(
            engine.evaluate(&wheat_input(), None).unwrap().status,
            BudgetStatus::Safe
        );
        assert!(engine
            .set_classification(ClassificationPolicy::Margin { margin_m3: -5.0 })
            .is_err());
        assert_eq!(engine.policy().classification, ClassificationPolicy::Viability);
    }

    #[test]
    fn compute_water_budget_matches_engine() {
        let result = compute_water_budget(
            &wheat_input(),
            &ReferenceData::default(),
            &BudgetPolicy::default(),
            None,
        )
        .unwrap();
        assert!(close(result.balance_m3, 9580.0));
    }
}
