use super::{
    crop_fit::CropFitRule, rainfall::RainfallRule, risk::RiskRule, soil_moisture::SoilMoistureRule,
    water_balance::WaterBalanceRule, AdvisoryRule,
};
use crate::models::{Advisory, AdvisoryCategory, FarmInput, WaterBudgetResult};

pub struct AdvisoryEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn AdvisoryRule>> = vec![
            Box::new(WaterBalanceRule),
            Box::new(CropFitRule),
            Box::new(RiskRule),
            Box::new(SoilMoistureRule),
            Box::new(RainfallRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, result: &WaterBudgetResult, input: &FarmInput) -> Vec<Advisory> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(result, input))
            .collect()
    }

    pub fn evaluate_category(
        &self,
        category: AdvisoryCategory,
        result: &WaterBudgetResult,
        input: &FarmInput,
    ) -> Vec<Advisory> {
        self.rules
            .iter()
            .filter(|r| r.category() == category)
            .filter_map(|rule| rule.evaluate(result, input))
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{evaluate, input};
    use super::*;
    use crate::logic::budget::ClassificationPolicy;
    use crate::models::{IrrigationMethod, SoilMoisture};

    #[test]
    fn every_rule_reports_for_a_full_result() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let result = evaluate(&farm, ClassificationPolicy::default());
        let advisories = AdvisoryEngine::new().evaluate(&result, &farm);
        assert_eq!(advisories.len(), 5);

        let categories: Vec<AdvisoryCategory> = advisories.iter().map(|a| a.category).collect();
        assert_eq!(categories, AdvisoryCategory::ALL.to_vec());
    }

    #[test]
    fn evaluate_category_filters() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let result = evaluate(&farm, ClassificationPolicy::default());
        let engine = AdvisoryEngine::new();

        let moisture = engine.evaluate_category(AdvisoryCategory::Moisture, &result, &farm);
        assert_eq!(moisture.len(), 1);
        assert_eq!(moisture[0].id, "soil_moisture");
    }

    #[test]
    fn lists_rules_in_evaluation_order() {
        let rules = AdvisoryEngine::new().list_rules();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0].0, "water_balance");
        assert_eq!(rules[4], ("rainfall", "Rainfall"));
    }
}
