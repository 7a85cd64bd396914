//! Plain-text and JSON rendering for the one-shot commands.

use crate::error::Result;
use crate::models::{Advisory, FarmInput, SeasonInfo, WaterBudgetResult, SEASON_FOOTNOTE};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
pub struct BudgetReport<'a> {
    pub input: &'a FarmInput,
    pub policy: &'static str,
    pub result: &'a WaterBudgetResult,
    pub advisories: &'a [Advisory],
    pub season: &'a SeasonInfo,
}

impl BudgetReport<'_> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let r = self.result;
        let input = self.input;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} | {} ({}) | {:.2} ha | {} irrigation",
            input.district, input.crop, input.season, input.area_hectares, input.irrigation
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Water Budget ({} policy)", self.policy);
        let rows = [
            ("Rainfall", format!("{:.1} mm", r.rainfall_mm)),
            ("Rain water", format!("{:.0} m³", r.rainfall_water_m3)),
            (
                "Groundwater",
                format!(
                    "{:.0} m³ (fraction {:.2})",
                    r.groundwater_water_m3, r.groundwater_fraction
                ),
            ),
            ("Available", format!("{:.0} m³", r.available_m3)),
            ("Base demand", format!("{:.0} m³", r.base_demand_m3)),
            (
                "Adjusted demand",
                format!("{:.0} m³ ({} soil moisture)", r.adjusted_demand_m3, r.soil_moisture),
            ),
            ("Balance", format!("{:.0} m³", r.balance_m3)),
            ("Status", r.status.label().to_string()),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {:<16} {}", label, value);
        }

        if let Some(crop) = &r.recommended_crop {
            let note = if r.crop_mismatch { " (differs from selection)" } else { "" };
            let _ = writeln!(out, "  {:<16} {}{}", "Recommended crop", crop, note);
        }
        if let Some(risk) = r.risk_level {
            let _ = writeln!(out, "  {:<16} {}", "Risk level", risk);
        }
        if let Some(v) = &r.viability {
            let _ = writeln!(out, "  {:<16} {:.0} m³", "Recommended use", v.recommended_usage_m3);
            if let Some(ratio) = v.shortage_ratio {
                let _ = writeln!(out, "  {:<16} {:.1}%", "Shortage", ratio * 100.0);
            }
        }
        if let Some(s) = &r.savings {
            let _ = writeln!(
                out,
                "  {:<16} {:.0} m³ ({:.1}%)",
                "Saved vs flood", s.water_saved_m3, s.saving_percent
            );
        }

        if !r.warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Data warnings");
            for warning in &r.warnings {
                let _ = writeln!(out, "  ⚠ {}", warning);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Advisories");
        for advisory in self.advisories {
            out.push_str(&advisory_text(advisory));
        }

        let _ = writeln!(out);
        out.push_str(&season_text(self.season));
        out
    }
}

pub fn advisory_text(advisory: &Advisory) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} [{}] {}",
        advisory.severity.symbol(),
        advisory.category,
        advisory.title
    );
    let _ = writeln!(out, "      {}", advisory.description);
    for dp in &advisory.data_points {
        let _ = writeln!(out, "      {}: {}", dp.label, dp.value);
    }
    if let Some(action) = &advisory.suggested_action {
        let _ = writeln!(out, "      → {}", action);
    }
    out
}

pub fn season_text(info: &SeasonInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Season", info.season);
    for (label, value) in info.lines() {
        let _ = writeln!(out, "  {:<18} {}", label, value);
    }
    let _ = writeln!(out, "  {}", SEASON_FOOTNOTE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::budget::ClassificationPolicy;
    use crate::logic::rules::fixtures::{evaluate, input};
    use crate::logic::AdvisoryEngine;
    use crate::models::{IrrigationMethod, Season, SoilMoisture};

    #[test]
    fn text_report_lists_budget_and_advisories() {
        let farm = input("Wheat", IrrigationMethod::Drip, SoilMoisture::High);
        let result = evaluate(&farm, ClassificationPolicy::default());
        let advisories = AdvisoryEngine::new().evaluate(&result, &farm);
        let report = BudgetReport {
            input: &farm,
            policy: "margin",
            result: &result,
            advisories: &advisories,
            season: SeasonInfo::for_season(Season::Rabi),
        };

        let text = report.to_text();
        assert!(text.contains("Available        9600 m³"));
        assert!(text.contains("Water Surplus"));
        assert!(text.contains("Rabi Season"));
        assert!(!text.contains("Data warnings"));
    }

    #[test]
    fn json_report_uses_wire_names() {
        let farm = input("Rice", IrrigationMethod::Flood, SoilMoisture::Low);
        let result = evaluate(&farm, ClassificationPolicy::Viability);
        let report = BudgetReport {
            input: &farm,
            policy: "viability",
            result: &result,
            advisories: &[],
            season: SeasonInfo::for_season(Season::Rabi),
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["result"]["status"], "MANAGEABLE_RISK");
        assert_eq!(json["result"]["risk_level"], "HIGH");
        assert_eq!(json["season"]["months"], "October – March");
    }
}
