//! Fixed bilingual text used by the advisory rules and the assistant.

use crate::models::{BudgetStatus, Language, RiskLevel, SoilMoisture};

/// One message in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bilingual {
    pub english: &'static str,
    pub hindi: &'static str,
}

impl Bilingual {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Hindi => self.hindi,
        }
    }
}

pub const MOISTURE_SUFFICIENT: Bilingual = Bilingual {
    english: "Soil moisture is sufficient. Irrigation is not required at this time.",
    hindi: "मिट्टी में पर्याप्त नमी है। अभी सिंचाई की आवश्यकता नहीं है।",
};

pub const MOISTURE_IRRIGATE_SOON: Bilingual = Bilingual {
    english: "Soil moisture is moderate. Irrigation can be done in 1–2 days.",
    hindi: "मिट्टी में मध्यम नमी है। 1–2 दिन में सिंचाई करें।",
};

pub const MOISTURE_IRRIGATE_NOW: Bilingual = Bilingual {
    english: "Soil is dry. Immediate irrigation is required.",
    hindi: "मिट्टी सूखी है। तुरंत सिंचाई आवश्यक है।",
};

pub const VOICE_INTRO: Bilingual = Bilingual {
    english: "Voice input detected. Advisory generated based on current field conditions:",
    hindi: "वॉइस इनपुट प्राप्त हुआ। खेत की वर्तमान स्थिति के आधार पर सलाह दी गई है:",
};

pub const NO_INPUT_PROMPT: Bilingual = Bilingual {
    english: "Please provide input using text or voice.",
    hindi: "कृपया टेक्स्ट या वॉइस के माध्यम से प्रश्न पूछें।",
};

pub const ANALYZING: Bilingual = Bilingual {
    english: "Analyzing field conditions...",
    hindi: "खेत की स्थिति का विश्लेषण हो रहा है...",
};

/// Irrigation template for a soil moisture level.
pub fn moisture_template(level: SoilMoisture) -> Bilingual {
    match level {
        SoilMoisture::High => MOISTURE_SUFFICIENT,
        SoilMoisture::Medium => MOISTURE_IRRIGATE_SOON,
        SoilMoisture::Low => MOISTURE_IRRIGATE_NOW,
    }
}

pub fn risk_name(risk: RiskLevel, language: Language) -> &'static str {
    match (language, risk) {
        (Language::English, _) => risk.as_str(),
        (Language::Hindi, RiskLevel::Low) => "कम",
        (Language::Hindi, RiskLevel::Medium) => "मध्यम",
        (Language::Hindi, RiskLevel::High) => "उच्च",
    }
}

pub fn status_name(status: BudgetStatus, language: Language) -> &'static str {
    match (language, status) {
        (Language::English, _) => status.label(),
        (Language::Hindi, BudgetStatus::Surplus) => "पानी अधिशेष",
        (Language::Hindi, BudgetStatus::Balanced) => "संतुलित",
        (Language::Hindi, BudgetStatus::Deficit) => "पानी की कमी",
        (Language::Hindi, BudgetStatus::Safe) => "सुरक्षित",
        (Language::Hindi, BudgetStatus::ManageableRisk) => "प्रबंधनीय जोखिम",
        (Language::Hindi, BudgetStatus::NotViable) => "व्यवहार्य नहीं",
    }
}

pub fn water_line(
    language: Language,
    available_m3: f64,
    demand_m3: f64,
    balance_m3: f64,
    status: BudgetStatus,
) -> String {
    let status = status_name(status, language);
    match language {
        Language::English => format!(
            "Available water is {:.0} m³ against a crop demand of {:.0} m³, a balance of {:.0} m³ ({}).",
            available_m3, demand_m3, balance_m3, status
        ),
        Language::Hindi => format!(
            "उपलब्ध पानी {:.0} m³ है और फसल की मांग {:.0} m³ है, शेष {:.0} m³ ({})।",
            available_m3, demand_m3, balance_m3, status
        ),
    }
}

pub fn crop_line(language: Language, recommended: &str, selected: &str, mismatch: bool) -> String {
    let mut line = match language {
        Language::English => format!(
            "Recommended crop for your water availability: {}.",
            recommended
        ),
        Language::Hindi => format!("आपकी जल उपलब्धता के लिए अनुशंसित फसल: {}।", recommended),
    };
    if mismatch {
        line.push(' ');
        line.push_str(&match language {
            Language::English => format!(
                "Your selected crop {} differs from this recommendation.",
                selected
            ),
            Language::Hindi => format!("आपकी चुनी हुई फसल {} इस अनुशंसा से अलग है।", selected),
        });
    }
    line
}

pub fn risk_line(language: Language, risk: RiskLevel) -> String {
    match language {
        Language::English => format!("Water risk level: {}.", risk_name(risk, language)),
        Language::Hindi => format!("जल जोखिम स्तर: {}।", risk_name(risk, language)),
    }
}

pub fn rainfall_line(language: Language, district: &str, rainfall_mm: f64, volume_m3: f64) -> String {
    match language {
        Language::English => format!(
            "Rainfall for {}: {:.0} mm, about {:.0} m³ over your farm.",
            district, rainfall_mm, volume_m3
        ),
        Language::Hindi => format!(
            "{} में वर्षा: {:.0} मिमी, आपके खेत पर लगभग {:.0} m³।",
            district, rainfall_mm, volume_m3
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moisture_templates_per_level() {
        assert!(moisture_template(SoilMoisture::High)
            .get(Language::English)
            .contains("sufficient"));
        assert!(moisture_template(SoilMoisture::Medium)
            .get(Language::English)
            .contains("1–2 days"));
        assert!(moisture_template(SoilMoisture::Low)
            .get(Language::Hindi)
            .contains("तुरंत"));
    }

    #[test]
    fn crop_line_mentions_mismatch() {
        let line = crop_line(Language::English, "Rice", "Wheat", true);
        assert!(line.contains("Rice"));
        assert!(line.contains("Wheat"));
        let line = crop_line(Language::English, "Rice", "Rice", false);
        assert!(!line.contains("differs"));
    }

    #[test]
    fn hindi_water_line_uses_hindi_status() {
        let line = water_line(Language::Hindi, 11200.0, 1620.0, 9580.0, BudgetStatus::Surplus);
        assert!(line.contains("पानी अधिशेष"));
        assert!(!line.contains("Water Surplus"));

        let line = water_line(Language::English, 11200.0, 1620.0, 9580.0, BudgetStatus::Surplus);
        assert!(line.contains("(Water Surplus)"));
    }

    #[test]
    fn risk_names_translate() {
        assert_eq!(risk_name(RiskLevel::High, Language::English), "High");
        assert_eq!(risk_name(RiskLevel::High, Language::Hindi), "उच्च");
    }
}
