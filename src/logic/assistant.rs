//! Canned bilingual assistant.
//!
//! Answers are picked from fixed templates and filled from an already
//! computed water budget. A question is routed by keyword containment
//! against the advisory categories; nothing here calls out to a model.

use super::messages;
use crate::models::{AdvisoryCategory, FarmInput, Language, RiskLevel, WaterBudgetResult};
use serde::{Deserialize, Serialize};

const WATER_KEYWORDS: &[&str] = &[
    "water", "budget", "balance", "irrigat", "पानी", "जल", "सिंचाई",
];
const CROP_KEYWORDS: &[&str] = &["crop", "grow", "sow", "plant", "फसल", "बुवाई", "बोना"];
const RISK_KEYWORDS: &[&str] = &["risk", "danger", "shortage", "जोखिम", "खतरा", "कमी"];
const MOISTURE_KEYWORDS: &[&str] = &["moisture", "soil", "dry", "wet", "नमी", "मिट्टी", "सूखा"];
const RAINFALL_KEYWORDS: &[&str] = &["rain", "monsoon", "वर्षा", "बारिश", "मानसून"];

fn keywords(category: AdvisoryCategory) -> &'static [&'static str] {
    match category {
        AdvisoryCategory::Water => WATER_KEYWORDS,
        AdvisoryCategory::Crop => CROP_KEYWORDS,
        AdvisoryCategory::Risk => RISK_KEYWORDS,
        AdvisoryCategory::Moisture => MOISTURE_KEYWORDS,
        AdvisoryCategory::Rainfall => RAINFALL_KEYWORDS,
    }
}

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// Hindi when the text contains any Devanagari, otherwise `fallback`.
pub fn detect_language(text: &str, fallback: Language) -> Language {
    if text.chars().any(is_devanagari) {
        Language::Hindi
    } else {
        fallback
    }
}

/// Categories mentioned by a question, in the fixed category order.
pub fn detect_categories(text: &str) -> Vec<AdvisoryCategory> {
    let lowered = text.to_lowercase();
    AdvisoryCategory::ALL
        .iter()
        .copied()
        .filter(|category| keywords(*category).iter().any(|k| lowered.contains(k)))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantQuery {
    pub text: Option<String>,
    pub voice: bool,
    pub language: Language,
}

impl AssistantQuery {
    pub fn text(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: Some(text.into()),
            voice: false,
            language,
        }
    }

    pub fn voice(language: Language) -> Self {
        Self {
            text: None,
            voice: true,
            language,
        }
    }

    fn question(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub language: Language,
    pub categories: Vec<AdvisoryCategory>,
    pub text: String,
}

/// Answer a query against a computed budget.
///
/// A typed question wins over the voice flag; with neither, the reply is
/// the input prompt.
pub fn respond(query: &AssistantQuery, result: &WaterBudgetResult, input: &FarmInput) -> AssistantReply {
    let moisture = messages::moisture_template(result.soil_moisture);

    if let Some(question) = query.question() {
        let language = detect_language(question, query.language);
        let categories = detect_categories(question);
        tracing::debug!(?language, ?categories, "assistant text query");

        let text = if categories.is_empty() {
            moisture.get(language).to_string()
        } else {
            categories
                .iter()
                .map(|category| category_line(*category, language, result, input))
                .collect::<Vec<_>>()
                .join("\n")
        };

        return AssistantReply {
            language,
            categories,
            text,
        };
    }

    if query.voice {
        let language = query.language;
        return AssistantReply {
            language,
            categories: vec![AdvisoryCategory::Moisture],
            text: format!(
                "{}\n{}",
                messages::VOICE_INTRO.get(language),
                moisture.get(language)
            ),
        };
    }

    AssistantReply {
        language: query.language,
        categories: Vec::new(),
        text: messages::NO_INPUT_PROMPT.get(query.language).to_string(),
    }
}

fn category_line(
    category: AdvisoryCategory,
    language: Language,
    result: &WaterBudgetResult,
    input: &FarmInput,
) -> String {
    match category {
        AdvisoryCategory::Water => messages::water_line(
            language,
            result.available_m3,
            result.adjusted_demand_m3,
            result.balance_m3,
            result.status,
        ),
        AdvisoryCategory::Crop => {
            let recommended = result.recommended_crop.as_deref().unwrap_or(&input.crop);
            messages::crop_line(language, recommended, &input.crop, result.crop_mismatch)
        }
        AdvisoryCategory::Risk => {
            messages::risk_line(language, result.risk_level.unwrap_or(RiskLevel::Low))
        }
        AdvisoryCategory::Moisture => messages::moisture_template(result.soil_moisture)
            .get(language)
            .to_string(),
        AdvisoryCategory::Rainfall => messages::rainfall_line(
            language,
            input.district.trim(),
            result.rainfall_mm,
            result.rainfall_water_m3,
        ),
    }
}
