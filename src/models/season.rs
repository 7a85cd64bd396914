use super::farm::Season;
use serde::Serialize;

/// Static planning guidance for a cropping season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonInfo {
    pub season: Season,
    pub months: &'static str,
    pub rain: &'static str,
    pub common_crops: &'static str,
    pub irrigation_tip: &'static str,
}

const KHARIF: SeasonInfo = SeasonInfo {
    season: Season::Kharif,
    months: "June – October",
    rain: "High rainfall",
    common_crops: "Rice, Soybean, Maize",
    irrigation_tip: "Irrigation needed only when rainfall is irregular.",
};

const RABI: SeasonInfo = SeasonInfo {
    season: Season::Rabi,
    months: "October – March",
    rain: "Low rainfall",
    common_crops: "Wheat, Gram, Mustard",
    irrigation_tip: "Regular irrigation is required.",
};

impl SeasonInfo {
    pub fn for_season(season: Season) -> &'static SeasonInfo {
        match season {
            Season::Kharif => &KHARIF,
            Season::Rabi => &RABI,
        }
    }

    /// True when the crop is one of the season's commonly grown crops.
    pub fn is_common_crop(&self, crop: &str) -> bool {
        self.common_crops
            .split(',')
            .any(|c| c.trim().eq_ignore_ascii_case(crop.trim()))
    }

    pub fn lines(&self) -> [(&'static str, &'static str); 4] {
        [
            ("Duration", self.months),
            ("Rainfall Pattern", self.rain),
            ("Common Crops", self.common_crops),
            ("Irrigation Tip", self.irrigation_tip),
        ]
    }
}

pub const SEASON_FOOTNOTE: &str =
    "Season-based guidance helps farmers plan irrigation without technical complexity.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kharif_guidance() {
        let info = SeasonInfo::for_season(Season::Kharif);
        assert_eq!(info.months, "June – October");
        assert!(info.is_common_crop("rice"));
        assert!(!info.is_common_crop("Wheat"));
    }

    #[test]
    fn rabi_guidance() {
        let info = SeasonInfo::for_season(Season::Rabi);
        assert_eq!(info.rain, "Low rainfall");
        assert!(info.is_common_crop("Wheat"));
        assert_eq!(info.lines()[3].1, "Regular irrigation is required.");
    }
}
