use serde::{Deserialize, Serialize};

/// Topic an advisory belongs to. The assistant matches free-text questions
/// against these categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdvisoryCategory {
    Water,
    Crop,
    Risk,
    Moisture,
    Rainfall,
}

impl AdvisoryCategory {
    pub const ALL: &'static [AdvisoryCategory] = &[
        AdvisoryCategory::Water,
        AdvisoryCategory::Crop,
        AdvisoryCategory::Risk,
        AdvisoryCategory::Moisture,
        AdvisoryCategory::Rainfall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCategory::Water => "Water",
            AdvisoryCategory::Crop => "Crop",
            AdvisoryCategory::Risk => "Risk",
            AdvisoryCategory::Moisture => "Moisture",
            AdvisoryCategory::Rainfall => "Rainfall",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AdvisoryCategory::Water => Color::Blue,
            AdvisoryCategory::Crop => Color::Green,
            AdvisoryCategory::Risk => Color::LightRed,
            AdvisoryCategory::Moisture => Color::Cyan,
            AdvisoryCategory::Rainfall => Color::LightBlue,
        }
    }
}

impl std::fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Severity::Info => Color::Gray,
            Severity::Advisory => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
            Severity::Critical => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
}

impl DataPoint {
    pub fn new(label: &str, value: impl std::fmt::Display) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    pub category: AdvisoryCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub data_points: Vec<DataPoint>,
    pub suggested_action: Option<String>,
}

impl Advisory {
    pub fn new(
        id: impl Into<String>,
        category: AdvisoryCategory,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity,
            title: title.into(),
            description: description.into(),
            data_points: Vec::new(),
            suggested_action: None,
        }
    }

    pub fn with_data_point(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        self.data_points.push(DataPoint::new(label, value));
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }
}
