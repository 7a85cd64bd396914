use super::farm::{GroundwaterLevel, GroundwaterStatus, IrrigationMethod};
use crate::error::{AgriWaterError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ordered name → value table with case-insensitive lookup.
///
/// Insertion order is kept so listings (district pickers, alternate crop
/// scans) come out the way the table was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for LookupTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: Copy> LookupTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Names are trimmed; matching ignores case.
    pub fn insert(&mut self, name: &str, value: V) {
        let name = name.trim();
        match self.position(name) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<V> {
        self.position(name.trim()).map(|idx| self.entries[idx].1)
    }

    /// Like `get`, but a missing key is an `UnknownInput` error for `field`.
    pub fn lookup(&self, field: &'static str, name: &str) -> Result<V> {
        self.get(name)
            .ok_or_else(|| AgriWaterError::unknown(field, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<S: AsRef<str>, V: Copy> FromIterator<(S, V)> for LookupTable<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut table = LookupTable::new();
        for (name, value) in iter {
            table.insert(name.as_ref(), value);
        }
        table
    }
}

/// One daily rainfall observation for a district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRainfall {
    pub district: String,
    pub state: String,
    pub date: NaiveDate,
    pub rainfall_mm: f64,
}

/// Longest supported rainfall window, about a century.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Near-real-time rainfall: sum of daily observations over the most recent
/// `days`, ending at the latest date present in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallWindow {
    pub observations: Vec<DailyRainfall>,
    pub state: Option<String>,
    pub days: u32,
}

impl RainfallWindow {
    pub fn new(observations: Vec<DailyRainfall>, state: Option<String>, days: u32) -> Self {
        Self {
            observations,
            state,
            days,
        }
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).max()
    }

    /// Inclusive date range covered by the window. A start before the
    /// earliest representable date clamps to it.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let end = self.latest_date()?;
        let span = i64::from(self.days.max(1)) - 1;
        let start = end
            .checked_sub_signed(Duration::days(span))
            .unwrap_or(NaiveDate::MIN);
        Some((start, end))
    }

    fn state_matches(&self, obs: &DailyRainfall) -> bool {
        match &self.state {
            Some(state) => obs.state.trim().eq_ignore_ascii_case(state.trim()),
            None => true,
        }
    }

    /// Returns the windowed total and the number of observations summed.
    pub fn total(&self, district: &str) -> (f64, usize) {
        let Some((start, end)) = self.range() else {
            return (0.0, 0);
        };

        let district = district.trim();
        let matched: Vec<f64> = self
            .observations
            .iter()
            .filter(|o| o.district.trim().eq_ignore_ascii_case(district))
            .filter(|o| self.state_matches(o))
            .filter(|o| o.date >= start && o.date <= end)
            .map(|o| o.rainfall_mm)
            .filter(|mm| mm.is_finite() && *mm >= 0.0) // Negative values mark missing data
            .collect();

        (matched.iter().sum(), matched.len())
    }

    pub fn districts(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for obs in self.observations.iter().filter(|o| self.state_matches(o)) {
            let name = obs.district.trim();
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        }
        names.sort();
        names
    }
}

/// Where rainfall depth comes from for this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RainfallSource {
    /// Annual or seasonal average per district.
    Static(LookupTable<f64>),
    /// Sum of the recent daily observations.
    Window(RainfallWindow),
    /// Dataset could not be loaded; every district reads 0 mm.
    Unavailable { reason: String },
}

/// Resolved rainfall depth plus any warning about how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallDepth {
    pub mm: f64,
    pub warning: Option<String>,
}

impl RainfallSource {
    pub fn depth_mm(&self, district: &str) -> Result<RainfallDepth> {
        match self {
            RainfallSource::Static(table) => Ok(RainfallDepth {
                mm: table.lookup("district", district)?,
                warning: None,
            }),
            RainfallSource::Window(window) => {
                let (total, count) = window.total(district);
                let warning = if count == 0 {
                    Some(format!(
                        "No rainfall observations for {} in the last {} days; using 0 mm",
                        district.trim(),
                        window.days
                    ))
                } else {
                    None
                };
                Ok(RainfallDepth { mm: total, warning })
            }
            RainfallSource::Unavailable { reason } => Ok(RainfallDepth {
                mm: 0.0,
                warning: Some(format!("Rainfall data unavailable ({}); using 0 mm", reason)),
            }),
        }
    }

    pub fn districts(&self) -> Vec<String> {
        match self {
            RainfallSource::Static(table) => {
                let mut names = table.names();
                names.sort();
                names
            }
            RainfallSource::Window(window) => window.districts(),
            RainfallSource::Unavailable { .. } => Vec::new(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RainfallSource::Static(table) => {
                format!("static averages ({} districts)", table.len())
            }
            RainfallSource::Window(window) => match window.range() {
                Some((start, end)) => format!(
                    "{}-day window {} to {} ({} observations)",
                    window.days,
                    start,
                    end,
                    window.observations.len()
                ),
                None => format!("{}-day window (no observations)", window.days),
            },
            RainfallSource::Unavailable { reason } => format!("unavailable: {}", reason),
        }
    }
}

/// How the groundwater contribution fraction is chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundwaterInput {
    /// Farmer-selected coarse level.
    Level(GroundwaterLevel),
    /// Official status of the request's district.
    DistrictStatus,
}

impl GroundwaterInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundwaterInput::Level(level) => level.as_str(),
            GroundwaterInput::DistrictStatus => "District status",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "district" | "status" | "district status" => Some(GroundwaterInput::DistrictStatus),
            other => GroundwaterLevel::from_str(other).map(GroundwaterInput::Level),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| AgriWaterError::unknown("groundwater level", s))
    }
}

impl std::fmt::Display for GroundwaterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterTable {
    pub statuses: Option<LookupTable<GroundwaterStatus>>,
    pub default_fraction: f64,
    pub unavailable_reason: Option<String>,
}

/// Resolved groundwater fraction plus any fallback warning.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundwaterFraction {
    pub fraction: f64,
    pub status: Option<GroundwaterStatus>,
    pub warning: Option<String>,
}

impl GroundwaterTable {
    pub fn levels_only(default_fraction: f64) -> Self {
        Self {
            statuses: None,
            default_fraction,
            unavailable_reason: None,
        }
    }

    pub fn fraction_for(&self, input: GroundwaterInput, district: &str) -> GroundwaterFraction {
        match input {
            GroundwaterInput::Level(level) => GroundwaterFraction {
                fraction: level.fraction(),
                status: None,
                warning: None,
            },
            GroundwaterInput::DistrictStatus => {
                let Some(statuses) = &self.statuses else {
                    let why = self
                        .unavailable_reason
                        .as_deref()
                        .unwrap_or("no groundwater dataset configured");
                    return self.fallback(format!(
                        "Groundwater status unavailable ({}); using default fraction {:.2}",
                        why, self.default_fraction
                    ));
                };

                match statuses.get(district) {
                    Some(status) => GroundwaterFraction {
                        fraction: status.fraction(),
                        status: Some(status),
                        warning: None,
                    },
                    None => self.fallback(format!(
                        "No groundwater status for {}; using default fraction {:.2}",
                        district.trim(),
                        self.default_fraction
                    )),
                }
            }
        }
    }

    fn fallback(&self, warning: String) -> GroundwaterFraction {
        GroundwaterFraction {
            fraction: self.default_fraction,
            status: None,
            warning: Some(warning),
        }
    }
}

/// All lookup tables a budget evaluation reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub rainfall: RainfallSource,
    pub groundwater: GroundwaterTable,
    pub crops: LookupTable<f64>,
    pub irrigation: LookupTable<f64>,
}

impl ReferenceData {
    pub fn default_rainfall() -> LookupTable<f64> {
        [("Indore", 800.0), ("Bhopal", 1000.0), ("Nagpur", 900.0)]
            .into_iter()
            .collect()
    }

    pub fn default_crops() -> LookupTable<f64> {
        [
            ("Rice", 1200.0),
            ("Wheat", 450.0),
            ("Soybean", 500.0),
            ("Maize", 600.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn default_irrigation() -> LookupTable<f64> {
        [
            (IrrigationMethod::Flood.as_str(), 1.0),
            (IrrigationMethod::Sprinkler.as_str(), 0.75),
            (IrrigationMethod::Drip.as_str(), 0.6),
        ]
        .into_iter()
        .collect()
    }

    pub fn efficiency(&self, method: IrrigationMethod) -> Result<f64> {
        self.irrigation.lookup("irrigation method", method.as_str())
    }

    /// Reject table values that would make the arithmetic meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.groundwater.default_fraction > 0.0 && self.groundwater.default_fraction <= 1.0)
        {
            return Err(AgriWaterError::invalid(format!(
                "default groundwater fraction must be in (0, 1], got {}",
                self.groundwater.default_fraction
            )));
        }

        for (method, factor) in self.irrigation.iter() {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(AgriWaterError::invalid(format!(
                    "irrigation efficiency for {} must be in (0, 1], got {}",
                    method, factor
                )));
            }
        }

        for (crop, mm) in self.crops.iter() {
            if !mm.is_finite() || mm < 0.0 {
                return Err(AgriWaterError::invalid(format!(
                    "water requirement for {} must be a non-negative number, got {}",
                    crop, mm
                )));
            }
        }

        if let RainfallSource::Static(table) = &self.rainfall {
            for (district, mm) in table.iter() {
                if !mm.is_finite() || mm < 0.0 {
                    return Err(AgriWaterError::invalid(format!(
                        "rainfall for {} must be a non-negative number, got {}",
                        district, mm
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            rainfall: RainfallSource::Static(Self::default_rainfall()),
            groundwater: GroundwaterTable::levels_only(0.3),
            crops: Self::default_crops(),
            irrigation: Self::default_irrigation(),
        }
    }
}
