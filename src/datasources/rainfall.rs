use super::{float_column, read_csv, string_column};
use crate::config::{ColumnConfig, DataConfig, RainfallMode};
use crate::error::{AgriWaterError, Result};
use crate::models::{
    DailyRainfall, LookupTable, RainfallSource, RainfallWindow, ReferenceData, MAX_WINDOW_DAYS,
};
use chrono::NaiveDate;
use std::path::Path;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Build the rainfall source for the configured mode.
///
/// Without a CSV, static mode uses the built-in district averages. A file
/// that cannot be read turns the source `Unavailable`, which resolves every
/// district to 0 mm with a warning.
pub fn load_rainfall(data: &DataConfig) -> Result<RainfallSource> {
    if data.rainfall_mode == RainfallMode::Window
        && !(1..=MAX_WINDOW_DAYS).contains(&data.window_days)
    {
        return Err(AgriWaterError::invalid(format!(
            "window_days must be between 1 and {} for windowed rainfall, got {}",
            MAX_WINDOW_DAYS, data.window_days
        )));
    }

    let Some(path) = data.rainfall_csv.as_deref() else {
        return Ok(match data.rainfall_mode {
            RainfallMode::Static => RainfallSource::Static(ReferenceData::default_rainfall()),
            RainfallMode::Window => unavailable("no rainfall_csv configured".to_string()),
        });
    };

    let loaded = match data.rainfall_mode {
        RainfallMode::Static => read_static(path, &data.columns).map(RainfallSource::Static),
        RainfallMode::Window => read_daily(path, &data.columns).map(|observations| {
            RainfallSource::Window(RainfallWindow::new(
                observations,
                data.state.clone(),
                data.window_days,
            ))
        }),
    };

    Ok(match loaded {
        Ok(source) => {
            tracing::info!("Rainfall from {}: {}", path.display(), source.describe());
            source
        }
        Err(e) => unavailable(format!("{}: {}", path.display(), e)),
    })
}

fn unavailable(reason: String) -> RainfallSource {
    tracing::warn!("Rainfall data unavailable: {}", reason);
    RainfallSource::Unavailable { reason }
}

/// District → rainfall depth. Rows without a district or a numeric value
/// are skipped.
pub fn read_static(path: &Path, columns: &ColumnConfig) -> Result<LookupTable<f64>> {
    let df = read_csv(path)?;
    let districts = string_column(&df, &columns.district)?;
    let values = float_column(&df, &columns.rainfall)?;

    let mut table = LookupTable::new();
    let mut skipped = 0usize;
    for (district, value) in districts.into_iter().zip(values) {
        match (district, value) {
            (Some(district), Some(mm)) if mm.is_finite() => table.insert(&district, mm),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} incomplete rows in {}", skipped, path.display());
    }
    if table.is_empty() {
        return Err(AgriWaterError::DataUnavailable(format!(
            "no usable rows in {}",
            path.display()
        )));
    }
    Ok(table)
}

/// Daily observations. Rows with a missing field or an unparseable date
/// are skipped.
pub fn read_daily(path: &Path, columns: &ColumnConfig) -> Result<Vec<DailyRainfall>> {
    let df = read_csv(path)?;
    let districts = string_column(&df, &columns.district)?;
    let states = string_column(&df, &columns.state)?;
    let dates = string_column(&df, &columns.date)?;
    let values = float_column(&df, &columns.daily_rainfall)?;

    let mut observations = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for (((district, state), date), value) in districts.into_iter().zip(states).zip(dates).zip(values)
    {
        let parsed = date.as_deref().and_then(parse_date);
        match (district, state, parsed, value) {
            (Some(district), Some(state), Some(date), Some(rainfall_mm)) => {
                observations.push(DailyRainfall {
                    district,
                    state,
                    date,
                    rainfall_mm,
                })
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} incomplete rows in {}", skipped, path.display());
    }
    tracing::debug!(rows = observations.len(), "daily rainfall observations read");
    Ok(observations)
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
