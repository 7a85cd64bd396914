pub mod groundwater;
pub mod rainfall;

pub use groundwater::load_groundwater;
pub use rainfall::load_rainfall;

use crate::config::Config;
use crate::error::{AgriWaterError, Result};
use crate::models::{IrrigationMethod, LookupTable, ReferenceData};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Assemble every reference table from config: CSV-backed rainfall and
/// groundwater plus the built-in crop and irrigation tables with overrides.
///
/// Missing or unreadable CSV files degrade to documented fallbacks; bad
/// values in config are errors.
pub fn load_reference_data(config: &Config) -> Result<ReferenceData> {
    let refs = ReferenceData {
        rainfall: load_rainfall(&config.data)?,
        groundwater: load_groundwater(&config.data),
        crops: with_overrides(ReferenceData::default_crops(), config.crops.as_ref()),
        irrigation: with_overrides(
            ReferenceData::default_irrigation(),
            irrigation_overrides(config.irrigation.as_ref())?.as_ref(),
        ),
    };
    refs.validate()?;

    tracing::info!(
        rainfall = %refs.rainfall.describe(),
        crops = refs.crops.len(),
        "reference data loaded"
    );
    Ok(refs)
}

fn with_overrides(mut table: LookupTable<f64>, overrides: Option<&BTreeMap<String, f64>>) -> LookupTable<f64> {
    for (name, value) in overrides.into_iter().flatten() {
        table.insert(name, *value);
    }
    table
}

/// Irrigation overrides keyed by canonical method name. Only the known
/// methods can be requested, so any other name is rejected.
fn irrigation_overrides(
    overrides: Option<&BTreeMap<String, f64>>,
) -> Result<Option<BTreeMap<String, f64>>> {
    let Some(overrides) = overrides else {
        return Ok(None);
    };
    overrides
        .iter()
        .map(|(name, factor)| {
            IrrigationMethod::parse(name).map(|method| (method.as_str().to_string(), *factor))
        })
        .collect::<Result<BTreeMap<_, _>>>()
        .map(Some)
}

pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(AgriWaterError::DataUnavailable(format!(
            "{} not found",
            path.display()
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Column values as trimmed strings; numbers and dates are rendered as text.
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .collect())
}

/// Column values as numbers; anything that does not parse becomes `None`.
pub(crate) fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::write_csv;
    use super::*;
    use crate::models::RainfallSource;

    #[test]
    fn defaults_without_files() {
        let refs = load_reference_data(&Config::default()).unwrap();
        assert_eq!(refs, ReferenceData::default());
    }

    #[test]
    fn overrides_merge_over_builtin_tables() {
        let mut config = Config::default();
        config.crops = Some(BTreeMap::from([
            ("Gram".to_string(), 300.0),
            ("wheat".to_string(), 500.0),
        ]));
        config.irrigation = Some(BTreeMap::from([("Drip".to_string(), 0.55)]));

        let refs = load_reference_data(&config).unwrap();
        assert_eq!(refs.crops.get("Gram"), Some(300.0));
        assert_eq!(refs.crops.get("Wheat"), Some(500.0));
        assert_eq!(refs.crops.len(), 5);
        assert_eq!(refs.irrigation.get("drip"), Some(0.55));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let mut config = Config::default();
        config.irrigation = Some(BTreeMap::from([("Flood".to_string(), 1.5)]));
        assert!(matches!(
            load_reference_data(&config),
            Err(AgriWaterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unknown_irrigation_override_is_rejected() {
        let mut config = Config::default();
        config.irrigation = Some(BTreeMap::from([("Canal".to_string(), 0.9)]));
        match load_reference_data(&config) {
            Err(AgriWaterError::UnknownInput { field, value }) => {
                assert_eq!(field, "irrigation method");
                assert_eq!(value, "Canal");
            }
            other => panic!("expected UnknownInput, got {:?}", other),
        }
    }

    #[test]
    fn irrigation_override_aliases_map_to_method() {
        let mut config = Config::default();
        config.irrigation = Some(BTreeMap::from([("micro".to_string(), 0.5)]));
        let refs = load_reference_data(&config).unwrap();
        assert_eq!(refs.irrigation.get("Drip"), Some(0.5));
        assert_eq!(refs.irrigation.len(), 3);
    }

    #[test]
    fn static_rainfall_csv_replaces_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "rain.csv",
            "District,Total_Actual_Rainfall_mm\nJabalpur,1350.5\nIndore,780\n",
        );
        let mut config = Config::default();
        config.data.rainfall_csv = Some(path);

        let refs = load_reference_data(&config).unwrap();
        match refs.rainfall {
            RainfallSource::Static(table) => {
                assert_eq!(table.get("jabalpur"), Some(1350.5));
                assert_eq!(table.get("Indore"), Some(780.0));
                assert!(table.get("Bhopal").is_none());
            }
            other => panic!("expected static rainfall, got {:?}", other),
        }
    }
}
