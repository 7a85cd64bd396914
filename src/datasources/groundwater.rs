use super::{read_csv, string_column};
use crate::config::{ColumnConfig, DataConfig};
use crate::error::{AgriWaterError, Result};
use crate::models::{GroundwaterStatus, GroundwaterTable, LookupTable};
use std::path::Path;

/// Build the groundwater table. Without a CSV only farmer-selected levels
/// are available; a file that cannot be read leaves district lookups on the
/// default fraction with the reason recorded for the warning.
pub fn load_groundwater(data: &DataConfig) -> GroundwaterTable {
    let mut table = GroundwaterTable::levels_only(data.default_groundwater_fraction);

    let Some(path) = data.groundwater_csv.as_deref() else {
        return table;
    };

    match read_statuses(path, &data.columns) {
        Ok(statuses) => {
            tracing::info!(
                "Groundwater status for {} districts from {}",
                statuses.len(),
                path.display()
            );
            table.statuses = Some(statuses);
        }
        Err(e) => {
            let reason = format!("{}: {}", path.display(), e);
            tracing::warn!("Groundwater data unavailable: {}", reason);
            table.unavailable_reason = Some(reason);
        }
    }

    table
}

/// District → official status. Unrecognized statuses are dropped so those
/// districts fall back to the default fraction.
pub fn read_statuses(path: &Path, columns: &ColumnConfig) -> Result<LookupTable<GroundwaterStatus>> {
    let df = read_csv(path)?;
    let districts = string_column(&df, &columns.district)?;
    let statuses = string_column(&df, &columns.groundwater_status)?;

    let mut table = LookupTable::new();
    for (district, status) in districts.into_iter().zip(statuses) {
        let Some(district) = district else {
            continue;
        };
        match status.as_deref().and_then(GroundwaterStatus::from_str) {
            Some(status) => table.insert(&district, status),
            None => tracing::warn!(
                "Unrecognized groundwater status {:?} for {}; using default fraction",
                status.unwrap_or_default(),
                district
            ),
        }
    }

    if table.is_empty() {
        return Err(AgriWaterError::DataUnavailable(format!(
            "no recognized statuses in {}",
            path.display()
        )));
    }
    Ok(table)
}
