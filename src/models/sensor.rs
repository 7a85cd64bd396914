use super::farm::SoilMoisture;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const SIMULATED_MIN_PERCENT: f64 = 10.0;
const SIMULATED_MAX_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub moisture_percent: f64,
    pub taken_at: DateTime<Utc>,
}

impl SensorReading {
    pub fn new(moisture_percent: f64) -> Self {
        Self {
            moisture_percent,
            taken_at: Utc::now(),
        }
    }

    pub fn level(&self) -> SoilMoisture {
        SoilMoisture::from_percent(self.moisture_percent)
    }
}

/// The last simulated soil sensor reading of one interactive session.
///
/// Owned by whoever drives the session and handed to the budget engine by
/// reference; nothing else holds on to it.
#[derive(Debug, Clone, Default)]
pub struct SensorSession {
    last: Option<SensorReading>,
}

impl SensorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&SensorReading> {
        self.last.as_ref()
    }

    /// Take a new simulated reading, replacing the previous one.
    pub fn simulate<R: Rng>(&mut self, rng: &mut R) -> SensorReading {
        let percent = rng.gen_range(SIMULATED_MIN_PERCENT..=SIMULATED_MAX_PERCENT);
        let reading = SensorReading::new((percent * 10.0).round() / 10.0);
        tracing::debug!(
            moisture_percent = reading.moisture_percent,
            level = %reading.level(),
            "simulated soil sensor reading"
        );
        self.last = Some(reading);
        reading
    }
}
