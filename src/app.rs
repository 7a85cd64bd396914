use crate::config::Config;
use crate::error::Result;
use crate::logic::messages;
use crate::logic::{
    respond, AdvisoryEngine, AssistantQuery, AssistantReply, ClassificationPolicy,
    WaterBudgetEngine,
};
use crate::models::{
    Advisory, FarmInput, GroundwaterInput, GroundwaterLevel, IrrigationMethod, Language,
    ReferenceData, Season, SensorSession, SoilMoisture, WaterBudgetResult,
};
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Budget,
    Assistant,
    Season,
    Farm,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Budget),
            '2' => Some(Screen::Assistant),
            '3' => Some(Screen::Season),
            'f' | 'F' => Some(Screen::Farm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmField {
    District,
    Crop,
    Season,
    Area,
    Irrigation,
    Groundwater,
    SoilMoisture,
}

impl FarmField {
    pub fn all() -> &'static [FarmField] {
        &[
            FarmField::District,
            FarmField::Crop,
            FarmField::Season,
            FarmField::Area,
            FarmField::Irrigation,
            FarmField::Groundwater,
            FarmField::SoilMoisture,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FarmField::District => "District",
            FarmField::Crop => "Crop",
            FarmField::Season => "Season",
            FarmField::Area => "Farm Area (hectares)",
            FarmField::Irrigation => "Irrigation Method",
            FarmField::Groundwater => "Groundwater",
            FarmField::SoilMoisture => "Soil Moisture",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

pub struct FarmFormState {
    pub focused_field: FarmField,
    pub editing: bool,
    pub edit_buffer: String,
}

impl FarmFormState {
    pub fn new() -> Self {
        Self {
            focused_field: FarmField::District,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.edit_buffer)
    }
}

/// A question waiting out the configured "analyzing" delay.
pub struct PendingQuery {
    pub query: AssistantQuery,
    pub ready_at: Instant,
}

pub struct AssistantState {
    pub language: Language,
    pub typing: bool,
    pub input: String,
    pub reply: Option<AssistantReply>,
    pub pending: Option<PendingQuery>,
}

impl AssistantState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            typing: false,
            input: String::new(),
            reply: None,
            pending: None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,

    // Request
    pub input: FarmInput,
    pub sensor: SensorSession,
    pub use_sensor: bool,

    // Results
    pub result: Option<WaterBudgetResult>,
    pub advisories: Vec<Advisory>,
    pub error: Option<String>,

    // Screen states
    pub farm_state: FarmFormState,
    pub assistant_state: AssistantState,

    // Services
    pub engine: WaterBudgetEngine,
    pub advisory_engine: AdvisoryEngine,

    // UI state
    pub status_message: Option<String>,
    response_delay: Duration,
    margin_m3: f64,
}

impl App {
    pub fn new(config: &Config, refs: ReferenceData) -> Result<Self> {
        let policy = config.budget_policy()?;
        let engine = WaterBudgetEngine::new(refs, policy)?;

        let mut app = Self {
            screen: Screen::Budget,
            should_quit: false,
            input: config.to_farm_input()?,
            sensor: SensorSession::new(),
            use_sensor: false,
            result: None,
            advisories: Vec::new(),
            error: None,
            farm_state: FarmFormState::new(),
            assistant_state: AssistantState::new(config.assistant.language()?),
            engine,
            advisory_engine: AdvisoryEngine::new(),
            status_message: None,
            response_delay: Duration::from_millis(config.assistant.response_delay_ms),
            margin_m3: config.policy.margin_m3,
        };
        app.recompute();
        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// True while a text field is capturing keystrokes.
    pub fn is_typing(&self) -> bool {
        self.farm_state.editing || self.assistant_state.typing
    }

    /// Re-run the budget and advisories for the current request.
    pub fn recompute(&mut self) {
        let sensor = if self.use_sensor {
            self.sensor.last()
        } else {
            None
        };

        match self.engine.evaluate(&self.input, sensor) {
            Ok(result) => {
                self.advisories = self.advisory_engine.evaluate(&result, &self.input);
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                tracing::debug!("budget evaluation failed: {}", e);
                self.result = None;
                self.advisories.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn simulate_sensor<R: Rng>(&mut self, rng: &mut R) {
        let reading = self.sensor.simulate(rng);
        self.use_sensor = true;
        self.set_status(&format!(
            "Sensor reading {:.1}% ({} moisture)",
            reading.moisture_percent,
            reading.level()
        ));
        self.recompute();
    }

    pub fn toggle_sensor(&mut self) {
        if self.sensor.last().is_none() {
            self.set_status("No sensor reading yet - press [m] to take one");
            return;
        }
        self.use_sensor = !self.use_sensor;
        let message = if self.use_sensor {
            "Using sensor reading for soil moisture"
        } else {
            "Using selected soil moisture"
        };
        self.set_status(message);
        self.recompute();
    }

    pub fn toggle_policy(&mut self) {
        let next = match self.engine.policy().classification {
            ClassificationPolicy::Margin { .. } => ClassificationPolicy::Viability,
            ClassificationPolicy::Viability => ClassificationPolicy::Margin {
                margin_m3: self.margin_m3,
            },
        };
        match self.engine.set_classification(next) {
            Ok(()) => {
                self.set_status(&format!("Classification policy: {}", next.as_str()));
                self.recompute();
            }
            Err(e) => self.set_status(&e.to_string()),
        }
    }

    pub fn field_value(&self, field: FarmField) -> String {
        match field {
            FarmField::District => self.input.district.clone(),
            FarmField::Crop => self.input.crop.clone(),
            FarmField::Season => self.input.season.to_string(),
            FarmField::Area => format!("{}", self.input.area_hectares),
            FarmField::Irrigation => self.input.irrigation.to_string(),
            FarmField::Groundwater => self.input.groundwater.to_string(),
            FarmField::SoilMoisture => self.input.soil_moisture.to_string(),
        }
    }

    /// Step the focused field through its options.
    pub fn cycle_field(&mut self, forward: bool) {
        let field = self.farm_state.focused_field;
        let refs = self.engine.reference();
        match field {
            FarmField::District => {
                let names = refs.rainfall.districts();
                if let Some(name) = cycle_name(&names, &self.input.district, forward) {
                    self.input.district = name;
                }
            }
            FarmField::Crop => {
                let names = refs.crops.names();
                if let Some(name) = cycle_name(&names, &self.input.crop, forward) {
                    self.input.crop = name;
                }
            }
            FarmField::Season => {
                self.input.season = cycle(Season::ALL, &self.input.season, forward);
            }
            FarmField::Irrigation => {
                self.input.irrigation = cycle(IrrigationMethod::ALL, &self.input.irrigation, forward);
            }
            FarmField::Groundwater => {
                let mut options: Vec<GroundwaterInput> = GroundwaterLevel::ALL
                    .iter()
                    .map(|level| GroundwaterInput::Level(*level))
                    .collect();
                if refs.groundwater.statuses.is_some() {
                    options.push(GroundwaterInput::DistrictStatus);
                }
                self.input.groundwater = cycle(&options, &self.input.groundwater, forward);
            }
            FarmField::SoilMoisture => {
                self.input.soil_moisture =
                    cycle(SoilMoisture::ALL, &self.input.soil_moisture, forward);
            }
            FarmField::Area => return,
        }
        self.recompute();
    }

    pub fn start_area_edit(&mut self) {
        let current = self.field_value(FarmField::Area);
        self.farm_state.start_editing(&current);
    }

    pub fn finish_area_edit(&mut self) {
        let value = self.farm_state.finish_editing();
        match value.trim().parse::<f64>() {
            Ok(area) => {
                self.input.area_hectares = area;
                self.recompute();
            }
            Err(_) => self.set_status(&format!("'{}' is not a number of hectares", value.trim())),
        }
    }

    pub fn toggle_language(&mut self) {
        let current = self.assistant_state.language;
        self.assistant_state.language = cycle(Language::ALL, &current, true);
    }

    /// Submit typed text (or nothing) to the assistant.
    pub fn ask_text(&mut self) {
        self.assistant_state.typing = false;
        let text = std::mem::take(&mut self.assistant_state.input);
        let query = AssistantQuery::text(text, self.assistant_state.language);
        self.ask(query, Instant::now());
    }

    pub fn ask_voice(&mut self) {
        let query = AssistantQuery::voice(self.assistant_state.language);
        self.ask(query, Instant::now());
    }

    pub fn ask(&mut self, query: AssistantQuery, now: Instant) {
        if self.response_delay.is_zero() {
            self.answer(&query);
        } else {
            self.assistant_state.reply = None;
            self.assistant_state.pending = Some(PendingQuery {
                query,
                ready_at: now + self.response_delay,
            });
        }
    }

    /// Release a pending assistant answer once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let ready = matches!(&self.assistant_state.pending, Some(p) if now >= p.ready_at);
        if ready {
            if let Some(pending) = self.assistant_state.pending.take() {
                self.answer(&pending.query);
            }
        }
    }

    fn answer(&mut self, query: &AssistantQuery) {
        match &self.result {
            Some(result) => {
                self.assistant_state.reply = Some(respond(query, result, &self.input));
            }
            None => {
                let reason = self.error.clone().unwrap_or_default();
                self.set_status(&format!("Cannot answer: {}", reason));
            }
        }
    }

    pub fn analyzing_text(&self) -> &'static str {
        messages::ANALYZING.get(self.assistant_state.language)
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    match options.iter().position(|o| o == current) {
        Some(idx) if forward => options[(idx + 1) % len],
        Some(idx) => options[(idx + len - 1) % len],
        None => options.first().copied().unwrap_or(*current),
    }
}

fn cycle_name(names: &[String], current: &str, forward: bool) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let len = names.len();
    let idx = names
        .iter()
        .position(|n| n.eq_ignore_ascii_case(current.trim()));
    let next = match idx {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    Some(names[next].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> App {
        App::new(&Config::default(), ReferenceData::default()).unwrap()
    }

    #[test]
    fn starts_with_computed_budget() {
        let app = app();
        let result = app.result.as_ref().unwrap();
        // Indore, Wheat, Drip, Medium groundwater, High moisture
        assert!((result.available_m3 - 11200.0).abs() < 1e-9);
        assert!((result.adjusted_demand_m3 - 1620.0).abs() < 1e-9);
        assert_eq!(result.status, BudgetStatus::Surplus);
        assert_eq!(app.advisories.len(), 5);
    }

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('1'), Some(Screen::Budget));
        assert_eq!(Screen::from_key('2'), Some(Screen::Assistant));
        assert_eq!(Screen::from_key('3'), Some(Screen::Season));
        assert_eq!(Screen::from_key('f'), Some(Screen::Farm));
        assert_eq!(Screen::from_key('x'), None);
    }

    #[test]
    fn cycling_fields_recomputes() {
        let mut app = app();
        app.farm_state.focused_field = FarmField::Crop;
        app.cycle_field(true);
        assert_eq!(app.input.crop, "Soybean");
        app.cycle_field(false);
        app.cycle_field(false);
        assert_eq!(app.input.crop, "Rice");
        let result = app.result.as_ref().unwrap();
        assert!((result.base_demand_m3 - 7200.0).abs() < 1e-9);
    }

    #[test]
    fn groundwater_cycle_skips_district_without_dataset() {
        let mut app = app();
        app.farm_state.focused_field = FarmField::Groundwater;
        for _ in 0..3 {
            app.cycle_field(true);
            assert!(matches!(app.input.groundwater, GroundwaterInput::Level(_)));
        }
    }

    #[test]
    fn zero_area_shows_error() {
        let mut app = app();
        app.start_area_edit();
        app.farm_state.edit_buffer = "0".into();
        app.finish_area_edit();
        assert!(app.result.is_none());
        assert!(app.error.as_ref().unwrap().contains("greater than zero"));
    }

    #[test]
    fn sensor_reading_overrides_moisture_until_toggled() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(3);
        app.simulate_sensor(&mut rng);
        let level = app.sensor.last().unwrap().level();
        assert!(app.use_sensor);
        assert_eq!(app.result.as_ref().unwrap().soil_moisture, level);

        app.toggle_sensor();
        assert!(!app.use_sensor);
        assert_eq!(app.result.as_ref().unwrap().soil_moisture, SoilMoisture::High);
    }

    #[test]
    fn policy_toggle_switches_status_family() {
        let mut app = app();
        app.toggle_policy();
        assert_eq!(app.result.as_ref().unwrap().status, BudgetStatus::Safe);
        app.toggle_policy();
        assert_eq!(app.result.as_ref().unwrap().status, BudgetStatus::Surplus);
    }

    #[test]
    fn delayed_answer_waits_for_deadline() {
        let mut config = Config::default();
        config.assistant.response_delay_ms = 500;
        let mut app = App::new(&config, ReferenceData::default()).unwrap();

        let start = Instant::now();
        app.ask(AssistantQuery::voice(Language::English), start);
        assert!(app.assistant_state.is_analyzing());

        app.tick(start + Duration::from_millis(100));
        assert!(app.assistant_state.reply.is_none());

        app.tick(start + Duration::from_millis(500));
        assert!(!app.assistant_state.is_analyzing());
        assert!(app.assistant_state.reply.is_some());
    }

    #[test]
    fn immediate_answer_without_delay() {
        let mut app = app();
        app.assistant_state.input = "will it rain?".into();
        app.ask_text();
        let reply = app.assistant_state.reply.as_ref().unwrap();
        assert!(reply.text.contains("Indore"));
    }
}
