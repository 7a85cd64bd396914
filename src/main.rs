mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;
mod ui;

use app::{App, FarmField, Screen};
use clap::Parser;
use cli::{AskArgs, BudgetArgs, Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::Result;
use logic::{compute_water_budget, respond, AdvisoryEngine, AssistantQuery, WaterBudgetEngine};
use models::{Language, Season, SeasonInfo, SensorSession};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::BudgetReport;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::screens::{AssistantScreen, BudgetScreen, FarmScreen, SeasonScreen};

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => run_dashboard(cli.config),
        Commands::Budget(args) => run_budget(cli.config, args),
        Commands::Ask(args) => run_ask(cli.config, args),
        Commands::Season { season } => run_season(&season),
        Commands::Check => run_check(cli.config),
        Commands::Init => Config::setup_interactive().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_budget(config_path: Option<PathBuf>, args: BudgetArgs) -> Result<()> {
    let mut config = Config::load(config_path)?;
    args.farm.apply(&mut config.farm);
    if let Some(policy) = args.policy {
        config.policy.classification = policy;
    }
    if let Some(margin) = args.margin {
        config.policy.margin_m3 = margin;
    }

    let input = config.to_farm_input()?;
    let policy = config.budget_policy()?;
    let refs = datasources::load_reference_data(&config)?;
    let engine = WaterBudgetEngine::new(refs, policy)?;

    let mut sensor = SensorSession::new();
    if args.simulate_sensor {
        let reading = sensor.simulate(&mut rand::thread_rng());
        if !args.json {
            println!(
                "Sensor reading: {:.1}% soil moisture ({})",
                reading.moisture_percent,
                reading.level()
            );
        }
    }

    let result = engine.evaluate(&input, sensor.last())?;
    let advisories = AdvisoryEngine::new().evaluate(&result, &input);
    let report = BudgetReport {
        input: &input,
        policy: engine.policy().classification.as_str(),
        result: &result,
        advisories: &advisories,
        season: SeasonInfo::for_season(input.season),
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn run_ask(config_path: Option<PathBuf>, args: AskArgs) -> Result<()> {
    let mut config = Config::load(config_path)?;
    args.farm.apply(&mut config.farm);

    let language = match &args.language {
        Some(l) => Language::parse(l)?,
        None => config.assistant.language()?,
    };
    let input = config.to_farm_input()?;
    let refs = datasources::load_reference_data(&config)?;
    let result = compute_water_budget(&input, &refs, &config.budget_policy()?, None)?;

    let query = AssistantQuery {
        text: args.question,
        voice: args.voice,
        language,
    };
    let reply = respond(&query, &result, &input);
    println!("{}", reply.text);

    if args.details {
        let advisories = AdvisoryEngine::new();
        println!();
        for category in &reply.categories {
            for advisory in advisories.evaluate_category(*category, &result, &input) {
                print!("{}", report::advisory_text(&advisory));
            }
        }
    }
    Ok(())
}

fn run_season(season: &str) -> Result<()> {
    let season = Season::parse(season)?;
    print!("{}", report::season_text(SeasonInfo::for_season(season)));
    Ok(())
}

fn run_check(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("Config OK");

    let input = config.to_farm_input()?;
    let policy = config.budget_policy()?;
    let language = config.assistant.language()?;
    println!(
        "  Farm: {} | {} ({}) | {} ha | {} | groundwater {} | soil {}",
        input.district,
        input.crop,
        input.season,
        input.area_hectares,
        input.irrigation,
        input.groundwater,
        input.soil_moisture
    );
    println!(
        "  Policy: {} | Assistant: {}",
        policy.classification.as_str(),
        language
    );

    let refs = datasources::load_reference_data(&config)?;
    println!("  Rainfall: {} ({})", refs.rainfall.describe(), config.data.rainfall_mode.as_str());
    match &refs.groundwater.statuses {
        Some(statuses) => println!("  Groundwater: {} district statuses", statuses.len()),
        None => match &refs.groundwater.unavailable_reason {
            Some(reason) => println!("  Groundwater: OFFLINE ({})", reason),
            None => println!("  Groundwater: levels only"),
        },
    }
    println!("  Crops: {}", refs.crops.names().join(", "));
    let rules: Vec<&str> = AdvisoryEngine::new()
        .list_rules()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    println!("  Advisory rules: {}", rules.join(", "));

    let engine = WaterBudgetEngine::new(refs, policy)?;
    let result = engine.evaluate(&input, None)?;
    if result.warnings.is_empty() {
        println!("Budget OK: {}", result.status.label());
    } else {
        println!("Budget computed with warnings:");
        for warning in &result.warnings {
            println!("  ⚠ {}", warning);
        }
    }
    Ok(())
}

fn run_dashboard(config_path: Option<PathBuf>) -> Result<()> {
    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `agriwater init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };

    let refs = datasources::load_reference_data(&config)?;
    let mut app = App::new(&config, refs)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut rng = rand::thread_rng();

    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Budget => {
                    let screen =
                        BudgetScreen::new(&app.input, app.result.as_ref(), &app.advisories)
                            .with_error(app.error.as_deref())
                            .with_sensor(app.sensor.last(), app.use_sensor)
                            .with_policy(app.engine.policy().classification.as_str())
                            .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Assistant => {
                    let screen = AssistantScreen::new(&app.assistant_state, app.analyzing_text())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Season => {
                    let screen = SeasonScreen::new(app.input.season, &app.input.crop);
                    f.render_widget(screen, area);
                }
                Screen::Farm => {
                    let values: Vec<(FarmField, String)> = FarmField::all()
                        .iter()
                        .map(|field| (*field, app.field_value(*field)))
                        .collect();
                    let districts = app.engine.reference().rainfall.districts();
                    let crops = app.engine.reference().crops.names();
                    let screen = FarmScreen::new(values)
                        .with_focus(app.farm_state.focused_field)
                        .editing(app.farm_state.editing, &app.farm_state.edit_buffer)
                        .with_options(&districts, &crops);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Poll so a pending assistant answer is released without a keypress
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.quit();
                        }
                        KeyCode::Char('q') if !app.is_typing() => {
                            app.quit();
                        }
                        KeyCode::Esc if !app.is_typing() => {
                            app.switch_screen(Screen::Budget);
                        }
                        KeyCode::Char(c) if !app.is_typing() => {
                            if let Some(screen) = Screen::from_key(c) {
                                app.switch_screen(screen);
                            } else {
                                match c {
                                    'm' => app.simulate_sensor(&mut rng),
                                    'u' => app.toggle_sensor(),
                                    'p' => app.toggle_policy(),
                                    _ => handle_screen_input(app, key.code),
                                }
                            }
                        }
                        _ => handle_screen_input(app, key.code),
                    }
                }
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Budget | Screen::Season => {}
        Screen::Assistant => handle_assistant_input(app, code),
        Screen::Farm => handle_farm_input(app, code),
    }
}

fn handle_assistant_input(app: &mut App, code: KeyCode) {
    if app.assistant_state.typing {
        match code {
            KeyCode::Esc => {
                app.assistant_state.typing = false;
                app.assistant_state.input.clear();
            }
            KeyCode::Enter => app.ask_text(),
            KeyCode::Backspace => {
                app.assistant_state.input.pop();
            }
            KeyCode::Char(c) => app.assistant_state.input.push(c),
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('i') => app.assistant_state.typing = true,
            KeyCode::Char('v') => app.ask_voice(),
            KeyCode::Char('l') => app.toggle_language(),
            KeyCode::Enter => app.ask_text(),
            _ => {}
        }
    }
}

fn handle_farm_input(app: &mut App, code: KeyCode) {
    if app.farm_state.editing {
        match code {
            KeyCode::Esc => app.farm_state.cancel_editing(),
            KeyCode::Enter => app.finish_area_edit(),
            KeyCode::Backspace => {
                app.farm_state.edit_buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                app.farm_state.edit_buffer.push(c);
            }
            _ => {}
        }
    } else {
        match code {
            KeyCode::Up => app.farm_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.farm_state.next_field(),
            KeyCode::Left => app.cycle_field(false),
            KeyCode::Right => app.cycle_field(true),
            KeyCode::Enter if app.farm_state.focused_field == FarmField::Area => {
                app.start_area_edit();
            }
            _ => {}
        }
    }
}
