use crate::config::FarmConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agriwater", version, about = "Farm water budget and irrigation advisory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the terminal dashboard (default)
    Dashboard,
    /// Compute the water budget and advisories once
    Budget(BudgetArgs),
    /// Ask the assistant about the configured farm
    Ask(AskArgs),
    /// Show season guidance
    Season {
        /// Kharif or Rabi
        season: String,
    },
    /// Validate config and load reference data
    Check,
    /// Re-run interactive setup
    Init,
}

/// Overrides for the configured farm.
#[derive(Args, Debug, Default)]
pub struct FarmArgs {
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub crop: Option<String>,
    /// Kharif or Rabi
    #[arg(long)]
    pub season: Option<String>,
    /// Farm area in hectares
    #[arg(long)]
    pub area: Option<f64>,
    /// Flood, Sprinkler or Drip
    #[arg(long)]
    pub irrigation: Option<String>,
    /// Low, Medium, High or district
    #[arg(long)]
    pub groundwater: Option<String>,
    /// Low, Medium or High
    #[arg(long)]
    pub soil_moisture: Option<String>,
}

impl FarmArgs {
    /// Overwrite the configured farm with any flags given.
    pub fn apply(&self, farm: &mut FarmConfig) {
        let text_fields = [
            (&self.district, &mut farm.district),
            (&self.crop, &mut farm.crop),
            (&self.season, &mut farm.season),
            (&self.irrigation, &mut farm.irrigation),
            (&self.groundwater, &mut farm.groundwater),
            (&self.soil_moisture, &mut farm.soil_moisture),
        ];
        for (flag, field) in text_fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if let Some(area) = self.area {
            farm.area_hectares = area;
        }
    }
}

#[derive(Args, Debug)]
pub struct BudgetArgs {
    #[command(flatten)]
    pub farm: FarmArgs,

    /// Classification policy: margin or viability
    #[arg(long)]
    pub policy: Option<String>,

    /// Upper bound of the BALANCED band in m³ (margin policy)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Take a simulated soil sensor reading and use it for soil moisture
    #[arg(long)]
    pub simulate_sensor: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question text; omit to use --voice or get the input prompt
    pub question: Option<String>,

    /// Treat the request as voice input
    #[arg(long)]
    pub voice: bool,

    /// English or Hindi
    #[arg(long)]
    pub language: Option<String>,

    /// Also print the advisories for the topics the question mentions
    #[arg(long)]
    pub details: bool,

    #[command(flatten)]
    pub farm: FarmArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["agriwater"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn budget_flags_parse() {
        let cli = Cli::try_parse_from([
            "agriwater",
            "-vv",
            "budget",
            "--crop",
            "Rice",
            "--area",
            "2.5",
            "--soil-moisture",
            "low",
            "--policy",
            "viability",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Budget(args)) => {
                assert_eq!(args.farm.crop.as_deref(), Some("Rice"));
                assert_eq!(args.farm.area, Some(2.5));
                assert_eq!(args.farm.soil_moisture.as_deref(), Some("low"));
                assert_eq!(args.policy.as_deref(), Some("viability"));
                assert!(args.json);
                assert!(!args.simulate_sensor);
            }
            _ => panic!("expected budget command"),
        }
    }

    #[test]
    fn farm_flags_override_config() {
        let args = FarmArgs {
            crop: Some("Rice".into()),
            area: Some(3.0),
            ..FarmArgs::default()
        };
        let mut farm = FarmConfig::default();
        args.apply(&mut farm);
        assert_eq!(farm.crop, "Rice");
        assert_eq!(farm.area_hectares, 3.0);
        assert_eq!(farm.district, "Indore");
    }

    #[test]
    fn ask_takes_optional_question() {
        let cli = Cli::try_parse_from(["agriwater", "ask", "--voice"]).unwrap();
        match cli.command {
            Some(Commands::Ask(args)) => {
                assert!(args.question.is_none());
                assert!(args.voice);
                assert!(!args.details);
            }
            _ => panic!("expected ask command"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["agriwater", "check", "--config", "farm.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("farm.yaml")));
    }
}
