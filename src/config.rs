use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;
use std::str::FromStr;
use tracing::Level;

use crate::common::State;
use crate::solver::Strategy;

#[derive(Parser, Debug)]
#[command(
    name = "Rust 8-Puzzle",
    about = "Uninformed and heuristic search strategies for the 8-puzzle.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the YAML scenario file")]
    pub scenario_path: Option<String>,

    #[arg(
        long,
        help = "Solve a single state instead of the scenarios, e.g. \"1,2,3,4,5,6,0,7,8\""
    )]
    pub state: Option<String>,

    #[arg(
        long,
        value_enum,
        use_value_delimiter = true,
        help = "Strategies to run"
    )]
    pub strategies: Vec<Strategy>,

    #[arg(long, help = "Number of random scenarios to add")]
    pub num_random: Option<usize>,

    #[arg(long, help = "Random blank moves used to build each random scenario")]
    pub shuffle_moves: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Path to the JSON lines output file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Print the board after every solution move", default_value_t = false)]
    pub show_moves: bool,

    #[arg(long, help = "Log level (error, warn, info, debug, trace)")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scenario_path: Option<String>,
    pub state: Option<State>,
    pub strategies: Vec<Strategy>,
    pub num_random: usize,
    pub shuffle_moves: usize,
    pub seed: u64,
    pub output_path: Option<String>,
    pub show_moves: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scenario_path: None,
            state: None,
            strategies: Strategy::ALL.to_vec(),
            num_random: 0,
            shuffle_moves: 30,
            seed: 0,
            output_path: None,
            show_moves: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit command line flags win over the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(scenario_path) = &cli.scenario_path {
            self.scenario_path = Some(scenario_path.clone());
        }
        if let Some(state) = &cli.state {
            self.state = Some(
                state
                    .parse::<State>()
                    .with_context(|| format!("invalid --state {state:?}"))?,
            );
        }
        if !cli.strategies.is_empty() {
            self.strategies = cli.strategies.clone();
        }
        if let Some(num_random) = cli.num_random {
            self.num_random = num_random;
        }
        if let Some(shuffle_moves) = cli.shuffle_moves {
            self.shuffle_moves = shuffle_moves;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        if cli.show_moves {
            self.show_moves = true;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.strategies.is_empty() {
            return Err(anyhow!("At least one strategy must be selected"));
        }

        if self.num_random > 0 && self.shuffle_moves == 0 {
            return Err(anyhow!(
                "Random scenarios need shuffle moves greater than 0, got {}",
                self.shuffle_moves
            ));
        }

        Level::from_str(&self.log_level)
            .map_err(|_| anyhow!("Unknown log level {:?}", self.log_level))?;

        Ok(())
    }
}
