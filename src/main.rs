use eight_puzzle::board::Board;
use eight_puzzle::common::Move;
use eight_puzzle::config::{Cli, Config};
use eight_puzzle::scenario::Scenario;
use eight_puzzle::solver::{Solver, StrategySolver};
use eight_puzzle::stat::{RunRecord, StrategySummary};

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    };
    let config = file_config.override_from_command_line(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }

    let scenarios = collect_scenarios(&config)?;
    let mut records = Vec::new();

    for scenario in &scenarios {
        let initial = match scenario.state() {
            Ok(initial) => initial,
            Err(err) => {
                error!("scenario {:?}: {err}", scenario.name);
                continue;
            }
        };
        if !initial.is_solvable() {
            warn!("scenario {:?} is unsolvable, skipping", scenario.name);
            continue;
        }

        for &strategy in &config.strategies {
            let mut solver = StrategySolver::new(strategy, initial);
            let outcome = solver.solve();
            let moves = outcome.moves();

            if outcome.is_solved() {
                let mut board = Board::from_state(initial);
                if !board.replay(&moves) || !board.is_goal() {
                    bail!(
                        "{strategy} returned a move sequence that does not solve {:?}",
                        scenario.name
                    );
                }
                if config.show_moves {
                    print_replay(&scenario.name, initial.into(), &moves);
                }
            }

            records.push(RunRecord::new(
                scenario.name.as_str(),
                strategy,
                &outcome,
                solver.stats().clone(),
            ));
        }
    }

    println!("{}", RunRecord::table_header());
    for record in &records {
        println!("{}", record.table_row());
    }

    let summaries = StrategySummary::from_records(&records);
    println!("\n{}", StrategySummary::table_header());
    for summary in &summaries {
        println!("{}", summary.table_row());
    }

    println!("\nranking by time:");
    for (rank, summary) in StrategySummary::ranking_by_time(&summaries)
        .into_iter()
        .enumerate()
    {
        println!("  {}. {} {} us", rank + 1, summary.strategy, summary.total_time_us);
    }

    if let Some(output_path) = &config.output_path {
        RunRecord::write_json_lines(output_path, &records)?;
        info!("Wrote {} results to {output_path}", records.len());
    }

    Ok(())
}

fn collect_scenarios(config: &Config) -> anyhow::Result<Vec<Scenario>> {
    let mut scenarios = if let Some(state) = config.state {
        vec![Scenario::new("custom", state.cells())]
    } else if let Some(scenario_path) = &config.scenario_path {
        Scenario::load_from_yaml(scenario_path)?
    } else {
        Scenario::reference_set()
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    scenarios.extend(Scenario::generate_randomly(
        config.num_random,
        config.shuffle_moves,
        &mut rng,
    ));
    Ok(scenarios)
}

fn print_replay(name: &str, mut board: Board, moves: &[Move]) {
    println!("{name}:\n{board}\n");
    for &mv in moves {
        board.apply(mv);
        println!("{mv}\n{board}\n");
    }
}
