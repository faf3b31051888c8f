use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::board::Board;
use crate::common::{State, StateError};

/// A named starting configuration. Tiles stay raw so that malformed entries in
/// a scenario file are reported per scenario instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub tiles: Vec<u8>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, tiles: &[u8]) -> Self {
        Scenario {
            name: name.into(),
            tiles: tiles.to_vec(),
        }
    }

    pub fn state(&self) -> Result<State, StateError> {
        State::try_from(self.tiles.as_slice())
    }

    /// Fixed cases ranging from solved to the 31-move worst case, plus one
    /// unsolvable arrangement.
    pub fn reference_set() -> Vec<Scenario> {
        vec![
            Scenario::new("solved", &[1, 2, 3, 4, 5, 6, 7, 8, 0]),
            Scenario::new("two moves", &[1, 2, 3, 4, 5, 6, 0, 7, 8]),
            Scenario::new("four moves", &[1, 2, 3, 5, 0, 6, 4, 7, 8]),
            Scenario::new("six moves", &[2, 5, 3, 1, 0, 6, 4, 7, 8]),
            Scenario::new("thirty-one moves", &[8, 6, 7, 2, 5, 4, 3, 0, 1]),
            Scenario::new("odd parity", &[1, 2, 3, 4, 5, 6, 8, 7, 0]),
        ]
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Vec<Scenario>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_from_yaml(path: &str) -> Result<Vec<Scenario>> {
        let file = File::open(path).with_context(|| format!("cannot open scenario file {path}"))?;
        let reader = BufReader::new(file);
        let scenarios = serde_yaml::from_reader(reader)
            .with_context(|| format!("cannot parse scenario file {path}"))?;
        Ok(scenarios)
    }

    pub fn write_to_yaml(path: &str, scenarios: &[Scenario]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(scenarios)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }

    /// Shuffle the goal board `shuffle_moves` times per scenario; always solvable.
    pub fn generate_randomly<R: Rng + ?Sized>(
        num_scenarios: usize,
        shuffle_moves: usize,
        rng: &mut R,
    ) -> Vec<Scenario> {
        let scenarios: Vec<Scenario> = (0..num_scenarios)
            .map(|idx| {
                let mut board = Board::new();
                board.shuffle(shuffle_moves, rng);
                Scenario::new(
                    format!("random-{idx}"),
                    board.current_state().cells().as_slice(),
                )
            })
            .collect();

        info!("Generate scenarios: {scenarios:?}");
        scenarios
    }
}
