use crate::algorithm::SearchOutcome;
use crate::common::{Move, State};
use crate::solver::Strategy;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

/// Metrics of one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Frontier pops, including ones skipped as already explored.
    pub visited_nodes: usize,
    /// Size of the explored set at termination.
    pub explored_states: usize,
    pub max_frontier: usize,
    /// `None` when no solution was found.
    pub solution_depth: Option<usize>,
    pub time_us: usize,
    /// Expanded states without any legal move.
    pub dead_ends: Vec<State>,
}

impl Stats {
    pub(crate) fn print(&self, label: &str) {
        info!(
            "{label}: depth {:?} visited {} explored {} max frontier {} time(microseconds) {}",
            self.solution_depth,
            self.visited_nodes,
            self.explored_states,
            self.max_frontier,
            self.time_us
        );
    }
}

/// One strategy run over one scenario, as reported by the harness.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub scenario: String,
    pub strategy: Strategy,
    pub outcome: &'static str,
    /// Depth of the repeated node when Greedy stopped on a cycle.
    pub cycle_depth: Option<usize>,
    pub moves: Vec<Move>,
    pub stats: Stats,
}

impl RunRecord {
    pub fn new(
        scenario: impl Into<String>,
        strategy: Strategy,
        outcome: &SearchOutcome,
        stats: Stats,
    ) -> Self {
        let cycle_depth = match outcome {
            SearchOutcome::CycleDetected { depth } => Some(*depth),
            _ => None,
        };
        RunRecord {
            scenario: scenario.into(),
            strategy,
            outcome: outcome.label(),
            cycle_depth,
            moves: outcome.moves(),
            stats,
        }
    }

    fn outcome_cell(&self) -> String {
        match self.cycle_depth {
            Some(depth) => format!("{}@{depth}", self.outcome),
            None => self.outcome.to_string(),
        }
    }

    pub fn table_header() -> String {
        format!(
            "{:<28} {:<8} {:<10} {:>6} {:>10} {:>10} {:>10} {:>12}",
            "scenario", "strategy", "outcome", "depth", "visited", "explored", "frontier", "time(us)"
        )
    }

    pub fn table_row(&self) -> String {
        let depth = self
            .stats
            .solution_depth
            .map_or_else(|| "-".to_string(), |depth| depth.to_string());
        format!(
            "{:<28} {:<8} {:<10} {:>6} {:>10} {:>10} {:>10} {:>12}",
            self.scenario,
            self.strategy.name(),
            self.outcome_cell(),
            depth,
            self.stats.visited_nodes,
            self.stats.explored_states,
            self.stats.max_frontier,
            self.stats.time_us
        )
    }

    /// Write one JSON object per line.
    pub fn write_json_lines(path: &str, records: &[RunRecord]) -> Result<()> {
        let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Per-strategy averages over the solved runs of one harness invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub runs: usize,
    pub solved: usize,
    pub total_time_us: usize,
    pub avg_depth: f64,
    pub avg_visited: f64,
    pub avg_explored: f64,
    /// Visited nodes per solution move, over all solved runs.
    pub nodes_per_move: f64,
}

impl StrategySummary {
    /// One summary per strategy, in the order strategies first appear.
    pub fn from_records(records: &[RunRecord]) -> Vec<StrategySummary> {
        let mut strategies: Vec<Strategy> = Vec::new();
        for record in records {
            if !strategies.contains(&record.strategy) {
                strategies.push(record.strategy);
            }
        }

        strategies
            .into_iter()
            .map(|strategy| {
                let runs: Vec<&RunRecord> = records
                    .iter()
                    .filter(|record| record.strategy == strategy)
                    .collect();
                let solved: Vec<&Stats> = runs
                    .iter()
                    .filter(|record| record.stats.solution_depth.is_some())
                    .map(|record| &record.stats)
                    .collect();

                let total_moves: usize = solved.iter().filter_map(|s| s.solution_depth).sum();
                let total_visited: usize = solved.iter().map(|s| s.visited_nodes).sum();
                let total_explored: usize = solved.iter().map(|s| s.explored_states).sum();
                let average = |total: usize| {
                    if solved.is_empty() {
                        0.0
                    } else {
                        total as f64 / solved.len() as f64
                    }
                };

                StrategySummary {
                    strategy,
                    runs: runs.len(),
                    solved: solved.len(),
                    total_time_us: runs.iter().map(|record| record.stats.time_us).sum(),
                    avg_depth: average(total_moves),
                    avg_visited: average(total_visited),
                    avg_explored: average(total_explored),
                    nodes_per_move: total_visited as f64 / total_moves.max(1) as f64,
                }
            })
            .collect()
    }

    /// Strategies that solved at least one run, fastest total time first.
    pub fn ranking_by_time(summaries: &[StrategySummary]) -> Vec<&StrategySummary> {
        let mut ranking: Vec<_> = summaries.iter().filter(|s| s.solved > 0).collect();
        ranking.sort_by_key(|s| s.total_time_us);
        ranking
    }

    pub fn table_header() -> String {
        format!(
            "{:<8} {:>8} {:>10} {:>12} {:>12} {:>10} {:>12}",
            "strategy", "solved", "avg depth", "avg visited", "avg explored", "nodes/move", "time(us)"
        )
    }

    pub fn table_row(&self) -> String {
        format!(
            "{:<8} {:>8} {:>10.1} {:>12.1} {:>12.1} {:>10.1} {:>12}",
            self.strategy.name(),
            format!("{}/{}", self.solved, self.runs),
            self.avg_depth,
            self.avg_visited,
            self.avg_explored,
            self.nodes_per_move,
            self.total_time_us
        )
    }
}
