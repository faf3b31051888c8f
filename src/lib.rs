pub mod algorithm;
pub mod board;
pub mod common;
pub mod config;
pub mod heuristic;
pub mod scenario;
pub mod solver;
pub mod stat;
