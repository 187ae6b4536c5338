mod config;
mod heuristic;
mod optimizer;
mod strategy;

pub use config::{PlannerConfig, MIN_SEARCH_RADIUS};
pub use heuristic::HeuristicScore;
pub use optimizer::{PathOptimizer, PathSearch, PlanningResult, StallCause, Termination};
pub use strategy::SearchStrategy;
