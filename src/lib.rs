//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use output::report::{RankingReport, ScoredResult};
pub use processing::engine::{rank_resumes, ScreeningEngine};
