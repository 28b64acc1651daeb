//! Genetic algorithm over timetable genomes.
//!
//! Evolves a population of seeded genomes under the penalty-based fitness
//! of [`crate::fitness`]. Higher scores are better; 0 means no violations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best timetable with run statistics
//! - [`Candidate`]: A genome with its score
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and single-gene mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::Candidate;
