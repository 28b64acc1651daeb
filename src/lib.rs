//! Weekly school timetabling with a genetic algorithm.
//!
//! Assigns subjects, teachers, and rooms to the weekly time slots of
//! several class sections:
//!
//! - **Models**: [`models::Configuration`] describes days, slots, sections,
//!   subjects, and rooms; a [`models::Genome`] holds one
//!   [`models::Gene`] per (section, day, time).
//! - **Problem**: [`TimetableProblem`] validates a configuration once and
//!   exposes dense id tables to every other component.
//! - **Seeding**: [`seed::GreedySeeder`] builds complete, quota-respecting
//!   genomes with paired labs; [`seed::SolverSeeder`] takes the subject
//!   placement from an external exact solver instead.
//! - **Fitness**: [`fitness`] counts rule violations and sums weighted
//!   penalties. A clean timetable scores 0.
//! - **GA**: [`ga::GaRunner`] evolves a population with selection,
//!   single-point crossover, single-gene mutation, and elitism.
//!
//! The result is a best-effort timetable, not a proven optimum.
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{GaConfig, GaRunner};
//! use u_timetable::models::{Configuration, Room, Section, Subject};
//! use u_timetable::TimetableProblem;
//!
//! let config = Configuration::new(["Mon", "Tue"], ["9:00", "10:00"])
//!     .with_room(Room::regular("M201"))
//!     .with_room(Room::lab("AL1"))
//!     .with_section(Section::new("A", "M201"))
//!     .with_subject(Subject::new("English", 2, ["Irona"]))
//!     .with_subject(Subject::lab("Chemistry Lab", 2, ["Geetha"]));
//!
//! let problem = TimetableProblem::new(config).unwrap();
//! let ga = GaConfig::fast().with_seed(7).with_parallel(false);
//! let result = GaRunner::run(&problem, &ga).unwrap();
//!
//! assert_eq!(result.best.len(), problem.genome_len());
//! assert!(result.best_score <= 0);
//! for gene in result.best.genes() {
//!     println!("{}", problem.view(gene));
//! }
//! ```

pub mod error;
pub mod fitness;
pub mod ga;
pub mod models;
pub mod problem;
pub mod random;
pub mod seed;
pub mod validation;

pub use error::TimetableError;
pub use fitness::{PenaltyWeights, Score, Violations};
pub use problem::{GeneView, TimetableProblem};
pub use validation::{ValidationError, ValidationErrorKind};
