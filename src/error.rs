//! Crate-wide error type.

use crate::validation::ValidationError;

/// Errors that abort a timetabling run before or during initialization.
///
/// Once a population of correctly sized genomes exists the evolutionary
/// loop has no recoverable errors; everything here is detected up front.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    /// The configuration failed structural validation.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// The GA parameters are inconsistent.
    #[error("invalid GA configuration: {0}")]
    InvalidGaConfig(String),

    /// A genome does not cover the section × day × time grid exactly.
    #[error("genome has {actual} genes, expected {expected}")]
    GenomeLength { expected: usize, actual: usize },

    /// A gene's coordinates do not match its position in the genome.
    #[error("gene at index {index} is not in canonical (section, day, time) order")]
    MisplacedGene { index: usize },

    /// A gene names a subject, teacher, or room the problem does not have.
    #[error("gene at index {index} references an unknown subject, teacher, or room")]
    UnknownReference { index: usize },

    /// A penalty weight is zero or negative.
    #[error("invalid penalty weights: {0}")]
    InvalidPenaltyWeights(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
