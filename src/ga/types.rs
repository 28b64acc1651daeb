//! Population member type.

use crate::fitness::Score;
use crate::models::Genome;
use crate::problem::TimetableProblem;

/// A genome together with its evaluated score.
///
/// The score is computed once, when the candidate enters the population;
/// elites carried into the next generation keep theirs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub genome: Genome,
    pub score: Score,
}

impl Candidate {
    /// Scores `genome` against `problem`.
    pub fn evaluate(problem: &TimetableProblem, genome: Genome) -> Self {
        let score = problem.evaluate(&genome);
        Self { genome, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::random::create_rng;
    use crate::seed::{GreedySeeder, Seeder};

    #[test]
    fn test_evaluate_stores_score() {
        let p = TimetableProblem::new(fixtures::small()).unwrap();
        let genome = GreedySeeder.seed(&p, &mut create_rng(4));
        let expected = p.evaluate(&genome);
        let c = Candidate::evaluate(&p, genome.clone());
        assert_eq!(c.score, expected);
        assert_eq!(c.genome, genome);
    }
}
