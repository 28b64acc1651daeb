//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! seeding → evaluation → selection → crossover → mutation → elitism → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::GaConfig;
use super::operators::{mutate, single_point_crossover};
use super::types::Candidate;
use crate::error::TimetableError;
use crate::fitness::{count_violations, Score, Violations};
use crate::models::Genome;
use crate::problem::TimetableProblem;
use crate::random::create_rng;
use crate::seed::{GreedySeeder, Seeder};

/// Result of a GA run.
///
/// Contains the best timetable of the final population, along with
/// statistics about the evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Highest-scoring genome of the final population.
    pub best: Genome,

    /// Score of `best` (0 means no violations).
    pub best_score: Score,

    /// Violation breakdown of `best`.
    pub violations: Violations,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score of the population: initial first, then one entry per
    /// generation.
    pub score_history: Vec<Score>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = TimetableProblem::new(config)?;
/// let ga = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &ga)?;
/// println!("Best score: {}", result.best_score);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with greedy seeding.
    pub fn run(problem: &TimetableProblem, config: &GaConfig) -> Result<GaResult, TimetableError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with greedy seeding and an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before the next generation and return the current population's
    /// best.
    pub fn run_with_cancel(
        problem: &TimetableProblem,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, TimetableError> {
        Self::run_with_seeder(problem, config, &GreedySeeder, cancel)
    }

    /// Runs the GA with a custom seeding strategy.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::InvalidGaConfig`] if `config` fails
    ///   [`GaConfig::validate`]
    /// - [`TimetableError::GenomeLength`],
    ///   [`TimetableError::MisplacedGene`], or
    ///   [`TimetableError::UnknownReference`] if the seeder returns a genome
    ///   that does not match the problem's layout
    pub fn run_with_seeder<S: Seeder>(
        problem: &TimetableProblem,
        config: &GaConfig,
        seeder: &S,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, TimetableError> {
        config.validate().map_err(TimetableError::InvalidGaConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        tracing::info!(
            seed,
            population = config.population_size,
            generations = config.max_generations,
            genome_len = problem.genome_len(),
            "starting timetable GA"
        );

        // 1. Initialize population
        let mut genomes = Vec::with_capacity(config.population_size);
        for _ in 0..config.population_size {
            let genome = seeder.seed(problem, &mut rng);
            problem.check_layout(genome.genes())?;
            genomes.push(genome);
        }

        // 2. Evaluate initial population
        let mut population = evaluate_all(problem, genomes, config.parallel);

        // 3. Track best
        let mut best_score = population[best_index(&population)].score;
        let mut score_history = Vec::with_capacity(config.max_generations + 1);
        score_history.push(best_score);

        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Sort population by score (descending = best first)
            population.sort_by(|a, b| b.score.cmp(&a.score));

            // Elite preservation
            let mut next_gen: Vec<Candidate> = population[..config.elite_count].to_vec();

            // Generate offspring
            let needed = config.population_size - config.elite_count;
            let children = breed(problem, config, &population, needed, &mut rng);

            // Evaluate new individuals (elites are already evaluated)
            next_gen.extend(evaluate_all(problem, children, config.parallel));
            population = next_gen;
            generations = gen + 1;

            let gen_best = population[best_index(&population)].score;
            score_history.push(gen_best);
            tracing::debug!(
                generation = generations,
                best = gen_best,
                "generation complete"
            );

            if gen_best > best_score {
                best_score = gen_best;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        // 5. Best of the final population
        let winner = population.swap_remove(best_index(&population));
        let violations = count_violations(problem, &winner.genome);

        tracing::info!(
            generations,
            best = winner.score,
            violations = violations.total(),
            stagnated,
            cancelled,
            "timetable GA finished"
        );

        Ok(GaResult {
            best: winner.genome,
            best_score: winner.score,
            violations,
            generations,
            stagnated,
            cancelled,
            score_history,
        })
    }
}

/// Produces `needed` children from the current population.
fn breed<R: Rng>(
    problem: &TimetableProblem,
    config: &GaConfig,
    population: &[Candidate],
    needed: usize,
    rng: &mut R,
) -> Vec<Genome> {
    let mut children = Vec::with_capacity(needed);
    while children.len() < needed {
        let (i, j) = config.selection.select_pair(population, rng);
        let (p1, p2) = (&population[i].genome, &population[j].genome);

        let (c1, c2) = if rng.random_bool(config.crossover_rate) {
            single_point_crossover(p1, p2, rng)
        } else {
            (p1.clone(), p2.clone())
        };

        for mut child in [c1, c2] {
            if children.len() >= needed {
                break;
            }
            mutate(problem, &mut child, config.mutation_rate, rng);
            children.push(child);
        }
    }
    children
}

/// Scores a batch of genomes.
#[cfg(feature = "parallel")]
fn evaluate_all(
    problem: &TimetableProblem,
    genomes: Vec<Genome>,
    parallel: bool,
) -> Vec<Candidate> {
    use rayon::prelude::*;

    if parallel {
        genomes
            .into_par_iter()
            .map(|g| Candidate::evaluate(problem, g))
            .collect()
    } else {
        genomes
            .into_iter()
            .map(|g| Candidate::evaluate(problem, g))
            .collect()
    }
}

/// Scores a batch of genomes.
#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    problem: &TimetableProblem,
    genomes: Vec<Genome>,
    _parallel: bool,
) -> Vec<Candidate> {
    genomes
        .into_iter()
        .map(|g| Candidate::evaluate(problem, g))
        .collect()
}

/// Index of the highest-scoring candidate; ties go to the lowest index.
fn best_index(population: &[Candidate]) -> usize {
    population
        .iter()
        .enumerate()
        .fold(0, |best, (i, c)| {
            if c.score > population[best].score {
                i
            } else {
                best
            }
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::models::fixtures;

    fn small() -> TimetableProblem {
        TimetableProblem::new(fixtures::small()).unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(16)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(false)
    }

    /// Returns the same pre-built genome every time.
    struct FixedSeeder(Genome);

    impl Seeder for FixedSeeder {
        fn seed<R: Rng>(&self, _problem: &TimetableProblem, _rng: &mut R) -> Genome {
            self.0.clone()
        }
    }

    #[test]
    fn test_run_returns_valid_genome() {
        let p = small();
        let result = GaRunner::run(&p, &config()).unwrap();
        assert_eq!(result.best.len(), p.genome_len());
        assert!(p.check_layout(result.best.genes()).is_ok());
        assert_eq!(result.best_score, p.evaluate(&result.best));
        assert_eq!(result.violations, count_violations(&p, &result.best));
        assert_eq!(result.generations, 30);
        assert!(!result.stagnated);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_score_history() {
        let p = small();
        let result = GaRunner::run(&p, &config()).unwrap();

        // History should have max_generations + 1 entries (initial + each gen)
        assert_eq!(result.score_history.len(), 31);
        assert_eq!(result.score_history.last(), Some(&result.best_score));
    }

    #[test]
    fn test_elite_preservation() {
        let p = small();
        for selection in [
            Selection::Random,
            Selection::Fittest,
            Selection::Tournament(3),
        ] {
            let cfg = config()
                .with_selection(selection)
                .with_mutation_rate(0.5)
                .with_elite_count(1);
            let result = GaRunner::run(&p, &cfg).unwrap();

            // Score should never get worse across generations
            for window in result.score_history.windows(2) {
                assert!(
                    window[1] >= window[0],
                    "{selection:?}: score decreased with elitism: {} < {}",
                    window[1],
                    window[0]
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let p = small();
        let a = GaRunner::run(&p, &config()).unwrap();
        let b = GaRunner::run(&p, &config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);
    }

    #[test]
    fn test_stagnation_termination() {
        let p = TimetableProblem::new(fixtures::single_lab()).unwrap();
        let cfg = config().with_max_generations(1000).with_stagnation_limit(5);
        let result = GaRunner::run(&p, &cfg).unwrap();

        // The greedy seed is already clean, so nothing can improve on it.
        assert!(result.stagnated);
        assert_eq!(result.generations, 5);
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let p = small();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&p, &config(), Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.score_history.len(), 1);
        assert_eq!(result.best.len(), p.genome_len());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = small();
        let cfg = config().with_population_size(1);
        assert!(matches!(
            GaRunner::run(&p, &cfg),
            Err(TimetableError::InvalidGaConfig(_))
        ));
    }

    #[test]
    fn test_wrong_length_seed_rejected() {
        let p = small();
        let short = Genome::from_ordered(Vec::new());
        let result = GaRunner::run_with_seeder(&p, &config(), &FixedSeeder(short), None);
        assert_eq!(
            result.unwrap_err(),
            TimetableError::GenomeLength {
                expected: p.genome_len(),
                actual: 0
            }
        );
    }

    #[test]
    fn test_custom_seeder() {
        let p = small();
        let genome = GreedySeeder.seed(&p, &mut create_rng(8));
        let seeded_score = p.evaluate(&genome);
        let cfg = config().with_mutation_rate(0.0);
        let result =
            GaRunner::run_with_seeder(&p, &cfg, &FixedSeeder(genome.clone()), None).unwrap();

        // Identical parents and no mutation: the population never changes.
        assert_eq!(result.best, genome);
        assert!(result.score_history.iter().all(|&s| s == seeded_score));
    }

    #[test]
    fn test_no_crossover_no_mutation_keeps_seeds() {
        let p = small();
        let cfg = config().with_crossover_rate(0.0).with_mutation_rate(0.0);
        let result = GaRunner::run(&p, &cfg).unwrap();
        let initial = result.score_history[0];
        assert!(result.score_history.iter().all(|&s| s == initial));
    }

    #[test]
    fn test_best_index_ties() {
        let g = Genome::from_ordered(Vec::new());
        let pop: Vec<Candidate> = [-3, 0, -1, 0]
            .into_iter()
            .map(|score| Candidate {
                genome: g.clone(),
                score,
            })
            .collect();
        assert_eq!(best_index(&pop), 1);
    }
}
