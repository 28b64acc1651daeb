//! Crossover and mutation on timetable genomes.
//!
//! Both operators keep the parent length and the canonical slot layout:
//! crossover only exchanges whole tails, mutation only rewrites the lesson
//! and room of one gene. Neither repairs quotas or lab pairs; the fitness
//! evaluator penalizes what they break.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*

use rand::Rng;

use crate::models::{Genome, Lesson, SubjectId};
use crate::problem::TimetableProblem;
use crate::seed::{draw_lab_room, draw_teacher};

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover over the flat gene sequence.
///
/// Draws a cut `k` uniformly from `[1, len - 1]` and returns
/// `(p1[..k] + p2[k..], p2[..k] + p1[k..])`. Parents shorter than two
/// genes have no interior cut and are returned as clones.
///
/// Both parents must come from the same problem, so their lengths match.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn single_point_crossover<R: Rng>(p1: &Genome, p2: &Genome, rng: &mut R) -> (Genome, Genome) {
    debug_assert_eq!(p1.len(), p2.len(), "parents must have the same length");
    let len = p1.len().min(p2.len());
    if len < 2 {
        return (p1.clone(), p2.clone());
    }

    let cut = rng.random_range(1..len);
    let (a, b) = (p1.genes(), p2.genes());

    let mut c1 = Vec::with_capacity(len);
    c1.extend_from_slice(&a[..cut]);
    c1.extend_from_slice(&b[cut..len]);

    let mut c2 = Vec::with_capacity(len);
    c2.extend_from_slice(&b[..cut]);
    c2.extend_from_slice(&a[cut..len]);

    (Genome::from_ordered(c1), Genome::from_ordered(c2))
}

// ============================================================================
// Mutation
// ============================================================================

/// Resamples the lesson of one random gene.
///
/// The new lesson is drawn uniformly from the subjects plus free:
///
/// - free: home room
/// - lab subject: teacher from its pool, room from the lab pool
/// - other subject: teacher from its pool, home room
///
/// The draw may reproduce the old lesson, in which case the genome is
/// unchanged. Returns the mutated index, or `None` for an empty genome.
pub fn mutate_gene<R: Rng>(
    problem: &TimetableProblem,
    genome: &mut Genome,
    rng: &mut R,
) -> Option<usize> {
    if genome.is_empty() {
        return None;
    }
    let index = rng.random_range(0..genome.len());
    let gene = &mut genome.genes_mut()[index];
    let home = problem.home_room(gene.section);

    let choice = rng.random_range(0..=problem.num_subjects());
    if choice == problem.num_subjects() {
        gene.lesson = Lesson::Free;
        gene.room = home;
    } else {
        let subject = SubjectId(choice);
        let teacher = draw_teacher(problem, subject, rng);
        gene.lesson = Lesson::Taught { subject, teacher };
        gene.room = if problem.is_lab(subject) {
            draw_lab_room(problem, rng)
        } else {
            home
        };
    }
    Some(index)
}

/// Applies [`mutate_gene`] with probability `rate`, once per genome.
///
/// Rates above 1 act as 1; zero, negative and NaN rates never mutate.
/// Returns whether the gate fired.
pub fn mutate<R: Rng>(
    problem: &TimetableProblem,
    genome: &mut Genome,
    rate: f64,
    rng: &mut R,
) -> bool {
    if rate.is_nan() || rate <= 0.0 || !rng.random_bool(rate.min(1.0)) {
        return false;
    }
    mutate_gene(problem, genome, rng);
    true
}

// ============================================================================
// Tests
// ============================================================================
