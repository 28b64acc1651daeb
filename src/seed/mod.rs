//! Initial genome construction.
//!
//! A [`Seeder`] builds one structurally complete genome per call. Two
//! strategies are provided:
//!
//! - [`GreedySeeder`]: randomized slot-by-slot filling with lab pairing and
//!   a repair pass for idle days
//! - [`SolverSeeder`]: takes the subject placement from an external
//!   [`PlacementSolver`] and only attaches teachers and rooms
//!
//! Seeding never fails; a poor seed simply scores low.

mod greedy;
mod solver;

use rand::Rng;

use crate::models::{Genome, RoomId, SubjectId, TeacherId};
use crate::problem::TimetableProblem;

pub use greedy::GreedySeeder;
pub use solver::{PlacementMatrix, PlacementSolution, PlacementSolver, SolverSeeder, SolverStatus};

/// Strategy for building initial genomes.
///
/// Implementations must return a genome in the problem's canonical layout
/// with exactly [`TimetableProblem::genome_len`] genes; the runner rejects
/// anything else.
pub trait Seeder: Send + Sync {
    /// Builds one genome.
    fn seed<R: Rng>(&self, problem: &TimetableProblem, rng: &mut R) -> Genome;
}

/// Per-section memory of which teacher teaches which subject.
///
/// A lab and its base subject share one teacher: whichever of the two is
/// resolved first fixes the teacher for both.
#[derive(Debug, Clone)]
pub(crate) struct TeacherCache {
    assigned: Vec<Option<TeacherId>>,
}

impl TeacherCache {
    pub(crate) fn new(problem: &TimetableProblem) -> Self {
        Self {
            assigned: vec![None; problem.num_subjects()],
        }
    }

    /// Returns the cached teacher for `subject`, drawing one if needed.
    pub(crate) fn resolve<R: Rng>(
        &mut self,
        problem: &TimetableProblem,
        subject: SubjectId,
        rng: &mut R,
    ) -> TeacherId {
        if let Some(teacher) = self.assigned[subject.0] {
            return teacher;
        }
        let base = problem.base_of(subject);
        if let Some(teacher) = base.and_then(|b| self.assigned[b.0]) {
            self.assigned[subject.0] = Some(teacher);
            return teacher;
        }
        let teacher = draw_teacher(problem, subject, rng);
        self.assigned[subject.0] = Some(teacher);
        if let Some(base) = base {
            self.assigned[base.0] = Some(teacher);
        }
        teacher
    }
}

/// Draws a random teacher from a subject's pool.
pub(crate) fn draw_teacher<R: Rng>(
    problem: &TimetableProblem,
    subject: SubjectId,
    rng: &mut R,
) -> TeacherId {
    let pool = problem.teachers_for(subject);
    pool[rng.random_range(0..pool.len())]
}

/// Draws a random room from the lab pool.
///
/// Only called for lab subjects, which validation guarantees a non-empty
/// pool for.
pub(crate) fn draw_lab_room<R: Rng>(problem: &TimetableProblem, rng: &mut R) -> RoomId {
    let pool = problem.lab_rooms();
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::random::create_rng;

    #[test]
    fn test_cache_reuses_teacher() {
        let p = TimetableProblem::new(fixtures::small()).unwrap();
        let mut rng = create_rng(42);
        let mut cache = TeacherCache::new(&p);
        let first = cache.resolve(&p, SubjectId(2), &mut rng);
        for _ in 0..20 {
            assert_eq!(cache.resolve(&p, SubjectId(2), &mut rng), first);
        }
    }

    #[test]
    fn test_lab_shares_teacher_with_base() {
        let p = TimetableProblem::new(fixtures::small()).unwrap();
        for seed in 0..20 {
            let mut rng = create_rng(seed);

            let mut cache = TeacherCache::new(&p);
            let base = cache.resolve(&p, SubjectId(0), &mut rng);
            assert_eq!(cache.resolve(&p, SubjectId(1), &mut rng), base);

            let mut cache = TeacherCache::new(&p);
            let lab = cache.resolve(&p, SubjectId(1), &mut rng);
            assert_eq!(cache.resolve(&p, SubjectId(0), &mut rng), lab);
        }
    }

    #[test]
    fn test_draw_teacher_stays_in_pool() {
        let p = TimetableProblem::new(fixtures::small()).unwrap();
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let t = draw_teacher(&p, SubjectId(2), &mut rng);
            assert!(p.teachers_for(SubjectId(2)).contains(&t));
        }
    }
}
