//! Seeding from an external exact solver.
//!
//! An exact constraint solver (e.g. a CP-SAT model with one boolean per
//! section × day × time × subject) can decide *which subject goes where*.
//! This module defines the seam to such a solver and turns its subject
//! matrix into genomes by attaching teachers and rooms with the same rules
//! as [`super::GreedySeeder`]. The solver itself lives outside this crate.

use rand::Rng;

use super::{draw_lab_room, GreedySeeder, Seeder, TeacherCache};
use crate::models::{Configuration, Gene, Genome, Lesson, SectionId, SubjectId};
use crate::problem::TimetableProblem;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible placement exists.
    Infeasible,
    /// Solver exceeded its time limit.
    Timeout,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Subject placement: one optional subject per (section, day, time).
///
/// `None` is a free slot. Cells are stored in the same canonical order as
/// genomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementMatrix {
    sections: usize,
    days: usize,
    times: usize,
    cells: Vec<Option<SubjectId>>,
}

impl PlacementMatrix {
    /// Creates an all-free matrix.
    pub fn new(sections: usize, days: usize, times: usize) -> Self {
        Self {
            sections,
            days,
            times,
            cells: vec![None; sections * days * times],
        }
    }

    /// Creates an all-free matrix sized for a configuration.
    pub fn for_configuration(config: &Configuration) -> Self {
        let (days, times) = (config.days.len(), config.times.len());
        Self::new(config.sections.len(), days, times)
    }

    fn index(&self, section: SectionId, day: usize, time: usize) -> usize {
        assert!(
            section.0 < self.sections && day < self.days && time < self.times,
            "placement cell out of bounds"
        );
        (section.0 * self.days + day) * self.times + time
    }

    /// Places `subject` (or free) in one cell.
    ///
    /// # Panics
    /// Panics if the cell lies outside [`dimensions`](Self::dimensions).
    pub fn set(&mut self, section: SectionId, day: usize, time: usize, subject: Option<SubjectId>) {
        let idx = self.index(section, day, time);
        self.cells[idx] = subject;
    }

    /// Subject placed in one cell.
    ///
    /// # Panics
    /// Panics if the cell lies outside [`dimensions`](Self::dimensions).
    pub fn get(&self, section: SectionId, day: usize, time: usize) -> Option<SubjectId> {
        self.cells[self.index(section, day, time)]
    }

    /// `(sections, days, times)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.sections, self.days, self.times)
    }

    fn fits(&self, problem: &TimetableProblem) -> bool {
        let (sections, days, times) = self.dimensions();
        sections == problem.num_sections()
            && days == problem.num_days()
            && times == problem.num_times()
            && self
                .cells
                .iter()
                .flatten()
                .all(|s| s.0 < problem.num_subjects())
    }
}

/// Solution returned by a [`PlacementSolver`].
#[derive(Debug, Clone)]
pub struct PlacementSolution {
    pub status: SolverStatus,
    /// Subject placement; present when a solution was found.
    pub matrix: Option<PlacementMatrix>,
}

impl PlacementSolution {
    /// A solution without a matrix.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            matrix: None,
        }
    }

    pub fn found(status: SolverStatus, matrix: PlacementMatrix) -> Self {
        Self {
            status,
            matrix: Some(matrix),
        }
    }

    /// Whether a feasible placement was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
            && self.matrix.is_some()
    }
}

/// Interface to an exact subject-placement solver.
///
/// Implementations should return one subject (or free) per slot with
/// weekly hour totals matching the quotas exactly.
pub trait PlacementSolver {
    fn solve(&self, config: &Configuration) -> PlacementSolution;
}

/// Seeds genomes from a solver's subject placement.
///
/// The solver runs once, in [`SolverSeeder::new`]. Every call to
/// [`Seeder::seed`] keeps the solver's subjects in place and draws fresh
/// teachers and lab rooms, so a population still starts diverse. When the
/// solver finds nothing usable, seeding falls back to [`GreedySeeder`].
#[derive(Debug, Clone)]
pub struct SolverSeeder {
    placement: Option<PlacementMatrix>,
}

impl SolverSeeder {
    /// Runs `solver` on the problem's configuration and keeps its placement.
    pub fn new<S: PlacementSolver + ?Sized>(problem: &TimetableProblem, solver: &S) -> Self {
        let solution = solver.solve(problem.config());
        let status = solution.status;
        let solved = matches!(status, SolverStatus::Optimal | SolverStatus::Feasible);
        let placement = match solution.matrix {
            Some(matrix) if solved && matrix.fits(problem) => {
                tracing::info!(?status, "using solver placement for seeding");
                Some(matrix)
            }
            Some(_) if solved => {
                tracing::warn!("solver placement does not fit; seeding greedily");
                None
            }
            _ => {
                tracing::warn!(?status, "solver found no placement; seeding greedily");
                None
            }
        };
        Self { placement }
    }

    /// Whether seeds come from the solver rather than the greedy fallback.
    pub fn has_placement(&self) -> bool {
        self.placement.is_some()
    }
}

impl Seeder for SolverSeeder {
    fn seed<R: Rng>(&self, problem: &TimetableProblem, rng: &mut R) -> Genome {
        match &self.placement {
            Some(matrix) if matrix.fits(problem) => attach(problem, matrix, rng),
            _ => GreedySeeder.seed(problem, rng),
        }
    }
}

/// Attaches teachers and rooms to a subject placement.
///
/// Consecutive slots holding the same lab subject are paired in one lab
/// room; a lab slot without a partner still gets a lab room.
fn attach<R: Rng>(problem: &TimetableProblem, matrix: &PlacementMatrix, rng: &mut R) -> Genome {
    let times = problem.num_times();
    let mut genes = Vec::with_capacity(problem.genome_len());

    for section in problem.sections() {
        let home = problem.home_room(section);
        let mut teachers = TeacherCache::new(problem);

        for day in 0..problem.num_days() {
            let mut time = 0;
            while time < times {
                let Some(subject) = matrix.get(section, day, time) else {
                    genes.push(Gene::free(section, day, time, home));
                    time += 1;
                    continue;
                };
                let teacher = teachers.resolve(problem, subject, rng);
                let gene = Gene {
                    day,
                    time,
                    section,
                    lesson: Lesson::Taught { subject, teacher },
                    room: home,
                };

                if !problem.is_lab(subject) {
                    genes.push(gene);
                    time += 1;
                    continue;
                }

                let room = draw_lab_room(problem, rng);
                genes.push(Gene { room, ..gene });
                let paired =
                    time + 1 < times && matrix.get(section, day, time + 1) == Some(subject);
                if paired {
                    genes.push(Gene {
                        time: time + 1,
                        room,
                        ..gene
                    });
                    time += 2;
                } else {
                    time += 1;
                }
            }
        }
    }

    Genome::from_ordered(genes)
}
