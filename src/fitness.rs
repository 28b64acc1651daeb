//! Penalty-based fitness evaluation.
//!
//! A genome is scored by counting rule violations per section and summing
//! weighted penalties. The score is `0` for a genome with no detected
//! violation and strictly negative otherwise; higher is better.
//!
//! | Rule | Counted as |
//! |---|---|
//! | duplicate non-lab subject in a day | each extra occurrence |
//! | lab gene not paired with the next slot | each unpaired lab gene |
//! | non-lab gene outside the home room | each gene |
//! | lab gene outside the lab pool | each gene |
//! | day with every slot free | each day |
//! | (section, subject) taught by several teachers | each extra teacher |
//! | subject slots above the weekly quota | each extra slot |

use std::collections::HashSet;
use std::ops::AddAssign;

use crate::models::{Genome, Lesson, SectionId};
use crate::problem::TimetableProblem;

/// Fitness value. `0` is a violation-free genome; higher is better.
pub type Score = i64;

/// Penalty applied per counted violation of each rule.
///
/// Every weight must be positive so that each violation lowers the score;
/// [`TimetableProblem::with_penalty_weights`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyWeights {
    pub duplicate_subject: i64,
    pub broken_lab_block: i64,
    pub wrong_home_room: i64,
    pub wrong_lab_room: i64,
    pub free_day: i64,
    pub inconsistent_teacher: i64,
    pub quota_overrun: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            duplicate_subject: 10,
            broken_lab_block: 5,
            wrong_home_room: 5,
            wrong_lab_room: 5,
            free_day: 10,
            inconsistent_teacher: 10,
            quota_overrun: 5,
        }
    }
}

impl PenaltyWeights {
    /// Every rule weighs 1; the score becomes the raw violation count.
    pub fn uniform() -> Self {
        Self {
            duplicate_subject: 1,
            broken_lab_block: 1,
            wrong_home_room: 1,
            wrong_lab_room: 1,
            free_day: 1,
            inconsistent_teacher: 1,
            quota_overrun: 1,
        }
    }

    /// Validates the weights.
    ///
    /// Returns `Err` naming the first weight that is not positive.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("duplicate_subject", self.duplicate_subject),
            ("broken_lab_block", self.broken_lab_block),
            ("wrong_home_room", self.wrong_home_room),
            ("wrong_lab_room", self.wrong_lab_room),
            ("free_day", self.free_day),
            ("inconsistent_teacher", self.inconsistent_teacher),
            ("quota_overrun", self.quota_overrun),
        ];
        match weights.iter().find(|(_, w)| *w <= 0) {
            Some((name, w)) => Err(format!("{name} must be positive, got {w}")),
            None => Ok(()),
        }
    }
}

/// Violation counts per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violations {
    pub duplicate_subjects: u32,
    pub broken_lab_blocks: u32,
    pub wrong_home_room: u32,
    pub wrong_lab_room: u32,
    pub free_days: u32,
    pub inconsistent_teachers: u32,
    pub quota_overruns: u32,
}

impl Violations {
    pub fn total(&self) -> u32 {
        self.duplicate_subjects
            + self.broken_lab_blocks
            + self.wrong_home_room
            + self.wrong_lab_room
            + self.free_days
            + self.inconsistent_teachers
            + self.quota_overruns
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Weighted score: `-(Σ weight × count)`.
    pub fn score(&self, weights: &PenaltyWeights) -> Score {
        let penalty = weights.duplicate_subject * i64::from(self.duplicate_subjects)
            + weights.broken_lab_block * i64::from(self.broken_lab_blocks)
            + weights.wrong_home_room * i64::from(self.wrong_home_room)
            + weights.wrong_lab_room * i64::from(self.wrong_lab_room)
            + weights.free_day * i64::from(self.free_days)
            + weights.inconsistent_teacher * i64::from(self.inconsistent_teachers)
            + weights.quota_overrun * i64::from(self.quota_overruns);
        -penalty
    }
}

impl AddAssign for Violations {
    fn add_assign(&mut self, rhs: Self) {
        self.duplicate_subjects += rhs.duplicate_subjects;
        self.broken_lab_blocks += rhs.broken_lab_blocks;
        self.wrong_home_room += rhs.wrong_home_room;
        self.wrong_lab_room += rhs.wrong_lab_room;
        self.free_days += rhs.free_days;
        self.inconsistent_teachers += rhs.inconsistent_teachers;
        self.quota_overruns += rhs.quota_overruns;
    }
}

/// Counts violations over every section of a genome.
///
/// The genome must have the problem's canonical layout, which every
/// genome built for the same problem has. Genes from elsewhere go through
/// [`TimetableProblem::genome_from_genes`] first.
///
/// # Panics
/// Panics if the genome's length differs from
/// [`TimetableProblem::genome_len`], e.g. when it was built for another
/// problem.
pub fn count_violations(problem: &TimetableProblem, genome: &Genome) -> Violations {
    assert_eq!(
        genome.len(),
        problem.genome_len(),
        "genome does not match the problem's layout"
    );
    let mut total = Violations::default();
    for section in problem.sections() {
        total += section_violations(problem, genome, section);
    }
    total
}

fn section_violations(
    problem: &TimetableProblem,
    genome: &Genome,
    section: SectionId,
) -> Violations {
    let genes = genome.genes();
    let home = problem.home_room(section);
    let mut v = Violations::default();

    let mut slot_counts = vec![0u32; problem.num_subjects()];
    let mut teachers: Vec<HashSet<usize>> = vec![HashSet::new(); problem.num_subjects()];
    let mut daily = vec![0u32; problem.num_subjects()];

    for day in 0..problem.num_days() {
        let slots = &genes[problem.day_range(section, day)];
        daily.iter_mut().for_each(|c| *c = 0);

        let mut all_free = true;
        let mut second_half = false;

        for (i, gene) in slots.iter().enumerate() {
            let Lesson::Taught { subject, teacher } = gene.lesson else {
                second_half = false;
                if gene.room != home {
                    v.wrong_home_room += 1;
                }
                continue;
            };
            all_free = false;
            slot_counts[subject.0] += 1;
            teachers[subject.0].insert(teacher.0);

            if !problem.is_lab(subject) {
                second_half = false;
                daily[subject.0] += 1;
                if gene.room != home {
                    v.wrong_home_room += 1;
                }
                continue;
            }

            if !problem.is_lab_room(gene.room) {
                v.wrong_lab_room += 1;
            }
            if second_half {
                second_half = false;
                continue;
            }
            let paired = slots.get(i + 1).is_some_and(|next| {
                next.lesson.subject() == Some(subject) && next.room == gene.room
            });
            if paired {
                second_half = true;
            } else {
                v.broken_lab_blocks += 1;
            }
        }

        if all_free {
            v.free_days += 1;
        }
        v.duplicate_subjects += daily.iter().map(|&c| c.saturating_sub(1)).sum::<u32>();
    }

    for subject in problem.subjects() {
        let distinct = teachers[subject.0].len() as u32;
        v.inconsistent_teachers += distinct.saturating_sub(1);
        v.quota_overruns += slot_counts[subject.0].saturating_sub(problem.hours(subject));
    }

    v
}

impl TimetableProblem {
    /// Scores a genome with this problem's penalty weights.
    pub fn evaluate(&self, genome: &Genome) -> Score {
        count_violations(self, genome).score(self.weights())
    }
}
