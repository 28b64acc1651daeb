//! Greedy randomized seeding.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::{draw_lab_room, Seeder, TeacherCache};
use crate::models::{Gene, Genome, Lesson, SectionId, SubjectId};
use crate::problem::TimetableProblem;

/// Builds genomes by filling each section's week slot by slot.
///
/// Per section, days and slots are visited in order. Each slot gets a
/// random subject that still has weekly hours and has not been used that
/// day. Labs are placed as two consecutive slots in one lab room when at
/// least two hours remain and the slot is not the last of the day; a lab
/// that cannot be paired leaves the slot free. Teachers come from a
/// per-section [`TeacherCache`] so each (section, subject) keeps one
/// teacher.
///
/// Unset slots are then backfilled as free, and every day left entirely
/// free receives one lesson from a subject with hours remaining.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySeeder;

impl Seeder for GreedySeeder {
    fn seed<R: Rng>(&self, problem: &TimetableProblem, rng: &mut R) -> Genome {
        let mut genes = Vec::with_capacity(problem.genome_len());
        for section in problem.sections() {
            let mut week = SectionWeek::new(problem, section);
            let slots = week.fill(rng);
            let mut section_genes = week.backfill(slots);
            week.repair_free_days(&mut section_genes, rng);
            genes.extend(section_genes);
        }
        Genome::from_ordered(genes)
    }
}

/// Seeding state for one section.
struct SectionWeek<'a> {
    problem: &'a TimetableProblem,
    section: SectionId,
    remaining: Vec<u32>,
    teachers: TeacherCache,
}

impl<'a> SectionWeek<'a> {
    fn new(problem: &'a TimetableProblem, section: SectionId) -> Self {
        Self {
            problem,
            section,
            remaining: problem.subjects().map(|s| problem.hours(s)).collect(),
            teachers: TeacherCache::new(problem),
        }
    }

    fn times(&self) -> usize {
        self.problem.num_times()
    }

    fn free(&self, day: usize, time: usize) -> Gene {
        let home = self.problem.home_room(self.section);
        Gene::free(self.section, day, time, home)
    }

    fn taught<R: Rng>(&mut self, day: usize, time: usize, subject: SubjectId, rng: &mut R) -> Gene {
        let teacher = self.teachers.resolve(self.problem, subject, rng);
        Gene {
            day,
            time,
            section: self.section,
            lesson: Lesson::Taught { subject, teacher },
            room: self.problem.home_room(self.section),
        }
    }

    /// Main pass; returns the section's slots indexed by `day × times + time`.
    fn fill<R: Rng>(&mut self, rng: &mut R) -> Vec<Option<Gene>> {
        let times = self.times();
        let mut slots = vec![None; self.problem.num_days() * times];

        for day in 0..self.problem.num_days() {
            let mut used_today = vec![false; self.problem.num_subjects()];
            let mut time = 0;
            while time < times {
                let idx = day * times + time;

                let candidates: Vec<SubjectId> = self
                    .problem
                    .subjects()
                    .filter(|s| self.remaining[s.0] > 0 && !used_today[s.0])
                    .collect();
                let Some(&subject) = candidates.choose(rng) else {
                    slots[idx] = Some(self.free(day, time));
                    time += 1;
                    continue;
                };

                if !self.problem.is_lab(subject) {
                    slots[idx] = Some(self.taught(day, time, subject, rng));
                    self.remaining[subject.0] -= 1;
                    used_today[subject.0] = true;
                    time += 1;
                    continue;
                }

                if self.remaining[subject.0] >= 2 && time + 1 < times {
                    let mut first = self.taught(day, time, subject, rng);
                    first.room = draw_lab_room(self.problem, rng);
                    let second = Gene {
                        time: time + 1,
                        ..first
                    };
                    slots[idx] = Some(first);
                    slots[idx + 1] = Some(second);
                    self.remaining[subject.0] -= 2;
                    used_today[subject.0] = true;
                    time += 2;
                } else {
                    slots[idx] = Some(self.free(day, time));
                    time += 1;
                }
            }
        }
        slots
    }

    /// Turns every unset slot into a free gene.
    fn backfill(&self, slots: Vec<Option<Gene>>) -> Vec<Gene> {
        let times = self.times();
        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.unwrap_or_else(|| self.free(i / times, i % times)))
            .collect()
    }

    /// Gives every fully free day one lesson, if any subject has hours left.
    fn repair_free_days<R: Rng>(&mut self, genes: &mut [Gene], rng: &mut R) {
        let times = self.times();
        for day in 0..self.problem.num_days() {
            let range = day * times..(day + 1) * times;
            if !genes[range.clone()].iter().all(|g| g.lesson.is_free()) {
                continue;
            }
            let candidates: Vec<SubjectId> = self
                .problem
                .subjects()
                .filter(|s| self.remaining[s.0] > 0)
                .collect();
            let Some(&subject) = candidates.choose(rng) else {
                continue;
            };

            let day_genes = &mut genes[range];
            if !self.problem.is_lab(subject) {
                let time = rng.random_range(0..times);
                day_genes[time] = self.taught(day, time, subject, rng);
                self.remaining[subject.0] -= 1;
            } else if self.remaining[subject.0] >= 2 && times >= 2 {
                let time = rng.random_range(0..times - 1);
                let mut first = self.taught(day, time, subject, rng);
                first.room = draw_lab_room(self.problem, rng);
                day_genes[time] = first;
                day_genes[time + 1] = Gene {
                    time: time + 1,
                    ..first
                };
                self.remaining[subject.0] -= 2;
            } else {
                let time = rng.random_range(0..times);
                let mut gene = self.taught(day, time, subject, rng);
                gene.room = draw_lab_room(self.problem, rng);
                day_genes[time] = gene;
                self.remaining[subject.0] -= 1;
            }

            tracing::debug!(
                section = self.section.0,
                day,
                subject = subject.0,
                "seeded lesson into idle day"
            );
        }
    }
}
