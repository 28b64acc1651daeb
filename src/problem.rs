//! Compiled timetabling problem.
//!
//! [`TimetableProblem`] validates a [`Configuration`] once and turns its
//! names into dense id tables: interned teachers, per-subject teacher
//! pools, home rooms, the lab pool, and lab → base subject links. Every
//! other component (seeders, evaluator, operators, runner) reads from it
//! and never touches the raw configuration again.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use crate::error::TimetableError;
use crate::fitness::PenaltyWeights;
use crate::models::{Configuration, Gene, Genome, Lesson, RoomId, SectionId, SubjectId, TeacherId};
use crate::validation::validate_configuration;

const LAB_SUFFIX: &str = " Lab";

/// An immutable, validated timetabling instance.
///
/// # Example
/// ```
/// use u_timetable::models::{Configuration, Room, Section, Subject};
/// use u_timetable::TimetableProblem;
///
/// let config = Configuration::new(["Mon"], ["9:00", "10:00"])
///     .with_room(Room::regular("M201"))
///     .with_room(Room::lab("AL1"))
///     .with_section(Section::new("A", "M201"))
///     .with_subject(Subject::lab("Chemistry Lab", 2, ["Geetha"]));
///
/// let problem = TimetableProblem::new(config).unwrap();
/// assert_eq!(problem.genome_len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    config: Configuration,
    teachers: Vec<String>,
    subject_teachers: Vec<Vec<TeacherId>>,
    base_of: Vec<Option<SubjectId>>,
    home_rooms: Vec<RoomId>,
    lab_rooms: Vec<RoomId>,
    weights: PenaltyWeights,
}

impl TimetableProblem {
    /// Validates and compiles a configuration.
    ///
    /// Fails with [`TimetableError::InvalidConfiguration`] listing every
    /// structural problem found.
    pub fn new(config: Configuration) -> Result<Self, TimetableError> {
        validate_configuration(&config).map_err(TimetableError::InvalidConfiguration)?;

        let room_index: HashMap<&str, RoomId> = config
            .rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.as_str(), RoomId(i)))
            .collect();
        let subject_index: HashMap<&str, SubjectId> = config
            .subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), SubjectId(i)))
            .collect();

        // Intern teacher names across all pools.
        let mut teachers: Vec<String> = Vec::new();
        let mut teacher_index: HashMap<String, TeacherId> = HashMap::new();
        let subject_teachers: Vec<Vec<TeacherId>> = config
            .subjects
            .iter()
            .map(|subject| {
                subject
                    .teachers
                    .iter()
                    .map(|name| {
                        *teacher_index.entry(name.clone()).or_insert_with(|| {
                            teachers.push(name.clone());
                            TeacherId(teachers.len() - 1)
                        })
                    })
                    .collect()
            })
            .collect();

        let base_of: Vec<Option<SubjectId>> = config
            .subjects
            .iter()
            .map(|subject| {
                if !subject.is_lab {
                    return None;
                }
                let base = match subject.base.as_deref() {
                    Some(base) => base,
                    None => subject.name.strip_suffix(LAB_SUFFIX)?,
                };
                subject_index
                    .get(base)
                    .copied()
                    .filter(|id| !config.subjects[id.0].is_lab)
            })
            .collect();

        // Validation guarantees every home room exists.
        let home_rooms: Vec<RoomId> = config
            .sections
            .iter()
            .map(|s| room_index[s.home_room.as_str()])
            .collect();
        let lab_rooms: Vec<RoomId> = config
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_lab())
            .map(|(i, _)| RoomId(i))
            .collect();

        for subject in config.subjects.iter().filter(|s| !s.is_lab) {
            if subject.hours as usize > config.days.len() {
                tracing::warn!(
                    subject = %subject.name,
                    hours = subject.hours,
                    days = config.days.len(),
                    "quota exceeds one lesson per day; duplicate-subject penalties are unavoidable"
                );
            }
        }

        Ok(Self {
            config,
            teachers,
            subject_teachers,
            base_of,
            home_rooms,
            lab_rooms,
            weights: PenaltyWeights::default(),
        })
    }

    /// Replaces the penalty weights used by [`evaluate`](Self::evaluate).
    ///
    /// Fails with [`TimetableError::InvalidPenaltyWeights`] if any weight
    /// is zero or negative.
    pub fn with_penalty_weights(mut self, weights: PenaltyWeights) -> Result<Self, TimetableError> {
        weights
            .validate()
            .map_err(TimetableError::InvalidPenaltyWeights)?;
        self.weights = weights;
        Ok(self)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    pub fn num_days(&self) -> usize {
        self.config.days.len()
    }

    pub fn num_times(&self) -> usize {
        self.config.times.len()
    }

    pub fn num_sections(&self) -> usize {
        self.config.sections.len()
    }

    pub fn num_subjects(&self) -> usize {
        self.config.subjects.len()
    }

    /// Genome length: sections × days × times.
    pub fn genome_len(&self) -> usize {
        self.config.genome_len()
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> {
        (0..self.num_sections()).map(SectionId)
    }

    pub fn subjects(&self) -> impl Iterator<Item = SubjectId> {
        (0..self.num_subjects()).map(SubjectId)
    }

    pub fn is_lab(&self, subject: SubjectId) -> bool {
        self.config.subjects[subject.0].is_lab
    }

    /// Weekly hour quota of a subject.
    pub fn hours(&self, subject: SubjectId) -> u32 {
        self.config.subjects[subject.0].hours
    }

    /// Eligible teachers of a subject; never empty.
    pub fn teachers_for(&self, subject: SubjectId) -> &[TeacherId] {
        &self.subject_teachers[subject.0]
    }

    /// Base subject whose teacher a lab shares, if any.
    pub fn base_of(&self, subject: SubjectId) -> Option<SubjectId> {
        self.base_of[subject.0]
    }

    pub fn home_room(&self, section: SectionId) -> RoomId {
        self.home_rooms[section.0]
    }

    /// Rooms lab subjects may use.
    pub fn lab_rooms(&self) -> &[RoomId] {
        &self.lab_rooms
    }

    pub fn is_lab_room(&self, room: RoomId) -> bool {
        self.config.rooms[room.0].is_lab()
    }

    /// Whether a gene's lesson is a lab subject.
    pub fn is_lab_lesson(&self, lesson: &Lesson) -> bool {
        lesson.subject().is_some_and(|s| self.is_lab(s))
    }

    /// Position of a slot in the canonical genome layout.
    pub fn slot_index(&self, section: SectionId, day: usize, time: usize) -> usize {
        (section.0 * self.num_days() + day) * self.num_times() + time
    }

    /// Index range of one section's day in the canonical layout.
    pub fn day_range(&self, section: SectionId, day: usize) -> Range<usize> {
        let start = self.slot_index(section, day, 0);
        start..start + self.num_times()
    }

    /// Coordinates of the slot at a canonical index.
    pub fn slot_at(&self, index: usize) -> (SectionId, usize, usize) {
        let times = self.num_times();
        let days = self.num_days();
        let time = index % times;
        let day = (index / times) % days;
        let section = index / (times * days);
        (SectionId(section), day, time)
    }

    /// Builds a genome from externally produced genes.
    ///
    /// Rejects a gene list that does not cover the grid exactly once in
    /// canonical order.
    pub fn genome_from_genes(&self, genes: Vec<Gene>) -> Result<Genome, TimetableError> {
        self.check_layout(&genes)?;
        Ok(Genome::from_ordered(genes))
    }

    /// Checks length, canonical order, and ids of a gene slice.
    pub fn check_layout(&self, genes: &[Gene]) -> Result<(), TimetableError> {
        if genes.len() != self.genome_len() {
            return Err(TimetableError::GenomeLength {
                expected: self.genome_len(),
                actual: genes.len(),
            });
        }
        for (index, gene) in genes.iter().enumerate() {
            if self.slot_at(index) != (gene.section, gene.day, gene.time) {
                return Err(TimetableError::MisplacedGene { index });
            }
            let known_lesson = match gene.lesson {
                Lesson::Free => true,
                Lesson::Taught { subject, teacher } => {
                    subject.0 < self.num_subjects() && teacher.0 < self.teachers.len()
                }
            };
            if !known_lesson || gene.room.0 >= self.config.rooms.len() {
                return Err(TimetableError::UnknownReference { index });
            }
        }
        Ok(())
    }

    /// Resolves a gene's ids to names for display.
    pub fn view<'a>(&'a self, gene: &Gene) -> GeneView<'a> {
        let (subject, teacher) = match gene.lesson {
            Lesson::Free => ("Free", "N/A"),
            Lesson::Taught { subject, teacher } => (
                self.config.subjects[subject.0].name.as_str(),
                self.teachers[teacher.0].as_str(),
            ),
        };
        GeneView {
            day: &self.config.days[gene.day],
            time: &self.config.times[gene.time],
            section: &self.config.sections[gene.section.0].name,
            subject,
            teacher,
            room: &self.config.rooms[gene.room.0].name,
        }
    }

    pub fn teacher_name(&self, teacher: TeacherId) -> &str {
        &self.teachers[teacher.0]
    }
}

/// A gene with every id resolved to its configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneView<'a> {
    pub day: &'a str,
    pub time: &'a str,
    pub section: &'a str,
    pub subject: &'a str,
    pub teacher: &'a str,
    pub room: &'a str,
}

impl fmt::Display for GeneView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {} | {} | {}",
            self.day, self.time, self.section, self.subject, self.teacher, self.room
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, Room, Section, Subject};
    use crate::validation::ValidationErrorKind;

    fn problem() -> TimetableProblem {
        TimetableProblem::new(fixtures::small()).expect("valid fixture")
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let config = fixtures::small().with_subject(Subject::new("Art", 1, Vec::<String>::new()));
        match TimetableProblem::new(config) {
            Err(TimetableError::InvalidConfiguration(errors)) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::EmptyTeacherPool);
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_teachers_are_interned() {
        let p = problem();
        // Kanagaraj and Sherin appear in two pools but get one id each.
        let se = p.teachers_for(SubjectId(0));
        let lab = p.teachers_for(SubjectId(1));
        assert_eq!(se, lab);
        assert_eq!(p.teacher_name(se[0]), "Kanagaraj");
        assert_eq!(p.teachers_for(SubjectId(3)).len(), 1);
    }

    #[test]
    fn test_lab_base_inferred_from_name() {
        let p = problem();
        assert_eq!(p.base_of(SubjectId(1)), Some(SubjectId(0)));
        assert_eq!(p.base_of(SubjectId(0)), None);
        assert_eq!(p.base_of(SubjectId(2)), None);
    }

    #[test]
    fn test_lab_base_explicit() {
        let workshop = Subject::lab("Workshop", 0, ["Stephen"]).with_base("Operating System");
        let config = fixtures::small().with_subject(workshop);
        let p = TimetableProblem::new(config).unwrap();
        assert_eq!(p.base_of(SubjectId(4)), Some(SubjectId(3)));
    }

    #[test]
    fn test_lab_without_matching_base() {
        let config = fixtures::small().with_subject(Subject::lab("Robotics Lab", 0, ["Arun"]));
        let p = TimetableProblem::new(config).unwrap();
        assert_eq!(p.base_of(SubjectId(4)), None);
    }

    #[test]
    fn test_rooms() {
        let p = problem();
        assert_eq!(p.home_room(SectionId(0)), RoomId(0));
        assert_eq!(p.home_room(SectionId(1)), RoomId(1));
        assert_eq!(p.lab_rooms(), &[RoomId(2), RoomId(3)]);
        assert!(p.is_lab_room(RoomId(2)));
        assert!(!p.is_lab_room(RoomId(0)));
    }

    #[test]
    fn test_slot_index_roundtrip() {
        let p = problem();
        for index in 0..p.genome_len() {
            let (section, day, time) = p.slot_at(index);
            assert_eq!(p.slot_index(section, day, time), index);
        }
        assert_eq!(p.day_range(SectionId(1), 2), 20..24);
    }

    fn free_genes(p: &TimetableProblem) -> Vec<Gene> {
        (0..p.genome_len())
            .map(|i| {
                let (section, day, time) = p.slot_at(i);
                Gene::free(section, day, time, p.home_room(section))
            })
            .collect()
    }

    #[test]
    fn test_genome_from_genes_accepts_canonical() {
        let p = problem();
        let genome = p.genome_from_genes(free_genes(&p)).unwrap();
        assert_eq!(genome.len(), 24);
    }

    #[test]
    fn test_genome_from_genes_rejects_length() {
        let p = problem();
        let mut genes = free_genes(&p);
        genes.pop();
        assert_eq!(
            p.genome_from_genes(genes),
            Err(TimetableError::GenomeLength {
                expected: 24,
                actual: 23
            })
        );
    }

    #[test]
    fn test_genome_from_genes_rejects_order() {
        let p = problem();
        let mut genes = free_genes(&p);
        genes.swap(3, 4);
        assert_eq!(
            p.genome_from_genes(genes),
            Err(TimetableError::MisplacedGene { index: 3 })
        );
    }

    #[test]
    fn test_view_resolves_names() {
        let p = problem();
        let gene = Gene {
            day: 1,
            time: 0,
            section: SectionId(0),
            lesson: Lesson::Taught {
                subject: SubjectId(2),
                teacher: p.teachers_for(SubjectId(2))[0],
            },
            room: RoomId(0),
        };
        let view = p.view(&gene);
        assert_eq!(view.subject, "English");
        assert_eq!(view.teacher, "Irona");
        assert_eq!(view.to_string(), "Tue 9:00 [A] English | Irona | M201");

        let free = Gene::free(SectionId(1), 0, 3, RoomId(1));
        let line = p.view(&free).to_string();
        assert_eq!(line, "Mon 12:00 [B] Free | N/A | M202");
    }

    #[test]
    fn test_non_lab_quota_over_days_is_allowed() {
        let config = crate::models::Configuration::new(["Mon"], ["9:00", "10:00"])
            .with_room(Room::regular("M201"))
            .with_section(Section::new("A", "M201"))
            .with_subject(Subject::new("English", 2, ["Irona"]));
        assert!(TimetableProblem::new(config).is_ok());
    }

    #[test]
    fn test_genome_from_genes_rejects_unknown_ids() {
        let p = problem();

        let mut genes = free_genes(&p);
        genes[5].lesson = Lesson::Taught {
            subject: SubjectId(99),
            teacher: TeacherId(0),
        };
        assert_eq!(
            p.genome_from_genes(genes),
            Err(TimetableError::UnknownReference { index: 5 })
        );

        let mut genes = free_genes(&p);
        genes[7].lesson = Lesson::Taught {
            subject: SubjectId(0),
            teacher: TeacherId(99),
        };
        assert_eq!(
            p.genome_from_genes(genes),
            Err(TimetableError::UnknownReference { index: 7 })
        );

        let mut genes = free_genes(&p);
        genes[0].room = RoomId(99);
        assert_eq!(
            p.genome_from_genes(genes),
            Err(TimetableError::UnknownReference { index: 0 })
        );
    }

    #[test]
    fn test_with_penalty_weights_rejects_non_positive() {
        let weights = PenaltyWeights {
            free_day: -10,
            ..PenaltyWeights::default()
        };
        assert!(matches!(
            problem().with_penalty_weights(weights),
            Err(TimetableError::InvalidPenaltyWeights(_))
        ));

        let p = problem()
            .with_penalty_weights(PenaltyWeights::uniform())
            .unwrap();
        assert_eq!(p.weights(), &PenaltyWeights::uniform());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_external_genes_load_through_layout_check() {
        let p = TimetableProblem::new(fixtures::single_lab()).unwrap();

        let short: Vec<Gene> = serde_json::from_str("[]").expect("valid json");
        assert_eq!(
            p.genome_from_genes(short),
            Err(TimetableError::GenomeLength {
                expected: 2,
                actual: 0
            })
        );

        let genome = p.genome_from_genes(free_genes(&p)).unwrap();
        let json = serde_json::to_string(genome.genes()).expect("serializable");
        let genes: Vec<Gene> = serde_json::from_str(&json).expect("round trip");
        assert_eq!(p.genome_from_genes(genes), Ok(genome));
    }
}
