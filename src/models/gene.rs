//! Genome representation.
//!
//! A [`Gene`] is one (day, time, section) slot with its lesson and room.
//! A [`Genome`] is the full weekly grid for every section, stored in
//! canonical order: `index = (section × days + day) × times + time`.
//!
//! Ids index into the tables of a compiled [`crate::TimetableProblem`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a section in [`crate::models::Configuration::sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionId(pub usize);

/// Index of a subject in [`crate::models::Configuration::subjects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubjectId(pub usize);

/// Index of an interned teacher name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeacherId(pub usize);

/// Index of a room in [`crate::models::Configuration::rooms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomId(pub usize);

/// What happens in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lesson {
    /// No class; rendered as "Free" with teacher "N/A".
    Free,
    /// A subject taught by a teacher.
    Taught {
        subject: SubjectId,
        teacher: TeacherId,
    },
}

impl Lesson {
    pub fn is_free(&self) -> bool {
        matches!(self, Lesson::Free)
    }

    pub fn subject(&self) -> Option<SubjectId> {
        match *self {
            Lesson::Free => None,
            Lesson::Taught { subject, .. } => Some(subject),
        }
    }

    pub fn teacher(&self) -> Option<TeacherId> {
        match *self {
            Lesson::Free => None,
            Lesson::Taught { teacher, .. } => Some(teacher),
        }
    }
}

/// One slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gene {
    pub day: usize,
    pub time: usize,
    pub section: SectionId,
    pub lesson: Lesson,
    pub room: RoomId,
}

impl Gene {
    /// A free slot in the given room.
    pub fn free(section: SectionId, day: usize, time: usize, room: RoomId) -> Self {
        Self {
            day,
            time,
            section,
            lesson: Lesson::Free,
            room,
        }
    }

    /// Whether `other` occupies the same (section, day, time) slot.
    pub fn same_slot(&self, other: &Gene) -> bool {
        self.section == other.section && self.day == other.day && self.time == other.time
    }
}

/// A complete weekly timetable for all sections.
///
/// Genomes are created by the seeders, the genetic operators, or
/// [`crate::TimetableProblem::genome_from_genes`], which checks length and
/// order. The length never changes after construction.
///
/// With the `serde` feature a genome serializes as `{"genes": [...]}` but
/// cannot be deserialized directly: read the gene list as `Vec<Gene>` and
/// pass it to `genome_from_genes`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Genome {
    genes: Vec<Gene>,
}

impl Genome {
    /// Wraps genes already known to be in canonical order.
    pub(crate) fn from_ordered(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Mutable access to individual genes; the slice cannot grow or shrink.
    pub(crate) fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn into_genes(self) -> Vec<Gene> {
        self.genes
    }

    /// Genes of one section, in (day, time) order.
    pub fn section_genes(&self, section: SectionId) -> impl Iterator<Item = &Gene> {
        self.genes.iter().filter(move |g| g.section == section)
    }
}
