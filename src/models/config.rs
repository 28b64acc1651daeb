//! Timetabling input: days, time slots, sections, subjects, rooms.
//!
//! A [`Configuration`] is plain data supplied by an external loader. It is
//! checked by [`crate::validation::validate_configuration`] and compiled
//! into a [`crate::TimetableProblem`] before any genome is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoomKind {
    /// Ordinary classroom; usable as a section's home room.
    #[default]
    Regular,
    /// Laboratory; lab subjects must be taught here.
    Lab,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: RoomKind,
}

impl Room {
    /// Creates a regular classroom.
    pub fn regular(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RoomKind::Regular,
        }
    }

    /// Creates a lab room.
    pub fn lab(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RoomKind::Lab,
        }
    }

    pub fn is_lab(&self) -> bool {
        self.kind == RoomKind::Lab
    }
}

/// A class section with its fixed home room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    pub name: String,
    /// Room used for every non-lab subject taught to this section.
    pub home_room: String,
}

impl Section {
    pub fn new(name: impl Into<String>, home_room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home_room: home_room.into(),
        }
    }
}

/// A subject with its weekly quota and eligible teachers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subject {
    pub name: String,

    /// Weekly hour quota per section.
    pub hours: u32,

    /// Lab subjects are taught in contiguous pairs in a lab room.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_lab: bool,

    /// Eligible teacher pool.
    pub teachers: Vec<String>,

    /// For a lab, the non-lab subject whose teacher it shares.
    ///
    /// When `None`, a lab named `"<base> Lab"` is linked to `<base>` if
    /// such a non-lab subject exists.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base: Option<String>,
}

impl Subject {
    /// Creates a regular (non-lab) subject.
    pub fn new<I, T>(name: impl Into<String>, hours: u32, teachers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            hours,
            is_lab: false,
            teachers: teachers.into_iter().map(Into::into).collect(),
            base: None,
        }
    }

    /// Creates a lab subject.
    pub fn lab<I, T>(name: impl Into<String>, hours: u32, teachers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            is_lab: true,
            ..Self::new(name, hours, teachers)
        }
    }

    /// Links this lab to its base subject explicitly.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

/// Immutable description of one timetabling instance.
///
/// # Examples
///
/// ```
/// use u_timetable::models::{Configuration, Room, Section, Subject};
///
/// let config = Configuration::new(["Mon", "Tue"], ["9:00", "10:00", "11:00"])
///     .with_room(Room::regular("M201"))
///     .with_room(Room::lab("AL1"))
///     .with_section(Section::new("A", "M201"))
///     .with_subject(Subject::new("English", 2, ["Irona"]))
///     .with_subject(Subject::lab("Physics Lab", 2, ["Arun"]));
///
/// assert_eq!(config.slots_per_section(), 6);
/// assert!(u_timetable::validation::validate_configuration(&config).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// Ordered teaching days.
    pub days: Vec<String>,
    /// Ordered time slots within a day.
    pub times: Vec<String>,
    pub sections: Vec<Section>,
    pub subjects: Vec<Subject>,
    /// All rooms, home rooms and labs alike.
    pub rooms: Vec<Room>,
}

impl Configuration {
    /// Creates a configuration with the given day and slot grid.
    pub fn new<D, T>(days: D, times: T) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            times: times.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Number of weekly slots available to one section.
    pub fn slots_per_section(&self) -> usize {
        self.days.len() * self.times.len()
    }

    /// Genome length: one gene per (section, day, time).
    pub fn genome_len(&self) -> usize {
        self.sections.len() * self.slots_per_section()
    }

    /// Names of all lab rooms, in declaration order.
    pub fn lab_rooms(&self) -> impl Iterator<Item = &str> {
        self.rooms
            .iter()
            .filter(|r| r.is_lab())
            .map(|r| r.name.as_str())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two sections, three days, four slots, one lab with a base subject.
    pub(crate) fn small() -> Configuration {
        let se = ["Kanagaraj", "Sherin"];
        Configuration::new(["Mon", "Tue", "Wed"], ["9:00", "10:00", "11:00", "12:00"])
            .with_room(Room::regular("M201"))
            .with_room(Room::regular("M202"))
            .with_room(Room::lab("AL1"))
            .with_room(Room::lab("AL2"))
            .with_section(Section::new("A", "M201"))
            .with_section(Section::new("B", "M202"))
            .with_subject(Subject::new("Software Engineering", 2, se))
            .with_subject(Subject::lab("Software Engineering Lab", 2, se))
            .with_subject(Subject::new("English", 3, ["Irona", "Preethi"]))
            .with_subject(Subject::new("Operating System", 2, ["Stephen"]))
    }

    /// One section, one day, two slots, a single two-hour lab.
    pub(crate) fn single_lab() -> Configuration {
        Configuration::new(["Mon"], ["9:00", "10:00"])
            .with_room(Room::regular("M201"))
            .with_room(Room::lab("AL1"))
            .with_section(Section::new("A", "M201"))
            .with_subject(Subject::lab("Chemistry Lab", 2, ["Geetha"]))
    }
}
