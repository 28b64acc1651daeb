//! Timetabling domain types.
//!
//! - [`Configuration`], [`Section`], [`Subject`], [`Room`]: the input
//! - [`Gene`], [`Lesson`], [`Genome`]: the solution representation

mod config;
mod gene;

#[cfg(test)]
pub(crate) use config::fixtures;
pub use config::{Configuration, Room, RoomKind, Section, Subject};
pub use gene::{Gene, Genome, Lesson, RoomId, SectionId, SubjectId, TeacherId};
