//! Structural validation of a timetabling configuration.
//!
//! Detects infeasibility that is visible from the configuration alone, so
//! that it is reported before any generation runs:
//! - Empty day, slot, or section lists
//! - Duplicate names
//! - Home rooms that do not exist or are labs
//! - Subjects without teachers
//! - Quotas that cannot fit in a section's week
//! - Lab subjects without any lab room
//! - Broken lab → base subject links

use crate::models::Configuration;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No days, no time slots, or no sections.
    EmptyDimension,
    /// Two entities of the same kind share a name.
    DuplicateId,
    /// A section's home room is unknown or is a lab.
    InvalidRoomReference,
    /// A subject has no eligible teacher.
    EmptyTeacherPool,
    /// Weekly hours cannot fit in a section's slots.
    QuotaExceedsSlots,
    /// Lab subjects exist but no room is a lab.
    MissingLabRooms,
    /// A lab's base subject is unknown, is itself a lab, or is set on a non-lab.
    InvalidBaseSubject,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration.
///
/// Quotas are checked per subject and in total. The GA alone treats weekly
/// hours as upper bounds and would tolerate an overfull week, but a
/// [`PlacementSolver`](crate::seed::PlacementSolver) must place every hour
/// exactly, so a week that cannot hold all quotas at once is rejected.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_configuration(config: &Configuration) -> ValidationResult {
    let mut errors = Vec::new();

    if config.days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDimension,
            "Configuration has no days",
        ));
    }
    if config.times.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDimension,
            "Configuration has no time slots",
        ));
    }
    if config.sections.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDimension,
            "Configuration has no sections",
        ));
    }

    check_unique("day", config.days.iter().map(String::as_str), &mut errors);
    check_unique(
        "time slot",
        config.times.iter().map(String::as_str),
        &mut errors,
    );
    check_unique(
        "section",
        config.sections.iter().map(|s| s.name.as_str()),
        &mut errors,
    );
    check_unique(
        "subject",
        config.subjects.iter().map(|s| s.name.as_str()),
        &mut errors,
    );
    check_unique(
        "room",
        config.rooms.iter().map(|r| r.name.as_str()),
        &mut errors,
    );

    // Home rooms
    let rooms: HashMap<&str, bool> = config
        .rooms
        .iter()
        .map(|r| (r.name.as_str(), r.is_lab()))
        .collect();
    for section in &config.sections {
        match rooms.get(section.home_room.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoomReference,
                format!(
                    "Section '{}' references unknown home room '{}'",
                    section.name, section.home_room
                ),
            )),
            Some(true) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoomReference,
                format!(
                    "Section '{}' uses lab room '{}' as its home room",
                    section.name, section.home_room
                ),
            )),
            Some(false) => {}
        }
    }

    // Teacher pools
    for subject in &config.subjects {
        if subject.teachers.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTeacherPool,
                format!("Subject '{}' has no eligible teachers", subject.name),
            ));
        }
    }

    // Quotas
    let slots = config.slots_per_section();
    if slots > 0 {
        let mut total = 0u64;
        for subject in &config.subjects {
            total += u64::from(subject.hours);
            if subject.hours as usize > slots {
                errors.push(ValidationError::new(
                    ValidationErrorKind::QuotaExceedsSlots,
                    format!(
                        "Subject '{}' needs {} hours but a section has only {} slots per week",
                        subject.name, subject.hours, slots
                    ),
                ));
            }
        }
        // A solver placement fills every hour, so the sum must fit as well.
        if total > slots as u64 {
            errors.push(ValidationError::new(
                ValidationErrorKind::QuotaExceedsSlots,
                format!(
                    "Subjects need {} hours in total but a section has only {} slots per week",
                    total, slots
                ),
            ));
        }
    }

    // Lab rooms
    if config.subjects.iter().any(|s| s.is_lab) && config.lab_rooms().next().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingLabRooms,
            "Lab subjects are configured but no room is a lab",
        ));
    }

    // Base links
    let subjects: HashMap<&str, bool> = config
        .subjects
        .iter()
        .map(|s| (s.name.as_str(), s.is_lab))
        .collect();
    for subject in &config.subjects {
        let Some(base) = subject.base.as_deref() else {
            continue;
        };
        if !subject.is_lab {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBaseSubject,
                format!("Non-lab subject '{}' declares a base subject", subject.name),
            ));
            continue;
        }
        match subjects.get(base) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBaseSubject,
                format!(
                    "Lab '{}' references unknown base subject '{}'",
                    subject.name, base
                ),
            )),
            Some(true) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBaseSubject,
                format!(
                    "Lab '{}' uses lab '{}' as its base subject",
                    subject.name, base
                ),
            )),
            Some(false) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} name: {name}"),
            ));
        }
    }
}
