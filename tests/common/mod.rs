//! Shared fixtures for integration tests.

#![allow(dead_code)]

use u_timetable::models::{Configuration, Room, Section, Subject};

pub const DAYS: [&str; 5] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
];

pub const TIMES: [&str; 7] = [
    "9:00-9:50",
    "10:00-10:50",
    "11:00-11:50",
    "12:00-12:50",
    "1:40-2:30",
    "2:40-3:30",
    "3:40-4:30",
];

/// A department week: six sections, seven subjects (two with labs), four
/// lab rooms.
pub fn department() -> Configuration {
    let se = [
        "Kanagaraj",
        "Balamurugan",
        "Vishnu Priya",
        "Sherin",
        "Prakash",
        "Stephen",
        "Gopinath",
    ];
    let oss = [
        "Margaret",
        "Sherin",
        "Vishnu Priya",
        "Mohana Priya",
        "Bhoomika",
        "Kavya",
    ];
    let os = [
        "Mohana Priya",
        "Stephen",
        "Gopinath",
        "Pratap",
        "Sudarshan",
        "Kanagaraj",
    ];
    let english = ["Irona", "Preethi", "Geetha", "Arun", "Abhinav", "Gururaj"];
    let languages = [
        "Premkumar",
        "Ruth",
        "Ravishankar",
        "Neha Singh",
        "Vanshitha",
        "Siya",
    ];

    let mut config = Configuration::new(DAYS, TIMES)
        .with_subject(Subject::new("Software Engineering", 3, se))
        .with_subject(Subject::lab("Software Engineering Lab", 2, se))
        .with_subject(Subject::new("Opensource", 3, oss))
        .with_subject(Subject::lab("Opensource Lab", 2, oss))
        .with_subject(Subject::new("Operating System", 3, os))
        .with_subject(Subject::new("English", 3, english))
        .with_subject(Subject::new("Second Language", 3, languages));

    for lab in ["AL1", "AL2", "M1", "M2"] {
        config = config.with_room(Room::lab(lab));
    }
    for (i, section) in ["A", "B", "C", "D", "E", "F"].into_iter().enumerate() {
        let room = format!("M20{}", i + 1);
        config = config
            .with_room(Room::regular(room.clone()))
            .with_section(Section::new(section, room));
    }
    config
}

/// One section, one day, two slots, one two-hour lab.
pub fn single_lab() -> Configuration {
    Configuration::new(["Monday"], ["9:00", "10:00"])
        .with_room(Room::regular("M201"))
        .with_room(Room::lab("AL1"))
        .with_section(Section::new("A", "M201"))
        .with_subject(Subject::lab("Chemistry Lab", 2, ["Geetha"]))
}
