//! First-run demo data.
//!
//! The persisted collections are written once by
//! [`CampusState::bootstrap`](crate::CampusState::bootstrap) and then belong to
//! the user. Groups, subjects and the timetable are a fixed catalog and are
//! never persisted.

use campus_core::RecordId;
use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};

use crate::types::{
    AttendanceRecord, AttendanceStatus, Grade, Group, Material, MaterialKind, Message,
    ScheduleEntry, Student, Subject, Teacher,
};

fn id(s: &str) -> RecordId {
    RecordId::new(s)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn student(sid: &str, name: &str, group: &str, email: &str, year: u8) -> Student {
    Student {
        id: id(sid),
        name: name.to_string(),
        group_id: id(group),
        email: email.to_string(),
        phone: None,
        year,
    }
}

/// Seed students.
#[must_use]
pub fn students() -> Vec<Student> {
    vec![
        student("st1", "Ivanov Ivan", "gr1", "ivanov@college.edu", 2),
        student("st2", "Petrova Anna", "gr1", "petrova@college.edu", 2),
        student("st3", "Sidorov Pavel", "gr2", "sidorov@college.edu", 1),
        Student {
            phone: Some("+7 900 123-45-67".to_string()),
            ..student("st4", "Kuznetsova Maria", "gr2", "kuznetsova@college.edu", 1)
        },
    ]
}

/// Seed teachers.
#[must_use]
pub fn teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: id("t1"),
            name: "Smirnov Oleg".to_string(),
            email: "smirnov@college.edu".to_string(),
            position: "Associate Professor".to_string(),
            subject_ids: vec![id("sub1")],
        },
        Teacher {
            id: id("t2"),
            name: "Volkova Elena".to_string(),
            email: "volkova@college.edu".to_string(),
            position: "Senior Lecturer".to_string(),
            subject_ids: vec![id("sub2"), id("sub3")],
        },
    ]
}

/// Seed grades.
#[must_use]
pub fn grades() -> Vec<Grade> {
    let grade = |gid: &str, student: &str, subject: &str, mark: u8, day: u32| Grade {
        id: id(gid),
        student_id: id(student),
        subject_id: id(subject),
        grade: mark,
        date: date(2024, 9, day),
        comment: None,
    };

    vec![
        grade("g1", "st1", "sub1", 5, 16),
        grade("g2", "st2", "sub1", 4, 16),
        grade("g3", "st1", "sub2", 4, 18),
        Grade {
            comment: Some("Late submission".to_string()),
            ..grade("g4", "st3", "sub3", 3, 19)
        },
    ]
}

/// Seed course materials.
#[must_use]
pub fn materials() -> Vec<Material> {
    vec![
        Material {
            id: id("mat1"),
            title: "Lecture 1: Limits".to_string(),
            subject_id: id("sub1"),
            teacher_id: id("t1"),
            kind: MaterialKind::Lecture,
            description: "Definitions and first examples".to_string(),
            url: None,
            published_at: timestamp(2024, 9, 2, 9, 0),
        },
        Material {
            id: id("mat2"),
            title: "Lab 1: Hello, world".to_string(),
            subject_id: id("sub2"),
            teacher_id: id("t2"),
            kind: MaterialKind::Assignment,
            description: "Set up the toolchain and submit the first program".to_string(),
            url: Some("https://college.edu/materials/lab1.pdf".to_string()),
            published_at: timestamp(2024, 9, 3, 12, 30),
        },
    ]
}

/// Seed attendance records.
#[must_use]
pub fn attendance() -> Vec<AttendanceRecord> {
    let record = |aid: &str, student: &str, status: AttendanceStatus| AttendanceRecord {
        id: id(aid),
        student_id: id(student),
        subject_id: id("sub1"),
        date: date(2024, 9, 16),
        status,
    };

    vec![
        record("a1", "st1", AttendanceStatus::Present),
        record("a2", "st2", AttendanceStatus::Late),
        record("a3", "st3", AttendanceStatus::Absent),
    ]
}

/// Seed messages.
#[must_use]
pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: id("m1"),
            from_id: id("t1"),
            to_id: id("st1"),
            subject: "Retake schedule".to_string(),
            body: "The retake is on Friday at 10:00, room 204.".to_string(),
            sent_at: timestamp(2024, 9, 20, 8, 30),
            read: false,
        },
        Message {
            id: id("m2"),
            from_id: id("st2"),
            to_id: id("t2"),
            subject: "Lab 1 question".to_string(),
            body: "Can the lab be submitted as a single file?".to_string(),
            sent_at: timestamp(2024, 9, 19, 17, 5),
            read: true,
        },
    ]
}

/// Study groups.
#[must_use]
pub fn groups() -> Vec<Group> {
    vec![
        Group {
            id: id("gr1"),
            name: "CS-22".to_string(),
            course: 2,
            curator_id: Some(id("t1")),
        },
        Group {
            id: id("gr2"),
            name: "CS-23".to_string(),
            course: 1,
            curator_id: None,
        },
    ]
}

/// Subjects.
#[must_use]
pub fn subjects() -> Vec<Subject> {
    let subject = |sid: &str, name: &str, teacher: &str, hours: u32| Subject {
        id: id(sid),
        name: name.to_string(),
        teacher_id: id(teacher),
        hours,
    };

    vec![
        subject("sub1", "Calculus", "t1", 72),
        subject("sub2", "Programming", "t2", 96),
        subject("sub3", "Databases", "t2", 54),
    ]
}

#[allow(clippy::too_many_arguments)]
fn slot(
    sid: &str,
    group: &str,
    subject: &str,
    teacher: &str,
    weekday: Weekday,
    start: &str,
    end: &str,
    room: &str,
) -> ScheduleEntry {
    ScheduleEntry {
        id: id(sid),
        group_id: id(group),
        subject_id: id(subject),
        teacher_id: id(teacher),
        weekday,
        start: start.to_string(),
        end: end.to_string(),
        room: room.to_string(),
    }
}

/// Weekly timetable.
#[must_use]
pub fn schedule() -> Vec<ScheduleEntry> {
    vec![
        slot("sc1", "gr1", "sub1", "t1", Weekday::Mon, "09:00", "10:30", "204"),
        slot("sc2", "gr1", "sub2", "t2", Weekday::Mon, "10:45", "12:15", "Lab 3"),
        slot("sc3", "gr2", "sub3", "t2", Weekday::Tue, "09:00", "10:30", "118"),
        slot("sc4", "gr1", "sub3", "t2", Weekday::Wed, "13:00", "14:30", "118"),
        slot("sc5", "gr2", "sub1", "t1", Weekday::Thu, "10:45", "12:15", "204"),
    ]
}
