//! Domain types stored in the collections.
//!
//! Field names serialize in camelCase so the JSON matches what the browser
//! client writes. Cross-collection ids (`studentId`, `groupId`, ...) are plain
//! references; nothing checks that they resolve.

use campus_core::{Record, RecordId};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier for the student.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Study group the student belongs to.
    pub group_id: RecordId,
    /// Contact email.
    pub email: String,
    /// Contact phone, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Year of study, starting at 1.
    pub year: u8,
}

/// A teacher record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Academic position, e.g. "Associate Professor".
    pub position: String,
    /// Subjects this teacher leads.
    #[serde(default)]
    pub subject_ids: Vec<RecordId>,
}

/// A study group. Part of the fixed catalog, not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique identifier for the group.
    pub id: RecordId,
    /// Display name, e.g. "CS-21".
    pub name: String,
    /// Course (year) the group is in.
    pub course: u8,
    /// Teacher acting as curator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curator_id: Option<RecordId>,
}

/// A subject taught at the college. Part of the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique identifier for the subject.
    pub id: RecordId,
    /// Subject name.
    pub name: String,
    /// Lead teacher.
    pub teacher_id: RecordId,
    /// Contact hours per semester.
    pub hours: u32,
}

/// One lesson slot in the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Unique identifier for the slot.
    pub id: RecordId,
    /// Group attending.
    pub group_id: RecordId,
    /// Subject taught.
    pub subject_id: RecordId,
    /// Teacher leading the lesson.
    pub teacher_id: RecordId,
    /// Day of the week.
    pub weekday: Weekday,
    /// Start time as "HH:MM".
    pub start: String,
    /// End time as "HH:MM".
    pub end: String,
    /// Room number or name.
    pub room: String,
}

/// A mark given to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    /// Unique identifier for the grade.
    pub id: RecordId,
    /// Student who received it.
    pub student_id: RecordId,
    /// Subject it was given in.
    pub subject_id: RecordId,
    /// The mark on a 2..=5 scale.
    pub grade: u8,
    /// Date it was given.
    pub date: NaiveDate,
    /// Optional teacher comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Attendance outcome for one student at one lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Attended.
    Present,
    /// Did not attend.
    Absent,
    /// Arrived late.
    Late,
    /// Absent with a valid reason.
    Excused,
}

/// An attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: RecordId,
    /// Student the record is for.
    pub student_id: RecordId,
    /// Subject of the lesson.
    pub subject_id: RecordId,
    /// Lesson date.
    pub date: NaiveDate,
    /// Outcome.
    pub status: AttendanceStatus,
}

/// Kind of course material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Lecture notes or slides.
    Lecture,
    /// Homework or lab assignment.
    Assignment,
    /// Reading list or external reference.
    Reference,
}

/// Course material published by a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Unique identifier for the material.
    pub id: RecordId,
    /// Title.
    pub title: String,
    /// Subject it belongs to.
    pub subject_id: RecordId,
    /// Publishing teacher.
    pub teacher_id: RecordId,
    /// Kind of material.
    pub kind: MaterialKind,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Link to the file, if hosted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
}

/// A message between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for the message.
    pub id: RecordId,
    /// Sender id (a student or teacher id).
    pub from_id: RecordId,
    /// Recipient id.
    pub to_id: RecordId,
    /// Subject line.
    pub subject: String,
    /// Message text.
    pub body: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Whether the recipient has opened it.
    #[serde(default)]
    pub read: bool,
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    self.id.as_str()
                }
            }
        )*
    };
}

impl_record!(
    Student,
    Teacher,
    Group,
    Subject,
    ScheduleEntry,
    Grade,
    AttendanceRecord,
    Material,
    Message,
);
