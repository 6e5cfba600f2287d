//! Storage keys for the persisted collections.
//!
//! Each collection lives under one flat key with no prefix or version
//! suffix, so data written by the browser client can be loaded as-is.

/// Student records.
pub const STUDENTS: &str = "students";

/// Teacher records.
pub const TEACHERS: &str = "teachers";

/// Grade records, one per mark given.
pub const GRADES: &str = "grades";

/// Course materials published by teachers.
pub const MATERIALS: &str = "materials";

/// Attendance records, one per student per lesson.
pub const ATTENDANCE: &str = "attendance";

/// Messages between users.
pub const MESSAGES: &str = "messages";

/// Returns every persisted collection key.
#[must_use]
pub fn all_collections() -> Vec<&'static str> {
    vec![STUDENTS, TEACHERS, GRADES, MATERIALS, ATTENDANCE, MESSAGES]
}
