//! Application state loaded from the collection store.
//!
//! `CampusState` is built once at startup and handed to whatever needs it.
//! Mutations go through the store, which returns the new collection; the
//! caller assigns it back into the state.

use crate::backend::Backend;
use crate::collection::CollectionStore;
use crate::keys;
use crate::seed;
use crate::types::{
    AttendanceRecord, Grade, Group, Material, Message, ScheduleEntry, Student, Subject, Teacher,
};

/// Everything the application shows, in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CampusState {
    /// Persisted under [`keys::STUDENTS`].
    pub students: Vec<Student>,
    /// Persisted under [`keys::TEACHERS`].
    pub teachers: Vec<Teacher>,
    /// Persisted under [`keys::GRADES`].
    pub grades: Vec<Grade>,
    /// Persisted under [`keys::MATERIALS`].
    pub materials: Vec<Material>,
    /// Persisted under [`keys::ATTENDANCE`].
    pub attendance: Vec<AttendanceRecord>,
    /// Persisted under [`keys::MESSAGES`].
    pub messages: Vec<Message>,
    /// Fixed catalog.
    pub groups: Vec<Group>,
    /// Fixed catalog.
    pub subjects: Vec<Subject>,
    /// Fixed catalog.
    pub schedule: Vec<ScheduleEntry>,
}

impl CampusState {
    /// Seed any collection that has never been stored, then load them all.
    ///
    /// Collections a returning user already has are left as they are.
    pub fn bootstrap<B: Backend>(store: &CollectionStore<B>) -> Self {
        store.initialize(keys::STUDENTS, &seed::students());
        store.initialize(keys::TEACHERS, &seed::teachers());
        store.initialize(keys::GRADES, &seed::grades());
        store.initialize(keys::MATERIALS, &seed::materials());
        store.initialize(keys::ATTENDANCE, &seed::attendance());
        store.initialize(keys::MESSAGES, &seed::messages());

        let state = Self::load(store);
        tracing::info!(
            students = state.students.len(),
            teachers = state.teachers.len(),
            grades = state.grades.len(),
            "Campus state loaded"
        );
        state
    }

    /// Reload every persisted collection from the store.
    pub fn refresh<B: Backend>(&mut self, store: &CollectionStore<B>) {
        let fresh = Self::load(store);
        self.students = fresh.students;
        self.teachers = fresh.teachers;
        self.grades = fresh.grades;
        self.materials = fresh.materials;
        self.attendance = fresh.attendance;
        self.messages = fresh.messages;
    }

    fn load<B: Backend>(store: &CollectionStore<B>) -> Self {
        Self {
            students: store.load(keys::STUDENTS, seed::students()),
            teachers: store.load(keys::TEACHERS, seed::teachers()),
            grades: store.load(keys::GRADES, seed::grades()),
            materials: store.load(keys::MATERIALS, seed::materials()),
            attendance: store.load(keys::ATTENDANCE, seed::attendance()),
            messages: store.load(keys::MESSAGES, seed::messages()),
            groups: seed::groups(),
            subjects: seed::subjects(),
            schedule: seed::schedule(),
        }
    }

    /// Look up a student by id.
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Grades given to one student, newest first.
    #[must_use]
    pub fn grades_for_student(&self, student_id: &str) -> Vec<&Grade> {
        let mut grades: Vec<&Grade> = self
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .collect();
        grades.sort_by(|a, b| b.date.cmp(&a.date));
        grades
    }

    /// Mean of a student's grades, or `None` if they have none.
    #[must_use]
    pub fn average_grade(&self, student_id: &str) -> Option<f64> {
        let grades = self.grades_for_student(student_id);
        if grades.is_empty() {
            return None;
        }
        let total: u32 = grades.iter().map(|g| u32::from(g.grade)).sum();
        Some(f64::from(total) / f64::from(u32::try_from(grades.len()).ok()?))
    }

    /// Name of a study group.
    #[must_use]
    pub fn group_name(&self, group_id: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.name.as_str())
    }

    /// Timetable for one group, ordered by weekday and start time.
    #[must_use]
    pub fn schedule_for_group(&self, group_id: &str) -> Vec<&ScheduleEntry> {
        let mut slots: Vec<&ScheduleEntry> = self
            .schedule
            .iter()
            .filter(|s| s.group_id == group_id)
            .collect();
        slots.sort_by(|a, b| {
            a.weekday
                .num_days_from_monday()
                .cmp(&b.weekday.num_days_from_monday())
                .then_with(|| a.start.cmp(&b.start))
        });
        slots
    }

    /// Unread messages addressed to `user_id`.
    #[must_use]
    pub fn unread_messages(&self, user_id: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| m.to_id == user_id && !m.read)
            .count()
    }
}
