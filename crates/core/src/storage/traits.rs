use async_trait::async_trait;

use crate::roster::{Registration, Student, Teacher};

use super::Result;

/// Repository for student records.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Upserts a student row. An existing row with the same email is
    /// overwritten, with no distinct "already exists" signal.
    async fn put_student(&self, student: &Student) -> Result<()>;

    /// Gets a student by email.
    async fn get_student(&self, email: &str) -> Result<Option<Student>>;
}

/// Repository for teacher records.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Upserts a teacher row.
    async fn put_teacher(&self, teacher: &Teacher) -> Result<()>;

    /// Gets a teacher by email.
    async fn get_teacher(&self, email: &str) -> Result<Option<Teacher>>;

    /// Gets all teachers whose emails appear in `emails`.
    ///
    /// Returns only the subset that exists; callers compare against the
    /// requested key set to detect gaps.
    async fn batch_get_teachers(&self, emails: &[String]) -> Result<Vec<Teacher>>;

    /// Returns every teacher in the collection.
    async fn scan_teachers(&self) -> Result<Vec<Teacher>>;
}

/// Repository for registration records, the join rows realizing the
/// many-to-many teacher/student association.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Writes all registrations as a single atomic batch.
    ///
    /// Either every pair is written or none is; no partial-pair insertion
    /// is observable on failure.
    async fn put_registrations(&self, registrations: &[Registration]) -> Result<()>;

    /// Deletes one registration row. Succeeds as a no-op when the row is
    /// absent.
    async fn delete_registration(&self, teacher_email: &str, student_email: &str) -> Result<()>;

    /// Gets all registrations sharing `teacher_email` as partition key.
    async fn get_registrations_by_teacher(&self, teacher_email: &str)
        -> Result<Vec<Registration>>;
}
