//! Roster consistency engine.
//!
//! The store enforces no foreign keys across the three collections, so this
//! engine is the only guard against dangling references at creation time.
//! Mutations follow a two-phase shape: validate every referenced row exists,
//! then commit the write. The window between check and write is an accepted
//! race (a row could vanish in between); the store offers no cross-table
//! transaction that would close it.

use std::sync::Arc;

use crate::storage::{RegistrationRepository, StudentRepository, TeacherRepository};

use super::{Registration, RosterError, Student, Teacher};

/// Validates referential existence before mutating relationships.
pub struct ConsistencyEngine {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl ConsistencyEngine {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            students,
            teachers,
            registrations,
        }
    }

    /// Upserts a student row. Repeated calls with the same email overwrite
    /// the name; there is no duplicate rejection.
    pub async fn create_student(&self, email: &str, name: &str) -> Result<(), RosterError> {
        let student = Student::new(email, name);
        self.students.put_student(&student).await?;
        Ok(())
    }

    /// Upserts a teacher row, with the same semantics as student creation.
    pub async fn create_teacher(&self, email: &str, name: &str) -> Result<(), RosterError> {
        let teacher = Teacher::new(email, name);
        self.teachers.put_teacher(&teacher).await?;
        Ok(())
    }

    /// Registers all `student_emails` to `teacher_email`.
    ///
    /// Existence validation is front-loaded: the teacher first, then each
    /// student in list order. The first missing student aborts the whole
    /// operation before any write is issued. Once everything is confirmed,
    /// all pairs go to the store as one atomic batch.
    pub async fn register_students(
        &self,
        teacher_email: &str,
        student_emails: &[String],
    ) -> Result<(), RosterError> {
        if self.teachers.get_teacher(teacher_email).await?.is_none() {
            return Err(RosterError::reference_not_found("teacher"));
        }

        for student_email in student_emails {
            if self.students.get_student(student_email).await?.is_none() {
                return Err(RosterError::reference_not_found_with_email(
                    "student",
                    student_email,
                ));
            }
        }

        let registrations: Vec<Registration> = student_emails
            .iter()
            .map(|student_email| Registration::new(teacher_email, student_email))
            .collect();

        self.registrations.put_registrations(&registrations).await?;

        tracing::debug!(
            teacher = teacher_email,
            count = registrations.len(),
            "registered students to teacher"
        );

        Ok(())
    }

    /// Removes the registration of one student with one teacher.
    ///
    /// Both referenced rows must exist, but deleting an absent registration
    /// is not an error: the delete is idempotent. `reason` is recorded for
    /// audit only and never affects behavior.
    pub async fn deregister_student(
        &self,
        teacher_email: &str,
        student_email: &str,
        reason: &str,
    ) -> Result<(), RosterError> {
        if self.teachers.get_teacher(teacher_email).await?.is_none() {
            return Err(RosterError::reference_not_found("teacher"));
        }

        if self.students.get_student(student_email).await?.is_none() {
            return Err(RosterError::reference_not_found_with_email(
                "student",
                student_email,
            ));
        }

        self.registrations
            .delete_registration(teacher_email, student_email)
            .await?;

        tracing::info!(
            teacher = teacher_email,
            student = student_email,
            reason,
            "deregistered student from teacher"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::MemoryRoster;
    use super::*;

    fn engine(store: &Arc<MemoryRoster>) -> ConsistencyEngine {
        ConsistencyEngine::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_create_student_round_trip() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        engine
            .create_student("a@x.com", "Alice")
            .await
            .unwrap();

        let student = store.get_student("a@x.com").await.unwrap().unwrap();
        assert_eq!(student, Student::new("a@x.com", "Alice"));
    }

    #[tokio::test]
    async fn test_create_student_is_an_upsert() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        engine.create_student("a@x.com", "Alice").await.unwrap();
        engine.create_student("a@x.com", "Alicia").await.unwrap();

        let student = store.get_student("a@x.com").await.unwrap().unwrap();
        assert_eq!(student.name, "Alicia");
    }

    #[tokio::test]
    async fn test_register_fails_when_teacher_missing_and_writes_nothing() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_student("a@x.com", "Alice").await;

        let result = engine
            .register_students("ghost@x.com", &["a@x.com".to_string()])
            .await;

        assert_eq!(
            result,
            Err(RosterError::reference_not_found("teacher"))
        );
        assert_eq!(store.registration_write_batches().await, 0);
        assert!(store.registrations_for("ghost@x.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_register_aborts_on_first_missing_student() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_teacher("t@x.com", "T").await;
        store.seed_student("a@x.com", "Alice").await;
        // b@x.com intentionally missing, c@x.com never checked

        let emails = vec![
            "a@x.com".to_string(),
            "b@x.com".to_string(),
            "c@x.com".to_string(),
        ];
        let result = engine.register_students("t@x.com", &emails).await;

        assert_eq!(
            result,
            Err(RosterError::reference_not_found_with_email(
                "student", "b@x.com"
            ))
        );
        assert_eq!(store.registration_write_batches().await, 0);
    }

    #[tokio::test]
    async fn test_register_issues_exactly_one_batch_of_n_pairs() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_teacher("t@x.com", "T").await;
        store.seed_student("a@x.com", "Alice").await;
        store.seed_student("b@x.com", "Bob").await;

        let emails = vec!["a@x.com".to_string(), "b@x.com".to_string()];
        engine.register_students("t@x.com", &emails).await.unwrap();

        assert_eq!(store.registration_write_batches().await, 1);
        let rows = store.registrations_for("t@x.com").await;
        assert_eq!(
            rows,
            vec![
                Registration::new("t@x.com", "a@x.com"),
                Registration::new("t@x.com", "b@x.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_surfaces_store_failure() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_teacher("t@x.com", "T").await;
        store.seed_student("a@x.com", "Alice").await;
        store.fail_next_batch_write().await;

        let result = engine
            .register_students("t@x.com", &["a@x.com".to_string()])
            .await;

        assert!(matches!(result, Err(RosterError::Store(_))));
        assert!(store.registrations_for("t@x.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_deregister_is_idempotent() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_teacher("t@x.com", "T").await;
        store.seed_student("a@x.com", "Alice").await;
        engine
            .register_students("t@x.com", &["a@x.com".to_string()])
            .await
            .unwrap();

        engine
            .deregister_student("t@x.com", "a@x.com", "graduated")
            .await
            .unwrap();
        assert!(store.registrations_for("t@x.com").await.is_empty());

        // Second delete of the same row is not an error.
        engine
            .deregister_student("t@x.com", "a@x.com", "graduated")
            .await
            .unwrap();
        assert!(store.registrations_for("t@x.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_deregister_validates_references() {
        let store = Arc::new(MemoryRoster::new());
        let engine = engine(&store);

        store.seed_teacher("t@x.com", "T").await;

        let result = engine
            .deregister_student("t@x.com", "ghost@x.com", "typo")
            .await;
        assert_eq!(
            result,
            Err(RosterError::reference_not_found_with_email(
                "student",
                "ghost@x.com"
            ))
        );

        let result = engine
            .deregister_student("ghost@x.com", "a@x.com", "typo")
            .await;
        assert_eq!(result, Err(RosterError::reference_not_found("teacher")));
    }
}
