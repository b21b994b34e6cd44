//! The roster facade: the single entry point callers invoke.

use std::sync::Arc;

use crate::storage::{RegistrationRepository, StudentRepository, TeacherRepository};

use super::{ConsistencyEngine, QueryEngine, RosterError, TeacherWithStudents};

/// Composes the consistency and query engines into the operations a caller
/// invokes. Multi-key preconditions are checked here so invalid requests
/// never reach an engine.
pub struct RosterService {
    consistency: ConsistencyEngine,
    queries: QueryEngine,
}

impl RosterService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            consistency: ConsistencyEngine::new(students, teachers.clone(), registrations.clone()),
            queries: QueryEngine::new(teachers, registrations),
        }
    }

    pub async fn create_student(&self, email: &str, name: &str) -> Result<(), RosterError> {
        self.consistency.create_student(email, name).await
    }

    pub async fn create_teacher(&self, email: &str, name: &str) -> Result<(), RosterError> {
        self.consistency.create_teacher(email, name).await
    }

    pub async fn register_students(
        &self,
        teacher_email: &str,
        student_emails: &[String],
    ) -> Result<(), RosterError> {
        if student_emails.is_empty() {
            return Err(RosterError::InvalidRequest(
                "students must not be empty".to_string(),
            ));
        }
        self.consistency
            .register_students(teacher_email, student_emails)
            .await
    }

    pub async fn deregister_student(
        &self,
        teacher_email: &str,
        student_email: &str,
        reason: &str,
    ) -> Result<(), RosterError> {
        self.consistency
            .deregister_student(teacher_email, student_email, reason)
            .await
    }

    pub async fn common_students(
        &self,
        teacher_emails: &[String],
    ) -> Result<Vec<String>, RosterError> {
        if teacher_emails.is_empty() {
            return Err(RosterError::InvalidRequest(
                "teacher list must not be empty".to_string(),
            ));
        }
        self.queries.common_students(teacher_emails).await
    }

    pub async fn all_teachers_with_students(
        &self,
    ) -> Result<Vec<TeacherWithStudents>, RosterError> {
        self.queries.all_teachers_with_students().await
    }
}
