//! Relationship query engine.
//!
//! Answers set-algebra questions the store cannot: the per-teacher fetches
//! are independent range queries composed into a derived, in-memory result.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::storage::{RegistrationRepository, TeacherRepository};

use super::{Registration, RosterError, TeacherWithStudents};

/// Derives relationship views from independent single-collection reads.
pub struct QueryEngine {
    teachers: Arc<dyn TeacherRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl QueryEngine {
    pub fn new(
        teachers: Arc<dyn TeacherRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            teachers,
            registrations,
        }
    }

    /// Fetches registrations for each teacher concurrently.
    ///
    /// The fetches have no data dependency on each other; the result keeps
    /// the order of `teacher_emails`, not fetch completion order.
    async fn registrations_by_teacher(
        &self,
        teacher_emails: &[String],
    ) -> Result<Vec<(String, Vec<Registration>)>, RosterError> {
        let fetches = teacher_emails.iter().map(|email| async move {
            let rows = self
                .registrations
                .get_registrations_by_teacher(email)
                .await?;
            Ok::<_, RosterError>((email.clone(), rows))
        });

        try_join_all(fetches).await
    }

    /// Returns the set of students registered to every teacher in
    /// `teacher_emails`.
    ///
    /// Every requested teacher must exist; the first missing one (in request
    /// order) fails the query. An empty intersection is an empty list, not
    /// an error.
    pub async fn common_students(
        &self,
        teacher_emails: &[String],
    ) -> Result<Vec<String>, RosterError> {
        let found = self.teachers.batch_get_teachers(teacher_emails).await?;
        let found_emails: HashSet<&str> = found.iter().map(|t| t.email.as_str()).collect();
        if let Some(missing) = teacher_emails
            .iter()
            .find(|email| !found_emails.contains(email.as_str()))
        {
            return Err(RosterError::reference_not_found_with_email(
                "teacher", missing,
            ));
        }

        let mut per_teacher = self.registrations_by_teacher(teacher_emails).await?;

        // Single teacher: the full list, no intersection needed.
        if let [(_, rows)] = per_teacher.as_slice() {
            return Ok(rows.iter().map(|r| r.student_email.clone()).collect());
        }

        // Fold by intersection, starting from the first teacher's list so
        // the result keeps that teacher's registration order.
        let (_, first) = per_teacher.remove(0);
        let mut common: Vec<String> = first.into_iter().map(|r| r.student_email).collect();
        for (_, rows) in &per_teacher {
            let students: HashSet<&str> =
                rows.iter().map(|r| r.student_email.as_str()).collect();
            common.retain(|email| students.contains(email.as_str()));
        }

        Ok(common)
    }

    /// Returns every teacher with the students registered to them, in the
    /// order the teacher collection was scanned.
    pub async fn all_teachers_with_students(
        &self,
    ) -> Result<Vec<TeacherWithStudents>, RosterError> {
        let teachers = self.teachers.scan_teachers().await?;
        if teachers.is_empty() {
            return Err(RosterError::no_data("teachers"));
        }

        let teacher_emails: Vec<String> = teachers.into_iter().map(|t| t.email).collect();
        let per_teacher = self.registrations_by_teacher(&teacher_emails).await?;

        Ok(per_teacher
            .into_iter()
            .map(|(email, rows)| TeacherWithStudents {
                email,
                students: rows.into_iter().map(|r| r.student_email).collect(),
            })
            .collect())
    }
}
