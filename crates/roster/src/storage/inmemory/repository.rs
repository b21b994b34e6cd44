//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::roster::{Registration, Student, Teacher};
use roster_core::storage::{
    RegistrationRepository, Result, StudentRepository, TeacherRepository,
};

/// In-memory storage backend for tests and local development.
///
/// Teachers and registrations live in `Vec`s so scans and partition queries
/// return rows in insertion order, matching how the tests reason about
/// ordering. Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    students: Arc<RwLock<HashMap<String, Student>>>,
    teachers: Arc<RwLock<Vec<Teacher>>>,
    registrations: Arc<RwLock<Vec<Registration>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn put_student(&self, student: &Student) -> Result<()> {
        self.students
            .write()
            .await
            .insert(student.email.clone(), student.clone());
        Ok(())
    }

    async fn get_student(&self, email: &str) -> Result<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(email).cloned())
    }
}

#[async_trait]
impl TeacherRepository for InMemoryRepository {
    async fn put_teacher(&self, teacher: &Teacher) -> Result<()> {
        let mut teachers = self.teachers.write().await;
        match teachers.iter_mut().find(|t| t.email == teacher.email) {
            Some(existing) => *existing = teacher.clone(),
            None => teachers.push(teacher.clone()),
        }
        Ok(())
    }

    async fn get_teacher(&self, email: &str) -> Result<Option<Teacher>> {
        let teachers = self.teachers.read().await;
        Ok(teachers.iter().find(|t| t.email == email).cloned())
    }

    async fn batch_get_teachers(&self, emails: &[String]) -> Result<Vec<Teacher>> {
        let teachers = self.teachers.read().await;
        Ok(teachers
            .iter()
            .filter(|t| emails.contains(&t.email))
            .cloned()
            .collect())
    }

    async fn scan_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.read().await.clone())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRepository {
    async fn put_registrations(&self, registrations: &[Registration]) -> Result<()> {
        let mut rows = self.registrations.write().await;
        for registration in registrations {
            rows.retain(|r| {
                r.teacher_email != registration.teacher_email
                    || r.student_email != registration.student_email
            });
            rows.push(registration.clone());
        }
        Ok(())
    }

    async fn delete_registration(&self, teacher_email: &str, student_email: &str) -> Result<()> {
        self.registrations
            .write()
            .await
            .retain(|r| r.teacher_email != teacher_email || r.student_email != student_email);
        Ok(())
    }

    async fn get_registrations_by_teacher(
        &self,
        teacher_email: &str,
    ) -> Result<Vec<Registration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations
            .iter()
            .filter(|r| r.teacher_email == teacher_email)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_student_put_and_get() {
        let repo = InMemoryRepository::new();
        let student = Student::new("a@x.com", "Alice");

        repo.put_student(&student).await.unwrap();

        let retrieved = repo.get_student("a@x.com").await.unwrap();
        assert_eq!(retrieved, Some(student));
    }

    #[tokio::test]
    async fn test_student_get_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.get_student("ghost@x.com").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_student_put_overwrites() {
        let repo = InMemoryRepository::new();

        repo.put_student(&Student::new("a@x.com", "Alice")).await.unwrap();
        repo.put_student(&Student::new("a@x.com", "Alicia")).await.unwrap();

        let retrieved = repo.get_student("a@x.com").await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Alicia");
    }

    #[tokio::test]
    async fn test_teacher_batch_get_returns_existing_subset() {
        let repo = InMemoryRepository::new();
        repo.put_teacher(&Teacher::new("t1@x.com", "T1")).await.unwrap();
        repo.put_teacher(&Teacher::new("t2@x.com", "T2")).await.unwrap();

        let emails = vec![
            "t1@x.com".to_string(),
            "ghost@x.com".to_string(),
            "t2@x.com".to_string(),
        ];
        let found = repo.batch_get_teachers(&emails).await.unwrap();

        let found_emails: Vec<&str> = found.iter().map(|t| t.email.as_str()).collect();
        assert_eq!(found_emails, vec!["t1@x.com", "t2@x.com"]);
    }

    #[tokio::test]
    async fn test_teacher_scan_preserves_insertion_order() {
        let repo = InMemoryRepository::new();
        repo.put_teacher(&Teacher::new("z@x.com", "Z")).await.unwrap();
        repo.put_teacher(&Teacher::new("a@x.com", "A")).await.unwrap();

        let teachers = repo.scan_teachers().await.unwrap();
        let emails: Vec<&str> = teachers.iter().map(|t| t.email.as_str()).collect();
        assert_eq!(emails, vec!["z@x.com", "a@x.com"]);
    }

    #[tokio::test]
    async fn test_registration_query_by_teacher() {
        let repo = InMemoryRepository::new();
        let batch = vec![
            Registration::new("t@x.com", "a@x.com"),
            Registration::new("t@x.com", "b@x.com"),
            Registration::new("u@x.com", "a@x.com"),
        ];
        repo.put_registrations(&batch).await.unwrap();

        let rows = repo.get_registrations_by_teacher("t@x.com").await.unwrap();
        assert_eq!(
            rows,
            vec![
                Registration::new("t@x.com", "a@x.com"),
                Registration::new("t@x.com", "b@x.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_registration_put_is_keyed_upsert() {
        let repo = InMemoryRepository::new();
        let batch = vec![Registration::new("t@x.com", "a@x.com")];

        repo.put_registrations(&batch).await.unwrap();
        repo.put_registrations(&batch).await.unwrap();

        let rows = repo.get_registrations_by_teacher("t@x.com").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_registration_delete_is_noop_when_absent() {
        let repo = InMemoryRepository::new();

        repo.delete_registration("t@x.com", "ghost@x.com")
            .await
            .unwrap();

        let rows = repo.get_registrations_by_teacher("t@x.com").await.unwrap();
        assert!(rows.is_empty());
    }
}
