//! In-memory roster store used by the engine tests.
//!
//! Keeps insertion order for teachers and registrations so scan-order
//! assertions are deterministic, and counts batch writes so tests can assert
//! that failed validations issue zero writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::storage::{
    RegistrationRepository, RepositoryError, Result, StudentRepository, TeacherRepository,
};

use super::{Registration, Student, Teacher};

pub(crate) struct MemoryRoster {
    students: RwLock<HashMap<String, Student>>,
    teachers: RwLock<Vec<Teacher>>,
    registrations: RwLock<Vec<Registration>>,
    batch_writes: AtomicU64,
    batch_gets: AtomicU64,
    fail_next_batch_write: RwLock<bool>,
}

impl MemoryRoster {
    pub(crate) fn new() -> Self {
        Self {
            students: RwLock::new(HashMap::new()),
            teachers: RwLock::new(Vec::new()),
            registrations: RwLock::new(Vec::new()),
            batch_writes: AtomicU64::new(0),
            batch_gets: AtomicU64::new(0),
            fail_next_batch_write: RwLock::new(false),
        }
    }

    pub(crate) async fn seed_student(&self, email: &str, name: &str) {
        self.students
            .write()
            .await
            .insert(email.to_string(), Student::new(email, name));
    }

    pub(crate) async fn seed_teacher(&self, email: &str, name: &str) {
        self.teachers.write().await.push(Teacher::new(email, name));
    }

    pub(crate) async fn seed_registration(&self, teacher_email: &str, student_email: &str) {
        self.registrations
            .write()
            .await
            .push(Registration::new(teacher_email, student_email));
    }

    pub(crate) async fn registrations_for(&self, teacher_email: &str) -> Vec<Registration> {
        self.registrations
            .read()
            .await
            .iter()
            .filter(|r| r.teacher_email == teacher_email)
            .cloned()
            .collect()
    }

    pub(crate) async fn registration_write_batches(&self) -> u64 {
        self.batch_writes.load(Ordering::SeqCst)
    }

    pub(crate) async fn batch_get_calls(&self) -> u64 {
        self.batch_gets.load(Ordering::SeqCst)
    }

    pub(crate) async fn fail_next_batch_write(&self) {
        *self.fail_next_batch_write.write().await = true;
    }
}

#[async_trait]
impl StudentRepository for MemoryRoster {
    async fn put_student(&self, student: &Student) -> Result<()> {
        self.students
            .write()
            .await
            .insert(student.email.clone(), student.clone());
        Ok(())
    }

    async fn get_student(&self, email: &str) -> Result<Option<Student>> {
        Ok(self.students.read().await.get(email).cloned())
    }
}

#[async_trait]
impl TeacherRepository for MemoryRoster {
    async fn put_teacher(&self, teacher: &Teacher) -> Result<()> {
        let mut teachers = self.teachers.write().await;
        match teachers.iter_mut().find(|t| t.email == teacher.email) {
            Some(existing) => *existing = teacher.clone(),
            None => teachers.push(teacher.clone()),
        }
        Ok(())
    }

    async fn get_teacher(&self, email: &str) -> Result<Option<Teacher>> {
        Ok(self
            .teachers
            .read()
            .await
            .iter()
            .find(|t| t.email == email)
            .cloned())
    }

    async fn batch_get_teachers(&self, emails: &[String]) -> Result<Vec<Teacher>> {
        self.batch_gets.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .teachers
            .read()
            .await
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
impl RegistrationRepository for MemoryRoster {
    async fn put_registrations(&self, registrations: &[Registration]) -> Result<()> {
        let mut fail = self.fail_next_batch_write.write().await;
        if *fail {
            *fail = false;
            return Err(RepositoryError::QueryFailed(
                "injected batch write failure".to_string(),
            ));
        }
        drop(fail);

        self.batch_writes.fetch_add(1, Ordering::SeqCst);
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
        Ok(self.registrations_for(teacher_email).await)
    }
}
