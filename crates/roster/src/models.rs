//! Request and response payloads for the roster API.

use serde::{Deserialize, Serialize};

use roster_core::roster::validation::{validate_email, validate_email_list, validate_non_empty};
use roster_core::roster::TeacherWithStudents;

/// Payload for creating a student (POST /api/students).
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub email: String,
    pub name: String,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email("email", &self.email)?;
        validate_non_empty("name", &self.name)
    }
}

/// Payload for creating a teacher (POST /api/teachers).
#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    pub email: String,
    pub name: String,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email("email", &self.email)?;
        validate_non_empty("name", &self.name)
    }
}

/// Payload for registering students to a teacher (POST /api/register).
#[derive(Debug, Deserialize)]
pub struct RegisterStudentsRequest {
    pub teacher: String,
    pub students: Vec<String>,
}

impl RegisterStudentsRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email("teacher", &self.teacher)?;
        validate_email_list("students", &self.students)
    }
}

/// Payload for deregistering a student (POST /api/deregister).
#[derive(Debug, Deserialize)]
pub struct DeregisterStudentRequest {
    pub teacher: String,
    pub student: String,
    pub reason: String,
}

impl DeregisterStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email("teacher", &self.teacher)?;
        validate_email("student", &self.student)?;
        validate_non_empty("reason", &self.reason)
    }
}

/// Query parameters for GET /api/commonstudents.
///
/// Repeated `teacher=` parameters deserialize into the vector.
#[derive(Debug, Deserialize)]
pub struct CommonStudentsParams {
    #[serde(default)]
    pub teacher: Vec<String>,
}

impl CommonStudentsParams {
    pub fn validate(&self) -> Result<(), String> {
        validate_email_list("teacher", &self.teacher)
    }
}

/// Response body for GET /api/commonstudents.
#[derive(Debug, Serialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

/// Response body for GET /api/teachers.
#[derive(Debug, Serialize)]
pub struct TeachersWithStudentsResponse {
    pub teachers: Vec<TeacherWithStudents>,
}
