use serde::{Deserialize, Serialize};

/// A student in the roster, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub email: String,
    pub name: String,
}

/// A teacher in the roster, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub email: String,
    pub name: String,
}

/// One enrollment record: the join row realizing the many-to-many
/// teacher/student relationship. Carries nothing beyond its composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub teacher_email: String,
    pub student_email: String,
}

/// A teacher together with the emails of all students registered to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherWithStudents {
    pub email: String,
    pub students: Vec<String>,
}

impl Student {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

impl Teacher {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

impl Registration {
    pub fn new(teacher_email: impl Into<String>, student_email: impl Into<String>) -> Self {
        Self {
            teacher_email: teacher_email.into(),
            student_email: student_email.into(),
        }
    }
}
