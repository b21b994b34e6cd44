//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use roster_core::roster::{Registration, Student, Teacher};
use roster_core::storage::RepositoryError;

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_EMAIL: &str = "email";
pub const ATTR_NAME: &str = "name";
pub const ATTR_TEACHER_EMAIL: &str = "teacherEmail";
pub const ATTR_STUDENT_EMAIL: &str = "studentEmail";

// ============================================================================
// Student conversions
// ============================================================================

/// Convert a Student to a DynamoDB item.
pub fn student_to_item(student: &Student) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        ATTR_EMAIL.to_string(),
        AttributeValue::S(student.email.clone()),
    );
    item.insert(
        ATTR_NAME.to_string(),
        AttributeValue::S(student.name.clone()),
    );
    item
}

/// Convert a DynamoDB item to a Student.
pub fn item_to_student(item: &HashMap<String, AttributeValue>) -> Result<Student, RepositoryError> {
    Ok(Student {
        email: get_string(item, ATTR_EMAIL)?,
        name: get_string(item, ATTR_NAME)?,
    })
}

// ============================================================================
// Teacher conversions
// ============================================================================

/// Convert a Teacher to a DynamoDB item.
pub fn teacher_to_item(teacher: &Teacher) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        ATTR_EMAIL.to_string(),
        AttributeValue::S(teacher.email.clone()),
    );
    item.insert(
        ATTR_NAME.to_string(),
        AttributeValue::S(teacher.name.clone()),
    );
    item
}

/// Convert a DynamoDB item to a Teacher.
pub fn item_to_teacher(item: &HashMap<String, AttributeValue>) -> Result<Teacher, RepositoryError> {
    Ok(Teacher {
        email: get_string(item, ATTR_EMAIL)?,
        name: get_string(item, ATTR_NAME)?,
    })
}

// ============================================================================
// Registration conversions
// ============================================================================

/// Convert a Registration to a DynamoDB item. The item is nothing but its
/// composite key.
pub fn registration_to_item(registration: &Registration) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        ATTR_TEACHER_EMAIL.to_string(),
        AttributeValue::S(registration.teacher_email.clone()),
    );
    item.insert(
        ATTR_STUDENT_EMAIL.to_string(),
        AttributeValue::S(registration.student_email.clone()),
    );
    item
}

/// Convert a DynamoDB item to a Registration.
pub fn item_to_registration(
    item: &HashMap<String, AttributeValue>,
) -> Result<Registration, RepositoryError> {
    Ok(Registration {
        teacher_email: get_string(item, ATTR_TEACHER_EMAIL)?,
        student_email: get_string(item, ATTR_STUDENT_EMAIL)?,
    })
}

// ============================================================================
// Key builders
// ============================================================================

/// Key map for a Students/Teachers row.
pub fn email_key(email: &str) -> HashMap<String, AttributeValue> {
    let mut key = HashMap::new();
    key.insert(
        ATTR_EMAIL.to_string(),
        AttributeValue::S(email.to_string()),
    );
    key
}

/// Composite key map for a Registrations row.
pub fn registration_key(
    teacher_email: &str,
    student_email: &str,
) -> HashMap<String, AttributeValue> {
    let mut key = HashMap::new();
    key.insert(
        ATTR_TEACHER_EMAIL.to_string(),
        AttributeValue::S(teacher_email.to_string()),
    );
    key.insert(
        ATTR_STUDENT_EMAIL.to_string(),
        AttributeValue::S(student_email.to_string()),
    );
    key
}

// ============================================================================
// Helpers
// ============================================================================

fn get_string(
    item: &HashMap<String, AttributeValue>,
    attr: &str,
) -> Result<String, RepositoryError> {
    item.get(attr)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| {
            RepositoryError::Serialization(format!("missing or non-string attribute: {attr}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_round_trip() {
        let student = Student::new("a@x.com", "Alice");
        let item = student_to_item(&student);
        assert_eq!(item_to_student(&item).unwrap(), student);
    }

    #[test]
    fn test_teacher_round_trip() {
        let teacher = Teacher::new("t@x.com", "T");
        let item = teacher_to_item(&teacher);
        assert_eq!(item_to_teacher(&item).unwrap(), teacher);
    }

    #[test]
    fn test_registration_item_is_just_the_key() {
        let registration = Registration::new("t@x.com", "a@x.com");
        let item = registration_to_item(&registration);

        assert_eq!(item.len(), 2);
        assert_eq!(item, registration_key("t@x.com", "a@x.com"));
        assert_eq!(item_to_registration(&item).unwrap(), registration);
    }

    #[test]
    fn test_missing_attribute_is_serialization_error() {
        let mut item = HashMap::new();
        item.insert(
            ATTR_EMAIL.to_string(),
            AttributeValue::S("a@x.com".to_string()),
        );

        let err = item_to_student(&item).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn test_non_string_attribute_is_serialization_error() {
        let mut item = HashMap::new();
        item.insert(
            ATTR_EMAIL.to_string(),
            AttributeValue::N("42".to_string()),
        );
        item.insert(
            ATTR_NAME.to_string(),
            AttributeValue::S("Alice".to_string()),
        );

        let err = item_to_student(&item).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
