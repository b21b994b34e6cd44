use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Students table name (default: "Students")
    pub students_table: String,
    /// Teachers table name (default: "Teachers")
    pub teachers_table: String,
    /// Registrations table name (default: "Registrations")
    pub registrations_table: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STUDENTS_TABLE` - Students table name (default: "Students")
    /// - `TEACHERS_TABLE` - Teachers table name (default: "Teachers")
    /// - `REGISTRATIONS_TABLE` - Registrations table name (default: "Registrations")
    pub fn from_env() -> Self {
        Self {
            students_table: env::var("STUDENTS_TABLE").unwrap_or_else(|_| "Students".to_string()),
            teachers_table: env::var("TEACHERS_TABLE").unwrap_or_else(|_| "Teachers".to_string()),
            registrations_table: env::var("REGISTRATIONS_TABLE")
                .unwrap_or_else(|_| "Registrations".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
