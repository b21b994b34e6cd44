//! DynamoDB storage backend implementation.
//!
//! Three tables (Students, Teachers, Registrations) accessed through
//! `aws-sdk-dynamodb`. Registrations use `teacherEmail` as partition key and
//! `studentEmail` as sort key so per-teacher lookups are single range
//! queries.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::DynamoDbRepository;
