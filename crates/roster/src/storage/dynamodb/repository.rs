//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `roster_core::storage` against the
//! three roster tables.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, KeysAndAttributes, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;

use roster_core::roster::{Registration, Student, Teacher};
use roster_core::storage::{
    RegistrationRepository, RepositoryError, Result, StudentRepository, TeacherRepository,
};

use crate::config::Config;

use super::conversions::{
    email_key, item_to_registration, item_to_student, item_to_teacher, registration_key,
    registration_to_item, student_to_item, teacher_to_item, ATTR_TEACHER_EMAIL,
};
use super::error::{
    map_batch_get_error, map_delete_item_error, map_get_item_error, map_put_item_error,
    map_query_error, map_scan_error, map_transact_write_error,
};
use super::schema::{create_table_if_absent, TableSpec};

/// BatchGetItem accepts at most 100 keys per request.
const BATCH_GET_MAX_KEYS: usize = 100;

/// DynamoDB-based repository over the Students, Teachers, and Registrations
/// tables.
pub struct DynamoDbRepository {
    client: Client,
    students_table: String,
    teachers_table: String,
    registrations_table: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table
    /// names from config.
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            students_table: config.students_table.clone(),
            teachers_table: config.teachers_table.clone(),
            registrations_table: config.registrations_table.clone(),
        }
    }

    /// Creates a new repository from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain. `AWS_ENDPOINT` overrides
    /// the endpoint for local DynamoDB.
    pub async fn from_env(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT") {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        Self::new(client, config)
    }

    /// Creates the three roster tables when absent.
    pub async fn provision_tables(&self) -> Result<()> {
        create_table_if_absent(&self.client, &TableSpec::keyed_by_email(&self.students_table))
            .await?;
        create_table_if_absent(&self.client, &TableSpec::keyed_by_email(&self.teachers_table))
            .await?;
        create_table_if_absent(
            &self.client,
            &TableSpec::registrations(&self.registrations_table),
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// StudentRepository implementation
// ============================================================================

#[async_trait]
impl StudentRepository for DynamoDbRepository {
    async fn put_student(&self, student: &Student) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.students_table)
            .set_item(Some(student_to_item(student)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_student(&self, email: &str) -> Result<Option<Student>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.students_table)
            .set_key(Some(email_key(email)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_student(&item)?)),
            None => Ok(None),
        }
    }
}

// ============================================================================
// TeacherRepository implementation
// ============================================================================

#[async_trait]
impl TeacherRepository for DynamoDbRepository {
    async fn put_teacher(&self, teacher: &Teacher) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.teachers_table)
            .set_item(Some(teacher_to_item(teacher)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_teacher(&self, email: &str) -> Result<Option<Teacher>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.teachers_table)
            .set_key(Some(email_key(email)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_teacher(&item)?)),
            None => Ok(None),
        }
    }

    async fn batch_get_teachers(&self, emails: &[String]) -> Result<Vec<Teacher>> {
        let mut teachers = Vec::with_capacity(emails.len());

        for chunk in emails.chunks(BATCH_GET_MAX_KEYS) {
            let mut pending: Vec<HashMap<String, AttributeValue>> =
                chunk.iter().map(|email| email_key(email)).collect();

            // Under throttling BatchGetItem returns a partial result and
            // hands the rest back as unprocessed keys. Those must be
            // re-issued: callers read absence as nonexistence, so dropping
            // them would make an existing teacher look deleted.
            while !pending.is_empty() {
                let request_items = KeysAndAttributes::builder()
                    .set_keys(Some(pending))
                    .build()
                    .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

                let result = self
                    .client
                    .batch_get_item()
                    .request_items(&self.teachers_table, request_items)
                    .send()
                    .await
                    .map_err(map_batch_get_error)?;

                let items = result
                    .responses
                    .and_then(|mut responses| responses.remove(&self.teachers_table))
                    .unwrap_or_default();
                for item in &items {
                    teachers.push(item_to_teacher(item)?);
                }

                pending = unprocessed_table_keys(result.unprocessed_keys, &self.teachers_table);
            }
        }

        Ok(teachers)
    }

    async fn scan_teachers(&self) -> Result<Vec<Teacher>> {
        let result = self
            .client
            .scan()
            .table_name(&self.teachers_table)
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_teacher).collect()
    }
}

// ============================================================================
// RegistrationRepository implementation
// ============================================================================

#[async_trait]
impl RegistrationRepository for DynamoDbRepository {
    async fn put_registrations(&self, registrations: &[Registration]) -> Result<()> {
        // One transaction for the whole batch: either every pair lands or
        // none does.
        let items: Vec<TransactWriteItem> = registrations
            .iter()
            .map(|registration| {
                let put = Put::builder()
                    .table_name(&self.registrations_table)
                    .set_item(Some(registration_to_item(registration)))
                    .build()
                    .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
                Ok(TransactWriteItem::builder().put(put).build())
            })
            .collect::<Result<_>>()?;

        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await
            .map_err(map_transact_write_error)?;

        Ok(())
    }

    async fn delete_registration(&self, teacher_email: &str, student_email: &str) -> Result<()> {
        // No condition expression: deleting an absent row is a no-op.
        self.client
            .delete_item()
            .table_name(&self.registrations_table)
            .set_key(Some(registration_key(teacher_email, student_email)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn get_registrations_by_teacher(
        &self,
        teacher_email: &str,
    ) -> Result<Vec<Registration>> {
        let result = self
            .client
            .query()
            .table_name(&self.registrations_table)
            .key_condition_expression(format!("{ATTR_TEACHER_EMAIL} = :teacherEmail"))
            .expression_attribute_values(
                ":teacherEmail",
                AttributeValue::S(teacher_email.to_string()),
            )
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_registration).collect()
    }
}

/// Keys from a BatchGetItem `unprocessed_keys` map belonging to `table`.
fn unprocessed_table_keys(
    unprocessed: Option<HashMap<String, KeysAndAttributes>>,
    table: &str,
) -> Vec<HashMap<String, AttributeValue>> {
    unprocessed
        .and_then(|mut tables| tables.remove(table))
        .map(|keys_and_attributes| keys_and_attributes.keys)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unprocessed_map(table: &str, keys: Vec<HashMap<String, AttributeValue>>) -> HashMap<String, KeysAndAttributes> {
        let mut map = HashMap::new();
        map.insert(
            table.to_string(),
            KeysAndAttributes::builder()
                .set_keys(Some(keys))
                .build()
                .unwrap(),
        );
        map
    }

    #[test]
    fn test_unprocessed_keys_are_carried_into_the_next_request() {
        let keys = vec![email_key("t1@x.com"), email_key("t2@x.com")];
        let unprocessed = unprocessed_map("Teachers", keys.clone());

        assert_eq!(unprocessed_table_keys(Some(unprocessed), "Teachers"), keys);
    }

    #[test]
    fn test_fully_processed_response_ends_the_loop() {
        assert!(unprocessed_table_keys(None, "Teachers").is_empty());

        let unprocessed = unprocessed_map("OtherTable", vec![email_key("t1@x.com")]);
        assert!(unprocessed_table_keys(Some(unprocessed), "Teachers").is_empty());
    }
}
