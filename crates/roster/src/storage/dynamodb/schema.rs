//! Table provisioning.
//!
//! Creates the three roster tables on startup when they do not already
//! exist. Provisioning is deliberately create-if-absent: an existing table
//! is left untouched.

use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use roster_core::storage::{RepositoryError, Result};

use super::conversions::{ATTR_EMAIL, ATTR_STUDENT_EMAIL, ATTR_TEACHER_EMAIL};

const READ_CAPACITY_UNITS: i64 = 5;
const WRITE_CAPACITY_UNITS: i64 = 5;

/// Key layout of one roster table.
pub struct TableSpec<'a> {
    pub name: &'a str,
    pub hash_key: &'a str,
    pub range_key: Option<&'a str>,
}

impl<'a> TableSpec<'a> {
    /// Single-key table (Students, Teachers).
    pub fn keyed_by_email(name: &'a str) -> Self {
        Self {
            name,
            hash_key: ATTR_EMAIL,
            range_key: None,
        }
    }

    /// Composite-key table (Registrations).
    pub fn registrations(name: &'a str) -> Self {
        Self {
            name,
            hash_key: ATTR_TEACHER_EMAIL,
            range_key: Some(ATTR_STUDENT_EMAIL),
        }
    }
}

/// Creates the table described by `spec` unless it already exists.
pub async fn create_table_if_absent(client: &Client, spec: &TableSpec<'_>) -> Result<()> {
    if table_exists(client, spec.name).await? {
        tracing::debug!(table = spec.name, "table already exists");
        return Ok(());
    }

    let mut key_schema = vec![key_element(spec.hash_key, KeyType::Hash)?];
    let mut attribute_definitions = vec![string_attribute(spec.hash_key)?];
    if let Some(range_key) = spec.range_key {
        key_schema.push(key_element(range_key, KeyType::Range)?);
        attribute_definitions.push(string_attribute(range_key)?);
    }

    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(READ_CAPACITY_UNITS)
        .write_capacity_units(WRITE_CAPACITY_UNITS)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    client
        .create_table()
        .table_name(spec.name)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .provisioned_throughput(throughput)
        .send()
        .await
        .map_err(|e| RepositoryError::QueryFailed(format!("CreateTable failed: {e}")))?;

    tracing::info!(table = spec.name, "created table");
    Ok(())
}

async fn table_exists(client: &Client, name: &str) -> Result<bool> {
    match client.describe_table().table_name(name).send().await {
        Ok(_) => Ok(true),
        Err(err) => {
            let service_error = err.into_service_error();
            if service_error.is_resource_not_found_exception() {
                Ok(false)
            } else {
                Err(RepositoryError::QueryFailed(format!(
                    "DescribeTable failed: {service_error:?}"
                )))
            }
        }
    }
}

fn key_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

fn string_attribute(name: &str) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}
