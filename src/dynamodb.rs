//! Record store adapter for Amazon DynamoDB.
//!
//! Each operation lives in its own module as a request struct with a `send` method that
//! returns the SDK's raw output or raw error. [`RecordStore`] bundles them behind one
//! long-lived client.

/// Point lookup by primary key.
pub mod get;

/// Arbitrary document-client operation.
pub mod operation;

/// Insert or replace an item.
pub mod put;

/// Equality query against a `<field>-index` secondary index.
pub mod query;

/// Delete an item by its full primary key.
pub mod remove;

/// Full table scan, first page only.
pub mod scan;

/// Partial update through a generated `SET` expression.
pub mod update;

use crate::common;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::{Client, error, operation as sdk};
use serde::Serialize;

/// Record store adapter holding one DynamoDB client for all calls.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb::RecordStore;
/// use serde_json::json;
///
/// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
/// let store = RecordStore::new(client);
/// store.put("vehicles", json!({"plate": "ABC123", "owner": "1", "colour": ""})).await?;
/// let updated = store
///     .update("vehicles", "plate", json!({"plate": "ABC123", "colour": "red"}))
///     .await?
///     .attributes;
/// let owned = store.query("vehicles", "owner", "1").await?.items;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RecordStore {
    client: Client,
}

impl RecordStore {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from a loaded SDK configuration.
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Insert or replace `item`, dropping attributes whose value is the empty string.
    pub async fn put<T: Serialize>(
        &self,
        table: impl Into<String>,
        item: T,
    ) -> Result<sdk::put_item::PutItemOutput, error::SdkError<sdk::put_item::PutItemError>> {
        put::Put {
            item,
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }

    /// Assign every attribute of `item` except `key_field`, returning the updated values.
    pub async fn update<T: Serialize>(
        &self,
        table: impl Into<String>,
        key_field: impl Into<String>,
        item: T,
    ) -> Result<
        sdk::update_item::UpdateItemOutput,
        error::SdkError<sdk::update_item::UpdateItemError>,
    > {
        update::Update {
            item,
            key_field: key_field.into(),
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }

    /// Fetch the first page of items whose `field` equals `value` on the `<field>-index` index.
    pub async fn query<T: Serialize>(
        &self,
        table: impl Into<String>,
        field: impl Into<String>,
        value: T,
    ) -> Result<sdk::query::QueryOutput, error::SdkError<sdk::query::QueryError>> {
        query::Query {
            field: field.into(),
            table_name: table.into(),
            value,
        }
        .send(&self.client)
        .await
    }

    /// Fetch the item whose `key_field` equals `value`; `item` is `None` when absent.
    pub async fn get<T: Serialize>(
        &self,
        table: impl Into<String>,
        key_field: impl Into<String>,
        value: T,
    ) -> Result<sdk::get_item::GetItemOutput, error::SdkError<sdk::get_item::GetItemError>> {
        get::Get {
            key: common::key::Key {
                name: key_field.into(),
                value,
            },
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }

    /// Fetch the first page of a whole-table scan.
    pub async fn scan(
        &self,
        table: impl Into<String>,
    ) -> Result<sdk::scan::ScanOutput, error::SdkError<sdk::scan::ScanError>> {
        scan::Scan {
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }

    /// Delete the item identified by `keys`.
    pub async fn remove<T: Serialize>(
        &self,
        table: impl Into<String>,
        keys: common::key::Keys<T>,
    ) -> Result<
        sdk::delete_item::DeleteItemOutput,
        error::SdkError<sdk::delete_item::DeleteItemError>,
    > {
        remove::Remove {
            keys,
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }

    /// Issue an arbitrary operation with `table` merged in as its table name.
    pub async fn operation(
        &self,
        table: impl Into<String>,
        name: operation::OperationName,
        params: operation::OperationParams,
    ) -> Result<operation::OperationOutput, aws_sdk_dynamodb::Error> {
        operation::Operation {
            name,
            params,
            table_name: table.into(),
        }
        .send(&self.client)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::config;
    use serde_json::json;

    fn store() -> RecordStore {
        let config = config::Config::builder()
            .behavior_version(config::BehaviorVersion::latest())
            .region(config::Region::new("ap-southeast-2"))
            .build();
        RecordStore::new(Client::from_conf(config))
    }

    #[test]
    fn test_record_store_client() {
        let store = store();
        assert_eq!(
            store.client().config().region().map(|region| region.as_ref()),
            Some("ap-southeast-2")
        );
    }

    #[tokio::test]
    async fn test_record_store_put_rejects_non_map_item() {
        let actual = store().put("a", json!("b")).await;
        assert!(matches!(actual, Err(error::SdkError::ConstructionFailure(_))));
    }

    #[tokio::test]
    async fn test_record_store_update_missing_key_field() {
        let actual = store().update("a", "b", json!({"c": "d"})).await;
        assert!(matches!(actual, Err(error::SdkError::ConstructionFailure(_))));
    }
}
