use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

/// put operation
#[derive(Debug, PartialEq)]
struct PutInput {
    item: collections::HashMap<String, types::AttributeValue>,
    table_name: String,
}

/// Put operation: inserts or replaces an item, dropping empty-string attributes first.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put = dynamodb::put::Put {
///     item: json!({"id": "1", "name": "John", "nickname": ""}),
///     table_name: "users".to_string(),
/// };
/// // stores {"id": "1", "name": "John"}
/// put.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Put<T> {
    /// The item to write; must serialize to a map.
    pub item: T,
    /// The name of the table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Put<T>> for PutInput {
    type Error = Error;

    fn try_from(put: Put<T>) -> Result<Self> {
        let mut item: collections::HashMap<String, types::AttributeValue> = to_item(put.item)?;
        item.retain(|_, value| !common::is_empty_string(value));
        let operation = Self {
            item,
            table_name: put.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Put<T> {
    /// Execute the put operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.put",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put: PutInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .put_item()
            .table_name(put.table_name)
            .set_item(Some(put.item))
            .send()
            .await
    }
}
