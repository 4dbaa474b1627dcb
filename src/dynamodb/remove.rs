use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// remove operation
#[derive(Debug, PartialEq)]
struct RemoveInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    table_name: String,
}

/// Delete operation for the item identified by its full primary key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::{common, dynamodb};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let remove = dynamodb::remove::Remove {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "owner".to_string(),
///             value: "1".to_string(),
///         },
///         sort_key: Some(common::key::Key {
///             name: "plate".to_string(),
///             value: "ABC123".to_string(),
///         }),
///     },
///     table_name: "vehicles".to_string(),
/// };
/// remove.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Remove<T> {
    /// The primary key of the item to delete.
    pub keys: common::key::Keys<T>,
    /// The name of the table to delete from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Remove<T>> for RemoveInput {
    type Error = Error;

    fn try_from(remove: Remove<T>) -> Result<Self> {
        let operation = Self {
            keys: remove.keys.try_into()?,
            table_name: remove.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Remove<T> {
    /// Execute the remove operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.remove",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let remove: RemoveInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .delete_item()
            .table_name(remove.table_name)
            .set_key(Some(remove.keys))
            .send()
            .await
    }
}
