use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// get operation
#[derive(Clone, Debug, PartialEq)]
struct GetInput {
    key: collections::HashMap<String, types::AttributeValue>,
    table_name: String,
}

/// Point lookup by primary key.
///
/// A missing item is not an error: the output simply has no `item`.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::{common, dynamodb};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get = dynamodb::get::Get {
///     key: common::key::Key {
///         name: "id".to_string(),
///         value: "1".to_string(),
///     },
///     table_name: "users".to_string(),
/// };
/// let found = get.send(client).await?.item.is_some();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Get<T> {
    /// The primary key attribute and its value.
    pub key: common::key::Key<T>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Get<T>> for GetInput {
    type Error = Error;

    fn try_from(get: Get<T>) -> Result<Self> {
        let operation = Self {
            key: get.key.try_into()?,
            table_name: get.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Get<T> {
    /// Execute the get operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.get",
            skip_all,
            fields(table_name = %self.table_name, key_field = %self.key.name),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get: GetInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .get_item()
            .table_name(get.table_name)
            .set_key(Some(get.key))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::string(
        Get {
            key: common::key::Key {
                name: "a".to_string(),
                value: Value::String(
                    "b".to_string()
                ),
            },
            table_name: "c".to_string(),
        },
        GetInput {
            key: collections::HashMap::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    ),
                )]
            ),
            table_name: "c".to_string(),
        }
    )]
    #[case::number(
        Get {
            key: common::key::Key {
                name: "a".to_string(),
                value: Value::Number(
                    3.into()
                ),
            },
            table_name: "c".to_string(),
        },
        GetInput {
            key: collections::HashMap::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::N(
                        "3".to_string()
                    ),
                )]
            ),
            table_name: "c".to_string(),
        }
    )]
    fn test_get(#[case] args: Get<Value>, #[case] expected: GetInput) {
        let actual: GetInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
