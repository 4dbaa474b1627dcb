use crate::common;

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};

/// Suffix of the secondary index queried for a field.
const INDEX_SUFFIX: &str = "-index";

/// query operation
#[derive(Clone, Debug, PartialEq)]
struct QueryInput {
    index_name: String,
    key_condition: common::ExpressionInput,
    table_name: String,
}

/// Query operation against the `<field>-index` secondary index.
///
/// Only the first page is fetched: when `last_evaluated_key` is set on the output, the
/// caller is responsible for requesting the following pages.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query = dynamodb::query::Query {
///     field: "owner".to_string(),
///     table_name: "vehicles".to_string(),
///     value: "1".to_string(),
/// };
/// let output = query.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Query<T> {
    /// The indexed attribute to match.
    pub field: String,
    /// The name of the table to query.
    pub table_name: String,
    /// The value `field` must equal.
    pub value: T,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let value = to_attribute_value(query.value)?;
        let index_name = format!("{}{INDEX_SUFFIX}", query.field);
        let operation = Self {
            index_name,
            key_condition: common::ExpressionInput::equality(query.field, value),
            table_name: query.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Query<T> {
    /// Execute the query operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.query",
            skip_all,
            fields(table_name = %self.table_name, field = %self.field),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::query::QueryOutput, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .query()
            .table_name(query.table_name)
            .index_name(query.index_name)
            .key_condition_expression(query.key_condition.expression)
            .set_expression_attribute_names(Some(query.key_condition.expression_attribute_names))
            .set_expression_attribute_values(Some(query.key_condition.expression_attribute_values))
            .send()
            .await
    }
}
