use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

/// Keyword prefixing the generated update expression.
const SET_KEYWORD: &str = "SET ";

/// Separator between assignments of the SET clause.
const ASSIGNMENT_SEPARATOR: &str = ", ";

/// Build `SET #a = :a, #b = :b` over the non-key attributes, mapping empty strings to NULL.
fn get_set_expression(
    attributes: IndexMap<String, types::AttributeValue>,
) -> common::ExpressionInput {
    let mut placeholders = common::Placeholders::default();
    let assignments = attributes
        .into_iter()
        .map(|(name, value)| {
            let value = if common::is_empty_string(&value) {
                types::AttributeValue::Null(true)
            } else {
                value
            };
            placeholders.equality(name, value)
        })
        .collect();
    let mut operation = common::ExpressionInput::merge(ASSIGNMENT_SEPARATOR, assignments);
    operation.expression = format!("{SET_KEYWORD}{}", operation.expression);
    operation
}

/// update operation
#[derive(Clone, Debug, PartialEq)]
struct UpdateInput {
    key: collections::HashMap<String, types::AttributeValue>,
    return_values: types::ReturnValue,
    table_name: String,
    update_expression: Option<common::ExpressionInput>,
}

/// Partial update operation.
///
/// Every attribute of `item` other than `key_field` is assigned with a `SET` clause;
/// empty strings are stored as NULL. The key attribute itself is only used to address
/// the item. The updated attributes are returned (`UPDATED_NEW`).
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update = dynamodb::update::Update {
///     item: json!({"id": "1", "name": "Jane", "nickname": ""}),
///     key_field: "id".to_string(),
///     table_name: "users".to_string(),
/// };
/// // builds "SET #name = :name, #nickname = :nickname" with :nickname = NULL
/// update.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Update<T> {
    /// The new attribute values, including the primary key attribute.
    pub item: T,
    /// The name of the primary key attribute of `item`.
    pub key_field: String,
    /// The name of the table to update.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Update<T>> for UpdateInput {
    type Error = Error;

    fn try_from(update: Update<T>) -> Result<Self> {
        let item: collections::HashMap<String, types::AttributeValue> = to_item(update.item)?;
        let mut attributes: IndexMap<String, types::AttributeValue> = item.into_iter().collect();
        let key_value = attributes.shift_remove(&update.key_field).ok_or_else(|| {
            <Error as serde::ser::Error>::custom(format!(
                "item has no `{}` key attribute",
                update.key_field
            ))
        })?;
        attributes.sort_keys();
        let update_expression = if attributes.is_empty() {
            None
        } else {
            Some(get_set_expression(attributes))
        };
        let operation = Self {
            key: collections::HashMap::from([(update.key_field, key_value)]),
            return_values: types::ReturnValue::UpdatedNew,
            table_name: update.table_name,
            update_expression,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Update<T> {
    /// Execute the update operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.update",
            skip_all,
            fields(table_name = %self.table_name, key_field = %self.key_field),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update: UpdateInput = self.try_into().map_err(error::BuildError::other)?;
        let mut builder = client
            .update_item()
            .table_name(update.table_name)
            .set_key(Some(update.key))
            .return_values(update.return_values);
        if let Some(update_expression) = update.update_expression {
            builder = builder
                .update_expression(update_expression.expression)
                .set_expression_attribute_names(Some(update_expression.expression_attribute_names))
                .set_expression_attribute_values(Some(
                    update_expression.expression_attribute_values,
                ));
        }
        builder.send().await
    }
}
