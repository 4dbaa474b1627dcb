use crate::error;

use aws_sdk_dynamodb::{Client, operation, types};
use serde::Deserialize;
use serde_dynamo::{Result, to_item};
use serde_json::{Map, Value};
use std::{collections, ops};

/// Document-client operations reachable through [`Operation`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationName {
    /// `delete`: DeleteItem.
    Delete,
    /// `get`: GetItem.
    Get,
    /// `put`: PutItem.
    Put,
    /// `query`: Query.
    Query,
    /// `scan`: Scan.
    Scan,
    /// `update`: UpdateItem.
    Update,
}

impl ops::Deref for OperationName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Delete => "delete",
            Self::Get => "get",
            Self::Put => "put",
            Self::Query => "query",
            Self::Scan => "scan",
            Self::Update => "update",
        }
    }
}

impl std::str::FromStr for OperationName {
    type Err = error::Error;

    fn from_str(name: &str) -> error::Result<Self> {
        match name {
            "delete" => Ok(Self::Delete),
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "query" => Ok(Self::Query),
            "scan" => Ok(Self::Scan),
            "update" => Ok(Self::Update),
            _ => Err(error::Error::UnknownOperation(name.to_string())),
        }
    }
}

/// Request parameters in document-client form.
///
/// Field names deserialize from their PascalCase API names (`KeyConditionExpression`,
/// `ExpressionAttributeValues`, ...) and values are plain JSON, converted to attribute
/// values on send. Fields an operation does not accept are ignored; names this struct does
/// not know fail to deserialize.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub struct OperationParams {
    /// Condition for put, update and delete.
    pub condition_expression: Option<String>,
    /// Strongly consistent read for get, query and scan.
    pub consistent_read: Option<bool>,
    /// Continuation key of a previous query or scan page.
    pub exclusive_start_key: Option<Map<String, Value>>,
    /// `#placeholder -> attribute name`.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// `:placeholder -> value`.
    pub expression_attribute_values: Option<Map<String, Value>>,
    /// Filter for query and scan.
    pub filter_expression: Option<String>,
    /// Secondary index for query and scan.
    pub index_name: Option<String>,
    /// Item for put.
    pub item: Option<Map<String, Value>>,
    /// Primary key for get, update and delete.
    pub key: Option<Map<String, Value>>,
    /// Key condition for query.
    pub key_condition_expression: Option<String>,
    /// Maximum number of items to evaluate.
    pub limit: Option<i32>,
    /// Attributes to return.
    pub projection_expression: Option<String>,
    /// `INDEXES`, `TOTAL` or `NONE`.
    pub return_consumed_capacity: Option<String>,
    /// `SIZE` or `NONE`, for put, update and delete.
    pub return_item_collection_metrics: Option<String>,
    /// `NONE`, `ALL_OLD`, `UPDATED_OLD`, `ALL_NEW` or `UPDATED_NEW`.
    pub return_values: Option<String>,
    /// `ALL_OLD` or `NONE`, for put, update and delete.
    pub return_values_on_condition_check_failure: Option<String>,
    /// Ascending (`true`) or descending query order.
    pub scan_index_forward: Option<bool>,
    /// Segment of a parallel scan.
    pub segment: Option<i32>,
    /// `ALL_ATTRIBUTES`, `ALL_PROJECTED_ATTRIBUTES`, `SPECIFIC_ATTRIBUTES` or `COUNT`,
    /// for query and scan.
    pub select: Option<String>,
    /// Overrides the table the operation was issued against.
    pub table_name: Option<String>,
    /// Number of segments of a parallel scan.
    pub total_segments: Option<i32>,
    /// Update expression for update.
    pub update_expression: Option<String>,
}

/// Raw output of an [`Operation`], one variant per [`OperationName`].
#[derive(Clone, Debug, PartialEq)]
pub enum OperationOutput {
    /// DeleteItem output.
    Delete(operation::delete_item::DeleteItemOutput),
    /// GetItem output.
    Get(operation::get_item::GetItemOutput),
    /// PutItem output.
    Put(operation::put_item::PutItemOutput),
    /// Query output.
    Query(operation::query::QueryOutput),
    /// Scan output.
    Scan(operation::scan::ScanOutput),
    /// UpdateItem output.
    Update(operation::update_item::UpdateItemOutput),
}

type AttributeMap = collections::HashMap<String, types::AttributeValue>;

fn to_attribute_map(map: Option<Map<String, Value>>) -> Result<Option<AttributeMap>> {
    map.map(to_item).transpose()
}

/// arbitrary operation
#[derive(Clone, Debug, PartialEq)]
struct OperationInput {
    condition_expression: Option<String>,
    consistent_read: Option<bool>,
    exclusive_start_key: Option<AttributeMap>,
    expression_attribute_names: Option<collections::HashMap<String, String>>,
    expression_attribute_values: Option<AttributeMap>,
    filter_expression: Option<String>,
    index_name: Option<String>,
    item: Option<AttributeMap>,
    key: Option<AttributeMap>,
    key_condition_expression: Option<String>,
    limit: Option<i32>,
    name: OperationName,
    projection_expression: Option<String>,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    return_values: Option<types::ReturnValue>,
    return_values_on_condition_check_failure: Option<types::ReturnValuesOnConditionCheckFailure>,
    scan_index_forward: Option<bool>,
    segment: Option<i32>,
    select: Option<types::Select>,
    table_name: String,
    total_segments: Option<i32>,
    update_expression: Option<String>,
}

/// Escape hatch issuing any [`OperationName`] with caller-built parameters.
///
/// `table_name` is merged in as the `TableName` parameter unless `params` already sets one.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let params = serde_json::from_value(json!({
///     "KeyConditionExpression": "#owner = :owner AND begins_with(#plate, :prefix)",
///     "ExpressionAttributeNames": {"#owner": "owner", "#plate": "plate"},
///     "ExpressionAttributeValues": {":owner": "1", ":prefix": "AB"},
/// }))?;
/// let operation = dynamodb::operation::Operation {
///     name: "query".parse()?,
///     params,
///     table_name: "vehicles".to_string(),
/// };
/// let output = operation.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    /// The operation to issue.
    pub name: OperationName,
    /// The request parameters, `TableName` aside.
    pub params: OperationParams,
    /// The table to operate on.
    pub table_name: String,
}

impl TryFrom<Operation> for OperationInput {
    type Error = serde_dynamo::Error;

    fn try_from(operation: Operation) -> Result<Self> {
        let params = operation.params;
        let input = Self {
            condition_expression: params.condition_expression,
            consistent_read: params.consistent_read,
            exclusive_start_key: to_attribute_map(params.exclusive_start_key)?,
            expression_attribute_names: params.expression_attribute_names,
            expression_attribute_values: to_attribute_map(params.expression_attribute_values)?,
            filter_expression: params.filter_expression,
            index_name: params.index_name,
            item: to_attribute_map(params.item)?,
            key: to_attribute_map(params.key)?,
            key_condition_expression: params.key_condition_expression,
            limit: params.limit,
            name: operation.name,
            projection_expression: params.projection_expression,
            return_consumed_capacity: params
                .return_consumed_capacity
                .as_deref()
                .map(types::ReturnConsumedCapacity::from),
            return_item_collection_metrics: params
                .return_item_collection_metrics
                .as_deref()
                .map(types::ReturnItemCollectionMetrics::from),
            return_values: params.return_values.as_deref().map(types::ReturnValue::from),
            return_values_on_condition_check_failure: params
                .return_values_on_condition_check_failure
                .as_deref()
                .map(types::ReturnValuesOnConditionCheckFailure::from),
            scan_index_forward: params.scan_index_forward,
            segment: params.segment,
            select: params.select.as_deref().map(types::Select::from),
            table_name: params.table_name.unwrap_or(operation.table_name),
            total_segments: params.total_segments,
            update_expression: params.update_expression,
        };
        Ok(input)
    }
}

fn construction_failure(error: serde_dynamo::Error) -> aws_sdk_dynamodb::Error {
    aws_sdk_dynamodb::error::SdkError::<operation::scan::ScanError>::construction_failure(error)
        .into()
}

impl Operation {
    /// Execute the operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.operation",
            skip_all,
            fields(table_name = %self.table_name, operation = &*self.name),
            err
        )
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> std::result::Result<OperationOutput, aws_sdk_dynamodb::Error> {
        let input: OperationInput = self.try_into().map_err(construction_failure)?;
        let output = match input.name {
            OperationName::Delete => client
                .delete_item()
                .table_name(input.table_name)
                .set_key(input.key)
                .set_condition_expression(input.condition_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_expression_attribute_values(input.expression_attribute_values)
                .set_return_values(input.return_values)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .set_return_item_collection_metrics(input.return_item_collection_metrics)
                .set_return_values_on_condition_check_failure(
                    input.return_values_on_condition_check_failure,
                )
                .send()
                .await
                .map(OperationOutput::Delete)?,
            OperationName::Get => client
                .get_item()
                .table_name(input.table_name)
                .set_key(input.key)
                .set_consistent_read(input.consistent_read)
                .set_projection_expression(input.projection_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .send()
                .await
                .map(OperationOutput::Get)?,
            OperationName::Put => client
                .put_item()
                .table_name(input.table_name)
                .set_item(input.item)
                .set_condition_expression(input.condition_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_expression_attribute_values(input.expression_attribute_values)
                .set_return_values(input.return_values)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .set_return_item_collection_metrics(input.return_item_collection_metrics)
                .set_return_values_on_condition_check_failure(
                    input.return_values_on_condition_check_failure,
                )
                .send()
                .await
                .map(OperationOutput::Put)?,
            OperationName::Query => client
                .query()
                .table_name(input.table_name)
                .set_index_name(input.index_name)
                .set_key_condition_expression(input.key_condition_expression)
                .set_filter_expression(input.filter_expression)
                .set_projection_expression(input.projection_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_expression_attribute_values(input.expression_attribute_values)
                .set_limit(input.limit)
                .set_exclusive_start_key(input.exclusive_start_key)
                .set_consistent_read(input.consistent_read)
                .set_scan_index_forward(input.scan_index_forward)
                .set_select(input.select)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .send()
                .await
                .map(OperationOutput::Query)?,
            OperationName::Scan => client
                .scan()
                .table_name(input.table_name)
                .set_index_name(input.index_name)
                .set_filter_expression(input.filter_expression)
                .set_projection_expression(input.projection_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_expression_attribute_values(input.expression_attribute_values)
                .set_limit(input.limit)
                .set_exclusive_start_key(input.exclusive_start_key)
                .set_consistent_read(input.consistent_read)
                .set_select(input.select)
                .set_segment(input.segment)
                .set_total_segments(input.total_segments)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .send()
                .await
                .map(OperationOutput::Scan)?,
            OperationName::Update => client
                .update_item()
                .table_name(input.table_name)
                .set_key(input.key)
                .set_update_expression(input.update_expression)
                .set_condition_expression(input.condition_expression)
                .set_expression_attribute_names(input.expression_attribute_names)
                .set_expression_attribute_values(input.expression_attribute_values)
                .set_return_values(input.return_values)
                .set_return_consumed_capacity(input.return_consumed_capacity)
                .set_return_item_collection_metrics(input.return_item_collection_metrics)
                .set_return_values_on_condition_check_failure(
                    input.return_values_on_condition_check_failure,
                )
                .send()
                .await
                .map(OperationOutput::Update)?,
        };
        Ok(output)
    }
}
