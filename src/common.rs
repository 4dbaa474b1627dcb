//! Common utilities shared by the record store operations.
//!
//! This module provides the key types used to address items and the expression
//! plumbing used to build key conditions and update expressions.

/// Key types for identifying items in DynamoDB tables.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// Whether an attribute value is the empty string, which the record store treats as absent.
pub(crate) fn is_empty_string(value: &types::AttributeValue) -> bool {
    matches!(value, types::AttributeValue::S(value) if value.is_empty())
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// Placeholder token for an attribute name: characters outside `[0-9A-Za-z_]` become `_`.
fn get_placeholder(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Placeholder tokens already used by one expression.
///
/// Names that map to the same token, such as `first-name` and `first_name`, get a
/// numeric suffix on every later claim.
#[derive(Clone, Debug, Default)]
pub(crate) struct Placeholders(collections::HashSet<String>);

impl Placeholders {
    fn claim(&mut self, name: &str) -> String {
        let base = get_placeholder(name);
        let mut placeholder = base.clone();
        let mut index = 0;
        while !self.0.insert(placeholder.clone()) {
            index += 1;
            placeholder = format!("{base}_{index}");
        }
        placeholder
    }

    /// `#placeholder = :placeholder`, with the name placeholder resolving to `name`.
    pub(crate) fn equality(&mut self, name: String, value: types::AttributeValue) -> ExpressionInput {
        let placeholder = self.claim(&name);
        let name_placeholder = format!("#{placeholder}");
        let value_placeholder = format!(":{placeholder}");
        let expression = format!("{name_placeholder} = {value_placeholder}");
        ExpressionInput {
            expression,
            expression_attribute_names: collections::HashMap::from([(name_placeholder, name)]),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
        }
    }
}

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    /// `#name = :name` over the placeholder token of `name`, with both placeholders registered.
    pub(crate) fn equality(name: String, value: types::AttributeValue) -> Self {
        Placeholders::default().equality(name, value)
    }

    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }
}
