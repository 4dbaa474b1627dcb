use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Single key attribute, used for point lookups.
///
/// ```rust
/// use dynamo_cognito_helpers::common::key;
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: "1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

impl<T: Serialize> TryFrom<Key<T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key: Key<T>) -> Result<Self> {
        let value = to_attribute_value(key.value)?;
        Ok(Self::from([(key.name, value)]))
    }
}

/// Full primary key: the hash key, plus the sort key when the table has one.
///
/// ```rust
/// use dynamo_cognito_helpers::common::key;
///
/// let keys = key::Keys {
///     partition_key: key::Key {
///         name: "id".to_string(),
///         value: "1".to_string(),
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys<T> {
    /// The partition (hash) key.
    pub partition_key: Key<T>,
    /// The sort key, only for tables with composite primary keys.
    pub sort_key: Option<Key<T>>,
}

impl<T: Serialize> TryFrom<Keys<T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(keys: Keys<T>) -> Result<Self> {
        let mut map: Self = keys.partition_key.try_into()?;
        if let Some(sort_key) = keys.sort_key {
            let sort_key_value = to_attribute_value(sort_key.value)?;
            map.insert(sort_key.name, sort_key_value);
        }
        Ok(map)
    }
}
