//! Conversion of raw Cognito user records into flat, camelCased [`User`] maps.

use super::User;

use aws_sdk_cognitoidentityprovider::types;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections;

/// Cognito's subject identifier attribute.
const SUBJECT_ATTRIBUTE: &str = "sub";

/// Namespace prefix of user pool custom attributes.
const CUSTOM_PREFIX: &str = "custom:";

static SNAKE_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"_[0-9A-Za-z_]").unwrap());

/// Format a Cognito attribute name: `sub` becomes `id`, snake_case becomes camelCase and
/// the `custom:` namespace is dropped.
///
/// Only an ASCII letter, digit or underscore following `_` is uppercased.
///
/// ```rust
/// use dynamo_cognito_helpers::cognito::normalize::clean_key;
///
/// assert_eq!(clean_key("custom:sqid_token"), "sqidToken");
/// ```
pub fn clean_key(key: &str) -> String {
    let key = if key == SUBJECT_ATTRIBUTE { "id" } else { key };
    let key = SNAKE_SEGMENT.replace_all(key, |captures: &Captures| {
        captures[0]['_'.len_utf8()..].to_ascii_uppercase()
    });
    key.replacen(CUSTOM_PREFIX, "", 1)
}

/// Flatten a raw user record into a [`User`] seeded with its `username`.
///
/// Attributes without a value are skipped. Should two attribute names clean to the same
/// key, the later attribute wins.
pub fn clean_cognito_keys(user: &types::UserType) -> User {
    let mut attributes = collections::HashMap::with_capacity(user.attributes().len() + 1);
    if let Some(username) = user.username() {
        attributes.insert(User::USERNAME.to_string(), username.to_string());
    }
    for attribute in user.attributes() {
        if let Some(value) = attribute.value() {
            attributes.insert(clean_key(attribute.name()), value.to_string());
        }
    }
    User::from(attributes)
}
