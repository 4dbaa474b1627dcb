//! Subject identifier lookup from a request's caller identity.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static SIGN_IN_PROVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CognitoSignIn:([0-9A-Za-z_-]{36})").unwrap());

/// Caller identity attached to a Lambda or AppSync request.
///
/// Deserializes from the camelCase identity object of the event, ignoring other fields.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    /// Subject identifier of a user pool authenticated caller.
    pub sub: Option<String>,
    /// Provider string of an identity pool authenticated caller, such as
    /// `cognito-idp.<region>.amazonaws.com/<pool>,...:CognitoSignIn:<sub>`.
    pub cognito_identity_auth_provider: Option<String>,
}

/// Derive the caller's subject identifier.
///
/// Prefers `sub`; otherwise extracts the 36-character id following `CognitoSignIn:` in the
/// auth provider string. Returns `None` when neither yields an id.
///
/// ```rust
/// use dynamo_cognito_helpers::cognito::identity::{Identity, get_user_id};
///
/// let identity = Identity {
///     sub: Some("x".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(get_user_id(&identity).as_deref(), Some("x"));
/// ```
pub fn get_user_id(identity: &Identity) -> Option<String> {
    if let Some(sub) = &identity.sub {
        return Some(sub.clone());
    }
    let provider = identity.cognito_identity_auth_provider.as_deref()?;
    SIGN_IN_PROVIDER
        .captures(provider)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::subject(
        Identity {
            sub: Some(
                "x".to_string()
            ),
            ..Default::default()
        },
        Some("x")
    )]
    #[case::subject_preferred(
        Identity {
            sub: Some(
                "x".to_string()
            ),
            cognito_identity_auth_provider: Some(
                "CognitoSignIn:123e4567-e89b-12d3-a456-426614174000".to_string()
            ),
        },
        Some("x")
    )]
    #[case::provider(
        Identity {
            cognito_identity_auth_provider: Some(
                "cognito-idp.ap-southeast-2.amazonaws.com/ap-southeast-2_abc,cognito-idp.ap-southeast-2.amazonaws.com/ap-southeast-2_abc:CognitoSignIn:123e4567-e89b-12d3-a456-426614174000".to_string()
            ),
            ..Default::default()
        },
        Some("123e4567-e89b-12d3-a456-426614174000")
    )]
    #[case::provider_with_trailing_text(
        Identity {
            cognito_identity_auth_provider: Some(
                "\"CognitoSignIn:123e4567-e89b-12d3-a456-426614174000\"".to_string()
            ),
            ..Default::default()
        },
        Some("123e4567-e89b-12d3-a456-426614174000")
    )]
    #[case::provider_not_matching(
        Identity {
            cognito_identity_auth_provider: Some(
                "graph.facebook.com".to_string()
            ),
            ..Default::default()
        },
        None
    )]
    #[case::provider_id_too_short(
        Identity {
            cognito_identity_auth_provider: Some(
                "CognitoSignIn:123e4567".to_string()
            ),
            ..Default::default()
        },
        None
    )]
    #[case::provider_id_not_ascii(
        Identity {
            cognito_identity_auth_provider: Some(
                "CognitoSignIn:123e4567-e89b-12d3-a456-4266141740éé".to_string()
            ),
            ..Default::default()
        },
        None
    )]
    #[case::empty(Identity::default(), None)]
    fn test_get_user_id(#[case] identity: Identity, #[case] expected: Option<&str>) {
        assert_eq!(get_user_id(&identity).as_deref(), expected);
    }

    #[test]
    fn test_identity_from_event() {
        let identity: Identity = serde_json::from_value(json!({
            "cognitoIdentityAuthProvider": "a",
            "sourceIp": ["127.0.0.1"],
            "sub": null
        }))
        .unwrap();
        assert_eq!(
            identity,
            Identity {
                sub: None,
                cognito_identity_auth_provider: Some("a".to_string()),
            }
        );
    }
}
