//! Identity directory adapter for Amazon Cognito user pools.
//!
//! [`UserDirectory`] fetches users and group memberships and returns them as flat
//! [`User`] maps (see [`normalize`]). Errors of the underlying client are passed through
//! untouched as [`DirectoryError::Upstream`].

/// The directory calls the adapter depends on.
pub mod client;

/// Caller identity helpers.
pub mod identity;

/// Attribute-key normalization.
pub mod normalize;

use aws_config::SdkConfig;
use serde::Serialize;
use std::{collections, ops};
use thiserror::Error;

/// Defaults merged into every directory request.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DirectoryConfig {
    /// The user pool all requests are addressed to.
    pub user_pool_id: String,
}

/// A user flattened into `camelCaseName -> value`, with `id` and `username` keys.
///
/// Serializes as a plain JSON object.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct User(collections::HashMap<String, String>);

impl User {
    /// Key holding the subject identifier.
    pub const ID: &'static str = "id";
    /// Key holding the username.
    pub const USERNAME: &'static str = "username";

    /// The subject identifier, if the record carried one.
    pub fn id(&self) -> Option<&str> {
        self.0.get(Self::ID).map(String::as_str)
    }

    /// The username, if the record carried one.
    pub fn username(&self) -> Option<&str> {
        self.0.get(Self::USERNAME).map(String::as_str)
    }

    /// The underlying attribute map.
    pub fn into_inner(self) -> collections::HashMap<String, String> {
        self.0
    }
}

impl From<collections::HashMap<String, String>> for User {
    fn from(attributes: collections::HashMap<String, String>) -> Self {
        Self(attributes)
    }
}

impl ops::Deref for User {
    type Target = collections::HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Failure of a [`UserDirectory`] call.
#[derive(Debug, Error)]
pub enum DirectoryError<E> {
    /// No user matched the requested subject identifier.
    #[error("The requested user does not exist")]
    UserNotFound,
    /// The directory client failed; the error is its own, unchanged.
    #[error(transparent)]
    Upstream(E),
}

/// Result of a [`UserDirectory`] call made through client `C`.
pub type DirectoryResult<T, C> = Result<T, DirectoryError<<C as client::DirectoryClient>::Error>>;

/// Identity directory adapter bound to one user pool.
///
/// ```rust,no_run
/// use aws_sdk_cognitoidentityprovider::Client;
/// use dynamo_cognito_helpers::cognito::{DirectoryConfig, UserDirectory};
///
/// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
/// let directory = UserDirectory::new(
///     client,
///     DirectoryConfig {
///         user_pool_id: "ap-southeast-2_abc".to_string(),
///     },
/// );
/// let users = directory.get_all_users(None).await?;
/// let groups = directory.get_user_groups("123e4567-e89b-12d3-a456-426614174000").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct UserDirectory<C> {
    client: C,
    config: DirectoryConfig,
}

impl UserDirectory<aws_sdk_cognitoidentityprovider::Client> {
    /// Build the Cognito client from a loaded SDK configuration.
    pub fn from_conf(sdk_config: &SdkConfig, config: DirectoryConfig) -> Self {
        Self::new(aws_sdk_cognitoidentityprovider::Client::new(sdk_config), config)
    }
}

impl<C: client::DirectoryClient> UserDirectory<C> {
    /// Wrap an existing client.
    pub fn new(client: C, config: DirectoryConfig) -> Self {
        Self { client, config }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The defaults merged into every request.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// All users of `group`.
    ///
    /// Only the first page of the group is read; groups larger than one page are truncated.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamo_cognito_helpers.get_group_users", skip(self), err)
    )]
    pub async fn get_group_users(&self, group: &str) -> DirectoryResult<Vec<User>, C> {
        let request = client::ListUsersInGroupRequest {
            group_name: group.to_string(),
            user_pool_id: self.config.user_pool_id.clone(),
        };
        let output = self
            .client
            .list_users_in_group(request)
            .await
            .map_err(DirectoryError::Upstream)?;
        Ok(output
            .users()
            .iter()
            .map(normalize::clean_cognito_keys)
            .collect())
    }

    /// The user whose subject identifier is `id`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamo_cognito_helpers.get_user", skip(self), err)
    )]
    pub async fn get_user(&self, id: &str) -> DirectoryResult<User, C> {
        let request = client::ListUsersRequest {
            filter: Some(format!("sub = \"{id}\"")),
            pagination_token: None,
            user_pool_id: self.config.user_pool_id.clone(),
        };
        let output = self
            .client
            .list_users(request)
            .await
            .map_err(DirectoryError::Upstream)?;
        output
            .users()
            .first()
            .map(normalize::clean_cognito_keys)
            .ok_or(DirectoryError::UserNotFound)
    }

    /// Every user of the pool, starting at `page_token` (or the first page when `None`).
    ///
    /// Pages are requested one after another and concatenated in the order returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamo_cognito_helpers.get_all_users", skip(self), err)
    )]
    pub async fn get_all_users(&self, page_token: Option<String>) -> DirectoryResult<Vec<User>, C> {
        let mut users = Vec::new();
        let mut pagination_token = page_token;
        loop {
            let request = client::ListUsersRequest {
                filter: None,
                pagination_token: pagination_token.take(),
                user_pool_id: self.config.user_pool_id.clone(),
            };
            let output = self
                .client
                .list_users(request)
                .await
                .map_err(DirectoryError::Upstream)?;
            users.extend(output.users().iter().map(normalize::clean_cognito_keys));
            #[cfg(feature = "tracing")]
            tracing::debug!(
                page_users = output.users().len(),
                total_users = users.len(),
                "fetched user page"
            );
            match output.pagination_token() {
                Some(token) if !token.is_empty() => pagination_token = Some(token.to_string()),
                _ => break,
            }
        }
        Ok(users)
    }

    /// Names of the groups the user `id` belongs to.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamo_cognito_helpers.get_user_groups", skip(self), err)
    )]
    pub async fn get_user_groups(&self, id: &str) -> DirectoryResult<Vec<String>, C> {
        let user = self.get_user(id).await?;
        let request = client::AdminListGroupsForUserRequest {
            user_pool_id: self.config.user_pool_id.clone(),
            username: user.username().unwrap_or_default().to_string(),
        };
        let output = self
            .client
            .admin_list_groups_for_user(request)
            .await
            .map_err(DirectoryError::Upstream)?;
        Ok(output
            .groups()
            .iter()
            .filter_map(|group| group.group_name())
            .map(str::to_string)
            .collect())
    }

    /// Overwrite attributes of the user `id`; `None` values are written as empty strings.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamo_cognito_helpers.update_user_attributes",
            skip(self, attributes),
            err
        )
    )]
    pub async fn update_user_attributes<I, K, V>(
        &self,
        id: &str,
        attributes: I,
    ) -> DirectoryResult<(), C>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let user = self.get_user(id).await?;
        let user_attributes = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), value.map(Into::into).unwrap_or_default()))
            .collect();
        let request = client::AdminUpdateUserAttributesRequest {
            user_attributes,
            user_pool_id: self.config.user_pool_id.clone(),
            username: user.username().unwrap_or_default().to_string(),
        };
        self.client
            .admin_update_user_attributes(request)
            .await
            .map_err(DirectoryError::Upstream)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use aws_sdk_cognitoidentityprovider::{operation, types};
    use std::sync;

    #[derive(Debug, Error)]
    #[error("directory unavailable")]
    struct Unavailable;

    /// Directory stub serving scripted pages and recording every request.
    #[derive(Default)]
    struct MockDirectory {
        group_users: Vec<types::UserType>,
        groups: Vec<&'static str>,
        list_users_pages: sync::Mutex<collections::VecDeque<operation::list_users::ListUsersOutput>>,
        list_users_requests: sync::Mutex<Vec<client::ListUsersRequest>>,
        list_groups_requests: sync::Mutex<Vec<client::AdminListGroupsForUserRequest>>,
        update_requests: sync::Mutex<Vec<client::AdminUpdateUserAttributesRequest>>,
    }

    impl MockDirectory {
        fn with_pages(pages: Vec<operation::list_users::ListUsersOutput>) -> Self {
            Self {
                list_users_pages: sync::Mutex::new(pages.into()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl client::DirectoryClient for MockDirectory {
        type Error = Unavailable;

        async fn list_users_in_group(
            &self,
            request: client::ListUsersInGroupRequest,
        ) -> Result<operation::list_users_in_group::ListUsersInGroupOutput, Self::Error> {
            assert_eq!(request.user_pool_id, "pool");
            Ok(operation::list_users_in_group::ListUsersInGroupOutput::builder()
                .set_users(Some(self.group_users.clone()))
                .build())
        }

        async fn list_users(
            &self,
            request: client::ListUsersRequest,
        ) -> Result<operation::list_users::ListUsersOutput, Self::Error> {
            self.list_users_requests.lock().unwrap().push(request);
            self.list_users_pages
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(Unavailable)
        }

        async fn admin_list_groups_for_user(
            &self,
            request: client::AdminListGroupsForUserRequest,
        ) -> Result<operation::admin_list_groups_for_user::AdminListGroupsForUserOutput, Self::Error>
        {
            self.list_groups_requests.lock().unwrap().push(request);
            let groups = self
                .groups
                .iter()
                .map(|name| types::GroupType::builder().group_name(*name).build())
                .collect();
            Ok(operation::admin_list_groups_for_user::AdminListGroupsForUserOutput::builder()
                .set_groups(Some(groups))
                .build())
        }

        async fn admin_update_user_attributes(
            &self,
            request: client::AdminUpdateUserAttributesRequest,
        ) -> Result<
            operation::admin_update_user_attributes::AdminUpdateUserAttributesOutput,
            Self::Error,
        > {
            self.update_requests.lock().unwrap().push(request);
            Ok(operation::admin_update_user_attributes::AdminUpdateUserAttributesOutput::builder().build())
        }
    }

    fn raw_user(username: &str, sub: &str) -> types::UserType {
        types::UserType::builder()
            .username(username)
            .attributes(
                types::AttributeType::builder()
                    .name("sub")
                    .value(sub)
                    .build()
                    .unwrap(),
            )
            .attributes(
                types::AttributeType::builder()
                    .name("custom:plate_count")
                    .value("1")
                    .build()
                    .unwrap(),
            )
            .build()
    }

    fn user(username: &str, sub: &str) -> User {
        User::from(collections::HashMap::from([
            ("id".to_string(), sub.to_string()),
            ("username".to_string(), username.to_string()),
            ("plateCount".to_string(), "1".to_string()),
        ]))
    }

    fn page(users: Vec<types::UserType>, token: Option<&str>) -> operation::list_users::ListUsersOutput {
        operation::list_users::ListUsersOutput::builder()
            .set_users(Some(users))
            .set_pagination_token(token.map(str::to_string))
            .build()
    }

    fn directory(client: MockDirectory) -> UserDirectory<MockDirectory> {
        UserDirectory::new(
            client,
            DirectoryConfig {
                user_pool_id: "pool".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_get_all_users_follows_pages() {
        let directory = directory(MockDirectory::with_pages(vec![
            page(vec![raw_user("a", "1"), raw_user("b", "2")], Some("p1")),
            page(vec![raw_user("c", "3")], Some("p2")),
            page(vec![raw_user("d", "4")], None),
        ]));
        let actual = directory.get_all_users(None).await.unwrap();
        assert_eq!(
            actual,
            vec![user("a", "1"), user("b", "2"), user("c", "3"), user("d", "4")]
        );
        let requests = directory.client().list_users_requests.lock().unwrap();
        let tokens: Vec<Option<&str>> = requests
            .iter()
            .map(|request| request.pagination_token.as_deref())
            .collect();
        assert_eq!(tokens, vec![None, Some("p1"), Some("p2")]);
        assert!(requests.iter().all(|request| request.user_pool_id == "pool"));
        assert!(requests.iter().all(|request| request.filter.is_none()));
    }

    #[tokio::test]
    async fn test_get_all_users_from_token() {
        let directory = directory(MockDirectory::with_pages(vec![page(
            vec![raw_user("c", "3")],
            Some(""),
        )]));
        let actual = directory.get_all_users(Some("p1".to_string())).await.unwrap();
        assert_eq!(actual, vec![user("c", "3")]);
        let requests = directory.client().list_users_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].pagination_token.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn test_get_all_users_empty_pool() {
        let directory = directory(MockDirectory::with_pages(vec![page(vec![], None)]));
        let actual = directory.get_all_users(None).await.unwrap();
        assert!(actual.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_users_fails_on_later_page() {
        let directory = directory(MockDirectory::with_pages(vec![page(
            vec![raw_user("a", "1")],
            Some("p1"),
        )]));
        let actual = directory.get_all_users(None).await;
        assert!(matches!(actual, Err(DirectoryError::Upstream(Unavailable))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let directory = directory(MockDirectory::with_pages(vec![page(vec![], None)]));
        let actual = directory.get_user("1").await;
        assert!(matches!(actual, Err(DirectoryError::UserNotFound)));
        assert_eq!(
            actual.unwrap_err().to_string(),
            "The requested user does not exist"
        );
        let requests = directory.client().list_users_requests.lock().unwrap();
        assert_eq!(requests[0].filter.as_deref(), Some("sub = \"1\""));
    }

    #[tokio::test]
    async fn test_get_user_found() {
        let directory = directory(MockDirectory::with_pages(vec![page(
            vec![raw_user("a", "1"), raw_user("b", "1")],
            None,
        )]));
        let actual = directory.get_user("1").await.unwrap();
        assert_eq!(actual, user("a", "1"));
        assert_eq!(actual.id(), Some("1"));
        assert_eq!(actual.username(), Some("a"));
    }

    #[tokio::test]
    async fn test_get_user_upstream_error() {
        let directory = directory(MockDirectory::default());
        let actual = directory.get_user("1").await;
        assert!(matches!(actual, Err(DirectoryError::Upstream(Unavailable))));
    }

    #[tokio::test]
    async fn test_get_group_users() {
        let directory = directory(MockDirectory {
            group_users: vec![raw_user("a", "1"), raw_user("b", "2")],
            ..Default::default()
        });
        let actual = directory.get_group_users("admins").await.unwrap();
        assert_eq!(actual, vec![user("a", "1"), user("b", "2")]);
    }

    #[tokio::test]
    async fn test_get_user_groups() {
        let directory = directory(MockDirectory {
            groups: vec!["admins", "drivers"],
            ..MockDirectory::with_pages(vec![page(vec![raw_user("a", "1")], None)])
        });
        let actual = directory.get_user_groups("1").await.unwrap();
        assert_eq!(actual, vec!["admins".to_string(), "drivers".to_string()]);
        let requests = directory.client().list_groups_requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![client::AdminListGroupsForUserRequest {
                user_pool_id: "pool".to_string(),
                username: "a".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_update_user_attributes() {
        let directory = directory(MockDirectory::with_pages(vec![page(
            vec![raw_user("a", "1")],
            None,
        )]));
        directory
            .update_user_attributes(
                "1",
                vec![("given_name", Some("b")), ("custom:plate_count", None)],
            )
            .await
            .unwrap();
        let requests = directory.client().update_requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![client::AdminUpdateUserAttributesRequest {
                user_attributes: vec![
                    ("given_name".to_string(), "b".to_string()),
                    ("custom:plate_count".to_string(), String::new()),
                ],
                user_pool_id: "pool".to_string(),
                username: "a".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_update_user_attributes_unknown_user() {
        let directory = directory(MockDirectory::with_pages(vec![page(vec![], None)]));
        let actual = directory
            .update_user_attributes("1", vec![("given_name", Some("b"))])
            .await;
        assert!(matches!(actual, Err(DirectoryError::UserNotFound)));
        assert!(directory.client().update_requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_user_serializes_flat() {
        let actual = serde_json::to_value(user("a", "1")).unwrap();
        assert_eq!(
            actual,
            serde_json::json!({"id": "1", "username": "a", "plateCount": "1"})
        );
    }
}
