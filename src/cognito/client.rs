use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::{Client, error, operation, types};

/// ListUsersInGroup request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListUsersInGroupRequest {
    /// The group to list.
    pub group_name: String,
    /// The user pool holding the group.
    pub user_pool_id: String,
}

/// ListUsers request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListUsersRequest {
    /// Filter expression, e.g. `sub = "<id>"`.
    pub filter: Option<String>,
    /// Continuation token of the previous page.
    pub pagination_token: Option<String>,
    /// The user pool to list.
    pub user_pool_id: String,
}

/// AdminListGroupsForUser request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdminListGroupsForUserRequest {
    /// The user pool holding the user.
    pub user_pool_id: String,
    /// The user's username.
    pub username: String,
}

/// AdminUpdateUserAttributes request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdminUpdateUserAttributesRequest {
    /// `(name, value)` pairs to write, in order.
    pub user_attributes: Vec<(String, String)>,
    /// The user pool holding the user.
    pub user_pool_id: String,
    /// The user's username.
    pub username: String,
}

/// Identity directory calls needed by [`UserDirectory`](super::UserDirectory).
///
/// Implemented for the Cognito user pools client; any other implementation (a stub in
/// tests, a proxy) only has to return the same raw outputs.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Error returned by every call.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the users of a group (one page).
    async fn list_users_in_group(
        &self,
        request: ListUsersInGroupRequest,
    ) -> Result<operation::list_users_in_group::ListUsersInGroupOutput, Self::Error>;

    /// List the users of the pool (one page).
    async fn list_users(
        &self,
        request: ListUsersRequest,
    ) -> Result<operation::list_users::ListUsersOutput, Self::Error>;

    /// List the groups a user belongs to.
    async fn admin_list_groups_for_user(
        &self,
        request: AdminListGroupsForUserRequest,
    ) -> Result<operation::admin_list_groups_for_user::AdminListGroupsForUserOutput, Self::Error>;

    /// Overwrite some of a user's attributes.
    async fn admin_update_user_attributes(
        &self,
        request: AdminUpdateUserAttributesRequest,
    ) -> Result<
        operation::admin_update_user_attributes::AdminUpdateUserAttributesOutput,
        Self::Error,
    >;
}

#[async_trait]
impl DirectoryClient for Client {
    type Error = aws_sdk_cognitoidentityprovider::Error;

    async fn list_users_in_group(
        &self,
        request: ListUsersInGroupRequest,
    ) -> Result<operation::list_users_in_group::ListUsersInGroupOutput, Self::Error> {
        let output = Client::list_users_in_group(self)
            .user_pool_id(request.user_pool_id)
            .group_name(request.group_name)
            .send()
            .await?;
        Ok(output)
    }

    async fn list_users(
        &self,
        request: ListUsersRequest,
    ) -> Result<operation::list_users::ListUsersOutput, Self::Error> {
        let output = Client::list_users(self)
            .user_pool_id(request.user_pool_id)
            .set_filter(request.filter)
            .set_pagination_token(request.pagination_token)
            .send()
            .await?;
        Ok(output)
    }

    async fn admin_list_groups_for_user(
        &self,
        request: AdminListGroupsForUserRequest,
    ) -> Result<operation::admin_list_groups_for_user::AdminListGroupsForUserOutput, Self::Error>
    {
        let output = Client::admin_list_groups_for_user(self)
            .user_pool_id(request.user_pool_id)
            .username(request.username)
            .send()
            .await?;
        Ok(output)
    }

    async fn admin_update_user_attributes(
        &self,
        request: AdminUpdateUserAttributesRequest,
    ) -> Result<
        operation::admin_update_user_attributes::AdminUpdateUserAttributesOutput,
        Self::Error,
    > {
        let user_attributes = request
            .user_attributes
            .into_iter()
            .map(|(name, value)| types::AttributeType::builder().name(name).value(value).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(
                error::SdkError::<
                    operation::admin_update_user_attributes::AdminUpdateUserAttributesError,
                >::from,
            )?;
        let output = Client::admin_update_user_attributes(self)
            .user_pool_id(request.user_pool_id)
            .username(request.username)
            .set_user_attributes(Some(user_attributes))
            .send()
            .await?;
        Ok(output)
    }
}
