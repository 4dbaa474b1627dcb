//! Process-wide configuration, read once at startup.

use crate::{cognito, error};

use aws_config::{BehaviorVersion, SdkConfig, meta::region::RegionProviderChain};
use aws_sdk_dynamodb::config::Region;
use std::env;

/// Environment variable holding the AWS region.
pub const REGION_VAR: &str = "AWS_REGION";

/// Environment variable holding the Cognito user pool id.
pub const USER_POOL_ID_VAR: &str = "COGNITO_USERPOOL_ID";

/// Region and user pool shared by every client of a process.
///
/// ```rust,no_run
/// use dynamo_cognito_helpers::{cognito, config, dynamodb};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = config::Config::from_env()?;
/// let sdk_config = config.load_sdk_config().await;
/// let store = dynamodb::RecordStore::from_conf(&sdk_config);
/// let directory = cognito::UserDirectory::from_conf(&sdk_config, config.directory_config());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Region override; when `None` the SDK's default provider chain decides.
    pub region: Option<String>,
    /// The user pool every directory request is addressed to.
    pub user_pool_id: String,
}

impl Config {
    /// Read the configuration from `AWS_REGION` and `COGNITO_USERPOOL_ID`.
    pub fn from_env() -> error::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> error::Result<Self> {
        let user_pool_id = lookup(USER_POOL_ID_VAR)
            .ok_or_else(|| error::Error::MissingEnvironment(USER_POOL_ID_VAR.to_string()))?;
        Ok(Self {
            region: lookup(REGION_VAR).filter(|region| !region.is_empty()),
            user_pool_id,
        })
    }

    /// Defaults merged into every directory request.
    pub fn directory_config(&self) -> cognito::DirectoryConfig {
        cognito::DirectoryConfig {
            user_pool_id: self.user_pool_id.clone(),
        }
    }

    /// Load the shared SDK configuration, preferring the configured region.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let region_provider =
            RegionProviderChain::first_try(self.region.clone().map(Region::new))
                .or_default_provider();
        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }
}
