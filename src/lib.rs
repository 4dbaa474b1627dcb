#![deny(missing_docs)]

//! # DynamoDB & Cognito helpers
//!
//! Request building and response shaping for serverless functions backed by Amazon
//! DynamoDB tables and an Amazon Cognito user pool.
//!
//! ## Overview
//!
//! - [`dynamodb::RecordStore`] turns plain CRUD calls (put, partial update, index query,
//!   point lookup, scan, delete, arbitrary operation) into DynamoDB requests and returns
//!   the raw SDK outputs and errors.
//! - [`cognito::UserDirectory`] lists and updates user pool users and returns each one as
//!   a flat, camelCased [`cognito::User`].
//!
//! ## Quick Example
//!
//! Partial updates need no hand-written expressions: every attribute but the key is
//! assigned through `#name`/`:name` placeholders.
//!
//! ```no_run
//! use dynamo_cognito_helpers::{cognito, config, dynamodb};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = config::Config::from_env()?;
//! let sdk_config = config.load_sdk_config().await;
//!
//! let store = dynamodb::RecordStore::from_conf(&sdk_config);
//! // The crate builds: "SET #colour = :colour, #nickname = :nickname" with :nickname = NULL
//! store
//!     .update("vehicles", "plate", json!({"plate": "ABC123", "colour": "red", "nickname": ""}))
//!     .await?;
//!
//! let directory = cognito::UserDirectory::from_conf(&sdk_config, config.directory_config());
//! let user = directory.get_user("123e4567-e89b-12d3-a456-426614174000").await?;
//! println!("{:?} {:?}", user.id(), user.get("givenName"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Key types and expression plumbing
//! - [`mod@dynamodb`] - Record store adapter
//! - [`mod@cognito`] - Identity directory adapter, key normalization, caller identity
//! - [`mod@config`] - Environment configuration and SDK config loading
//! - [`mod@error`] - Crate-level error kinds

/// Identity directory adapter for Cognito user pools.
pub mod cognito;

/// Key types and shared expression plumbing.
pub mod common;

/// Region and user pool configuration.
pub mod config;

/// Record store adapter for DynamoDB tables.
pub mod dynamodb;

/// Errors raised by this crate.
pub mod error;
