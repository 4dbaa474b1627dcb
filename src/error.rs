//! Crate-level error kinds.
//!
//! Errors returned by the AWS clients are never wrapped here: record store operations
//! return the SDK's own errors and the directory adapter passes them through
//! [`DirectoryError::Upstream`](crate::cognito::DirectoryError::Upstream).

use thiserror::Error;

/// Errors raised by this crate or by functions built on top of it.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// A required environment variable is missing or not unicode.
    #[error("Configuration error: environment variable `{0}` is not set")]
    MissingEnvironment(String),

    /// The plate being registered already belongs to someone.
    #[error("This plate is already registered")]
    RegoConflict,

    /// `operation` was called with a name that is not a document-client method.
    #[error("Unknown record store operation `{0}`")]
    UnknownOperation(String),

    /// The calling user may not touch the requested resource.
    #[error("This user doesn't have permission to access the requested resource")]
    UserAccessViolation,
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::missing_environment(
        Error::MissingEnvironment("COGNITO_USERPOOL_ID".to_string()),
        "Configuration error: environment variable `COGNITO_USERPOOL_ID` is not set"
    )]
    #[case::rego_conflict(Error::RegoConflict, "This plate is already registered")]
    #[case::unknown_operation(
        Error::UnknownOperation("transact".to_string()),
        "Unknown record store operation `transact`"
    )]
    #[case::user_access_violation(
        Error::UserAccessViolation,
        "This user doesn't have permission to access the requested resource"
    )]
    fn test_display(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
