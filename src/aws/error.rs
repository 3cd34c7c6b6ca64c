//! AWS error classification
//!
//! Every SDK failure crossing into the cleanup workflow is turned into an
//! [`AwsError`] using the service error code from `ProvideErrorMetadata`,
//! so retry decisions never depend on Debug strings.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AwsError {
    /// Rate limit exceeded (retried with a fixed delay)
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// Resource was not found
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Resource still has dependent objects (e.g. SG referenced by another SG)
    #[error("Resource has dependent objects: {message}")]
    DependencyViolation { message: String },

    /// Any other SDK error, with its code when the service returned one
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a throttling error
    pub fn is_throttling(&self) -> bool {
        matches!(self, AwsError::Throttled { .. })
    }

    /// Service error code, when one is known
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::Sdk { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidGroup.NotFound",
    "InvalidGroupId.NotFound",
    "InvalidNetworkInterfaceID.NotFound",
    "ResourceNotFoundException",
];

/// Known AWS error codes for dependency violations (resource still in use)
const DEPENDENCY_CODES: &[&str] = &["DependencyViolation"];

/// Classify an AWS error from its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(c) if DEPENDENCY_CODES.contains(&c) => AwsError::DependencyViolation { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify any SDK error (`SdkError<E, R>` or a modeled operation error).
///
/// Errors without service metadata (timeouts, dispatch failures) become
/// [`AwsError::Sdk`] with no code and the full error chain as the message.
pub fn classify_sdk_error<E>(error: &E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let meta = error.meta();
    let message = match meta.message() {
        Some(m) => m.to_string(),
        None => DisplayErrorContext(error).to_string(),
    };
    classify_aws_error(meta.code(), Some(&message))
}
