//! Runtime configuration for a cleanup run

use crate::metrics::UNKNOWN_FUNCTION;
use crate::retry::RetryPolicy;

/// Environment variable the Lambda runtime sets to the function's name
pub const FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Configuration for one cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JanitorConfig {
    /// Name of the invoking function, used to tag the deletion metric
    pub function_name: Option<String>,
    /// Retry policy shared by function listing and deletes
    pub retry: RetryPolicy,
}

impl JanitorConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            function_name: lookup(FUNCTION_NAME_ENV).filter(|name| !name.trim().is_empty()),
            retry: RetryPolicy::default(),
        }
    }

    /// Set the function name used for metric tagging
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Dimension value for the deletion metric
    pub fn metric_function_name(&self) -> &str {
        self.function_name.as_deref().unwrap_or(UNKNOWN_FUNCTION)
    }
}
