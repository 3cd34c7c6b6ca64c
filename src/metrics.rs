//! CloudWatch metric constants.
//!
//! Single source of truth for the namespace, metric name and dimension that
//! the cleanup run publishes, so dashboards and alarms can rely on them.

use aws_sdk_cloudwatch::types::Dimension;

/// CloudWatch namespace for cleanup metrics
pub const NAMESPACE: &str = "Custom/SecurityGroupCleanup";

/// Dimension names
pub mod dimensions {
    pub const FUNCTION_NAME: &str = "FunctionName";
}

/// Metric names
pub mod names {
    pub const DELETED_SECURITY_GROUPS: &str = "DeletedSecurityGroups";
}

/// Dimension value used when the invoking function name is not known
pub const UNKNOWN_FUNCTION: &str = "UnknownFunction";

/// Build the dimension vector for the deletion count metric.
pub fn build_dimensions(function_name: &str) -> Vec<Dimension> {
    vec![
        Dimension::builder()
            .name(dimensions::FUNCTION_NAME)
            .value(function_name)
            .build(),
    ]
}
