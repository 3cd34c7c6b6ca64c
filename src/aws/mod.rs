//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: security group, network interface and instance inventory, deletion
//! - Lambda: function VPC configurations
//! - CloudWatch: the deletion count metric

pub mod cloudwatch;
pub mod context;
pub mod ec2;
pub mod error;
pub mod lambda;
pub mod operations;
pub mod types;

pub use cloudwatch::CloudWatchClient;
pub use context::{AwsContext, FromAwsContext};
pub use ec2::Ec2Client;
pub use error::{AwsError, classify_aws_error, classify_sdk_error};
pub use lambda::LambdaClient;
pub use operations::{Ec2Operations, LambdaOperations, MetricsOperations};
pub use types::{FunctionPage, FunctionSummary, Instance, NetworkInterface, Reservation, SecurityGroup};

#[cfg(test)]
pub use operations::{MockEc2Operations, MockLambdaOperations, MockMetricsOperations};
