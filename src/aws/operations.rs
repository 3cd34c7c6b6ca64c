//! AWS operation traits for testing
//!
//! The cleanup workflow talks to AWS only through these traits, so it can
//! be driven by mocks in unit tests without hitting real AWS.
//!
//! Note: `list_functions_page` takes `Option<String>` instead of
//! `Option<&str>` to work around mockall lifetime limitations.

use super::cloudwatch::CloudWatchClient;
use super::ec2::Ec2Client;
use super::error::AwsError;
use super::lambda::LambdaClient;
use super::types::{FunctionPage, NetworkInterface, Reservation, SecurityGroup};

/// EC2 calls used by the cleanup
#[allow(async_fn_in_trait)] // Internal use only
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// List every security group
    async fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, AwsError>;

    /// List every network interface
    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterface>, AwsError>;

    /// List every instance, grouped by reservation
    async fn describe_instances(&self) -> Result<Vec<Reservation>, AwsError>;

    /// Delete one security group
    async fn delete_security_group(&self, group_id: &str) -> Result<(), AwsError>;
}

/// Lambda calls used by the cleanup
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait LambdaOperations: Send + Sync {
    /// Fetch one page of functions, continuing from `marker`
    async fn list_functions_page(&self, marker: Option<String>) -> Result<FunctionPage, AwsError>;
}

/// CloudWatch calls used by the cleanup
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait MetricsOperations: Send + Sync {
    /// Publish the number of deleted groups, tagged with the function name
    async fn put_deleted_count(&self, function_name: &str, count: usize) -> Result<(), AwsError>;
}

impl Ec2Operations for Ec2Client {
    async fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, AwsError> {
        Ec2Client::describe_security_groups(self).await
    }

    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterface>, AwsError> {
        Ec2Client::describe_network_interfaces(self).await
    }

    async fn describe_instances(&self) -> Result<Vec<Reservation>, AwsError> {
        Ec2Client::describe_instances(self).await
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_security_group(self, group_id).await
    }
}

impl LambdaOperations for LambdaClient {
    async fn list_functions_page(&self, marker: Option<String>) -> Result<FunctionPage, AwsError> {
        LambdaClient::list_functions_page(self, marker.as_deref()).await
    }
}

impl MetricsOperations for CloudWatchClient {
    async fn put_deleted_count(&self, function_name: &str, count: usize) -> Result<(), AwsError> {
        CloudWatchClient::put_deleted_count(self, function_name, count).await
    }
}
