//! Plain data returned by the AWS wrappers
//!
//! These carry only what the cleanup needs, so the workflow and its tests
//! never touch SDK builder types.

use serde::Serialize;

/// A security group from the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
}

impl SecurityGroup {
    pub fn new(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
        }
    }
}

/// A network interface and the groups attached to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkInterface {
    pub interface_id: Option<String>,
    pub group_ids: Vec<String>,
}

/// An EC2 instance and the groups attached to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: Option<String>,
    pub group_ids: Vec<String>,
}

/// Instances launched together, as DescribeInstances groups them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reservation {
    pub instances: Vec<Instance>,
}

/// A Lambda function configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSummary {
    pub function_name: Option<String>,
    /// Groups from the function's VPC config; `None` when not attached to a VPC
    pub vpc_group_ids: Option<Vec<String>>,
}

/// One page of ListFunctions output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionPage {
    pub functions: Vec<FunctionSummary>,
    pub next_marker: Option<String>,
}
