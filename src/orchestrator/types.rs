//! Result and response types for a cleanup run

use crate::aws::SecurityGroup;
use serde::Serialize;

/// Message returned with a successful run
pub const SUCCESS_MESSAGE: &str = "Unused security group cleanup complete";

/// Message returned with a failed run
pub const FAILURE_MESSAGE: &str = "Error cleaning up unused security groups";

/// Outcome of a single deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteStatus {
    Deleted,
    Failed,
}

/// Per-group record produced by the delete loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteResult {
    pub group_id: String,
    pub group_name: String,
    pub status: DeleteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteResult {
    pub fn deleted(group: &SecurityGroup) -> Self {
        Self {
            group_id: group.group_id.clone(),
            group_name: group.group_name.clone(),
            status: DeleteStatus::Deleted,
            error: None,
        }
    }

    pub fn failed(group: &SecurityGroup, error: impl ToString) -> Self {
        Self {
            group_id: group.group_id.clone(),
            group_name: group.group_name.clone(),
            status: DeleteStatus::Failed,
            error: Some(error.to_string()),
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.status == DeleteStatus::Deleted
    }
}

/// What a run would delete, computed before any deletion happens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupPlan {
    /// Security groups in the inventory
    pub total_groups: usize,
    /// Distinct group ids referenced by interfaces, instances or functions
    pub referenced_groups: usize,
    /// Candidates for deletion, in inventory order
    pub unused: Vec<SecurityGroup>,
}

/// Outcome of the best-effort metric emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricReport {
    /// The data point was accepted
    Published { value: usize },
    /// Emission failed; the error was logged and discarded
    Failed { error: String },
}

/// Everything a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub delete_results: Vec<DeleteResult>,
    pub metric: MetricReport,
}

impl CleanupReport {
    pub fn deleted_count(&self) -> usize {
        deleted_count(&self.delete_results)
    }

    pub fn failed_count(&self) -> usize {
        self.delete_results.len() - self.deleted_count()
    }
}

pub(crate) fn deleted_count(results: &[DeleteResult]) -> usize {
    results.iter().filter(|r| r.is_deleted()).count()
}

/// Body of the invocation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        message: String,
        #[serde(rename = "deleteResults")]
        delete_results: Vec<DeleteResult>,
    },
    Failure {
        message: String,
        error: String,
    },
}

/// Response returned by the entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl CleanupResponse {
    pub fn success(delete_results: Vec<DeleteResult>) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Success {
                message: SUCCESS_MESSAGE.to_string(),
                delete_results,
            },
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody::Failure {
                message: FAILURE_MESSAGE.to_string(),
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
