//! Main orchestration logic for a cleanup run
//!
//! The run is strictly sequential:
//! 1. describe security groups, network interfaces and instances
//! 2. list Lambda functions page by page
//! 3. build the reference set and pick unused groups
//! 4. delete each unused group
//! 5. push the deletion count to CloudWatch (best effort)
//!
//! Errors in steps 1-3 abort the run and produce a 500 response. Per-group
//! delete failures and metric failures are recorded, never escalated.

mod delete;
mod inventory;
mod references;
mod report;
mod types;

pub use delete::delete_unused_groups;
pub use inventory::{Inventory, collect_inventory, list_all_functions};
pub use references::{DEFAULT_GROUP_NAME, ReferenceSet, find_unused_groups};
pub use report::report_deleted_count;
pub use types::{
    CleanupPlan, CleanupReport, CleanupResponse, DeleteResult, DeleteStatus, FAILURE_MESSAGE,
    MetricReport, ResponseBody, SUCCESS_MESSAGE,
};

use crate::aws::{Ec2Operations, LambdaOperations, MetricsOperations};
use crate::config::JanitorConfig;
use anyhow::Result;
use tracing::{error, info};

/// Collect the inventory and work out which groups are unused, without deleting.
pub async fn plan_cleanup<E, L>(ec2: &E, lambda: &L, config: &JanitorConfig) -> Result<CleanupPlan>
where
    E: Ec2Operations,
    L: LambdaOperations,
{
    let inventory = collect_inventory(ec2, lambda, &config.retry).await?;

    let refs = ReferenceSet::from_inventory(
        &inventory.network_interfaces,
        &inventory.reservations,
        &inventory.functions,
    );
    let unused = find_unused_groups(&inventory.security_groups, &refs);

    info!(
        total = inventory.security_groups.len(),
        referenced = refs.len(),
        unused = unused.len(),
        "Found {} unused security groups",
        unused.len()
    );

    Ok(CleanupPlan {
        total_groups: inventory.security_groups.len(),
        referenced_groups: refs.len(),
        unused,
    })
}

/// Run a full cleanup: plan, delete, report.
pub async fn run_cleanup<E, L, M>(
    ec2: &E,
    lambda: &L,
    metrics: &M,
    config: &JanitorConfig,
) -> Result<CleanupReport>
where
    E: Ec2Operations,
    L: LambdaOperations,
    M: MetricsOperations,
{
    let plan = plan_cleanup(ec2, lambda, config).await?;

    let delete_results = delete_unused_groups(ec2, &plan.unused, &config.retry).await;
    let deleted = types::deleted_count(&delete_results);

    let metric = report_deleted_count(metrics, config.metric_function_name(), deleted).await;

    let report = CleanupReport {
        delete_results,
        metric,
    };
    info!(
        deleted = report.deleted_count(),
        failed = report.failed_count(),
        "Cleanup finished"
    );
    Ok(report)
}

/// Entry point shared by the Lambda handler and the CLI.
///
/// Never fails: any error that escapes [`run_cleanup`] becomes a 500 response.
pub async fn handle_invocation<E, L, M>(
    ec2: &E,
    lambda: &L,
    metrics: &M,
    config: &JanitorConfig,
) -> CleanupResponse
where
    E: Ec2Operations,
    L: LambdaOperations,
    M: MetricsOperations,
{
    match run_cleanup(ec2, lambda, metrics, config).await {
        Ok(report) => CleanupResponse::success(report.delete_results),
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Error cleaning up unused security groups");
            CleanupResponse::failure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{
        AwsError, FunctionPage, FunctionSummary, MockEc2Operations, MockLambdaOperations,
        MockMetricsOperations, NetworkInterface, SecurityGroup,
    };
    use crate::retry::RetryPolicy;
    use serde_json::json;
    use std::time::Duration;

    fn config() -> JanitorConfig {
        JanitorConfig::default()
            .with_function_name("sg-cleanup")
            .with_retry(RetryPolicy::new(5, Duration::ZERO))
    }

    fn interface(groups: &[&str]) -> NetworkInterface {
        NetworkInterface {
            interface_id: Some("eni-1".to_string()),
            group_ids: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// EC2 mock with the given inventory; only G2 is referenced, via one interface.
    fn ec2_with_groups(groups: Vec<SecurityGroup>) -> MockEc2Operations {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_security_groups()
            .times(1)
            .returning(move || Ok(groups.clone()));
        ec2.expect_describe_network_interfaces()
            .times(1)
            .returning(|| Ok(vec![interface(&["G2"])]));
        ec2.expect_describe_instances()
            .times(1)
            .returning(|| Ok(vec![]));
        ec2
    }

    fn lambda_without_vpc_functions() -> MockLambdaOperations {
        let mut lambda = MockLambdaOperations::new();
        lambda.expect_list_functions_page().times(1).returning(|_| {
            Ok(FunctionPage {
                functions: vec![FunctionSummary {
                    function_name: Some("public-fn".to_string()),
                    vpc_group_ids: None,
                }],
                next_marker: None,
            })
        });
        lambda
    }

    fn metrics_expecting(value: usize) -> MockMetricsOperations {
        let mut metrics = MockMetricsOperations::new();
        metrics
            .expect_put_deleted_count()
            .times(1)
            .returning(move |name, count| {
                assert_eq!(name, "sg-cleanup");
                assert_eq!(count, value);
                Ok(())
            });
        metrics
    }

    #[tokio::test]
    async fn test_end_to_end_deletes_only_unreferenced_group() {
        let mut ec2 = ec2_with_groups(vec![
            SecurityGroup::new("G1", "default"),
            SecurityGroup::new("G2", "in-use"),
            SecurityGroup::new("G3", "stale"),
        ]);
        ec2.expect_delete_security_group()
            .times(1)
            .returning(|id| {
                assert_eq!(id, "G3");
                Ok(())
            });
        let lambda = lambda_without_vpc_functions();
        let metrics = metrics_expecting(1);

        let response = handle_invocation(&ec2, &lambda, &metrics, &config()).await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "body": {
                    "message": "Unused security group cleanup complete",
                    "deleteResults": [
                        {"GroupId": "G3", "GroupName": "stale", "Status": "Deleted"}
                    ]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_partial_failure_still_succeeds() {
        let mut ec2 = ec2_with_groups(vec![
            SecurityGroup::new("G2", "in-use"),
            SecurityGroup::new("G3", "stale"),
            SecurityGroup::new("G4", "referenced-by-another-sg"),
        ]);
        ec2.expect_delete_security_group()
            .times(2)
            .returning(|id| match id {
                "G4" => Err(AwsError::DependencyViolation {
                    message: "resource G4 has a dependent object".to_string(),
                }),
                _ => Ok(()),
            });
        let lambda = lambda_without_vpc_functions();
        let metrics = metrics_expecting(1);

        let response = handle_invocation(&ec2, &lambda, &metrics, &config()).await;

        assert!(response.is_success());
        let ResponseBody::Success { delete_results, .. } = response.body else {
            panic!("expected success body");
        };
        assert_eq!(delete_results.len(), 2);
        assert_eq!(delete_results[0].group_id, "G3");
        assert_eq!(delete_results[0].status, DeleteStatus::Deleted);
        assert_eq!(delete_results[1].group_id, "G4");
        assert_eq!(delete_results[1].status, DeleteStatus::Failed);
        assert!(delete_results[1].error.is_some());
    }

    #[tokio::test]
    async fn test_metric_failure_does_not_change_response() {
        let mut ec2 = ec2_with_groups(vec![SecurityGroup::new("G3", "stale")]);
        ec2.expect_delete_security_group()
            .times(1)
            .returning(|_| Ok(()));
        let lambda = lambda_without_vpc_functions();
        let mut metrics = MockMetricsOperations::new();
        metrics.expect_put_deleted_count().times(1).returning(|_, _| {
            Err(AwsError::Throttled {
                message: "Rate exceeded".to_string(),
            })
        });

        let response = handle_invocation(&ec2, &lambda, &metrics, &config()).await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "body": {
                    "message": "Unused security group cleanup complete",
                    "deleteResults": [
                        {"GroupId": "G3", "GroupName": "stale", "Status": "Deleted"}
                    ]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_metric_failure_is_reported() {
        let mut ec2 = ec2_with_groups(vec![SecurityGroup::new("G3", "stale")]);
        ec2.expect_delete_security_group()
            .times(1)
            .returning(|_| Ok(()));
        let lambda = lambda_without_vpc_functions();
        let mut metrics = MockMetricsOperations::new();
        metrics.expect_put_deleted_count().times(1).returning(|_, _| {
            Err(AwsError::Throttled {
                message: "Rate exceeded".to_string(),
            })
        });

        let report = run_cleanup(&ec2, &lambda, &metrics, &config()).await.unwrap();
        assert_eq!(report.deleted_count(), 1);
        assert!(matches!(report.metric, MetricReport::Failed { .. }));
    }

    #[tokio::test]
    async fn test_unknown_function_name_tags_metric_with_fallback() {
        let ec2 = ec2_with_groups(vec![SecurityGroup::new("G2", "in-use")]);
        let lambda = lambda_without_vpc_functions();
        let mut metrics = MockMetricsOperations::new();
        metrics
            .expect_put_deleted_count()
            .times(1)
            .returning(|name, count| {
                assert_eq!(name, "UnknownFunction");
                assert_eq!(count, 0);
                Ok(())
            });

        let config = JanitorConfig::default().with_retry(RetryPolicy::new(1, Duration::ZERO));
        let report = run_cleanup(&ec2, &lambda, &metrics, &config).await.unwrap();
        assert!(report.delete_results.is_empty());
        assert_eq!(report.metric, MetricReport::Published { value: 0 });
    }

    #[tokio::test]
    async fn test_fatal_describe_failure_returns_500_without_deleting() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_security_groups().times(1).returning(|| {
            Err(AwsError::Sdk {
                code: Some("UnauthorizedOperation".to_string()),
                message: "You are not authorized to perform this operation.".to_string(),
            })
        });
        ec2.expect_delete_security_group().times(0);
        let lambda = MockLambdaOperations::new();
        let mut metrics = MockMetricsOperations::new();
        metrics.expect_put_deleted_count().times(0);

        let response = handle_invocation(&ec2, &lambda, &metrics, &config()).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            ResponseBody::Failure {
                message: "Error cleaning up unused security groups".to_string(),
                error: "Failed to describe security groups: AWS error: You are not authorized to perform this operation.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_plan_counts_lambda_references() {
        let mut ec2 = ec2_with_groups(vec![
            SecurityGroup::new("G2", "in-use"),
            SecurityGroup::new("G5", "lambda-sg"),
            SecurityGroup::new("G6", "stale"),
        ]);
        ec2.expect_delete_security_group().times(0);
        let mut lambda = MockLambdaOperations::new();
        lambda.expect_list_functions_page().times(1).returning(|_| {
            Ok(FunctionPage {
                functions: vec![FunctionSummary {
                    function_name: Some("vpc-fn".to_string()),
                    vpc_group_ids: Some(vec!["G5".to_string()]),
                }],
                next_marker: None,
            })
        });

        let plan = plan_cleanup(&ec2, &lambda, &config()).await.unwrap();
        assert_eq!(plan.total_groups, 3);
        assert_eq!(plan.referenced_groups, 2);
        assert_eq!(plan.unused, vec![SecurityGroup::new("G6", "stale")]);
    }
}
