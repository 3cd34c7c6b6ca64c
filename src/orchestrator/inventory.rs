//! Inventory collection
//!
//! Reads the account state the cleanup decides on: security groups, network
//! interfaces, instances and Lambda functions, in that order.

use crate::aws::{
    AwsError, Ec2Operations, FunctionSummary, LambdaOperations, NetworkInterface, Reservation,
    SecurityGroup,
};
use crate::retry::{RetryPolicy, retry_on_throttle};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Snapshot of everything a cleanup run looks at
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub security_groups: Vec<SecurityGroup>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub reservations: Vec<Reservation>,
    pub functions: Vec<FunctionSummary>,
}

/// Collect the inventory. Calls are issued one at a time.
pub async fn collect_inventory<E, L>(ec2: &E, lambda: &L, retry: &RetryPolicy) -> Result<Inventory>
where
    E: Ec2Operations,
    L: LambdaOperations,
{
    let security_groups = ec2
        .describe_security_groups()
        .await
        .context("Failed to describe security groups")?;

    let network_interfaces = ec2
        .describe_network_interfaces()
        .await
        .context("Failed to describe network interfaces")?;

    let reservations = ec2
        .describe_instances()
        .await
        .context("Failed to describe instances")?;

    let functions = list_all_functions(lambda, retry)
        .await
        .context("Failed to list Lambda functions")?;

    info!(
        security_groups = security_groups.len(),
        network_interfaces = network_interfaces.len(),
        reservations = reservations.len(),
        functions = functions.len(),
        "Collected inventory"
    );

    Ok(Inventory {
        security_groups,
        network_interfaces,
        reservations,
        functions,
    })
}

/// List every Lambda function, following `NextMarker` until it is absent.
///
/// Each page fetch is retried on throttling; items keep page order.
pub async fn list_all_functions<L>(
    lambda: &L,
    retry: &RetryPolicy,
) -> Result<Vec<FunctionSummary>, AwsError>
where
    L: LambdaOperations,
{
    let mut functions = Vec::new();
    let mut marker: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = retry_on_throttle(retry, "list functions", || {
            lambda.list_functions_page(marker.clone())
        })
        .await?;
        pages += 1;

        functions.extend(page.functions);
        marker = page.next_marker;

        debug!(page = pages, total = functions.len(), "Fetched functions page");

        if marker.is_none() {
            break;
        }
    }

    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{FunctionPage, MockEc2Operations, MockLambdaOperations};
    use mockall::Sequence;
    use std::time::Duration;

    fn function(name: &str) -> FunctionSummary {
        FunctionSummary {
            function_name: Some(name.to_string()),
            vpc_group_ids: None,
        }
    }

    fn page(names: &[&str], next: Option<&str>) -> FunctionPage {
        FunctionPage {
            functions: names.iter().map(|n| function(n)).collect(),
            next_marker: next.map(str::to_string),
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(5, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_pagination_follows_markers_in_order() {
        let mut lambda = MockLambdaOperations::new();
        let mut seq = Sequence::new();

        lambda
            .expect_list_functions_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|marker| {
                assert_eq!(marker, None);
                Ok(page(&["f1", "f2"], Some("B")))
            });
        lambda
            .expect_list_functions_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|marker| {
                assert_eq!(marker.as_deref(), Some("B"));
                Ok(page(&["f3"], Some("C")))
            });
        lambda
            .expect_list_functions_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|marker| {
                assert_eq!(marker.as_deref(), Some("C"));
                Ok(page(&["f4", "f5"], None))
            });

        let functions = list_all_functions(&lambda, &fast_retry()).await.unwrap();
        let names: Vec<_> = functions
            .iter()
            .filter_map(|f| f.function_name.as_deref())
            .collect();
        assert_eq!(names, vec!["f1", "f2", "f3", "f4", "f5"]);
    }

    #[tokio::test]
    async fn test_single_empty_page() {
        let mut lambda = MockLambdaOperations::new();
        lambda
            .expect_list_functions_page()
            .times(1)
            .returning(|_| Ok(FunctionPage::default()));

        let functions = list_all_functions(&lambda, &fast_retry()).await.unwrap();
        assert!(functions.is_empty());
    }

    #[tokio::test]
    async fn test_throttled_page_is_retried() {
        let mut lambda = MockLambdaOperations::new();
        let mut seq = Sequence::new();

        lambda
            .expect_list_functions_page()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(AwsError::Throttled {
                    message: "Rate exceeded".to_string(),
                })
            });
        lambda
            .expect_list_functions_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|marker| {
                assert_eq!(marker, None);
                Ok(page(&["f1"], None))
            });

        let functions = list_all_functions(&lambda, &fast_retry()).await.unwrap();
        assert_eq!(functions.len(), 1);
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let mut lambda = MockLambdaOperations::new();
        lambda.expect_list_functions_page().times(1).returning(|_| {
            Err(AwsError::Sdk {
                code: Some("AccessDeniedException".to_string()),
                message: "no lambda:ListFunctions".to_string(),
            })
        });

        let err = list_all_functions(&lambda, &fast_retry()).await.unwrap_err();
        assert_eq!(err.code(), Some("AccessDeniedException"));
    }

    #[tokio::test]
    async fn test_collect_inventory_stops_at_first_failure() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_security_groups()
            .times(1)
            .returning(|| Ok(vec![SecurityGroup::new("sg-1", "web")]));
        ec2.expect_describe_network_interfaces().times(1).returning(|| {
            Err(AwsError::Sdk {
                code: Some("UnauthorizedOperation".to_string()),
                message: "denied".to_string(),
            })
        });
        ec2.expect_describe_instances().times(0);
        let lambda = MockLambdaOperations::new();

        let err = collect_inventory(&ec2, &lambda, &fast_retry())
            .await
            .unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Failed to describe network interfaces: AWS error: denied"
        );
    }
}
