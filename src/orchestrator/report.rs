//! Best-effort metric reporting

use super::types::MetricReport;
use crate::aws::MetricsOperations;
use tracing::{error, info};

/// Publish the deletion count. Failures are logged and returned as data.
pub async fn report_deleted_count<M>(metrics: &M, function_name: &str, count: usize) -> MetricReport
where
    M: MetricsOperations,
{
    match metrics.put_deleted_count(function_name, count).await {
        Ok(()) => {
            info!(value = count, function_name = %function_name, "CloudWatch metric pushed: DeletedSecurityGroups");
            MetricReport::Published { value: count }
        }
        Err(e) => {
            error!(error = %e, "Failed to push CloudWatch metric");
            MetricReport::Failed {
                error: e.to_string(),
            }
        }
    }
}
