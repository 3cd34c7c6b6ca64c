//! Sequential delete loop

use super::types::DeleteResult;
use crate::aws::{Ec2Operations, SecurityGroup};
use crate::retry::{RetryPolicy, retry_on_throttle};
use tracing::{info, warn};

/// Delete each candidate in order, one at a time.
///
/// A failed deletion is recorded and the loop moves on; it never aborts the
/// remaining candidates.
pub async fn delete_unused_groups<E>(
    ec2: &E,
    groups: &[SecurityGroup],
    retry: &RetryPolicy,
) -> Vec<DeleteResult>
where
    E: Ec2Operations,
{
    let mut results = Vec::with_capacity(groups.len());

    for group in groups {
        info!(
            sg_id = %group.group_id,
            sg_name = %group.group_name,
            "Attempting to delete security group"
        );

        let outcome = retry_on_throttle(retry, "delete security group", || {
            ec2.delete_security_group(&group.group_id)
        })
        .await;

        match outcome {
            Ok(()) => {
                info!(sg_id = %group.group_id, sg_name = %group.group_name, "Deleted");
                results.push(DeleteResult::deleted(group));
            }
            Err(e) => {
                warn!(
                    sg_id = %group.group_id,
                    sg_name = %group.group_name,
                    error_code = ?e.code(),
                    error = %e,
                    "Failed to delete security group"
                );
                results.push(DeleteResult::failed(group, &e));
            }
        }
    }

    results
}
