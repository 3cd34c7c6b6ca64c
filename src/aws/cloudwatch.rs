//! CloudWatch metrics reporting

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::{AwsError, classify_sdk_error};
use crate::metrics::{self, NAMESPACE};
use aws_sdk_cloudwatch::{
    Client,
    types::{MetricDatum, StandardUnit},
};
use tracing::debug;

/// CloudWatch client for pushing cleanup metrics
pub struct CloudWatchClient {
    client: Client,
}

impl FromAwsContext for CloudWatchClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.cloudwatch_client(),
        }
    }
}

impl CloudWatchClient {
    /// Push the number of security groups deleted in this run
    pub async fn put_deleted_count(&self, function_name: &str, count: usize) -> Result<(), AwsError> {
        debug!(count, function_name = %function_name, "Pushing deleted count metric");

        self.client
            .put_metric_data()
            .namespace(NAMESPACE)
            .metric_data(deleted_count_datum(function_name, count))
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }
}

fn deleted_count_datum(function_name: &str, count: usize) -> MetricDatum {
    MetricDatum::builder()
        .metric_name(metrics::names::DELETED_SECURITY_GROUPS)
        .set_dimensions(Some(metrics::build_dimensions(function_name)))
        .value(count as f64)
        .unit(StandardUnit::Count)
        .build()
}
