//! sg-janitor-lambda: scheduled Lambda entry point
//!
//! The event payload is ignored; every invocation runs a full cleanup and
//! returns the `{ statusCode, body }` response.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use sg_janitor::aws::{AwsContext, CloudWatchClient, Ec2Client, FromAwsContext, LambdaClient};
use sg_janitor::logging::{self, LogFormat};
use sg_janitor::{CleanupResponse, JanitorConfig, handle_invocation};
use tracing::info;

async fn handle_event(
    aws: &AwsContext,
    config: &JanitorConfig,
    event: LambdaEvent<Value>,
) -> Result<CleanupResponse, Error> {
    info!(request_id = %event.context.request_id, "Starting security group cleanup");

    // Fresh handles per invocation, sharing the config loaded at cold start
    let ec2 = Ec2Client::from_context(aws);
    let lambda = LambdaClient::from_context(aws);
    let cloudwatch = CloudWatchClient::from_context(aws);

    Ok(handle_invocation(&ec2, &lambda, &cloudwatch, config).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init(LogFormat::Json);

    let config = JanitorConfig::from_env();
    let aws = AwsContext::load(None, None).await;
    info!(
        function_name = ?config.function_name,
        region = ?aws.region(),
        "Starting sg-janitor-lambda"
    );

    run(service_fn(|event| handle_event(&aws, &config, event))).await
}
