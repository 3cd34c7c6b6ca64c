//! sg-janitor: run one security group cleanup from a workstation
//!
//! Uses the standard AWS credential chain. With `--dry-run` it only prints
//! the groups that would be deleted.

use anyhow::Result;
use clap::Parser;
use sg_janitor::aws::{AwsContext, CloudWatchClient, Ec2Client, FromAwsContext, LambdaClient};
use sg_janitor::config::FUNCTION_NAME_ENV;
use sg_janitor::logging::{self, LogFormat};
use sg_janitor::orchestrator::plan_cleanup;
use sg_janitor::{JanitorConfig, handle_invocation};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sg-janitor")]
#[command(about = "Delete EC2 security groups that nothing references")]
#[command(version)]
struct Args {
    /// AWS region (defaults to the standard provider chain)
    #[arg(long)]
    region: Option<String>,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    profile: Option<String>,

    /// Function name used to tag the CloudWatch metric
    #[arg(long, env = FUNCTION_NAME_ENV)]
    function_name: Option<String>,

    /// List unused groups without deleting anything or pushing metrics
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }
}

/// Returns whether the run succeeded.
async fn run() -> Result<bool> {
    logging::init(LogFormat::Pretty);
    let args = Args::parse();

    let aws = AwsContext::load(args.region.as_deref(), args.profile.as_deref()).await;
    let config = JanitorConfig {
        function_name: args.function_name.filter(|n| !n.trim().is_empty()),
        ..Default::default()
    };
    info!(region = ?aws.region(), dry_run = args.dry_run, "Starting sg-janitor");

    let ec2 = Ec2Client::from_context(&aws);
    let lambda = LambdaClient::from_context(&aws);

    if args.dry_run {
        let plan = plan_cleanup(&ec2, &lambda, &config).await?;
        for group in &plan.unused {
            info!(sg_id = %group.group_id, sg_name = %group.group_name, "[DRY RUN] Would delete");
        }
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(true);
    }

    let cloudwatch = CloudWatchClient::from_context(&aws);
    let response = handle_invocation(&ec2, &lambda, &cloudwatch, &config).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(response.is_success())
}
