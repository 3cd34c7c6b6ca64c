//! sg-janitor - cleanup of unreferenced EC2 security groups
//!
//! This crate finds security groups that no network interface, EC2 instance
//! or Lambda VPC configuration references, deletes them, and reports the
//! number of deletions to CloudWatch.
//!
//! ## Binaries
//!
//! - `sg-janitor-lambda`: Lambda entry point, meant to run on a schedule
//! - `sg-janitor`: one-shot local run, with a dry-run mode
//!
//! ## Modules
//!
//! - [`aws`]: SDK client wrappers, error classification, mockable traits
//! - [`orchestrator`]: inventory, reference set, delete loop, metric report
//! - [`retry`]: fixed-delay retry on throttling

pub mod aws;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod retry;

pub use config::JanitorConfig;
pub use orchestrator::{CleanupPlan, CleanupReport, CleanupResponse, handle_invocation};
pub use retry::RetryPolicy;
