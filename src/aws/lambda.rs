//! Lambda function listing

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::{AwsError, classify_sdk_error};
use crate::aws::types::{FunctionPage, FunctionSummary};
use aws_sdk_lambda::{Client, types::FunctionConfiguration};
use tracing::debug;

/// Lambda client used to find VPC-attached functions
pub struct LambdaClient {
    client: Client,
}

impl FromAwsContext for LambdaClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.lambda_client(),
        }
    }
}

impl LambdaClient {
    /// Fetch one page of ListFunctions, starting at `marker`
    pub async fn list_functions_page(
        &self,
        marker: Option<&str>,
    ) -> Result<FunctionPage, AwsError> {
        let response = self
            .client
            .list_functions()
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        let page = FunctionPage {
            functions: response.functions().iter().map(function_from_sdk).collect(),
            next_marker: response
                .next_marker()
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        };

        debug!(
            count = page.functions.len(),
            has_more = page.next_marker.is_some(),
            "Listed Lambda functions page"
        );
        Ok(page)
    }
}

pub(crate) fn function_from_sdk(function: &FunctionConfiguration) -> FunctionSummary {
    FunctionSummary {
        function_name: function.function_name().map(str::to_string),
        vpc_group_ids: function
            .vpc_config()
            .map(|vpc| vpc.security_group_ids().to_vec()),
    }
}
