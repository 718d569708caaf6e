use akamai_iam_client::RequestRunner;
use anyhow::Result;
use async_trait::async_trait;

use crate::config::Session;
use crate::report::Report;

/// A command that performs exactly one API call.
#[async_trait]
pub trait RunCommand {
    async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner;
}
