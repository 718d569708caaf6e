use akamai_iam_client::{identity, RequestRunner};
use anyhow::Result;
use async_trait::async_trait;
use clap::builder::NonEmptyStringValueParser;
use clap::Args;

use crate::args::CommonOptions;
use crate::config::Session;
use crate::report::Report;
use crate::RunCommand;

#[derive(Args, Debug, Clone)]
pub struct GetClient {
    /// An access token identifies a collection of APIs belonging to an API
    /// client. Defaults to the access token of the edgerc section
    #[arg(long, value_name = "TOKEN", value_parser = NonEmptyStringValueParser::new())]
    pub access_token: Option<String>,
    /// Include the actions that can be performed on this client
    #[arg(long)]
    pub actions: bool,
    #[command(flatten)]
    pub common: CommonOptions,
}

impl GetClient {
    /// The explicit token if given, otherwise the session's own.
    fn access_token<'a, R>(&'a self, session: &'a Session<R>) -> &'a str {
        self.access_token.as_deref().unwrap_or(&session.access_token)
    }
}

#[async_trait]
impl RunCommand for GetClient {
    async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner,
    {
        let response = identity::get_client(
            &session.client,
            self.access_token(session),
            self.actions,
        )
        .await?;
        Report::json(response)
    }
}
