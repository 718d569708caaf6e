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
pub struct GetCredential {
    /// A unique identifier for each API client
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub open_identity_id: String,
    /// A credential's unique identifier
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub credential_id: String,
    /// Optionally enable actions to include them as part of the response
    /// object
    #[arg(long)]
    pub actions: bool,
    #[command(flatten)]
    pub common: CommonOptions,
}

#[async_trait]
impl RunCommand for GetCredential {
    async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner,
    {
        let response = identity::get_credential(
            &session.client,
            &self.open_identity_id,
            &self.credential_id,
            self.actions,
        )
        .await?;
        Report::json(response)
    }
}
