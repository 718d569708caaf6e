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
pub struct ListCredentials {
    /// A unique identifier for each API client
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub open_identity_id: String,
    /// Include the actions that can be performed on each credential
    #[arg(long)]
    pub actions: bool,
    #[command(flatten)]
    pub common: CommonOptions,
}

#[async_trait]
impl RunCommand for ListCredentials {
    async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner,
    {
        let response = identity::list_credentials(
            &session.client,
            &self.open_identity_id,
            self.actions,
        )
        .await?;
        Report::json(response)
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::{json, Value};

    use super::*;
    use crate::commands::test_util::{common, session, Recorder};

    #[tokio::test]
    async fn lists_credentials_as_json() {
        let body = json!([
            {"credentialId": 1001, "clientToken": "akab-one", "status": "ACTIVE"},
            {"credentialId": 1002, "clientToken": "akab-two", "status": "INACTIVE"},
        ]);
        let session = session(Recorder::new(StatusCode::OK, &body));
        let command = ListCredentials {
            open_identity_id: "oid-1".to_owned(),
            actions: true,
            common: common(),
        };
        let Report::Output(output) = command.run(&session).await.unwrap() else {
            panic!("expected output");
        };
        assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), body);
        assert_eq!(
            session.client.urls(),
            vec![
                "https://akab-host.example/identity-management/v1/\
                 open-identities/oid-1/credentials?actions=true"
            ]
        );
    }
}
