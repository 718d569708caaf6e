//! API commands, one module per command.
mod get_client;
mod get_credential;
mod list_account_switch_keys;
mod list_credentials;

use akamai_iam_client::RequestRunner;
use anyhow::Result;
pub use get_client::GetClient;
pub use get_credential::GetCredential;
pub use list_account_switch_keys::ListAccountSwitchKeys;
pub use list_credentials::ListCredentials;
use tracing::debug;

use crate::args::CliCommand;
use crate::config::Session;
use crate::report::Report;
use crate::RunCommand;

impl CliCommand {
    /// Runs an API command. `help` is handled before a session exists and
    /// never reaches this point.
    pub async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner,
    {
        if let Some(kind) = self.kind() {
            debug!("Running {}", kind.name());
        }
        match self {
            | CliCommand::ListAccountSwitchKeys(c) => c.run(session).await,
            | CliCommand::ListCredentials(c) => c.run(session).await,
            | CliCommand::GetCredential(c) => c.run(session).await,
            | CliCommand::GetClient(c) => c.run(session).await,
            | CliCommand::Help { .. } => {
                anyhow::bail!("help does not call the API")
            }
        }
    }
}
