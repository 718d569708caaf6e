use akamai_iam_client::{identity, AccountSwitchKey, RequestRunner};
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use prettytable::format::{
    FormatBuilder,
    LinePosition,
    LineSeparator,
    TableFormat,
};
use prettytable::{row, Table};
use serde_json::Value;

use crate::args::CommonOptions;
use crate::config::Session;
use crate::report::Report;
use crate::RunCommand;

#[derive(Args, Debug, Clone)]
pub struct ListAccountSwitchKeys {
    /// A unique identifier for each API client
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub open_identity_id: String,
    /// Use this to filter results by accountId or accountName. Enter at least
    /// three characters in the string to filter the results.
    #[arg(long, value_name = "STR")]
    pub search: Option<String>,
    /// Output format in json
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub common: CommonOptions,
}

#[async_trait]
impl RunCommand for ListAccountSwitchKeys {
    async fn run<R>(&self, session: &Session<R>) -> Result<Report>
    where
        R: RequestRunner,
    {
        let response = identity::list_account_switch_keys(
            &session.client,
            &self.open_identity_id,
            self.search.as_deref(),
        )
        .await?;

        if self.json {
            Report::json(response)
        } else {
            Report::from_response(response, render_table)
        }
    }
}

/// Rules around the header and after the last row, none between rows.
fn table_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(
            &[LinePosition::Top, LinePosition::Title, LinePosition::Bottom],
            LineSeparator::new('-', '+', '+', '+'),
        )
        .padding(1, 1)
        .build()
}

/// One left-aligned row per key, in the order the server returned them.
fn render_table(body: Value) -> Result<String> {
    let keys: Vec<AccountSwitchKey> = serde_json::from_value(body)
        .context("Unexpected account switch keys listing")?;

    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(row!["accountSwitchKey", "Account Name"]);
    for key in keys {
        table.add_row(row![key.account_switch_key, key.account_name]);
    }

    Ok(table.to_string().trim_end().to_owned())
}
