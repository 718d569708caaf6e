use std::ffi::OsString;
use std::path::PathBuf;

use akamai_iam_client::{DEFAULT_SECTION, EDGERC_ENV, EDGERC_SECTION_ENV};
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::commands;

const AKAMAI_CLI_VAR: &str = "AKAMAI_CLI";
const BIN_NAME: &str = "akamai-iam";

#[derive(Parser, Debug, Clone)]
#[command(version, disable_help_subcommand = true)]
/// Akamai CLI for IAM
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options accepted by every API command.
#[derive(Args, Debug, Clone)]
pub struct CommonOptions {
    #[arg(long, value_name = "FILE", env(EDGERC_ENV))]
    /// Location of the credentials file [default: ~/.edgerc]
    pub edgerc: Option<PathBuf>,
    #[arg(
        long,
        value_name = "SECTION",
        env(EDGERC_SECTION_ENV),
        default_value = DEFAULT_SECTION,
        value_parser = NonEmptyStringValueParser::new()
    )]
    /// Section of the credentials file
    pub section: String,
    #[arg(long)]
    /// DEBUG mode to generate additional logs for troubleshooting
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// List the accountSwitchKeys and account names you can access based on
    /// the permissions of your API client
    ListAccountSwitchKeys(commands::ListAccountSwitchKeys),
    /// Get an API client's credentials
    ListCredentials(commands::ListCredentials),
    /// Get details for a single credential
    GetCredential(commands::GetCredential),
    /// View an API client's details
    GetClient(commands::GetClient),
    /// Show available help
    Help {
        /// Command to show help for
        command: Option<String>,
    },
}

/// The API commands, by the name they are invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    ListAccountSwitchKeys,
    ListCredentials,
    GetCredential,
    GetClient,
}

static COMMANDS: &[(&str, CommandKind)] = &[
    ("list-account-switch-keys", CommandKind::ListAccountSwitchKeys),
    ("list-credentials", CommandKind::ListCredentials),
    ("get-credential", CommandKind::GetCredential),
    ("get-client", CommandKind::GetClient),
];

impl CommandKind {
    /// Accepts both `list-credentials` and `list_credentials`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.replace('_', "-");
        COMMANDS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }
}

impl CliCommand {
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            | CliCommand::ListAccountSwitchKeys(_) => {
                Some(CommandKind::ListAccountSwitchKeys)
            }
            | CliCommand::ListCredentials(_) => {
                Some(CommandKind::ListCredentials)
            }
            | CliCommand::GetCredential(_) => Some(CommandKind::GetCredential),
            | CliCommand::GetClient(_) => Some(CommandKind::GetClient),
            | CliCommand::Help { .. } => None,
        }
    }

    pub fn common(&self) -> Option<&CommonOptions> {
        match self {
            | CliCommand::ListAccountSwitchKeys(c) => Some(&c.common),
            | CliCommand::ListCredentials(c) => Some(&c.common),
            | CliCommand::GetCredential(c) => Some(&c.common),
            | CliCommand::GetClient(c) => Some(&c.common),
            | CliCommand::Help { .. } => None,
        }
    }
}

/// `akamai iam` when running as an Akamai CLI package, the executable name
/// otherwise.
pub fn program_name() -> String {
    resolve_program_name(
        std::env::var_os(AKAMAI_CLI_VAR).is_some(),
        std::env::args_os().next(),
    )
}

fn resolve_program_name(
    under_akamai_cli: bool,
    argv0: Option<OsString>,
) -> String {
    if under_akamai_cli {
        return "akamai iam".to_owned();
    }
    argv0
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|f| f.to_string_lossy().into_owned()))
        .unwrap_or_else(|| BIN_NAME.to_owned())
}

impl Cli {
    pub fn command_with_name() -> clap::Command {
        Cli::command().bin_name(program_name())
    }

    /// Parses the process arguments. `None` means no command was given and
    /// the top-level help has been printed.
    pub fn parse_args() -> Option<Self> {
        if std::env::args_os().len() <= 1 {
            // Printing help is best effort, a closed stdout is not an error.
            let _ = Cli::command_with_name()
                .bin_name(format!("{} [command]", program_name()))
                .print_help();
            return None;
        }
        let matches = Cli::command_with_name().get_matches();
        match Cli::from_arg_matches(&matches) {
            | Ok(cli) => Some(cli),
            | Err(e) => e.exit(),
        }
    }
}

/// Prints the help of `command`, or the top-level help if it's missing or
/// unknown.
pub fn print_help(command: Option<&str>) -> std::io::Result<()> {
    help_command(command, &program_name()).print_help()
}

fn help_command(command: Option<&str>, program: &str) -> clap::Command {
    let mut cli = Cli::command().bin_name(program);
    if let Some(kind) = command.and_then(CommandKind::from_name) {
        cli.build();
        if let Some(sub) = cli.find_subcommand(kind.name()) {
            return sub.clone();
        }
    }
    cli.bin_name(format!("{program} help [command]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_command_name_is_registered() {
        let cli = Cli::command();
        for (name, kind) in COMMANDS {
            assert!(cli.find_subcommand(name).is_some(), "{name}");
            assert_eq!(CommandKind::from_name(name), Some(*kind));
            assert_eq!(kind.name(), *name);
        }
        assert!(cli.find_subcommand("help").is_some());
    }

    #[test]
    fn lookup_accepts_underscores() {
        assert_eq!(
            CommandKind::from_name("list_account_switch_keys"),
            Some(CommandKind::ListAccountSwitchKeys)
        );
        assert_eq!(CommandKind::from_name("delete-client"), None);
    }

    #[test]
    fn parses_command_with_common_options() {
        let cli = Cli::try_parse_from([
            "akamai-iam",
            "get-credential",
            "--open-identity-id",
            "oid",
            "--credential-id",
            "1234",
            "--actions",
            "--edgerc",
            "/tmp/edgerc",
            "--section",
            "default",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.command.kind(), Some(CommandKind::GetCredential));
        let common = cli.command.common().unwrap();
        assert_eq!(common.edgerc, Some(PathBuf::from("/tmp/edgerc")));
        assert_eq!(common.section, "default");
        assert!(common.debug);
        match cli.command {
            | CliCommand::GetCredential(c) => {
                assert_eq!(c.open_identity_id, "oid");
                assert_eq!(c.credential_id, "1234");
                assert!(c.actions);
            }
            | other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn required_ids_are_enforced() {
        assert!(Cli::try_parse_from(["akamai-iam", "list-credentials"]).is_err());
        assert!(Cli::try_parse_from([
            "akamai-iam",
            "list-credentials",
            "--open-identity-id",
            "",
        ])
        .is_err());
        // get-client has no required arguments.
        assert!(Cli::try_parse_from(["akamai-iam", "get-client"]).is_ok());
    }

    #[test]
    fn help_takes_an_optional_command() {
        let cli =
            Cli::try_parse_from(["akamai-iam", "help", "list-credentials"])
                .unwrap();
        assert!(matches!(
            cli.command,
            CliCommand::Help { command: Some(ref c) } if c == "list-credentials"
        ));
        assert!(cli.command.kind().is_none());
    }

    #[test]
    fn program_name_under_akamai_cli() {
        assert_eq!(
            resolve_program_name(true, Some("/usr/local/bin/akamai-iam".into())),
            "akamai iam"
        );
        assert_eq!(
            resolve_program_name(false, Some("/usr/local/bin/akamai-iam".into())),
            "akamai-iam"
        );
        assert_eq!(resolve_program_name(false, None), BIN_NAME);
    }

    #[test]
    fn help_for_a_command() {
        let mut help = help_command(Some("list_credentials"), "akamai iam");
        assert_eq!(help.get_name(), "list-credentials");
        let text = help.render_help().to_string();
        assert!(text.contains("akamai iam list-credentials"), "{text}");
        assert!(text.contains("--open-identity-id"));
        assert!(text.contains("--actions"));
        assert!(!text.contains("--credential-id"));
    }

    #[test]
    fn help_for_an_unknown_command_is_the_top_level_help() {
        for command in [None, Some("delete-client")] {
            let mut help = help_command(command, "akamai iam");
            assert_eq!(help.get_bin_name(), Some("akamai iam help [command]"));
            let text = help.render_help().to_string();
            for (name, _) in COMMANDS {
                assert!(text.contains(name), "{name} missing from {text}");
            }
        }
    }
}
