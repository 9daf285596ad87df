use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use strongbox_core::VERSION;

/// Strongbox - a local, file-based password manager
///
/// Each password is stored in its own encrypted file. The first passphrase
/// used with a password directory becomes the only one it accepts.
#[derive(Parser)]
#[command(name = "strongbox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Password directory
    #[arg(short, long, global = true, env = "STRONGBOX_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// scrypt work factor (log2 N) for newly written files
    #[arg(long, global = true, env = "STRONGBOX_WORK_FACTOR", value_name = "N")]
    pub work_factor: Option<u8>,

    /// Log level when STRONGBOX_LOG is unset
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Default password length written to the config
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `create` command
#[derive(Args)]
pub struct CreateArgs {
    /// Entry name (for example the account or site)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Password length
    #[arg(short, long, value_name = "N")]
    pub length: Option<usize>,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Entry name
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and bind the password directory to a passphrase
    Init(InitArgs),

    /// Generate and store a new password, replacing any existing entry
    Create(CreateArgs),

    /// Print a stored password
    #[command(alias = "read")]
    Get(GetArgs),

    /// List stored entries
    #[command(alias = "show")]
    List(ListArgs),

    /// Re-encrypt every stored password under a new passphrase
    Rotate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_alias_parses_as_get() {
        let cli = Cli::try_parse_from(["strongbox", "read", "mail"]).unwrap();
        assert!(matches!(cli.command, Commands::Get(GetArgs { ref name }) if name == "mail"));
    }

    #[test]
    fn test_create_length_flag() {
        let cli = Cli::try_parse_from(["strongbox", "create", "mail", "--length", "16"]).unwrap();
        match cli.command {
            Commands::Create(args) => assert_eq!(args.length, Some(16)),
            _ => panic!("expected create"),
        }
    }
}
