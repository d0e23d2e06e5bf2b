//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::adapters::live::llm::Provider;

/// Top-level CLI parser for `playport`.
#[derive(Debug, Parser)]
#[command(name = "playport", version, about = "Migrate Selenium Java suites to Playwright TypeScript")]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Root of the Selenium project to migrate.
    #[arg(long, short, global = true, env = "INPUT_FOLDER")]
    pub input: Option<PathBuf>,
    /// Root of the generated project; defaults to `trans-<artifactId>` next to the input.
    #[arg(long, short, global = true, env = "OUTPUT_FOLDER")]
    pub output: Option<PathBuf>,
    /// Code-generation provider.
    #[arg(long, global = true, value_enum, default_value_t = Provider::OpenAi)]
    pub provider: Provider,
    /// Model name, overriding the configuration file.
    #[arg(long, global = true)]
    pub model: Option<String>,
    /// API key; falls back to the provider's environment variable.
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    /// YAML file overriding migration settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Serve generation responses from a recorded cassette.
    #[arg(long, global = true, value_name = "CASSETTE")]
    pub replay_llm: Option<PathBuf>,
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Supported top-level subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Write package.json, tsconfig.json and playwright.config.ts.
    Init,
    /// Convert page objects.
    Pages,
    /// Convert tests, importing the converted page objects.
    Tests,
    /// Init, then pages, then tests.
    All,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::adapters::live::llm::Provider;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_pages_subcommand() {
        let cli = Cli::parse_from(["playport", "pages", "--input", "/work/shop"]);
        assert_eq!(cli.command, Command::Pages);
        assert_eq!(cli.global.input, Some(PathBuf::from("/work/shop")));
        assert_eq!(cli.global.provider, Provider::OpenAi);
    }

    #[test]
    fn global_flags_accepted_before_subcommand() {
        let cli = Cli::parse_from([
            "playport",
            "--provider",
            "anthropic",
            "--model",
            "claude-sonnet-4-5",
            "-v",
            "all",
        ]);
        assert_eq!(cli.command, Command::All);
        assert_eq!(cli.global.provider, Provider::Anthropic);
        assert_eq!(cli.global.model.as_deref(), Some("claude-sonnet-4-5"));
        assert!(cli.global.verbose);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["playport", "--provider", "bard", "init"]).is_err());
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["playport"]).is_err());
    }
}
