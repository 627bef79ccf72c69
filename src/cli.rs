//! CLI definitions for failprompt
//!
//! Kept apart from main.rs so the command tree can be inspected in tests
//! and reused for completion generation.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles for help output.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "failprompt")]
#[command(about = "Parse CI failure logs and generate ready-to-paste AI prompts")]
#[command(long_about = "failprompt - turn a failed GitHub Actions run into an AI prompt.

failprompt fetches the failed-step log of a run through the GitHub CLI (gh),
locates the error, cuts a focused excerpt around it and renders a Markdown
prompt with the repository, branch, failing step and nearby source lines.

QUICK START:
    failprompt                     Latest failed run on the current branch
    failprompt -r 123456           A specific run
    failprompt -l build.log        A log saved to disk (use - for stdin)
    failprompt --format json       The extracted error as JSON")]
#[command(version)]
#[command(styles = build_cli_styles())]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for the default prompt-generation command.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// GitHub Actions run ID (default: latest failed run on the current branch)
    #[arg(short = 'r', long = "run", value_name = "ID")]
    pub run_id: Option<String>,

    /// Repository in owner/repo format (default: git remote origin)
    #[arg(short = 'R', long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Read the log from a file instead of gh (- for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip the source context block
    #[arg(long)]
    pub no_context: bool,

    /// Strip "<job>\t<step>\t" prefixes from downloaded log lines
    #[arg(long)]
    pub strip_prefix: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Prompt)]
    pub format: OutputFormat,

    /// Print debug info to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the run command writes.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown prompt
    #[default]
    Prompt,
    /// Extracted error as pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate a shell completion script on stdout.

EXAMPLES:
    failprompt completions bash > ~/.local/share/bash-completion/completions/failprompt
    failprompt completions zsh > ~/.zfunc/_failprompt")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}
