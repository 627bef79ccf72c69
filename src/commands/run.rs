//! Default command: fetch a failed log, extract the error, emit a prompt

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

use failprompt::prompt::{build_prompt, PromptOptions};
use failprompt::{git, Config, ExtractedError, Extractor, FileLogSource, GhLogSource, LogSource};

use crate::cli::{OutputFormat, RunArgs};

/// Shown after the prompt goes to stdout.
const CLIPBOARD_TIP: &str =
    "\n# Tip: pipe to pbcopy (macOS) / xclip -sel clip (Linux) / clip (Windows)";

/// Handle the default command.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &RunArgs) -> Result<()> {
    let config = apply_overrides(Config::load()?, args);

    let repo = args.repo.clone().unwrap_or_else(git::detect_repo);
    let branch = git::detect_branch();
    let run_label = args.run_id.as_deref().unwrap_or("latest");
    debug!(%repo, %branch, run = run_label, "resolved target");

    let source = log_source(args);
    debug!(source = %source.describe(), "fetching log");
    let raw_log = source.fetch()?;
    debug!(bytes = raw_log.len(), "fetched log");

    let error = Extractor::new(config.extract.clone()).extract(&raw_log);
    debug!(
        step = %error.step_name,
        errors = error.all_errors.len(),
        paths = ?error.file_paths,
        "extracted error"
    );
    if error.is_empty() {
        warn!("log contained no usable output");
    }

    let output = render(args.format, &config, &error, &repo, &branch, run_label)?;

    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            eprintln!("{}", written_message(args.format, path));
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", output)?;
            out.flush()?;
            eprintln!("{}", CLIPBOARD_TIP);
        }
    }
    Ok(())
}

/// Fold command-line flags into the loaded config. Flags only ever enable
/// their behavior, so an unset flag keeps the config value.
pub(crate) fn apply_overrides(mut config: Config, args: &RunArgs) -> Config {
    if args.strip_prefix {
        config.extract.strip_step_prefix = true;
    }
    if args.no_context {
        config.prompt.include_context = false;
    }
    config
}

fn log_source(args: &RunArgs) -> Box<dyn LogSource> {
    match &args.log {
        Some(path) => Box::new(FileLogSource::new(path.clone())),
        None => Box::new(GhLogSource::new(args.run_id.clone(), args.repo.clone())),
    }
}

/// Render the extraction in the requested format.
pub(crate) fn render(
    format: OutputFormat,
    config: &Config,
    error: &ExtractedError,
    repo: &str,
    branch: &str,
    run_id: &str,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(error).context("Failed to serialize extracted error")
        }
        OutputFormat::Prompt => {
            let mut options = PromptOptions::new(repo, branch, run_id, error);
            options.include_context = config.prompt.include_context;
            options.context = config.prompt.file_context_options();
            Ok(build_prompt(&options))
        }
    }
}

/// Confirmation printed after writing to `--output`.
pub(crate) fn written_message(format: OutputFormat, path: &Path) -> String {
    let what = match format {
        OutputFormat::Prompt => "Prompt",
        OutputFormat::Json => "JSON",
    };
    format!("✓ {} written to {}", what, path.display())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
