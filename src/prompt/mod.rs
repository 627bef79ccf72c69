//! Markdown prompt rendering for an extracted CI failure.
//!
//! Layout:
//!
//! ```text
//! ## CI Failure — <repo> / <branch>
//! **Run:** <run id or "latest">
//! **Failing step:** <step name>
//!
//! ### Error
//! <excerpt in a code block>
//!
//! ### Source Context          (optional)
//! <±20 lines around the failing line>
//!
//! ### Task
//! ```

mod file_context;

pub use file_context::{
    default_context_radius, default_max_file_lines, read_file_context, FileContext,
    FileContextOptions,
};

use crate::extract::ExtractedError;

/// Placeholder used when the excerpt is empty.
const NO_OUTPUT: &str = "(no error output captured)";

/// Instruction closing every prompt.
const TASK: &str = "Fix the error above. Explain what caused it and provide the corrected code.";

/// Presentation fields and the extraction result to render.
#[derive(Debug, Clone)]
pub struct PromptOptions<'a> {
    pub repo: &'a str,
    pub branch: &'a str,
    pub run_id: &'a str,
    /// Add a Source Context block for the first extracted path
    pub include_context: bool,
    pub context: FileContextOptions,
    pub error: &'a ExtractedError,
}

impl<'a> PromptOptions<'a> {
    /// Options with default file context settings.
    pub fn new(repo: &'a str, branch: &'a str, run_id: &'a str, error: &'a ExtractedError) -> Self {
        Self {
            repo,
            branch,
            run_id,
            include_context: true,
            context: FileContextOptions::default(),
            error,
        }
    }

    /// Skip the Source Context block.
    pub fn without_context(mut self) -> Self {
        self.include_context = false;
        self
    }
}

/// Render the prompt.
pub fn build_prompt(options: &PromptOptions<'_>) -> String {
    let error = options.error;
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "## CI Failure — {} / {}",
        options.repo, options.branch
    ));
    parts.push(format!("**Run:** {}", options.run_id));
    parts.push(format!("**Failing step:** {}", error.step_name));
    parts.push(String::new());

    parts.push("### Error".to_string());
    parts.push("```".to_string());
    if error.is_empty() {
        parts.push(NO_OUTPUT.to_string());
    } else {
        parts.push(error.full_context.clone());
    }
    parts.push("```".to_string());
    parts.push(String::new());

    if let Some(ctx) = source_context(options) {
        parts.push("### Source Context".to_string());
        parts.push(format!("```{}", ctx.extension));
        parts.push(ctx.content);
        parts.push("```".to_string());
        parts.push(String::new());
    }

    parts.push("### Task".to_string());
    parts.push(TASK.to_string());

    parts.join("\n")
}

fn source_context(options: &PromptOptions<'_>) -> Option<FileContext> {
    if !options.include_context {
        return None;
    }
    let path = options.error.primary_path()?;
    read_file_context(path, &options.context)
}
