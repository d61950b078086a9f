//! `search`: grep through the shell with every argument quoted.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, shell_quote, Tool};
use crate::context::ServiceContext;

/// Flags used when the caller gives none.
pub const DEFAULT_FLAGS: &str = "-n";

/// Builds the grep command line.
///
/// Flags are split on whitespace and each one is quoted on its own, so
/// `"-n -i"` still works but a flags string cannot smuggle in shell syntax.
#[must_use]
pub fn search_command(pattern: &str, filepath: &str, flags: &str) -> String {
    let mut parts = vec!["grep".to_string()];
    parts.extend(flags.split_whitespace().map(shell_quote));
    parts.push("--".to_string());
    parts.push(shell_quote(pattern));
    parts.push(shell_quote(filepath));
    parts.join(" ")
}

/// Searches `filepath` for `pattern`. Flags: `-n` line numbers, `-i` ignore
/// case, `-r` recursive.
pub fn search(ctx: &ServiceContext, pattern: &str, filepath: &str, flags: &str) -> String {
    ctx.run(&search_command(pattern, filepath, flags)).to_string()
}

fn default_flags() -> String {
    DEFAULT_FLAGS.to_string()
}

#[derive(Debug, Deserialize)]
struct SearchInput {
    pattern: String,
    filepath: String,
    #[serde(default = "default_flags")]
    flags: String,
}

/// Tool wrapper for [`search`].
pub struct SearchTool;

impl Tool for SearchTool {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Searches for a pattern in a file or directory with grep. \
         Flags: -n (line numbers), -i (ignore case), -r (recursive)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": { "type": "string", "description": "Regular expression to search for" },
                "filepath": { "type": "string", "description": "File or directory to search" },
                "flags": { "type": "string", "description": "grep flags. Default: -n" }
            },
            "required": ["pattern", "filepath"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<SearchInput>(self.name(), input) {
            Ok(input) => search(ctx, &input.pattern, &input.filepath, &input.flags),
            Err(err) => err,
        }
    }
}
