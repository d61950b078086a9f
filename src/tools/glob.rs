//! `glob`: list files matching a pattern.

use std::path::Path;

use ::glob::Pattern;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::context::ServiceContext;

/// Expands `pattern` relative to the working directory, one match per line.
pub fn glob_files(ctx: &ServiceContext, pattern: &str) -> String {
    match ctx.fs.glob(&anchor(ctx, pattern)) {
        Ok(matches) if matches.is_empty() => format!("No files matched {pattern}"),
        Ok(matches) => matches.join("\n"),
        Err(e) => format!("Error: {e}"),
    }
}

/// Joins `pattern` onto the working directory, whose own metacharacters
/// must match literally.
fn anchor(ctx: &ServiceContext, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() || ctx.working_dir == Path::new(".") {
        return pattern.to_string();
    }
    let dir = Pattern::escape(&ctx.working_dir.to_string_lossy());
    Path::new(&dir).join(pattern).to_string_lossy().into_owned()
}

#[derive(Debug, Deserialize)]
struct GlobInput {
    pattern: String,
}

/// Tool wrapper for [`glob_files`].
pub struct GlobTool;

impl Tool for GlobTool {
    fn name(&self) -> &'static str {
        "glob"
    }

    fn description(&self) -> &'static str {
        "Lists files matching a glob pattern such as `src/**/*.rs`."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": { "type": "string", "description": "Glob pattern" }
            },
            "required": ["pattern"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<GlobInput>(self.name(), input) {
            Ok(input) => glob_files(ctx, &input.pattern),
            Err(err) => err,
        }
    }
}
