//! `write`: overwrite a file with new content.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::context::ServiceContext;

/// Writes `content` to `filepath`, creating parent directories as needed.
pub fn write(ctx: &ServiceContext, content: &str, filepath: &str) -> String {
    match ctx.fs.write(&ctx.resolve(filepath), content) {
        Ok(()) => format!("Successfully wrote to {filepath}"),
        Err(e) => format!("Error writing file: {e}"),
    }
}

#[derive(Debug, Deserialize)]
struct WriteInput {
    content: String,
    filepath: String,
}

/// Tool wrapper for [`write`].
pub struct WriteTool;

impl Tool for WriteTool {
    fn name(&self) -> &'static str {
        "write"
    }

    fn description(&self) -> &'static str {
        "Writes content to a file, overwriting it if it exists."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "content": { "type": "string", "description": "Full file content" },
                "filepath": { "type": "string", "description": "File to write" }
            },
            "required": ["content", "filepath"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<WriteInput>(self.name(), input) {
            Ok(input) => write(ctx, &input.content, &input.filepath),
            Err(err) => err,
        }
    }
}
