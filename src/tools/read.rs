//! `read`: return a file's contents.

use std::io;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::context::ServiceContext;

/// Reads `filepath`, relative to the context's working directory.
pub fn read(ctx: &ServiceContext, filepath: &str) -> String {
    match ctx.fs.read_to_string(&ctx.resolve(filepath)) {
        Ok(content) => content,
        Err(e) if is_not_found(e.as_ref()) => "Error: File not found.".to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

fn is_not_found(err: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    err.downcast_ref::<io::Error>().is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

#[derive(Debug, Deserialize)]
struct ReadInput {
    filepath: String,
}

/// Tool wrapper for [`read`].
pub struct ReadTool;

impl Tool for ReadTool {
    fn name(&self) -> &'static str {
        "read"
    }

    fn description(&self) -> &'static str {
        "Reads a file and returns its contents."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filepath": { "type": "string", "description": "File to read" }
            },
            "required": ["filepath"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<ReadInput>(self.name(), input) {
            Ok(input) => read(ctx, &input.filepath),
            Err(err) => err,
        }
    }
}
