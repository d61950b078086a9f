//! `execute`: run a raw shell command.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::context::ServiceContext;

/// Runs `command` in the context's working directory.
pub fn execute(ctx: &ServiceContext, command: &str) -> String {
    ctx.run(command).to_string()
}

#[derive(Debug, Deserialize)]
struct ExecuteInput {
    command: String,
}

/// Tool wrapper for [`execute`].
pub struct ExecuteTool;

impl Tool for ExecuteTool {
    fn name(&self) -> &'static str {
        "execute"
    }

    fn description(&self) -> &'static str {
        "Executes a raw shell command. Output streams live; the result starts with STDOUT:, \
         STDERR: (nonzero exit, followed by PARTIAL STDOUT:) or EXECUTION ERROR:."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<ExecuteInput>(self.name(), input) {
            Ok(input) => execute(ctx, &input.command),
            Err(err) => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn execute_uses_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("here.txt"), "").unwrap();
        let settings =
            Settings { working_dir: dir.path().to_path_buf(), quiet: true, ..Settings::default() };

        let result = execute(&ServiceContext::live(&settings), "ls");

        assert_eq!(result, "STDOUT:\nhere.txt\n");
    }
}
