//! `shellrelay tools` and `shellrelay call` commands.

use serde_json::Value;

use crate::context::ServiceContext;
use crate::tools::ToolRegistry;

/// Execute the `tools` command: the descriptors as pretty JSON.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn list() -> Result<String, String> {
    serde_json::to_string_pretty(&ToolRegistry::builtin().descriptors())
        .map_err(|e| format!("Failed to serialize tool descriptors: {e}"))
}

/// Execute the `call` command.
///
/// # Errors
///
/// Returns an error string if `args` is not a JSON object.
pub fn call(ctx: &ServiceContext, tool: &str, args: &str) -> Result<String, String> {
    let input: Value =
        serde_json::from_str(args).map_err(|e| format!("Invalid JSON arguments: {e}"))?;
    if !input.is_object() {
        return Err(format!("Tool arguments must be a JSON object, got: {args}"));
    }
    Ok(ToolRegistry::builtin().call(ctx, tool, input))
}
