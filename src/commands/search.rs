//! `shellrelay search` command.

use crate::context::ServiceContext;
use crate::tools;

/// Execute the `search` command.
pub fn run(ctx: &ServiceContext, pattern: &str, path: &str, flags: &str) -> String {
    tools::search(ctx, pattern, path, flags)
}
