//! `shellrelay exec` command.

use crate::context::ServiceContext;
use crate::tools;

/// Execute the `exec` command.
pub fn run(ctx: &ServiceContext, command: &str) -> String {
    tools::execute(ctx, command)
}
