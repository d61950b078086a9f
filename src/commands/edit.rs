//! `shellrelay edit` command.

use crate::context::ServiceContext;
use crate::tools::{self, EditMode};

/// Execute the `edit` command.
pub fn run(ctx: &ServiceContext, find: &str, replace: &str, path: &str, mode: EditMode) -> String {
    tools::edit(ctx, find, replace, path, mode)
}
