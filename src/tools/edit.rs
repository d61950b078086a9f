//! `edit`: replace text in a file.
//!
//! Two modes exist. `literal` (the default) reads the file, replaces every
//! occurrence as a plain string and writes it back; no shell is involved.
//! `sed` builds `sed -i 's/<find>/<replace>/g' <path>` for callers that rely
//! on sed regex semantics. In that mode only `/` is escaped in the find and
//! replace text: quotes and other shell or sed metacharacters pass through
//! and can change the meaning of the command, so it must not be fed
//! untrusted text.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{parse_input, shell_quote, Tool};
use crate::context::ServiceContext;
use crate::runner::Outcome;

/// How [`edit`] performs the replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Plain string replacement through the filesystem port.
    #[default]
    Literal,
    /// `sed -i` substitution through the shell.
    Sed,
}

/// Builds the sed substitution command.
#[must_use]
pub fn sed_command(find: &str, replace: &str, filepath: &str) -> String {
    format!(
        "sed -i 's/{}/{}/g' {}",
        find.replace('/', "\\/"),
        replace.replace('/', "\\/"),
        shell_quote(filepath)
    )
}

/// Replaces every occurrence of `find` with `replace` in `filepath`.
pub fn edit(ctx: &ServiceContext, find: &str, replace: &str, filepath: &str, mode: EditMode) -> String {
    match mode {
        EditMode::Literal => replace_literal(ctx, find, replace, filepath).to_string(),
        EditMode::Sed => ctx.run(&sed_command(find, replace, filepath)).to_string(),
    }
}

fn replace_literal(ctx: &ServiceContext, find: &str, replace: &str, filepath: &str) -> Outcome {
    if find.is_empty() {
        return Outcome::error("find text must not be empty");
    }
    let path = ctx.resolve(filepath);
    let content = match ctx.fs.read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return Outcome::error(format!("cannot read {}: {e}", path.display())),
    };

    let count = content.matches(find).count();
    if count > 0 {
        if let Err(e) = ctx.fs.write(&path, &content.replace(find, replace)) {
            return Outcome::error(format!("cannot write {}: {e}", path.display()));
        }
    }
    debug!(path = %path.display(), count, "literal edit");
    Outcome::Success { stdout: format!("replaced {count} occurrence(s) in {filepath}\n") }
}

#[derive(Debug, Deserialize)]
struct EditInput {
    find: String,
    replace: String,
    filepath: String,
    #[serde(default)]
    mode: EditMode,
}

/// Tool wrapper for [`edit`].
pub struct EditTool;

impl Tool for EditTool {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn description(&self) -> &'static str {
        "Replaces every occurrence of `find` with `replace` in a file. mode=literal (default) \
         matches plain text; mode=sed runs `sed -i s/find/replace/g` and treats find as a regex."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "find": { "type": "string", "description": "Text to find" },
                "replace": { "type": "string", "description": "Replacement text" },
                "filepath": { "type": "string", "description": "File to edit" },
                "mode": {
                    "type": "string",
                    "enum": ["literal", "sed"],
                    "description": "Replacement strategy. Default: literal"
                }
            },
            "required": ["find", "replace", "filepath"]
        })
    }

    fn call(&self, ctx: &ServiceContext, input: Value) -> String {
        match parse_input::<EditInput>(self.name(), input) {
            Ok(input) => edit(ctx, &input.find, &input.replace, &input.filepath, input.mode),
            Err(err) => err,
        }
    }
}
