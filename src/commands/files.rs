//! `shellrelay read`, `write` and `glob` commands.

use std::io::Read;

use crate::context::ServiceContext;
use crate::tools;

/// Execute the `read` command.
pub fn read(ctx: &ServiceContext, path: &str) -> String {
    tools::read(ctx, path)
}

/// Execute the `write` command, taking content from standard input when
/// `content` is `None`.
///
/// # Errors
///
/// Returns an error string if standard input cannot be read.
pub fn write(ctx: &ServiceContext, path: &str, content: Option<&str>) -> Result<String, String> {
    let content = match content {
        Some(content) => content.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read content from stdin: {e}"))?;
            buf
        }
    };
    Ok(tools::write(ctx, &content, path))
}

/// Execute the `glob` command.
pub fn glob(ctx: &ServiceContext, pattern: &str) -> String {
    tools::glob_files(ctx, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn write_then_read_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live(&Settings {
            working_dir: dir.path().to_path_buf(),
            quiet: true,
            ..Settings::default()
        });

        assert_eq!(write(&ctx, "note.md", Some("# hi\n")).unwrap(), "Successfully wrote to note.md");
        assert_eq!(read(&ctx, "note.md"), "# hi\n");
        assert_eq!(glob(&ctx, "*.md"), dir.path().join("note.md").display().to_string());
    }
}
