//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::tools::EditMode;

/// Top-level CLI parser for `shellrelay`.
#[derive(Debug, Parser)]
#[command(name = "shellrelay", version, about = "Run shell and file tools the way an agent sees them")]
pub struct Cli {
    /// Directory commands run in and relative paths resolve against.
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Kill commands that run longer than this many milliseconds (0 disables).
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Do not echo streamed stdout lines.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a shell command, streaming its output.
    Exec {
        /// Command line; multiple words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Search a file or directory with grep.
    Search {
        /// Pattern to search for.
        #[arg(allow_hyphen_values = true)]
        pattern: String,
        /// File or directory to search.
        path: String,
        /// grep flags.
        #[arg(long, default_value = crate::tools::search::DEFAULT_FLAGS, allow_hyphen_values = true)]
        flags: String,
    },
    /// Replace every occurrence of FIND with REPLACE in a file.
    Edit {
        /// Text to find.
        #[arg(allow_hyphen_values = true)]
        find: String,
        /// Replacement text.
        #[arg(allow_hyphen_values = true)]
        replace: String,
        /// File to edit.
        path: String,
        /// Replacement strategy.
        #[arg(long, value_enum, default_value_t = EditMode::Literal)]
        mode: EditMode,
    },
    /// Print a file.
    Read {
        /// File to read.
        path: String,
    },
    /// Write a file from --content or standard input.
    Write {
        /// File to write.
        path: String,
        /// Content to write; standard input is used when omitted.
        #[arg(long, allow_hyphen_values = true)]
        content: Option<String>,
    },
    /// List files matching a glob pattern.
    Glob {
        /// Glob pattern.
        pattern: String,
    },
    /// Print the tool descriptors as JSON.
    Tools,
    /// Call a tool by name with a JSON argument object.
    Call {
        /// Tool name.
        tool: String,
        /// JSON argument object.
        #[arg(default_value = "{}")]
        args: String,
    },
}
