//! Agent-callable tools built on the runner and the filesystem port.
//!
//! Every tool takes strings and returns a single string, so an agent that
//! can only read text always gets something it can reason over. Each tool is
//! also exposed through [`ToolRegistry`] with a name, a description and a
//! JSON-Schema parameter object for registration with an agent loop.

pub mod edit;
pub mod execute;
pub mod glob;
pub mod read;
pub mod search;
pub mod write;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::context::ServiceContext;

pub use edit::{edit, EditMode};
pub use execute::execute;
pub use glob::glob_files;
pub use read::read;
pub use search::search;
pub use write::write;

/// A tool an agent can call by name.
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &'static str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &'static str;

    /// JSON Schema describing the argument object.
    fn input_schema(&self) -> Value;

    /// Runs the tool. Failures are reported inside the returned text.
    fn call(&self, ctx: &ServiceContext, input: Value) -> String;
}

/// Serializable description of a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON Schema of the argument object.
    pub parameters: Value,
}

/// Named collection of tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in tool.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(execute::ExecuteTool));
        registry.register(Box::new(search::SearchTool));
        registry.register(Box::new(edit::EditTool));
        registry.register(Box::new(read::ReadTool));
        registry.register(Box::new(write::WriteTool));
        registry.register(Box::new(glob::GlobTool));
        registry
    }

    /// Adds a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    /// Looks a tool up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(AsRef::as_ref)
    }

    /// Tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Descriptors for every registered tool, in registration order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name(),
                description: t.description(),
                parameters: t.input_schema(),
            })
            .collect()
    }

    /// Calls the tool named `name` with a JSON argument object.
    pub fn call(&self, ctx: &ServiceContext, name: &str, input: Value) -> String {
        match self.get(name) {
            Some(tool) => {
                debug!(tool = name, "calling tool");
                tool.call(ctx, input)
            }
            None => format!("Error: unknown tool `{name}`. Available: {}", self.names().join(", ")),
        }
    }
}

/// Single-quotes `value` for POSIX shells, escaping embedded single quotes.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Deserializes a tool's argument object, phrasing failures for the model.
pub(crate) fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, String> {
    serde_json::from_value(input).map_err(|e| format!("Error: invalid input for `{tool}`: {e}"))
}
