//! MCP Tool registry
//!
//! These are the tools exposed to agents through the MCP protocol. The
//! registry is fixed at compile time and never changes while the server runs.

pub mod apps;
pub mod connections;
pub mod executions;
pub mod workflows;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description shown to the agent
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Fields listed under `required` in the input schema
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Get all Automatisch tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        workflows::list_workflows_tool(),
        workflows::get_workflow_tool(),
        workflows::create_workflow_tool(),
        workflows::update_workflow_tool(),
        workflows::delete_workflow_tool(),
        connections::list_connections_tool(),
        connections::create_connection_tool(),
        executions::list_executions_tool(),
        apps::get_available_apps_tool(),
        workflows::test_workflow_tool(),
    ]
}

/// Look up a tool definition by name
pub fn find_tool(name: &str) -> Option<ToolDefinition> {
    get_tool_definitions().into_iter().find(|t| t.name == name)
}

/// Tool call request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// Tool call response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    pub content: Vec<ContentBlock>,
}

impl CallResult {
    /// Render a backend document as a single JSON text block
    pub fn json(value: &Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content: vec![ContentBlock::Text {
                text: serde_json::to_string_pretty(value)?,
            }],
        })
    }
}

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Text { text } => text,
        }
    }
}
