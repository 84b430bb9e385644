//! App connection tools

use serde_json::json;

use super::ToolDefinition;

pub const LIST_CONNECTIONS: &str = "list_connections";
pub const CREATE_CONNECTION: &str = "create_connection";

/// list_connections tool definition
pub fn list_connections_tool() -> ToolDefinition {
    ToolDefinition {
        name: LIST_CONNECTIONS.to_string(),
        description: "List all app connections".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "appKey": {
                    "type": "string",
                    "description": "Filter by specific app"
                }
            }
        }),
    }
}

/// create_connection tool definition
pub fn create_connection_tool() -> ToolDefinition {
    ToolDefinition {
        name: CREATE_CONNECTION.to_string(),
        description: "Create a new app connection".to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["appKey", "name", "credentials"],
            "properties": {
                "appKey": {
                    "type": "string",
                    "description": "App identifier (e.g., 'slack', 'github')"
                },
                "name": {
                    "type": "string",
                    "description": "Connection name"
                },
                "credentials": {
                    "type": "object",
                    "description": "App-specific credentials and configuration"
                }
            }
        }),
    }
}
