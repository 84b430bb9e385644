//! App catalog tools

use serde_json::json;

use super::ToolDefinition;

pub const GET_AVAILABLE_APPS: &str = "get_available_apps";

/// get_available_apps tool definition
pub fn get_available_apps_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_AVAILABLE_APPS.to_string(),
        description: "Get list of available apps and their capabilities".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Filter by app category"
                }
            }
        }),
    }
}
