//! MCP Resource registry
//!
//! Resources are read-only JSON documents that agents can read through the
//! MCP protocol. Each one is backed by an overview operation of the API.

use serde::{Deserialize, Serialize};

/// Media type of every resource
pub const JSON_MIME_TYPE: &str = "application/json";

pub const WORKFLOWS_URI: &str = "automatisch://workflows";
pub const CONNECTIONS_URI: &str = "automatisch://connections";
pub const APPS_URI: &str = "automatisch://apps";
pub const RECENT_EXECUTIONS_URI: &str = "automatisch://executions/recent";

/// Resource definition for MCP protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource URI
    pub uri: String,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// MIME type of the resource
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl ResourceDefinition {
    fn json(uri: &str, name: &str, description: &str) -> Self {
        Self {
            uri: uri.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
        }
    }
}

/// Get all Automatisch resource definitions
pub fn get_resource_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition::json(
            WORKFLOWS_URI,
            "Workflows Overview",
            "Overview of all workflows and their status",
        ),
        ResourceDefinition::json(
            CONNECTIONS_URI,
            "App Connections",
            "List of configured app connections",
        ),
        ResourceDefinition::json(
            APPS_URI,
            "Available Apps",
            "Catalog of available apps and integrations",
        ),
        ResourceDefinition::json(
            RECENT_EXECUTIONS_URI,
            "Recent Executions",
            "Recent workflow executions and their results",
        ),
    ]
}

/// Resource read request
#[derive(Debug, Clone, Deserialize)]
pub struct ReadRequest {
    pub uri: String,
}

/// Resource read response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResult {
    pub contents: Vec<ResourceContent>,
}

/// Content of one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}
