//! Tool argument validation
//!
//! Runs before any backend call: required fields first (so the error can
//! name the missing field), then the full input schema. Schemas are compiled
//! once, on first use, and shared by every request.

use std::collections::HashMap;
use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde_json::{Map, Value};

use crate::error::{DispatchError, DispatchResult};
use crate::tools::get_tool_definitions;

/// A tool's required fields and compiled input schema
struct CompiledTool {
    required: Vec<String>,
    schema: Option<JSONSchema>,
}

static COMPILED_TOOLS: OnceLock<HashMap<String, CompiledTool>> = OnceLock::new();

fn compiled_tools() -> &'static HashMap<String, CompiledTool> {
    COMPILED_TOOLS.get_or_init(|| {
        get_tool_definitions()
            .into_iter()
            .map(|tool| {
                let schema = JSONSchema::compile(&tool.input_schema)
                    .inspect_err(|e| {
                        tracing::error!(tool = %tool.name, error = %e, "Input schema does not compile; skipping schema check");
                    })
                    .ok();
                let required = tool.required_fields().into_iter().map(String::from).collect();
                (tool.name, CompiledTool { required, schema })
            })
            .collect()
    })
}

/// Check arguments against the named tool's input schema
pub fn validate_arguments(tool: &str, arguments: &Map<String, Value>) -> DispatchResult<()> {
    let compiled = compiled_tools()
        .get(tool)
        .ok_or_else(|| DispatchError::UnknownTool(tool.to_string()))?;

    if let Some(field) = compiled
        .required
        .iter()
        .find(|field| arguments.get(field.as_str()).map_or(true, Value::is_null))
    {
        return Err(DispatchError::missing(field));
    }

    let Some(schema) = &compiled.schema else {
        return Ok(());
    };

    let instance = Value::Object(arguments.clone());
    let result = schema.validate(&instance);
    if let Err(errors) = result {
        let mut field = None;
        let mut messages = Vec::new();
        for error in errors {
            let path = error.instance_path.to_string();
            if field.is_none() {
                field = path
                    .trim_start_matches('/')
                    .split('/')
                    .next()
                    .filter(|segment| !segment.is_empty())
                    .map(ToString::to_string);
            }
            messages.push(if path.is_empty() {
                error.to_string()
            } else {
                format!("{}: {}", path, error)
            });
        }
        return Err(DispatchError::invalid(field.as_deref(), messages.join("; ")));
    }

    Ok(())
}
