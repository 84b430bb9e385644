//! MCP Server protocol implementation
//!
//! This module handles the MCP JSON-RPC protocol over stdio. Each request
//! line is handled on its own task; responses are funneled to a single writer
//! so lines never interleave, and they may complete out of order.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use crate::dispatch::Dispatcher;
use crate::error::{ErrorCode, ProtocolError, ServerError, ServerResult};
use crate::resources::{ReadRequest, ResourceDefinition};
use crate::tools::{ToolCall, ToolDefinition};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

pub const JSONRPC_VERSION: &str = "2.0";

/// MCP JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `None` when absent; an explicit `null` is `Some(Value::Null)`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    /// Requests without an id expect no answer
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// MCP JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

impl McpResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
struct ToolsList {
    tools: Vec<ToolDefinition>,
}

#[derive(Debug, Serialize)]
struct ResourcesList {
    resources: Vec<ResourceDefinition>,
}

/// MCP server over a line-delimited JSON-RPC stream
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one raw input line
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable request line");
                return Some(McpResponse::failure(
                    Value::Null,
                    ProtocolError::new(ErrorCode::ParseError, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned();
        if !value.is_object() {
            return Some(McpResponse::failure(
                Value::Null,
                ProtocolError::new(ErrorCode::InvalidRequest, "Invalid request: expected an object"),
            ));
        }

        let request: McpRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(McpResponse::failure(
                    id.unwrap_or(Value::Null),
                    ProtocolError::new(ErrorCode::InvalidRequest, format!("Invalid request: {}", e)),
                ));
            }
        };

        if let Some(version) = request.jsonrpc.as_deref() {
            if version != JSONRPC_VERSION {
                return Some(McpResponse::failure(
                    request.id.unwrap_or(Value::Null),
                    ProtocolError::new(
                        ErrorCode::InvalidRequest,
                        format!("Unsupported jsonrpc version: {}", version),
                    ),
                ));
            }
        }

        self.handle_request(request).await
    }

    /// Handle a parsed request; notifications produce no response
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => encode(&ToolsList {
                tools: self.dispatcher.list_tools(),
            }),
            "tools/call" => self.handle_tools_call(request.params).await,
            "resources/list" => encode(&ResourcesList {
                resources: self.dispatcher.list_resources(),
            }),
            "resources/read" => self.handle_resources_read(request.params).await,
            other => Err(ProtocolError::new(
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::failure(id, error),
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            },
            "capabilities": {
                "tools": {},
                "resources": {}
            }
        })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, ProtocolError> {
        let call: ToolCall = decode_params(params)?;
        let result = self
            .dispatcher
            .dispatch_tool(&call.name, call.arguments.unwrap_or_default())
            .await?;
        encode(&result)
    }

    async fn handle_resources_read(&self, params: Value) -> Result<Value, ProtocolError> {
        let request: ReadRequest = decode_params(params)?;
        let result = self.dispatcher.read_resource(&request.uri).await?;
        encode(&result)
    }

    /// Serve requests from `reader`, writing responses to `writer`
    ///
    /// Returns once the input is exhausted and every in-flight request has
    /// been answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> ServerResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<McpResponse>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut in_flight = JoinSet::new();

        let read = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Reading requests failed");
                    break Err(ServerError::Io(e));
                }
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    tracing::debug!(error = %e, "Request line is not UTF-8");
                    let response = McpResponse::failure(
                        Value::Null,
                        ProtocolError::new(ErrorCode::ParseError, format!("Parse error: {}", e)),
                    );
                    if tx.send(response).is_err() {
                        tracing::warn!("Response writer closed; dropping response");
                    }
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let line = line.to_string();
            let server = Arc::clone(&self);
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    if tx.send(response).is_err() {
                        tracing::warn!("Response writer closed; dropping response");
                    }
                }
            });

            while let Some(joined) = in_flight.try_join_next() {
                report_join(joined);
            }
        };

        tracing::debug!(pending = in_flight.len(), "Input closed; draining requests");
        while let Some(joined) = in_flight.join_next().await {
            report_join(joined);
        }

        drop(tx);
        let written = writer_task
            .await
            .map_err(|e| ServerError::Io(std::io::Error::other(e)))?;
        read.and(written)
    }

    /// Serve on the process stdin/stdout
    pub async fn run_stdio(self: Arc<Self>) -> ServerResult<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<McpResponse>, mut writer: W) -> ServerResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

fn report_join(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Request task failed");
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(params)
        .map_err(|e| ProtocolError::new(ErrorCode::InvalidParams, format!("Invalid params: {}", e)))
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ProtocolError> {
    serde_json::to_value(value).map_err(|e| ProtocolError::new(ErrorCode::InternalError, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_id_is_notification() {
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(request.is_notification());
        assert_eq!(request.params, Value::Null);

        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#).unwrap();
        assert!(!request.is_notification());
    }

    #[test]
    fn test_null_id_is_still_a_request() {
        let request: McpRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(!request.is_notification());
        assert_eq!(request.id, Some(Value::Null));
    }

    #[test]
    fn test_success_omits_error() {
        let value = serde_json::to_value(McpResponse::success(json!(1), json!({}))).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
    }

    #[test]
    fn test_failure_carries_numeric_code() {
        let response = McpResponse::failure(
            Value::Null,
            ProtocolError::new(ErrorCode::ParseError, "Parse error: eof"),
        );
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], json!(-32700));
        assert!(value.get("result").is_none());
    }
}
