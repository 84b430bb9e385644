//! HTTP implementation of the Automatisch capability interface

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde_json::{json, Value};

use crate::client::AutomatischBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::model::{
    AppQuery, ConnectionQuery, ExecutionQuery, NewConnection, NewWorkflow, WorkflowPatch,
    WorkflowQuery, WorkflowStatus,
};
use crate::operation::BackendOperation;

/// Path prefix of the REST API
const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Number of executions returned by the recent executions overview
pub const RECENT_EXECUTIONS_LIMIT: u32 = 10;

type QueryParams = Vec<(&'static str, String)>;

/// Automatisch client backed by reqwest
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: Url,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("automatisch-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let api_key = config
            .is_authenticated()
            .then(|| config.api_key.trim().to_string());

        Ok(Self { base_url, api_key, http })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(API_PREFIX);
            path.extend(segments);
        }
        Ok(url)
    }

    async fn execute(
        &self,
        operation: BackendOperation,
        method: Method,
        url: Url,
        query: QueryParams,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        tracing::debug!(operation = %operation, method = %method, path = url.path(), "Sending Automatisch request");

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&bytes).unwrap_or_else(|| reason(status));
            tracing::debug!(operation = %operation, status = status.as_u16(), "Automatisch request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&bytes)
    }
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}

#[async_trait]
impl AutomatischBackend for HttpBackend {
    async fn list_workflows(&self, query: WorkflowQuery) -> ClientResult<Value> {
        let url = self.endpoint(&["flows"])?;
        self.execute(BackendOperation::ListWorkflows, Method::GET, url, workflow_params(&query), None)
            .await
    }

    async fn get_workflow(&self, workflow_id: &str) -> ClientResult<Value> {
        let url = self.endpoint(&["flows", workflow_id])?;
        match self
            .execute(BackendOperation::GetWorkflow, Method::GET, url, Vec::new(), None)
            .await
        {
            Err(ClientError::Api { status: 404, .. }) => Ok(Value::Null),
            other => other,
        }
    }

    async fn create_workflow(&self, workflow: NewWorkflow) -> ClientResult<Value> {
        let url = self.endpoint(&["flows"])?;
        let body = serde_json::to_value(&workflow)?;
        self.execute(BackendOperation::CreateWorkflow, Method::POST, url, Vec::new(), Some(body))
            .await
    }

    async fn update_workflow(&self, workflow_id: &str, changes: WorkflowPatch) -> ClientResult<Value> {
        let url = self.endpoint(&["flows", workflow_id])?;
        self.execute(
            BackendOperation::UpdateWorkflow,
            Method::PATCH,
            url,
            Vec::new(),
            Some(Value::Object(changes)),
        )
        .await
    }

    async fn delete_workflow(&self, workflow_id: &str) -> ClientResult<Value> {
        let url = self.endpoint(&["flows", workflow_id])?;
        self.execute(BackendOperation::DeleteWorkflow, Method::DELETE, url, Vec::new(), None)
            .await
    }

    async fn list_connections(&self, query: ConnectionQuery) -> ClientResult<Value> {
        let url = self.endpoint(&["connections"])?;
        let mut params = QueryParams::new();
        if let Some(app_key) = query.app_key {
            params.push(("appKey", app_key));
        }
        self.execute(BackendOperation::ListConnections, Method::GET, url, params, None)
            .await
    }

    async fn create_connection(&self, connection: NewConnection) -> ClientResult<Value> {
        let url = self.endpoint(&["connections"])?;
        let body = serde_json::to_value(&connection)?;
        self.execute(BackendOperation::CreateConnection, Method::POST, url, Vec::new(), Some(body))
            .await
    }

    async fn list_executions(&self, query: ExecutionQuery) -> ClientResult<Value> {
        let url = self.endpoint(&["executions"])?;
        self.execute(BackendOperation::ListExecutions, Method::GET, url, execution_params(&query), None)
            .await
    }

    async fn available_apps(&self, query: AppQuery) -> ClientResult<Value> {
        let url = self.endpoint(&["apps"])?;
        let mut params = QueryParams::new();
        if let Some(category) = query.category {
            params.push(("category", category));
        }
        self.execute(BackendOperation::ListApps, Method::GET, url, params, None)
            .await
    }

    async fn test_workflow(&self, workflow_id: &str, test_data: Value) -> ClientResult<Value> {
        let url = self.endpoint(&["flows", workflow_id, "test"])?;
        self.execute(BackendOperation::TestWorkflow, Method::POST, url, Vec::new(), Some(test_data))
            .await
    }

    async fn workflows_overview(&self) -> ClientResult<Value> {
        let url = self.endpoint(&["flows"])?;
        let workflows = self
            .execute(BackendOperation::WorkflowsOverview, Method::GET, url, Vec::new(), None)
            .await?;
        Ok(summarize_workflows(&workflows))
    }

    async fn connections_overview(&self) -> ClientResult<Value> {
        let url = self.endpoint(&["connections"])?;
        let connections = self
            .execute(BackendOperation::ConnectionsOverview, Method::GET, url, Vec::new(), None)
            .await?;
        Ok(summarize_connections(&connections))
    }

    async fn recent_executions(&self) -> ClientResult<Value> {
        let url = self.endpoint(&["executions"])?;
        let query = ExecutionQuery {
            limit: Some(RECENT_EXECUTIONS_LIMIT),
            ..ExecutionQuery::default()
        };
        self.execute(BackendOperation::RecentExecutions, Method::GET, url, execution_params(&query), None)
            .await
    }
}

fn workflow_params(query: &WorkflowQuery) -> QueryParams {
    let mut params = QueryParams::new();
    // `all` is the absence of a filter
    if let Some(status) = query.status.filter(|s| *s != WorkflowStatus::All) {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

fn execution_params(query: &ExecutionQuery) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(workflow_id) = &query.workflow_id {
        params.push(("flowId", workflow_id.clone()));
    }
    if let Some(status) = query.status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Decode a success body, unwrapping the `{ "data": ..., "meta": ... }` envelope
fn decode_body(bytes: &[u8]) -> ClientResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let mut value: Value = serde_json::from_slice(bytes)?;
    let is_envelope = value.as_object().is_some_and(|object| {
        object.contains_key("data") && object.keys().all(|key| key == "data" || key == "meta")
    });
    if is_envelope {
        value = value
            .as_object_mut()
            .and_then(|object| object.remove("data"))
            .unwrap_or(Value::Null);
    }
    Ok(value)
}

/// Pull a human-readable message out of an error body
fn error_message(bytes: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(bytes).ok()?;

    fn text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(object) => object.get("message").and_then(text),
            _ => None,
        }
    }

    body.get("error")
        .and_then(text)
        .or_else(|| body.get("message").and_then(text))
        .or_else(|| {
            body.get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .and_then(text)
        })
}

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

pub(crate) fn summarize_workflows(workflows: &Value) -> Value {
    let workflows = items(workflows);
    let is_active = |w: &Value| w.get("active").and_then(Value::as_bool).unwrap_or(false);
    let active = workflows.iter().filter(|w| is_active(w)).count();

    let summaries: Vec<Value> = workflows
        .iter()
        .map(|w| {
            json!({
                "id": w.get("id").cloned().unwrap_or(Value::Null),
                "name": w.get("name").cloned().unwrap_or(Value::Null),
                "active": is_active(w),
            })
        })
        .collect();

    json!({
        "total": workflows.len(),
        "active": active,
        "inactive": workflows.len() - active,
        "workflows": summaries,
    })
}

pub(crate) fn summarize_connections(connections: &Value) -> Value {
    let connections = items(connections);
    let mut by_app: BTreeMap<String, usize> = BTreeMap::new();
    for connection in connections {
        let app = connection
            .get("appKey")
            .or_else(|| connection.get("key"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        *by_app.entry(app.to_string()).or_default() += 1;
    }

    json!({
        "total": connections.len(),
        "byApp": by_app,
        "connections": connections,
    })
}
