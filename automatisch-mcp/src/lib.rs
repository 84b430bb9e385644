//! Automatisch MCP Server Library
//!
//! This crate implements a Model Context Protocol (MCP) server that exposes
//! an Automatisch instance to agents as tools and resources.
//!
//! ## Architecture
//!
//! ```text
//! Agent host (MCP client)
//!        │  JSON-RPC over stdio
//!        ▼
//! ┌──────────────────────┐
//! │      McpServer       │ ◄── one task per request, single writer
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │      Dispatcher      │
//! │                      │
//! │  ┌────────────────┐  │
//! │  │     Tools      │  │ - list/get/create/update/delete_workflow
//! │  │                │  │ - test_workflow
//! │  │                │  │ - list/create_connection(s)
//! │  │                │  │ - list_executions, get_available_apps
//! │  └────────────────┘  │
//! │  ┌────────────────┐  │
//! │  │   Resources    │  │ - automatisch://workflows
//! │  │                │  │ - automatisch://connections
//! │  │                │  │ - automatisch://apps
//! │  │                │  │ - automatisch://executions/recent
//! │  └────────────────┘  │
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │  automatisch-client  │
//! └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use automatisch_client::{ClientConfig, HttpBackend};
//! use automatisch_mcp::{Dispatcher, McpServer};
//!
//! let backend = HttpBackend::new(&ClientConfig::default())?;
//! let server = Arc::new(McpServer::new(Dispatcher::new(Arc::new(backend))));
//! server.run_stdio().await?;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod resources;
pub mod server;
pub mod tools;
pub mod validation;

pub use config::Cli;
pub use dispatch::{Arguments, BackendCall, Dispatcher};
pub use error::{DispatchError, DispatchResult, ErrorCode, ProtocolError, ServerError, ServerResult};
pub use resources::{ReadResult, ResourceContent, ResourceDefinition};
pub use server::{McpRequest, McpResponse, McpServer};
pub use tools::{CallResult, ContentBlock, ToolDefinition};

/// Server metadata for MCP protocol
pub const SERVER_NAME: &str = "automatisch-mcp-server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";
