//! Automatisch Client - typed async access to the Automatisch REST API
//!
//! The client is the backend half of the MCP bridge. It knows nothing about
//! the protocol; it executes one of a fixed set of named operations against an
//! Automatisch instance and hands back the parsed JSON document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              AUTOMATISCH CLIENT             │
//! │                                             │
//! │   ┌─────────────────────────────────────┐   │
//! │   │   AutomatischBackend (trait)        │   │ ◄── consumed by the dispatcher
//! │   │   one method per operation          │   │
//! │   └──────────────────┬──────────────────┘   │
//! │                      │                      │
//! │   ┌──────────────────▼──────────────────┐   │
//! │   │   HttpBackend (reqwest)             │   │
//! │   │   /api/v1/flows, /connections, ...  │   │
//! │   └─────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use automatisch_client::{AutomatischBackend, ClientConfig, HttpBackend, WorkflowQuery};
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:3001")
//!     .api_key(std::env::var("AUTOMATISCH_API_KEY").unwrap_or_default())
//!     .build();
//!
//! let backend = HttpBackend::new(&config)?;
//! let workflows = backend.list_workflows(WorkflowQuery::default()).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod operation;

pub use client::AutomatischBackend;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use model::{
    AppQuery, ConnectionQuery, ExecutionQuery, ExecutionStatus, NewConnection, NewWorkflow,
    WorkflowPatch, WorkflowQuery, WorkflowStatus,
};
pub use operation::BackendOperation;
