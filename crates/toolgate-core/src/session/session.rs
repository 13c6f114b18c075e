//! Tool session over a subprocess MCP server
//!
//! One session wraps one provider subprocess, spawned with the rmcp
//! child-process transport and driven through the MCP handshake.

use std::sync::Arc;

use parking_lot::RwLock;
use rmcp::{
    RoleClient, ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent,
    },
    service::RunningService,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use crate::config::ProviderSpec;
use crate::logging::Logger;
use crate::types::{ToolDescriptor, ToolOutput};

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session was used before `initialize` or after `close`
    #[error("session '{0}' is not ready")]
    NotReady(String),

    #[error("spawn failed: {0}")]
    SpawnFailed(String),

    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    #[error("tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

enum SessionState {
    Idle,
    Ready(Arc<RunningService<RoleClient, ClientInfo>>),
    Closed,
}

/// Runtime handle for one tool provider
///
/// Calls are valid only between a successful `initialize` and `close`.
/// The running service is shared behind an `Arc`, so independent calls may
/// run concurrently; no ordering is guaranteed between them.
pub struct ToolSession {
    spec: ProviderSpec,
    state: RwLock<SessionState>,
    logger: Arc<dyn Logger>,
}

impl ToolSession {
    /// Create an uninitialized session from its launch spec
    pub fn new(spec: ProviderSpec, logger: Arc<dyn Logger>) -> Self {
        Self {
            spec,
            state: RwLock::new(SessionState::Idle),
            logger,
        }
    }

    /// Provider name (also the tool-name namespace)
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Spawn the provider subprocess and perform the MCP handshake
    pub async fn initialize(&self) -> SessionResult<()> {
        match &*self.state.read() {
            SessionState::Idle => {}
            SessionState::Ready(_) => {
                return Err(SessionError::InitializationFailed(format!(
                    "session '{}' already initialized",
                    self.spec.name
                )));
            }
            SessionState::Closed => return Err(SessionError::NotReady(self.spec.name.clone())),
        }

        self.logger.info(&format!(
            "[ToolSession] Spawning provider '{}': {} {:?}",
            self.spec.name, self.spec.command, self.spec.args
        ));

        let env = self.spec.resolved_env();
        let transport = TokioChildProcess::new(Command::new(&self.spec.command).configure(|cmd| {
            cmd.args(&self.spec.args);
            for (key, value) in &env {
                cmd.env(key, value);
            }
        }))
        .map_err(|e| SessionError::SpawnFailed(e.to_string()))?;

        let client_info = ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "toolgate".to_string(),
                title: Some("Toolgate".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        };

        let client = client_info
            .serve(transport)
            .await
            .map_err(|e| SessionError::InitializationFailed(e.to_string()))?;

        *self.state.write() = SessionState::Ready(Arc::new(client));

        self.logger.info(&format!(
            "[ToolSession] Provider '{}' initialized",
            self.spec.name
        ));

        Ok(())
    }

    /// Clone the service handle out of the lock; the guard must not be held
    /// across an await
    fn service(&self) -> SessionResult<Arc<RunningService<RoleClient, ClientInfo>>> {
        match &*self.state.read() {
            SessionState::Ready(service) => Ok(Arc::clone(service)),
            _ => Err(SessionError::NotReady(self.spec.name.clone())),
        }
    }

    /// Query the provider's tool catalogue
    pub async fn list_tools(&self) -> SessionResult<Vec<ToolDescriptor>> {
        let service = self.service()?;

        let result = service
            .list_tools(Default::default())
            .await
            .map_err(|e| SessionError::Protocol(e.to_string()))?;

        self.logger.info(&format!(
            "[ToolSession] Provider '{}' listed {} tools",
            self.spec.name,
            result.tools.len()
        ));

        Ok(result.tools.into_iter().map(descriptor_from_tool).collect())
    }

    /// Forward a single named call with its argument mapping
    pub async fn call_tool(&self, name: &str, arguments: Value) -> SessionResult<ToolOutput> {
        let service = self.service()?;

        self.logger.info(&format!(
            "[ToolSession] Calling '{}' on provider '{}'",
            name, self.spec.name
        ));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        let result = service
            .call_tool(params)
            .await
            .map_err(|e| SessionError::ToolCallFailed(e.to_string()))?;

        Ok(output_from_result(result))
    }

    /// Release the subprocess; idempotent. Calls after close fail
    /// `NotReady`. If another task still holds the handle, it is dropped
    /// rather than awaited.
    pub async fn close(&self) -> SessionResult<()> {
        let state = {
            let mut guard = self.state.write();
            std::mem::replace(&mut *guard, SessionState::Closed)
        };

        match state {
            SessionState::Ready(service) => {
                self.logger.info(&format!(
                    "[ToolSession] Closing provider '{}'",
                    self.spec.name
                ));
                match Arc::try_unwrap(service) {
                    Ok(service) => {
                        service
                            .cancel()
                            .await
                            .map_err(|e| SessionError::Protocol(e.to_string()))?;
                        Ok(())
                    }
                    Err(_) => {
                        self.logger.warn(&format!(
                            "[ToolSession] Provider '{}' still has in-flight calls, dropping handle",
                            self.spec.name
                        ));
                        Ok(())
                    }
                }
            }
            _ => Ok(()),
        }
    }
}

fn descriptor_from_tool(tool: rmcp::model::Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
        // input_schema is Arc<JsonObject>, convert to Value
        input_schema: serde_json::to_value(tool.input_schema.as_ref()).unwrap_or_default(),
    }
}

fn output_from_result(result: CallToolResult) -> ToolOutput {
    // Content is Annotated<RawContent>; .raw gets the RawContent
    let text = result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect();
    let is_error = result.is_error.unwrap_or(false);
    let raw = serde_json::to_value(&result).unwrap_or(Value::Null);

    ToolOutput { raw, text, is_error }
}
