//! Session registry
//!
//! Explicitly constructed context object holding every tool session; the
//! mapping is fixed after `open` (read-only during request handling) and
//! drained exactly once by `close_all`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::session::ToolSession;
use crate::config::ProviderSpec;
use crate::dispatch::ToolDispatch;
use crate::error::{FacadeError, FacadeResult};
use crate::logging::Logger;
use crate::types::{split_tool_name, ToolOutput};

/// Process-wide mapping from provider name to tool session
pub struct SessionRegistry {
    sessions: HashMap<String, Arc<ToolSession>>,
    /// Provider names in declared order
    order: Vec<String>,
    logger: Arc<dyn Logger>,
}

impl SessionRegistry {
    /// Initialize every configured provider, in declared order. The first
    /// provider that fails to initialize aborts startup; there is no
    /// partial-availability mode.
    pub async fn open(specs: Vec<ProviderSpec>, logger: Arc<dyn Logger>) -> FacadeResult<Self> {
        let mut sessions = HashMap::new();
        let mut order = Vec::new();

        for spec in specs {
            let name = spec.name.clone();
            let session = Arc::new(ToolSession::new(spec, Arc::clone(&logger)));
            session.initialize().await?;
            sessions.insert(name.clone(), session);
            order.push(name);
        }

        logger.info(&format!(
            "[SessionRegistry] Opened {} provider(s): {}",
            order.len(),
            order.join(", ")
        ));

        Ok(Self {
            sessions,
            order,
            logger,
        })
    }

    /// Look up a session by provider name. Absence is an expected outcome,
    /// not a fault.
    pub fn get(&self, name: &str) -> FacadeResult<Arc<ToolSession>> {
        self.sessions
            .get(name)
            .cloned()
            .ok_or_else(|| FacadeError::ProviderNotFound(name.to_string()))
    }

    /// Provider names in declared order
    pub fn provider_names(&self) -> &[String] {
        &self.order
    }

    /// Tear every session down; each teardown is independent and one
    /// failure does not block the others
    pub async fn close_all(&self) {
        for name in &self.order {
            if let Some(session) = self.sessions.get(name) {
                if let Err(e) = session.close().await {
                    self.logger
                        .error(&format!("[SessionRegistry] Failed to close '{}': {}", name, e));
                }
            }
        }
        self.logger.info("[SessionRegistry] All sessions closed");
    }

    #[cfg(test)]
    fn with_sessions(sessions: Vec<Arc<ToolSession>>, logger: Arc<dyn Logger>) -> Self {
        let order: Vec<String> = sessions.iter().map(|s| s.name().to_string()).collect();
        let sessions = sessions
            .into_iter()
            .map(|s| (s.name().to_string(), s))
            .collect();
        Self {
            sessions,
            order,
            logger,
        }
    }
}

#[async_trait]
impl ToolDispatch for SessionRegistry {
    /// Split the dotted name, resolve the namespace, forward the call.
    /// An unknown namespace never reaches a provider.
    async fn dispatch(&self, tool_name: &str, args: Value) -> FacadeResult<ToolOutput> {
        let (namespace, tool) = split_tool_name(tool_name)
            .ok_or_else(|| FacadeError::InvalidToolName(tool_name.to_string()))?;

        let session = self.get(namespace)?;

        self.logger
            .info(&format!("[SessionRegistry] Dispatching {} with args: {}", tool_name, args));

        Ok(session.call_tool(tool, args).await?)
    }

    /// Full tool catalogue across all providers, as dotted names in
    /// declared provider order
    async fn catalogue(&self) -> FacadeResult<Vec<String>> {
        let mut names = Vec::new();
        for provider in &self.order {
            let session = self.get(provider)?;
            for tool in session.list_tools().await.map_err(FacadeError::from)? {
                names.push(format!("{}.{}", provider, tool.name));
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use std::collections::HashMap as StdHashMap;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn idle_session(name: &str) -> Arc<ToolSession> {
        Arc::new(ToolSession::new(
            ProviderSpec {
                name: name.to_string(),
                command: "true".to_string(),
                args: vec![],
                env: StdHashMap::new(),
            },
            test_logger(),
        ))
    }

    #[test]
    fn test_get_unknown_provider() {
        let registry = SessionRegistry::with_sessions(vec![idle_session("github")], test_logger());

        assert!(registry.get("github").is_ok());
        let missing = registry.get("slack");
        assert!(matches!(missing, Err(FacadeError::ProviderNotFound(ref n)) if n == "slack"));
    }

    #[test]
    fn test_declared_order_preserved() {
        let registry = SessionRegistry::with_sessions(
            vec![idle_session("github"), idle_session("slack")],
            test_logger(),
        );
        assert_eq!(registry.provider_names(), ["github", "slack"]);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_namespace_never_calls() {
        let registry = SessionRegistry::with_sessions(vec![idle_session("github")], test_logger());

        let result = registry
            .dispatch("gitlab.create_branch", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(FacadeError::ProviderNotFound(_))));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_undotted_name() {
        let registry = SessionRegistry::with_sessions(vec![idle_session("github")], test_logger());

        let result = registry.dispatch("create_branch", serde_json::json!({})).await;
        assert!(matches!(result, Err(FacadeError::InvalidToolName(_))));
    }

    #[tokio::test]
    async fn test_dispatch_to_uninitialized_session() {
        let registry = SessionRegistry::with_sessions(vec![idle_session("github")], test_logger());

        // The session exists but was never initialized
        let result = registry
            .dispatch("github.list_branches", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(FacadeError::SessionNotReady(_))));
    }
}
