//! Toolgate Core
//!
//! Façade over subprocess-backed MCP tool providers: a session per
//! provider, a registry that dispatches dotted tool names, an intent
//! parser for model output, and enrichment rules that resolve the
//! identifiers a human (or the model) leaves out.
//!
//! ## Orchestration
//!
//! ```rust,ignore
//! use toolgate_core::{ConfigFile, ConsoleLogger, Orchestrator, OpenRouterModel, SessionRegistry};
//!
//! let config = ConfigFile::load(ConfigFile::default_path())?;
//! let registry = Arc::new(SessionRegistry::open(config.providers, logger.clone()).await?);
//! let model = Arc::new(OpenRouterModel::new(config.model, logger.clone()));
//!
//! let orchestrator = Orchestrator::new(registry.clone(), model, logger);
//! let outcome = orchestrator.orchestrate("create a branch called feature-x from main").await?;
//! ```

pub mod config;
pub mod dispatch;
pub mod enrich;
pub mod error;
pub mod intent;
pub mod logging;
pub mod model;
pub mod orchestrate;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigFile, ModelSettings, ProviderSpec, ServerSettings};
pub use dispatch::ToolDispatch;
pub use error::{FacadeError, FacadeResult};
pub use intent::parse_intent;
pub use logging::{ConsoleLogger, Logger, NoOpLogger};
pub use model::{ChatModel, MockModel, ModelError, OpenRouterModel};
pub use orchestrate::{Orchestrator, Outcome};
pub use session::{SessionError, SessionRegistry, ToolSession};
pub use types::{split_tool_name, ToolDescriptor, ToolInvocation, ToolOutput};
