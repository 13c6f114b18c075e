//! Tool sessions and their registry
//!
//! A `ToolSession` wraps one subprocess MCP server; the `SessionRegistry`
//! owns every session for the process lifetime and implements dotted-name
//! dispatch over them.

mod session;
mod registry;

pub use session::{SessionError, SessionResult, ToolSession};
pub use registry::SessionRegistry;
