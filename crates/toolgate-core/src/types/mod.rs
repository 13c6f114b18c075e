//! Core types shared across the façade
//!
//! Plain data types only; protocol-specific conversions live next to the
//! session code.

mod tool;
mod invocation;

pub use tool::{ToolDescriptor, ToolOutput};
pub use invocation::{ToolInvocation, split_tool_name};
