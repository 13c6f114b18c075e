//! Channel-resolution enrichment
//!
//! Slack tools take a channel id, but a human (or the model) writes the
//! channel name. The rule resolves the name through the provider's channel
//! listing before dispatch.

use serde_json::{json, Value};

use super::decode_embedded_list;
use crate::dispatch::ToolDispatch;
use crate::error::{FacadeError, FacadeResult};
use crate::logging::Logger;
use crate::types::ToolInvocation;

/// Replace a human-readable `channel` argument with the resolved
/// `channel_id`. No-op unless the invocation is in the slack namespace
/// with a `channel` argument and no `channel_id`.
pub async fn resolve_channel(
    invocation: &mut ToolInvocation,
    dispatch: &dyn ToolDispatch,
    logger: &dyn Logger,
) -> FacadeResult<()> {
    if !invocation.tool_name.starts_with("slack.")
        || invocation.args.contains_key("channel_id")
        || !invocation.args.contains_key("channel")
    {
        return Ok(());
    }

    let channel_value = invocation.args.remove("channel").unwrap_or(Value::Null);
    let channel_name = channel_value
        .as_str()
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string();

    logger.info(&format!(
        "[Enrich] Resolving id for channel '{}'",
        channel_name
    ));

    let listing = dispatch
        .dispatch("slack.slack_list_channels", json!({}))
        .await?;
    let channels = decode_embedded_list(&listing, "channels", logger);

    let found = channels
        .iter()
        .find(|c| c.get("name").and_then(|n| n.as_str()) == Some(channel_name.as_str()));

    match found.and_then(|c| c.get("id")).and_then(|i| i.as_str()) {
        Some(id) => {
            invocation
                .args
                .insert("channel_id".to_string(), Value::String(id.to_string()));
            logger.info(&format!(
                "[Enrich] Channel '{}' resolved to id {}",
                channel_name, id
            ));
            Ok(())
        }
        None => Err(FacadeError::EnrichmentFailed(format!(
            "slack channel '{}' not found",
            channel_name
        ))),
    }
}
