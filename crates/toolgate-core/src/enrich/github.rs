//! Branch-creation enrichment
//!
//! `github.create_branch` requires the base branch's commit sha, which the
//! model never supplies. When owner, repo and base are present, the rule
//! looks the sha up via `github.list_branches`, falling back to the
//! repository's default branch when the requested base does not exist.

use serde_json::{json, Value};

use super::{decode_embedded_list, decode_embedded_str};
use crate::dispatch::ToolDispatch;
use crate::error::{FacadeError, FacadeResult};
use crate::logging::Logger;
use crate::types::ToolInvocation;

/// Fill in the base commit sha for a branch-creation invocation.
/// No-op unless the invocation targets `github.create_branch` without a
/// `sha` argument.
pub async fn enrich_create_branch(
    invocation: &mut ToolInvocation,
    dispatch: &dyn ToolDispatch,
    logger: &dyn Logger,
) -> FacadeResult<()> {
    if invocation.tool_name != "github.create_branch" || invocation.args.contains_key("sha") {
        return Ok(());
    }

    // Normalize alternate field names the model may have used
    if !invocation.args.contains_key("repo") {
        if let Some(value) = invocation.args.remove("repository") {
            invocation.args.insert("repo".to_string(), value);
        }
    }
    if !invocation.args.contains_key("branch") {
        if let Some(value) = invocation.args.remove("new_branch") {
            invocation.args.insert("branch".to_string(), value);
        }
    }

    let owner = invocation.arg_str("owner").map(str::to_string);
    let repo = invocation.arg_str("repo").map(str::to_string);
    let base = invocation.arg_str("base").map(str::to_string);

    let (Some(owner), Some(repo), Some(mut base)) = (owner, repo, base) else {
        return Ok(());
    };

    logger.info(&format!(
        "[Enrich] Looking up base branch sha for {}/{}@{}",
        owner, repo, base
    ));

    let listing = dispatch
        .dispatch(
            "github.list_branches",
            json!({ "owner": owner, "repo": repo }),
        )
        .await?;
    let branches = decode_embedded_list(&listing, "branches", logger);

    let mut found = find_branch(&branches, &base);

    if found.is_none() {
        logger.warn(&format!(
            "[Enrich] Base branch '{}' not found, trying the default branch",
            base
        ));
        let repo_info = dispatch
            .dispatch(
                "github.get_repository",
                json!({ "owner": owner, "repo": repo }),
            )
            .await?;
        let default_branch = decode_embedded_str(&repo_info, "default_branch", logger)
            .ok_or_else(|| {
                FacadeError::EnrichmentFailed(format!(
                    "could not determine the default branch of {}/{}",
                    owner, repo
                ))
            })?;

        base = default_branch;
        invocation
            .args
            .insert("base".to_string(), Value::String(base.clone()));
        found = find_branch(&branches, &base);
    }

    let sha = found
        .and_then(|b| b.get("commit"))
        .and_then(|c| c.get("sha"))
        .and_then(|s| s.as_str());

    match sha {
        Some(sha) => {
            invocation
                .args
                .insert("sha".to_string(), Value::String(sha.to_string()));
            logger.info(&format!("[Enrich] Resolved sha for '{}': {}", base, sha));
            Ok(())
        }
        None => Err(FacadeError::EnrichmentFailed(format!(
            "no sha found for branch '{}' in {}/{}",
            base, owner, repo
        ))),
    }
}

fn find_branch<'a>(branches: &'a [Value], name: &str) -> Option<&'a Value> {
    branches
        .iter()
        .find(|b| b.get("name").and_then(|n| n.as_str()) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::testing::StubDispatch;
    use crate::logging::NoOpLogger;
    use serde_json::Map;

    fn invocation(args: Value) -> ToolInvocation {
        ToolInvocation {
            tool_name: "github.create_branch".to_string(),
            args: args.as_object().cloned().unwrap_or_else(Map::new),
        }
    }

    fn branch_listing() -> Value {
        json!({
            "branches": [
                { "name": "main", "commit": { "sha": "abc123" } },
                { "name": "develop", "commit": { "sha": "def456" } }
            ]
        })
    }

    #[tokio::test]
    async fn test_existing_base_branch_resolves_sha() {
        let dispatch =
            StubDispatch::new().with_json_text("github.list_branches", branch_listing());
        let mut inv = invocation(json!({
            "owner": "owner", "repo": "repo", "branch": "feature-x", "base": "main"
        }));

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert_eq!(inv.arg_str("sha"), Some("abc123"));
        assert_eq!(inv.arg_str("base"), Some("main"));
        assert_eq!(dispatch.called_tools(), ["github.list_branches"]);
    }

    #[tokio::test]
    async fn test_missing_base_falls_back_to_default_branch() {
        let dispatch = StubDispatch::new()
            .with_json_text("github.list_branches", branch_listing())
            .with_json_text("github.get_repository", json!({ "default_branch": "develop" }));
        let mut inv = invocation(json!({
            "owner": "owner", "repo": "repo", "branch": "feature-x", "base": "gone"
        }));

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert_eq!(inv.arg_str("base"), Some("develop"));
        assert_eq!(inv.arg_str("sha"), Some("def456"));
        assert_eq!(
            dispatch.called_tools(),
            ["github.list_branches", "github.get_repository"]
        );
    }

    #[tokio::test]
    async fn test_neither_base_nor_default_matches() {
        let dispatch = StubDispatch::new()
            .with_json_text("github.list_branches", branch_listing())
            .with_json_text("github.get_repository", json!({ "default_branch": "trunk" }));
        let mut inv = invocation(json!({
            "owner": "owner", "repo": "repo", "branch": "feature-x", "base": "gone"
        }));

        let result = enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new()).await;
        assert!(matches!(result, Err(FacadeError::EnrichmentFailed(_))));
    }

    #[tokio::test]
    async fn test_no_default_branch_available() {
        let dispatch = StubDispatch::new()
            .with_json_text("github.list_branches", branch_listing())
            .with_json_text("github.get_repository", json!({ "full_name": "owner/repo" }));
        let mut inv = invocation(json!({
            "owner": "owner", "repo": "repo", "branch": "feature-x", "base": "gone"
        }));

        let result = enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new()).await;
        assert!(matches!(result, Err(FacadeError::EnrichmentFailed(_))));
    }

    #[tokio::test]
    async fn test_alternate_field_names_are_normalized() {
        let dispatch =
            StubDispatch::new().with_json_text("github.list_branches", branch_listing());
        let mut inv = invocation(json!({
            "owner": "owner", "repository": "repo", "new_branch": "feature-x", "base": "main"
        }));

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert_eq!(inv.arg_str("repo"), Some("repo"));
        assert_eq!(inv.arg_str("branch"), Some("feature-x"));
        assert!(!inv.args.contains_key("repository"));
        assert!(!inv.args.contains_key("new_branch"));
        assert_eq!(inv.arg_str("sha"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_rule_skips_when_sha_already_present() {
        let dispatch = StubDispatch::new();
        let mut inv = invocation(json!({
            "owner": "o", "repo": "r", "branch": "b", "base": "main", "sha": "cafe01"
        }));

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert_eq!(inv.arg_str("sha"), Some("cafe01"));
        assert!(dispatch.called_tools().is_empty());
    }

    #[tokio::test]
    async fn test_rule_skips_without_owner_repo_base() {
        let dispatch = StubDispatch::new();
        let mut inv = invocation(json!({ "branch": "feature-x" }));

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert!(dispatch.called_tools().is_empty());
        assert!(!inv.args.contains_key("sha"));
    }

    #[tokio::test]
    async fn test_rule_skips_other_tools() {
        let dispatch = StubDispatch::new();
        let mut inv = ToolInvocation::new("github.get_repository");

        enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new())
            .await
            .unwrap();

        assert!(dispatch.called_tools().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_branch_listing_reads_as_no_branches() {
        let dispatch = StubDispatch::new()
            .with_text_parts("github.list_branches", vec!["not json at all".to_string()])
            .with_json_text("github.get_repository", json!({ "default_branch": "main" }));
        let mut inv = invocation(json!({
            "owner": "owner", "repo": "repo", "branch": "feature-x", "base": "main"
        }));

        // No branches decode, the default branch cannot match either
        let result = enrich_create_branch(&mut inv, &dispatch, &NoOpLogger::new()).await;
        assert!(matches!(result, Err(FacadeError::EnrichmentFailed(_))));
    }
}
