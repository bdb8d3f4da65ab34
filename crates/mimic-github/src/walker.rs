//! Commit-history resolution and ancestry traversal.
//!
//! Given a repository's commit set and a starting ref, [`resolve_start`]
//! turns the ref into a concrete commit sha and [`traverse`] walks parent
//! links to produce the linear history in graph order (first-encounter,
//! head-first) — not timestamp order.
//!
//! # Invariants
//!
//! - Each commit is visited at most once, so traversal terminates on any
//!   finite commit set even with merge commits sharing ancestors.
//! - A merge commit contributes *every* parent's ancestry, in the order the
//!   parents are listed on the commit.
//! - Resolution failures carry the literal message text callers assert on.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{GithubError, GithubResult};
use crate::types::{Commit, GithubState, Repository};

/// A resolved traversal start: the concrete sha plus the ref it came from
/// (for error messages).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRef {
    pub start_sha: String,
    pub derived_from: String,
}

/// Resolve `sha` (branch name, else literal commit hash) or the repository's
/// default branch into a starting commit sha.
///
/// # Errors
///
/// - No `sha` and no configured default branch:
///   `Default branch not configured for repository '{owner}/{repo}'.`
/// - Configured default branch missing from the branch table:
///   `Default branch '{name}' not found in repository '{owner}/{repo}'.`
pub fn resolve_start(
    state: &GithubState,
    repo: &Repository,
    sha: Option<&str>,
) -> GithubResult<ResolvedRef> {
    let full_name = repo.full_name();

    if let Some(reference) = sha {
        // A branch name wins over a literal hash; anything that is not a
        // known branch is assumed to be a commit sha.
        let start_sha = match state.find_branch(repo.id, reference) {
            Some(branch) => branch.commit_sha.clone(),
            None => reference.to_string(),
        };
        return Ok(ResolvedRef {
            start_sha,
            derived_from: reference.to_string(),
        });
    }

    let Some(default_branch) = repo.default_branch.as_deref() else {
        return Err(GithubError::NotFound(format!(
            "Default branch not configured for repository '{full_name}'."
        )));
    };

    let Some(branch) = state.find_branch(repo.id, default_branch) else {
        return Err(GithubError::NotFound(format!(
            "Default branch '{default_branch}' not found in repository '{full_name}'."
        )));
    };

    Ok(ResolvedRef {
        start_sha: branch.commit_sha.clone(),
        derived_from: default_branch.to_string(),
    })
}

/// Walk parent links from `start_sha`, collecting each reachable commit once
/// in first-encounter order (depth-first, parents in listed order).
///
/// Parent refs that do not resolve within `commits_by_sha` end that arm of
/// the walk (shallow-history tolerance, matching upstream behavior).
pub fn traverse<'a>(
    commits_by_sha: &HashMap<&str, &'a Commit>,
    start_sha: &str,
) -> Vec<&'a Commit> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut collected: Vec<&'a Commit> = Vec::new();
    let mut stack: Vec<&str> = vec![start_sha];

    while let Some(sha) = stack.pop() {
        if !visited.insert(sha) {
            continue;
        }
        let Some(commit) = commits_by_sha.get(sha).copied() else {
            debug!(sha, "parent sha not in commit set, stopping this arm");
            continue;
        };
        collected.push(commit);

        // Reverse push so the first-listed parent is expanded first.
        for parent in commit.parents.iter().rev() {
            let parent_sha = parent.sha.as_str();
            if !visited.contains(parent_sha) && commits_by_sha.contains_key(parent_sha) {
                stack.push(parent_sha);
            }
        }
    }

    collected
}

/// Retain only commits whose file-change list touches `path` exactly,
/// preserving traversal order.
pub fn filter_by_path<'a>(commits: Vec<&'a Commit>, path: &str) -> Vec<&'a Commit> {
    commits
        .into_iter()
        .filter(|commit| commit.files.iter().any(|change| change.filename == path))
        .collect()
}
