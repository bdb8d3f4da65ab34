//! Endpoint operations over a [`GithubState`].
//!
//! Thin glue: validate inputs, look up the repository, hand the commit set to
//! the walker, then shape results into the wire contract. All failure text is
//! part of the contract and asserted literally by callers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use mimic_query::page_slice;

use crate::error::{GithubError, GithubResult};
use crate::types::{Account, Commit, GitActor, GithubState, ParentRef};
use crate::walker;

/// Optional knobs for [`list_commits`].
#[derive(Clone, Debug, Default)]
pub struct ListCommitsParams {
    /// Branch name or commit hash to start from. `None` uses the repository's
    /// default branch.
    pub sha: Option<String>,
    /// Restrict output to commits touching exactly this file path.
    pub path: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// The `tree` block of a commit response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRef {
    pub sha: String,
}

/// The `commit` block of a commit response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBody {
    pub author: GitActor,
    pub committer: GitActor,
    pub message: String,
    pub tree: TreeRef,
    pub comment_count: u64,
}

/// One entry of a `list_commits` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitItem {
    pub sha: String,
    pub node_id: String,
    pub commit: CommitBody,
    /// Linked authoring account, `None` when the git author has no account.
    pub author: Option<Account>,
    /// Linked committing account, `None` when unlinked.
    pub committer: Option<Account>,
    pub parents: Vec<ParentRef>,
}

/// Aggregate line counts for a single commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub total: u64,
    pub additions: u64,
    pub deletions: u64,
}

/// The `get_commit` response: a [`CommitItem`] plus stats and file changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetailItem {
    #[serde(flatten)]
    pub item: CommitItem,
    pub stats: CommitStats,
    pub files: Vec<crate::types::FileChange>,
}

/// One entry of a `list_branches` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchItem {
    pub name: String,
    pub commit: TreeRef,
    pub protected: bool,
}

fn require_nonempty(value: &str, name: &str) -> GithubResult<()> {
    if value.trim().is_empty() {
        return Err(GithubError::Validation(format!(
            "Parameter '{name}' cannot be empty or whitespace-only"
        )));
    }
    Ok(())
}

fn require_nonempty_opt(value: Option<&str>, name: &str) -> GithubResult<()> {
    if let Some(value) = value {
        if value.trim().is_empty() {
            return Err(GithubError::Validation(format!(
                "Parameter '{name}' cannot be empty or whitespace-only when provided"
            )));
        }
    }
    Ok(())
}

fn shape_commit(state: &GithubState, commit: &Commit) -> CommitItem {
    let resolve = |login: &Option<String>| {
        login
            .as_deref()
            .and_then(|login| state.find_user(login))
            .cloned()
    };
    CommitItem {
        sha: commit.sha.clone(),
        node_id: commit.node_id.clone(),
        commit: CommitBody {
            author: commit.detail.author.clone(),
            committer: commit.detail.committer.clone(),
            message: commit.detail.message.clone(),
            tree: TreeRef {
                sha: commit.detail.tree_sha.clone(),
            },
            comment_count: commit.detail.comment_count,
        },
        author: resolve(&commit.author_login),
        committer: resolve(&commit.committer_login),
        parents: commit.parents.clone(),
    }
}

/// List a repository's commit history starting from a ref.
///
/// Resolves the ref (branch name wins over literal hash, default branch when
/// omitted), walks ancestry in first-encounter graph order, filters by path,
/// then pages. Fails closed: a resolution failure produces no partial output.
pub fn list_commits(
    state: &GithubState,
    owner: &str,
    repo: &str,
    params: &ListCommitsParams,
) -> GithubResult<Vec<CommitItem>> {
    require_nonempty(owner, "owner")?;
    require_nonempty(repo, "repo")?;
    require_nonempty_opt(params.sha.as_deref(), "sha")?;
    require_nonempty_opt(params.path.as_deref(), "path")?;

    let repository = state.find_repository(owner, repo).ok_or_else(|| {
        GithubError::NotFound(format!("Repository '{owner}/{repo}' not found."))
    })?;
    let full_name = repository.full_name();

    let resolved = walker::resolve_start(state, repository, params.sha.as_deref())?;

    let commits_by_sha: HashMap<&str, &Commit> = state
        .commits_of(repository.id)
        .into_iter()
        .map(|commit| (commit.sha.as_str(), commit))
        .collect();

    if !commits_by_sha.contains_key(resolved.start_sha.as_str()) {
        return Err(GithubError::NotFound(format!(
            "Commit SHA '{}' (derived from '{}') not found in repository '{full_name}'.",
            resolved.start_sha, resolved.derived_from
        )));
    }

    let mut collected = walker::traverse(&commits_by_sha, &resolved.start_sha);
    if let Some(path) = params.path.as_deref() {
        collected = walker::filter_by_path(collected, path);
    }
    debug!(
        repository = %full_name,
        start = %resolved.start_sha,
        collected = collected.len(),
        "commit walk complete"
    );

    let paged = page_slice(&collected, params.page, params.per_page);
    Ok(paged
        .into_iter()
        .map(|commit| shape_commit(state, commit))
        .collect())
}

/// Fetch one commit by its exact sha, with stats and file changes.
///
/// When `page` is given the file list is paged with `per_page`; otherwise the
/// full file list is returned and `per_page` is ignored.
pub fn get_commit(
    state: &GithubState,
    owner: &str,
    repo: &str,
    sha: &str,
    page: Option<i64>,
    per_page: Option<i64>,
) -> GithubResult<CommitDetailItem> {
    require_nonempty(owner, "owner")?;
    require_nonempty(repo, "repo")?;
    require_nonempty(sha, "sha")?;

    let repository = state.find_repository(owner, repo).ok_or_else(|| {
        GithubError::NotFound(format!("Repository '{owner}/{repo}' not found."))
    })?;
    let full_name = repository.full_name();

    let commit = state
        .commits_of(repository.id)
        .into_iter()
        .find(|commit| commit.sha == sha)
        .ok_or_else(|| {
            GithubError::NotFound(format!(
                "Commit with SHA '{sha}' not found in repository '{full_name}'."
            ))
        })?;

    let stats = CommitStats {
        total: commit.files.iter().map(|f| f.changes).sum(),
        additions: commit.files.iter().map(|f| f.additions).sum(),
        deletions: commit.files.iter().map(|f| f.deletions).sum(),
    };

    let files = if page.is_some() {
        page_slice(&commit.files, page, per_page)
    } else {
        commit.files.clone()
    };

    Ok(CommitDetailItem {
        item: shape_commit(state, commit),
        stats,
        files,
    })
}

/// List a repository's branches sorted by name, paged.
pub fn list_branches(
    state: &GithubState,
    owner: &str,
    repo: &str,
    page: Option<i64>,
    per_page: Option<i64>,
) -> GithubResult<Vec<BranchItem>> {
    require_nonempty(owner, "owner")?;
    require_nonempty(repo, "repo")?;

    let repository = state.find_repository(owner, repo).ok_or_else(|| {
        GithubError::NotFound(format!("Repository '{owner}/{repo}' not found."))
    })?;

    let mut branches = state.branches_of(repository.id);
    branches.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(page_slice(&branches, page, per_page)
        .into_iter()
        .map(|branch| BranchItem {
            name: branch.name.clone(),
            commit: TreeRef {
                sha: branch.commit_sha.clone(),
            },
            protected: branch.protected,
        })
        .collect())
}
