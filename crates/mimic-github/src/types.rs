//! Typed state for the GitHub simulation.
//!
//! The layout mirrors flat API tables: repositories, branches, commits, and
//! user accounts live in separate lists joined by `repository_id` / login.
//! Commits are immutable once inserted; branches are repointed only by test
//! fixtures, never by traversal logic.

use serde::{Deserialize, Serialize};

/// A git author/committer identity block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitActor {
    pub name: String,
    pub email: String,
    /// ISO-8601 timestamp. String comparison is time comparison.
    pub date: String,
}

/// A reference to a parent commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub sha: String,
    pub node_id: String,
}

/// One file touched by a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    /// Change kind: `added`, `modified`, `removed`, `renamed`.
    pub status: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

/// Core commit data: the `commit` block of the response contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub author: GitActor,
    pub committer: GitActor,
    pub message: String,
    pub tree_sha: String,
    #[serde(default)]
    pub comment_count: u64,
}

/// One commit in a repository's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub node_id: String,
    pub repository_id: u64,
    pub detail: CommitDetail,
    /// Zero parents for a root commit, one for a normal commit, two or more
    /// for a merge. Every entry must resolve within the same repository.
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub files: Vec<FileChange>,
    /// Login of the linked authoring account, when one exists.
    #[serde(default)]
    pub author_login: Option<String>,
    /// Login of the linked committing account, when one exists.
    #[serde(default)]
    pub committer_login: Option<String>,
}

/// A named pointer to a commit hash within one repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub repository_id: u64,
    pub name: String,
    pub commit_sha: String,
    #[serde(default)]
    pub protected: bool,
}

/// A repository keyed by owner + name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub owner: String,
    pub name: String,
    /// `None` means no default branch is configured; traversal without an
    /// explicit ref must then fail, never guess.
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub size: u64,
}

impl Repository {
    /// `owner/name` form used in error messages.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A user account in the simulation's directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    #[serde(default)]
    pub gravatar_id: String,
    /// Account type: `User`, `Organization`, or `Bot`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub site_admin: bool,
}

/// The whole GitHub simulation state: flat tables joined by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubState {
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub users: Vec<Account>,
}

impl GithubState {
    /// Find a repository by `owner/name` (case-sensitive exact match).
    pub fn find_repository(&self, owner: &str, name: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|repo| repo.owner == owner && repo.name == name)
    }

    /// Find a branch within one repository by exact name.
    pub fn find_branch(&self, repository_id: u64, name: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|branch| branch.repository_id == repository_id && branch.name == name)
    }

    /// All branches of one repository, in insertion order.
    pub fn branches_of(&self, repository_id: u64) -> Vec<&Branch> {
        self.branches
            .iter()
            .filter(|branch| branch.repository_id == repository_id)
            .collect()
    }

    /// All commits of one repository, in insertion order.
    pub fn commits_of(&self, repository_id: u64) -> Vec<&Commit> {
        self.commits
            .iter()
            .filter(|commit| commit.repository_id == repository_id)
            .collect()
    }

    /// Look up a linked account by login.
    pub fn find_user(&self, login: &str) -> Option<&Account> {
        self.users.iter().find(|user| user.login == login)
    }
}
