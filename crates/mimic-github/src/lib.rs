//! GitHub-subset simulation.
//!
//! Models a minimal slice of a code-hosting API over an in-process store:
//! repositories, branches, users, and commits with parent links and file
//! changes. The centerpiece is the commit-history walk behind
//! [`api::list_commits`]: resolve a ref (branch name, literal sha, or the
//! repository's default branch), traverse parent links depth-first collecting
//! each commit once, filter by path, then paginate.
//!
//! All state lives in a [`GithubState`] owned by the caller (typically inside
//! a `mimic_store::JsonStore`); nothing here is global.

pub mod api;
pub mod error;
pub mod types;
pub mod walker;

pub use api::{
    get_commit, list_branches, list_commits, BranchItem, CommitBody, CommitDetailItem, CommitItem,
    CommitStats, ListCommitsParams, TreeRef,
};
pub use error::{GithubError, GithubResult};
pub use types::{
    Account, Branch, Commit, CommitDetail, FileChange, GitActor, GithubState, ParentRef,
    Repository,
};
