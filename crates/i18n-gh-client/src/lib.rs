//! GitHub host collaborator for the i18n review workflow.
//!
//! The workflow consumes GitHub through the [`GitHubHost`] trait: fetch a
//! pull request and its changed-file patches, fetch file content at a
//! commit, and post results back as either a position-anchored review
//! batch or individual line + side comments. [`OctocrabHost`] is the
//! direct implementation; tests substitute fakes.

pub mod host;
pub mod octocrab_host;
pub mod token;
pub mod types;

pub use host::GitHubHost;
pub use octocrab_host::OctocrabHost;
pub use token::TokenResolver;
pub use types::{
    CommentAuthor, PositionComment, PullRequest, PullRequestFile, ReviewComment, ReviewEvent,
};

// Re-export octocrab so consumers don't need to depend on it directly.
pub use octocrab;
