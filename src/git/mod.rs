//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository access
//! semtagger needs, allowing for a real git2-backed implementation and an
//! in-memory mock for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! The workflow in [crate::cli::orchestration] depends only on the
//! [Repository] trait.
//!
//! ```rust
//! # use semtagger::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> semtagger::Result<()> {
//! let tags = repo.list_tags()?;
//! repo.create_tag("v1.0.0", "Release v1.0.0")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Repository access used around the version core
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::SemtaggerError] variants; a missing remote is always
/// [crate::error::SemtaggerError::NoRemote].
pub trait Repository {
    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(Some(name))` - HEAD points at a branch
    /// * `Ok(None)` - HEAD is detached
    /// * `Err` - If HEAD cannot be read
    fn current_branch(&self) -> Result<Option<String>>;

    /// Get all tag names in the repository
    ///
    /// Order is whatever the backend yields and carries no meaning.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Check whether a remote with this name is configured
    fn has_remote(&self, remote: &str) -> Result<bool>;

    /// Fetch branches and tags from `remote` and fast-forward `branch`
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `branch` - Local branch to update (e.g., "main")
    ///
    /// # Returns
    /// * `Ok(())` - Fetched; branch fast-forwarded if possible
    /// * `Err` - If the remote doesn't exist or the fetch fails
    fn pull(&self, remote: &str, branch: &str) -> Result<()>;

    /// Create an annotated tag at the current HEAD commit
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `message` - Annotation message
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, HEAD has no commit, or Git error occurs
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the remote doesn't exist or the push is rejected
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}
