use crate::error::{Result, SemtaggerError};
use crate::git::Repository;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    branch: Option<String>,
    tags: RefCell<Vec<String>>,
    remotes: Vec<String>,
    fail_pull: Option<String>,
    created: RefCell<Vec<(String, String)>>,
    pushed: RefCell<Vec<(String, String)>>,
    pulled: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create an empty mock repository on a detached HEAD
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checked-out branch
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Add a remote
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remotes.push(remote.into());
        self
    }

    /// Add existing tags, in listing order
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .borrow_mut()
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Make every pull fail with the given reason
    pub fn failing_pull(mut self, reason: impl Into<String>) -> Self {
        self.fail_pull = Some(reason.into());
        self
    }

    /// Tags created so far, with their messages
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created.borrow().clone()
    }

    /// Tags pushed so far, as `(remote, tag)`
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    /// Pulls performed so far, as `(remote, branch)`
    pub fn pulls(&self) -> Vec<(String, String)> {
        self.pulled.borrow().clone()
    }

    fn require_remote(&self, remote: &str) -> Result<()> {
        if self.remotes.iter().any(|r| r == remote) {
            Ok(())
        } else {
            Err(SemtaggerError::NoRemote(remote.to_string()))
        }
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn has_remote(&self, remote: &str) -> Result<bool> {
        Ok(self.remotes.iter().any(|r| r == remote))
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.require_remote(remote)?;
        if let Some(reason) = &self.fail_pull {
            return Err(SemtaggerError::remote(reason.clone()));
        }
        self.pulled
            .borrow_mut()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tags.borrow().iter().any(|t| t == name) {
            return Err(SemtaggerError::tag(format!("Tag '{}' already exists", name)));
        }
        self.tags.borrow_mut().push(name.to_string());
        self.created
            .borrow_mut()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.require_remote(remote)?;
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
