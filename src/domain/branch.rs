/// Where HEAD points, judged against the configured release branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchContext {
    /// On a branch listed as a release branch
    Release(String),
    /// On some other branch
    Other(String),
    /// HEAD does not point at a branch
    Detached,
}

impl BranchContext {
    /// Classify `current` (None when HEAD is detached)
    pub fn new<S: AsRef<str>>(current: Option<&str>, release_branches: &[S]) -> Self {
        match current {
            Some(name) if release_branches.iter().any(|b| b.as_ref() == name) => {
                BranchContext::Release(name.to_string())
            }
            Some(name) => BranchContext::Other(name.to_string()),
            None => BranchContext::Detached,
        }
    }

    /// Check if tagging is allowed without forcing
    pub fn is_release_branch(&self) -> bool {
        matches!(self, BranchContext::Release(_))
    }

    /// Branch name, if HEAD is on one
    pub fn name(&self) -> Option<&str> {
        match self {
            BranchContext::Release(name) | BranchContext::Other(name) => Some(name),
            BranchContext::Detached => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: [&str; 2] = ["main", "master"];

    #[test]
    fn test_main_branch() {
        let branch = BranchContext::new(Some("main"), &DEFAULTS);
        assert!(branch.is_release_branch());
        assert_eq!(branch.name(), Some("main"));
    }

    #[test]
    fn test_master_branch() {
        let branch = BranchContext::new(Some("master"), &DEFAULTS);
        assert!(branch.is_release_branch());
    }

    #[test]
    fn test_develop_branch() {
        let branch = BranchContext::new(Some("develop"), &DEFAULTS);
        assert_eq!(branch, BranchContext::Other("develop".to_string()));
        assert!(!branch.is_release_branch());
    }

    #[test]
    fn test_detached_head() {
        let branch = BranchContext::new(None, &DEFAULTS);
        assert_eq!(branch, BranchContext::Detached);
        assert!(!branch.is_release_branch());
        assert_eq!(branch.name(), None);
    }

    #[test]
    fn test_configured_release_branches() {
        let configured = vec!["trunk".to_string()];
        assert!(BranchContext::new(Some("trunk"), &configured).is_release_branch());
        assert!(!BranchContext::new(Some("main"), &configured).is_release_branch());
    }
}
