use std::fmt;

/// Non-fatal conditions met while preparing a tag.
/// These are reported to the user; some become fatal only without `--force`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// HEAD is on a branch that is not a configured release branch
    NotOnReleaseBranch { branch: String, allowed: Vec<String> },
    /// HEAD does not point at any branch
    DetachedHead,
    /// The configured remote does not exist
    NoRemote { remote: String },
    /// Pulling from the remote failed; local data is used instead
    PullFailed { remote: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NotOnReleaseBranch { branch, allowed } => {
                write!(
                    f,
                    "You are on branch '{}', not on {}",
                    branch,
                    allowed.join("/")
                )
            }
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached, not on any branch")
            }
            BoundaryWarning::NoRemote { remote } => {
                write!(f, "No remote named '{}' found", remote)
            }
            BoundaryWarning::PullFailed { remote, reason } => {
                write!(
                    f,
                    "Could not pull from remote '{}': {}. Using local data.",
                    remote, reason
                )
            }
        }
    }
}
