use crate::error::{Result, SemtaggerError};
use git2::{BranchType, ErrorCode, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at `path` or any parent
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn find_remote(&self, remote: &str) -> Result<git2::Remote<'_>> {
        self.repo.find_remote(remote).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec => {
                SemtaggerError::NoRemote(remote.to_string())
            }
            _ => SemtaggerError::remote(format!("Cannot find remote '{}': {}", remote, e)),
        })
    }

    /// Fast-forward `branch_name` to `remote_name/branch_name` after a fetch.
    ///
    /// Does nothing when the remote-tracking branch is missing, already
    /// merged, or has diverged. The working tree is updated with a safe
    /// checkout when the branch is the one checked out.
    fn fast_forward(&self, branch_name: &str, remote_name: &str) -> Result<()> {
        let tracking_name = format!("refs/remotes/{}/{}", remote_name, branch_name);
        let remote_oid = match self.repo.find_reference(&tracking_name) {
            Ok(reference) => match reference.target() {
                Some(oid) => oid,
                None => return Ok(()),
            },
            Err(_) => return Ok(()),
        };

        let mut local_ref = self
            .repo
            .find_branch(branch_name, BranchType::Local)?
            .into_reference();
        let local_oid = match local_ref.target() {
            Some(oid) => oid,
            None => return Ok(()),
        };

        if local_oid == remote_oid || !self.repo.graph_descendant_of(remote_oid, local_oid)? {
            return Ok(());
        }

        if local_ref.is_branch() && self.repo.head()?.name() == local_ref.name() {
            let target = self.repo.find_object(remote_oid, None)?;
            let mut checkout = git2::build::CheckoutBuilder::new();
            checkout.safe();
            self.repo.checkout_tree(&target, Some(&mut checkout))?;
        }

        local_ref.set_target(
            remote_oid,
            &format!("semtagger: fast-forward from {}/{}", remote_name, branch_name),
        )?;

        Ok(())
    }
}

/// Credentials for fetch and push: SSH keys from ~/.ssh, then the SSH agent,
/// then git's default credential helpers.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<Option<String>> {
        if self.repo.head_detached()? {
            return Ok(None);
        }

        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Err(SemtaggerError::branch(
                "HEAD points to a branch with no commits yet",
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn has_remote(&self, remote: &str) -> Result<bool> {
        match self.find_remote(remote) {
            Ok(_) => Ok(true),
            Err(SemtaggerError::NoRemote(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        let mut git_remote = self.find_remote(remote)?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote);
        let refspecs = [refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        git_remote
            .fetch(&refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                SemtaggerError::remote(format!("Failed to fetch from '{}': {}", remote, e))
            })?;

        self.fast_forward(branch, remote)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| SemtaggerError::tag(format!("Cannot resolve HEAD commit: {}", e)))?;

        let tagger = self
            .repo
            .signature()
            .map_err(|e| SemtaggerError::tag(format!("Cannot determine tagger identity: {}", e)))?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| SemtaggerError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut git_remote = self.find_remote(remote)?;

        let mut callbacks = remote_callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        git_remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    SemtaggerError::remote(format!("Network error during push: {}", e))
                }
                _ => SemtaggerError::remote(format!("Failed to push tag '{}': {}", name, e)),
            })?;

        Ok(())
    }
}
