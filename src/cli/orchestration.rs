//! Main workflow orchestration logic
//!
//! Holds the tagging workflow so that `main.rs` only parses arguments,
//! sets up logging and maps errors to exit codes. Everything here works
//! against the [`Repository`] trait and an injected [`Reporter`].

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchContext, SemanticVersion, TagResolver, VersionBump};
use crate::error::{Result, SemtaggerError};
use crate::git::Repository;
use crate::report::Reporter;

/// Arguments for the tag workflow
///
/// Mirrors the CLI flags without depending on clap, so the workflow can be
/// driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWorkflowArgs {
    /// Component to increment
    pub bump: VersionBump,

    /// Prerelease label for the new version
    pub label: Option<String>,

    /// Remote to pull from and push to; falls back to the configured one
    pub remote: Option<String>,

    /// Pull before resolving the latest tag
    pub pull: bool,

    /// Push the new tag
    pub push: bool,

    /// Tag even when not on a release branch
    pub force: bool,

    /// Compute the tag without creating it
    pub dry_run: bool,
}

impl TagWorkflowArgs {
    /// Workflow arguments for a plain bump with everything else off
    pub fn new(bump: VersionBump) -> Self {
        TagWorkflowArgs {
            bump,
            label: None,
            remote: None,
            pull: false,
            push: false,
            force: false,
            dry_run: false,
        }
    }
}

/// Result of a successful tag workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The new tag name
    pub tag: String,

    /// The tag the new version was derived from, if any
    pub previous: Option<String>,

    /// Whether the tag was created (false on dry run)
    pub created: bool,

    /// Whether the tag was pushed to the remote
    pub pushed: bool,
}

/// Compute the next version from the latest tag.
///
/// Without a latest tag the base is `0.0.0`. A latest tag that fails to
/// parse is an error: the resolver only returns names that parse, so this
/// signals an inconsistency rather than a foreign tag.
///
/// # Example
/// ```
/// # use semtagger::cli::orchestration::next_version;
/// # use semtagger::domain::VersionBump;
/// let next = next_version(Some("v2.3.4"), VersionBump::Minor, Some("rc1")).unwrap();
/// assert_eq!(next.to_string(), "v2.4.0-rc1");
/// ```
pub fn next_version(
    latest: Option<&str>,
    bump: VersionBump,
    label: Option<&str>,
) -> Result<SemanticVersion> {
    let mut version = match latest {
        Some(tag) => SemanticVersion::parse(tag)?,
        None => SemanticVersion::initial(),
    };

    version.bump(bump);
    if let Some(label) = label.filter(|l| !l.is_empty()) {
        version.set_label(label);
    }
    Ok(version)
}

/// Main tag workflow
///
/// 1. Check the current branch against the release branches
/// 2. Optionally pull from the remote
/// 3. Resolve the latest semantic tag and compute the next version
/// 4. Create the annotated tag and optionally push it
///
/// # Errors
/// * [`SemtaggerError::Branch`] - Not on a release branch and not forced
/// * [`SemtaggerError::NoRemote`] - Push requested but the remote is missing;
///   checked before any tag is created
/// * [`SemtaggerError::InvalidVersionFormat`] - The resolved latest tag does not re-parse
/// * Any repository error from listing, creating or pushing tags
pub fn run_tag_workflow<R: Repository + ?Sized>(
    repo: &R,
    args: &TagWorkflowArgs,
    config: &Config,
    reporter: &dyn Reporter,
) -> Result<WorkflowResult> {
    let current = repo.current_branch()?;
    let branch = BranchContext::new(current.as_deref(), &config.branches.release);
    check_branch(&branch, config, args.force, reporter)?;

    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.remote.name.clone());

    if args.pull || config.behavior.pull {
        pull_latest(repo, &branch, &remote, reporter)?;
    }

    let push = args.push || config.behavior.push;
    if push && !repo.has_remote(&remote)? {
        return Err(SemtaggerError::NoRemote(remote));
    }

    let tags = repo.list_tags()?;
    let previous = TagResolver::new(reporter).resolve_latest(&tags);
    if previous.is_none() {
        reporter.debug("No semantic version tags found. Starting with 0.0.0");
    }

    reporter.debug(&format!("Incrementing {} version", args.bump));
    if let Some(label) = &args.label {
        reporter.debug(&format!("Adding label: {}", label));
    }
    let next = next_version(previous.as_deref(), args.bump, args.label.as_deref())?;
    let tag = next.to_string();
    reporter.info(&format!("New version: {}", tag));

    if args.dry_run {
        reporter.info("Dry run: not creating tag");
        return Ok(WorkflowResult {
            tag,
            previous,
            created: false,
            pushed: false,
        });
    }

    reporter.info(&format!("Creating tag: {}", tag));
    repo.create_tag(&tag, &config.tag.message_for(&tag))?;
    reporter.info(&format!("Successfully created tag: {}", tag));

    if push {
        reporter.info(&format!("Pushing tag '{}' to remote '{}'...", tag, remote));
        repo.push_tag(&remote, &tag)?;
        reporter.info(&format!("Successfully pushed tag: {}", tag));
    } else {
        reporter.debug("Skipping push (not requested)");
    }

    Ok(WorkflowResult {
        tag,
        previous,
        created: true,
        pushed: push,
    })
}

fn check_branch(
    branch: &BranchContext,
    config: &Config,
    force: bool,
    reporter: &dyn Reporter,
) -> Result<()> {
    let warning = match branch {
        BranchContext::Release(name) => {
            reporter.debug(&format!("On {} branch", name));
            return Ok(());
        }
        BranchContext::Other(name) => BoundaryWarning::NotOnReleaseBranch {
            branch: name.clone(),
            allowed: config.branches.release.clone(),
        },
        BranchContext::Detached => BoundaryWarning::DetachedHead,
    };

    reporter.warn(&warning.to_string());
    if force {
        reporter.info("Forcing tag creation outside a release branch");
        Ok(())
    } else {
        Err(SemtaggerError::branch(format!(
            "{}. Use --force to tag anyway.",
            warning
        )))
    }
}

/// Pull failures never abort the run; the tag is computed from local data.
fn pull_latest<R: Repository + ?Sized>(
    repo: &R,
    branch: &BranchContext,
    remote: &str,
    reporter: &dyn Reporter,
) -> Result<()> {
    let Some(branch_name) = branch.name() else {
        reporter.warn("Cannot pull with a detached HEAD; using local data");
        return Ok(());
    };

    if !repo.has_remote(remote)? {
        reporter.warn(
            &BoundaryWarning::NoRemote {
                remote: remote.to_string(),
            }
            .to_string(),
        );
        return Ok(());
    }

    reporter.info(&format!("Pulling from remote '{}'...", remote));
    match repo.pull(remote, branch_name) {
        Ok(()) => reporter.info("Successfully pulled latest changes"),
        Err(e) => reporter.warn(
            &BoundaryWarning::PullFailed {
                remote: remote.to_string(),
                reason: e.to_string(),
            }
            .to_string(),
        ),
    }
    Ok(())
}
