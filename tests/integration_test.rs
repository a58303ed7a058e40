// tests/integration_test.rs
use git2::{Commit, ObjectType, Oid, Repository};
use semtagger::cli::{run_tag_workflow, TagWorkflowArgs};
use semtagger::config::Config;
use semtagger::domain::VersionBump;
use semtagger::git::{Git2Repository, Repository as _};
use semtagger::report::MemoryReporter;
use semtagger::SemtaggerError;
use std::process::Command;
use tempfile::TempDir;

// Helper: temporary repository with a configured identity and no commits
fn init_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    (temp_dir, repo)
}

// Helper: commit the current (empty) index on top of HEAD
fn commit(repo: &Repository, message: &str) -> Oid {
    let sig = repo.signature().expect("Could not get sig");
    let tree_id = repo
        .index()
        .expect("Could not get index")
        .write_tree()
        .expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let parents: Vec<Commit<'_>> = repo
        .head()
        .ok()
        .and_then(|head| head.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

fn lightweight_tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).unwrap();
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

// Helper: repository with a few release tags and one foreign tag
fn setup_tagged_repo() -> (TempDir, Repository) {
    let (dir, repo) = init_repo();
    let first = commit(&repo, "Initial commit");
    lightweight_tag(&repo, "v1.0.0", first);
    lightweight_tag(&repo, "notsemver", first);
    let second = commit(&repo, "Add feature");
    lightweight_tag(&repo, "v1.1.9", second);
    lightweight_tag(&repo, "v1.2.0", second);
    commit(&repo, "Fix bug");
    (dir, repo)
}

fn annotation(repo: &Repository, tag: &str) -> String {
    let object = repo
        .find_reference(&format!("refs/tags/{}", tag))
        .expect("tag should exist")
        .peel(ObjectType::Tag)
        .expect("tag should be annotated");
    object
        .as_tag()
        .and_then(|t| t.message())
        .unwrap_or_default()
        .trim_end()
        .to_string()
}

fn forced(bump: VersionBump) -> TagWorkflowArgs {
    TagWorkflowArgs {
        force: true,
        ..TagWorkflowArgs::new(bump)
    }
}

#[test]
fn test_git2_lists_tags_and_branch() {
    let (dir, repo) = setup_tagged_repo();
    let git = Git2Repository::open(dir.path()).unwrap();

    let mut tags = git.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["notsemver", "v1.0.0", "v1.1.9", "v1.2.0"]);

    let head = repo.head().unwrap();
    assert_eq!(git.current_branch().unwrap().as_deref(), head.shorthand());
}

#[test]
fn test_git2_detached_head_has_no_branch() {
    let (dir, repo) = setup_tagged_repo();
    let head_oid = repo.head().unwrap().target().unwrap();
    repo.set_head_detached(head_oid).unwrap();

    let git = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(git.current_branch().unwrap(), None);
}

#[test]
fn test_workflow_creates_annotated_tag() {
    let (dir, repo) = setup_tagged_repo();
    let git = Git2Repository::open(dir.path()).unwrap();
    let args = TagWorkflowArgs {
        label: Some("rc1".to_string()),
        ..forced(VersionBump::Minor)
    };

    let result = run_tag_workflow(&git, &args, &Config::default(), &MemoryReporter::new()).unwrap();

    assert_eq!(result.previous.as_deref(), Some("v1.2.0"));
    assert_eq!(result.tag, "v1.3.0-rc1");
    assert_eq!(annotation(&repo, "v1.3.0-rc1"), "Release v1.3.0-rc1");

    let tagged = repo
        .find_reference("refs/tags/v1.3.0-rc1")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(tagged.id(), head.id());
}

#[test]
fn test_workflow_twice_advances_from_new_tag() {
    let (dir, _repo) = setup_tagged_repo();
    let git = Git2Repository::open(dir.path()).unwrap();
    let reporter = MemoryReporter::new();

    let first = run_tag_workflow(&git, &forced(VersionBump::Major), &Config::default(), &reporter)
        .unwrap();
    assert_eq!(first.tag, "v2.0.0");

    // Same commit, new tag name: allowed
    let second = run_tag_workflow(&git, &forced(VersionBump::Patch), &Config::default(), &reporter)
        .unwrap();
    assert_eq!(second.previous.as_deref(), Some("v2.0.0"));
    assert_eq!(second.tag, "v2.0.1");
}

#[test]
fn test_workflow_without_tags_starts_at_zero() {
    let (dir, repo) = init_repo();
    commit(&repo, "Initial commit");
    let git = Git2Repository::open(dir.path()).unwrap();

    let result = run_tag_workflow(
        &git,
        &forced(VersionBump::Patch),
        &Config::default(),
        &MemoryReporter::new(),
    )
    .unwrap();

    assert_eq!(result.tag, "0.0.1");
    assert!(git.list_tags().unwrap().contains(&"0.0.1".to_string()));
}

#[test]
fn test_existing_tag_name_is_rejected() {
    let (dir, repo) = init_repo();
    commit(&repo, "Initial commit");
    let git = Git2Repository::open(dir.path()).unwrap();

    git.create_tag("v0.1.0", "Release v0.1.0").unwrap();
    let err = git.create_tag("v0.1.0", "Release v0.1.0").unwrap_err();
    assert!(matches!(err, SemtaggerError::Tag(_)));
}

#[test]
fn test_workflow_pushes_to_bare_remote() {
    let (dir, repo) = init_repo();
    commit(&repo, "Initial commit");
    let remote_dir = TempDir::new().unwrap();
    let remote = Repository::init_bare(remote_dir.path()).unwrap();
    repo.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let git = Git2Repository::open(dir.path()).unwrap();
    let args = TagWorkflowArgs {
        push: true,
        ..forced(VersionBump::Minor)
    };

    let result = run_tag_workflow(&git, &args, &Config::default(), &MemoryReporter::new()).unwrap();

    assert!(result.pushed);
    assert!(remote.find_reference("refs/tags/0.1.0").is_ok());
}

#[test]
fn test_push_without_remote_is_reported_before_tagging() {
    let (dir, repo) = init_repo();
    commit(&repo, "Initial commit");
    let git = Git2Repository::open(dir.path()).unwrap();
    let args = TagWorkflowArgs {
        push: true,
        ..forced(VersionBump::Patch)
    };

    let err = run_tag_workflow(&git, &args, &Config::default(), &MemoryReporter::new())
        .unwrap_err();

    assert!(matches!(err, SemtaggerError::NoRemote(ref r) if r == "origin"));
    assert!(git.list_tags().unwrap().is_empty());
}

#[test]
fn test_pull_without_remote_is_no_remote_error() {
    let (dir, repo) = init_repo();
    commit(&repo, "Initial commit");
    let git = Git2Repository::open(dir.path()).unwrap();

    let err = git.pull("origin", "main").unwrap_err();
    assert!(matches!(err, SemtaggerError::NoRemote(_)));
}

#[test]
fn test_semtagger_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Manage semantic version tags"));
    assert!(stdout.contains("--patch"));
    assert!(stdout.contains("--label"));
}

#[test]
fn test_semtagger_requires_one_bump() {
    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));

    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .args(["-p", "-m"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_semtagger_dry_run_prints_next_tag() {
    let (dir, repo) = setup_tagged_repo();

    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .args(["-p", "--force", "--dry-run"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "v1.2.1");
    assert!(repo.find_reference("refs/tags/v1.2.1").is_err());
}

#[test]
fn test_semtagger_creates_tag_with_label() {
    let (dir, repo) = setup_tagged_repo();

    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .args(["-M", "-l", "beta", "-f"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "v2.0.0-beta");
    assert_eq!(annotation(&repo, "v2.0.0-beta"), "Release v2.0.0-beta");
}

#[test]
fn test_semtagger_refuses_feature_branch() {
    let (dir, repo) = setup_tagged_repo();
    {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch("feature", &head, false).unwrap();
    }
    repo.set_head("refs/heads/feature").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .arg("-p")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(repo.find_reference("refs/tags/v1.2.1").is_err());
}

#[test]
fn test_semtagger_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_semtagger"))
        .args(["-p", "--config", "/nonexistent/semtagger.toml"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}
