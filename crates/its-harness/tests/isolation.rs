// crates/its-harness/tests/isolation.rs
// ============================================================================
// Module: Repository Isolation Tests
// Description: Filesystem coverage for per-test local repositories.
// Purpose: Verify wipe-and-create semantics and context registration.
// ============================================================================

//! Repository isolation tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use its_harness::HarnessConfig;
use its_harness::HarnessError;
use its_harness::InvocationContext;
use its_harness::RepositoryIsolator;
use tempfile::TempDir;

fn is_empty_dir(path: &Path) -> bool {
    path.is_dir() && fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn path_is_base_local_repository_identity() {
    let isolator = RepositoryIsolator::new("/tmp");
    assert_eq!(
        isolator.repository_path("MyFeature").unwrap(),
        PathBuf::from("/tmp/local-repository/MyFeature")
    );
}

#[test]
fn config_temp_dir_overrides_platform_default() {
    let configured = HarnessConfig {
        temp_dir: Some(PathBuf::from("/srv/its")),
        ..HarnessConfig::default()
    };
    assert_eq!(RepositoryIsolator::from_config(&configured).base_dir(), Path::new("/srv/its"));

    let fallback = RepositoryIsolator::from_config(&HarnessConfig::default());
    assert_eq!(fallback.base_dir(), std::env::temp_dir());
}

#[test]
fn prepare_creates_an_empty_directory_and_activates_it() {
    let base = TempDir::new().unwrap();
    let isolator = RepositoryIsolator::new(base.path());
    let mut context = InvocationContext::new();

    let path = isolator.prepare("MyFeature", &mut context).unwrap();
    assert_eq!(path, base.path().join("local-repository").join("MyFeature"));
    assert!(is_empty_dir(&path));
    assert_eq!(context.local_repository(), Some(path.as_path()));
}

#[test]
fn prepare_twice_wipes_previous_contents() {
    let base = TempDir::new().unwrap();
    let isolator = RepositoryIsolator::new(base.path());
    let mut context = InvocationContext::new();

    let first = isolator.prepare("MyFeature", &mut context).unwrap();
    fs::create_dir_all(first.join("org/example/lib/1.0")).unwrap();
    fs::write(first.join("org/example/lib/1.0/lib-1.0.jar"), b"jar").unwrap();
    fs::write(first.join("stale.txt"), b"stale").unwrap();

    let second = isolator.prepare("MyFeature", &mut context).unwrap();
    assert_eq!(first, second);
    assert!(is_empty_dir(&second));
}

#[test]
fn prepare_leaves_sibling_repositories_alone() {
    let base = TempDir::new().unwrap();
    let isolator = RepositoryIsolator::new(base.path());
    let mut context = InvocationContext::new();

    let other = isolator.prepare("Other", &mut context).unwrap();
    fs::write(other.join("keep.txt"), b"keep").unwrap();

    let mine = isolator.prepare("MyFeature", &mut context).unwrap();
    assert!(other.join("keep.txt").is_file());
    assert_eq!(context.local_repository(), Some(mine.as_path()));
}

#[test]
fn invalid_identities_are_rejected() {
    let base = TempDir::new().unwrap();
    let isolator = RepositoryIsolator::new(base.path());
    let mut context = InvocationContext::new();

    for identity in ["", ".", "..", "a/b", "/abs", "trailing/"] {
        let err = isolator.prepare(identity, &mut context).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidIdentity(_)), "identity {identity:?}");
    }
    assert!(context.local_repository().is_none());
}

#[test]
fn filesystem_failures_surface_as_io_errors() {
    let base = TempDir::new().unwrap();
    let blocker = base.path().join("not-a-dir");
    fs::write(&blocker, b"file").unwrap();
    let isolator = RepositoryIsolator::new(&blocker);
    let mut context = InvocationContext::new();

    let err = isolator.prepare("MyFeature", &mut context).unwrap_err();
    assert!(matches!(err, HarnessError::Io { .. }));
    assert!(context.local_repository().is_none());
}

#[test]
fn context_renders_the_repository_as_a_system_property() {
    let mut context = InvocationContext::new();
    assert!(context.build_tool_args().is_empty());

    let previous = context.set_local_repository(PathBuf::from("/tmp/local-repository/A"));
    assert!(previous.is_none());
    let previous = context.set_local_repository(PathBuf::from("/tmp/local-repository/B"));
    assert_eq!(previous, Some(PathBuf::from("/tmp/local-repository/A")));

    assert_eq!(context.build_tool_args(), vec![
        "-Dmaven.repo.local=/tmp/local-repository/B".to_string()
    ]);

    let mut command = Command::new("mvn");
    context.apply(&mut command);
    let args: Vec<_> = command.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect();
    assert_eq!(args, ["-Dmaven.repo.local=/tmp/local-repository/B"]);

    context.clear_local_repository();
    assert!(context.system_properties().is_empty());
}
