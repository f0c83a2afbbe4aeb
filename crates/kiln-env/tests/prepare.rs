//! End-to-end preparer behavior against scripted subprocess results.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;

use kiln_env::{
    CommandRunner, EnvironmentError, Invocation, LinkerStatus, PackageManager, Preparer, RunStatus,
};
use kiln_targets::TargetPlatform;

/// Mimics rustup and a package manager: `target add` of a known target is a
/// no-op success, installs succeed unless `fail_install` is set.
#[derive(Default)]
struct FakeHost {
    installed_targets: RefCell<HashSet<String>>,
    calls: RefCell<Vec<String>>,
    fail_rustup: bool,
    fail_install: bool,
}

impl CommandRunner for FakeHost {
    fn run(&self, invocation: &Invocation) -> io::Result<RunStatus> {
        self.calls.borrow_mut().push(invocation.to_string());
        if invocation.program == "rustup" {
            if self.fail_rustup {
                return Ok(RunStatus { code: Some(1) });
            }
            if let Some(triple) = invocation.args.last() {
                self.installed_targets.borrow_mut().insert(triple.clone());
            }
            return Ok(RunStatus { code: Some(0) });
        }
        let code = if self.fail_install { 100 } else { 0 };
        Ok(RunStatus { code: Some(code) })
    }
}

struct MissingBinary;

impl CommandRunner for MissingBinary {
    fn run(&self, _invocation: &Invocation) -> io::Result<RunStatus> {
        Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }
}

fn apt_host(name: &str) -> bool {
    matches!(name, "apt-get" | "sudo")
}

#[test]
fn second_run_succeeds_with_targets_already_registered() {
    let preparer = Preparer::new(TargetPlatform::builtin(), FakeHost::default(), apt_host);

    let first = preparer.prepare().unwrap();
    let second = preparer.prepare().unwrap();

    assert_eq!(first.registered, second.registered);
    assert_eq!(preparer.runner().installed_targets.borrow().len(), 2);
    assert_eq!(preparer.runner().calls.borrow().len(), 6);
    assert_eq!(
        second.linker,
        LinkerStatus::Installed {
            manager: PackageManager::Apt
        }
    );
}

#[test]
fn no_package_manager_still_succeeds() {
    let preparer = Preparer::new(TargetPlatform::builtin(), FakeHost::default(), |_: &str| false);

    let report = preparer.prepare().unwrap();

    assert_eq!(report.linker, LinkerStatus::ManualInstallRequired);
    assert_eq!(report.registered.len(), 2);
}

#[test]
fn install_failure_is_fatal() {
    let host = FakeHost {
        fail_install: true,
        ..FakeHost::default()
    };
    let preparer = Preparer::new(TargetPlatform::builtin(), host, apt_host);

    let err = preparer.prepare().unwrap_err();

    assert!(err.is_fatal());
    match err {
        EnvironmentError::PackageInstallFailed {
            manager,
            command,
            status,
        } => {
            assert_eq!(manager, "apt");
            assert_eq!(command, "sudo apt-get install -y gcc-mingw-w64-x86-64");
            assert_eq!(status, "exit code 100");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registration_failure_aborts_before_install() {
    let host = FakeHost {
        fail_rustup: true,
        ..FakeHost::default()
    };
    let preparer = Preparer::new(TargetPlatform::builtin(), host, apt_host);

    let err = preparer.prepare().unwrap_err();

    assert!(matches!(
        err,
        EnvironmentError::SetupToolchain { ref target, .. } if target == "x86_64-unknown-linux-gnu"
    ));
    let calls = preparer.runner().calls.borrow();
    assert_eq!(calls.as_slice(), ["rustup target add x86_64-unknown-linux-gnu"]);
}

#[test]
fn unlaunchable_rustup_is_a_spawn_error() {
    let preparer = Preparer::new(TargetPlatform::builtin(), MissingBinary, apt_host);

    let err = preparer.prepare().unwrap_err();

    assert!(matches!(err, EnvironmentError::Spawn { ref program, .. } if program == "rustup"));
    assert!(err.is_fatal());
}
