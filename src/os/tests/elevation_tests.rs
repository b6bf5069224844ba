// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::os::{
    is_polkit_running_with, plan_elevation, split_command, ElevationMethod, OsError, Session,
    HostSystem,
};

/// Fake system with configurable binaries and processes
#[derive(Default)]
struct FakeSystem {
    paths: HashSet<PathBuf>,
    processes: HashSet<String>,
    session: Option<Session>,
}

impl FakeSystem {
    fn with_path(mut self, path: &str) -> Self {
        self.paths.insert(PathBuf::from(path));
        self
    }

    fn with_process(mut self, name: &str) -> Self {
        self.processes.insert(name.to_string());
        self
    }

    fn in_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }
}

impl HostSystem for FakeSystem {
    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn is_process_running(&self, name: &str) -> bool {
        self.processes.contains(name)
    }

    fn session(&self) -> Session {
        self.session.unwrap_or(Session::Unknown)
    }
}

fn command() -> Vec<String> {
    split_command("apt update")
}

#[test]
fn test_split_command_ignores_repeated_spaces() {
    assert_eq!(split_command("  mintupdate   --refresh "), vec!["mintupdate", "--refresh"]);
    assert!(split_command("").is_empty());
}

#[test]
fn test_polkit_needs_pkexec_binary() {
    let system = FakeSystem::default().with_process("polkitd");
    assert!(!is_polkit_running_with(&system));

    let system = system.with_path("/usr/bin/pkexec");
    assert!(is_polkit_running_with(&system));
}

#[test]
fn test_polkit_session_agents() {
    let kde = FakeSystem::default()
        .with_path("/usr/bin/pkexec")
        .with_process("polkit-kde-authentication-agent-1")
        .in_session(Session::Kde);
    assert!(is_polkit_running_with(&kde));

    // The KDE agent only counts inside a KDE session
    let cinnamon = FakeSystem::default()
        .with_path("/usr/bin/pkexec")
        .with_process("polkit-kde-authentication-agent-1")
        .in_session(Session::Cinnamon);
    assert!(!is_polkit_running_with(&cinnamon));

    let gnome_agent = FakeSystem::default()
        .with_path("/usr/bin/pkexec")
        .with_process("polkit-gnome-authentication-agent-1");
    assert!(is_polkit_running_with(&gnome_agent));
}

#[test]
fn test_prefers_pkexec_only_when_supported() {
    let system = FakeSystem::default()
        .with_path("/usr/bin/pkexec")
        .with_path("/usr/bin/gksu")
        .with_process("polkitd");

    let supported = plan_elevation(&system, &command(), None, None, true).unwrap().unwrap();
    assert_eq!(supported.method, ElevationMethod::Pkexec);
    assert_eq!(supported.argv, vec!["/usr/bin/pkexec", "apt", "update"]);

    let unsupported = plan_elevation(&system, &command(), None, None, false).unwrap().unwrap();
    assert_eq!(unsupported.method, ElevationMethod::Gksu);
}

#[test]
fn test_gksu_message_is_bold() {
    let system = FakeSystem::default().with_path("/usr/bin/gksu");
    let plan = plan_elevation(&system, &command(), Some("Update"), Some("icon"), false)
        .unwrap()
        .unwrap();
    assert_eq!(plan.argv, vec!["gksu", "--message", "<b>Update</b>", "apt", "update"]);
}

#[test]
fn test_kdesudo_arguments() {
    let system = FakeSystem::default().with_path("/usr/bin/kdesudo");
    let plan = plan_elevation(&system, &command(), Some("Update"), Some("system-run"), false)
        .unwrap()
        .unwrap();
    assert_eq!(plan.method, ElevationMethod::Kdesudo);
    assert_eq!(
        plan.argv,
        vec!["kdesudo", "-d", "-i", "system-run", "--comment", "<b>Update</b>", "apt", "update"]
    );
}

#[test]
fn test_pkexec_is_last_resort() {
    let system = FakeSystem::default()
        .with_path("/usr/bin/pkexec")
        .with_process("polkitd");
    let plan = plan_elevation(&system, &command(), None, None, false).unwrap().unwrap();
    assert_eq!(plan.method, ElevationMethod::Pkexec);
}

#[test]
fn test_no_method_available() {
    let system = FakeSystem::default();
    assert_eq!(plan_elevation(&system, &command(), None, None, true).unwrap(), None);
}

#[test]
fn test_empty_command_rejected() {
    let system = FakeSystem::default().with_path("/usr/bin/gksu");
    assert!(matches!(
        plan_elevation(&system, &[], None, None, false),
        Err(OsError::EmptyCommand)
    ));
}
