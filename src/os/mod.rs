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

//! Desktop session and system helpers
//!
//! - **Session detection:** which desktop environment is running
//! - **Live / guest session:** boot command line and home directory checks
//! - **Process detection:** process table lookup through `sysinfo`
//! - **Privilege elevation:** pkexec, gksu or kdesudo (see [`elevation`])
//!
//! Checks take their input explicitly where possible (`*_from`,
//! [`process_matches`]) so they can be tested against fixtures instead of
//! the live system.

pub mod elevation;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use thiserror::Error;

pub use elevation::{
    is_polkit_running, is_polkit_running_with, pkexec, plan_elevation, run_with_admin_privs,
    split_command, ElevationMethod, ElevationPlan, LiveSystem, HostSystem,
};

/// Errors from the OS helpers
#[derive(Debug, Error)]
pub enum OsError {
    /// No program given to run
    #[error("Command is empty")]
    EmptyCommand,
    /// Generic I/O error (spawning a command)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Desktop environments the library knows about
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Session {
    Cinnamon,
    Mate,
    Xfce,
    Kde,
    Gnome,
    Unknown,
}

impl Session {
    /// Maps an `XDG_CURRENT_DESKTOP` value to a session
    ///
    /// Matching is case-insensitive on the whole value, plus the
    /// `X-Cinnamon` alias used by Cinnamon on some distributions.
    pub fn from_desktop(value: &str) -> Self {
        const KNOWN: &[Session] = &[
            Session::Cinnamon,
            Session::Mate,
            Session::Xfce,
            Session::Kde,
            Session::Gnome,
        ];

        if let Some(session) = KNOWN
            .iter()
            .find(|session| session.name().eq_ignore_ascii_case(value))
        {
            return *session;
        }

        if value == "X-Cinnamon" {
            return Session::Cinnamon;
        }

        Session::Unknown
    }

    /// Canonical name, empty for [`Session::Unknown`]
    pub fn name(&self) -> &'static str {
        match self {
            Session::Cinnamon => "Cinnamon",
            Session::Mate => "MATE",
            Session::Xfce => "XFCE",
            Session::Kde => "KDE",
            Session::Gnome => "GNOME",
            Session::Unknown => "",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Unknown => write!(f, "unknown"),
            known => write!(f, "{}", known.name()),
        }
    }
}

/// Detects the running desktop from `XDG_CURRENT_DESKTOP`
pub fn current_desktop() -> Session {
    let value = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    Session::from_desktop(&value)
}

pub fn is_desktop_cinnamon() -> bool {
    current_desktop() == Session::Cinnamon
}

pub fn is_desktop_mate() -> bool {
    current_desktop() == Session::Mate
}

pub fn is_desktop_xfce() -> bool {
    current_desktop() == Session::Xfce
}

pub fn is_desktop_kde() -> bool {
    current_desktop() == Session::Kde
}

pub fn is_desktop_gnome() -> bool {
    current_desktop() == Session::Gnome
}

const LIVE_BOOT_KEYWORDS: &[&str] = &["boot=casper", "boot=live"];

/// True when booted from live media
pub fn is_live_session() -> bool {
    is_live_session_from(Path::new("/proc/cmdline"))
}

/// Checks a kernel command line file for live-boot keywords
///
/// A missing or unreadable file means "not live".
pub fn is_live_session_from(cmdline_path: &Path) -> bool {
    match fs::read_to_string(cmdline_path) {
        Ok(cmdline) => LIVE_BOOT_KEYWORDS
            .iter()
            .any(|keyword| cmdline.contains(keyword)),
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", cmdline_path.display(), e);
            false
        }
    }
}

/// True when running in a guest account
pub fn is_guest_session() -> bool {
    is_guest_home(&shellexpand::tilde("~"))
}

/// Guest accounts live under `/tmp/guest-*`
pub fn is_guest_home(home: &str) -> bool {
    home.contains("/tmp/guest")
}

/// True if any running process has this name
///
/// Matches the kernel's short name as well as the basename of the
/// executable and of `argv[0]`, so names longer than 15 bytes are found.
pub fn is_process_running(name: &str) -> bool {
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing()
            .with_exe(UpdateKind::OnlyIfNotSet)
            .with_cmd(UpdateKind::OnlyIfNotSet),
    );

    system
        .processes()
        .values()
        .any(|process| process_matches(process.name(), process.exe(), process.cmd(), name))
}

/// Name check behind [`is_process_running`]
///
/// `short_name` is the (possibly truncated) kernel name, `exe` the resolved
/// executable and `cmd` the argument vector.
pub fn process_matches(
    short_name: &OsStr,
    exe: Option<&Path>,
    cmd: &[OsString],
    name: &str,
) -> bool {
    let name = OsStr::new(name);
    if short_name == name {
        return true;
    }

    let basename_is = |path: &Path| path.file_name() == Some(name);

    exe.is_some_and(basename_is) || cmd.first().is_some_and(|arg0| basename_is(Path::new(arg0)))
}

#[cfg(test)]
mod tests;
