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

//! Running commands as root
//!
//! # Method selection
//!
//! 1. **pkexec** when the caller supports it and a polkit agent runs
//! 2. **gksu** if installed
//! 3. **kdesudo** if installed
//! 4. **pkexec** as a last resort (works, but the program may not be
//!    localised)
//!
//! Selection is separated from execution: [`plan_elevation`] consults a
//! [`HostSystem`] and returns an [`ElevationPlan`], which only touches the
//! system when [`ElevationPlan::execute`] runs.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::os::{current_desktop, is_process_running, OsError, Session};

const PKEXEC: &str = "/usr/bin/pkexec";
const GKSU: &str = "/usr/bin/gksu";
const KDESUDO: &str = "/usr/bin/kdesudo";

/// What the selection logic needs to know about the system
pub trait HostSystem {
    fn path_exists(&self, path: &Path) -> bool;
    fn is_process_running(&self, name: &str) -> bool;
    fn session(&self) -> Session;
}

/// Host backed by the real filesystem, `/proc` and environment
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveSystem;

impl HostSystem for LiveSystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_process_running(&self, name: &str) -> bool {
        is_process_running(name)
    }

    fn session(&self) -> Session {
        current_desktop()
    }
}

/// Elevation front-end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElevationMethod {
    Pkexec,
    Gksu,
    Kdesudo,
}

impl fmt::Display for ElevationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationMethod::Pkexec => write!(f, "pkexec"),
            ElevationMethod::Gksu => write!(f, "gksu"),
            ElevationMethod::Kdesudo => write!(f, "kdesudo"),
        }
    }
}

/// A fully built elevated command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElevationPlan {
    pub method: ElevationMethod,
    /// Program followed by its arguments
    pub argv: Vec<String>,
}

impl ElevationPlan {
    /// Runs the plan
    ///
    /// pkexec blocks until the command exits; gksu and kdesudo are spawned
    /// and left running.
    pub fn execute(&self) -> Result<(), OsError> {
        let (program, args) = self.argv.split_first().ok_or(OsError::EmptyCommand)?;
        tracing::info!("Running '{}' via {}", args.join(" "), self.method);

        let mut command = Command::new(program);
        command.args(args);

        match self.method {
            ElevationMethod::Pkexec => {
                let status = command.status()?;
                if !status.success() {
                    tracing::warn!("pkexec exited with {}", status);
                }
            }
            ElevationMethod::Gksu | ElevationMethod::Kdesudo => {
                command.spawn()?;
            }
        }
        Ok(())
    }
}

/// Splits a single command string on spaces
///
/// Quoting is not interpreted.
pub fn split_command(command: &str) -> Vec<String> {
    command
        .split(' ')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when pkexec is installed and a polkit agent is running
pub fn is_polkit_running() -> bool {
    is_polkit_running_with(&LiveSystem)
}

/// [`is_polkit_running`] against an explicit host
pub fn is_polkit_running_with(host: &dyn HostSystem) -> bool {
    if !host.path_exists(Path::new(PKEXEC)) {
        return false;
    }

    let session = host.session();
    (session == Session::Kde && host.is_process_running("polkit-kde-authentication-agent-1"))
        || (session == Session::Mate && host.is_process_running("polkit-mate-authentication-agent-1"))
        || host.is_process_running("polkit-gnome-authentication-agent-1")
        || host.is_process_running("polkitd")
}

/// Chooses how to run `command` as root
///
/// Returns `Ok(None)` when no elevation method is available.
///
/// # Arguments
///
/// * `command` - Program and arguments
/// * `message` - Shown in bold by gksu / kdesudo
/// * `icon` - Icon name for kdesudo
/// * `support_pkexec` - Caller's program works under pkexec
pub fn plan_elevation(
    host: &dyn HostSystem,
    command: &[String],
    message: Option<&str>,
    icon: Option<&str>,
    support_pkexec: bool,
) -> Result<Option<ElevationPlan>, OsError> {
    if command.is_empty() {
        return Err(OsError::EmptyCommand);
    }

    let polkit = is_polkit_running_with(host);

    let plan = if polkit && support_pkexec {
        Some(pkexec_plan(command))
    } else if host.path_exists(Path::new(GKSU)) {
        let mut argv = vec!["gksu".to_string()];
        if let Some(message) = message {
            argv.push("--message".to_string());
            argv.push(format!("<b>{}</b>", message));
        }
        argv.extend(command.iter().cloned());
        Some(ElevationPlan {
            method: ElevationMethod::Gksu,
            argv,
        })
    } else if host.path_exists(Path::new(KDESUDO)) {
        let mut argv = vec!["kdesudo".to_string(), "-d".to_string()];
        if let Some(icon) = icon {
            argv.push("-i".to_string());
            argv.push(icon.to_string());
        }
        if let Some(message) = message {
            argv.push("--comment".to_string());
            argv.push(format!("<b>{}</b>", message));
        }
        argv.extend(command.iter().cloned());
        Some(ElevationPlan {
            method: ElevationMethod::Kdesudo,
            argv,
        })
    } else if polkit {
        Some(pkexec_plan(command))
    } else {
        None
    };

    Ok(plan)
}

fn pkexec_plan(command: &[String]) -> ElevationPlan {
    let mut argv = vec![PKEXEC.to_string()];
    argv.extend(command.iter().cloned());
    ElevationPlan {
        method: ElevationMethod::Pkexec,
        argv,
    }
}

/// Runs `command` through pkexec and waits for it
pub fn pkexec(command: &[String]) -> Result<(), OsError> {
    if command.is_empty() {
        return Err(OsError::EmptyCommand);
    }
    pkexec_plan(command).execute()
}

/// Runs `command` as root with the best available method
///
/// Returns `Ok(false)` if nothing could elevate it.
pub fn run_with_admin_privs(
    command: &[String],
    message: Option<&str>,
    icon: Option<&str>,
    support_pkexec: bool,
) -> Result<bool, OsError> {
    match plan_elevation(&LiveSystem, command, message, icon, support_pkexec)? {
        Some(plan) => {
            plan.execute()?;
            Ok(true)
        }
        None => {
            tracing::warn!("No privilege elevation method available");
            Ok(false)
        }
    }
}
