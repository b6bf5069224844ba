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

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use xapp_widgets::core::EditorOptions;
use xapp_widgets::os::{self, Session};
use xapp_widgets::{logging, ui};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show desktop session information
    Session,

    /// Run a command as root
    Elevate {
        /// Allow pkexec when a polkit agent is running
        #[arg(long)]
        pkexec: bool,

        /// Message shown by the authentication dialog
        #[arg(short, long)]
        message: Option<String>,

        /// Icon name for the authentication dialog
        #[arg(short, long)]
        icon: Option<String>,

        /// Program and arguments
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Launch the list editor demo
    Demo {
        /// JSON file with editor options
        #[arg(short, long)]
        options: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Session => show_session(),
        Commands::Elevate {
            pkexec,
            message,
            icon,
            command,
        } => elevate(&command, message.as_deref(), icon.as_deref(), pkexec)?,
        Commands::Demo { options } => {
            let options = options.as_deref().map(load_options).transpose()?;
            let code = ui::run_demo(options);
            if code != glib::ExitCode::SUCCESS {
                anyhow::bail!("Demo exited with an error");
            }
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

/// Print session checks
fn show_session() {
    let desktop = os::current_desktop();
    let desktop = match desktop {
        Session::Unknown => desktop.to_string().yellow(),
        known => known.to_string().cyan().bold(),
    };

    println!("{}", "Session".bold());
    println!("  {} Desktop:  {}", "→".cyan(), desktop);
    println!("  {} Live:     {}", "→".cyan(), yes_no(os::is_live_session()));
    println!("  {} Guest:    {}", "→".cyan(), yes_no(os::is_guest_session()));
    println!("  {} Polkit:   {}", "→".cyan(), yes_no(os::is_polkit_running()));
}

/// Run a command with the best elevation method
fn elevate(
    command: &[String],
    message: Option<&str>,
    icon: Option<&str>,
    support_pkexec: bool,
) -> anyhow::Result<()> {
    if os::run_with_admin_privs(command, message, icon, support_pkexec)? {
        println!("{} Launched {}", "✓".green(), command.join(" "));
    } else {
        println!("{}", "✗ No privilege elevation method available".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

/// Read editor options from a JSON file
fn load_options(path: &Path) -> anyhow::Result<EditorOptions> {
    // Expand tilde in path
    let expanded_path = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    let path = Path::new(expanded_path.as_ref());

    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let options = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid options in {}: {}", path.display(), e))?;

    println!("{} Loaded options from {}", "✓".green(), path.display());
    Ok(options)
}
