//! Hidden path groups tool
//!
//! Checks, formats and queries hidden path groups files, using the same
//! loader a control service runs at startup.
//!
//! # Usage
//!
//! ```bash
//! # Validate one or more layered groups files
//! hp-groups check hp_groups.yml hp_groups.local.yml
//!
//! # Validate the files named in a service config, JSON output
//! hp-groups --config cs.yml check --json
//!
//! # Print the canonical (sorted) form of a groups file
//! hp-groups fmt hp_groups.yml
//!
//! # Show the groups in which an AS holds a role
//! hp-groups roles 1-ff00:0:111 hp_groups.yml
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use hiddenpath_groups::{GroupId, Groups, IsdAsn, Role, load_groups_layered};

use crate::config::ToolConfig;
use crate::error::CheckFailure;

/// Hidden path groups tool
#[derive(Parser, Debug)]
#[command(name = "hp-groups")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tool configuration (YAML); its `hidden_paths.groups_files` are used
    /// when a command is given no files
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate groups files (later files override earlier ones)
    Check {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical YAML form of validated groups files
    Fmt {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// List the groups in which an ISD-AS holds each role
    Roles {
        /// ISD-AS to look up, e.g. 1-ff00:0:110
        ia: IsdAsn,

        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = ToolConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { files, json } => {
            let files = resolve_files(files, &config)?;
            Ok(if check(&files, json) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Fmt { files } => {
            let files = resolve_files(files, &config)?;
            let groups = load(&files)?;
            print!(
                "{}",
                serde_saphyr::to_string(&groups).context("serializing groups")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Roles { ia, files } => {
            let files = resolve_files(files, &config)?;
            let groups = load(&files)?;
            print_roles(&groups, &ia);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Files from the command line, or from the config when none were given.
fn resolve_files(files: Vec<PathBuf>, config: &ToolConfig) -> Result<Vec<PathBuf>> {
    let files = if files.is_empty() {
        config.hidden_paths.groups_files.clone()
    } else {
        files
    };
    anyhow::ensure!(
        files.iter().any(|f| !f.as_os_str().is_empty()),
        "no groups files given and none configured in hidden_paths.groups_files"
    );
    Ok(files)
}

fn load(files: &[PathBuf]) -> Result<Groups> {
    load_groups_layered(files)?.context("no groups files to load")
}

/// Prints the outcome of loading `files`; returns whether they are valid.
fn check(files: &[PathBuf], json: bool) -> bool {
    tracing::info!(files = files.len(), "Checking hidden path groups");
    let result = load_groups_layered(files);

    let (groups, failure) = match &result {
        Ok(groups) => (groups.as_ref().map_or(0, Groups::len), None),
        Err(e) => (0, Some(CheckFailure::from_load_error(e))),
    };

    if json {
        print_json_result(files, groups, failure.as_ref());
    } else {
        print_result(files, groups, failure.as_ref());
    }

    failure.is_none()
}

fn print_json_result(files: &[PathBuf], groups: usize, failure: Option<&CheckFailure>) {
    let output = serde_json::json!({
        "files": files,
        "groups": groups,
        "ok": failure.is_none(),
        "error": failure,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize results: {e}"),
    }
}

fn print_result(files: &[PathBuf], groups: usize, failure: Option<&CheckFailure>) {
    let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    println!("  Files:  {}", names.join(", "));

    match failure {
        None => {
            println!(
                "{}",
                format!("\u{2713} {groups} hidden path groups loaded and validated").green()
            );
        }
        Some(failure) => {
            println!("{}", failure.format_human_readable().red());
            println!("{}", format!("\u{2717} {} stage failed", failure.stage).red().bold());
        }
    }
}

fn print_roles(groups: &Groups, ia: &IsdAsn) {
    for role in Role::ALL {
        let mut ids: Vec<GroupId> = groups.groups_with_role(ia, role).map(|g| g.id).collect();
        ids.sort_unstable();
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let label = format!("{role:<10}");
        if ids.is_empty() {
            println!("{} {}", label.bold(), "-".dimmed());
        } else {
            println!("{} {}", label.bold(), ids.join(", "));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn create_temp_yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_roles_command() {
        let cli =
            Cli::try_parse_from(["hp-groups", "-vv", "roles", "1-ff00:0:110", "a.yml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Roles { ia, files } = cli.command else {
            panic!("expected roles command");
        };
        assert_eq!(ia.to_string(), "1-ff00:0:110");
        assert_eq!(files, vec![PathBuf::from("a.yml")]);
    }

    #[test]
    fn test_parse_rejects_bad_ia() {
        assert!(Cli::try_parse_from(["hp-groups", "roles", "ff00:0:110"]).is_err());
    }

    #[test]
    fn test_resolve_files_falls_back_to_config() {
        let mut config = ToolConfig::default();
        assert!(resolve_files(vec![], &config).is_err());

        config.hidden_paths.groups_files = vec![PathBuf::from("cfg.yml")];
        assert_eq!(
            resolve_files(vec![], &config).unwrap(),
            vec![PathBuf::from("cfg.yml")]
        );
        assert_eq!(
            resolve_files(vec![PathBuf::from("cli.yml")], &config).unwrap(),
            vec![PathBuf::from("cli.yml")]
        );
    }

    #[test]
    fn test_check_exit_status() {
        let good = create_temp_yaml(
            r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:1"
    writers: ["1-ff00:0:2"]
    registries: ["1-ff00:0:1"]
"#,
        );
        let bad = create_temp_yaml(
            r#"
groups:
  ff00:0:1-1a:
    owner: "1-ff00:0:1"
    registries: ["1-ff00:0:1"]
"#,
        );

        assert!(check(&[good.path().to_path_buf()], true));
        assert!(!check(&[bad.path().to_path_buf()], false));
    }

    #[test]
    fn test_load_requires_files() {
        assert!(load(&[PathBuf::new()]).is_err());
    }
}
