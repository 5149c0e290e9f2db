//! Command-line driver for directory management on Synology NAS hosts.
//!
//! Usage:
//!   nasdir --ip 192.168.100.101 create --share /apitesting --target sub1
//!   nasdir --ip 192.168.100.101 delete --target /apitesting/a --target /apitesting/b
//!
//! A repeated flag sends an array, a single flag sends a scalar.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

use nasdir::manager::{
    CreateDirectoryRequest, DeleteDirectoryRequest, MoveDirectoryRequest, RenameDirectoryRequest,
};
use nasdir::{Config, DirectoryManager, PathInput};

#[derive(Parser)]
#[command(name = "nasdir")]
#[command(about = "Create, delete, move and rename directories on Synology NAS hosts")]
struct Cli {
    /// NAS address, must be listed in the config address book
    #[arg(long, required = true)]
    ip: String,

    /// TOML config file (falls back to NASDIR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create directories under shared folders
    Create {
        /// Shared folder, starting with '/'
        #[arg(long = "share", required = true)]
        shared_folder: Vec<String>,
        /// Directory path relative to the shared folder
        #[arg(long = "target", required = true)]
        target_folder: Vec<String>,
    },
    /// Delete existing directories recursively
    Delete {
        #[arg(long = "target", required = true)]
        target_folder: Vec<String>,
    },
    /// Move directories to new absolute paths
    Move {
        #[arg(long = "target", required = true)]
        target_folder: Vec<String>,
        #[arg(long = "dest", required = true)]
        dest_folder_path: Vec<String>,
    },
    /// Rename directories in place
    Rename {
        #[arg(long = "target", required = true)]
        target_folder: Vec<String>,
        #[arg(long = "name", required = true)]
        changed_name_into: Vec<String>,
    },
    /// List shared folders
    Shares,
    /// List the children of a folder
    Ls {
        path: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nasdir=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn path_input(mut values: Vec<String>) -> PathInput {
    if values.len() == 1 {
        PathInput::One(values.remove(0))
    } else {
        PathInput::Many(values)
    }
}

fn print_json<T: Serialize>(value: &T) -> nasdir::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> nasdir::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let manager = DirectoryManager::new(config)?;
    let ip_address = cli.ip;

    match cli.command {
        Commands::Create {
            shared_folder,
            target_folder,
        } => {
            let request = CreateDirectoryRequest {
                ip_address,
                shared_folder: path_input(shared_folder),
                target_folder: path_input(target_folder),
            };
            print_json(&manager.create(&request).await?)
        }
        Commands::Delete { target_folder } => {
            let request = DeleteDirectoryRequest {
                ip_address,
                target_folder: path_input(target_folder),
            };
            print_json(&manager.delete(&request).await?)
        }
        Commands::Move {
            target_folder,
            dest_folder_path,
        } => {
            let request = MoveDirectoryRequest {
                ip_address,
                target_folder: path_input(target_folder),
                dest_folder_path: path_input(dest_folder_path),
            };
            print_json(&manager.move_directory(&request).await?)
        }
        Commands::Rename {
            target_folder,
            changed_name_into,
        } => {
            let request = RenameDirectoryRequest {
                ip_address,
                target_folder: path_input(target_folder),
                changed_name_into: path_input(changed_name_into),
            };
            print_json(&manager.rename(&request).await?)
        }
        Commands::Shares => print_json(&manager.list_shares(&ip_address).await?),
        Commands::Ls { path } => print_json(&manager.list_folder(&ip_address, &path).await?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_ip_is_usage_error() {
        let err = Cli::try_parse_from(["nasdir", "delete", "--target", "/s/a"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_repeated_flags_build_arrays() {
        let cli = Cli::try_parse_from([
            "nasdir", "--ip", "192.168.100.101", "delete", "--target", "/s/a", "--target", "/s/b",
        ])
        .unwrap();
        assert_eq!(cli.ip, "192.168.100.101");
        let Commands::Delete { target_folder } = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(path_input(target_folder), PathInput::from(vec!["/s/a", "/s/b"]));
        assert_eq!(path_input(vec!["/s/a".to_string()]), PathInput::from("/s/a"));
    }
}
