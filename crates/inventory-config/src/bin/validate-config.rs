//! Config validation CLI tool
//!
//! Validates an inventory configuration file and reports any errors.

use inventory_util::{default_config_path, default_store_path};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates an inventory configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    // Check file exists
    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match inventory_config::load_config(&config_path) {
        Ok(settings) => {
            let store_path = settings
                .store
                .path
                .clone()
                .unwrap_or_else(default_store_path);

            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", inventory_config::CURRENT_CONFIG_VERSION);
            println!("  Store: {}", store_path.display());
            println!("  Id policy: {}", settings.store.id_policy);
            println!("  Locking: {}", if settings.store.lock { "on" } else { "off" });
            if let Some(level) = &settings.log_level {
                println!("  Log level: {}", level);
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                inventory_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                inventory_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                inventory_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                inventory_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        inventory_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
