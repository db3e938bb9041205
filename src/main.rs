//! audit-scribe - Command-line front end for the audit logger.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audit_scribe::config::Settings;
use audit_scribe::error::AuditError;
use audit_scribe::logger::AuditLogger;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

const DEFAULT_CONFIG_PATH: &str = "/etc/scribe/audit.toml";

fn main() -> ExitCode {
    // Parse command line arguments (simple std::env approach)
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    init_logging();

    // Load configuration
    let settings = match load_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let logger = match AuditLogger::new(&settings) {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to initialize audit logger");
            return ExitCode::FAILURE;
        }
    };

    let metadata = match get_metadata(&args) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let compress = args.iter().any(|a| a == "--compress" || a == "-z");

    // With no message argument, record a startup entry
    let result = match get_message(&args) {
        Some(message) => logger.log(message.as_str(), metadata, compress),
        None => logger.log(
            "Systemstart",
            Some(serde_json::json!({"version": VERSION})),
            compress,
        ),
    };

    match result {
        Ok(()) => {
            info!(path = %logger.log_path().display(), "Audit entry written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to write audit entry");
            ExitCode::FAILURE
        }
    }
}

/// Load settings from --config, the default path, or built-in defaults.
///
/// An explicitly given config file must exist; the default path is optional.
fn load_settings(args: &[String]) -> Result<Settings, AuditError> {
    if let Some(path) = get_config_path(args) {
        return Settings::load(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Settings::load(DEFAULT_CONFIG_PATH);
    }

    let mut settings = Settings::default();
    settings.apply_debug_env();
    settings.validate()?;
    Ok(settings)
}

/// Get configuration file path from command line arguments.
fn get_config_path(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if (arg == "--config" || arg == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Parse the --metadata argument as a JSON object.
fn get_metadata(args: &[String]) -> Result<Option<serde_json::Value>, AuditError> {
    let raw = args.iter().enumerate().find_map(|(i, arg)| {
        if (arg == "--metadata" || arg == "-m") && i + 1 < args.len() {
            Some(args[i + 1].clone())
        } else {
            arg.strip_prefix("--metadata=").map(String::from)
        }
    });

    match raw {
        None => Ok(None),
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(&raw).map_err(|e| AuditError::Config {
                    message: format!("Invalid metadata JSON: {}", e),
                })?;
            if !value.is_object() {
                return Err(AuditError::Config {
                    message: "Metadata must be a JSON object".to_string(),
                });
            }
            Ok(Some(value))
        }
    }
}

/// First positional argument: the message to log.
fn get_message(args: &[String]) -> Option<String> {
    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--config" || arg == "-c" || arg == "--metadata" || arg == "-m" {
            i += 2;
            continue;
        }
        if arg.starts_with('-') {
            i += 1;
            continue;
        }
        return Some(arg.clone());
    }
    None
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Structured audit logging to a size-rotated JSON file.

USAGE:
    {} [OPTIONS] [MESSAGE]

ARGS:
    MESSAGE                Message to log; a startup entry is written
                           when omitted

OPTIONS:
    -c, --config <PATH>    Path to configuration file
                           [default: {}]
    -m, --metadata <JSON>  Metadata object stored with the entry
    -z, --compress         Compress the message payload
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME, DEFAULT_CONFIG_PATH
    );
}

/// Initialize diagnostic logging.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}
