//! Command-line host for the variables editor.
//!
//! Loads the document at the given URI, applies one command to its
//! variables and, for editing commands, saves it back.
//!
//! # Logging
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` to see
//! the HTTP traffic.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use vars_editor::config::{load_config_file, update_config};
use vars_editor::executor::ExecutionConfig;
use vars_editor::session::{open_editor, EditorSession, LogNotifier};

#[derive(Debug, Parser)]
#[command(name = "vars-editor", version, about = "Edit the variables of a REST document")]
struct Cli {
    /// Settings file with a "vars-editor" section
    #[arg(long)]
    config: Option<PathBuf>,

    /// Username for HTTP Basic authentication
    #[arg(long, short)]
    user: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long, short, requires = "user")]
    password: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// URI of the document
    uri: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all variables, including inherited ones
    Show,

    /// Print the variables a save would submit
    Export,

    /// Set a variable; the value is parsed as JSON, or taken as text
    Set { key: String, value: String },

    /// Remove a variable
    Unset { key: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if let Err(e) = load_config_file(path) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    update_config(|config| {
        if let Some(user) = &cli.user {
            config.username = Some(user.clone());
            config.password = cli.password.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.timeout = timeout;
        }
    });

    let execution_config = ExecutionConfig::from_global_config();
    let mut session = match open_editor(&cli.uri, &execution_config, Arc::new(LogNotifier)).await
    {
        Ok(session) => session,
        Err(_) => return ExitCode::FAILURE,
    };

    match cli.command {
        Command::Show => {
            show(&session);
            ExitCode::SUCCESS
        }
        Command::Export => {
            let vars = Value::Object(session.variables().to_vars());
            match serde_json::to_string_pretty(&vars) {
                Ok(text) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Set { key, value } => {
            session
                .variables_mut()
                .set_variable(&key, &parse_value(&value));
            save(&mut session).await
        }
        Command::Unset { key } => {
            if session.variables_mut().remove_variable(&key) == 0 {
                eprintln!("No variable named '{}'", key);
                return ExitCode::FAILURE;
            }
            save(&mut session).await
        }
    }
}

/// Parses a command-line value as JSON, falling back to plain text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn show(session: &EditorSession) {
    for entry in session.variables().iter() {
        let value = entry.value().to_json();
        match entry.origin() {
            Some(origin) => {
                let source = origin
                    .resolve_href(session.uri())
                    .map(|url| url.to_string())
                    .unwrap_or_else(|| origin.tag.clone());
                println!(
                    "{} ({}) = {}  [inherited from {}]",
                    entry.key(),
                    entry.kind(),
                    value,
                    source
                );
            }
            None => println!("{} ({}) = {}", entry.key(), entry.kind(), value),
        }
    }
}

async fn save(session: &mut EditorSession) -> ExitCode {
    match session.save().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
