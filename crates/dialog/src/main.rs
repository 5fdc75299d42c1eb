//! consult-user-dialog - dialog, notification and speech launcher
//!
//! Prints exactly one JSON line on stdout and exits with:
//! 0 on success, 1 on usage error or subprocess failure, -1 when the UI
//! cannot be loaded.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use consult_dialog::payload::EMPTY_PAYLOAD;
use consult_dialog::{usage, Launcher, Payload, APP_NAME, CLIENT_NAME_ENV};
use dialog_core::{AppInfo, Config};

#[derive(Parser)]
#[command(name = "consult-user-dialog")]
#[command(version)]
#[command(about = "Show a dialog, notification or spoken message and report the result as JSON")]
#[command(after_help = r#"COMMANDS:
    pulse                 Liveness check, replies {"success":true}
    notify                Desktop notification: message, [title], [subtitle], [sound]
    tts, speak            Speak text: text, [voice], [rate]
    confirm, choose,      Interactive dialogs rendered by the UI engine
    textInput, questions

EXAMPLES:
    consult-user-dialog pulse
    consult-user-dialog notify '{"message":"Build complete","title":"CI"}'
    consult-user-dialog tts '{"text":"Tests passed","rate":180}'
"#)]
struct Cli {
    /// Command to run
    command: Option<String>,

    /// JSON object with the command's parameters
    #[arg(allow_hyphen_values = true)]
    payload: Option<String>,
}

fn main() {
    // Logs go to stderr; stdout is reserved for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(e) => {
            tracing::debug!("argument error: {}", e);
            return Ok(usage_error());
        }
    };

    let Some(command) = cli.command else {
        return Ok(usage_error());
    };

    let app = AppInfo::new(APP_NAME, env!("CARGO_PKG_VERSION"));
    let config = Config::load_or_default();
    let client_name = std::env::var(CLIENT_NAME_ENV)
        .ok()
        .filter(|name| !name.is_empty());

    let mut launcher = Launcher::new(app, config);
    if let Some(name) = client_name {
        launcher = launcher.with_client_name(name);
    }

    let payload = Payload::parse(cli.payload.as_deref().unwrap_or(EMPTY_PAYLOAD));
    let outcome = launcher.run(&command, payload);

    outcome
        .emit(&mut std::io::stdout().lock(), &mut std::io::stderr().lock())
        .context("failed to write result")
}

fn usage_error() -> i32 {
    eprintln!("{}", usage());
    1
}
