//! UI delegate
//!
//! Dialog commands are rendered by an external declarative engine. The
//! engine receives a [`UiContext`] and a [`ReplyHandle`]; the handle can be
//! resolved exactly once, and the launcher waits on it before emitting.
//! There is no timeout: the wait ends when the engine replies, when it
//! gives up the handle, or when the process is killed.

use crate::payload::Payload;
use crate::result::Outcome;
use dialog_core::config::UiConfig;
use dialog_core::{AppInfo, DialogError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::oneshot;

/// Everything the renderer is told about the request
#[derive(Debug, Clone, PartialEq)]
pub struct UiContext {
    pub app_name: String,
    pub command: String,
    pub payload: Payload,
    pub version: String,
    pub client_name: String,
    pub position: Option<String>,
}

impl UiContext {
    /// Build the context; a configured position wins over the payload's
    pub fn new(
        command: &str,
        payload: Payload,
        app: &AppInfo,
        client_name: &str,
        preferred_position: Option<&str>,
    ) -> Self {
        let position = preferred_position
            .or_else(|| payload.non_empty_str("position"))
            .map(str::to_string);

        Self {
            app_name: app.name.clone(),
            command: command.to_string(),
            payload,
            version: app.version.clone(),
            client_name: client_name.to_string(),
            position,
        }
    }

    /// Context as environment variables for a renderer process
    pub fn env(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("CLI_NAME", self.app_name.clone()),
            ("CLI_COMMAND", self.command.clone()),
            ("CLI_PAYLOAD", self.payload.to_json()),
            ("CLI_VERSION", self.version.clone()),
            ("MCP_CLIENT_NAME", self.client_name.clone()),
        ];
        if let Some(position) = &self.position {
            vars.push(("CLI_POSITION", position.clone()));
        }
        vars
    }
}

/// Single-use result callback handed to the engine
#[derive(Debug)]
pub struct ReplyHandle(oneshot::Sender<String>);

impl ReplyHandle {
    /// Report the dialog's JSON result. Consumes the handle.
    pub fn emit_json(self, json: impl Into<String>) {
        // receiver only disappears once the launcher is exiting
        let _ = self.0.send(json.into());
    }
}

/// A declarative rendering engine
pub trait UiEngine {
    /// Construct the top-level UI for `context`.
    ///
    /// Returns an error if the UI cannot be constructed. On success the
    /// engine owns `reply` and resolves it when the user is done.
    fn load(&self, context: &UiContext, reply: ReplyHandle) -> Result<()>;
}

/// Hand the request to the engine and wait for its single reply
pub async fn present(engine: &dyn UiEngine, context: UiContext) -> Outcome {
    let (tx, rx) = oneshot::channel();

    // the emitter prints the stderr line for load failures
    if let Err(e) = engine.load(&context, ReplyHandle(tx)) {
        tracing::debug!(command = %context.command, "{}", e);
        return Outcome::UiLoadFailure(e.to_string());
    }

    match rx.await {
        Ok(json) => Outcome::UiReply(json),
        Err(_) => {
            let e = DialogError::UiClosed;
            tracing::debug!(command = %context.command, "{}", e);
            Outcome::UiLoadFailure(e.to_string())
        }
    }
}

/// Engine that runs an external renderer process, e.g. `qml Main.qml`.
///
/// The context is passed through the environment. The first stdout line
/// that parses as JSON is taken as the reply; blank and log lines before
/// it are skipped. The renderer is stopped before the reply is released,
/// so it never outlives the launcher.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    program: String,
    entry: PathBuf,
}

impl ProcessRenderer {
    pub fn new(program: impl Into<String>, entry: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            entry: entry.into(),
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.program.as_str(), config.entry())
    }
}

impl UiEngine for ProcessRenderer {
    fn load(&self, context: &UiContext, reply: ReplyHandle) -> Result<()> {
        if !self.entry.exists() {
            return Err(DialogError::UiLoad(format!(
                "missing resource {}",
                self.entry.display()
            )));
        }

        let mut child = Command::new(&self.program)
            .arg(&self.entry)
            .envs(context.env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DialogError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DialogError::UiLoad("renderer stdout unavailable".to_string()))?;

        tracing::debug!(program = %self.program, entry = %self.entry.display(), "renderer started");

        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(json) = reply_line(&line) else {
                            tracing::debug!(%line, "ignoring non-JSON renderer output");
                            continue;
                        };
                        if let Err(e) = child.kill().await {
                            tracing::debug!("stopping renderer: {}", e);
                        }
                        reply.emit_json(json);
                        return;
                    }
                    Ok(None) => {
                        // dropping `reply` closes the channel
                        let status = child.wait().await;
                        tracing::debug!(?status, "renderer exited without a result");
                        return;
                    }
                    Err(e) => {
                        tracing::debug!("reading renderer output: {}", e);
                        return;
                    }
                }
            }
        });

        Ok(())
    }
}

/// A renderer line that carries the reply: non-blank and valid JSON
fn reply_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || serde_json::from_str::<serde_json::Value>(line).is_err() {
        return None;
    }
    Some(line)
}
