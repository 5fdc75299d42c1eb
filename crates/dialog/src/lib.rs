//! consult-dialog - command launcher for user-consultation dialogs
//!
//! `consult-user-dialog <command> [json]` routes a command to one of three
//! paths and prints exactly one JSON line:
//! - `pulse` answers immediately
//! - `notify`, `tts` (alias `speak`) run a desktop executable
//! - everything else is rendered by the UI engine

pub mod notify;
pub mod payload;
pub mod result;
pub mod router;
pub mod speech;
pub mod ui;

pub use payload::Payload;
pub use result::{DialogResult, Outcome};
pub use router::{Route, SubprocessCommand};

use dialog_core::{AppInfo, Config};
use ui::{ProcessRenderer, UiContext, UiEngine};

/// Program name reported in usage and to the renderer
pub const APP_NAME: &str = "consult-user-dialog";

/// Environment variable naming the calling client
pub const CLIENT_NAME_ENV: &str = "MCP_CLIENT_NAME";

/// Client name when the caller does not set one
pub const DEFAULT_CLIENT_NAME: &str = "MCP";

pub fn usage() -> String {
    format!("Usage: {} <command> [json]", APP_NAME)
}

/// Dispatches one command with a fixed identity and configuration
pub struct Launcher {
    app: AppInfo,
    config: Config,
    client_name: String,
    engine: Box<dyn UiEngine>,
}

impl Launcher {
    pub fn new(app: AppInfo, config: Config) -> Self {
        let engine = Box::new(ProcessRenderer::from_config(&config.ui));
        Self {
            app,
            config,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            engine,
        }
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Replace the rendering engine
    pub fn with_engine(mut self, engine: Box<dyn UiEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Run `command` to completion.
    ///
    /// Subprocess commands block the calling thread. The UI path drives a
    /// current-thread runtime until the engine replies.
    pub fn run(&self, command: &str, payload: Payload) -> Outcome {
        let route = Route::for_command(command);
        tracing::debug!(command, ?route, "dispatching");

        match route {
            Route::Headless => Outcome::Reply(DialogResult::ok()),
            Route::Subprocess(SubprocessCommand::Notify) => {
                Outcome::Reply(notify::handle(&payload, &self.config.notify))
            }
            Route::Subprocess(SubprocessCommand::Speech) => {
                Outcome::Reply(speech::handle(&payload, &self.config))
            }
            Route::Ui => self.run_ui(command, payload),
        }
    }

    fn run_ui(&self, command: &str, payload: Payload) -> Outcome {
        let context = UiContext::new(
            command,
            payload,
            &self.app,
            &self.client_name,
            self.config.defaults.position.as_deref(),
        );

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::debug!("failed to start UI event loop: {}", e);
                return Outcome::UiLoadFailure(e.to_string());
            }
        };

        runtime.block_on(ui::present(self.engine.as_ref(), context))
    }
}
