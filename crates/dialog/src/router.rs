//! Command name to handling path

/// Commands fulfilled by an external OS executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubprocessCommand {
    Notify,
    Speech,
}

/// How a command is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Answered immediately, no external resource
    Headless,
    /// Delegated to an OS executable, blocking until it exits
    Subprocess(SubprocessCommand),
    /// Rendered as an interactive dialog
    Ui,
}

/// Dialog commands the renderer is known to implement
pub const DIALOG_COMMANDS: &[&str] = &["confirm", "choose", "textInput", "questions"];

impl Route {
    /// Select the handling path for a command name.
    ///
    /// Total: any name not listed here is handed to the UI.
    pub fn for_command(command: &str) -> Self {
        match command {
            "pulse" => Self::Headless,
            "notify" => Self::Subprocess(SubprocessCommand::Notify),
            "tts" | "speak" => Self::Subprocess(SubprocessCommand::Speech),
            other => {
                if !DIALOG_COMMANDS.contains(&other) {
                    tracing::debug!(command = other, "unrecognised command, delegating to UI");
                }
                Self::Ui
            }
        }
    }
}
