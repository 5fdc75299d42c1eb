//! Desktop notification handler

use crate::payload::Payload;
use crate::result::DialogResult;
use dialog_core::config::{NotifyBackend, NotifyConfig};
use dialog_core::process::{Fallback, Invocation};

/// Default notification title
pub const DEFAULT_TITLE: &str = "Notice";

/// A notification to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification title
    pub title: String,
    /// Notification message/body
    pub message: String,
    /// Secondary line shown above the message (optional)
    pub subtitle: Option<String>,
    /// Whether to play a sound
    pub sound: bool,
}

impl Notification {
    /// Create a new notification with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            message: message.into(),
            subtitle: None,
            sound: true,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subtitle
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Disable sound
    pub fn silent(mut self) -> Self {
        self.sound = false;
        self
    }

    /// Build from a payload; `None` when `message` is missing or empty
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        let mut notif = Self::new(payload.non_empty_str("message")?);

        if let Some(title) = payload.str("title") {
            notif = notif.with_title(title);
        }

        if let Some(subtitle) = payload.non_empty_str("subtitle") {
            notif = notif.with_subtitle(subtitle);
        }

        if !payload.bool_or("sound", true) {
            notif = notif.silent();
        }

        Some(notif)
    }

    /// Message body with the subtitle, if any, on the line above
    pub fn body(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("{}\n{}", subtitle, self.message),
            None => self.message.clone(),
        }
    }

    /// Command line for the configured backend
    pub fn invocation(&self, config: &NotifyConfig) -> Invocation {
        let cmd = Invocation::new(config.program());
        match config.backend {
            NotifyBackend::NotifySend => cmd.args([self.title.clone(), self.body()]),
            NotifyBackend::Osascript => cmd.arg("-e").arg(self.applescript()),
        }
    }

    fn applescript(&self) -> String {
        let mut script = format!(
            r#"display notification "{}" with title "{}""#,
            escape_applescript(&self.body()),
            escape_applescript(&self.title)
        );

        if self.sound {
            script.push_str(r#" sound name "default""#);
        }

        script
    }
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', r#"\""#)
}

/// Show a notification described by the payload.
///
/// Without a `message` nothing is spawned and the result is a failure.
pub fn handle(payload: &Payload, config: &NotifyConfig) -> DialogResult {
    let Some(notif) = Notification::from_payload(payload) else {
        tracing::debug!("notify without message");
        return DialogResult::failed();
    };

    let invocation = notif.invocation(config);
    tracing::debug!(program = %invocation.program, title = %notif.title, "sending notification");
    Fallback::single(invocation).run().into()
}
