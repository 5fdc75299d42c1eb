//! Command results and their emission to stdout

use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Exit status when the UI cannot be loaded
pub const UI_LOAD_FAILURE_EXIT: i32 = -1;

/// Result object written to stdout; always carries `success`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogResult {
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DialogResult {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            extra: Map::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(true)
    }

    pub fn failed() -> Self {
        Self::new(false)
    }

    /// Attach an additional field
    #[cfg(test)]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Compact single-line JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<bool> for DialogResult {
    fn from(success: bool) -> Self {
        Self::new(success)
    }
}

/// Terminal state of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Built by a headless or subprocess handler; exit status follows `success`
    Reply(DialogResult),
    /// JSON text reported by the UI, passed through verbatim
    UiReply(String),
    /// The UI never came up; nothing goes to stdout
    UiLoadFailure(String),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Reply(result) if result.success => 0,
            Self::Reply(_) => 1,
            // failure is reported inside the JSON body, not the status
            Self::UiReply(_) => 0,
            Self::UiLoadFailure(_) => UI_LOAD_FAILURE_EXIT,
        }
    }

    /// Write the outcome and return the exit status to terminate with
    pub fn emit<O: Write, E: Write>(&self, stdout: &mut O, stderr: &mut E) -> io::Result<i32> {
        match self {
            Self::Reply(result) => {
                let line = result.to_json().map_err(io::Error::other)?;
                writeln!(stdout, "{}", line)?;
                stdout.flush()?;
            }
            Self::UiReply(json) => {
                writeln!(stdout, "{}", json)?;
                stdout.flush()?;
            }
            Self::UiLoadFailure(reason) => {
                writeln!(stderr, "Failed to load UI: {}", reason)?;
            }
        }
        Ok(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(outcome: &Outcome) -> (String, String, i32) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = outcome.emit(&mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            code,
        )
    }

    #[test]
    fn test_success_reply() {
        let (out, err, code) = emit(&Outcome::Reply(DialogResult::ok()));
        assert_eq!(out, "{\"success\":true}\n");
        assert!(err.is_empty());
        assert_eq!(code, 0);
    }

    #[test]
    fn test_failed_reply_exits_one() {
        let (out, _, code) = emit(&Outcome::Reply(DialogResult::failed()));
        assert_eq!(out, "{\"success\":false}\n");
        assert_eq!(code, 1);
    }

    #[test]
    fn test_extra_fields_follow_success() {
        let result = DialogResult::ok().with("text", "typed").with("cancelled", false);
        assert_eq!(
            result.to_json().unwrap(),
            r#"{"success":true,"cancelled":false,"text":"typed"}"#
        );
    }

    #[test]
    fn test_ui_reply_is_verbatim_and_exits_zero() {
        let json = r#"{"confirmed":false,"cancelled":true}"#;
        let (out, _, code) = emit(&Outcome::UiReply(json.to_string()));
        assert_eq!(out, format!("{}\n", json));
        assert_eq!(code, 0);
    }

    #[test]
    fn test_ui_load_failure_writes_stderr_only() {
        let (out, err, code) = emit(&Outcome::UiLoadFailure("missing Main.qml".into()));
        assert!(out.is_empty());
        assert!(err.contains("missing Main.qml"));
        assert_eq!(code, UI_LOAD_FAILURE_EXIT);
    }

    #[test]
    fn test_repeated_emission_is_identical() {
        let outcome = Outcome::Reply(DialogResult::ok().with("b", 1).with("a", 2));
        assert_eq!(emit(&outcome), emit(&outcome));
    }
}
