//! Synchronous subprocess invocation with ordered fallback

use crate::error::{DialogError, Result};
use std::process::{Command, Stdio};

/// A single external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run to completion and report whether it exited zero.
    ///
    /// Stdout is discarded: the launcher's own stdout carries exactly one
    /// JSON line and a child must not write into it.
    pub fn run(&self) -> Result<bool> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|source| DialogError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(program = %self.program, %status, "subprocess exited");
        Ok(status.success())
    }
}

/// Ordered list of candidate invocations, tried until one succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fallback {
    candidates: Vec<Invocation>,
}

impl Fallback {
    pub fn new(candidates: Vec<Invocation>) -> Self {
        Self { candidates }
    }

    pub fn single(invocation: Invocation) -> Self {
        Self::new(vec![invocation])
    }

    pub fn candidates(&self) -> &[Invocation] {
        &self.candidates
    }

    /// Try each candidate in order; true as soon as one exits zero.
    ///
    /// A candidate that cannot be spawned counts as a failed attempt.
    pub fn run(&self) -> bool {
        for invocation in &self.candidates {
            match invocation.run() {
                Ok(true) => return true,
                Ok(false) => {
                    tracing::debug!(program = %invocation.program, "exited non-zero, trying next");
                }
                Err(e) => {
                    tracing::debug!("{}, trying next", e);
                }
            }
        }
        false
    }
}
