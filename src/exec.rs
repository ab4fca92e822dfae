use std::process::Command;

use thiserror::Error;

/// Name of the display configuration tool
pub const XRANDR: &str = "xrandr";

/// Error type for external command execution
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Empty argument vector")]
    EmptyCommand,
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Status query failed: {0}")]
    QueryFailed(String),
    #[error("Command `{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },
}

type Result<T = ()> = std::result::Result<T, ExecError>;

/// Runs the display configuration tool
///
/// The argument vector is the program name followed by its flags. Success is
/// exit code 0 and yields the captured stdout.
pub trait Executor {
    fn run(&self, args: &[String]) -> Result<String>;
}

/// Executor that spawns the real process
///
/// Carries the environment overrides for every invocation; the status query
/// format is only stable with `LC_ALL=C`, so that override is set at
/// construction rather than mutated into the ambient environment.
pub struct XrandrRunner {
    env: Vec<(String, String)>,
}

impl XrandrRunner {
    pub fn new() -> Self {
        Self::with_env(vec![("LC_ALL".to_string(), "C".to_string())])
    }

    pub fn with_env(env: Vec<(String, String)>) -> Self {
        Self { env }
    }
}

impl Default for XrandrRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for XrandrRunner {
    fn run(&self, args: &[String]) -> Result<String> {
        let (program, flags) = args.split_first().ok_or(ExecError::EmptyCommand)?;
        let command = args.join(" ");
        log::debug!("Running `{}`", command);

        let mut invocation = Command::new(program);
        invocation.args(flags);
        for (key, value) in &self.env {
            invocation.env(key, value);
        }

        let output = invocation.output().map_err(|source| ExecError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("Command `{}` failed: {}", command, detail);
            return Err(ExecError::CommandFailed { command, detail });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Queries the current output status, returning the raw report text
pub fn query_status<E: Executor>(executor: &E) -> Result<String> {
    executor
        .run(&[XRANDR.to_string(), "--query".to_string()])
        .map_err(|err| match err {
            ExecError::CommandFailed { detail, .. } => ExecError::QueryFailed(detail),
            other => other,
        })
}
