//! External command plumbing shared by renderers and the dereferencer
//!
//! Commands are configured as whitespace-separated lines whose arguments may
//! contain `{source}` and `{output}` placeholders. Each invocation blocks the
//! calling task until the child exits; there is no timeout.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{bail, Result};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

const SOURCE_PLACEHOLDER: &str = "{source}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A configured external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

/// Captured output of a command that exited successfully
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// stdout followed by stderr, lossily decoded
    pub fn combined(&self) -> String {
        combine(&self.stdout, &self.stderr)
    }
}

/// Why a command did not complete successfully
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Exit {
        program: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

impl CommandFailure {
    /// Captured stderr, empty for spawn failures
    pub fn stderr(&self) -> &str {
        match self {
            CommandFailure::Spawn { .. } => "",
            CommandFailure::Exit { stderr, .. } => stderr,
        }
    }

    /// Everything the child printed, stdout first
    pub fn combined_output(&self) -> String {
        match self {
            CommandFailure::Spawn { .. } => String::new(),
            CommandFailure::Exit { stdout, stderr, .. } => {
                combine(stdout.as_bytes(), stderr.as_bytes())
            }
        }
    }
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: None,
        }
    }

    /// Parse a whitespace-separated command line
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("command line is empty");
        };
        Ok(Self::new(program, parts))
    }

    /// Run the command from `dir` instead of the process working directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Arguments with placeholders replaced
    pub fn resolve_args(&self, source: &Path, output: Option<&Path>) -> Vec<String> {
        let source = source.to_string_lossy();
        let output = output.map(|p| p.to_string_lossy());

        self.args
            .iter()
            .map(|arg| {
                let arg = arg.replace(SOURCE_PLACEHOLDER, &source);
                match &output {
                    Some(output) => arg.replace(OUTPUT_PLACEHOLDER, output),
                    None => arg,
                }
            })
            .collect()
    }

    /// Spawn the command and wait for it to exit.
    ///
    /// Exit status 0 is required; anything else becomes a
    /// [`CommandFailure`] carrying the captured streams.
    pub async fn run(
        &self,
        source: &Path,
        output: Option<&Path>,
    ) -> Result<CommandOutput, CommandFailure> {
        let args = self.resolve_args(source, output);
        debug!(program = %self.program, ?args, cwd = ?self.current_dir, "Running command");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let result = command.output().await.map_err(|source| CommandFailure::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !result.status.success() {
            return Err(CommandFailure::Exit {
                program: self.program.clone(),
                status: result.status,
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        Ok(CommandOutput {
            stdout: result.stdout,
            stderr: result.stderr,
        })
    }
}

fn combine(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(stderr));
    text
}
