//! Runs an external command for the routed generator.
//!
//! Each target maps to a program plus arguments. The command runs in the
//! destination folder, receives the answer set as a JSON object on stdin and
//! the target id in `SYMGEN_TARGET`. Its stdout and stderr pass through.

use std::{
    collections::HashMap,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use symgen_core::{
    application::{ApplicationError, ports::GeneratorInvoker},
    domain::DispatchDecision,
    error::{Context, SymgenResult},
};

/// Environment variable carrying the routed target id.
pub const TARGET_ENV: &str = "SYMGEN_TARGET";

/// Program and arguments for one generator target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl GeneratorCommand {
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
}

impl std::fmt::Display for GeneratorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Production invoker backed by `std::process::Command`.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    commands: HashMap<String, GeneratorCommand>,
    working_dir: PathBuf,
}

impl CommandInvoker {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            commands: HashMap::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_commands(mut self, commands: HashMap<String, GeneratorCommand>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn with_command(mut self, target: impl Into<String>, command: GeneratorCommand) -> Self {
        self.commands.insert(target.into(), command);
        self
    }

    pub fn command_for(&self, target: &str) -> Option<&GeneratorCommand> {
        self.commands.get(target)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl GeneratorInvoker for CommandInvoker {
    #[instrument(skip_all, fields(target_id = %decision.target))]
    fn invoke(&self, decision: &DispatchDecision) -> SymgenResult<()> {
        let target = decision.target.as_str();
        let command = self
            .command_for(target)
            .ok_or_else(|| ApplicationError::GeneratorNotConfigured {
                target: target.to_string(),
            })?;

        std::fs::create_dir_all(&self.working_dir).map_err(|e| {
            ApplicationError::WorkspaceError {
                path: self.working_dir.clone(),
                reason: format!("Failed to create directory: {e}"),
            }
        })?;

        let payload =
            serde_json::to_vec(&decision.parameters).context("serializing generator parameters")?;

        info!(command = %command, dir = %self.working_dir.display(), "starting generator");
        let failed = |reason: String| ApplicationError::GeneratorFailed {
            target: target.to_string(),
            reason,
        };

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.working_dir)
            .env(TARGET_ENV, target)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| failed(format!("could not start '{}': {e}", command.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = send_parameters(&mut stdin, &payload) {
                warn!(error = %e, "failed to write generator parameters");
                drop(stdin);
                if let Err(kill) = child.kill() {
                    debug!(error = %kill, "generator already exited");
                }
                let _ = child.wait();
                return Err(failed(format!("could not send parameters: {e}")).into());
            }
        }

        let status = child
            .wait()
            .map_err(|e| failed(format!("could not wait for generator: {e}")))?;

        if status.success() {
            debug!("generator finished");
            Ok(())
        } else {
            Err(failed(format!("exited with {status}")).into())
        }
    }
}

/// Write the whole payload to the generator's stdin.
///
/// A generator that closes stdin without reading is not an error; any other
/// write failure is.
fn send_parameters(stdin: &mut impl Write, payload: &[u8]) -> io::Result<()> {
    match stdin.write_all(payload).and_then(|()| stdin.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("generator closed stdin early");
            Ok(())
        }
        other => other,
    }
}
