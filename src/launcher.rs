use crate::command::{CommandSpec, ExecutionOutcome, ExitCode, Streams};
use crate::error::{Result, ShellError};
use crate::redirect::Redirection;
use std::fs::File;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Run a command with its redirections and wait for it.
///
/// An empty command succeeds without spawning anything. Failures to open a
/// redirection file or to start the program come back as a failed outcome with
/// status 1; a program that runs and exits non-zero is a plain status.
pub fn execute(
    command: &CommandSpec,
    input: Option<&Path>,
    output: Option<&Path>,
    streams: Streams<'_>,
) -> ExecutionOutcome {
    match run(command, input, output, streams) {
        Ok(status) => ExecutionOutcome::exited(status),
        Err(err) => ExecutionOutcome::failed(err),
    }
}

/// [`execute`] for a [`Redirection`] produced by [`crate::redirect::extract`].
pub fn execute_redirected(redirection: &Redirection, streams: Streams<'_>) -> ExecutionOutcome {
    execute(
        &redirection.command,
        redirection.input.as_deref(),
        redirection.output.as_deref(),
        streams,
    )
}

fn run(
    command: &CommandSpec,
    input: Option<&Path>,
    output: Option<&Path>,
    streams: Streams<'_>,
) -> Result<ExitCode> {
    let Some(program) = command.program() else {
        return Ok(0);
    };

    let stdin = match input {
        Some(path) => Stdio::from(File::open(path).map_err(|source| ShellError::OpenInput {
            path: path.to_owned(),
            source,
        })?),
        None => Stdio::inherit(),
    };
    let stdout = match output {
        Some(path) => Stdio::from(File::create(path).map_err(|source| {
            ShellError::CreateOutput {
                path: path.to_owned(),
                source,
            }
        })?),
        None => streams.stdout_stdio()?,
    };
    let stderr = streams.stderr_stdio()?;

    debug!(program, args = ?command.args(), ?input, ?output, "spawning");
    // The Command owns the redirection files and is dropped once spawned, so
    // the parent's copies are closed before we block on the child.
    let mut child = Command::new(program)
        .args(command.args())
        .stdin(stdin)
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(|source| ShellError::Spawn {
            program: program.to_owned(),
            source,
        })?;

    let exit_status = child.wait().map_err(|source| ShellError::Wait {
        program: program.to_owned(),
        source,
    })?;
    let code = status_code(exit_status);
    debug!(program, code, "exited");
    Ok(code)
}

/// Map an [`ExitStatus`] to a shell exit code.
pub(crate) fn status_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
