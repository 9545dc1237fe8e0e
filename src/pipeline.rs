use crate::command::{CommandSpec, Streams};
use crate::error::{PipeSide, Result, ShellError};
use crate::launcher::status_code;
use std::io;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

/// Run `first | second`.
///
/// Both commands are started before either is waited on. The first command's
/// stdout is the write end of an anonymous pipe and the second command's stdin
/// is its read end; the remaining streams are the shell's own. `<` and `>` are
/// not interpreted here and reach the programs as ordinary arguments.
///
/// Unlike [`crate::launcher::execute`], a non-zero exit of either side is an
/// error, since nothing downstream consumes the status.
pub fn pipe(first: &CommandSpec, second: &CommandSpec, streams: Streams<'_>) -> Result<()> {
    let (Some(first_program), Some(second_program)) = (first.program(), second.program()) else {
        return Err(ShellError::InvalidPipe);
    };

    let (reader, writer) = io::pipe().map_err(ShellError::PipeCreate)?;
    let first_stderr = streams.stderr_stdio()?;
    let second_stdout = streams.stdout_stdio()?;
    let second_stderr = streams.stderr_stdio()?;

    debug!(first = first_program, second = second_program, "spawning pipe");
    // The write end must not outlive this call in the parent or the second
    // command never sees end of input; `spawn` drops its Command on return.
    let mut first_child = spawn(first, Stdio::inherit(), writer.into(), first_stderr)
        .map_err(|source| ShellError::PipeSpawn {
            side: PipeSide::First,
            program: first_program.to_owned(),
            source,
        })?;
    let mut second_child = match spawn(second, reader.into(), second_stdout, second_stderr) {
        Ok(child) => child,
        Err(source) => {
            abandon(first_program, &mut first_child);
            return Err(ShellError::PipeSpawn {
                side: PipeSide::Second,
                program: second_program.to_owned(),
                source,
            });
        }
    };

    let first_result = wait(PipeSide::First, first_program, &mut first_child);
    let second_result = wait(PipeSide::Second, second_program, &mut second_child);
    first_result.and(second_result)
}

fn spawn(command: &CommandSpec, stdin: Stdio, stdout: Stdio, stderr: Stdio) -> io::Result<Child> {
    let mut process = Command::new(command.program().unwrap_or_default());
    process
        .args(command.args())
        .stdin(stdin)
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
}

fn wait(side: PipeSide, program: &str, child: &mut Child) -> Result<()> {
    let exit_status = child.wait().map_err(|source| ShellError::PipeWait {
        side,
        program: program.to_owned(),
        source,
    })?;
    let status = status_code(exit_status);
    debug!(%side, program, status, "pipe side exited");
    if status == 0 {
        Ok(())
    } else {
        Err(ShellError::PipeExit {
            side,
            program: program.to_owned(),
            status,
        })
    }
}

/// Kill and reap a child whose partner could not be started.
fn abandon(program: &str, child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(program, %err, "kill after failed pipe spawn");
    }
    if let Err(err) = child.wait() {
        warn!(program, %err, "could not reap abandoned pipe command");
    }
}
