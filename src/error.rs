//! Error types and Result alias for the shell core.

use crate::command::ExitCode;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Which side of a `cmd1 | cmd2` pipe an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSide {
    First,
    Second,
}

impl fmt::Display for PipeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeSide::First => write!(f, "command 1"),
            PipeSide::Second => write!(f, "command 2"),
        }
    }
}

/// Everything that can go wrong while interpreting a line.
///
/// None of these are fatal: the interactive loop reports them and moves on to
/// the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// One side of a pipe has no command.
    #[error("invalid pipe command")]
    InvalidPipe,

    /// `< path` could not be opened for reading.
    #[error("cannot open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `> path` could not be created or truncated.
    #[error("cannot create output file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The executable could not be started. The message leaves the program
    /// name out; the caller prefixes it.
    #[error("failed to start: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was started but could not be reaped.
    #[error("failed to wait: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The shell's own stream could not be handed to a child.
    #[error("cannot attach {stream} to child process: {source}")]
    Attach {
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    /// The anonymous pipe could not be created.
    #[error("cannot create pipe: {0}")]
    PipeCreate(#[source] io::Error),

    #[error("{side} ({program}) failed to start: {source}")]
    PipeSpawn {
        side: PipeSide,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{side} ({program}) failed to wait: {source}")]
    PipeWait {
        side: PipeSide,
        program: String,
        #[source]
        source: io::Error,
    },

    /// A piped command terminated with a non-zero status.
    #[error("{side} ({program}) exited with status {status}")]
    PipeExit {
        side: PipeSide,
        program: String,
        status: ExitCode,
    },
}

impl ShellError {
    /// The pipe side this error belongs to, if it came from the pipe path.
    pub fn pipe_side(&self) -> Option<PipeSide> {
        match self {
            ShellError::PipeSpawn { side, .. }
            | ShellError::PipeWait { side, .. }
            | ShellError::PipeExit { side, .. } => Some(*side),
            _ => None,
        }
    }
}
