use crate::error::ShellError;
use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Status reported for failures that happen before a child could run.
pub const FAILURE: ExitCode = 1;

/// A command name followed by its arguments, as produced by whitespace
/// tokenization. An empty spec means "no command on this side".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec(Vec<String>);

impl CommandSpec {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Split `text` on runs of whitespace. No quoting or escaping is applied.
    pub fn tokenize(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_owned).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The program name, i.e. token 0.
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the program name.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for CommandSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Result of running one command on the non-piped path.
///
/// A non-zero `status` without an `error` is an ordinary failed command; it is
/// consumed by the `&&` / `||` gate and is never reported on its own.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub status: ExitCode,
    pub error: Option<ShellError>,
}

impl ExecutionOutcome {
    pub fn exited(status: ExitCode) -> Self {
        Self {
            status,
            error: None,
        }
    }

    pub fn failed(error: ShellError) -> Self {
        Self {
            status: FAILURE,
            error: Some(error),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// One of the shell's own output streams.
///
/// The shell writes its prompt and error reports through [`Write`], and hands
/// [`Terminal::stdio`] to children that should share the stream instead of
/// being redirected.
pub trait Terminal: Write {
    /// Produce a handle a child process can inherit.
    fn stdio(&self) -> io::Result<Stdio>;
}

impl Terminal for io::Stdout {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

impl Terminal for io::Stderr {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

impl Terminal for File {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(self.try_clone()?.into())
    }
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn stdio(&self) -> io::Result<Stdio> {
        (**self).stdio()
    }
}

/// The shell's own output streams, borrowed for the duration of one launch.
#[derive(Clone, Copy)]
pub struct Streams<'a> {
    pub stdout: &'a dyn Terminal,
    pub stderr: &'a dyn Terminal,
}

impl<'a> Streams<'a> {
    pub fn new(stdout: &'a dyn Terminal, stderr: &'a dyn Terminal) -> Self {
        Self { stdout, stderr }
    }

    pub(crate) fn stdout_stdio(&self) -> Result<Stdio, ShellError> {
        self.stdout.stdio().map_err(|source| ShellError::Attach {
            stream: "stdout",
            source,
        })
    }

    pub(crate) fn stderr_stdio(&self) -> Result<Stdio, ShellError> {
        self.stderr.stdio().map_err(|source| ShellError::Attach {
            stream: "stderr",
            source,
        })
    }
}
