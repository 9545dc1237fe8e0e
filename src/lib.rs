//! A tiny interactive shell front-end.
//!
//! Each input line is split on at most one operator (`|`, `&&` or `||`), the
//! resulting segments are stripped of `<file` / `>file` redirections and the
//! commands are launched as child processes. A pipe connects exactly two
//! commands; `&&` and `||` run the second command depending on the exit status
//! of the first one.
//!
//! The main entry point is [`Interpreter`], which owns the prompt counter and
//! drives lines read from a [`LineSource`]. The lower level building blocks
//! ([`splitter::split`], [`redirect::extract`], [`launcher::execute`] and
//! [`pipeline::pipe`]) are public so they can be used on their own.

pub mod command;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod pipeline;
pub mod redirect;
pub mod splitter;

pub use command::{CommandSpec, ExecutionOutcome, ExitCode, Streams, Terminal};
pub use config::Config;
pub use error::{PipeSide, Result, ShellError};
/// Just a convenient re-export of the interactive loop and its input sources.
pub use interpreter::{BufferedInput, Flow, Interpreter, LineSource, Readline};
pub use splitter::Operator;
