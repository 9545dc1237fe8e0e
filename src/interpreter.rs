use crate::command::{CommandSpec, ExitCode, Streams, Terminal};
use crate::config::Config;
use crate::error::ShellError;
use crate::splitter::{self, Operator};
use crate::{launcher, pipeline, redirect};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Where input lines come from.
pub trait LineSource {
    /// Show `prompt` and read one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input. `out` is the shell's stdout, for
    /// sources that do not print the prompt themselves. Bytes that are not
    /// valid UTF-8 are replaced rather than treated as a read failure.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>>;
}

/// Line editor backed by rustyline, with optional persistent history.
pub struct Readline {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl Readline {
    /// Create the editor and load `history` when the file exists.
    pub fn new(history: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &history {
            if path.exists() {
                editor.load_history(path)?;
                debug!(path = %path.display(), "history loaded");
            }
        }
        Ok(Self { editor, history })
    }

    /// Write history back to the file it was loaded from, if any.
    pub fn save_history(&mut self) -> anyhow::Result<()> {
        if let Some(path) = &self.history {
            self.editor.save_history(path)?;
            debug!(path = %path.display(), "history saved");
        }
        Ok(())
    }
}

impl LineSource for Readline {
    fn read_line(&mut self, prompt: &str, _out: &mut dyn Write) -> anyhow::Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C drops the current line and asks again.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Reads lines from any buffered reader, printing the prompt to the shell's
/// stdout. Used for non-terminal input and in tests.
pub struct BufferedInput<R> {
    reader: R,
}

impl<R: BufRead> BufferedInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufferedInput<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>> {
        if let Err(err) = out.write_all(prompt.as_bytes()).and_then(|()| out.flush()) {
            warn!(%err, "could not write prompt");
        }
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }
}

/// The interactive loop: prompts, reads a line and runs it.
///
/// The interpreter owns the prompt counter and the shell's own output streams.
/// Children that are not redirected write to the same streams.
///
/// Example
/// ```no_run
/// use myshell::{Config, Interpreter, Readline};
/// let mut input = Readline::new(None).unwrap();
/// Interpreter::new(Config::default()).repl(&mut input).unwrap();
/// ```
pub struct Interpreter {
    config: Config,
    counter: usize,
    stdout: Box<dyn Terminal>,
    stderr: Box<dyn Terminal>,
}

impl Interpreter {
    /// Create an interpreter writing to the process's stdout and stderr.
    pub fn new(config: Config) -> Self {
        Self::with_terminals(config, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an interpreter with custom output streams.
    pub fn with_terminals(
        config: Config,
        stdout: Box<dyn Terminal>,
        stderr: Box<dyn Terminal>,
    ) -> Self {
        Self {
            config,
            counter: 0,
            stdout,
            stderr,
        }
    }

    /// Number of lines processed so far.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// The prompt for the next read, e.g. `./myshell[03]> `.
    pub fn prompt(&self) -> String {
        format!("{}[{:02}]> ", self.config.prompt, self.counter)
    }

    /// Read and run lines until end of input or the exit keyword.
    ///
    /// Command failures are reported and do not stop the loop, and neither do
    /// failed writes to the shell's own streams. Only a failure to read input
    /// is returned.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        info!("shell started");
        loop {
            let prompt = self.prompt();
            let Some(line) = source.read_line(&prompt, &mut self.stdout)? else {
                debug!("end of input");
                break;
            };
            if self.run_line(&line) == Flow::Exit {
                debug!("exit keyword received");
                break;
            }
        }
        info!(lines = self.counter, "shell stopped");
        Ok(())
    }

    /// Interpret a single input line.
    pub fn run_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }
        if line == self.config.exit_keyword {
            return Flow::Exit;
        }
        self.counter += 1;
        if let Err(err) = self.stdout.flush() {
            warn!(%err, "could not flush stdout");
        }

        let split = splitter::split(line);
        debug!(operator = %split.operator, first = ?split.first, second = ?split.second, "line split");

        if split.operator == Operator::Pipe {
            if let Err(err) = pipeline::pipe(&split.first, &split.second, self.streams()) {
                debug!(%err, side = ?err.pipe_side(), "pipe failed");
                self.print_error(format_args!("pipe error: {}", err));
            }
            return Flow::Continue;
        }

        let first = redirect::extract(split.first);
        let second = redirect::extract(split.second);

        let outcome = launcher::execute_redirected(&first, self.streams());
        if let Some(err) = outcome.error {
            self.report(&first.command, err);
        }

        if should_run_second(split.operator, outcome.status) && !second.command.is_empty() {
            let outcome = launcher::execute_redirected(&second, self.streams());
            if let Some(err) = outcome.error {
                self.report(&second.command, err);
            }
        } else {
            debug!(status = outcome.status, "second command skipped");
        }
        Flow::Continue
    }

    fn streams(&self) -> Streams<'_> {
        Streams::new(&*self.stdout, &*self.stderr)
    }

    fn report(&mut self, command: &CommandSpec, err: ShellError) {
        debug!(%err, program = command.program(), "command failed");
        self.print_error(format_args!(
            "{}: execution error: {}",
            command.program().unwrap_or_default(),
            err
        ));
    }

    /// Write one message line to the shell's stderr. A stream that cannot be
    /// written to is logged and otherwise ignored.
    fn print_error(&mut self, message: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.stderr, "{}", message) {
            warn!(%err, "could not write to stderr");
        }
    }
}

/// The `&&` / `||` gate: whether the second command runs after the first one
/// finished with `first_status`.
pub fn should_run_second(operator: Operator, first_status: ExitCode) -> bool {
    match operator {
        Operator::And => first_status == 0,
        Operator::Or => first_status != 0,
        Operator::None | Operator::Pipe => false,
    }
}
