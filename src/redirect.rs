use crate::command::CommandSpec;
use std::path::PathBuf;

/// A command with its `<` / `>` redirections taken out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirection {
    pub command: CommandSpec,
    /// File to read standard input from.
    pub input: Option<PathBuf>,
    /// File to create (or truncate) for standard output.
    pub output: Option<PathBuf>,
}

/// Strip `< path` and `> path` token pairs out of `command`.
///
/// Tokens are scanned left to right; a repeated redirection overwrites the
/// earlier one. A `<` or `>` in last position has no target and is kept as a
/// regular argument.
pub fn extract(command: CommandSpec) -> Redirection {
    let mut redirection = Redirection::default();
    let mut cleaned = Vec::with_capacity(command.len());
    let mut tokens = command.into_tokens().into_iter().peekable();

    while let Some(token) = tokens.next() {
        let slot = match token.as_str() {
            "<" => Some(&mut redirection.input),
            ">" => Some(&mut redirection.output),
            _ => None,
        };
        let Some(slot) = slot else {
            cleaned.push(token);
            continue;
        };
        match tokens.next() {
            Some(path) => *slot = Some(PathBuf::from(path)),
            None => cleaned.push(token),
        }
    }

    redirection.command = CommandSpec::new(cleaned);
    redirection
}
