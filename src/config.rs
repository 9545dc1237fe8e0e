use argh::FromArgs;
use std::path::PathBuf;

/// Keyword that ends the interactive loop.
pub const DEFAULT_EXIT_KEYWORD: &str = "adios";
/// Program label shown in front of the prompt counter.
pub const DEFAULT_PROMPT: &str = "./myshell";

#[derive(FromArgs, Debug)]
/// Interactive shell with single pipes, && / || chaining and < / > redirection.
pub struct Args {
    #[argh(switch, short = 'd')]
    /// log debug information to standard error.
    pub debug: bool,

    #[argh(option)]
    /// file to load line history from on start and save it to on exit.
    pub history: Option<PathBuf>,

    #[argh(option, default = "DEFAULT_EXIT_KEYWORD.to_string()")]
    /// line that ends the shell. Defaults to "adios".
    pub exit_keyword: String,

    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// label printed before the prompt counter. Defaults to "./myshell".
    pub prompt: String,
}

/// Runtime settings of the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub exit_keyword: String,
    pub history: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            exit_keyword: DEFAULT_EXIT_KEYWORD.to_string(),
            history: None,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            prompt: args.prompt,
            exit_keyword: args.exit_keyword,
            history: args.history,
        }
    }
}
