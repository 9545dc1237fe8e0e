use anyhow::Result;
use myshell::config::Args;
use myshell::{BufferedInput, Config, Interpreter, Readline};
use std::env;
use std::io::{self, IsTerminal};
use tracing::debug;

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    init_logging(args.debug);

    let config = Config::from(args);
    debug!(?config, "starting");
    let mut shell = Interpreter::new(config.clone());

    if io::stdin().is_terminal() {
        let mut input = Readline::new(config.history)?;
        let result = shell.repl(&mut input);
        input.save_history()?;
        result
    } else {
        let mut input = BufferedInput::new(io::stdin().lock());
        shell.repl(&mut input)
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
