//! rpnc - interactive RPN calculator
//!
//! Each line is tried as an infix expression, then as an operator token,
//! then as a command. The prompt shows the stack.
//!
//! Usage:
//!   rpnc                         # history in the per-user state directory
//!   rpnc --history-file FILE     # history somewhere else
//!   rpnc --no-history            # no history
//!
//! Type `help` for operators and commands, `q` to quit.

mod config;
mod shell;

use clap::Parser as ClapParser;
use config::ShellConfig;
use rpnc_core::{Control, Registry, Stack};
use shell::Shell;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Log filter when `RUST_LOG` is unset
const DEFAULT_LOG: &str = "rpnc=warn,rpnc_core=warn";

#[derive(ClapParser)]
#[command(name = "rpnc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive RPN calculator", long_about = None)]
struct Args {
    /// History file to use instead of the default location
    #[arg(long, value_name = "PATH", conflicts_with = "no_history")]
    history_file: Option<PathBuf>,

    /// Don't load or save command history
    #[arg(long)]
    no_history: bool,
}

impl Args {
    fn shell_config(&self) -> ShellConfig {
        let config = ShellConfig::new();
        match (&self.history_file, self.no_history) {
            (_, true) => config.without_history(),
            (Some(path), false) => config.with_history_file(path),
            (None, false) => config,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so they never mix with the prompt
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG)),
        )
        .with_writer(io::stderr)
        .init();

    let mut shell = match Shell::open(&args.shell_config()) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("Error initializing readline: {}", e);
            std::process::exit(1);
        }
    };

    info!("session started");
    run(&mut shell);
    info!("session ended");
}

/// Read, dispatch and re-prompt until quit or end of input
fn run(shell: &mut Shell) {
    let registry = Registry::new();
    let mut stack = Stack::new();
    let mut stdout = io::stdout();

    while let Some(line) = shell.read_line() {
        match rpnc_core::dispatch(&line, &mut stack, &registry, &mut stdout) {
            Ok(Control::Quit) => break,
            Ok(Control::Continue) => {}
            Err(e) => {
                debug!("'{}' failed: {:?}", line, e);
                println!("{}", e);
            }
        }
        shell.set_prompt(format!("{}> ", stack.render()));
    }
}
