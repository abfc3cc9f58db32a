//! sift entrypoint: argument parsing, logging, and the interactive loop.
use anyhow::Result;
use clap::Parser;
use core_actions::{CommandTable, Separator};
use core_config::{Config, load_from};
use core_terminal::{SystemClipboard, TerminalConfirm};
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Editor, config::Configurer};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod completion;
mod shell;

use completion::SiftHelper;
use shell::{Flow, Shell};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Interactive line-oriented text transformer")]
struct Args {
    /// Optional file to load at startup, as if by `load <path>`.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `sift.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

type LineEditor = Editor<SiftHelper, DefaultHistory>;

/// Read the config with warnings routed to stderr; the file log is not up yet.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let early = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .without_time()
        .finish();
    tracing::subscriber::with_default(early, || load_from(path))
}

fn configure_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    let log = &config.file.log;
    let log_dir = log
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let Some(file_name) = log.file.file_name() else {
        anyhow::bail!("log file path has no file name: {}", log.file.display());
    };
    let log_path = log_dir.join(file_name);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log.filter.as_str()));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn init_editor(table: &CommandTable, config: &Config) -> Result<LineEditor> {
    let mut rl = LineEditor::new()?;
    rl.set_max_history_size(config.file.history.max_entries)?;
    rl.set_auto_add_history(false);
    rl.set_helper(Some(SiftHelper::new(table.names())));
    if let Some(path) = config.file.history.resolved_path()
        && let Err(e) = rl.load_history(&path)
    {
        info!(target: "runtime", path = %path.display(), error = %e, "history_not_loaded");
    }
    Ok(rl)
}

fn save_history(rl: &mut LineEditor, config: &Config) {
    if let Some(path) = config.file.history.resolved_path()
        && let Err(e) = rl.save_history(&path)
    {
        warn!(target: "runtime", path = %path.display(), error = %e, "history_save_failed");
    }
}

fn repl<C, P>(shell: &mut Shell<C, P>, rl: &mut LineEditor, prompt: &str) -> Result<()>
where
    C: core_actions::Clipboard,
    P: core_actions::ConfirmPort,
{
    let stdout = io::stdout();
    let stderr = io::stderr();
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;
                let flow = shell.execute(trimmed, &mut stdout.lock(), &mut stderr.lock())?;
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                error!(target: "runtime", error = %err, "readline_failed");
                return Err(err.into());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.clone())?;
    let _log_guard = configure_logging(&config)?;
    install_panic_hook();
    info!(
        target: "runtime",
        config = ?config.source,
        path = ?args.path,
        "startup"
    );

    let separator = Separator::parse(&config.file.mapping.separator).unwrap_or_else(|e| {
        warn!(target: "config", error = %e, "mapping_separator_invalid_using_tab");
        Separator::Tab
    });
    let table = CommandTable::new(separator);
    let clipboard = SystemClipboard::new(
        config.file.clipboard.paste.clone(),
        config.file.clipboard.copy.clone(),
    );
    let color = config.file.prompt.color;
    let confirm = TerminalConfirm::new(color);
    let mut rl = init_editor(&table, &config)?;
    let mut shell = Shell::new(table, clipboard, confirm, color);

    if let Some(path) = args.path {
        shell.open(path, &mut io::stdout(), &mut io::stderr())?;
    }
    io::stdout().flush()?;

    let prompt = if color {
        config.file.prompt.text.as_str().cyan().to_string()
    } else {
        config.file.prompt.text.clone()
    };
    let result = repl(&mut shell, &mut rl, &prompt);
    save_history(&mut rl, &config);
    info!(target: "runtime", lines = shell.state().line_count(), "shutdown");
    result
}
