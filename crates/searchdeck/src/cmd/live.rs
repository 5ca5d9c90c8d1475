//! Live mode: every input line is one query event.
//!
//! Lines come from a `rustyline` editor when stdin is a terminal and from
//! plain stdin otherwise, so a scripted session can be piped in:
//!
//! ```text
//! a
//! ab
//! :wait 600
//! abc
//! ```
//!
//! Lines starting with `:` are commands; `::text` submits `:text`. At end of
//! input the loop waits for the last query to settle before returning.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use searchdeck_core::{QueryController, ResultState};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

use super::surface::{Action, InputMode, Presenter};
use crate::render::{render_state, Render};

const PROMPT: &str = "search> ";

const HELP: &[&str] = &[
    ":wait MS    pause input for MS milliseconds",
    ":help       show this help",
    ":quit       leave live mode",
];

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Query(&'a str),
    Command { name: &'a str, args: &'a str },
}

fn parse_line(line: &str) -> Line<'_> {
    match line.strip_prefix(':') {
        Some(rest) if rest.starts_with(':') => Line::Query(rest),
        Some(rest) => {
            let rest = rest.trim();
            let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Line::Command {
                name,
                args: args.trim(),
            }
        }
        None => Line::Query(line),
    }
}

/// Read lines from the terminal or stdin and drive `controller` until input
/// ends or `:quit`.
pub async fn run<T, P>(
    controller: &QueryController<T>,
    mode: InputMode,
    presenter: &mut P,
) -> Result<()>
where
    T: Render + Clone + Send + Sync + 'static,
    P: Presenter<T>,
{
    let interactive = io::stdin().is_terminal();
    let lines = spawn_reader(interactive)?;
    if interactive {
        eprintln!("Type to search, :help for commands, Ctrl-D to exit.");
    }
    drive(controller, mode, presenter, lines, &mut io::stdout()).await
}

/// The live loop over an arbitrary line channel and output.
async fn drive<T, P>(
    controller: &QueryController<T>,
    mode: InputMode,
    presenter: &mut P,
    mut lines: UnboundedReceiver<String>,
    out: &mut dyn Write,
) -> Result<()>
where
    T: Render + Clone + Send + Sync + 'static,
    P: Presenter<T>,
{
    let mut states = controller.subscribe();
    let mut current: ResultState<T> = controller.state();
    let mut paused_until: Option<Instant> = None;
    let mut input_open = true;
    tracing::debug!(?mode, debounce = ?controller.config().debounce, "live mode started");

    loop {
        if !input_open {
            // End of input and the last completion can land in the same poll.
            if states.has_changed().unwrap_or(false) {
                current = states.borrow_and_update().clone();
                show(presenter.present(current.clone()), out)?;
            }
            if !controller.is_debouncing() && current.is_settled() {
                break;
            }
        }

        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                current = states.borrow_and_update().clone();
                show(presenter.present(current.clone()), out)?;
            }
            () = tokio::time::sleep_until(paused_until.unwrap_or_else(Instant::now)),
                if paused_until.is_some() =>
            {
                paused_until = None;
            }
            line = lines.recv(), if input_open && paused_until.is_none() => {
                let Some(line) = line else {
                    tracing::debug!("input closed, waiting for the last query to settle");
                    input_open = false;
                    continue;
                };
                match parse_line(&line) {
                    Line::Query(text) => {
                        presenter.on_input(text);
                        match mode {
                            InputMode::Debounced => controller.submit_query(text),
                            InputMode::Submit => controller.search_now(text),
                        }
                    }
                    Line::Command { name: "quit" | "q", .. } => break,
                    Line::Command { name: "help", .. } => {
                        for usage in presenter.help().iter().chain(HELP) {
                            writeln!(out, "{usage}")?;
                        }
                    }
                    Line::Command { name: "wait", args } => match args.parse::<u64>() {
                        Ok(ms) => paused_until = Some(Instant::now() + Duration::from_millis(ms)),
                        Err(_) => notice(out, "usage: :wait MS")?,
                    },
                    Line::Command { name, args } => {
                        match presenter.command(name, args, controller) {
                            Action::Rerender => show(presenter.present(current.clone()), out)?,
                            Action::Handled => {}
                            Action::Notice(message) => notice(out, &message)?,
                            Action::Unknown => {
                                notice(out, &format!("unknown command :{name} (try :help)"))?;
                            }
                        }
                    }
                }
            }
        }
    }

    controller.dispose();
    Ok(())
}

fn show<T: Render>(state: ResultState<T>, out: &mut dyn Write) -> Result<()> {
    render_state(&state, out).context("failed to write results")?;
    out.flush().context("failed to write results")
}

fn notice(out: &mut dyn Write, message: &str) -> Result<()> {
    writeln!(out, "{message}").context("failed to write results")
}

fn spawn_reader(interactive: bool) -> Result<UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    // A plain thread: the runtime must not wait on a blocked read at exit.
    std::thread::Builder::new()
        .name("searchdeck-input".to_string())
        .spawn(move || {
            if interactive {
                read_interactive(&tx);
            } else {
                read_piped(&tx);
            }
        })
        .context("failed to start input reader")?;
    Ok(rx)
}

fn history_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("searchdeck").join("history"))
}

fn read_interactive(tx: &UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::warn!(error = %e, "line editor unavailable, reading plain stdin");
            read_piped(tx);
            return;
        }
    };

    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }
}

fn read_piped(tx: &UnboundedSender<String>) {
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        }
    }
}
