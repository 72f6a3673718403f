//! `banca shell`: a line-oriented prompt over one in-memory shop.
//!
//! Bets live in memory, so cancelling or paying a bet placed earlier
//! needs both commands to run in the same process. The shell keeps the
//! ledger alive between lines; login state still goes through the
//! session file as in one-shot mode.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::{Command, ShellLine};
use crate::error::CliError;

use super::{App, util};

const PROMPT: &str = "banca> ";

pub fn run(app: &mut App) -> Result<(), CliError> {
    app.in_shell = true;
    let interactive = io::stdin().is_terminal();
    if interactive && !app.quiet {
        eprintln!("Type a command (e.g. `bets list`), `help`, or `exit`.");
    }

    let mut lines = io::stdin().lock().lines();
    loop {
        if interactive {
            eprint!("{PROMPT}");
            let _ = io::stderr().flush();
        }
        let Some(line) = lines.next() else { break };
        let line = line?;

        let words = match util::split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                report(e);
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                let _ = e.print();
                if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                    tracing::debug!(line = %line, "unparsed shell line");
                }
                continue;
            }
        };

        let result = match parsed.command {
            Command::Shell => {
                app.note("Already in the shell");
                Ok(())
            }
            Command::Config(_) | Command::Completions(_) => {
                app.note("Run this outside the shell: banca config ... / banca completions ...");
                Ok(())
            }
            cmd => super::dispatch(cmd, app),
        };
        if let Err(e) = result {
            report(e);
        }
    }
    Ok(())
}

fn report(err: CliError) {
    eprintln!("{:?}", miette::Report::new(err));
}
