//! Line-oriented interactive session.
//!
//! Keeps one [`Session`] alive so `units` and `theme` re-render the last
//! pair from memory instead of asking the providers again.

use crate::slot;
use citycompare_core::random::pick_pair;
use citycompare_core::{CompareError, RecordingMap, Session, View};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  compare <city> | <city>   compare two cities
  random                    compare a random pair (locked slots are kept)
  lock 1|2                  lock or unlock a slot for `random`
  units                     toggle metric / imperial
  theme                     toggle light / dark
  show                      render the last pair again
  help                      this text
  quit                      leave";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Compare(&'a str, &'a str),
    Random,
    Lock(usize),
    Units,
    Theme,
    Show,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Command<'_>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match word.to_ascii_lowercase().as_str() {
        "compare" => match rest.split_once('|') {
            Some((a, b)) => Ok(Command::Compare(a.trim(), b.trim())),
            None => Err("usage: compare <city> | <city>".into()),
        },
        "random" => Ok(Command::Random),
        "lock" => match rest {
            "1" => Ok(Command::Lock(0)),
            "2" => Ok(Command::Lock(1)),
            _ => Err("usage: lock 1|2".into()),
        },
        "units" => Ok(Command::Units),
        "theme" => Ok(Command::Theme),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`, try `help`")),
    }
}

struct Repl {
    session: Session<RecordingMap>,
    /// Inputs of the last successful comparison.
    current: Option<(String, String)>,
    locked: [bool; 2],
}

pub fn run(mut session: Session<RecordingMap>) -> anyhow::Result<()> {
    session.state_mut().prefs_mut().subscribe(|p| {
        println!(
            "[{} units, {} theme]",
            if p.use_imperial { "imperial" } else { "metric" },
            if p.is_dark_mode { "dark" } else { "light" }
        );
    });
    let mut repl = Repl {
        session,
        current: None,
        locked: [false; 2],
    };

    println!("{HELP}");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => repl.execute(cmd)?,
            Err(msg) => println!("{msg}"),
        }
    }
    Ok(())
}

impl Repl {
    fn execute(&mut self, cmd: Command<'_>) -> anyhow::Result<()> {
        match cmd {
            Command::Compare(a, b) => self.compare(a.to_string(), b.to_string()),
            Command::Random => {
                let current = self.current.as_ref();
                let keep = |i: usize| {
                    current
                        .filter(|_| self.locked[i])
                        .map(|(a, b)| if i == 0 { a.as_str() } else { b.as_str() })
                };
                let (a, b) = pick_pair(&mut rand::rng(), slot(keep(0)), slot(keep(1)));
                println!("Comparing {a} and {b}");
                self.compare(a, b)
            }
            Command::Lock(i) => {
                if self.current.is_none() {
                    println!("Nothing to lock yet; compare two cities first.");
                } else {
                    self.locked[i] = !self.locked[i];
                    let state = if self.locked[i] { "locked" } else { "unlocked" };
                    println!("Slot {} {state}", i + 1);
                }
                Ok(())
            }
            Command::Units => {
                let view = self.session.toggle_units()?;
                view.iter().for_each(|v| print!("{v}"));
                Ok(())
            }
            Command::Theme => {
                self.session.toggle_theme()?;
                Ok(())
            }
            Command::Show => {
                match self.session.rerender() {
                    Some(view) => print!("{view}"),
                    None => println!("Nothing to show yet."),
                }
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn compare(&mut self, a: String, b: String) -> anyhow::Result<()> {
        match self.session.run_compare(&a, &b) {
            Ok(view) => {
                print!("{view}");
                if let View::Comparison(_) = view {
                    self.current = Some((a, b));
                }
                Ok(())
            }
            Err(CompareError::MalformedInput(msg)) => {
                println!("{msg}");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
