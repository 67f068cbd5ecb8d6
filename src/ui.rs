//! Terminal rendition of the generator widget.
//!
//! The session reads one command per line, feeds it to a [`PasswordController`]
//! and writes whatever the controller published back to the terminal.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use keysmith::{ClipboardBackend, PasswordChanged, PasswordController};
use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static LENGTH_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:length|len|l)\s+(-?\d+)$").unwrap());

const HELP: &str = "commands: length N | digits | symbols | new | copy | show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Length(i64),
    Digits,
    Symbols,
    New,
    Copy,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim().to_lowercase();
    let length = LENGTH_COMMAND.captures(&line).map(|caps| caps[1].parse::<i64>());
    match length {
        Some(Ok(n)) => return Command::Length(n),
        Some(Err(_)) => return Command::Unknown(line),
        None => {}
    }
    match line.as_str() {
        "digits" | "numbers" | "d" => Command::Digits,
        "symbols" | "characters" | "s" => Command::Symbols,
        "new" | "n" | "" => Command::New,
        "copy" | "c" => Command::Copy,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line),
    }
}

pub fn render(event: &PasswordChanged) -> String {
    let mark = |on: bool| if on { 'x' } else { ' ' };
    format!(
        "{}\n  Length:{} [{}] Numbers [{}] Characters",
        event.password,
        event.options.length,
        mark(event.options.include_digits),
        mark(event.options.include_symbols),
    )
}

fn snapshot<R: Rng, B: ClipboardBackend>(controller: &PasswordController<R, B>) -> PasswordChanged {
    PasswordChanged {
        password: controller.password().to_string(),
        options: *controller.options(),
        generation: controller.generation(),
        state: controller.state(),
    }
}

pub fn run_session<R, B, I, O>(mut controller: PasswordController<R, B>, input: I, mut output: O) -> io::Result<()>
where
    R: Rng,
    B: ClipboardBackend,
    I: BufRead,
    O: Write,
{
    let outbox: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outbox);
    controller.subscribe(move |event| sink.borrow_mut().push(render(event)));

    writeln!(output, "{}", HELP)?;
    writeln!(output, "{}", render(&snapshot(&controller)))?;

    for line in input.lines() {
        let command = parse_command(&line?);
        debug!("Session command {:?}", command);
        match command {
            Command::Length(n) => {
                if let Err(e) = controller.set_length(n) {
                    writeln!(output, "{}", e)?;
                }
            }
            Command::Digits => controller.toggle_digits(),
            Command::Symbols => controller.toggle_symbols(),
            Command::New => controller.regenerate(),
            Command::Copy => match controller.copy() {
                Ok(()) => writeln!(output, "Copied")?,
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Show => writeln!(output, "{}", render(&snapshot(&controller)))?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
            Command::Unknown(other) => writeln!(output, "Unknown command '{}'. {}", other, HELP)?,
        }

        for message in outbox.borrow_mut().drain(..) {
            writeln!(output, "{}", message)?;
        }
        output.flush()?;
    }

    Ok(())
}
