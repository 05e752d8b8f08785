use thiserror::Error;

use crate::schedule::Queue;

pub const USAGE: &str = "\
commands:
  slots                                      list offered slots
  refresh                                    regenerate offered slots from now
  book fcfs <slot> <name...>                 book first-come-first-served
  book priority <slot> <priority> <name...>  book by priority (higher first)
  next [fcfs|priority]                       pop the next appointment
  show fcfs|priority                         list appointments
  help                                       show this text
  quit                                       leave
<slot> is a position from `slots` (1, 2, ...) or a literal HH:MM:SS";

/// A slot as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
    /// 1-based position in the offered list
    Position(usize),
    Literal(String),
}

impl SlotRef {
    fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(position) => SlotRef::Position(position),
            Err(_) => SlotRef::Literal(token.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Slots,
    Refresh,
    Help,
    Quit,
    Book {
        queue: Queue,
        slot: SlotRef,
        priority: Option<String>,
        name: String,
    },
    Next(Option<Queue>),
    Show(Queue),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("nothing to do")]
    Blank,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{0}")]
    UnknownQueue(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn parse_queue(token: Option<&str>, usage: &'static str) -> Result<Queue, ParseError> {
    let token = token.ok_or(ParseError::Usage(usage))?;
    token.parse::<Queue>().map_err(ParseError::UnknownQueue)
}

/// Parses one console line. The name is everything after the fixed
/// arguments, so it may contain spaces; a missing name parses as empty and
/// is rejected by the store.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Err(ParseError::Blank);
    };

    match verb.to_lowercase().as_str() {
        "slots" => Ok(Command::Slots),
        "refresh" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "show" => Ok(Command::Show(parse_queue(tokens.next(), "show fcfs|priority")?)),
        "next" => match tokens.next() {
            None => Ok(Command::Next(None)),
            Some(token) => Ok(Command::Next(Some(parse_queue(Some(token), "next [fcfs|priority]")?))),
        },
        "book" => {
            let queue = parse_queue(tokens.next(), "book fcfs|priority <slot> ...")?;
            let slot = match tokens.next() {
                Some(token) => SlotRef::parse(token),
                None => return Err(ParseError::Usage("book fcfs|priority <slot> ...")),
            };
            let priority = match queue {
                Queue::Priority => tokens.next().map(str::to_string),
                Queue::Fcfs => None,
            };
            let name = tokens.collect::<Vec<_>>().join(" ");
            Ok(Command::Book { queue, slot, priority, name })
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}
