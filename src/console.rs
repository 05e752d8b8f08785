use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveTime};
use tracing::debug;

use crate::display::{booked_message, format_fcfs, format_priority, next_message, render_listing, render_next};
use crate::error::BookingError;
use crate::parser::{parse_command, Command, ParseError, SlotRef, USAGE};
use crate::schedule::{BookingStore, Queue, SlotConfig, SlotRegistry};

/// Result of handling one console line
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Reply {
            lines: vec![text.into()],
            quit: false,
        }
    }
}

fn report(err: &BookingError) -> String {
    format!("{}: {}", err.title(), err)
}

/// An interactive session owning its own store and offered slots
pub struct ConsoleSession {
    store: BookingStore,
    slots: SlotRegistry,
}

impl ConsoleSession {
    pub fn new(config: SlotConfig, now: NaiveTime) -> Self {
        ConsoleSession {
            store: BookingStore::new(),
            slots: SlotRegistry::new(config, now),
        }
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    fn resolve_slot(&self, slot: &SlotRef) -> Option<String> {
        match slot {
            SlotRef::Position(position) => self.slots.slot_at(*position).map(str::to_string),
            SlotRef::Literal(text) => Some(text.clone()),
        }
    }

    fn list_slots(&self) -> Reply {
        let lines = self
            .slots
            .offered()
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let status = if self.store.is_taken(slot) { " [TAKEN]" } else { "" };
                format!("  {}. {}{}", i + 1, slot, status)
            })
            .collect();
        Reply { lines, quit: false }
    }

    fn book(&mut self, queue: Queue, slot: &SlotRef, priority: Option<&str>, name: &str) -> Reply {
        let Some(slot) = self.resolve_slot(slot) else {
            return Reply::line(format!("No offered slot at that position; there are {}.", self.slots.offered().len()));
        };

        match queue {
            Queue::Fcfs => match self.store.book_fcfs(name, &slot) {
                Ok(a) => Reply::line(booked_message(&a.name, &a.slot)),
                Err(err) => Reply::line(report(&err)),
            },
            Queue::Priority => match self.store.book_priority_text(name, priority, &slot) {
                Ok((a, warning)) => {
                    let mut lines = Vec::new();
                    if let Some(warning) = warning {
                        lines.push(report(&warning));
                    }
                    lines.push(booked_message(&a.name, &a.slot));
                    Reply { lines, quit: false }
                }
                Err(err) => Reply::line(report(&err)),
            },
        }
    }

    fn next(&mut self, queue: Option<Queue>) -> Reply {
        match queue {
            None => Reply {
                lines: render_next(&self.store.next_appointment()),
                quit: false,
            },
            Some(Queue::Fcfs) => match self.store.next_fcfs() {
                Ok(a) => Reply::line(next_message(&a.name, &a.slot)),
                Err(err) => Reply::line(err.to_string()),
            },
            Some(Queue::Priority) => match self.store.next_priority() {
                Ok(a) => Reply::line(next_message(&a.name, &a.slot)),
                Err(err) => Reply::line(err.to_string()),
            },
        }
    }

    fn show(&self, queue: Queue) -> Reply {
        let text = match queue {
            Queue::Fcfs => render_listing(queue, &self.store.list_fcfs(), format_fcfs),
            Queue::Priority => render_listing(queue, &self.store.list_priority(), format_priority),
        };
        Reply {
            lines: text.lines().map(str::to_string).collect(),
            quit: false,
        }
    }

    /// Handles one line of input; `now` is used when the offer is refreshed
    pub fn handle_line(&mut self, line: &str, now: NaiveTime) -> Reply {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(ParseError::Blank) => return Reply::default(),
            Err(err) => {
                debug!(%err, line, "unparseable console input");
                return Reply {
                    lines: vec![err.to_string(), "type `help` for commands".to_string()],
                    quit: false,
                };
            }
        };

        match command {
            Command::Slots => self.list_slots(),
            Command::Refresh => {
                self.slots.refresh(now);
                self.list_slots()
            }
            Command::Help => Reply {
                lines: USAGE.lines().map(str::to_string).collect(),
                quit: false,
            },
            Command::Quit => Reply { lines: Vec::new(), quit: true },
            Command::Book { queue, slot, priority, name } => self.book(queue, &slot, priority.as_deref(), &name),
            Command::Next(queue) => self.next(queue),
            Command::Show(queue) => self.show(queue),
        }
    }

    /// Reads commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Appointment Scheduler")?;
        for line in self.list_slots().lines {
            writeln!(output, "{}", line)?;
        }
        writeln!(output, "type `help` for commands")?;

        for line in input.lines() {
            let reply = self.handle_line(&line?, Local::now().time());
            for text in &reply.lines {
                writeln!(output, "{}", text)?;
            }
            output.flush()?;
            if reply.quit {
                break;
            }
        }
        Ok(())
    }
}
