use serde::Serialize;
use tracing::{info, warn};

use crate::error::{BookingError, Result};
use super::slot_utils::is_taken;
use super::types::{FcfsAppointment, PriorityAppointment, Queue};

/// Priority used when the supplied text is not an integer
pub const FALLBACK_PRIORITY: i64 = 0;

/// Parses priority text as an `i64`, surrounding whitespace allowed.
/// Out-of-range values and digit separators (`1_000`) are rejected.
pub fn parse_priority(input: &str) -> Result<i64> {
    input.trim().parse::<i64>().map_err(|_| BookingError::InvalidPriority {
        input: input.to_string(),
    })
}

/// Parses priority text, falling back to `FALLBACK_PRIORITY` on failure.
/// The parse error is returned alongside so the caller can surface it.
pub fn parse_priority_or_default(input: Option<&str>) -> (i64, Option<BookingError>) {
    match parse_priority(input.unwrap_or("")) {
        Ok(priority) => (priority, None),
        Err(err) => {
            warn!(input = ?input, fallback = FALLBACK_PRIORITY, "invalid priority, using fallback");
            (FALLBACK_PRIORITY, Some(err))
        }
    }
}

/// Outcome of popping the head of both lists at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextAppointments {
    pub fcfs: Option<FcfsAppointment>,
    pub priority: Option<PriorityAppointment>,
}

/// The two booking lists. A slot string appears at most once across both.
#[derive(Debug, Default)]
pub struct BookingStore {
    fcfs: Vec<FcfsAppointment>,
    priority: Vec<PriorityAppointment>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            warn!("rejected booking with empty name");
            return Err(BookingError::EmptyName);
        }
        Ok(())
    }

    fn check_slot(&self, slot: &str) -> Result<()> {
        if is_taken(slot, &self.fcfs, &self.priority) {
            warn!(slot, "rejected booking for taken slot");
            return Err(BookingError::SlotTaken { slot: slot.to_string() });
        }
        Ok(())
    }

    pub fn is_taken(&self, slot: &str) -> bool {
        is_taken(slot, &self.fcfs, &self.priority)
    }

    /// Appends a booking to the end of the FCFS list
    pub fn book_fcfs(&mut self, name: &str, slot: &str) -> Result<FcfsAppointment> {
        Self::check_name(name)?;
        self.check_slot(slot)?;

        let appointment = FcfsAppointment {
            name: name.to_string(),
            slot: slot.to_string(),
        };
        self.fcfs.push(appointment.clone());
        info!(name, slot, position = self.fcfs.len(), "booked FCFS appointment");
        Ok(appointment)
    }

    /// Inserts a booking into the priority list, keeping it sorted by
    /// priority descending. Equal priorities stay in insertion order.
    pub fn book_priority(&mut self, name: &str, priority: i64, slot: &str) -> Result<PriorityAppointment> {
        Self::check_name(name)?;
        self.check_slot(slot)?;

        let appointment = PriorityAppointment {
            name: name.to_string(),
            priority,
            slot: slot.to_string(),
        };
        self.priority.push(appointment.clone());
        // sort_by is stable
        self.priority.sort_by(|a, b| b.priority.cmp(&a.priority));
        info!(name, priority, slot, "booked priority appointment");
        Ok(appointment)
    }

    /// Books into the priority list from raw priority text. Unparseable
    /// text books at `FALLBACK_PRIORITY`; the parse error is returned as a
    /// warning next to the appointment. The name is checked before the
    /// priority is parsed and the slot after.
    pub fn book_priority_text(
        &mut self,
        name: &str,
        priority: Option<&str>,
        slot: &str,
    ) -> Result<(PriorityAppointment, Option<BookingError>)> {
        Self::check_name(name)?;
        let (priority, warning) = parse_priority_or_default(priority);
        let appointment = self.book_priority(name, priority, slot)?;
        Ok((appointment, warning))
    }

    /// Removes and returns the oldest FCFS appointment
    pub fn next_fcfs(&mut self) -> Result<FcfsAppointment> {
        if self.fcfs.is_empty() {
            return Err(BookingError::Empty { queue: Queue::Fcfs });
        }
        let next = self.fcfs.remove(0);
        info!(name = %next.name, slot = %next.slot, "dequeued FCFS appointment");
        Ok(next)
    }

    /// Removes and returns the highest-priority appointment
    pub fn next_priority(&mut self) -> Result<PriorityAppointment> {
        if self.priority.is_empty() {
            return Err(BookingError::Empty { queue: Queue::Priority });
        }
        let next = self.priority.remove(0);
        info!(name = %next.name, priority = next.priority, slot = %next.slot, "dequeued priority appointment");
        Ok(next)
    }

    /// Pops the head of both lists. Each side is independent: an empty
    /// FCFS list does not stop the priority list from advancing.
    pub fn next_appointment(&mut self) -> NextAppointments {
        NextAppointments {
            fcfs: self.next_fcfs().ok(),
            priority: self.next_priority().ok(),
        }
    }

    pub fn list_fcfs(&self) -> Vec<FcfsAppointment> {
        self.fcfs.clone()
    }

    pub fn list_priority(&self) -> Vec<PriorityAppointment> {
        self.priority.clone()
    }

    pub fn len(&self) -> usize {
        self.fcfs.len() + self.priority.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fcfs.is_empty() && self.priority.is_empty()
    }
}
