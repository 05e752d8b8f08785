use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An appointment in the first-come-first-served list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcfsAppointment {
    pub name: String,
    pub slot: String,
}

/// An appointment in the priority list, ordered by `priority` descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAppointment {
    pub name: String,
    pub priority: i64,
    pub slot: String,
}

/// Anything occupying a time slot. Both appointment shapes carry the slot
/// as their last field, and occupancy checks only look at that.
pub trait Slotted {
    fn slot(&self) -> &str;
}

impl Slotted for FcfsAppointment {
    fn slot(&self) -> &str {
        &self.slot
    }
}

impl Slotted for PriorityAppointment {
    fn slot(&self) -> &str {
        &self.slot
    }
}

/// Which of the two lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Queue {
    Fcfs,
    Priority,
}

impl Queue {
    /// Title-case label, e.g. for dialog headings
    pub fn label(self) -> &'static str {
        match self {
            Queue::Fcfs => "FCFS",
            Queue::Priority => "Priority",
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Queue::Fcfs => f.write_str("FCFS"),
            Queue::Priority => f.write_str("priority"),
        }
    }
}

impl FromStr for Queue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" => Ok(Queue::Fcfs),
            "priority" => Ok(Queue::Priority),
            other => Err(format!("unknown queue '{}', expected 'fcfs' or 'priority'", other)),
        }
    }
}
