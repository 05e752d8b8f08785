pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod logging;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{BookingError, Result};
pub use schedule::{BookingStore, FcfsAppointment, PriorityAppointment, Queue, SlotConfig, SlotRegistry};
