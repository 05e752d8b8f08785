pub mod types;
pub mod slot_utils;
pub mod store;

pub use types::{FcfsAppointment, PriorityAppointment, Queue, Slotted};
pub use slot_utils::{available_slots, format_slot, is_taken, SlotConfig, SlotRegistry};
pub use store::{parse_priority, parse_priority_or_default, BookingStore, NextAppointments};
