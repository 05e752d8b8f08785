use thiserror::Error;

use crate::schedule::Queue;

pub type Result<T, E = BookingError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please enter your name.")]
    EmptyName,
    #[error("The selected time slot at {slot} is already booked. Please choose another time.")]
    SlotTaken { slot: String },
    #[error("Priority must be a number, got {input:?}.")]
    InvalidPriority { input: String },
    #[error("There are no appointments in the {queue} queue.")]
    Empty { queue: Queue },
}

impl BookingError {
    /// Stable identifier for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::EmptyName => "empty_name",
            BookingError::SlotTaken { .. } => "slot_taken",
            BookingError::InvalidPriority { .. } => "invalid_priority",
            BookingError::Empty { .. } => "empty",
        }
    }

    /// Short heading suitable for a warning dialog.
    pub fn title(&self) -> String {
        match self {
            BookingError::EmptyName => "Empty Name".to_string(),
            BookingError::SlotTaken { .. } => "Time Slot Taken".to_string(),
            BookingError::InvalidPriority { .. } => "Invalid Priority".to_string(),
            BookingError::Empty { queue } => format!("No Appointments ({})", queue.label()),
        }
    }
}
