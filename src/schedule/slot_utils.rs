use chrono::{Duration, NaiveTime};
use tracing::debug;

use super::types::{FcfsAppointment, PriorityAppointment, Slotted};

/// Format shared by offered and stored slot strings
pub const SLOT_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_SLOT_MINUTES: i64 = 30;
pub const DEFAULT_SLOT_COUNT: usize = 5;

/// Spacing and number of slots offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConfig {
    pub duration: Duration,
    pub count: usize,
}

impl Default for SlotConfig {
    fn default() -> Self {
        SlotConfig {
            duration: Duration::minutes(DEFAULT_SLOT_MINUTES),
            count: DEFAULT_SLOT_COUNT,
        }
    }
}

/// Formats a time of day as a slot string (HH:MM:SS)
pub fn format_slot(time: NaiveTime) -> String {
    time.format(SLOT_FORMAT).to_string()
}

/// Generates `count` slot strings starting at `now`, spaced `duration` apart.
/// Times wrap past midnight.
pub fn available_slots(now: NaiveTime, duration: Duration, count: usize) -> Vec<String> {
    let mut slots = Vec::with_capacity(count);
    let mut current = now;
    for _ in 0..count {
        slots.push(format_slot(current));
        current += duration;
    }
    slots
}

fn occupied_in<T: Slotted>(slot: &str, appointments: &[T]) -> bool {
    appointments.iter().any(|a| a.slot() == slot)
}

/// True if either list already holds an appointment whose slot string is exactly `slot`
pub fn is_taken(slot: &str, fcfs: &[FcfsAppointment], priority: &[PriorityAppointment]) -> bool {
    occupied_in(slot, fcfs) || occupied_in(slot, priority)
}

/// The slots offered for booking. The list is fixed when the registry is
/// created and only changes on `refresh`.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    config: SlotConfig,
    offered: Vec<String>,
}

impl SlotRegistry {
    pub fn new(config: SlotConfig, now: NaiveTime) -> Self {
        let mut registry = SlotRegistry {
            config,
            offered: Vec::new(),
        };
        registry.refresh(now);
        registry
    }

    pub fn config(&self) -> SlotConfig {
        self.config
    }

    pub fn offered(&self) -> &[String] {
        &self.offered
    }

    /// The preselected slot: the first one offered
    pub fn default_slot(&self) -> Option<&str> {
        self.offered.first().map(String::as_str)
    }

    /// Looks up an offered slot by its 1-based position
    pub fn slot_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.offered.get(i))
            .map(String::as_str)
    }

    pub fn refresh(&mut self, now: NaiveTime) {
        self.offered = available_slots(now, self.config.duration, self.config.count);
        debug!(slots = ?self.offered, "generated available slots");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn generates_evenly_spaced_slots() {
        let slots = available_slots(at(9, 5, 7), Duration::minutes(30), 5);
        assert_eq!(slots, vec!["09:05:07", "09:35:07", "10:05:07", "10:35:07", "11:05:07"]);
    }

    #[test]
    fn slots_wrap_past_midnight() {
        let slots = available_slots(at(23, 15, 0), Duration::minutes(30), 3);
        assert_eq!(slots, vec!["23:15:00", "23:45:00", "00:15:00"]);
    }

    #[test]
    fn zero_count_yields_nothing() {
        assert!(available_slots(at(12, 0, 0), Duration::minutes(30), 0).is_empty());
    }

    #[test]
    fn subsecond_precision_is_dropped() {
        let now = NaiveTime::from_hms_milli_opt(8, 0, 0, 999).unwrap();
        assert_eq!(available_slots(now, Duration::minutes(15), 1), vec!["08:00:00"]);
    }

    #[test]
    fn taken_checks_both_lists_by_exact_string() {
        let fcfs = vec![FcfsAppointment { name: "Ada".into(), slot: "10:00:00".into() }];
        let priority = vec![PriorityAppointment { name: "Bob".into(), priority: 2, slot: "10:30:00".into() }];

        assert!(is_taken("10:00:00", &fcfs, &priority));
        assert!(is_taken("10:30:00", &fcfs, &priority));
        assert!(!is_taken("11:00:00", &fcfs, &priority));
        // same instant, different text
        assert!(!is_taken("10:00", &fcfs, &priority));
        assert!(!is_taken("10:00:00", &[], &[]));
    }

    #[test]
    fn registry_keeps_offer_until_refreshed() {
        let mut registry = SlotRegistry::new(SlotConfig::default(), at(14, 0, 0));
        assert_eq!(registry.offered().len(), 5);
        assert_eq!(registry.default_slot(), Some("14:00:00"));
        assert_eq!(registry.slot_at(2), Some("14:30:00"));
        assert_eq!(registry.slot_at(0), None);
        assert_eq!(registry.slot_at(6), None);

        registry.refresh(at(16, 0, 0));
        assert_eq!(registry.default_slot(), Some("16:00:00"));
    }
}
