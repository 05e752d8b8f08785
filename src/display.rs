use crate::schedule::{FcfsAppointment, NextAppointments, PriorityAppointment, Queue};

/// Formats an FCFS listing line: `name at HH:MM:SS`
pub fn format_fcfs(appointment: &FcfsAppointment) -> String {
    format!("{} at {}", appointment.name, appointment.slot)
}

/// Formats a priority listing line: `name (Priority: p) at HH:MM:SS`
pub fn format_priority(appointment: &PriorityAppointment) -> String {
    format!("{} (Priority: {}) at {}", appointment.name, appointment.priority, appointment.slot)
}

pub fn booked_message(name: &str, slot: &str) -> String {
    format!("Appointment booked for {} at {}.", name, slot)
}

pub fn next_message(name: &str, slot: &str) -> String {
    format!("Next appointment is for {} at {}.", name, slot)
}

pub fn empty_message(queue: Queue) -> String {
    format!("There are no appointments in the {} queue.", queue)
}

/// Renders a whole list with its heading, or the empty notice
pub fn render_listing<T>(queue: Queue, appointments: &[T], format_line: fn(&T) -> String) -> String {
    if appointments.is_empty() {
        return empty_message(queue);
    }
    let lines: Vec<String> = appointments.iter().map(format_line).collect();
    format!("Current Appointments ({}):\n{}", queue.label(), lines.join("\n"))
}

/// One line per list describing what `next_appointment` popped
pub fn render_next(next: &NextAppointments) -> Vec<String> {
    let fcfs = match &next.fcfs {
        Some(a) => format!("[{}] {}", Queue::Fcfs.label(), next_message(&a.name, &a.slot)),
        None => format!("[{}] {}", Queue::Fcfs.label(), empty_message(Queue::Fcfs)),
    };
    let priority = match &next.priority {
        Some(a) => format!("[{}] {}", Queue::Priority.label(), next_message(&a.name, &a.slot)),
        None => format!("[{}] {}", Queue::Priority.label(), empty_message(Queue::Priority)),
    };
    vec![fcfs, priority]
}
