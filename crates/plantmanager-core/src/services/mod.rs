//! Shared services used across front ends.

mod reminders;

pub use reminders::ReminderService;
