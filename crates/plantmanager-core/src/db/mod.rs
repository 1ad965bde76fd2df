//! Database layer for PlantManager

mod connection;
mod migrations;
mod reminder_repository;

pub use connection::Database;
pub use reminder_repository::{LibSqlReminderRepository, ReminderRepository, PLANTS_STORAGE_KEY};
