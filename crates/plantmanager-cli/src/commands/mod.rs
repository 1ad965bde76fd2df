pub mod browse;
pub mod common;
pub mod completions;
pub mod config;
pub mod environments;
pub mod my_plants;
pub mod remove;
pub mod save;
