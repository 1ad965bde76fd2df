//! plantmanager-core - Core library for PlantManager
//!
//! This crate contains the shared models, the remote catalog client, the local
//! reminder store, and the headless screen state used by every PlantManager
//! front end.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod relative_time;
pub mod schedule;
pub mod screens;
pub mod services;
pub mod state;
pub mod util;

pub use error::{Error, Result};
pub use models::{Environment, Plant, PlantId, SavedPlant};
