//! Headless screen state.
//!
//! Each screen owns the state a front end renders and exposes the user
//! actions as methods. Rendering, navigation and styling belong to the front
//! ends.

mod my_plants;
mod plant_select;

pub use my_plants::{next_due, ConfirmPrompt, MyPlantsScreen, NextWatering, RemovalOutcome};
pub use plant_select::{
    filter_by_environment, PaginationThreshold, PlantSelectScreen, ScrollPosition,
    DEFAULT_PAGE_SIZE,
};
