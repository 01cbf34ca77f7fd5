//! Agent-based simulation of disease spread among cells moving in a bounded
//! 2-d plane. Cells move ballistically, bounce off the world edges, and pass
//! the infection on proximity; infected cells become immune after a fixed
//! recovery period.
//!
//! The crate is the simulation engine only. A driver (see `contagion-cli`)
//! repeatedly calls [`Model::tick`] and reads the population for rendering or
//! logging until [`Model::is_complete`] reports that no cell is infected.

pub mod cell;
pub mod config;
pub mod geometry;
pub mod model;

pub use cell::{Cell, HealthState};
pub use config::{SimConfig, SimConfigError};
pub use model::{
    ExperimentError, HealthCounts, Model, ModelInitError, RunSummary, StepMetrics,
};
