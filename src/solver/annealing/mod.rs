//! Simulated Annealing (SA) over facility opening decisions.
//!
//! A single-solution trajectory search: random neighborhood moves on the
//! open vector, capacity-aware assignment, and a temperature-controlled
//! acceptance rule cooled after each outer iteration.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{AcceptanceRule, AnnealingConfig, CoolingSchedule};
pub use runner::{AnnealingResult, AnnealingRunner};
