//! Simulated annealing refinement of a tour.
//!
//! A single-path trajectory search over segment reversals. Worsening moves
//! are accepted with a probability that shrinks as the temperature cools,
//! which lets the search leave 2-opt local optima. The first position of the
//! path (the start point) is never moved. The random generator is passed in
//! by the caller.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::AnnealConfig;
pub use runner::{simulated_anneal, simulated_anneal_with_cancel, AnnealResult, InitialTour};
