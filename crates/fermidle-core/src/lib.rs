//! fermidle-core — Question picking, difficulty scoring, and hint selection.
//!
//! This crate defines the trivia data model and the pure game logic that the
//! `fermidle` CLI builds on: seeded daily question selection, hint ranking,
//! and the ratio-question generator used to build datasets.

pub mod clean;
pub mod config;
pub mod dataset;
pub mod derive;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod hint;
pub mod model;
pub mod question;
pub mod scientific;
pub mod seed;

pub use error::FermidleError;
