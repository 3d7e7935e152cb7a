//! Core operations.
//!
//! This module contains the business logic for kiln commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod info;
pub mod run;

pub use check::check;
pub use info::info;
pub use run::{RunOptions, run};
