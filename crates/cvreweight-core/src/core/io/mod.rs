//! Provides input/output functionality for grid-backed fields.
//!
//! Axis definitions arrive as structured TOML/JSON documents; PMFs and histograms travel
//! as Colvars multicolumn grid streams. Both sides share the trait-based interface in
//! [`traits`].

pub mod axis_def;
pub mod colvars;
pub mod traits;
