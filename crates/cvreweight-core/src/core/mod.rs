//! # Core Module
//!
//! Stateless building blocks shared by every consumer of trajectory data.
//!
//! - **Grid Geometry** ([`grid`]) - Axes, N-dimensional lattices, bin mapping and the
//!   half-open membership test
//! - **Per-bin Storage** ([`field`]) - The `GridField` capability trait and its dense
//!   `ScalarField` implementation
//! - **File I/O** ([`io`]) - Axis definition files and the Colvars multicolumn grid stream
//! - **Trajectory Records** ([`trajectory`]) - Line classification and column extraction
//! - **Physical Constants** ([`constants`]) - Boltzmann constant and the default thermal energy

pub mod constants;
pub mod field;
pub mod grid;
pub mod io;
pub mod trajectory;
