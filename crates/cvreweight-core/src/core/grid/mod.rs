//! Grid geometry: per-axis binning and the N-dimensional lattice built from it.
//!
//! Membership is half-open on every axis (`lower <= x < upper`). Axes flagged as
//! periodic keep the flag for serialization only; it never alters bin mapping.

pub mod axis;
pub mod error;
pub mod lattice;
