//! # cvreweight Core Library
//!
//! Post-processing of collective-variable (CV) trajectories against precomputed
//! free-energy grids: occupancy histograms and PMF-based importance weights.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless grid geometry (`Axis`, `Grid`), dense per-bin
//!   storage (`ScalarField` behind the `GridField` trait), trajectory record parsing and
//!   the file formats for axis definitions and grid streams.
//!
//! - **[`engine`]: The Logic Core.** The consumers of trajectory lines: the
//!   `HistogramAccumulator`, the single-grid `PmfWeightEvaluator` and the egABF
//!   `MultiAxisWeightEvaluator`, together with diagnostics, configuration and errors.
//!
//! - **[`workflows`]: The Public API.** End-to-end runs that load the grids, stream every
//!   trajectory file in order and write the results.

pub mod core;
pub mod engine;
pub mod workflows;
