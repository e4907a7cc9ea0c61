//! # Engine Module
//!
//! The stateful consumers of trajectory data and the plumbing they share.
//!
//! ## Overview
//!
//! Every consumer reads a trajectory one line at a time, classifies it (comment, blank or
//! data record), extracts the configured columns as a position and checks it against its
//! grid before touching any bin. Non-fatal events flow to a [`diagnostics::DiagnosticSink`]
//! supplied at construction; fatal conditions surface as [`error::EngineError`].
//!
//! ## Architecture
//!
//! - **Accumulation** ([`accumulator`]) - Occupancy histograms over a zero-initialized field
//! - **Single-grid Reweighting** ([`weights`]) - Boltzmann weights from one N-dimensional PMF
//! - **egABF Reweighting** ([`egabf`]) - Boltzmann weights from a sum of 1-D PMFs
//! - **Configuration** ([`config`]) - Validated run parameters and their builders
//! - **Diagnostics** ([`diagnostics`]) - Out-of-grid and dimension warnings, stream summaries
//! - **Progress Monitoring** ([`progress`]) - Phase and per-file progress events
//! - **Run State** ([`state`]) - Line tallies per stream and per run
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod accumulator;
pub mod config;
pub mod diagnostics;
pub mod egabf;
pub mod error;
pub mod progress;
pub mod state;
pub(crate) mod utils;
pub mod weights;
