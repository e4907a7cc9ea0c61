//! # Workflows Module
//!
//! End-to-end runs over trajectory files. Each workflow loads its grid(s), streams every
//! trajectory in the order given (each file fully consumed before the next is opened)
//! and writes a single output file.
//!
//! - **Histogram** ([`histogram`]) - Axis definitions + trajectories → occupancy grid stream
//! - **Single-PMF Reweighting** ([`reweight`]) - One N-D PMF + trajectories → weighted lines
//! - **egABF Reweighting** ([`egabf`]) - N 1-D PMFs + trajectories → weighted lines

pub mod egabf;
pub mod histogram;
pub mod reweight;
pub(crate) mod streams;
