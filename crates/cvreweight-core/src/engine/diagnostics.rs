use super::state::LineTally;
use std::cell::RefCell;
use tracing::{info, warn};

/// Non-fatal events raised while consuming trajectories.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A sample fell outside the grid and was dropped.
    OutOfGrid {
        stream: String,
        line: usize,
        position: Vec<f64>,
    },
    /// The number of selected columns differs from the PMF dimension.
    DimensionMismatch { columns: usize, dimension: usize },
    /// egABF weights are written without normalization.
    UnnormalizedWeights,
    /// End-of-stream counters.
    StreamSummary { stream: String, tally: LineTally },
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::StreamSummary { .. })
    }
}

/// Receiver of [`Diagnostic`]s, handed to each engine component at construction.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::OutOfGrid {
                stream,
                line,
                position,
            } => warn!(
                "Position {:?} ({}, line {}) is not in the boundary.",
                position, stream, line
            ),
            Diagnostic::DimensionMismatch { columns, dimension } => warn!(
                "The number of columns selected ({}) does not match the dimension of the PMF ({}).",
                columns, dimension
            ),
            Diagnostic::UnnormalizedWeights => warn!("The weight will not be normalized!"),
            Diagnostic::StreamSummary { stream, tally } => {
                info!("Total data lines in {}: {}", stream, tally.total_lines);
                info!("Valid data lines in {}: {}", stream, tally.valid_lines);
            }
        }
    }
}

/// Keeps every diagnostic in memory, for callers that inspect them afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn warning_count(&self) -> usize {
        self.entries.borrow().iter().filter(|d| d.is_warning()).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}
