use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid axis [{lower}, {upper}) with width {width}: {reason}")]
    InvalidAxis {
        lower: f64,
        upper: f64,
        width: f64,
        reason: &'static str,
    },

    #[error("A grid requires at least one axis")]
    EmptyGrid,

    #[error("The product of the bin counts does not fit in a machine word")]
    TooManyBins,

    #[error("Position has {found} component(s) but the grid has dimension {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Position {position:?} lies outside the grid")]
    OutOfGrid { position: Vec<f64> },

    #[error("Grid has {expected} bin(s) but {found} value(s) were supplied")]
    ValueCountMismatch { expected: usize, found: usize },
}
