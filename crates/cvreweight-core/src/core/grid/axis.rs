use super::error::GridError;

/// Relative tolerance (in units of bin width) when checking `lower + width * bins == upper`.
pub const AXIS_TOLERANCE: f64 = 1e-6;

/// Geometry of one grid dimension.
///
/// The covered interval is half-open, `[lower, upper)`, and is split into `bins`
/// equal-width cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    lower: f64,
    upper: f64,
    width: f64,
    bins: usize,
    periodic: bool,
}

impl Axis {
    /// Builds an axis from its bounds and bin width, deriving the bin count.
    pub fn new(lower: f64, upper: f64, width: f64) -> Result<Self, GridError> {
        let invalid = |reason| GridError::InvalidAxis {
            lower,
            upper,
            width,
            reason,
        };

        if !(lower.is_finite() && upper.is_finite() && width.is_finite()) {
            return Err(invalid("bounds and width must be finite"));
        }
        if width <= 0.0 {
            return Err(invalid("width must be positive"));
        }
        if lower >= upper {
            return Err(invalid("lower bound must be below upper bound"));
        }

        let bins = ((upper - lower) / width).round();
        if bins < 1.0 {
            return Err(invalid("axis must contain at least one bin"));
        }
        let bins = bins as usize;
        if (lower + width * bins as f64 - upper).abs() > AXIS_TOLERANCE * width {
            return Err(invalid("range is not an integer multiple of the width"));
        }

        Ok(Self {
            lower,
            upper,
            width,
            bins,
            periodic: false,
        })
    }

    /// Builds an axis from its bounds and bin count, deriving the bin width.
    pub fn with_bins(lower: f64, upper: f64, bins: usize) -> Result<Self, GridError> {
        if bins == 0 {
            return Err(GridError::InvalidAxis {
                lower,
                upper,
                width: f64::NAN,
                reason: "axis must contain at least one bin",
            });
        }
        Self::new(lower, upper, (upper - lower) / bins as f64)
    }

    /// Builds an axis from a lower bound, width and bin count (the grid-stream header form).
    pub fn from_lower_width_bins(lower: f64, width: f64, bins: usize) -> Result<Self, GridError> {
        if bins == 0 {
            return Err(GridError::InvalidAxis {
                lower,
                upper: lower,
                width,
                reason: "axis must contain at least one bin",
            });
        }
        Self::new(lower, lower + width * bins as f64, width)
    }

    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Half-open membership test: `lower <= value < upper`. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }

    /// `floor((value - lower) / width)`, clamped to the last bin.
    ///
    /// Only meaningful for values that pass [`Axis::contains`]; the clamp absorbs
    /// rounding just below `upper`.
    #[inline]
    pub fn bin_index(&self, value: f64) -> usize {
        let raw = ((value - self.lower) / self.width).floor();
        (raw.max(0.0) as usize).min(self.bins - 1)
    }

    pub fn bin_center(&self, index: usize) -> f64 {
        self.lower + (index as f64 + 0.5) * self.width
    }
}
