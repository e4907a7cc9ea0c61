use super::axis::Axis;
use super::error::GridError;

/// An N-dimensional lattice of independent axes.
///
/// Bins are laid out row-major: the last axis varies fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Axis>,
    strides: Vec<usize>,
    len: usize,
}

impl Grid {
    pub fn new(axes: Vec<Axis>) -> Result<Self, GridError> {
        if axes.is_empty() {
            return Err(GridError::EmptyGrid);
        }

        let mut strides: Vec<usize> = vec![1; axes.len()];
        for i in (0..axes.len() - 1).rev() {
            strides[i] = strides[i + 1]
                .checked_mul(axes[i + 1].bins())
                .ok_or(GridError::TooManyBins)?;
        }
        let len = strides[0]
            .checked_mul(axes[0].bins())
            .ok_or(GridError::TooManyBins)?;

        Ok(Self { axes, strides, len })
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// Total number of bins.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check_dimension(&self, position: &[f64]) -> Result<(), GridError> {
        if position.len() != self.dimension() {
            return Err(GridError::DimensionMismatch {
                expected: self.dimension(),
                found: position.len(),
            });
        }
        Ok(())
    }

    /// True iff every component lies in its axis' half-open range.
    ///
    /// A position of the wrong length is an error, never a silent `false`.
    pub fn is_in_grid(&self, position: &[f64]) -> Result<bool, GridError> {
        self.check_dimension(position)?;
        Ok(self
            .axes
            .iter()
            .zip(position)
            .all(|(axis, &value)| axis.contains(value)))
    }

    /// Per-axis bin indices. The caller must have checked [`Grid::is_in_grid`].
    pub fn to_bin_indices(&self, position: &[f64]) -> Vec<usize> {
        self.axes
            .iter()
            .zip(position)
            .map(|(axis, &value)| axis.bin_index(value))
            .collect()
    }

    /// Dense offset of an in-grid position. The caller must have checked [`Grid::is_in_grid`].
    pub(crate) fn linear_index(&self, position: &[f64]) -> usize {
        self.axes
            .iter()
            .zip(position)
            .zip(&self.strides)
            .map(|((axis, &value), stride)| axis.bin_index(value) * stride)
            .sum()
    }

    /// Dense offset of `position`, or `None` when it falls outside the grid.
    pub fn index_of(&self, position: &[f64]) -> Result<Option<usize>, GridError> {
        if self.is_in_grid(position)? {
            Ok(Some(self.linear_index(position)))
        } else {
            Ok(None)
        }
    }

    /// Inverse of the row-major layout: bin indices of a dense offset.
    pub fn unravel(&self, mut linear: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|stride| {
                let index = linear / stride;
                linear %= stride;
                index
            })
            .collect()
    }

    pub fn bin_center(&self, linear: usize) -> Vec<f64> {
        self.unravel(linear)
            .into_iter()
            .zip(&self.axes)
            .map(|(index, axis)| axis.bin_center(index))
            .collect()
    }
}
