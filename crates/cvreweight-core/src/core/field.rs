use super::grid::error::GridError;
use super::grid::lattice::Grid;

/// Capability interface of a grid-backed scalar field.
///
/// The accumulator and the weight evaluators depend only on this trait, never on a
/// concrete storage layout.
pub trait GridField {
    fn grid(&self) -> &Grid;

    fn dimension(&self) -> usize {
        self.grid().dimension()
    }

    fn is_in_grid(&self, position: &[f64]) -> Result<bool, GridError> {
        self.grid().is_in_grid(position)
    }

    /// Value of the bin containing `position`, or `None` outside the grid.
    fn value_at(&self, position: &[f64]) -> Result<Option<f64>, GridError>;

    /// Replaces the value of the bin containing `position`.
    fn set_at(&mut self, position: &[f64], value: f64) -> Result<(), GridError>;

    /// Adds `delta` to the bin containing `position`.
    fn increment_at(&mut self, position: &[f64], delta: f64) -> Result<(), GridError>;
}

/// Dense storage of one `f64` per bin, zero-initialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    grid: Grid,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn zeros(grid: Grid) -> Self {
        let values = vec![0.0; grid.len()];
        Self { grid, values }
    }

    /// Wraps values already laid out in the grid's row-major order.
    pub fn from_values(grid: Grid, values: Vec<f64>) -> Result<Self, GridError> {
        if values.len() != grid.len() {
            return Err(GridError::ValueCountMismatch {
                expected: grid.len(),
                found: values.len(),
            });
        }
        Ok(Self { grid, values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// `(bin center, value)` pairs in storage order.
    pub fn iter_bins(&self) -> impl Iterator<Item = (Vec<f64>, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (self.grid.bin_center(i), value))
    }

    fn slot_mut(&mut self, position: &[f64]) -> Result<&mut f64, GridError> {
        match self.grid.index_of(position)? {
            Some(index) => Ok(&mut self.values[index]),
            None => Err(GridError::OutOfGrid {
                position: position.to_vec(),
            }),
        }
    }
}

impl GridField for ScalarField {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn value_at(&self, position: &[f64]) -> Result<Option<f64>, GridError> {
        Ok(self
            .grid
            .index_of(position)?
            .map(|index| self.values[index]))
    }

    fn set_at(&mut self, position: &[f64], value: f64) -> Result<(), GridError> {
        *self.slot_mut(position)? = value;
        Ok(())
    }

    fn increment_at(&mut self, position: &[f64], delta: f64) -> Result<(), GridError> {
        *self.slot_mut(position)? += delta;
        Ok(())
    }
}
