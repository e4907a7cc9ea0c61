use crate::core::field::ScalarField;
use crate::core::grid::axis::Axis;
use crate::core::grid::error::GridError;
use crate::core::grid::lattice::Grid;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// One `[[axes]]` entry of an axis-definition file.
///
/// Exactly one of `width` and `bins` is normally given; when both are present they
/// must describe the same partition.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AxisDefinition {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub width: Option<f64>,
    pub bins: Option<usize>,
    #[serde(default)]
    pub periodic: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridDefinition {
    pub axes: Vec<AxisDefinition>,
}

#[derive(Debug, Error)]
pub enum AxisDefinitionError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid axis definition in '{path}': {source}")]
    Invalid { path: String, source: GridError },
}

impl AxisDefinition {
    pub fn to_axis(&self) -> Result<Axis, GridError> {
        let (lower, upper) = (self.lower_bound, self.upper_bound);
        let axis = match (self.width, self.bins) {
            (Some(width), None) => Axis::new(lower, upper, width)?,
            (None, Some(bins)) => Axis::with_bins(lower, upper, bins)?,
            (Some(width), Some(bins)) => {
                let axis = Axis::new(lower, upper, width)?;
                if axis.bins() != bins {
                    return Err(GridError::InvalidAxis {
                        lower,
                        upper,
                        width,
                        reason: "bin count disagrees with width",
                    });
                }
                axis
            }
            (None, None) => {
                return Err(GridError::InvalidAxis {
                    lower,
                    upper,
                    width: f64::NAN,
                    reason: "either width or bins must be given",
                });
            }
        };
        Ok(axis.periodic(self.periodic))
    }
}

impl GridDefinition {
    /// Loads a definition, choosing JSON for `.json` files and TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, AxisDefinitionError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| AxisDefinitionError::Io {
            path: path_str.clone(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content).map_err(|e| AxisDefinitionError::Json {
                path: path_str,
                source: e,
            })
        } else {
            toml::from_str(&content).map_err(|e| AxisDefinitionError::Toml {
                path: path_str,
                source: e,
            })
        }
    }

    pub fn to_grid(&self) -> Result<Grid, GridError> {
        let axes = self
            .axes
            .iter()
            .map(AxisDefinition::to_axis)
            .collect::<Result<Vec<_>, _>>()?;
        Grid::new(axes)
    }

    /// Reads `path` and builds the all-zero field used for accumulation.
    pub fn load_zero_field(path: &Path) -> Result<ScalarField, AxisDefinitionError> {
        let grid = Self::load(path)?
            .to_grid()
            .map_err(|e| AxisDefinitionError::Invalid {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Ok(ScalarField::zeros(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::GridField;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn toml_definition_builds_a_zero_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("axes.toml");
        fs::write(
            &path,
            r#"
            [[axes]]
            lower-bound = 0.0
            upper-bound = 2.0
            width = 1.0

            [[axes]]
            lower-bound = -180.0
            upper-bound = 180.0
            bins = 36
            periodic = true
            "#,
        )
        .unwrap();

        let field = GridDefinition::load_zero_field(&path).unwrap();
        assert_eq!(field.dimension(), 2);
        assert_eq!(field.len(), 72);
        assert_eq!(field.sum(), 0.0);
        let axes = field.grid().axes();
        assert_eq!(axes[0].bins(), 2);
        assert!((axes[1].width() - 10.0).abs() < 1e-12);
        assert!(axes[1].is_periodic());
    }

    #[test]
    fn json_definition_is_selected_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("axes.JSON");
        fs::write(
            &path,
            r#"{ "axes": [ { "lower-bound": 0.0, "upper-bound": 1.0, "width": 0.25 } ] }"#,
        )
        .unwrap();

        let field = GridDefinition::load_zero_field(&path).unwrap();
        assert_eq!(field.dimension(), 1);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn width_and_bins_must_agree_when_both_are_given() {
        let def = AxisDefinition {
            lower_bound: 0.0,
            upper_bound: 2.0,
            width: Some(1.0),
            bins: Some(2),
            periodic: false,
        };
        assert!(def.to_axis().is_ok());

        let def = AxisDefinition {
            bins: Some(3),
            ..def
        };
        assert!(matches!(def.to_axis(), Err(GridError::InvalidAxis { .. })));

        let def = AxisDefinition {
            width: None,
            bins: None,
            ..def
        };
        assert!(def.to_axis().is_err());
    }

    #[test]
    fn unknown_keys_and_empty_axis_lists_are_rejected() {
        let dir = tempdir().unwrap();

        let path = dir.path().join("typo.toml");
        fs::write(
            &path,
            "[[axes]]\nlower-bound = 0.0\nupper-bound = 1.0\nwidht = 0.5\n",
        )
        .unwrap();
        assert!(matches!(
            GridDefinition::load_zero_field(&path),
            Err(AxisDefinitionError::Toml { .. })
        ));

        let path = dir.path().join("empty.toml");
        fs::write(&path, "axes = []\n").unwrap();
        assert!(matches!(
            GridDefinition::load_zero_field(&path),
            Err(AxisDefinitionError::Invalid {
                source: GridError::EmptyGrid,
                ..
            })
        ));
    }

    #[test]
    fn malformed_json_and_missing_files_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ \"axes\": [ ").unwrap();
        assert!(matches!(
            GridDefinition::load(&path),
            Err(AxisDefinitionError::Json { .. })
        ));
        assert!(matches!(
            GridDefinition::load(&dir.path().join("missing.toml")),
            Err(AxisDefinitionError::Io { .. })
        ));
    }
}
