//! Representation of a single coordinate axis of a mesh
//!
//! Coordinates, label, and unit travel together so they can never be
//! misaligned with the data dimension they describe.

// internal modules
use crate::utils::*;

// external crates
use ndarray::Array1;

/// Coordinates of one data dimension, with a label and unit
///
/// The coordinate values are read-only from outside the crate because their
/// length is tied to the shape of the [MeshData](crate::mesh::MeshData) they
/// belong to. The `label` and `unit` are free to change.
///
/// Values do not need to be sorted or even monotonic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshAxis {
    pub(crate) values: Array1<f64>,
    /// Name of the axis, e.g. "delay"
    pub label: String,
    /// Unit string, e.g. "fs"
    pub unit: String,
}

impl MeshAxis {
    /// New axis with an empty label and unit
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshAxis;
    /// # use ndarray::array;
    /// let axis = MeshAxis::new(array![3.0, 2.0, 1.0]);
    /// assert_eq!(axis.len(), 3);
    /// assert_eq!(axis.label, "");
    /// ```
    pub fn new(values: Array1<f64>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    /// Coordinate values in indexing order
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of coordinate values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis has no coordinates at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest coordinate, regardless of ordering
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshAxis;
    /// # use ndarray::array;
    /// let axis = MeshAxis::new(array![2.0, 5.0, -1.0]);
    /// assert_eq!(axis.range(), Some((-1.0, 5.0)));
    /// ```
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((f64_min(&self.values)?, f64_max(&self.values)?))
    }
}

impl std::fmt::Display for MeshAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let unit = if self.unit.is_empty() {
            String::new()
        } else {
            f!(" [{}]", self.unit)
        };
        match self.range() {
            Some((lo, hi)) => write!(
                f,
                "{:?}{unit} {} values, {} to {}",
                self.label,
                self.len(),
                lo.sci(5, 2),
                hi.sci(5, 2)
            ),
            None => write!(f, "{:?}{unit} empty", self.label),
        }
    }
}
