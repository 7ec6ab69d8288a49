//! Core mesh library
//!
//! # Overview
//!
//! A mesh is an N-dimensional data array paired with one coordinate axis per
//! dimension. Everything is stored in the common [MeshData] type, and every
//! axis is a [MeshAxis] carrying its own coordinates, label, and unit.
//!
//! Axes are always given in indexing order, i.e. axis `j` holds the
//! coordinates of dimension `j` of the data. This is not necessarily the
//! order anyone would choose for plotting.
//!
//! # Quickstart
//!
//! ```rust
//! use meshdata::mesh::MeshData;
//! use ndarray::{array, Array2};
//!
//! let data = Array2::from_shape_fn((5, 5), |(i, j)| (i * j) as f64).into_dyn();
//! let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
//! let y = array![4.0, 3.0, 2.0, 1.0, 0.0];
//!
//! let mut mesh = MeshData::new(data, vec![x, y])
//!     .unwrap()
//!     .with_labels(&["delay", "wavelength", "intensity"])
//!     .unwrap();
//!
//! // crop the first axis to 1 <= x <= 3, leave the second alone
//! mesh.limit(&[(1.0, 3.0)], Some(&[0])).unwrap();
//! assert_eq!(mesh.shape(), &[3, 5]);
//!
//! // scale to a peak of 1 and put the second axis in increasing order
//! mesh.normalize();
//! mesh.flip(&[1]).unwrap();
//! assert_eq!(mesh.axes()[1].values(), &array![0.0, 1.0, 2.0, 3.0, 4.0]);
//! ```

// Split into subfiles for development, but anything important is re-exported
mod axis;
mod core;

// inline important the mesh-related modules for a nice public API
#[doc(inline)]
pub use crate::mesh::axis::MeshAxis;

#[doc(inline)]
pub use crate::mesh::core::{MeshData, DEFAULT_DEGREE, DEFAULT_PADDING, DEFAULT_THRESHOLD};
