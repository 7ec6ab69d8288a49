//! # The MeshData crate
//!
//! Tools for holding and pre-processing N-dimensional data measured on a
//! rectilinear coordinate mesh
//!
//! ## Overview
//!
//! Measurement and analysis pipelines frequently end up with a data array and
//! a coordinate axis for each of its dimensions, e.g. a spectrogram over delay
//! and wavelength. Before anything interesting happens, those data usually
//! need cropping to the region of interest, resampling onto a more convenient
//! grid, and normalising.
//!
//! All of that is done on the core [MeshData](crate::mesh::MeshData) struct:
//!
//! | Method        | Description                                            |
//! | ------------- | ------------------------------------------------------ |
//! | `normalize`   | Scale the data to a maximum of 1                       |
//! | `marginals`   | Sum the data onto each axis                            |
//! | `limit`       | Crop to explicit coordinate ranges                     |
//! | `autolimit`   | Crop to where the marginals are significant            |
//! | `interpolate` | Resample onto new coordinate axes                      |
//! | `flip`        | Reverse axes without changing the coordinate mapping   |
//!
//! ## Command line
//!
//! The `meshprep` tool applies the same operations to a mesh saved to file.
//! It is fully documented with a detailed `--help` message.
//!
//! ## Example
//!
//! ```rust
//! use meshdata::mesh::{MeshData, DEFAULT_DEGREE, DEFAULT_PADDING, DEFAULT_THRESHOLD};
//! use ndarray::{Array1, Array2};
//!
//! // a gaussian blob in the middle of a 41x31 grid
//! let x = Array1::<f64>::linspace(-20.0, 20.0, 41);
//! let y = Array1::<f64>::linspace(-15.0, 15.0, 31);
//! let data = Array2::from_shape_fn((41, 31), |(i, j)| {
//!     (-(x[i] * x[i] + y[j] * y[j]) / 8.0).exp()
//! });
//!
//! let mut mesh = MeshData::new(data.into_dyn(), vec![x, y]).unwrap();
//!
//! // crop to the blob, resample the first axis and scale to 1
//! mesh.autolimit(&[], DEFAULT_THRESHOLD, DEFAULT_PADDING).unwrap();
//! mesh.interpolate(&[Some(Array1::linspace(-5.0, 5.0, 11))], DEFAULT_DEGREE, false)
//!     .unwrap();
//! mesh.normalize();
//!
//! assert_eq!(mesh.shape()[0], 11);
//! ```
//!
//! As an overview:
//! - The [mesh] module contains the container and all operations on it.
//! - The [stats] module computes marginals and significant regions.
//! - The [interp] module provides the rectilinear grid interpolator.
//! - The [io] module saves and loads meshes as JSON or binary.
//!
//! Everything returns the crate [Result], with all the ways an operation can
//! fail listed in [Error].

// Public facing modules
pub mod error;
pub mod interp;
pub mod io;
pub mod mesh;
pub mod stats;
pub mod utils;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::mesh::{MeshAxis, MeshData};
