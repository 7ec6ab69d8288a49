//! Interpolation on rectilinear grids
//!
//! A [GridInterpolator] is built from one strictly increasing coordinate axis
//! per data dimension. The axes do not need to be evenly spaced. Queries
//! outside of the grid return a fill value (zero by default) rather than
//! extrapolating.
//!
//! ```rust
//! # use meshdata::interp::{build_coords, GridInterpolator, Method};
//! # use ndarray::array;
//! let x = array![0.0, 1.0, 2.0];
//! let y = array![0.0, 10.0];
//! let data = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]].into_dyn();
//!
//! let interpolator = GridInterpolator::new(vec![x, y], data, Method::Linear).unwrap();
//!
//! // query the full grid formed by the new axes
//! let grid = build_coords(&[array![0.5, 5.0], array![5.0]]);
//! let values = interpolator.evaluate_grid(grid.view()).unwrap();
//! assert_eq!(values, array![1.5, 0.0]);
//! ```

// internal modules
use crate::error::{Error, Result};
use crate::utils::f;

// external crates
use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2};

/// Interpolation scheme between grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Value of the closest grid point
    Nearest,
    /// Multilinear interpolation between the surrounding grid points
    Linear,
}

impl Method {
    /// Choose a method from a polynomial degree
    ///
    /// A degree of `0` is piecewise constant, anything higher is currently
    /// capped at multilinear.
    ///
    /// ```rust
    /// # use meshdata::interp::Method;
    /// assert_eq!(Method::from_degree(0), Method::Nearest);
    /// assert_eq!(Method::from_degree(2), Method::Linear);
    /// ```
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 => Self::Nearest,
            _ => Self::Linear,
        }
    }
}

/// Interpolating function over a rectilinear grid of data
#[derive(Debug, Clone)]
pub struct GridInterpolator {
    axes: Vec<Array1<f64>>,
    data: ArrayD<f64>,
    method: Method,
    fill_value: f64,
}

impl GridInterpolator {
    /// Build an interpolator from coordinate axes and the data on them
    ///
    /// Fails if the axes do not match the data shape, or if any axis is not
    /// strictly increasing.
    pub fn new(axes: Vec<Array1<f64>>, data: ArrayD<f64>, method: Method) -> Result<Self> {
        if axes.len() != data.ndim() {
            return Err(Error::Shape(f!(
                "{} axes given for {}-dimensional data",
                axes.len(),
                data.ndim()
            )));
        }

        for (j, (axis, &n)) in axes.iter().zip(data.shape()).enumerate() {
            if axis.len() != n {
                return Err(Error::Shape(f!(
                    "axis {j} has {} values, data dimension has {n}",
                    axis.len()
                )));
            }
            if !axis.iter().tuple_windows().all(|(a, b)| a < b) {
                return Err(Error::Unsorted { axis: j });
            }
        }

        Ok(Self {
            axes,
            data,
            method,
            fill_value: 0.0,
        })
    }

    /// Value returned for any query outside of the grid
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Number of dimensions a query point must have
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Interpolated value at a single point
    pub fn evaluate(&self, point: ArrayView1<f64>) -> Result<f64> {
        if point.len() != self.ndim() {
            return Err(Error::Shape(f!(
                "{}-dimensional point for a {}-dimensional grid",
                point.len(),
                self.ndim()
            )));
        }

        let mut cells = Vec::with_capacity(self.ndim());
        for (axis, &x) in self.axes.iter().zip(point.iter()) {
            match locate(axis.view(), x) {
                Some(cell) => cells.push(cell),
                None => return Ok(self.fill_value),
            }
        }

        Ok(match self.method {
            Method::Nearest => self.nearest(&cells),
            Method::Linear => self.linear(&cells),
        })
    }

    /// Interpolated values for every row of an `(n_points, ndim)` array
    pub fn evaluate_grid(&self, points: ArrayView2<f64>) -> Result<Array1<f64>> {
        points.rows().into_iter().map(|p| self.evaluate(p)).collect()
    }

    fn nearest(&self, cells: &[(usize, f64)]) -> f64 {
        let index: Vec<usize> = cells
            .iter()
            .map(|&(i, t)| if t <= 0.5 { i } else { i + 1 })
            .collect();
        self.data[index.as_slice()]
    }

    /// Weighted sum over the 2^ndim corners of the enclosing cell
    fn linear(&self, cells: &[(usize, f64)]) -> f64 {
        let mut index = vec![0; cells.len()];
        let mut total = 0.0;

        'corners: for corner in 0..(1usize << cells.len()) {
            let mut weight = 1.0;
            for (d, &(i, t)) in cells.iter().enumerate() {
                let upper = (corner >> d) & 1 == 1;
                weight *= if upper { t } else { 1.0 - t };
                // zero weights are skipped so exact grid hits stay exact
                if weight == 0.0 {
                    continue 'corners;
                }
                index[d] = if upper { i + 1 } else { i };
            }
            total += weight * self.data[index.as_slice()];
        }

        total
    }
}

/// Lower index of the cell containing `x` and the fractional position in it
///
/// Returns `None` outside of the axis (or for NaN). An axis with a single
/// value only contains that exact value.
fn locate(axis: ArrayView1<f64>, x: f64) -> Option<(usize, f64)> {
    let n = axis.len();
    if n == 0 || !(x >= axis[0] && x <= axis[n - 1]) {
        return None;
    }
    if n == 1 {
        return Some((0, 0.0));
    }

    let upper = axis.iter().take_while(|&&v| v <= x).count();
    let i = upper.saturating_sub(1).min(n - 2);
    let t = (x - axis[i]) / (axis[i + 1] - axis[i]);
    Some((i, t))
}

/// Every combination of coordinates from the given axes
///
/// Returns an `(n_points, ndim)` array with one query point per row, in
/// indexing order (the last axis varies fastest). This is the layout expected
/// by [GridInterpolator::evaluate_grid].
///
/// ```rust
/// # use meshdata::interp::build_coords;
/// # use ndarray::array;
/// let coords = build_coords(&[array![0.0, 1.0], array![5.0, 6.0, 7.0]]);
/// assert_eq!(coords.shape(), &[6, 2]);
/// assert_eq!(coords.row(1), array![0.0, 6.0]);
/// assert_eq!(coords.row(3), array![1.0, 5.0]);
/// ```
pub fn build_coords(axes: &[Array1<f64>]) -> Array2<f64> {
    let n_points = axes.iter().map(|a| a.len()).product();
    let mut coords = Array2::zeros((n_points, axes.len()));

    let combinations = axes
        .iter()
        .map(|a| a.iter().copied())
        .multi_cartesian_product();

    for (mut row, point) in coords.rows_mut().into_iter().zip(combinations) {
        row.assign(&ArrayView1::from(&point));
    }

    coords
}
