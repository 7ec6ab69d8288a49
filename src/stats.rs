//! Reductions used to find the interesting region of a mesh
//!
//! [marginals] collapses the data onto each axis, and [find_threshold_limit]
//! turns one of those profiles into a coordinate interval worth keeping. The
//! [MeshData::autolimit()](crate::MeshData::autolimit) method is simply these
//! two chained into [MeshData::limit()](crate::MeshData::limit).

// internal modules
use crate::error::{Error, Result};
use crate::utils::{f64_max, f64_min};

// external crates
use log::{trace, warn};
use ndarray::{s, Array1, ArrayD, ArrayView1, Axis};

/// Marginal profiles of the data along the requested axes
///
/// For every axis in `axes` (default: all of them, in order), the data are
/// summed over every other dimension to leave a 1D profile with one value per
/// sample along that axis.
///
/// ```rust
/// # use meshdata::stats::marginals;
/// # use ndarray::array;
/// let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
/// let m = marginals(&data, None).unwrap();
/// assert_eq!(m[0], array![3.0, 7.0]);
/// assert_eq!(m[1], array![4.0, 6.0]);
/// ```
pub fn marginals(data: &ArrayD<f64>, axes: Option<&[usize]>) -> Result<Vec<Array1<f64>>> {
    let ndim = data.ndim();
    let all_axes: Vec<usize> = (0..ndim).collect();
    let axes = axes.unwrap_or(&all_axes);

    axes.iter()
        .map(|&axis| {
            if axis >= ndim {
                return Err(Error::AxisIndex { axis, ndim });
            }
            trace!("Marginal along axis {axis}");
            Ok(data.axis_iter(Axis(axis)).map(|view| view.sum()).collect())
        })
        .collect()
}

/// Coordinate interval where a marginal is significant, plus some padding
///
/// The interval spans every coordinate from the first to the last sample
/// with `marginal > threshold * max(marginal)`. The width of that interval is
/// then extended by `padding` (a fraction of the width) on both sides, so
/// the result may reach beyond the axis itself.
///
/// The axis is not assumed to be sorted. The bounds are the smallest and
/// largest coordinates found in the significant region.
///
/// If nothing exceeds the threshold (e.g. all zero), the full axis range is
/// used before padding.
///
/// ```rust
/// # use meshdata::stats::find_threshold_limit;
/// # use ndarray::array;
/// let axis = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let marginal = array![0.0, 0.0, 1.0, 2.0, 0.0, 0.0];
/// assert_eq!(find_threshold_limit(axis.view(), marginal.view(), 0.1, 0.5), (1.5, 3.5));
/// ```
pub fn find_threshold_limit(
    axis: ArrayView1<f64>,
    marginal: ArrayView1<f64>,
    threshold: f64,
    padding: f64,
) -> (f64, f64) {
    let cutoff = threshold * f64_max(marginal.iter()).unwrap_or(0.0);

    let first = marginal.iter().position(|&m| m > cutoff);
    let last = marginal.iter().rposition(|&m| m > cutoff);

    let region = match (first, last) {
        (Some(first), Some(last)) => axis.slice_move(s![first..=last]),
        _ => {
            warn!("No marginal values above threshold, using the full axis");
            axis
        }
    };

    let x1 = f64_min(region.iter()).unwrap_or(f64::NAN);
    let x2 = f64_max(region.iter()).unwrap_or(f64::NAN);
    let width = x2 - x1;

    trace!("Significant region [{x1}, {x2}], padding {padding}");
    (x1 - padding * width, x2 + padding * width)
}
