// internal modules
use crate::error::{Error, Result};
use crate::interp::{build_coords, GridInterpolator, Method};
use crate::mesh::MeshAxis;
use crate::stats;
use crate::utils::*;

// standard library
use std::cmp::Ordering;

// external crates
use itertools::Itertools;
use log::{debug, trace};
use ndarray::{s, Array1, ArrayD, Axis, Slice};

/// Fraction of the marginal peak used by [MeshData::autolimit()]
pub const DEFAULT_THRESHOLD: f64 = 1e-2;

/// Fraction of the significant width added to each side by
/// [MeshData::autolimit()]
pub const DEFAULT_PADDING: f64 = 0.25;

/// Interpolation degree commonly used with [MeshData::interpolate()]
pub const DEFAULT_DEGREE: usize = 2;

/// N-dimensional data on a rectilinear coordinate mesh
///
/// Holds a dense `f64` data array and one [MeshAxis] per data dimension, in
/// indexing order. The data values themselves have their own `label` and
/// `unit`.
///
/// The mesh owns everything it holds, and [Clone] is a full deep copy, so a
/// cloned mesh can be modified without touching the original.
///
/// The invariants are checked on construction and maintained by every method:
/// - there is exactly one axis per data dimension
/// - axis `j` has exactly `shape()[j]` coordinates
///
/// Every mutating method resolves everything it needs before replacing any
/// data. A method that returns an error leaves the mesh untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    data: ArrayD<f64>,
    axes: Vec<MeshAxis>,
    /// Name of the data values, e.g. "intensity"
    pub label: String,
    /// Unit of the data values
    pub unit: String,
}

/// Construction and accessors
impl MeshData {
    /// Creates a new mesh from data and coordinate axes
    ///
    /// The `axes` must be given in indexing order, one per data dimension, and
    /// each must have the same length as the corresponding data dimension.
    /// Labels and units default to empty strings.
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshData;
    /// # use ndarray::{array, Array2};
    /// let data = Array2::<f64>::zeros((2, 3)).into_dyn();
    /// let mesh = MeshData::new(data.clone(), vec![array![0.0, 1.0], array![0.0, 1.0, 2.0]]);
    /// assert!(mesh.is_ok());
    ///
    /// // one axis is too short
    /// let mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, 1.0]]);
    /// assert!(mesh.is_err());
    /// ```
    pub fn new(data: ArrayD<f64>, axes: Vec<Array1<f64>>) -> Result<Self> {
        if data.ndim() == 0 {
            return Err(Error::Shape("data must have at least one dimension".into()));
        }

        if axes.len() != data.ndim() {
            return Err(Error::Shape(f!(
                "{} axes supplied for {}-dimensional data",
                axes.len(),
                data.ndim()
            )));
        }

        for (j, (axis, &n)) in axes.iter().zip(data.shape()).enumerate() {
            if axis.len() != n {
                return Err(Error::Shape(f!(
                    "axis {j} has {} values but the data has {n} along that dimension",
                    axis.len()
                )));
            }
        }

        Ok(Self {
            data,
            axes: axes.into_iter().map(MeshAxis::new).collect(),
            label: String::new(),
            unit: String::new(),
        })
    }

    /// Set labels for every axis, and optionally the data
    ///
    /// Accepts either one label per axis, or one extra at the end to label
    /// the data values themselves.
    pub fn with_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Result<Self> {
        let data_label = self.distribute("labels", labels, |axis, l| axis.label = l)?;
        if let Some(label) = data_label {
            self.label = label;
        }
        Ok(self)
    }

    /// Set units for every axis, and optionally the data
    ///
    /// Same rules as [MeshData::with_labels()].
    pub fn with_units<S: AsRef<str>>(mut self, units: &[S]) -> Result<Self> {
        let data_unit = self.distribute("units", units, |axis, u| axis.unit = u)?;
        if let Some(unit) = data_unit {
            self.unit = unit;
        }
        Ok(self)
    }

    /// Hands one string to each axis and returns the trailing data entry
    fn distribute<S, F>(
        &mut self,
        kind: &'static str,
        values: &[S],
        set: F,
    ) -> Result<Option<String>>
    where
        S: AsRef<str>,
        F: Fn(&mut MeshAxis, String),
    {
        let ndim = self.ndim();
        if values.len() != ndim && values.len() != ndim + 1 {
            return Err(Error::LabelCount {
                kind,
                ndim,
                found: values.len(),
            });
        }

        for (axis, value) in self.axes.iter_mut().zip(values) {
            set(axis, value.as_ref().to_string());
        }

        Ok(values.get(ndim).map(|v| v.as_ref().to_string()))
    }

    /// Size of the data along every dimension
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of data dimensions, which is also the number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// The data array
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// All axes in indexing order
    pub fn axes(&self) -> &[MeshAxis] {
        &self.axes
    }

    /// Rename axis `j`
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshData;
    /// # use ndarray::array;
    /// let data = array![[1.0, 2.0]].into_dyn();
    /// let mut mesh = MeshData::new(data, vec![array![0.0], array![0.0, 1.0]]).unwrap();
    /// mesh.set_label(1, "delay").unwrap();
    /// assert_eq!(mesh.labels(), vec!["", "delay", ""]);
    /// assert!(mesh.set_label(2, "oops").is_err());
    /// ```
    pub fn set_label<S: Into<String>>(&mut self, j: usize, label: S) -> Result<()> {
        self.check_axis(j)?;
        self.axes[j].label = label.into();
        Ok(())
    }

    /// Change the unit of axis `j`
    pub fn set_unit<S: Into<String>>(&mut self, j: usize, unit: S) -> Result<()> {
        self.check_axis(j)?;
        self.axes[j].unit = unit.into();
        Ok(())
    }

    /// Axis `j`, if it exists
    pub fn axis(&self, j: usize) -> Option<&MeshAxis> {
        self.axes.get(j)
    }

    /// Labels of every axis followed by the data label (`ndim + 1` entries)
    pub fn labels(&self) -> Vec<&str> {
        self.axes
            .iter()
            .map(|a| a.label.as_str())
            .chain(std::iter::once(self.label.as_str()))
            .collect()
    }

    /// Units of every axis followed by the data unit (`ndim + 1` entries)
    pub fn units(&self) -> Vec<&str> {
        self.axes
            .iter()
            .map(|a| a.unit.as_str())
            .chain(std::iter::once(self.unit.as_str()))
            .collect()
    }

    /// Make sure an axis index refers to a dimension of the data
    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.ndim() {
            return Err(Error::AxisIndex {
                axis,
                ndim: self.ndim(),
            });
        }
        Ok(())
    }

    /// Every axis index in order, used whenever no axes are requested
    fn all_axes(&self) -> Vec<usize> {
        (0..self.ndim()).collect()
    }
}

/// Data manipulation
impl MeshData {
    /// Scales the data so that the maximum value is 1
    ///
    /// Nothing guards against a maximum of zero, in which case the data end up
    /// as NaN/inf.
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshData;
    /// # use ndarray::array;
    /// let data = array![[2.0, 4.0], [6.0, 8.0]].into_dyn();
    /// let mut mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, 1.0]]).unwrap();
    /// mesh.normalize();
    /// assert_eq!(mesh.data(), &array![[0.25, 0.5], [0.75, 1.0]].into_dyn());
    /// ```
    pub fn normalize(&mut self) {
        if let Some(max) = f64_max(&self.data) {
            debug!("Normalising data to maximum of {}", max.sci(5, 2));
            self.data.mapv_inplace(|v| v / max);
        }
    }

    /// Marginal profiles of the data along the requested axes (default: all)
    ///
    /// See [stats::marginals](crate::stats::marginals).
    pub fn marginals(&self, axes: Option<&[usize]>) -> Result<Vec<Array1<f64>>> {
        stats::marginals(&self.data, axes)
    }

    /// Crop to the region where the marginals are significant
    ///
    /// For every axis in `axes` (all axes if empty), the marginal profile is
    /// computed and the coordinate range where it exceeds `threshold` times
    /// its peak is found. That range is widened by `padding` times its width
    /// on each side and passed on to [MeshData::limit()].
    ///
    /// Typical values are [DEFAULT_THRESHOLD] and [DEFAULT_PADDING].
    ///
    /// ```rust
    /// # use meshdata::mesh::{MeshData, DEFAULT_THRESHOLD};
    /// # use ndarray::{array, Array1, Array2};
    /// let x = Array1::<f64>::linspace(-10.0, 10.0, 21);
    /// let data = Array2::from_shape_fn((21, 1), |(i, _)| (-x[i] * x[i] / 2.0).exp()).into_dyn();
    /// let mut mesh = MeshData::new(data, vec![x, array![0.0]]).unwrap();
    ///
    /// // significant for |x| <= 3, so padding by half the width keeps |x| <= 6
    /// mesh.autolimit(&[0], DEFAULT_THRESHOLD, 0.5).unwrap();
    /// assert_eq!(mesh.shape(), &[13, 1]);
    /// ```
    pub fn autolimit(&mut self, axes: &[usize], threshold: f64, padding: f64) -> Result<()> {
        let axes = if axes.is_empty() {
            self.all_axes()
        } else {
            axes.to_vec()
        };
        debug!("Automatic limits for axes {axes:?}");

        let marginals = stats::marginals(&self.data, Some(axes.as_slice()))?;
        let limits: Vec<(f64, f64)> = axes
            .iter()
            .zip(&marginals)
            .map(|(&j, marginal)| {
                let limit = stats::find_threshold_limit(
                    self.axes[j].values.view(),
                    marginal.view(),
                    threshold,
                    padding,
                );
                trace!("  - axis {j}: {limit:?}");
                limit
            })
            .collect();

        self.limit(&limits, Some(axes.as_slice()))
    }

    /// Crop the mesh to coordinate ranges
    ///
    /// One `(x1, x2)` pair is needed for every axis in `axes`, which defaults
    /// to all axes in order. Axes that are not requested are left alone.
    ///
    /// For each requested axis, the samples closest to `x1` and `x2` are found
    /// and everything between them is kept, both ends included. Nothing is
    /// assumed about the ordering of the axis or of `x1` and `x2`, so
    /// `(x1, x2)` and `(x2, x1)` give the same result.
    ///
    /// Fails if the number of limits does not match the axes, or if both
    /// bounds land on the same sample. If an axis is listed more than once,
    /// only its first pair of limits is used.
    pub fn limit(&mut self, limits: &[(f64, f64)], axes: Option<&[usize]>) -> Result<()> {
        let all_axes = self.all_axes();
        let axes = axes.unwrap_or(&all_axes);

        if axes.len() != limits.len() {
            return Err(Error::Arity {
                expected: axes.len(),
                found: limits.len(),
            });
        }

        // resolve every index range before touching anything
        let mut ranges: Vec<Option<(usize, usize)>> = vec![None; self.ndim()];
        for (&j, &(x1, x2)) in axes.iter().zip(limits) {
            self.check_axis(j)?;
            if ranges[j].is_some() {
                continue;
            }
            ranges[j] = Some(self.index_range(j, x1, x2)?);
        }

        let mut view = self.data.view();
        let mut new_axes = Vec::with_capacity(axes.len());
        for (j, range) in ranges.iter().enumerate() {
            if let Some((idx1, idx2)) = *range {
                trace!("  - axis {j}: keeping indices {idx1}..={idx2}");
                let slice = Slice::from(idx1..=idx2);
                view.slice_axis_inplace(Axis(j), slice);
                new_axes.push((j, self.axes[j].values.slice_axis(Axis(0), slice).to_owned()));
            }
        }

        debug!("Limited mesh from {:?} to {:?}", self.shape(), view.shape());
        self.data = view.to_owned();
        for (j, values) in new_axes {
            self.axes[j].values = values;
        }

        Ok(())
    }

    /// Sorted index range of the samples closest to `x1` and `x2` on axis `j`
    fn index_range(&self, j: usize, x1: f64, x2: f64) -> Result<(usize, usize)> {
        let values = &self.axes[j].values;

        // NaN bounds find nothing, which is as empty as it gets
        let (idx1, idx2) = match (nearest_index(values, x1), nearest_index(values, x2)) {
            (Some(idx1), Some(idx2)) => (idx1, idx2),
            _ => return Err(Error::EmptySlice { axis: j }),
        };

        match idx1.cmp(&idx2) {
            Ordering::Less => Ok((idx1, idx2)),
            Ordering::Greater => Ok((idx2, idx1)),
            Ordering::Equal => Err(Error::EmptySlice { axis: j }),
        }
    }

    /// Resample the data onto new coordinate axes
    ///
    /// `targets` holds an optional new axis for each dimension in order. Any
    /// dimension without a target (`None`, or beyond the end of `targets`)
    /// keeps its current coordinates.
    ///
    /// Interpolation needs strictly increasing axes, so unless `sorted` is set
    /// every axis is sorted first and the data reordered to match. Setting
    /// `sorted` for axes that are not actually increasing is an error.
    ///
    /// The data are evaluated on every combination of the target coordinates.
    /// Anything outside the current mesh is set to zero. A `degree` of `0` is
    /// nearest neighbour, otherwise multilinear (see
    /// [Method::from_degree()](crate::interp::Method::from_degree)).
    ///
    /// ```rust
    /// # use meshdata::mesh::{MeshData, DEFAULT_DEGREE};
    /// # use ndarray::array;
    /// let data = array![[0.0, 1.0], [2.0, 3.0]].into_dyn();
    /// let mut mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, 1.0]]).unwrap();
    ///
    /// mesh.interpolate(&[Some(array![0.0, 0.5, 1.0, 2.0])], DEFAULT_DEGREE, false).unwrap();
    /// assert_eq!(mesh.shape(), &[4, 2]);
    /// assert_eq!(mesh.data(), &array![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0], [0.0, 0.0]].into_dyn());
    /// ```
    pub fn interpolate(
        &mut self,
        targets: &[Option<Array1<f64>>],
        degree: usize,
        sorted: bool,
    ) -> Result<()> {
        let ndim = self.ndim();
        if targets.len() > ndim {
            return Err(Error::Arity {
                expected: ndim,
                found: targets.len(),
            });
        }

        let targets: Vec<Array1<f64>> = (0..ndim)
            .map(|j| match targets.get(j) {
                Some(Some(target)) => target.clone(),
                _ => self.axes[j].values.clone(),
            })
            .collect();

        let mut source_axes: Vec<Array1<f64>> =
            self.axes.iter().map(|a| a.values.clone()).collect();
        let mut source_data = self.data.clone();

        if !sorted {
            for (j, axis) in source_axes.iter_mut().enumerate() {
                let idx = argsort(axis.iter());
                *axis = axis.select(Axis(0), &idx);
                source_data = source_data.select(Axis(j), &idx);
            }
        }

        let method = Method::from_degree(degree);
        debug!("Interpolating ({method:?}) from {:?}", self.shape());

        let interpolator = GridInterpolator::new(source_axes, source_data, method)?;
        let values = interpolator.evaluate_grid(build_coords(&targets).view())?;

        let shape: Vec<usize> = targets.iter().map(|t| t.len()).collect();
        let data = values
            .into_shape(shape)
            .map_err(|e| Error::Shape(e.to_string()))?;

        debug!("Interpolated onto {:?}", data.shape());
        self.data = data;
        for (axis, target) in self.axes.iter_mut().zip(targets) {
            axis.values = target;
        }

        Ok(())
    }

    /// Reverse the order of the given axes and the data along them
    ///
    /// The coordinate of every data value is unchanged, so flipping an axis
    /// twice restores the original mesh. Axes listed more than once are only
    /// flipped once.
    ///
    /// ```rust
    /// # use meshdata::mesh::MeshData;
    /// # use ndarray::array;
    /// let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    /// let mut mesh = MeshData::new(data, vec![array![0.0, 1.0], array![5.0, 6.0]]).unwrap();
    /// mesh.flip(&[0]).unwrap();
    /// assert_eq!(mesh.data(), &array![[3.0, 4.0], [1.0, 2.0]].into_dyn());
    /// assert_eq!(mesh.axes()[0].values(), &array![1.0, 0.0]);
    /// ```
    pub fn flip(&mut self, axes: &[usize]) -> Result<()> {
        if axes.is_empty() {
            return Ok(());
        }

        for &j in axes {
            self.check_axis(j)?;
        }

        let axes: Vec<usize> = axes.iter().copied().unique().collect();
        debug!("Flipping axes {axes:?}");

        let mut view = self.data.view();
        for &j in &axes {
            view.invert_axis(Axis(j));
        }
        let data = view.to_owned();

        let reversed: Vec<(usize, Array1<f64>)> = axes
            .iter()
            .map(|&j| (j, self.axes[j].values.slice(s![..;-1]).to_owned()))
            .collect();

        self.data = data;
        for (j, values) in reversed {
            self.axes[j].values = values;
        }

        Ok(())
    }
}

impl std::fmt::Display for MeshData {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "MeshData {\n".to_string();
        s += &f!("    shape: {:?}\n", self.shape());
        for (j, axis) in self.axes.iter().enumerate() {
            s += &f!("    axis {j}: {axis}\n");
        }

        let unit = if self.unit.is_empty() {
            String::new()
        } else {
            f!(" [{}]", self.unit)
        };
        s += &match (f64_min(&self.data), f64_max(&self.data)) {
            (Some(lo), Some(hi)) => f!(
                "    data: {:?}{unit} {} to {}\n}}",
                self.label,
                lo.sci(5, 2),
                hi.sci(5, 2)
            ),
            _ => f!("    data: {:?}{unit} empty\n}}", self.label),
        };

        write!(f, "{}", s)
    }
}
