//! Common small functions used throughout the crate
//!
//! These are left public for the convenience of the user. For example finding
//! the nearest sample on an unsorted axis or using prettier formatting for
//! scientific numbers.

use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumberFmt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition.
    ///
    /// ```rust
    /// # use meshdata::utils::NumberFmt;
    /// assert_eq!((-1.0_f64).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((0.0125_f64).sci(3, 2), "1.250e-02".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumberFmt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // Safe to `unwrap` as `num` is guaranteed to contain `'e'`
        let exp = num.split_off(num.find('e').unwrap());
        // Make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Find the maximum of any collection of `f64` values
///
/// Floating-point types do not implement Ord because of NaN, so this uses
/// `total_cmp`. A NaN anywhere in the values is therefore returned as the
/// maximum. Returns `None` for an empty collection.
///
/// ```rust
/// # use meshdata::utils::f64_max;
/// assert_eq!(f64_max(&[1.0, 3.0, 2.0]), Some(3.0));
/// assert_eq!(f64_max(&Vec::<f64>::new()), None);
/// ```
pub fn f64_max<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<f64> {
    values.into_iter().copied().max_by(|a, b| a.total_cmp(b))
}

/// Find the minimum of any collection of `f64` values
///
/// ```rust
/// # use meshdata::utils::f64_min;
/// assert_eq!(f64_min(&[2.0, 1.0, 3.0]), Some(1.0));
/// ```
pub fn f64_min<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<f64> {
    values.into_iter().copied().min_by(|a, b| a.total_cmp(b))
}

/// Index of the value closest to `target`
///
/// No assumptions are made about the ordering of the values. Ties resolve to
/// the first index, and NaN values are never selected.
///
/// ```rust
/// # use meshdata::utils::nearest_index;
/// assert_eq!(nearest_index(&[4.0, 3.0, 2.0, 1.0], 2.2), Some(2));
/// assert_eq!(nearest_index(&[0.0, 1.0, 2.0], 0.5), Some(0));
/// ```
pub fn nearest_index<'a, I: IntoIterator<Item = &'a f64>>(values: I, target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        let distance = (v - target).abs();
        match best {
            Some((_, d)) if distance >= d || distance.is_nan() => (),
            None if distance.is_nan() => (),
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Indices that would sort the values in ascending order
///
/// The sort is stable, so equal values keep their original relative order.
///
/// ```rust
/// # use meshdata::utils::argsort;
/// assert_eq!(argsort(&[3.0, 1.0, 2.0]), vec![1, 2, 0]);
/// ```
pub fn argsort<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Vec<usize> {
    let values: Vec<f64> = values.into_iter().copied().collect();
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    idx
}
