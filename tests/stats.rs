use meshdata::stats::{find_threshold_limit, marginals};
use meshdata::Error;

use ndarray::{array, Array1, Array3};
use rstest::rstest;

#[test]
fn marginals_of_3d_data() {
    let data = Array3::from_elem((2, 3, 4), 1.0).into_dyn();
    let m = marginals(&data, None).unwrap();

    assert_eq!(m.len(), 3);
    assert_eq!(m[0], Array1::from_elem(2, 12.0));
    assert_eq!(m[1], Array1::from_elem(3, 8.0));
    assert_eq!(m[2], Array1::from_elem(4, 6.0));
}

#[test]
fn marginals_keep_requested_order() {
    let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
    let m = marginals(&data, Some(&[1, 0])).unwrap();

    assert_eq!(m, vec![array![5.0, 7.0, 9.0], array![6.0, 15.0]]);
}

#[test]
fn marginals_invalid_axis() {
    let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    let result = marginals(&data, Some(&[0, 2]));
    assert!(matches!(result, Err(Error::AxisIndex { axis: 2, ndim: 2 })));
}

#[rstest]
#[case(0.0, (2.0, 4.0))]
#[case(0.5, (1.0, 5.0))]
#[case(1.0, (0.0, 6.0))]
fn threshold_limit_padding(#[case] padding: f64, #[case] expected: (f64, f64)) {
    let axis = Array1::<f64>::linspace(0.0, 8.0, 9);
    let marginal = array![0.0, 0.001, 0.5, 1.0, 0.5, 0.001, 0.0, 0.0, 0.0];
    assert_eq!(
        find_threshold_limit(axis.view(), marginal.view(), 0.01, padding),
        expected
    );
}

#[test]
fn threshold_limit_unsorted_axis() {
    // significant region covers indices 1..=3, whose coordinates span [1, 5]
    let axis = array![3.0, 5.0, 1.0, 4.0, 0.0];
    let marginal = array![0.0, 1.0, 0.0, 1.0, 0.0];
    assert_eq!(
        find_threshold_limit(axis.view(), marginal.view(), 0.1, 0.0),
        (1.0, 5.0)
    );
}

#[test]
fn threshold_limit_nothing_significant() {
    let axis = array![-1.0, 0.0, 1.0];
    let marginal = Array1::zeros(3);
    assert_eq!(
        find_threshold_limit(axis.view(), marginal.view(), 0.01, 0.25),
        (-1.5, 1.5)
    );
}
