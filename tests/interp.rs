use meshdata::interp::{build_coords, GridInterpolator, Method};
use meshdata::Error;

use ndarray::{array, Array1, Array2, Array3};
use rstest::{fixture, rstest};

/// f(x, y, z) = 1 + 2x - y + 0.5z on an uneven grid
#[fixture]
fn linear_field() -> GridInterpolator {
    let x = array![0.0, 0.5, 2.0, 3.0];
    let y = array![-1.0, 1.0, 4.0];
    let z = array![0.0, 10.0];
    let data = Array3::from_shape_fn((4, 3, 2), |(i, j, k)| {
        1.0 + 2.0 * x[i] - y[j] + 0.5 * z[k]
    })
    .into_dyn();
    GridInterpolator::new(vec![x, y, z], data, Method::Linear).unwrap()
}

#[rstest]
#[case([0.0, -1.0, 0.0])]
#[case([0.25, 0.0, 5.0])]
#[case([2.7, 3.9, 9.9])]
#[case([3.0, 4.0, 10.0])]
fn linear_is_exact_for_linear_data(linear_field: GridInterpolator, #[case] p: [f64; 3]) {
    let expected = 1.0 + 2.0 * p[0] - p[1] + 0.5 * p[2];
    let value = linear_field.evaluate(Array1::from(p.to_vec()).view()).unwrap();
    assert!((value - expected).abs() < 1e-12);
}

#[rstest]
#[case([-0.1, 0.0, 5.0])]
#[case([1.0, 4.1, 5.0])]
#[case([1.0, 0.0, f64::NAN])]
fn outside_returns_fill_value(linear_field: GridInterpolator, #[case] p: [f64; 3]) {
    let point = Array1::from(p.to_vec());
    assert_eq!(linear_field.evaluate(point.view()).unwrap(), 0.0);

    let filled = linear_field.with_fill_value(-1.0);
    assert_eq!(filled.evaluate(point.view()).unwrap(), -1.0);
}

#[test]
fn nearest_neighbour() {
    let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    let interpolator =
        GridInterpolator::new(vec![array![0.0, 1.0], array![0.0, 1.0]], data, Method::Nearest)
            .unwrap();

    let points = array![[0.2, 0.2], [0.2, 0.8], [0.7, 0.4], [0.5, 0.5], [1.0, 1.0]];
    let values = interpolator.evaluate_grid(points.view()).unwrap();
    assert_eq!(values, array![1.0, 2.0, 3.0, 1.0, 4.0]);
}

#[test]
fn single_sample_axis() {
    let data = array![[1.0], [3.0]].into_dyn();
    let interpolator =
        GridInterpolator::new(vec![array![0.0, 1.0], array![7.0]], data, Method::Linear).unwrap();

    let points = array![[0.5, 7.0], [0.5, 7.5]];
    let values = interpolator.evaluate_grid(points.view()).unwrap();
    assert_eq!(values, array![2.0, 0.0]);
}

#[rstest]
#[case(array![0.0, 0.0, 1.0])]
#[case(array![1.0, 0.0, 2.0])]
fn rejects_unsorted_axes(#[case] x: Array1<f64>) {
    let data = Array2::<f64>::zeros((3, 2)).into_dyn();
    let result = GridInterpolator::new(vec![x, array![0.0, 1.0]], data, Method::Linear);
    assert!(matches!(result, Err(Error::Unsorted { axis: 0 })));
}

#[test]
fn rejects_mismatched_shapes() {
    let data = Array2::<f64>::zeros((3, 2)).into_dyn();
    let result = GridInterpolator::new(vec![array![0.0, 1.0, 2.0]], data, Method::Linear);
    assert!(matches!(result, Err(Error::Shape(_))));
}

#[rstest]
fn rejects_wrong_point_dimension(linear_field: GridInterpolator) {
    let result = linear_field.evaluate(array![0.0, 0.0].view());
    assert!(matches!(result, Err(Error::Shape(_))));
}

#[test]
fn coords_in_indexing_order() {
    let coords = build_coords(&[array![1.0, 2.0], array![3.0], array![4.0, 5.0]]);
    assert_eq!(
        coords,
        array![
            [1.0, 3.0, 4.0],
            [1.0, 3.0, 5.0],
            [2.0, 3.0, 4.0],
            [2.0, 3.0, 5.0],
        ]
    );
}

#[test]
fn coords_of_empty_axis() {
    let coords = build_coords(&[array![1.0, 2.0], Array1::zeros(0)]);
    assert_eq!(coords.shape(), &[0, 2]);
}
