use meshdata::io::{self, MeshRecord, PERSISTED_FIELDS};
use meshdata::mesh::MeshData;
use meshdata::Error;

use ndarray::{array, Array2};
use rstest::{fixture, rstest};
use tempfile::tempdir;

#[fixture]
fn mesh() -> MeshData {
    let data = Array2::from_shape_fn((3, 2), |(i, j)| 0.1 * i as f64 - 1.5 * j as f64).into_dyn();
    MeshData::new(data, vec![array![3.0, 1.0, 2.0], array![-0.25, 1e-9]])
        .unwrap()
        .with_labels(&["delay", "wavelength", "intensity"])
        .unwrap()
        .with_units(&["fs", "nm", "a.u."])
        .unwrap()
}

#[rstest]
#[case("roundtrip.json")]
#[case("roundtrip.bin")]
#[case("roundtrip.mesh")]
fn write_then_read(mesh: MeshData, #[case] name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    io::write_mesh(&mesh, &path).unwrap();
    assert_eq!(io::read_mesh(&path).unwrap(), mesh);
}

#[rstest]
fn json_is_detected_by_extension(mesh: MeshData) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("detect.JSON");
    io::write_mesh(&mesh, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    for field in PERSISTED_FIELDS {
        assert!(text.contains(&format!("\"{field}\"")));
    }
    assert_eq!(io::read_json(&path).unwrap(), mesh);
}

#[rstest]
fn record_holds_persisted_fields(mesh: MeshData) {
    let record = MeshRecord::from(&mesh);
    assert_eq!(record.axes.len(), 2);
    assert_eq!(record.labels, vec!["delay", "wavelength", "intensity"]);
    assert_eq!(record.units, vec!["fs", "nm", "a.u."]);
    assert_eq!(MeshData::try_from(record).unwrap(), mesh);
}

#[rstest]
fn inconsistent_record_is_rejected(mesh: MeshData) {
    let mut record = MeshRecord::from(&mesh);
    record.axes[1] = array![0.0, 1.0, 2.0];

    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

    assert!(matches!(io::read_mesh(&path), Err(Error::Shape(_))));
}

#[test]
fn missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.bin");
    assert!(matches!(io::read_mesh(&path), Err(Error::Io(_))));
}

#[test]
fn garbage_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "{ not a mesh").unwrap();
    assert!(matches!(io::read_json(&path), Err(Error::Json(_))));
}

/// All-zero data normalised to NaN everywhere
#[fixture]
fn not_finite() -> MeshData {
    let data = Array2::<f64>::zeros((2, 2)).into_dyn();
    let mut mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, 1.0]]).unwrap();
    mesh.normalize();
    mesh
}

#[rstest]
fn json_refuses_non_finite_data(not_finite: MeshData) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nan.json");

    let result = io::write_mesh(&not_finite, &path);
    assert!(matches!(result, Err(Error::NonFinite { ref field }) if field == "data"));
    assert!(!path.exists());
}

#[test]
fn json_refuses_non_finite_axis() {
    let data = Array2::<f64>::zeros((2, 2)).into_dyn();
    let mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, f64::INFINITY]]).unwrap();

    let dir = tempdir().unwrap();
    let result = io::write_json(&mesh, dir.path().join("inf.json"));
    assert!(matches!(result, Err(Error::NonFinite { ref field }) if field == "axis 1"));
}

#[rstest]
fn binary_keeps_non_finite_data(not_finite: MeshData) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nan.bin");
    io::write_mesh(&not_finite, &path).unwrap();

    let mesh = io::read_mesh(&path).unwrap();
    assert_eq!(mesh.shape(), &[2, 2]);
    assert!(mesh.data().iter().all(|v| v.is_nan()));
    assert_eq!(mesh.axes(), not_finite.axes());
}
