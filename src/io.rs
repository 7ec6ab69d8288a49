//! Reading and writing meshes to file
//!
//! Only the fields listed in [PERSISTED_FIELDS] are stored, via the
//! [MeshRecord] layout. Two formats are supported:
//!
//! | Format | Functions                        | Notes                      |
//! | ------ | -------------------------------- | -------------------------- |
//! | JSON   | [write_json], [read_json]        | human readable, portable   |
//! | Binary | [write_binary], [read_binary]    | compact `bincode` encoding |
//!
//! [read_mesh] and [write_mesh] choose between them by file extension, with
//! anything other than `.json` treated as binary.
//!
//! Reading always goes back through [MeshData::new()], so a file with
//! inconsistent shapes is rejected rather than producing a broken mesh.
//!
//! ```rust
//! # use meshdata::{io, mesh::MeshData};
//! # use ndarray::array;
//! let data = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
//! let mesh = MeshData::new(data, vec![array![0.0, 1.0], array![0.0, 1.0]]).unwrap();
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("mesh.json");
//! io::write_mesh(&mesh, &path).unwrap();
//! assert_eq!(io::read_mesh(&path).unwrap(), mesh);
//! ```

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// internal modules
use crate::error::{Error, Result};
use crate::mesh::MeshData;
use crate::utils::f;

// external crates
use log::{debug, trace};
use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

/// Names of the [MeshData] attributes that are written to file
pub const PERSISTED_FIELDS: [&str; 4] = ["data", "axes", "labels", "units"];

/// On-disk layout of a [MeshData]
///
/// Axes, labels, and units are stored as parallel lists in indexing order.
/// The `labels` and `units` have one extra entry at the end for the data
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    pub data: ArrayD<f64>,
    pub axes: Vec<Array1<f64>>,
    pub labels: Vec<String>,
    pub units: Vec<String>,
}

impl From<&MeshData> for MeshRecord {
    fn from(mesh: &MeshData) -> Self {
        Self {
            data: mesh.data().clone(),
            axes: mesh.axes().iter().map(|a| a.values().clone()).collect(),
            labels: mesh.labels().into_iter().map(String::from).collect(),
            units: mesh.units().into_iter().map(String::from).collect(),
        }
    }
}

impl TryFrom<MeshRecord> for MeshData {
    type Error = Error;

    fn try_from(record: MeshRecord) -> Result<Self> {
        MeshData::new(record.data, record.axes)?
            .with_labels(&record.labels)?
            .with_units(&record.units)
    }
}

/// Write a mesh as pretty-printed JSON
///
/// JSON has no NaN or infinity, so a mesh holding any non-finite value (e.g.
/// after normalising all-zero data) is rejected with [Error::NonFinite]
/// before the file is created. Use [write_binary] for such meshes.
pub fn write_json<P: AsRef<Path>>(mesh: &MeshData, path: P) -> Result<()> {
    check_finite(mesh)?;
    let mut writer = get_writer(path.as_ref())?;
    serde_json::to_writer_pretty(&mut writer, &MeshRecord::from(mesh))?;
    writer.flush()?;
    Ok(())
}

/// Read a mesh from a JSON file
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let reader = get_reader(path.as_ref())?;
    let record: MeshRecord = serde_json::from_reader(reader)?;
    MeshData::try_from(record)
}

/// Write a mesh in the compact binary format
pub fn write_binary<P: AsRef<Path>>(mesh: &MeshData, path: P) -> Result<()> {
    let mut writer = get_writer(path.as_ref())?;
    bincode::serialize_into(&mut writer, &MeshRecord::from(mesh))?;
    writer.flush()?;
    Ok(())
}

/// Read a mesh from the compact binary format
pub fn read_binary<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let reader = get_reader(path.as_ref())?;
    let record: MeshRecord = bincode::deserialize_from(reader)?;
    MeshData::try_from(record)
}

/// Write a mesh, choosing the format from the file extension
pub fn write_mesh<P: AsRef<Path>>(mesh: &MeshData, path: P) -> Result<()> {
    let path = path.as_ref();
    if is_json(path) {
        write_json(mesh, path)
    } else {
        write_binary(mesh, path)
    }
}

/// Read a mesh, choosing the format from the file extension
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let path = path.as_ref();
    debug!("Reading mesh from {}", path.display());
    if is_json(path) {
        read_json(path)
    } else {
        read_binary(path)
    }
}

/// First field holding a NaN or infinity, as an error
fn check_finite(mesh: &MeshData) -> Result<()> {
    if !mesh.data().iter().all(|v| v.is_finite()) {
        return Err(Error::NonFinite {
            field: "data".into(),
        });
    }

    for (j, axis) in mesh.axes().iter().enumerate() {
        if !axis.values().iter().all(|v| v.is_finite()) {
            return Err(Error::NonFinite {
                field: f!("axis {j}"),
            });
        }
    }

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Helper function for cleaning up file IO boilerplate
fn get_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    trace!("New bufreader for {}", path.display());
    Ok(BufReader::new(file))
}

/// Helper function for cleaning up file IO boilerplate
fn get_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    trace!("New bufwriter for {}", path.display());
    Ok(BufWriter::new(file))
}
