use crate::core::trajectory::Trajectory;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("I/O error while flushing '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
struct PointRecord {
    index: usize,
    x: f64,
    y: f64,
    z: f64,
}

/// Writes one `index,x,y,z` row per trajectory point.
pub fn write_points<W: Write>(trajectory: &Trajectory, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, p) in trajectory.points().iter().enumerate() {
        csv_writer
            .serialize(PointRecord {
                index,
                x: p.x,
                y: p.y,
                z: p.z,
            })
            .map_err(|e| ExportError::Csv {
                path: "<writer>".to_string(),
                source: e,
            })?;
    }
    csv_writer.flush().map_err(|e| ExportError::Io {
        path: "<writer>".to_string(),
        source: e,
    })
}

pub fn write_points_to_path(trajectory: &Trajectory, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_points(trajectory, file).map_err(|e| match e {
        ExportError::Csv { source, .. } => ExportError::Csv {
            path: path.to_string_lossy().to_string(),
            source,
        },
        ExportError::Io { source, .. } => ExportError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::rotation_table::RotationTable;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_one_row_per_point() {
        let mut traj = Trajectory::new();
        traj.compute(&"ACGT".parse().unwrap(), &RotationTable::default());

        let mut buffer = Vec::new();
        write_points(&traj, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "index,x,y,z");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("0,0.0,0.0,0.0"));
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let mut traj = Trajectory::new();
        traj.compute(&"AAT".parse().unwrap(), &RotationTable::default());

        write_points_to_path(&traj, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn write_to_invalid_path_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("points.csv");
        let result = write_points_to_path(&Trajectory::new(), &path);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
