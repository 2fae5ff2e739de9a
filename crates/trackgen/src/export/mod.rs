//! File exporters for generated tracks.
//!
//! - [`write_obj`]: Wavefront OBJ for the ribbon mesh
//! - [`centerline_json`]: JSON hand-off of the plan and centerline
//! - [`write_track_files`]: writes both into an output directory

mod json;
mod obj;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::builders::GeneratedTrack;

pub use json::centerline_json;
pub use obj::write_obj;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths written by [`write_track_files`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub mesh: PathBuf,
    pub centerline: PathBuf,
}

/// Writes `track.obj` and `track.json` into `dir`, creating it if needed.
pub fn write_track_files(
    track: &GeneratedTrack,
    dir: impl AsRef<Path>,
) -> Result<ExportedFiles, ExportError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mesh = dir.join("track.obj");
    std::fs::write(&mesh, write_obj(&track.mesh, &format!("track_{}", track.seed)))?;

    let centerline = dir.join("track.json");
    std::fs::write(&centerline, centerline_json(track)?)?;

    info!("Wrote {} and {}", mesh.display(), centerline.display());
    Ok(ExportedFiles { mesh, centerline })
}
