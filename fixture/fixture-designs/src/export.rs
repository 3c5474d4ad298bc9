//! Parallel STL export of design parts.

use std::path::{Path, PathBuf};

use mesh_io::{IoError, IoResult, StlEncoding, encode_stl, part_file_name, save_stl};
use mesh_types::Mesh;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::DesignResult;

/// Encode every part as its own STL, one rayon job per part.
///
/// Returns `(file name, bytes)` pairs in part order, ready for an archive
/// writer.
///
/// # Errors
///
/// [`crate::DesignError::Io`] if any part cannot be encoded.
pub fn encode_parts(
    parts: &[Mesh],
    encoding: StlEncoding,
) -> DesignResult<Vec<(String, Vec<u8>)>> {
    let encoded: Vec<IoResult<(String, Vec<u8>)>> = parts
        .par_iter()
        .map(|part| Ok((part_file_name(&part.name), encode_stl(part, encoding)?)))
        .collect();

    let mut files = Vec::with_capacity(encoded.len());
    for file in encoded {
        files.push(file?);
    }
    Ok(files)
}

/// Write every part to `dir` as `<name>.stl`, one rayon job per part.
///
/// The directory is created if needed. Returns the written paths in part
/// order; empty parts are written too, with a warning.
///
/// # Errors
///
/// [`crate::DesignError::Io`] if the directory or any file cannot be
/// written.
pub fn export_parts(
    parts: &[Mesh],
    dir: &Path,
    encoding: StlEncoding,
) -> DesignResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(IoError::from)?;

    let written: Vec<IoResult<PathBuf>> = parts
        .par_iter()
        .map(|part| {
            if part.is_empty() {
                warn!(part = %part.name, "Exporting empty part");
            }
            let path = dir.join(part_file_name(&part.name));
            save_stl(part, &path, encoding)?;
            Ok(path)
        })
        .collect();

    let mut paths = Vec::with_capacity(written.len());
    for path in written {
        paths.push(path?);
    }
    info!(
        parts = paths.len(),
        triangles = parts.iter().map(Mesh::triangle_count).sum::<usize>(),
        dir = %dir.display(),
        ?encoding,
        "Exported parts"
    );
    Ok(paths)
}
