//! Writing named parts to a directory.

use std::path::{Path, PathBuf};

use mesh_types::Mesh;
use tracing::{info, warn};

use crate::error::IoResult;
use crate::stl::{StlEncoding, save_stl};

/// File name for a part: its name with anything outside `[A-Za-z0-9_-]`
/// replaced by `_`, plus `.stl`. Unnamed parts become `part.stl`.
///
/// ```
/// use mesh_io::part_file_name;
///
/// assert_eq!(part_file_name("tube_top"), "tube_top.stl");
/// assert_eq!(part_file_name("../etc"), "___etc.stl");
/// assert_eq!(part_file_name(""), "part.stl");
/// ```
#[must_use]
pub fn part_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "part.stl".to_string()
    } else {
        format!("{stem}.stl")
    }
}

/// Write each part to `<dir>/<name>.stl`, creating `dir` if needed.
///
/// Returns the written paths in part order. Empty parts are still written
/// (a valid zero-triangle file) but logged, since they usually mean a
/// generator rejected its input.
///
/// # Errors
///
/// The first I/O or encoding error; parts before it stay written.
pub fn save_parts(parts: &[Mesh], dir: &Path, encoding: StlEncoding) -> IoResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(parts.len());
    for part in parts {
        if part.is_empty() {
            warn!(part = %part.name, "Writing empty part");
        }
        let path = dir.join(part_file_name(&part.name));
        save_stl(part, &path, encoding)?;
        written.push(path);
    }
    info!(
        parts = written.len(),
        triangles = parts.iter().map(Mesh::triangle_count).sum::<usize>(),
        dir = %dir.display(),
        "Exported parts"
    );
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::stl::load_stl;
    use mesh_types::unit_cube;

    #[test]
    fn one_file_per_part() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let parts = vec![
            Mesh::from_indexed("tube_top", &unit_cube()),
            Mesh::from_indexed("tube_bottom", &unit_cube()),
            Mesh::new("empty"),
        ];
        let paths = save_parts(&parts, &out, StlEncoding::Ascii).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], out.join("tube_top.stl"));
        let top = load_stl(&paths[0]).unwrap();
        assert_eq!(top.name, "tube_top");
        assert_eq!(top.triangle_count(), 12);
        assert!(load_stl(&paths[2]).unwrap().is_empty());
    }
}
