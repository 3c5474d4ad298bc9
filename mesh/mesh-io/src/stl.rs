//! STL (Stereolithography) encoding and decoding.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (part name, space padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (recomputed from the vertices)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! All numbers are little-endian.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! # Format Detection
//!
//! [`decode_stl`] treats data as binary when its length matches the
//! triangle count in the header, and as ASCII when it otherwise starts with
//! `solid`. Binary headers may legitimately start with `solid`, so the size
//! check comes first.

use std::fmt::Write as _;
use std::path::Path;

use mesh_types::{Mesh, Point3, Triangle};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_RECORD_SIZE: usize = 50;

/// Header plus the triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// STL flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StlEncoding {
    /// Compact little-endian records.
    #[default]
    Binary,
    /// Human-readable text.
    Ascii,
}

/// Append-only builder for binary STL bytes.
///
/// The triangle count is fixed up front, so every byte is written once in
/// file order: header, count, then one 50-byte record per triangle.
///
/// # Example
///
/// ```
/// use mesh_io::BinaryStlBuilder;
/// use mesh_types::Triangle;
///
/// let mut builder = BinaryStlBuilder::new("part", 1).unwrap();
/// builder.push(&Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
/// let bytes = builder.finish().unwrap();
/// assert_eq!(bytes.len(), 80 + 4 + 50);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryStlBuilder {
    bytes: Vec<u8>,
    declared: u32,
    written: u32,
}

impl BinaryStlBuilder {
    /// Start a file holding `triangle_count` triangles, with `name` in the
    /// header (truncated to 80 bytes, padded with spaces).
    ///
    /// # Errors
    ///
    /// [`IoError::TooManyTriangles`] when the count does not fit in `u32`.
    pub fn new(name: &str, triangle_count: usize) -> IoResult<Self> {
        let declared = u32::try_from(triangle_count).map_err(|_| IoError::TooManyTriangles {
            count: triangle_count,
        })?;

        let mut bytes = Vec::with_capacity(PREAMBLE_SIZE + triangle_count * TRIANGLE_RECORD_SIZE);
        let name = name.as_bytes();
        let used = name.len().min(HEADER_SIZE);
        bytes.extend_from_slice(&name[..used]);
        bytes.resize(HEADER_SIZE, b' ');
        bytes.extend_from_slice(&declared.to_le_bytes());

        Ok(Self {
            bytes,
            declared,
            written: 0,
        })
    }

    /// Append one triangle record. The stored normal is the normalized
    /// `(v1 - v0) × (v2 - v0)`, or `+Z` for a degenerate triangle.
    pub fn push(&mut self, triangle: &Triangle) {
        let normal = triangle.facet_normal();
        self.push_f32x3(normal.x, normal.y, normal.z);
        for v in triangle.vertices() {
            self.push_f32x3(v.x, v.y, v.z);
        }
        self.bytes.extend_from_slice(&0u16.to_le_bytes());
        self.written = self.written.saturating_add(1);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_f32x3(&mut self, x: f64, y: f64, z: f64) {
        // Truncation: STL stores f32
        for value in [x as f32, y as f32, z as f32] {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    /// The finished bytes.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidFaceCount`] when the number of pushed triangles
    /// differs from the declared count.
    pub fn finish(self) -> IoResult<Vec<u8>> {
        if self.written != self.declared {
            return Err(IoError::InvalidFaceCount {
                expected: self.declared,
                got: self.written,
            });
        }
        Ok(self.bytes)
    }
}

/// Encode a part as binary STL, with its name in the header.
///
/// # Errors
///
/// [`IoError::TooManyTriangles`] for meshes beyond the `u32` count.
///
/// # Example
///
/// ```
/// use mesh_io::encode_binary;
/// use mesh_types::{Mesh, Triangle};
///
/// let tri = Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
/// let bytes = encode_binary(&Mesh::from_triangles("tri", vec![tri])).unwrap();
/// assert_eq!(bytes.len(), 134);
/// // Recomputed normal is +Z
/// assert_eq!(&bytes[84 + 8..84 + 12], &1.0f32.to_le_bytes());
/// ```
pub fn encode_binary(mesh: &Mesh) -> IoResult<Vec<u8>> {
    encode_binary_parts(&mesh.name, std::slice::from_ref(mesh))
}

fn encode_binary_parts(name: &str, parts: &[Mesh]) -> IoResult<Vec<u8>> {
    let count = parts.iter().map(Mesh::triangle_count).sum();
    let mut builder = BinaryStlBuilder::new(name, count)?;
    for triangle in parts.iter().flat_map(|p| p.triangles.iter()) {
        builder.push(triangle);
    }
    builder.finish()
}

/// Encode a part as ASCII STL.
#[must_use]
pub fn encode_ascii(mesh: &Mesh) -> String {
    encode_ascii_parts(&mesh.name, std::slice::from_ref(mesh))
}

fn encode_ascii_parts(name: &str, parts: &[Mesh]) -> String {
    // Whitespace would split the name when read back
    let name: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "solid {name}");
    for triangle in parts.iter().flat_map(|p| p.triangles.iter()) {
        let n = triangle.facet_normal();
        let _ = writeln!(out, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in triangle.vertices() {
            let _ = writeln!(out, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z);
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Encode a part in the requested flavour.
///
/// # Errors
///
/// Same as [`encode_binary`].
pub fn encode_stl(mesh: &Mesh, encoding: StlEncoding) -> IoResult<Vec<u8>> {
    encode_solid(&mesh.name, std::slice::from_ref(mesh), encoding)
}

/// Encode several parts as a single solid named `name`.
///
/// Triangles keep part order, then facet order within each part.
///
/// # Errors
///
/// Same as [`encode_binary`].
pub fn encode_solid(name: &str, parts: &[Mesh], encoding: StlEncoding) -> IoResult<Vec<u8>> {
    match encoding {
        StlEncoding::Binary => encode_binary_parts(name, parts),
        StlEncoding::Ascii => Ok(encode_ascii_parts(name, parts).into_bytes()),
    }
}

fn is_binary(data: &[u8]) -> bool {
    let Some(count) = data.get(HEADER_SIZE..PREAMBLE_SIZE) else {
        return false;
    };
    let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);
    usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(TRIANGLE_RECORD_SIZE))
        .and_then(|n| n.checked_add(PREAMBLE_SIZE))
        == Some(data.len())
}

/// Decode binary or ASCII STL bytes into a part.
///
/// Stored normals are ignored. The part name comes from the binary header
/// or the `solid` line.
///
/// # Errors
///
/// [`IoError::InvalidHeader`] or [`IoError::InvalidFaceCount`] for
/// truncated binary data, [`IoError::InvalidContent`] or
/// [`IoError::ParseFloat`] for malformed ASCII.
pub fn decode_stl(data: &[u8]) -> IoResult<Mesh> {
    let looks_ascii = data.trim_ascii_start().starts_with(b"solid");
    if is_binary(data) || !looks_ascii {
        decode_binary(data)
    } else {
        let text = std::str::from_utf8(data)
            .map_err(|e| IoError::invalid_content(format!("ASCII STL is not UTF-8: {e}")))?;
        decode_ascii(text)
    }
}

fn decode_binary(data: &[u8]) -> IoResult<Mesh> {
    if data.len() < PREAMBLE_SIZE {
        return Err(IoError::InvalidHeader {
            expected: PREAMBLE_SIZE,
            got: data.len(),
        });
    }
    let name = String::from_utf8_lossy(&data[..HEADER_SIZE])
        .trim_end_matches([' ', '\0'])
        .to_string();
    let count = u32::from_le_bytes([
        data[HEADER_SIZE],
        data[HEADER_SIZE + 1],
        data[HEADER_SIZE + 2],
        data[HEADER_SIZE + 3],
    ]);

    let records = data[PREAMBLE_SIZE..].chunks_exact(TRIANGLE_RECORD_SIZE);
    let available = u32::try_from(records.len()).unwrap_or(u32::MAX);
    if available < count {
        return Err(IoError::InvalidFaceCount {
            expected: count,
            got: available,
        });
    }

    let triangles = records
        .take(count as usize)
        .map(|record| {
            // Skip the 12-byte normal
            Triangle::new(
                read_point(&record[12..24]),
                read_point(&record[24..36]),
                read_point(&record[36..48]),
            )
        })
        .collect();
    Ok(Mesh::from_triangles(name, triangles))
}

/// Read a point from 12 bytes (3 f32s).
fn read_point(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

fn decode_ascii(text: &str) -> IoResult<Mesh> {
    let mut mesh = Mesh::default();
    let mut in_loop = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);

    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" => {
                mesh.name = parts.collect::<Vec<_>>().join(" ");
            }
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let mut coord = || -> IoResult<f64> {
                    parts
                        .next()
                        .ok_or_else(|| IoError::invalid_content("vertex with missing coordinate"))?
                        .parse()
                        .map_err(IoError::from)
                };
                let (x, y, z) = (coord()?, coord()?, coord()?);
                corners.push(Point3::new(x, y, z));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                let [v0, v1, v2] = corners[..] else {
                    return Err(IoError::invalid_content(format!(
                        "facet with {} vertices",
                        corners.len()
                    )));
                };
                mesh.triangles.push(Triangle::new(v0, v1, v2));
                corners.clear();
            }
            "endsolid" => break,
            _ => {
                // Facet normals and unknown lines are ignored
            }
        }
    }

    Ok(mesh)
}

/// Load a part from an STL file of either flavour.
///
/// # Errors
///
/// [`IoError::FileNotFound`] for a missing file, otherwise the I/O or
/// decoding error.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let part = load_stl("tube_top.stl").unwrap();
/// println!("{} has {} triangles", part.name, part.triangle_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    decode_stl(&data)
}

/// Save a part to an STL file.
///
/// # Errors
///
/// Returns an error if the mesh cannot be encoded or the file cannot be
/// written.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, encoding: StlEncoding) -> IoResult<()> {
    let bytes = encode_stl(mesh, encoding)?;
    std::fs::write(path.as_ref(), &bytes)?;
    debug!(
        part = %mesh.name,
        path = %path.as_ref().display(),
        bytes = bytes.len(),
        "Wrote STL"
    );
    Ok(())
}
