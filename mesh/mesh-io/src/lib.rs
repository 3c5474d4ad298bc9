//! STL output for fixture parts.
//!
//! Every generated part is a named [`Mesh`](mesh_types::Mesh) serialized on
//! its own:
//!
//! - **Binary STL** - [`encode_binary`] via the append-only
//!   [`BinaryStlBuilder`]
//! - **ASCII STL** - [`encode_ascii`]
//! - **Reading** - [`decode_stl`] and [`load_stl`] detect the flavour
//! - **Export** - [`save_stl`] and [`save_parts`] write `<name>.stl` files
//!
//! Facet normals are always recomputed from the vertex order, with `+Z`
//! for degenerate triangles, so files never carry NaN normals.
//!
//! # Example
//!
//! ```
//! use mesh_io::{StlEncoding, decode_stl, encode_stl};
//! use mesh_types::{Mesh, unit_cube};
//!
//! let part = Mesh::from_indexed("cube", &unit_cube());
//! let bytes = encode_stl(&part, StlEncoding::Binary).unwrap();
//! assert_eq!(bytes.len(), 80 + 4 + 12 * 50);
//!
//! let back = decode_stl(&bytes).unwrap();
//! assert_eq!(back.name, "cube");
//! assert_eq!(back.triangles, part.triangles);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod export;
mod stl;

pub use error::{IoError, IoResult};
pub use export::{part_file_name, save_parts};
pub use stl::{
    BinaryStlBuilder, HEADER_SIZE, StlEncoding, TRIANGLE_RECORD_SIZE, decode_stl, encode_ascii,
    encode_binary, encode_solid, encode_stl, load_stl, save_stl,
};
