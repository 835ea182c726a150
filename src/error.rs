//! Error handling for meshtopo.
//!
//! ## Design Philosophy
//!
//! The crate follows a strict **no-panic** policy on mesh data supplied by a
//! caller:
//!
//! - All errors are returned as `Result<T, TopologyError>`, never panicked.
//! - Malformed or hostile triangle soups (out-of-range vertex indices,
//!   non-orientable one-rings) produce errors, not panics.
//! - Internal consistency violations (a back-pointer that doesn't point where
//!   the invariant says it must) are also returned as errors rather than
//!   corrupting the mesh silently.
//!
//! ## Error Types
//!
//! [`TopologyError`] is the main error enum:
//!
//! - **MobiusOneRing**: a vertex's one-ring of facets could not be walked
//!   back to its start in a consistent orientation. Stitching or hole
//!   filling around this vertex is aborted rather than looping forever.
//! - **BrokenBackPointer**: a facet removal found that the neighbor it was
//!   about to rewrite didn't actually point back at the facet being moved.
//! - **VertexIndexOutOfRange**: a raw triangle referenced a vertex index
//!   beyond the mesh's vertex array.
//!
//! ```
//! use meshtopo::error::{TopologyError, Result};
//!
//! fn repair_something() -> Result<()> {
//!     // Use the ? operator to propagate errors
//!     Ok(())
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("one-ring around facet {start_facet} does not close consistently (Möbius-like topology)")]
    MobiusOneRing { start_facet: u32 },

    #[error(
        "facet {facet} removal expected neighbor back-pointer {expected}, found {found}"
    )]
    BrokenBackPointer { facet: u32, expected: u32, found: i32 },

    #[error(
        "facet {facet} vertex slot {local_vertex} references vertex {index}, but mesh only has {vertex_count} vertices"
    )]
    VertexIndexOutOfRange {
        facet: u32,
        local_vertex: u8,
        index: u32,
        vertex_count: u32,
    },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
