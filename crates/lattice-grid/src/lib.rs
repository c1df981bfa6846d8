//! # Lattice Grid
//!
//! Grid topology primitives for Project Lattice.
//!
//! This crate handles:
//! - Square coordinate maps with border/corner classification
//! - A tag index answering "all cells of tag X" without scanning
//! - A* pathfinding constrained to traversable tags
//! - Zone placement validation and application

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod border;
pub mod coordinate;
pub mod map;
pub mod pathfinder;
pub mod zone;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::border::*;
    pub use crate::coordinate::*;
    pub use crate::map::*;
    pub use crate::pathfinder::*;
    pub use crate::zone::*;
}

pub use prelude::*;
