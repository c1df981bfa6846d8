//! # Lattice Common
//!
//! Common types, utilities, and shared abstractions for Project Lattice.
//!
//! This crate provides foundational types used across all Lattice subsystems:
//! - Grid positions, compass directions, and region edges
//! - Cell classification tags
//! - Seed hashing and the seeded RNG handle
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod seed;
pub mod tag;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::seed::*;
    pub use crate::tag::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_mirror_roundtrip() {
        let pos = GridPos::new(0, 3);
        let mirrored = Edge::West.mirror(pos, 8);
        assert_eq!(mirrored, GridPos::new(7, 3));
        assert_eq!(Edge::East.mirror(mirrored, 8), pos);
    }

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(hash_seed("lattice"), hash_seed("lattice"));
        assert_ne!(hash_seed("lattice"), hash_seed("Lattice"));
    }

    #[test]
    fn test_tag_set_membership() {
        let set = TagSet::of(&[Tag::Null, Tag::Path]);
        assert!(set.contains(Tag::Null));
        assert!(set.contains(Tag::Path));
        assert!(!set.contains(Tag::Border));
    }
}
