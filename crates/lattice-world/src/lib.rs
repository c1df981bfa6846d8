//! # Lattice World
//!
//! Region layout and the staged generation pipeline for Project Lattice.
//!
//! This crate handles:
//! - Generation configuration (TOML)
//! - The world map and its regions
//! - Exit negotiation between neighbouring regions
//! - Exit paths, zones, and zone connectors
//! - Stage barriers and the orchestrator driving them
//! - Chunk layouts and summaries for downstream tools

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod barrier;
pub mod chunk;
pub mod config;
pub mod negotiation;
pub mod orchestrator;
pub mod region;
pub mod summary;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::barrier::*;
    pub use crate::chunk::*;
    pub use crate::config::*;
    pub use crate::negotiation::*;
    pub use crate::orchestrator::*;
    pub use crate::region::*;
    pub use crate::summary::*;
    pub use crate::world::*;
}

pub use prelude::*;
