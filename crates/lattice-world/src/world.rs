//! The world map and the regions laid out on it.

use glam::Vec3;
use lattice_common::{Edge, GridError, GridPos};
use lattice_grid::CoordinateMap;
use tracing::info;

use crate::config::GenerationConfig;
use crate::region::Region;

/// World-level coordinate map plus one region per world cell.
///
/// Regions are stored in the world map's row-major order, so a region's
/// index equals its world cell's index.
#[derive(Debug, Clone)]
pub struct World {
    map: CoordinateMap,
    regions: Vec<Region>,
}

impl World {
    /// Builds the world map. Each world cell spans one region plus the
    /// boundary gap.
    pub fn build_map(config: &GenerationConfig) -> Result<Self, GridError> {
        let map = CoordinateMap::build(config.world_width, config.region_span(), Vec3::ZERO)?;
        info!(
            "Built {0}x{0} world map ({1} regions)",
            config.world_width,
            map.len()
        );
        Ok(Self {
            map,
            regions: Vec::new(),
        })
    }

    /// World-level coordinate map.
    #[must_use]
    pub const fn map(&self) -> &CoordinateMap {
        &self.map
    }

    /// Number of world cells, i.e. regions once built.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.map.len()
    }

    /// Regions built so far, in world row-major order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Mutable access to one region.
    pub fn region_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    /// Builds the region for world cell `index` and appends it.
    ///
    /// # Panics
    ///
    /// Panics if regions are not built in index order.
    pub fn build_region(&mut self, index: usize, config: &GenerationConfig) -> Result<(), GridError> {
        assert_eq!(
            index,
            self.regions.len(),
            "regions must be built in world order"
        );
        let world_pos = self.map.position_at(index);
        let origin = self
            .map
            .get(world_pos)
            .map_or(Vec3::ZERO, |cell| cell.scene_position());
        let region = Region::build(world_pos, config.region_width, config.cell_size, origin)?;
        self.regions.push(region);
        Ok(())
    }

    /// The region at world position `pos`.
    #[must_use]
    pub fn region(&self, pos: GridPos) -> Option<&Region> {
        self.map.index_of(pos).and_then(|idx| self.regions.get(idx))
    }

    /// Index of the region across `edge` from region `index`, if any.
    #[must_use]
    pub fn neighbor_index(&self, index: usize, edge: Edge) -> Option<usize> {
        let pos = self.map.position_at(index);
        let cell = self.map.get(pos)?;
        cell.neighbor(&self.map, edge.direction())
            .and_then(|neighbor| self.map.index_of(neighbor.value()))
    }
}
