//! Chunk layouts handed to mesh and height collaborators.
//!
//! Once generation is ready, each region is flattened into one descriptor
//! per chunk cell. Collaborators read the tag to pick a surface, the zone
//! height to raise zone chunks, and the raised-neighbour count to drop side
//! faces hidden behind taller neighbours.

use glam::Vec3;
use lattice_common::{GridPos, Tag};
use std::collections::BTreeMap;

use crate::region::Region;

/// Read-only view of one chunk cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDescriptor {
    /// Position inside the region
    pub position: GridPos,
    /// Classification
    pub tag: Tag,
    /// World-space position of the chunk origin
    pub scene_position: Vec3,
    /// Height of the zone covering this chunk, if any
    pub zone_height: Option<f32>,
    /// Edge-sharing neighbours covered by a zone while this chunk is not
    pub raised_neighbors: u8,
}

/// Every chunk of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkLayout {
    /// Region position in the world map
    pub region: GridPos,
    /// Chunks per side
    pub width: i32,
    /// Chunks in row-major order
    pub chunks: Vec<ChunkDescriptor>,
}

impl ChunkLayout {
    /// Flattens `region` into chunk descriptors.
    #[must_use]
    pub fn from_region(region: &Region) -> Self {
        let map = region.map();

        let mut heights: BTreeMap<GridPos, f32> = BTreeMap::new();
        for zone in region.zones() {
            for pos in zone.positions() {
                heights.insert(*pos, zone.height());
            }
        }

        let chunks = map
            .iter()
            .map(|cell| {
                let tag = cell.tag();
                let raised_neighbors = if tag == Tag::Zone {
                    0
                } else {
                    cell.valid_natural_neighbors(map)
                        .iter()
                        .filter(|n| n.tag() == Tag::Zone)
                        .count() as u8
                };
                ChunkDescriptor {
                    position: cell.value(),
                    tag,
                    scene_position: cell.scene_position(),
                    zone_height: (tag == Tag::Zone)
                        .then(|| heights.get(&cell.value()).copied())
                        .flatten(),
                    raised_neighbors,
                }
            })
            .collect();

        Self {
            region: region.world_pos(),
            width: map.width(),
            chunks,
        }
    }

    /// Descriptor at `pos`, if it lies in the region.
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&ChunkDescriptor> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.width {
            return None;
        }
        self.chunks.get((pos.y * self.width + pos.x) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_common::SeedRng;

    #[test]
    fn test_layout_covers_region() {
        let mut region =
            Region::build(GridPos::new(1, 2), 9, 2.0, Vec3::new(5.0, 0.0, 5.0)).expect("region");
        let mut rng = SeedRng::from_seed_str("layout");
        region.place_zones(&mut rng, 30, 4.0);
        assert!(!region.zones().is_empty());

        let layout = ChunkLayout::from_region(&region);

        assert_eq!(layout.region, GridPos::new(1, 2));
        assert_eq!(layout.chunks.len(), 81);
        for chunk in &layout.chunks {
            assert_eq!(region.map().tag_at(chunk.position), Some(chunk.tag));
            if chunk.tag == Tag::Zone {
                assert_eq!(chunk.zone_height, Some(4.0));
                assert_eq!(chunk.raised_neighbors, 0);
            } else {
                assert_eq!(chunk.zone_height, None);
            }
        }
        let corner = layout.get(GridPos::new(8, 8)).expect("corner");
        assert_eq!(corner.scene_position, Vec3::new(21.0, 0.0, 21.0));
        assert!(layout.get(GridPos::new(9, 0)).is_none());
    }

    #[test]
    fn test_raised_neighbors_count_zones() {
        let mut region = Region::build(GridPos::new(0, 0), 7, 1.0, Vec3::ZERO).expect("region");
        let mut rng = SeedRng::from_seed_str("raised");
        region.place_zones(&mut rng, 40, 1.0);

        let layout = ChunkLayout::from_region(&region);
        for chunk in layout.chunks.iter().filter(|c| c.tag != Tag::Zone) {
            let expected = lattice_common::Direction::NATURAL
                .iter()
                .filter(|d| {
                    layout
                        .get(chunk.position.step(**d))
                        .is_some_and(|n| n.tag == Tag::Zone)
                })
                .count() as u8;
            assert_eq!(chunk.raised_neighbors, expected);
        }
    }
}
