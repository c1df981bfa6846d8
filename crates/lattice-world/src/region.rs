//! Regions: one world cell, one grid of chunks.
//!
//! A region owns the coordinate map of its chunks and everything generated
//! on it: exits negotiated with its neighbours, paths linking those exits,
//! and zones placed on the remaining free cells.

use glam::Vec3;
use lattice_common::{Edge, GridError, GridPos, SeedRng, Tag, TagSet};
use lattice_grid::{find_path, try_create_zone, CoordinateMap, Path, Zone, ZonePattern};
use tracing::{debug, warn};

use crate::chunk::ChunkLayout;

/// Tags an exit-to-exit path may walk through.
pub const PATH_TRAVERSABLE: TagSet = TagSet::of(&[Tag::Null, Tag::Path]);

/// Tags a zone connector may walk through.
pub const CONNECTOR_TRAVERSABLE: TagSet = TagSet::of(&[Tag::Null, Tag::Path, Tag::Zone]);

/// Outcome counters for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionStats {
    /// Exits this region originated
    pub exits_created: usize,
    /// Exits copied from neighbours
    pub exits_mirrored: usize,
    /// Edges sealed at the world boundary
    pub edges_closed: usize,
    /// Exit paths found
    pub paths_built: usize,
    /// Exit paths with no route
    pub paths_failed: usize,
    /// Zones placed
    pub zones_placed: usize,
    /// Zone attempts rejected
    pub zones_rejected: usize,
    /// Zone connectors found
    pub connectors_built: usize,
    /// Zone connectors with no route
    pub connectors_failed: usize,
}

/// One cell of the world map and the chunk grid it contains.
#[derive(Debug, Clone)]
pub struct Region {
    /// Position in the world map
    world_pos: GridPos,
    /// Chunk-level coordinate map
    map: CoordinateMap,
    /// Paths linking exits
    paths: Vec<Path>,
    /// Placed zones
    zones: Vec<Zone>,
    /// Paths linking zones to the path network
    connectors: Vec<Path>,
    /// Outcome counters
    stats: RegionStats,
}

impl Region {
    /// Builds the chunk map for the region at `world_pos`, with cell `(0, 0)`
    /// placed at `origin`.
    pub fn build(
        world_pos: GridPos,
        width: usize,
        cell_size: f32,
        origin: Vec3,
    ) -> Result<Self, GridError> {
        Ok(Self {
            world_pos,
            map: CoordinateMap::build(width, cell_size, origin)?,
            paths: Vec::new(),
            zones: Vec::new(),
            connectors: Vec::new(),
            stats: RegionStats::default(),
        })
    }

    /// Position in the world map.
    #[must_use]
    pub const fn world_pos(&self) -> GridPos {
        self.world_pos
    }

    /// Chunk-level coordinate map.
    #[must_use]
    pub const fn map(&self) -> &CoordinateMap {
        &self.map
    }

    /// Paths linking exits, in build order.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Placed zones, in placement order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Paths linking zones to the path network.
    #[must_use]
    pub fn connectors(&self) -> &[Path] {
        &self.connectors
    }

    /// Outcome counters.
    #[must_use]
    pub const fn stats(&self) -> RegionStats {
        self.stats
    }

    /// Exit positions on `edge`, in edge order.
    #[must_use]
    pub fn exits_on(&self, edge: Edge) -> Vec<GridPos> {
        self.map.exits_on(edge)
    }

    /// Seals `edge` because no region lies beyond it.
    pub fn close_edge(&mut self, edge: Edge) -> bool {
        let closed = self.map.close_border(edge);
        if closed {
            self.stats.edges_closed += 1;
        }
        closed
    }

    /// Makes the exits on `edge` the mirror image of the neighbour's exits on
    /// its touching edge. Exits on `edge` that the neighbour lacks are
    /// demoted back to border. Returns whether anything changed.
    pub fn mirror_exits(&mut self, edge: Edge, neighbor_exits: &[GridPos]) -> bool {
        let width = self.map.width();
        let wanted: Vec<GridPos> = neighbor_exits
            .iter()
            .map(|pos| edge.opposite().mirror(*pos, width))
            .filter(|pos| self.map.border(edge).contains(*pos))
            .collect();

        let mut changed = false;
        for pos in self.exits_on(edge) {
            if !wanted.contains(&pos) {
                self.map.set_tag(pos, Tag::Border);
                changed = true;
            }
        }
        for pos in wanted {
            if self.map.set_tag(pos, Tag::Exit) != Some(Tag::Exit) {
                self.stats.exits_mirrored += 1;
                changed = true;
            }
        }
        changed
    }

    /// Randomly turns up to `max_exits` border cells of `edge` into exits.
    ///
    /// With probability `1 - chance` the edge gets none. Closed edges never
    /// get exits. Returns the number created.
    pub fn create_exits(
        &mut self,
        edge: Edge,
        rng: &mut SeedRng,
        chance: f32,
        max_exits: usize,
    ) -> usize {
        let border = self.map.border(edge);
        if border.is_closed() || max_exits == 0 || !rng.chance(chance) {
            return 0;
        }

        let mut candidates: Vec<GridPos> = border
            .positions()
            .iter()
            .copied()
            .filter(|pos| self.map.tag_at(*pos) == Some(Tag::Border))
            .collect();
        if candidates.is_empty() {
            return 0;
        }

        let count = rng.rng().usize(1..=max_exits.min(candidates.len()));
        rng.rng().shuffle(&mut candidates);
        candidates.truncate(count);
        candidates.sort_unstable();

        for pos in &candidates {
            self.map.set_tag(*pos, Tag::Exit);
        }
        self.stats.exits_created += count;
        debug!(
            "Region {} created {count} exit(s) on its {edge} edge",
            self.world_pos
        );
        count
    }

    /// Demotes corners stranded between two closed edges.
    pub fn seal_corners(&mut self) -> usize {
        self.map.demote_sealed_corners()
    }

    /// Links the region's exits with paths.
    ///
    /// Exits are visited in angular order around the region center and each
    /// is linked to the next, so paths form a chain across the region. A lone
    /// exit is linked to the center cell instead. The RNG is reseeded before
    /// every search.
    pub fn connect_exits(&mut self, rng: &mut SeedRng, randomness: f32) {
        let center = self.center();
        let mut exits: Vec<GridPos> = self.map.all_of_tag(Tag::Exit).iter().copied().collect();
        exits.sort_by(|a, b| angle_around(center, *a).total_cmp(&angle_around(center, *b)));

        let legs: Vec<(GridPos, GridPos)> = match exits.len() {
            0 => Vec::new(),
            1 => vec![(exits[0], center)],
            _ => exits.windows(2).map(|w| (w[0], w[1])).collect(),
        };

        for (leg, (start, end)) in legs.into_iter().enumerate() {
            rng.reseed_for(&self.step_label("paths", leg));
            let path = find_path(&self.map, start, end, PATH_TRAVERSABLE, randomness, rng.rng());
            if path.is_empty() {
                warn!(
                    "Region {}: no path from {start} to {end}, skipping",
                    self.world_pos
                );
                self.stats.paths_failed += 1;
                continue;
            }
            self.pave(&path);
            self.paths.push(path);
            self.stats.paths_built += 1;
        }
    }

    /// Tries `attempts` random centers and patterns, placing every valid zone.
    pub fn place_zones(&mut self, rng: &mut SeedRng, attempts: usize, height: f32) {
        rng.reseed_for(&self.step_label("zones", 0));

        for _ in 0..attempts {
            let free = self.map.all_of_tag(Tag::Null);
            if free.is_empty() {
                debug!("Region {} has no free cells left for zones", self.world_pos);
                break;
            }
            let pick = rng.rng().usize(..free.len());
            let Some(center) = free.iter().nth(pick).copied() else {
                break;
            };
            let pattern = ZonePattern::ALL[rng.rng().usize(..ZonePattern::ALL.len())];

            match try_create_zone(&self.map, center, pattern, height) {
                Some(zone) => {
                    zone.apply(&mut self.map);
                    self.zones.push(zone);
                    self.stats.zones_placed += 1;
                },
                None => self.stats.zones_rejected += 1,
            }
        }

        debug!(
            "Region {} placed {} zone(s), {} attempt(s) rejected",
            self.world_pos, self.stats.zones_placed, self.stats.zones_rejected
        );
    }

    /// Links every placed zone to the nearest path cell.
    pub fn connect_zones(&mut self, rng: &mut SeedRng, randomness: f32) {
        for k in 0..self.zones.len() {
            let center = self.zones[k].center();
            let Some(target) = nearest(self.map.all_of_tag(Tag::Path).iter().copied(), center)
            else {
                debug!(
                    "Region {} has no paths to connect zones to",
                    self.world_pos
                );
                return;
            };

            rng.reseed_for(&self.step_label("connectors", k));
            let path = find_path(
                &self.map,
                center,
                target,
                CONNECTOR_TRAVERSABLE,
                randomness,
                rng.rng(),
            );
            if path.is_empty() {
                warn!(
                    "Region {}: zone at {center} cannot reach the path network",
                    self.world_pos
                );
                self.stats.connectors_failed += 1;
                continue;
            }
            self.pave(&path);
            self.connectors.push(path);
            self.stats.connectors_built += 1;
        }
    }

    /// One descriptor per chunk, for mesh and height collaborators.
    #[must_use]
    pub fn chunk_layout(&self) -> ChunkLayout {
        ChunkLayout::from_region(self)
    }

    /// Center cell of the region's grid.
    #[must_use]
    pub fn center(&self) -> GridPos {
        let mid = self.map.width() / 2;
        GridPos::new(mid, mid)
    }

    /// Retags the free cells of `path` as path.
    fn pave(&mut self, path: &Path) {
        for pos in path.iter() {
            if self.map.tag_at(*pos) == Some(Tag::Null) {
                self.map.set_tag(*pos, Tag::Path);
            }
        }
    }

    fn step_label(&self, step: &str, n: usize) -> String {
        format!("{step}/{},{}/{n}", self.world_pos.x, self.world_pos.y)
    }
}

fn angle_around(center: GridPos, pos: GridPos) -> f32 {
    ((pos.y - center.y) as f32).atan2((pos.x - center.x) as f32)
}

/// Closest of `candidates` to `from`; ties go to the earliest candidate.
fn nearest(candidates: impl Iterator<Item = GridPos>, from: GridPos) -> Option<GridPos> {
    let mut best: Option<(GridPos, f32)> = None;
    for pos in candidates {
        let distance = from.distance(pos);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(width: usize) -> Region {
        Region::build(GridPos::new(0, 0), width, 1.0, Vec3::ZERO).expect("valid width")
    }

    #[test]
    fn test_mirror_replaces_exits() {
        let mut region = region(6);
        region.map.set_tag(GridPos::new(0, 1), Tag::Exit);

        // Neighbour to the west has exits on its east edge.
        let changed = region.mirror_exits(Edge::West, &[GridPos::new(5, 2), GridPos::new(5, 4)]);

        assert!(changed);
        assert_eq!(
            region.exits_on(Edge::West),
            vec![GridPos::new(0, 2), GridPos::new(0, 4)]
        );
        assert_eq!(region.map.tag_at(GridPos::new(0, 1)), Some(Tag::Border));
        assert!(!region.mirror_exits(Edge::West, &[GridPos::new(5, 2), GridPos::new(5, 4)]));
    }

    #[test]
    fn test_create_exits_respects_bounds() {
        let mut region = region(8);
        let mut rng = SeedRng::from_seed_str("exits");
        let created = region.create_exits(Edge::North, &mut rng, 1.0, 3);
        assert!((1..=3).contains(&created));
        assert_eq!(region.exits_on(Edge::North).len(), created);
        assert_eq!(region.stats().exits_created, created);

        assert_eq!(region.create_exits(Edge::South, &mut rng, 0.0, 3), 0);
        assert_eq!(region.create_exits(Edge::East, &mut rng, 1.0, 0), 0);
    }

    #[test]
    fn test_closed_edge_gets_no_exits() {
        let mut region = region(6);
        assert!(region.close_edge(Edge::East));
        assert!(!region.close_edge(Edge::East));
        let mut rng = SeedRng::from_seed_str("closed");
        assert_eq!(region.create_exits(Edge::East, &mut rng, 1.0, 4), 0);
        assert_eq!(region.stats().edges_closed, 1);
    }

    #[test]
    fn test_connect_two_exits() {
        let mut region = region(5);
        region.map.set_tag(GridPos::new(0, 2), Tag::Exit);
        region.map.set_tag(GridPos::new(4, 2), Tag::Exit);
        let mut rng = SeedRng::from_seed_str("paths");

        region.connect_exits(&mut rng, 0.0);

        assert_eq!(region.paths().len(), 1);
        assert_eq!(region.map.count(Tag::Path), 3);
        assert_eq!(region.stats().paths_built, 1);
        assert_eq!(region.map.count(Tag::Exit), 2);
        region.map.verify_index();
    }

    #[test]
    fn test_lone_exit_leads_to_center() {
        let mut region = region(7);
        region.map.set_tag(GridPos::new(3, 0), Tag::Exit);
        let mut rng = SeedRng::from_seed_str("lone");

        region.connect_exits(&mut rng, 0.0);

        assert_eq!(region.paths().len(), 1);
        assert_eq!(region.paths()[0].end(), Some(region.center()));
        assert_eq!(region.map.tag_at(region.center()), Some(Tag::Path));
    }

    #[test]
    fn test_unreachable_exit_is_soft_failure() {
        let mut region = region(5);
        region.map.set_tag(GridPos::new(0, 2), Tag::Exit);
        region.map.set_tag(GridPos::new(4, 2), Tag::Exit);
        for y in 1..4 {
            region.map.set_tag(GridPos::new(2, y), Tag::Zone);
        }
        let mut rng = SeedRng::from_seed_str("blocked");

        region.connect_exits(&mut rng, 0.0);

        assert!(region.paths().is_empty());
        assert_eq!(region.stats().paths_failed, 1);
        assert_eq!(region.map.count(Tag::Path), 0);
    }

    #[test]
    fn test_zones_only_cover_free_cells() {
        let mut region = region(12);
        region.map.set_tag(GridPos::new(0, 5), Tag::Exit);
        region.map.set_tag(GridPos::new(11, 5), Tag::Exit);
        let mut rng = SeedRng::from_seed_str("zones");
        region.connect_exits(&mut rng, 0.0);
        let path_cells = region.map.all_of_tag(Tag::Path).clone();

        region.place_zones(&mut rng, 20, 3.0);

        let stats = region.stats();
        assert!(stats.zones_placed + stats.zones_rejected <= 20);
        assert!(!region.zones().is_empty());
        assert_eq!(stats.zones_placed, region.zones().len());
        for zone in region.zones() {
            for pos in zone.positions() {
                assert_eq!(region.map.tag_at(*pos), Some(Tag::Zone));
                assert!(!path_cells.contains(pos));
            }
        }
        region.map.verify_index();
    }

    #[test]
    fn test_zone_connectors_reach_paths() {
        let mut region = region(12);
        region.map.set_tag(GridPos::new(0, 5), Tag::Exit);
        region.map.set_tag(GridPos::new(11, 5), Tag::Exit);
        let mut rng = SeedRng::from_seed_str("connect");
        region.connect_exits(&mut rng, 0.0);
        region.place_zones(&mut rng, 10, 1.0);

        region.connect_zones(&mut rng, 0.0);

        let stats = region.stats();
        assert_eq!(
            stats.connectors_built + stats.connectors_failed,
            region.zones().len()
        );
        for connector in region.connectors() {
            let end = connector.end().expect("non-empty");
            assert_eq!(region.map.tag_at(end), Some(Tag::Path));
        }
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let from = GridPos::new(2, 2);
        let candidates = [GridPos::new(1, 2), GridPos::new(3, 2), GridPos::new(9, 9)];
        assert_eq!(nearest(candidates.into_iter(), from), Some(GridPos::new(1, 2)));
        assert_eq!(nearest(std::iter::empty(), from), None);
    }
}
