//! Exit negotiation between neighbouring regions.
//!
//! Exits on a shared border are never picked independently on both sides:
//! whichever region reaches the border first originates them, and the other
//! mirrors. Negotiation runs twice over every region. The first pass may
//! create exits; the second only mirrors, which settles any border whose
//! sides were visited in an unlucky order during the first pass.

use lattice_common::{Direction, Edge, SeedRng};
use tracing::trace;

use crate::config::GenerationConfig;
use crate::world::World;

/// Which negotiation pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationPass {
    /// Mirror where the neighbour already has exits, otherwise maybe create
    Create,
    /// Mirror only
    MirrorOnly,
}

/// Negotiates every edge of region `index` with its world neighbours.
///
/// Edges facing outside the world are closed. Edges facing a neighbour
/// with exits on its touching edge mirror those exits. Remaining edges get
/// random exits during [`NegotiationPass::Create`].
pub fn negotiate_region(
    world: &mut World,
    index: usize,
    pass: NegotiationPass,
    config: &GenerationConfig,
    rng: &mut SeedRng,
) {
    for edge in Direction::ALL.into_iter().filter_map(Edge::from_direction) {
        let Some(neighbor) = world.neighbor_index(index, edge) else {
            if let Some(region) = world.region_mut(index) {
                region.close_edge(edge);
            }
            continue;
        };

        let theirs = world
            .regions()
            .get(neighbor)
            .map(|region| region.exits_on(edge.opposite()))
            .unwrap_or_default();

        let Some(region) = world.region_mut(index) else {
            return;
        };

        if !theirs.is_empty() {
            if region.mirror_exits(edge, &theirs) {
                trace!("Region {} mirrored {} exit(s) on {edge}", region.world_pos(), theirs.len());
            }
        } else if pass == NegotiationPass::Create {
            let pos = region.world_pos();
            rng.reseed_for(&format!("exits/{},{}/{edge}", pos.x, pos.y));
            region.create_exits(edge, rng, config.exit_chance, config.max_exits_per_edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_common::{GridPos, Tag};

    fn world(config: &GenerationConfig) -> World {
        let mut world = World::build_map(config).expect("world map");
        for index in 0..world.region_count() {
            world.build_region(index, config).expect("region");
        }
        world
    }

    fn negotiate(world: &mut World, config: &GenerationConfig, rng: &mut SeedRng) {
        for pass in [NegotiationPass::Create, NegotiationPass::MirrorOnly] {
            for index in 0..world.region_count() {
                negotiate_region(world, index, pass, config, rng);
            }
        }
    }

    fn assert_mirrored(world: &World) {
        let width = world.regions()[0].map().width();
        for (index, region) in world.regions().iter().enumerate() {
            for edge in Edge::ALL {
                let Some(neighbor) = world.neighbor_index(index, edge) else {
                    continue;
                };
                let ours: Vec<GridPos> = region
                    .exits_on(edge)
                    .into_iter()
                    .map(|pos| edge.mirror(pos, width))
                    .collect();
                let theirs = world.regions()[neighbor].exits_on(edge.opposite());
                assert_eq!(ours, theirs, "region {index} {edge}");
            }
        }
    }

    #[test]
    fn test_outer_edges_close() {
        let config = GenerationConfig {
            region_width: 6,
            world_width: 3,
            ..Default::default()
        };
        let mut world = world(&config);
        let mut rng = SeedRng::from_seed_str(&config.seed);
        negotiate(&mut world, &config, &mut rng);

        let corner = world.region(GridPos::new(0, 0)).expect("corner region");
        assert!(corner.map().border(Edge::South).is_closed());
        assert!(corner.map().border(Edge::West).is_closed());
        assert!(!corner.map().border(Edge::North).is_closed());
        assert_eq!(corner.stats().edges_closed, 2);

        let center = world.region(GridPos::new(1, 1)).expect("center region");
        assert_eq!(center.map().count(Tag::Closed), 0);
    }

    #[test]
    fn test_exits_mirror_across_borders() {
        for seed in ["alpha", "beta", "gamma", "delta"] {
            let config = GenerationConfig {
                seed: seed.to_string(),
                region_width: 8,
                world_width: 4,
                exit_chance: 0.6,
                max_exits_per_edge: 3,
                ..Default::default()
            };
            let mut world = world(&config);
            let mut rng = SeedRng::from_seed_str(seed);
            negotiate(&mut world, &config, &mut rng);
            assert_mirrored(&world);
        }
    }

    #[test]
    fn test_mirror_pass_repairs_late_creation() {
        let config = GenerationConfig {
            region_width: 6,
            world_width: 3,
            exit_chance: 1.0,
            ..Default::default()
        };
        let mut world = world(&config);
        let mut rng = SeedRng::from_seed_str("late");

        // Only the second region gets a creation pass; the first must pick up
        // its exits during the mirror pass.
        negotiate_region(&mut world, 1, NegotiationPass::Create, &config, &mut rng);
        let created = world.regions()[1].exits_on(Edge::West);
        assert!(!created.is_empty());
        assert!(world.regions()[0].exits_on(Edge::East).is_empty());

        negotiate_region(&mut world, 0, NegotiationPass::MirrorOnly, &config, &mut rng);
        let mirrored: Vec<GridPos> = world.regions()[0]
            .exits_on(Edge::East)
            .into_iter()
            .map(|pos| Edge::East.mirror(pos, 6))
            .collect();
        assert_eq!(mirrored, created);
    }

    #[test]
    fn test_mirror_only_never_creates() {
        let config = GenerationConfig {
            region_width: 6,
            world_width: 3,
            exit_chance: 1.0,
            ..Default::default()
        };
        let mut world = world(&config);
        let mut rng = SeedRng::from_seed_str("quiet");
        for index in 0..world.region_count() {
            negotiate_region(&mut world, index, NegotiationPass::MirrorOnly, &config, &mut rng);
        }
        assert!(world
            .regions()
            .iter()
            .all(|region| region.map().count(Tag::Exit) == 0));
    }
}
