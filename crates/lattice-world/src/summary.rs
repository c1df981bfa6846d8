//! Topology summary for logging and tooling.

use std::fmt;

use lattice_common::Tag;

use crate::region::RegionStats;
use crate::world::World;

/// Aggregate counts across every region of a world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologySummary {
    /// Seed string the world was generated from
    pub seed: String,
    /// Regions built
    pub regions: usize,
    /// Chunk cells per tag across all regions, indexed by [`Tag::index`]
    pub tag_counts: [usize; Tag::COUNT],
    /// Summed per-region counters
    pub totals: RegionStats,
}

impl TopologySummary {
    /// Tallies `world`, or returns an empty summary when there is none yet.
    #[must_use]
    pub fn collect(seed: &str, world: Option<&World>) -> Self {
        let mut summary = Self {
            seed: seed.to_string(),
            ..Self::default()
        };
        let Some(world) = world else {
            return summary;
        };

        summary.regions = world.regions().len();
        for region in world.regions() {
            for tag in Tag::ALL {
                summary.tag_counts[tag.index()] += region.map().count(tag);
            }
            let stats = region.stats();
            let totals = &mut summary.totals;
            totals.exits_created += stats.exits_created;
            totals.exits_mirrored += stats.exits_mirrored;
            totals.edges_closed += stats.edges_closed;
            totals.paths_built += stats.paths_built;
            totals.paths_failed += stats.paths_failed;
            totals.zones_placed += stats.zones_placed;
            totals.zones_rejected += stats.zones_rejected;
            totals.connectors_built += stats.connectors_built;
            totals.connectors_failed += stats.connectors_failed;
        }
        summary
    }

    /// Chunk cells carrying `tag` across all regions.
    #[must_use]
    pub const fn count(&self, tag: Tag) -> usize {
        self.tag_counts[tag.index()]
    }
}

impl fmt::Display for TopologySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {:?}: {} regions, {} exits, {} paths ({} failed), {} zones ({} rejected), {} connectors ({} failed)",
            self.seed,
            self.regions,
            self.count(Tag::Exit),
            self.totals.paths_built,
            self.totals.paths_failed,
            self.totals.zones_placed,
            self.totals.zones_rejected,
            self.totals.connectors_built,
            self.totals.connectors_failed,
        )
    }
}
