//! Staged generation pipeline.
//!
//! Generation runs as a fixed sequence of stages. Each stage visits every
//! region and is guarded by a [`StageBarrier`]: no region enters the next
//! stage until all regions have finished the current one. A region failing
//! softly (no path, rejected zone) still counts as finished.
//!
//! ```text
//! Seed -> BuildWorldMap -> BuildRegions -> NegotiateExitsPass1
//!      -> NegotiateExitsPass2AndPaths -> Zones -> Ready
//! ```

use lattice_common::{LatticeResult, SeedRng};
use tracing::{debug, info};

use crate::barrier::StageBarrier;
use crate::chunk::ChunkLayout;
use crate::config::GenerationConfig;
use crate::negotiation::{negotiate_region, NegotiationPass};
use crate::region::Region;
use crate::summary::TopologySummary;
use crate::world::World;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenerationStage {
    /// Initialize the RNG from the seed string
    Seed,
    /// Build the world-level coordinate map
    BuildWorldMap,
    /// Build one region map per world cell
    BuildRegions,
    /// Mirror or create exits
    NegotiateExitsPass1,
    /// Mirror exits, seal corners, and link exits with paths
    NegotiateExitsPass2AndPaths,
    /// Place zones and link them to paths
    Zones,
    /// Topology complete
    Ready,
}

impl GenerationStage {
    /// The stage that follows this one. `Ready` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Seed => Self::BuildWorldMap,
            Self::BuildWorldMap => Self::BuildRegions,
            Self::BuildRegions => Self::NegotiateExitsPass1,
            Self::NegotiateExitsPass1 => Self::NegotiateExitsPass2AndPaths,
            Self::NegotiateExitsPass2AndPaths => Self::Zones,
            Self::Zones | Self::Ready => Self::Ready,
        }
    }
}

/// Drives generation from a seed to a finished topology.
#[derive(Debug)]
pub struct Orchestrator {
    config: GenerationConfig,
    stage: GenerationStage,
    rng: SeedRng,
    world: Option<World>,
}

impl Orchestrator {
    /// Creates an orchestrator waiting at [`GenerationStage::Seed`].
    ///
    /// The config is validated up front; invalid sizes are rejected here
    /// rather than partway through generation.
    pub fn new(mut config: GenerationConfig) -> LatticeResult<Self> {
        config.validate()?;
        let rng = SeedRng::from_seed_str(&config.seed);
        Ok(Self {
            config,
            stage: GenerationStage::Seed,
            rng,
            world: None,
        })
    }

    /// The stage that the next [`Orchestrator::step`] will run.
    #[must_use]
    pub const fn stage(&self) -> GenerationStage {
        self.stage
    }

    /// Whether generation has finished.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.stage == GenerationStage::Ready
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// The world built so far, if the world map stage has run.
    #[must_use]
    pub const fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Runs the current stage for every region and advances once its barrier
    /// opens. Does nothing at [`GenerationStage::Ready`].
    ///
    /// Returns the new current stage.
    pub fn step(&mut self) -> LatticeResult<GenerationStage> {
        let stage = self.stage;
        if stage == GenerationStage::Ready {
            return Ok(stage);
        }

        info!("Stage {stage:?} starting");
        let barrier = match stage {
            GenerationStage::Seed => self.run_seed(),
            GenerationStage::BuildWorldMap => self.run_build_world_map()?,
            GenerationStage::BuildRegions => self.run_build_regions()?,
            GenerationStage::NegotiateExitsPass1 => self.run_negotiation_pass1(),
            GenerationStage::NegotiateExitsPass2AndPaths => self.run_negotiation_pass2_and_paths(),
            GenerationStage::Zones => self.run_zones(),
            GenerationStage::Ready => unreachable!("handled above"),
        };
        assert!(
            barrier.is_open(),
            "stage {stage:?} finished with {} region(s) outstanding",
            barrier.pending()
        );

        self.stage = stage.next();
        debug!("Stage {stage:?} complete, next {:?}", self.stage);
        if self.is_ready() {
            info!("Topology ready: {}", self.summary());
        }
        Ok(self.stage)
    }

    /// Steps until [`GenerationStage::Ready`] and returns the final counts.
    pub fn run(&mut self) -> LatticeResult<TopologySummary> {
        while !self.is_ready() {
            self.step()?;
        }
        Ok(self.summary())
    }

    /// Discards every map and region and returns to [`GenerationStage::Seed`].
    pub fn reset(&mut self) {
        info!("Resetting generation");
        self.world = None;
        self.stage = GenerationStage::Seed;
    }

    /// Replaces the seed string and resets.
    pub fn reseed(&mut self, seed: impl Into<String>) {
        self.config.seed = seed.into();
        self.reset();
    }

    /// Counts of what has been generated so far.
    #[must_use]
    pub fn summary(&self) -> TopologySummary {
        TopologySummary::collect(&self.config.seed, self.world.as_ref())
    }

    /// Per-region chunk layouts for downstream collaborators.
    ///
    /// Returns `None` until generation is [`GenerationStage::Ready`].
    #[must_use]
    pub fn chunk_layouts(&self) -> Option<Vec<ChunkLayout>> {
        if !self.is_ready() {
            return None;
        }
        self.world
            .as_ref()
            .map(|world| world.regions().iter().map(Region::chunk_layout).collect())
    }

    fn run_seed(&mut self) -> StageBarrier {
        self.rng = SeedRng::from_seed_str(&self.config.seed);
        debug!(
            "Seeded RNG from {:?} (master {:#018x})",
            self.config.seed,
            self.rng.master()
        );
        StageBarrier::new(GenerationStage::Seed, 0)
    }

    fn run_build_world_map(&mut self) -> LatticeResult<StageBarrier> {
        self.world = Some(World::build_map(&self.config)?);
        Ok(StageBarrier::new(GenerationStage::BuildWorldMap, 0))
    }

    fn run_build_regions(&mut self) -> LatticeResult<StageBarrier> {
        let world = self.world.as_mut().expect("world map built before regions");
        let mut barrier = StageBarrier::new(GenerationStage::BuildRegions, world.region_count());
        for index in 0..world.region_count() {
            world.build_region(index, &self.config)?;
            barrier.arrive(index);
        }
        Ok(barrier)
    }

    fn run_negotiation_pass1(&mut self) -> StageBarrier {
        let stage = GenerationStage::NegotiateExitsPass1;
        self.negotiate_all(stage, NegotiationPass::Create)
    }

    fn run_negotiation_pass2_and_paths(&mut self) -> StageBarrier {
        let stage = GenerationStage::NegotiateExitsPass2AndPaths;
        let negotiated = self.negotiate_all(stage, NegotiationPass::MirrorOnly);
        assert!(negotiated.is_open(), "mirror pass left regions outstanding");

        let randomness = self.config.path_randomness;
        let world = self.world.as_mut().expect("world map built before negotiation");
        let mut barrier = StageBarrier::new(stage, world.region_count());
        for index in 0..world.region_count() {
            if let Some(region) = world.region_mut(index) {
                region.seal_corners();
                region.connect_exits(&mut self.rng, randomness);
            }
            barrier.arrive(index);
        }
        barrier
    }

    fn run_zones(&mut self) -> StageBarrier {
        let config = &self.config;
        let world = self.world.as_mut().expect("world map built before zones");
        let mut barrier = StageBarrier::new(GenerationStage::Zones, world.region_count());
        for index in 0..world.region_count() {
            if let Some(region) = world.region_mut(index) {
                region.place_zones(&mut self.rng, config.zone_attempts, config.zone_height);
                if config.connect_zones {
                    region.connect_zones(&mut self.rng, config.path_randomness);
                }
            }
            barrier.arrive(index);
        }
        barrier
    }

    fn negotiate_all(&mut self, stage: GenerationStage, pass: NegotiationPass) -> StageBarrier {
        let config = &self.config;
        let world = self.world.as_mut().expect("world map built before negotiation");
        let mut barrier = StageBarrier::new(stage, world.region_count());
        for index in 0..world.region_count() {
            negotiate_region(world, index, pass, config, &mut self.rng);
            barrier.arrive(index);
        }
        barrier
    }
}
