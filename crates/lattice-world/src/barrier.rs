//! Counting completion gate for pipeline stages.

use std::collections::BTreeSet;

use crate::orchestrator::GenerationStage;

/// Tracks which regions have finished the current stage.
///
/// The gate opens once every expected region has arrived. Regions report
/// having *attempted* the stage; soft failures inside the attempt still count
/// as arrival.
#[derive(Debug, Clone)]
pub struct StageBarrier {
    stage: GenerationStage,
    expected: usize,
    arrived: BTreeSet<usize>,
}

impl StageBarrier {
    /// Creates a closed gate for `stage` waiting on `expected` regions.
    #[must_use]
    pub fn new(stage: GenerationStage, expected: usize) -> Self {
        Self {
            stage,
            expected,
            arrived: BTreeSet::new(),
        }
    }

    /// Stage this gate guards.
    #[must_use]
    pub const fn stage(&self) -> GenerationStage {
        self.stage
    }

    /// Records that region `region` finished the stage.
    ///
    /// # Panics
    ///
    /// Panics if the region is out of range or arrives twice; either means
    /// the stage loop visited regions incorrectly.
    pub fn arrive(&mut self, region: usize) {
        assert!(
            region < self.expected,
            "region {region} arrived at {:?} but only {} expected",
            self.stage,
            self.expected
        );
        let first = self.arrived.insert(region);
        assert!(first, "region {region} arrived twice at {:?}", self.stage);
    }

    /// Number of regions still outstanding.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.expected - self.arrived.len()
    }

    /// Whether every expected region has arrived.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_after_all_arrive() {
        let mut barrier = StageBarrier::new(GenerationStage::Zones, 3);
        assert!(!barrier.is_open());
        barrier.arrive(2);
        barrier.arrive(0);
        assert_eq!(barrier.pending(), 1);
        barrier.arrive(1);
        assert!(barrier.is_open());
        assert_eq!(barrier.stage(), GenerationStage::Zones);
    }

    #[test]
    fn test_empty_barrier_is_open() {
        assert!(StageBarrier::new(GenerationStage::Seed, 0).is_open());
    }

    #[test]
    #[should_panic(expected = "arrived twice")]
    fn test_double_arrival_panics() {
        let mut barrier = StageBarrier::new(GenerationStage::BuildRegions, 2);
        barrier.arrive(1);
        barrier.arrive(1);
    }
}
