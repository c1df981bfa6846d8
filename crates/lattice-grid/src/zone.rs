//! Multi-cell zone placement.
//!
//! A zone covers a center cell plus the neighbours selected by its pattern.
//! Validity is decided once, at construction, against the map's current
//! tags; only a valid zone may be applied, so failed attempts never touch
//! the map.

use lattice_common::{Direction, GridPos, Tag};
use tracing::trace;

use crate::map::CoordinateMap;

/// Shape of the neighbourhood a zone claims around its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonePattern {
    /// All eight neighbours
    Full,
    /// The four edge-sharing neighbours
    NaturalCross,
    /// The four corner-sharing neighbours
    DiagonalCross,
    /// West and east
    Horizontal,
    /// North and south
    Vertical,
}

impl ZonePattern {
    /// Every pattern.
    pub const ALL: [Self; 5] = [
        Self::Full,
        Self::NaturalCross,
        Self::DiagonalCross,
        Self::Horizontal,
        Self::Vertical,
    ];

    /// Neighbour directions covered by this pattern.
    #[must_use]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Full => &Direction::ALL,
            Self::NaturalCross => &Direction::NATURAL,
            Self::DiagonalCross => &Direction::DIAGONAL,
            Self::Horizontal => &[Direction::West, Direction::East],
            Self::Vertical => &[Direction::North, Direction::South],
        }
    }
}

/// A candidate or placed zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    center: GridPos,
    pattern: ZonePattern,
    height: f32,
    positions: Vec<GridPos>,
    valid: bool,
}

impl Zone {
    /// Evaluates a zone at `center` against the map's current tags.
    ///
    /// Neighbours off the grid are left out of the zone; any covered cell
    /// that is not [`Tag::Null`] makes the zone invalid. An off-grid center
    /// yields an invalid zone with no positions.
    #[must_use]
    pub fn new(map: &CoordinateMap, center: GridPos, pattern: ZonePattern, height: f32) -> Self {
        let Some(coordinate) = map.get(center) else {
            return Self {
                center,
                pattern,
                height,
                positions: Vec::new(),
                valid: false,
            };
        };

        let covered = coordinate.neighbors_in(map, pattern.directions());
        let mut positions = Vec::with_capacity(covered.len() + 1);
        positions.push(center);
        positions.extend(covered.iter().map(|c| c.value()));

        let valid = coordinate.tag() == Tag::Null && covered.iter().all(|c| c.tag() == Tag::Null);

        Self {
            center,
            pattern,
            height,
            positions,
            valid,
        }
    }

    /// Center cell.
    #[must_use]
    pub const fn center(&self) -> GridPos {
        self.center
    }

    /// Placement pattern.
    #[must_use]
    pub const fn pattern(&self) -> ZonePattern {
        self.pattern
    }

    /// Height handed to downstream terrain collaborators.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Covered cells, center first.
    #[must_use]
    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    /// Whether every covered cell was free when the zone was evaluated.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Retags every covered cell to [`Tag::Zone`].
    ///
    /// Does nothing for an invalid zone. Returns the number of cells retagged.
    pub fn apply(&self, map: &mut CoordinateMap) -> usize {
        if !self.valid {
            return 0;
        }
        for pos in &self.positions {
            map.set_tag(*pos, Tag::Zone);
        }
        self.positions.len()
    }
}

/// Evaluates a zone and returns it only if it is valid.
///
/// The map is not modified; call [`Zone::apply`] on the result to place it.
#[must_use]
pub fn try_create_zone(
    map: &CoordinateMap,
    center: GridPos,
    pattern: ZonePattern,
    height: f32,
) -> Option<Zone> {
    let zone = Zone::new(map, center, pattern, height);
    if zone.is_valid() {
        Some(zone)
    } else {
        trace!("Rejected {pattern:?} zone at {center}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn map(width: usize) -> CoordinateMap {
        CoordinateMap::build(width, 1.0, Vec3::ZERO).expect("valid width")
    }

    #[test]
    fn test_pattern_sizes() {
        let map = map(7);
        let center = GridPos::new(3, 3);
        let sizes: Vec<usize> = ZonePattern::ALL
            .iter()
            .map(|p| Zone::new(&map, center, *p, 0.0).positions().len())
            .collect();
        assert_eq!(sizes, vec![9, 5, 5, 3, 3]);
    }

    #[test]
    fn test_vertical_zone_rejected_next_to_border() {
        let mut map = map(5);
        map.set_tag(GridPos::new(2, 1), Tag::Border);
        let before: Vec<Option<Tag>> = [(2, 2), (2, 1), (2, 3)]
            .iter()
            .map(|p| map.tag_at((*p).into()))
            .collect();

        assert!(try_create_zone(&map, GridPos::new(2, 2), ZonePattern::Vertical, 1.0).is_none());

        let after: Vec<Option<Tag>> = [(2, 2), (2, 1), (2, 3)]
            .iter()
            .map(|p| map.tag_at((*p).into()))
            .collect();
        assert_eq!(before, after);
        assert_eq!(after, vec![Some(Tag::Null), Some(Tag::Border), Some(Tag::Null)]);
    }

    #[test]
    fn test_valid_zone_applies() {
        let mut map = map(5);
        let zone = try_create_zone(&map, GridPos::new(2, 2), ZonePattern::NaturalCross, 2.0)
            .expect("free neighbourhood");
        assert_eq!(zone.apply(&mut map), 5);
        assert_eq!(map.count(Tag::Zone), 5);
        assert_eq!(map.tag_at(GridPos::new(1, 1)), Some(Tag::Null));
        assert!((zone.height() - 2.0).abs() < f32::EPSILON);
        map.verify_index();
    }

    #[test]
    fn test_off_grid_neighbors_do_not_invalidate() {
        let mut map = map(4);
        // Clear a corner so the zone only depends on on-grid cells.
        for pos in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            map.set_tag(pos.into(), Tag::Null);
        }
        let zone = try_create_zone(&map, GridPos::new(0, 0), ZonePattern::Full, 0.0)
            .expect("off-grid neighbours are skipped");
        assert_eq!(zone.positions().len(), 4);
    }

    #[test]
    fn test_invalid_zone_never_applies() {
        let mut map = map(5);
        let zone = Zone::new(&map, GridPos::new(1, 1), ZonePattern::Full, 0.0);
        assert!(!zone.is_valid());
        assert_eq!(zone.apply(&mut map), 0);
        assert_eq!(map.count(Tag::Zone), 0);

        let off_grid = Zone::new(&map, GridPos::new(9, 9), ZonePattern::Full, 0.0);
        assert!(!off_grid.is_valid());
        assert!(off_grid.positions().is_empty());
    }

    #[test]
    fn test_occupied_center_rejected() {
        let mut map = map(5);
        map.set_tag(GridPos::new(2, 2), Tag::Path);
        assert!(try_create_zone(&map, GridPos::new(2, 2), ZonePattern::Horizontal, 0.0).is_none());
    }
}
