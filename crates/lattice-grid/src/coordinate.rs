//! A single addressable grid cell.

use glam::Vec3;
use lattice_common::{Direction, Edge, GridPos, Tag};

use crate::map::CoordinateMap;

/// One cell of a [`CoordinateMap`].
///
/// Position, scene position, and neighbour table are fixed at construction.
/// The tag can only be changed through [`CoordinateMap::set_tag`], which keeps
/// the map's tag index in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// Grid-local position
    value: GridPos,
    /// Current classification
    tag: Tag,
    /// Edge this cell lies on, for non-corner perimeter cells
    edge: Option<Edge>,
    /// World-space position of the cell origin
    scene_position: Vec3,
    /// Neighbour positions indexed by [`Direction::index`]
    neighbors: [GridPos; 8],
}

impl Coordinate {
    pub(crate) fn new(value: GridPos, tag: Tag, edge: Option<Edge>, scene_position: Vec3) -> Self {
        Self {
            value,
            tag,
            edge,
            scene_position,
            neighbors: Direction::ALL.map(|direction| value.step(direction)),
        }
    }

    /// Grid-local position.
    #[must_use]
    pub const fn value(&self) -> GridPos {
        self.value
    }

    /// Current classification.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Edge this cell lies on. Corners and interior cells have none.
    #[must_use]
    pub const fn edge(&self) -> Option<Edge> {
        self.edge
    }

    /// World-space position of the cell.
    #[must_use]
    pub const fn scene_position(&self) -> Vec3 {
        self.scene_position
    }

    /// Position one step away in `direction`. May lie off the grid.
    #[must_use]
    pub const fn neighbor_position(&self, direction: Direction) -> GridPos {
        self.neighbors[direction.index()]
    }

    pub(crate) fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    /// The neighbouring cell in `direction`, if it is on the grid.
    #[must_use]
    pub fn neighbor<'m>(&self, map: &'m CoordinateMap, direction: Direction) -> Option<&'m Coordinate> {
        map.get(self.neighbor_position(direction))
    }

    /// Edge-sharing neighbours that exist on the grid, clockwise from north.
    #[must_use]
    pub fn valid_natural_neighbors<'m>(&self, map: &'m CoordinateMap) -> Vec<&'m Coordinate> {
        self.neighbors_in(map, &Direction::NATURAL)
    }

    /// Corner-sharing neighbours that exist on the grid, clockwise from north-east.
    #[must_use]
    pub fn valid_diagonal_neighbors<'m>(&self, map: &'m CoordinateMap) -> Vec<&'m Coordinate> {
        self.neighbors_in(map, &Direction::DIAGONAL)
    }

    /// All eight neighbours that exist on the grid, clockwise from north.
    #[must_use]
    pub fn all_valid_neighbors<'m>(&self, map: &'m CoordinateMap) -> Vec<&'m Coordinate> {
        self.neighbors_in(map, &Direction::ALL)
    }

    /// Neighbours in the given directions that exist on the grid, in order.
    #[must_use]
    pub fn neighbors_in<'m>(
        &self,
        map: &'m CoordinateMap,
        directions: &[Direction],
    ) -> Vec<&'m Coordinate> {
        directions
            .iter()
            .filter_map(|direction| self.neighbor(map, *direction))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(width: usize) -> CoordinateMap {
        CoordinateMap::build(width, 1.0, Vec3::ZERO).expect("valid width")
    }

    #[test]
    fn test_neighbor_table_is_fixed_offsets() {
        let coord = Coordinate::new(GridPos::new(3, 3), Tag::Null, None, Vec3::ZERO);
        assert_eq!(coord.neighbor_position(Direction::North), GridPos::new(3, 4));
        assert_eq!(coord.neighbor_position(Direction::SouthWest), GridPos::new(2, 2));
        assert_eq!(coord.neighbor_position(Direction::East), GridPos::new(4, 3));
    }

    #[test]
    fn test_interior_has_all_neighbors() {
        let map = map(5);
        let center = map.get(GridPos::new(2, 2)).expect("center");
        assert_eq!(center.valid_natural_neighbors(&map).len(), 4);
        assert_eq!(center.valid_diagonal_neighbors(&map).len(), 4);
        assert_eq!(center.all_valid_neighbors(&map).len(), 8);
    }

    #[test]
    fn test_corner_drops_off_grid_neighbors() {
        let map = map(5);
        let corner = map.get(GridPos::new(0, 0)).expect("corner");
        let natural: Vec<GridPos> = corner
            .valid_natural_neighbors(&map)
            .iter()
            .map(|c| c.value())
            .collect();
        assert_eq!(natural, vec![GridPos::new(0, 1), GridPos::new(1, 0)]);
        assert_eq!(corner.valid_diagonal_neighbors(&map).len(), 1);
        assert_eq!(corner.all_valid_neighbors(&map).len(), 3);
        assert!(corner.neighbor(&map, Direction::South).is_none());
    }

    #[test]
    fn test_edge_annotation() {
        let map = map(4);
        assert_eq!(map.get(GridPos::new(0, 1)).and_then(Coordinate::edge), Some(Edge::West));
        assert_eq!(map.get(GridPos::new(2, 3)).and_then(Coordinate::edge), Some(Edge::North));
        assert_eq!(map.get(GridPos::new(0, 0)).and_then(Coordinate::edge), None);
        assert_eq!(map.get(GridPos::new(1, 1)).and_then(Coordinate::edge), None);
    }
}
