//! Per-edge border records.

use lattice_common::{Edge, GridPos};

/// The non-corner cells along one edge of a map, and whether the edge is sealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    edge: Edge,
    positions: Vec<GridPos>,
    closed: bool,
}

impl Border {
    /// Lists the cells of `edge` on a `width`-wide grid, corners excluded,
    /// ordered along the edge by increasing `x` or `y`.
    #[must_use]
    pub fn new(edge: Edge, width: i32) -> Self {
        let last = width - 1;
        let positions = (1..last)
            .map(|along| match edge {
                Edge::North => GridPos::new(along, last),
                Edge::South => GridPos::new(along, 0),
                Edge::East => GridPos::new(last, along),
                Edge::West => GridPos::new(0, along),
            })
            .collect();
        Self {
            edge,
            positions,
            closed: false,
        }
    }

    /// Which edge this record covers.
    #[must_use]
    pub const fn edge(&self) -> Edge {
        self.edge
    }

    /// Cells on this edge in order.
    #[must_use]
    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    /// Whether the edge has been sealed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether `pos` belongs to this edge.
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }

    pub(crate) fn mark_closed(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_excludes_corners() {
        let border = Border::new(Edge::West, 5);
        assert_eq!(
            border.positions(),
            &[GridPos::new(0, 1), GridPos::new(0, 2), GridPos::new(0, 3)]
        );
        assert!(border.contains(GridPos::new(0, 2)));
        assert!(!border.contains(GridPos::new(0, 0)));
        assert!(!border.is_closed());
    }

    #[test]
    fn test_border_positions_sorted() {
        for edge in Edge::ALL {
            let border = Border::new(edge, 6);
            assert_eq!(border.positions().len(), 4);
            assert!(border.positions().windows(2).all(|w| w[0] < w[1]), "{edge}");
        }
    }
}
