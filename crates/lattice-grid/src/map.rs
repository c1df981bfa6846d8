//! Square grids of classified coordinates.
//!
//! A [`CoordinateMap`] owns every [`Coordinate`] of one scope (a region of
//! chunks, or the world of regions) together with a reverse index from tag
//! to positions. The index is the single source of truth other components
//! trust for "all cells of tag X", so every tag change goes through
//! [`CoordinateMap::set_tag`].

use std::collections::BTreeSet;

use glam::Vec3;
use lattice_common::{Edge, GridError, GridPos, Tag};
use tracing::{debug, trace};

use crate::border::Border;
use crate::coordinate::Coordinate;

/// Smallest width that leaves room for non-corner borders and an interior.
pub const MIN_MAP_WIDTH: usize = 3;

/// A square grid of coordinates with a tag index.
#[derive(Debug, Clone)]
pub struct CoordinateMap {
    /// Cells per side
    width: i32,
    /// World-space size of one cell
    cell_size: f32,
    /// World-space position of cell `(0, 0)`
    origin: Vec3,
    /// Cells in row-major order (`y * width + x`)
    cells: Vec<Coordinate>,
    /// Positions per tag, indexed by [`Tag::index`]
    index: [BTreeSet<GridPos>; Tag::COUNT],
    /// Border records, indexed by [`Edge::index`]
    borders: [Border; 4],
}

impl CoordinateMap {
    /// Builds a `width × width` map and classifies its cells.
    ///
    /// The four extreme cells become [`Tag::Corner`], the rest of the
    /// perimeter [`Tag::Border`] (annotated with its edge), and the interior
    /// [`Tag::Null`].
    pub fn build(width: usize, cell_size: f32, origin: Vec3) -> Result<Self, GridError> {
        if width < MIN_MAP_WIDTH {
            return Err(GridError::TooSmall {
                width,
                minimum: MIN_MAP_WIDTH,
            });
        }
        let side = i32::try_from(width).map_err(|_| GridError::TooLarge(width))?;
        let last = side - 1;

        let mut cells = Vec::with_capacity(width * width);
        let mut index: [BTreeSet<GridPos>; Tag::COUNT] = Default::default();

        for y in 0..side {
            for x in 0..side {
                let pos = GridPos::new(x, y);
                let on_x_edge = x == 0 || x == last;
                let on_y_edge = y == 0 || y == last;
                let (tag, edge) = match (on_x_edge, on_y_edge) {
                    (true, true) => (Tag::Corner, None),
                    (false, false) => (Tag::Null, None),
                    _ => (
                        Tag::Border,
                        Edge::ALL.into_iter().find(|edge| edge.contains(pos, side)),
                    ),
                };
                let scene_position =
                    origin + Vec3::new(x as f32 * cell_size, 0.0, y as f32 * cell_size);
                cells.push(Coordinate::new(pos, tag, edge, scene_position));
                index[tag.index()].insert(pos);
            }
        }

        let borders = Edge::ALL.map(|edge| Border::new(edge, side));

        debug!(
            "Built {width}x{width} coordinate map at ({:.1}, {:.1}, {:.1})",
            origin.x, origin.y, origin.z
        );

        Ok(Self {
            width: side,
            cell_size,
            origin,
            cells,
            index,
            borders,
        })
    }

    /// Cells per side.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// World-space size of one cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World-space position of cell `(0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a built map has at least nine cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies on the grid.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.width
    }

    /// Row-major index of `pos`, or `None` when off the grid.
    #[must_use]
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Position of the cell at row-major index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn position_at(&self, idx: usize) -> GridPos {
        assert!(idx < self.cells.len(), "cell index {idx} out of range");
        self.cells[idx].value()
    }

    /// The cell at `pos`, or `None` when off the grid.
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&Coordinate> {
        self.index_of(pos).map(|idx| &self.cells[idx])
    }

    /// Tag of the cell at `pos`, or `None` when off the grid.
    #[must_use]
    pub fn tag_at(&self, pos: GridPos) -> Option<Tag> {
        self.get(pos).map(Coordinate::tag)
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.cells.iter()
    }

    /// Positions currently carrying `tag`, in ascending order.
    #[must_use]
    pub fn all_of_tag(&self, tag: Tag) -> &BTreeSet<GridPos> {
        &self.index[tag.index()]
    }

    /// Number of cells currently carrying `tag`.
    #[must_use]
    pub fn count(&self, tag: Tag) -> usize {
        self.index[tag.index()].len()
    }

    /// Retags the cell at `pos`, keeping the tag index consistent.
    ///
    /// Returns the previous tag, or `None` (and does nothing) when `pos` is
    /// off the grid.
    pub fn set_tag(&mut self, pos: GridPos, tag: Tag) -> Option<Tag> {
        let idx = self.index_of(pos)?;
        let previous = self.cells[idx].tag();
        if previous == tag {
            return Some(previous);
        }

        let removed = self.index[previous.index()].remove(&pos);
        assert!(
            removed,
            "tag index out of sync: {pos} tagged {previous} but missing from its bucket"
        );
        self.cells[idx].set_tag(tag);
        self.index[tag.index()].insert(pos);

        trace!("Retagged {pos}: {previous} -> {tag}");
        Some(previous)
    }

    /// Border record for `edge`.
    #[must_use]
    pub fn border(&self, edge: Edge) -> &Border {
        &self.borders[edge.index()]
    }

    /// Positions on `edge` currently tagged [`Tag::Exit`], in edge order.
    #[must_use]
    pub fn exits_on(&self, edge: Edge) -> Vec<GridPos> {
        self.border(edge)
            .positions()
            .iter()
            .copied()
            .filter(|pos| self.tag_at(*pos) == Some(Tag::Exit))
            .collect()
    }

    /// Seals `edge`: marks its border closed and retags every cell on it to
    /// [`Tag::Closed`].
    ///
    /// Closing an edge that is already closed, or that has no cells, does
    /// nothing. Returns whether the edge was closed by this call.
    pub fn close_border(&mut self, edge: Edge) -> bool {
        let border = &self.borders[edge.index()];
        if border.is_closed() {
            debug!("Border {edge} already closed, skipping");
            return false;
        }
        if border.positions().is_empty() {
            debug!("Border {edge} has no cells, skipping");
            return false;
        }

        let positions = border.positions().to_vec();
        self.borders[edge.index()].mark_closed();
        for pos in positions {
            self.set_tag(pos, Tag::Closed);
        }
        debug!("Closed {edge} border");
        true
    }

    /// Retags as [`Tag::Border`] every corner whose two adjacent edges are
    /// both closed. Returns how many corners changed.
    pub fn demote_sealed_corners(&mut self) -> usize {
        let sealed: Vec<GridPos> = self
            .all_of_tag(Tag::Corner)
            .iter()
            .copied()
            .filter(|pos| {
                Edge::corner_edges(*pos, self.width)
                    .is_some_and(|edges| edges.iter().all(|e| self.border(*e).is_closed()))
            })
            .collect();

        for pos in &sealed {
            self.set_tag(*pos, Tag::Border);
        }
        sealed.len()
    }

    /// Checks that every cell sits in exactly the bucket of its tag.
    ///
    /// # Panics
    ///
    /// Panics on any inconsistency; the index is trusted everywhere else.
    pub fn verify_index(&self) {
        let indexed: usize = self.index.iter().map(BTreeSet::len).sum();
        assert_eq!(
            indexed,
            self.cells.len(),
            "tag index holds {indexed} entries for {} cells",
            self.cells.len()
        );
        for cell in &self.cells {
            for tag in Tag::ALL {
                let listed = self.index[tag.index()].contains(&cell.value());
                assert_eq!(
                    listed,
                    cell.tag() == tag,
                    "cell {} tagged {} but index disagrees for {tag}",
                    cell.value(),
                    cell.tag()
                );
            }
        }
    }

    /// Renders the grid one character per cell, north row first.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let side = self.width as usize;
        let mut out = String::with_capacity(side * (side + 1));
        for y in (0..self.width).rev() {
            for x in 0..self.width {
                let tag = self.tag_at(GridPos::new(x, y)).unwrap_or_default();
                out.push(tag.symbol());
            }
            out.push('\n');
        }
        out
    }
}
