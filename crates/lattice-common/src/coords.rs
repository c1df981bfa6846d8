//! Grid positions, compass directions, and region edges.
//!
//! All grids are square and addressed with `x` growing east and `y` growing
//! north, so `(0, 0)` is the south-west corner.

use serde::{Deserialize, Serialize};

/// Integer position of a cell inside one grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    /// Column, growing east
    pub x: i32,
    /// Row, growing north
    pub y: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the neighbouring position in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether `other` is one of the four natural (edge-sharing) neighbours.
    #[must_use]
    pub const fn is_natural_neighbor(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +y
    North,
    /// +x +y
    NorthEast,
    /// +x
    East,
    /// +x -y
    SouthEast,
    /// -y
    South,
    /// -x -y
    SouthWest,
    /// -x
    West,
    /// -x +y
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// The four edge-sharing directions, clockwise from north.
    pub const NATURAL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The four corner-sharing directions, clockwise from north-east.
    pub const DIAGONAL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Grid offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::NorthEast => (1, 1),
            Self::East => (1, 0),
            Self::SouthEast => (1, -1),
            Self::South => (0, -1),
            Self::SouthWest => (-1, -1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, 1),
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// Whether this is one of the four natural directions.
    #[must_use]
    pub const fn is_natural(self) -> bool {
        matches!(self, Self::North | Self::East | Self::South | Self::West)
    }
}

/// One side of a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Top row (`y = width - 1`)
    North,
    /// Bottom row (`y = 0`)
    South,
    /// Right column (`x = width - 1`)
    East,
    /// Left column (`x = 0`)
    West,
}

impl Edge {
    /// All four edges.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Position of this edge in [`Edge::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The edge on the far side of the grid.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Direction pointing out of the grid through this edge.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::North => Direction::North,
            Self::South => Direction::South,
            Self::East => Direction::East,
            Self::West => Direction::West,
        }
    }

    /// Edge that a natural direction points through; diagonals have none.
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => Some(Self::North),
            Direction::South => Some(Self::South),
            Direction::East => Some(Self::East),
            Direction::West => Some(Self::West),
            _ => None,
        }
    }

    /// Whether `pos` lies on this edge of a `width`-wide grid (corners included).
    #[must_use]
    pub const fn contains(self, pos: GridPos, width: i32) -> bool {
        let last = width - 1;
        match self {
            Self::North => pos.y == last,
            Self::South => pos.y == 0,
            Self::East => pos.x == last,
            Self::West => pos.x == 0,
        }
    }

    /// Maps a position on this edge onto the touching edge of the neighbouring grid.
    ///
    /// The coordinate along the edge is kept; the coordinate across it is
    /// flipped, so `(0, y)` on a west edge becomes `(width - 1, y)` on the
    /// neighbour's east edge.
    #[must_use]
    pub const fn mirror(self, pos: GridPos, width: i32) -> GridPos {
        let last = width - 1;
        match self {
            Self::North | Self::South => GridPos::new(pos.x, last - pos.y),
            Self::East | Self::West => GridPos::new(last - pos.x, pos.y),
        }
    }

    /// The two edges that meet at a grid corner, or `None` if `pos` is not a corner.
    #[must_use]
    pub const fn corner_edges(pos: GridPos, width: i32) -> Option<[Self; 2]> {
        let last = width - 1;
        let vertical = if pos.y == 0 {
            Self::South
        } else if pos.y == last {
            Self::North
        } else {
            return None;
        };
        let horizontal = if pos.x == 0 {
            Self::West
        } else if pos.x == last {
            Self::East
        } else {
            return None;
        };
        Some([vertical, horizontal])
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        };
        f.write_str(name)
    }
}
