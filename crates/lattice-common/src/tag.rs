//! Cell classification tags.

use serde::{Deserialize, Serialize};

/// Structural role of a grid cell. Every cell carries exactly one tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Tag {
    /// Unclaimed interior cell
    #[default]
    Null,
    /// Perimeter cell that is not a corner
    Border,
    /// One of the four extreme cells
    Corner,
    /// Border cell connecting to the neighbouring grid
    Exit,
    /// Cell on a generated path
    Path,
    /// Cell covered by a placed zone
    Zone,
    /// Border cell on an edge that leads nowhere
    Closed,
}

impl Tag {
    /// Number of distinct tags.
    pub const COUNT: usize = 7;

    /// Every tag, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Null,
        Self::Border,
        Self::Corner,
        Self::Exit,
        Self::Path,
        Self::Zone,
        Self::Closed,
    ];

    /// Position of this tag in [`Tag::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single character used when rendering grids as text.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Null => '.',
            Self::Border => '#',
            Self::Corner => '+',
            Self::Exit => 'E',
            Self::Path => 'o',
            Self::Zone => 'Z',
            Self::Closed => 'X',
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Border => "border",
            Self::Corner => "corner",
            Self::Exit => "exit",
            Self::Path => "path",
            Self::Zone => "zone",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Compact set of tags, used to describe which cells a search may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet(u8);

impl TagSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a slice of tags.
    #[must_use]
    pub const fn of(tags: &[Tag]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < tags.len() {
            bits |= 1 << tags[i].index();
            i += 1;
        }
        Self(bits)
    }

    /// Returns a copy of this set with `tag` added.
    #[must_use]
    pub const fn with(self, tag: Tag) -> Self {
        Self(self.0 | (1 << tag.index()))
    }

    /// Whether `tag` is a member.
    #[must_use]
    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & (1 << tag.index()) != 0
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates members in index order.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_indices_match_all() {
        for (i, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn test_symbols_are_distinct() {
        let mut symbols: Vec<char> = Tag::ALL.iter().map(|t| t.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), Tag::COUNT);
    }

    #[test]
    fn test_tag_set_iter() {
        let set: TagSet = [Tag::Zone, Tag::Null].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Tag::Null, Tag::Zone]);
        assert!(TagSet::EMPTY.is_empty());
        assert!(!set.is_empty());
    }
}
