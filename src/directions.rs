use lazy_static::lazy_static;
use smallvec::SmallVec;
use std::fmt;

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// The wall flag for this direction within a `DirectionMask`.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 4,
            CompassPrimary::North => 8,
        }
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Unit step as a (row, column) delta.
    pub fn step(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (-1, 0),
            CompassPrimary::South => (1, 0),
            CompassPrimary::East => (0, 1),
            CompassPrimary::West => (0, -1),
        }
    }
}

/// Order used when enumerating the set bits of any mask.
pub const MASK_ORDER: [CompassPrimary; 4] = [CompassPrimary::North,
                                             CompassPrimary::West,
                                             CompassPrimary::South,
                                             CompassPrimary::East];

/// Order in which exterior walls are tried when puncturing the maze border.
pub const PUNCTURE_ORDER: [CompassPrimary; 4] = [CompassPrimary::West,
                                                 CompassPrimary::East,
                                                 CompassPrimary::North,
                                                 CompassPrimary::South];

lazy_static! {
    // For every 4 bit mask value, the directions set within it in `MASK_ORDER`.
    static ref MASK_DIRECTIONS: Vec<DirectionSmallVec> = (0..16u8)
        .map(|bits| {
            MASK_ORDER.iter()
                .cloned()
                .filter(|dir| bits & dir.bit() != 0)
                .collect::<DirectionSmallVec>()
        })
        .collect();
}

/// A small set of directions, one bit per `CompassPrimary`.
#[derive(Eq, PartialEq, Copy, Clone, Default, Hash)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const EMPTY: DirectionMask = DirectionMask(0);
    pub const ALL: DirectionMask = DirectionMask(0b1111);

    /// Builds a mask from raw wall flags, ignoring anything above the low 4 bits.
    pub fn from_bits(bits: u8) -> DirectionMask {
        DirectionMask(bits & Self::ALL.0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, dir: CompassPrimary) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: CompassPrimary) {
        self.0 |= dir.bit();
    }

    /// Returns true if the direction was present.
    #[inline]
    pub fn remove(&mut self, dir: CompassPrimary) -> bool {
        let present = self.contains(dir);
        self.0 &= !dir.bit();
        present
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The directions in this mask, in `MASK_ORDER`.
    #[inline]
    pub fn directions(self) -> &'static [CompassPrimary] {
        &MASK_DIRECTIONS[self.0 as usize]
    }

    pub fn complement(self) -> DirectionMask {
        DirectionMask(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for DirectionMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.directions().iter()).finish()
    }
}

impl std::iter::FromIterator<CompassPrimary> for DirectionMask {
    fn from_iter<I: IntoIterator<Item = CompassPrimary>>(iter: I) -> Self {
        let mut mask = DirectionMask::EMPTY;
        for dir in iter {
            mask.insert(dir);
        }
        mask
    }
}
