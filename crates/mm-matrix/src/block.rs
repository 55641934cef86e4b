use std::fmt;

/// Row/column position of a block's top-left cell within a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub row: usize,
    pub col: usize,
}

impl Offset {
    /// The top-left corner of a matrix.
    pub const ORIGIN: Offset = Offset { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Offset { row, col }
    }

    /// Translate this offset by `by`.
    ///
    /// Used to address a quadrant of a block that itself sits at `self`.
    pub fn shifted(self, by: Offset) -> Offset {
        Offset {
            row: self.row + by.row,
            col: self.col + by.col,
        }
    }

    /// Returns true if a `size x size` block at this offset lies inside a
    /// matrix of shape `(rows, cols)`.
    pub fn fits(self, size: usize, (rows, cols): (usize, usize)) -> bool {
        self.row + size <= rows && self.col + size <= cols
    }
}

impl From<(usize, usize)> for Offset {
    fn from((row, col): (usize, usize)) -> Self {
        Offset::new(row, col)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A `size x size` block descriptor over one or two matrices.
///
/// `lhs` addresses the receiver of a block operation and `rhs` its argument.
/// Both blocks must fit inside their matrices; a block that does not fit is a
/// programming error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSpec {
    pub size: usize,
    pub lhs: Offset,
    pub rhs: Offset,
}

impl BlockSpec {
    pub fn new(size: usize, lhs: impl Into<Offset>, rhs: impl Into<Offset>) -> Self {
        BlockSpec {
            size,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Block spanning a whole `size x size` matrix on both sides.
    pub fn full(size: usize) -> Self {
        BlockSpec::new(size, Offset::ORIGIN, Offset::ORIGIN)
    }

    /// Panics unless both blocks are non-empty and fit their matrices.
    pub(crate) fn assert_fits(&self, op: &str, lhs: (usize, usize), rhs: (usize, usize)) {
        assert!(self.size > 0, "{op}: block size must be non-zero");
        assert!(
            self.lhs.fits(self.size, lhs),
            "{op}: {size}x{size} block at {off} exceeds receiver shape {lhs:?}",
            size = self.size,
            off = self.lhs,
        );
        assert!(
            self.rhs.fits(self.size, rhs),
            "{op}: {size}x{size} block at {off} exceeds operand shape {rhs:?}",
            size = self.size,
            off = self.rhs,
        );
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0} @ {1} / {2}", self.size, self.lhs, self.rhs)
    }
}

/// One of the four equal blocks of an even-sized square matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants in assembly order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Offset of this quadrant's top-left cell, for quadrants of side `half`.
    pub fn offset(self, half: usize) -> Offset {
        match self {
            Quadrant::TopLeft => Offset::new(0, 0),
            Quadrant::TopRight => Offset::new(0, half),
            Quadrant::BottomLeft => Offset::new(half, 0),
            Quadrant::BottomRight => Offset::new(half, half),
        }
    }

    /// Block-matrix name of the quadrant ("m11", "m12", "m21", "m22").
    pub fn name(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "m11",
            Quadrant::TopRight => "m12",
            Quadrant::BottomLeft => "m21",
            Quadrant::BottomRight => "m22",
        }
    }
}

/// Offsets of the four quadrants of a `2 * half` block sitting at `origin`,
/// in assembly order.
pub fn quadrant_offsets(origin: Offset, half: usize) -> [Offset; 4] {
    Quadrant::ALL.map(|q| origin.shifted(q.offset(half)))
}
