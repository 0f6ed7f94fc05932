use super::{File, Square};
use thiserror::Error;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// The two sides of a game, White moves first.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(Colour);

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// Square index offsets for the eight compass directions, the knight jumps and the pawn double push

#[rustfmt::skip]
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N = 8, S = -8, W = -1, E = 1,
    NE = 9, NW = 7, SE = -7, SW = -9,
    NNE = 17, NNW = 15, NEE = 10, NWW = 6,
    SEE = -6, SWW = -10, SSE = -15, SSW = -17,
    NN = 16, SS = -16,
}

crate::impl_from_to_primitive!(Direction, i8);

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

/// # Castling Representation
///
/// Bit set of the four castling rights, one bit each for `K`, `Q`, `k` and `q`

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling(pub u8);

impl Default for Castling {
    fn default() -> Self {
        Castling::NONE
    }
}

crate::impl_bit_ops!(Castling);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Colour {
    /// Returns the direction pawns of this colour advance in
    pub const fn forward(&self) -> Direction {
        match self {
            Colour::White => Direction::N,
            Colour::Black => Direction::S,
        }
    }

    /// Returns the direction of a pawn double push for this colour
    pub const fn double_forward(&self) -> Direction {
        match self {
            Colour::White => Direction::NN,
            Colour::Black => Direction::SS,
        }
    }

    /// FEN side to move letter
    pub const fn to_char(&self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl Square {
    /// Try to convert an index into a square (Returns error if out of bounds)
    pub const fn try_from(value: i16) -> Result<Self, SquareAddError> {
        if value >= 0 && value < 64 {
            Ok(unsafe { Square::from_unchecked(value as u8) })
        } else {
            Err(SquareAddError::OutOfBounds)
        }
    }

    /// Try to add direction to a square, failing if the result leaves the board or wraps around a file edge
    #[inline]
    pub const fn add(self, rhs: Direction) -> Result<Self, SquareAddError> {
        let file = self.file() as u8;

        use Direction::*;
        let valid = match rhs {
            N | S | NN | SS => true,
            E | NE | NNE | SE | SSE => file < File::FileH as u8,
            W | NW | NNW | SW | SSW => file > File::FileA as u8,
            NEE | SEE => file < File::FileG as u8,
            NWW | SWW => file > File::FileB as u8,
        };

        if !valid {
            return Err(SquareAddError::OutOfBounds);
        }

        Square::try_from(self as i16 + rhs as i16)
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;

    /// Negate the direction (N => S, etc...)
    fn neg(self) -> Self::Output {
        unsafe { Self::from_unchecked(-(self as i8)) }
    }
}

impl Castling {
    // Atomic castling rights
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);
    // Board colour castling rights
    pub const WHITE_CASTLING: Castling = Castling(3);
    pub const BLACK_CASTLING: Castling = Castling(12);
    // All or nothing castling rights
    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// Checks whether any right of `right` is present
    pub fn has(self, right: Castling) -> bool {
        self & right != Castling::NONE
    }

    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    pub fn remove(&mut self, right: Castling) {
        *self &= !right;
    }

    /// Keep only the rights present in `mask`
    #[inline]
    pub fn mask(&mut self, mask: Castling) {
        self.0 &= mask.0;
    }

    #[inline]
    pub fn king_side(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WK,
            Colour::Black => Castling::BK,
        }
    }

    #[inline]
    pub fn queen_side(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WQ,
            Colour::Black => Castling::BQ,
        }
    }

    /// Both rights belonging to `colour`
    #[inline]
    pub fn for_colour(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WHITE_CASTLING,
            Colour::Black => Castling::BLACK_CASTLING,
        }
    }
}

impl std::ops::Not for Castling {
    type Output = Self;

    /// Invert the bits to give the opposite castling rights
    #[inline]
    fn not(self) -> Self::Output {
        Castling(!self.0 & 0x0F)
    }
}

impl std::fmt::Display for Castling {
    /// Displays castling right in the `KQkq` format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Castling::NONE {
            return write!(f, "-");
        }

        for (right, c) in [
            (Castling::WK, 'K'),
            (Castling::WQ, 'Q'),
            (Castling::BK, 'k'),
            (Castling::BQ, 'q'),
        ] {
            if self.has(right) {
                write!(f, "{}", c)?;
            }
        }

        Ok(())
    }
}

/******************************************\
|==========================================|
|             Square Add Errors            |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAddError {
    #[error("Square operation resulted in an out-of-bounds position")]
    OutOfBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_plus_direction() {
        assert_eq!(Square::E4.add(Direction::N), Ok(Square::E5));
        assert_eq!(Square::E4.add(Direction::S), Ok(Square::E3));
        assert_eq!(Square::E4.add(Direction::NE), Ok(Square::F5));
        assert_eq!(Square::E4.add(Direction::SW), Ok(Square::D3));
        assert_eq!(Square::E4.add(Direction::NN), Ok(Square::E6));
        assert_eq!(Square::E4.add(Direction::NEE), Ok(Square::G5));

        assert_eq!(Square::H4.add(Direction::E), Err(SquareAddError::OutOfBounds));
        assert_eq!(Square::A4.add(Direction::W), Err(SquareAddError::OutOfBounds));
        assert_eq!(Square::E8.add(Direction::N), Err(SquareAddError::OutOfBounds));
        assert_eq!(Square::E1.add(Direction::S), Err(SquareAddError::OutOfBounds));
        assert_eq!(Square::G7.add(Direction::NEE), Err(SquareAddError::OutOfBounds));
        assert_eq!(Square::B2.add(Direction::SWW), Err(SquareAddError::OutOfBounds));
    }

    #[test]
    fn test_direction_negation_is_inverse() {
        use Direction::*;

        for dir in [N, S, E, W, NE, NW, SE, SW, NNE, NNW, NEE, NWW, SSE, SSW, SEE, SWW, NN, SS] {
            for sq in Square::iter() {
                if let Ok(next) = sq.add(dir) {
                    assert_eq!(next.add(-dir), Ok(sq), "{sq} {dir:?}");
                }
            }
        }
    }

    #[test]
    fn test_colour_helpers() {
        assert_eq!(!Colour::White, Colour::Black);
        assert_eq!(!Colour::Black, Colour::White);
        assert_eq!(Colour::White.forward(), Direction::N);
        assert_eq!(Colour::Black.double_forward(), Direction::SS);
        assert_eq!(Colour::Black.to_char(), 'b');
    }

    #[test]
    fn test_castling_helper_methods() {
        let mut castling = Castling::ALL;
        castling.remove(Castling::WK);
        assert!(!castling.has(Castling::WK));
        assert!(castling.has(Castling::WQ | Castling::BK));

        castling.remove(Castling::for_colour(Colour::Black));
        assert_eq!(castling, Castling::WQ);

        castling.set(Castling::king_side(Colour::Black));
        assert_eq!(castling, Castling::WQ | Castling::BK);

        castling.mask(!Castling::queen_side(Colour::White));
        assert_eq!(castling, Castling::BK);
        assert_eq!(!Castling::NONE, Castling::ALL);
    }

    #[test]
    fn test_castling_display() {
        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!(Castling::NONE.to_string(), "-");
        assert_eq!((Castling::WQ | Castling::BK).to_string(), "Qk");
    }
}
