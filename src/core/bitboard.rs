use std::fmt;

use super::{Colour, Direction, File, PieceType, Rank, Square};

/******************************************\
|==========================================|
|                 Bitboard                 |
|==========================================|
\******************************************/

/// Set of squares packed into 64 bits, A1 is the least significant bit and H8 the most.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

crate::impl_bit_ops!(Bitboard);

impl std::ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/******************************************\
|==========================================|
|           Bitboard Constants             |
|==========================================|
\******************************************/

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const FULL: Bitboard = Bitboard(!0);

    pub const A1: Bitboard = Bitboard(1);

    pub const RANK_1: Bitboard = Bitboard(0x00000000000000ff);

    pub const RANK_8: Bitboard = Bitboard(0xff00000000000000);

    pub const RANK_12: Bitboard = Bitboard(0x000000000000ffff);

    pub const RANK_78: Bitboard = Bitboard(0xffff000000000000);

    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);

    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    const FILE_AB: Bitboard = Bitboard(0x0303030303030303);

    const FILE_GH: Bitboard = Bitboard(0xC0C0C0C0C0C0C0C0);
}

/******************************************\
|==========================================|
|                Conversions               |
|==========================================|
\******************************************/

impl Square {
    /// Single square bitboard
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::A1.0 << *self as u8)
    }
}

impl Rank {
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::RANK_1.0 << (8 * *self as u8))
    }
}

impl File {
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << *self as u8)
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(squares: [Square; N]) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for square in squares {
            bb.set(square);
        }
        bb
    }
}

/******************************************\
|==========================================|
|          Bitboard Implementation         |
|==========================================|
\******************************************/

impl Bitboard {
    /// Lowest set square, `None` for an empty set
    #[inline]
    pub const fn lsb(&self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => unsafe { Some(Square::from_unchecked(bits.trailing_zeros() as u8)) },
        }
    }

    /// Removes and returns the lowest set square
    #[inline]
    pub const fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.0 &= self.0.wrapping_sub(1);
        lsb
    }

    #[inline]
    pub const fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & square.bb().0 != 0
    }

    #[inline]
    pub const fn set(&mut self, square: Square) {
        self.0 |= square.bb().0;
    }

    #[inline]
    pub const fn clear(&mut self, square: Square) {
        self.0 &= !square.bb().0;
    }

    /// Files either side of the file of `sq`, over the whole board
    #[inline]
    pub fn adjacent_files(sq: Square) -> Bitboard {
        let bb = sq.file().bb();
        bb.shift(Direction::E) | bb.shift(Direction::W)
    }

    /// Squares attacked by pawns of `col` standing on `bb`
    #[inline]
    pub const fn pawn_attacks(col: Colour, bb: Bitboard) -> Bitboard {
        match col {
            Colour::White => Bitboard(bb.shift(Direction::NE).0 | bb.shift(Direction::NW).0),
            Colour::Black => Bitboard(bb.shift(Direction::SE).0 | bb.shift(Direction::SW).0),
        }
    }

    /// Union of single steps from every square of `bb` in each of `dirs`
    pub const fn steps(bb: Bitboard, dirs: &[Direction]) -> Bitboard {
        let mut attacks = Bitboard::EMPTY;
        let mut i = 0;
        while i < dirs.len() {
            attacks.0 |= bb.shift(dirs[i]).0;
            i += 1;
        }
        attacks
    }

    /// +ve rotates left, -ve rotates right
    #[inline]
    const fn rotate_left(&self, shift: i16) -> Bitboard {
        let bb = if shift >= 0 {
            self.0.rotate_left(shift as u32)
        } else {
            self.0.rotate_right(-shift as u32)
        };
        Bitboard(bb)
    }

    /// Shifts every square one step towards `dir`, squares leaving the board are dropped
    #[inline]
    pub const fn shift(&self, dir: Direction) -> Bitboard {
        Bitboard(self.0 & Self::avoid_wrap(dir).0).rotate_left(dir as i16)
    }

    /// Squares that may be shifted towards `dir` without wrapping to the other side of the board
    const fn avoid_wrap(dir: Direction) -> Bitboard {
        use Direction::*;
        let bb = match dir {
            SSE => Self::RANK_12.0 | Self::FILE_H.0,
            SEE => Self::RANK_1.0 | Self::FILE_GH.0,
            SWW => Self::RANK_1.0 | Self::FILE_AB.0,
            SSW => Self::RANK_12.0 | Self::FILE_A.0,
            NNW => Self::RANK_78.0 | Self::FILE_A.0,
            NNE => Self::RANK_78.0 | Self::FILE_H.0,
            NWW => Self::RANK_8.0 | Self::FILE_AB.0,
            NEE => Self::RANK_8.0 | Self::FILE_GH.0,

            N => Self::RANK_8.0,
            S => Self::RANK_1.0,
            E => Self::FILE_H.0,
            W => Self::FILE_A.0,

            NE => Self::RANK_8.0 | Self::FILE_H.0,
            NW => Self::RANK_8.0 | Self::FILE_A.0,
            SE => Self::RANK_1.0 | Self::FILE_H.0,
            SW => Self::RANK_1.0 | Self::FILE_A.0,

            NN => Self::RANK_78.0,
            SS => Self::RANK_12.0,
        };
        Bitboard(!bb)
    }

    /// Floods `self` towards `dir` through `empty`.
    /// [Kogge-Stone Algorithm](https://www.chessprogramming.org/Kogge-Stone_Algorithm)
    const fn occluded_fill(self, mut empty: Bitboard, dir: Direction) -> Bitboard {
        let shift = dir as i16;
        empty.0 &= Self::avoid_wrap(dir).0;
        let mut bb = Bitboard(self.0 & Self::avoid_wrap(dir).0);
        bb.0 |= empty.0 & bb.rotate_left(shift).0;
        empty.0 &= empty.rotate_left(shift).0;
        bb.0 |= empty.0 & bb.rotate_left(2 * shift).0;
        empty.0 &= empty.rotate_left(2 * shift).0;
        bb.0 |= empty.0 & bb.rotate_left(4 * shift).0;
        bb
    }

    const fn sliding_attack(bb: Bitboard, occ: Bitboard, dir: Direction) -> Bitboard {
        bb.occluded_fill(Bitboard(!occ.0), dir).shift(dir)
    }

    /// Attacks of a slider of type `pt` standing on `bb`, rays stop on (and include) the first piece of `occ`.
    /// Non sliding piece types have no ray attacks.
    pub const fn attack_on_the_fly(pt: PieceType, bb: Bitboard, occ: Bitboard) -> Bitboard {
        use Direction::*;

        const fn rays(bb: Bitboard, occ: Bitboard, dirs: [Direction; 4]) -> u64 {
            Bitboard::sliding_attack(bb, occ, dirs[0]).0
                | Bitboard::sliding_attack(bb, occ, dirs[1]).0
                | Bitboard::sliding_attack(bb, occ, dirs[2]).0
                | Bitboard::sliding_attack(bb, occ, dirs[3]).0
        }

        let bb = match pt {
            PieceType::Bishop => rays(bb, occ, [NE, NW, SE, SW]),
            PieceType::Rook => rays(bb, occ, [N, S, E, W]),
            PieceType::Queen => rays(bb, occ, [NE, NW, SE, SW]) | rays(bb, occ, [N, S, E, W]),
            _ => 0,
        };
        Bitboard(bb)
    }

    /// Squares strictly between two squares sharing a rank, file or diagonal, empty otherwise
    pub fn between(from: Square, to: Square) -> Bitboard {
        let file_dist = Square::file_dist(from, to);
        let rank_dist = Square::rank_dist(from, to);

        let pt = if file_dist == 0 || rank_dist == 0 {
            PieceType::Rook
        } else if file_dist == rank_dist {
            PieceType::Bishop
        } else {
            return Bitboard::EMPTY;
        };

        Self::attack_on_the_fly(pt, from.bb(), to.bb()) & Self::attack_on_the_fly(pt, to.bb(), from.bb())
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = if self.contains(square) { " 1 " } else { "   " };
                write!(f, "{}|", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Bitboard: {:#x}", self.0)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_lsb() {
        let mut bb = Square::E4.bb() | Square::A1.bb();
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::E4));
        assert_eq!(bb.pop_lsb(), None);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_set_clear_contains() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::E4);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::A1));
        assert_eq!(bb.count_bits(), 1);

        bb.clear(Square::E4);
        assert!(!bb.contains(Square::E4));
        assert_eq!((!Bitboard::EMPTY).count_bits(), 64);
    }

    #[test]
    fn test_shift_edge_cases() {
        let h5 = Square::H5.bb();
        assert_eq!(h5.shift(Direction::E), Bitboard::EMPTY);
        assert_eq!(h5.shift(Direction::NE), Bitboard::EMPTY);
        assert_eq!(h5.shift(Direction::W), Square::G5.bb());

        let a5 = Square::A5.bb();
        assert_eq!(a5.shift(Direction::W), Bitboard::EMPTY);
        assert_eq!(a5.shift(Direction::SW), Bitboard::EMPTY);

        assert_eq!(Square::E8.bb().shift(Direction::N), Bitboard::EMPTY);
        assert_eq!(Square::E1.bb().shift(Direction::S), Bitboard::EMPTY);
        assert_eq!(Square::G5.bb().shift(Direction::NEE), Bitboard::EMPTY);

        let edge_case = Square::H1.bb() | Square::A1.bb();
        assert_eq!(edge_case.shift(Direction::E), Square::B1.bb());
        assert_eq!(edge_case.shift(Direction::W), Square::G1.bb());
    }

    #[test]
    fn test_adjacent_files() {
        assert_eq!(
            Bitboard::adjacent_files(Square::F3),
            File::FileE.bb() | File::FileG.bb()
        );
        assert_eq!(Bitboard::adjacent_files(Square::A6), File::FileB.bb());
        assert_eq!(Bitboard::adjacent_files(Square::H3), File::FileG.bb());
    }

    #[test]
    fn test_pawn_attacks() {
        assert_eq!(
            Bitboard::pawn_attacks(Colour::White, Square::E4.bb()),
            Bitboard::from([Square::D5, Square::F5])
        );
        assert_eq!(
            Bitboard::pawn_attacks(Colour::Black, Square::A5.bb()),
            Square::B4.bb()
        );
        assert_eq!(
            Bitboard::pawn_attacks(Colour::White, Square::H8.bb()),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_slider_attacks_stop_on_blockers() {
        let occ = Bitboard::from([Square::A4, Square::D1]);
        let rook = Bitboard::attack_on_the_fly(PieceType::Rook, Square::A1.bb(), occ);
        assert_eq!(
            rook,
            Bitboard::from([Square::A2, Square::A3, Square::A4, Square::B1, Square::C1, Square::D1])
        );

        let bishop = Bitboard::attack_on_the_fly(PieceType::Bishop, Square::C1.bb(), Square::E3.bb());
        assert_eq!(
            bishop,
            Bitboard::from([Square::B2, Square::A3, Square::D2, Square::E3])
        );

        let queen = Bitboard::attack_on_the_fly(PieceType::Queen, Square::H8.bb(), Bitboard::FULL);
        assert_eq!(queen, Bitboard::from([Square::G8, Square::H7, Square::G7]));

        assert_eq!(
            Bitboard::attack_on_the_fly(PieceType::Knight, Square::E4.bb(), Bitboard::EMPTY),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(
            Bitboard::between(Square::E1, Square::A1),
            Bitboard::from([Square::B1, Square::C1, Square::D1])
        );
        assert_eq!(
            Bitboard::between(Square::E8, Square::H8),
            Bitboard::from([Square::F8, Square::G8])
        );
        assert_eq!(
            Bitboard::between(Square::A1, Square::D4),
            Bitboard::from([Square::B2, Square::C3])
        );
        assert_eq!(Bitboard::between(Square::E1, Square::F1), Bitboard::EMPTY);
        assert_eq!(Bitboard::between(Square::A1, Square::B3), Bitboard::EMPTY);
    }
}
