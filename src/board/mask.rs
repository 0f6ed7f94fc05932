use crate::core::*;

/******************************************\
|==========================================|
|              Castling Mask               |
|==========================================|
\******************************************/

/// Rights that survive a move touching each square.
///
/// A move masks the current rights with the entries of its origin and destination,
/// so a king leaving its home square, a rook leaving its corner or a piece landing on
/// a corner (capturing the rook there) removes the matching rights.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CastlingMask {
    pub castling: [Castling; Square::NUM],
}

impl CastlingMask {
    pub const STANDARD: CastlingMask = CastlingMask::standard();

    const fn standard() -> Self {
        let mut castling = [Castling::ALL; Square::NUM];

        castling[Square::E1 as usize] = Castling(Castling::ALL.0 & !Castling::WHITE_CASTLING.0);
        castling[Square::H1 as usize] = Castling(Castling::ALL.0 & !Castling::WK.0);
        castling[Square::A1 as usize] = Castling(Castling::ALL.0 & !Castling::WQ.0);

        castling[Square::E8 as usize] = Castling(Castling::ALL.0 & !Castling::BLACK_CASTLING.0);
        castling[Square::H8 as usize] = Castling(Castling::ALL.0 & !Castling::BK.0);
        castling[Square::A8 as usize] = Castling(Castling::ALL.0 & !Castling::BQ.0);

        Self { castling }
    }

    #[inline]
    pub fn rights(&self, square: Square) -> Castling {
        self.castling[square.index()]
    }
}

impl Default for CastlingMask {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_squares_remove_rights() {
        let mask = CastlingMask::default();

        assert_eq!(mask.rights(Square::E1), Castling::BLACK_CASTLING);
        assert_eq!(mask.rights(Square::E8), Castling::WHITE_CASTLING);
        assert_eq!(mask.rights(Square::A1), !Castling::WQ);
        assert_eq!(mask.rights(Square::H8), !Castling::BK);
        assert_eq!(mask.rights(Square::E4), Castling::ALL);
        assert_eq!(mask.rights(Square::D1), Castling::ALL);
    }
}
