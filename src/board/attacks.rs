//! Attack lookups used when resolving moves and testing squares for attacks.
//!
//! Leaper attacks (pawn, knight, king) are precomputed at compile time, slider
//! attacks are computed on the fly from the occupancy with Kogge-Stone fills.

use crate::core::{Bitboard, Colour, Direction, PieceType, Square};

use Direction::*;

/******************************************\
|==========================================|
|              Attack Tables               |
|==========================================|
\******************************************/

type AttackTable = [Bitboard; Square::NUM];

const PAWN_ATTACKS: [AttackTable; Colour::NUM] = [
    init_pseudo_attacks(&[NE, NW]),
    init_pseudo_attacks(&[SE, SW]),
];

const KNIGHT_ATTACKS: AttackTable = init_pseudo_attacks(&[NNE, NNW, NEE, NWW, SEE, SWW, SSE, SSW]);

const KING_ATTACKS: AttackTable = init_pseudo_attacks(&[N, NE, NW, E, W, SE, SW, S]);

const fn init_pseudo_attacks(dirs: &[Direction]) -> AttackTable {
    let mut attacks = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq = unsafe { Square::from_unchecked(i as u8) };
        attacks[i] = Bitboard::steps(sq.bb(), dirs);
        i += 1;
    }

    attacks
}

/******************************************\
|==========================================|
|               Get Attacks                |
|==========================================|
\******************************************/

#[inline]
pub fn pawn_attack(col: Colour, sq: Square) -> Bitboard {
    PAWN_ATTACKS[col.index()][sq.index()]
}

#[inline]
pub fn knight_attack(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub fn king_attack(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Squares a piece of type `pt` and colour `col` on `sq` attacks, sliders are blocked by `occ`
#[inline]
pub fn attacks(col: Colour, pt: PieceType, sq: Square, occ: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_attack(col, sq),
        PieceType::Knight => knight_attack(sq),
        PieceType::King => king_attack(sq),
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            Bitboard::attack_on_the_fly(pt, sq.bb(), occ)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_attacks_match_shifts() {
        for sq in Square::iter() {
            assert_eq!(
                pawn_attack(Colour::White, sq),
                Bitboard::pawn_attacks(Colour::White, sq.bb())
            );
            assert_eq!(
                pawn_attack(Colour::Black, sq),
                Bitboard::pawn_attacks(Colour::Black, sq.bb())
            );
        }
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(
            knight_attack(Square::A1),
            Bitboard::from([Square::B3, Square::C2])
        );
        assert_eq!(knight_attack(Square::E4).count_bits(), 8);
        assert_eq!(knight_attack(Square::H8).count_bits(), 2);
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(
            king_attack(Square::H1),
            Bitboard::from([Square::G1, Square::G2, Square::H2])
        );
        assert_eq!(king_attack(Square::D5).count_bits(), 8);
    }

    #[test]
    fn test_slider_attacks() {
        let occ = Bitboard::from([Square::D4, Square::D7]);
        let rook = attacks(Colour::White, PieceType::Rook, Square::D1, occ);
        assert!(rook.contains(Square::D4));
        assert!(!rook.contains(Square::D5));
        assert!(rook.contains(Square::A1));
        assert!(rook.contains(Square::H1));

        let queen = attacks(Colour::Black, PieceType::Queen, Square::D8, occ);
        assert!(queen.contains(Square::D7));
        assert!(!queen.contains(Square::D6));
        assert!(queen.contains(Square::H4));
    }
}
