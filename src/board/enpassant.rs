use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|          En Passant Capturability        |
|==========================================|
\******************************************/

/// Pawns of `us` that stand ready to capture en passant onto `ep`.
///
/// The pawn that just double pushed sits directly in front of `ep` from the point of
/// view of the side that pushed it, i.e. one step behind `ep` for `us`. Capturers are
/// our pawns on the files adjacent to `ep` on that same rank. Pins and checks are not
/// considered.
pub fn ep_capturers(ep: Square, us: Colour, our_pawns: Bitboard, their_pawns: Bitboard) -> Bitboard {
    let Ok(victim) = ep.add(-us.forward()) else {
        return Bitboard::EMPTY;
    };

    if !their_pawns.contains(victim) {
        return Bitboard::EMPTY;
    }

    our_pawns & Bitboard::adjacent_files(ep) & victim.rank().bb()
}

impl Board {
    /// Pawns of the side to move able to capture onto the stored en passant square
    pub fn ep_capturers(&self) -> Bitboard {
        let Some(ep) = self.ep() else {
            return Bitboard::EMPTY;
        };

        let us = self.stm();
        ep_capturers(
            ep,
            us,
            self.piece_bb(us, PieceType::Pawn),
            self.piece_bb(!us, PieceType::Pawn),
        )
    }

    #[inline]
    pub fn ep_is_capturable(&self) -> bool {
        self.ep_capturers().is_occupied()
    }
}
