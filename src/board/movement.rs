use thiserror::Error;

use super::Board;
use super::attacks::attacks;
use crate::core::*;

/******************************************\
|==========================================|
|              Piece Placement             |
|==========================================|
\******************************************/

impl Board {
    /// Puts `piece` on `square`, updating the mailbox and bitboards only
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        self.board[square.index()] = Some(piece);
        self.pieces[piece.pt().index()].set(square);
        self.occupied[piece.colour().index()].set(square);
    }

    /// Lifts whatever stands on `square`, updating the mailbox and bitboards only
    #[inline]
    pub(crate) fn remove_piece(&mut self, square: Square) {
        debug_assert!(self.on(square).is_some(), "remove_piece: '{square}' is empty");
        let Some(piece) = self.board[square.index()].take() else {
            return;
        };
        self.pieces[piece.pt().index()].clear(square);
        self.occupied[piece.colour().index()].clear(square);
    }

    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        debug_assert!(self.on(from).is_some(), "move_piece: '{from}' is empty");
        let Some(piece) = self.board[from.index()].take() else {
            return;
        };
        self.board[to.index()] = Some(piece);

        self.pieces[piece.pt().index()].clear(from);
        self.pieces[piece.pt().index()].set(to);

        self.occupied[piece.colour().index()].clear(from);
        self.occupied[piece.colour().index()].set(to);
    }

    /// Records the square skipped by a double push starting on `from`
    #[inline]
    fn set_ep(&mut self, from: Square) {
        self.state.enpassant = from.add(self.stm.forward()).ok();
    }

    /// Masks away the rights of any king or rook home square the move touches
    #[inline]
    fn update_castle_rights(&mut self, from: Square, to: Square) {
        self.state
            .castle
            .mask(self.castling_rights(from) & self.castling_rights(to));
    }
}

/******************************************\
|==========================================|
|               Resolve Move               |
|==========================================|
\******************************************/

impl Board {
    /// Parses a coordinate move (`e2e4`, `e7e8q`) and classifies it against the position
    pub fn resolve_move(&self, text: &str) -> Result<Move, IllegalMoveError> {
        let coord = text.parse::<CoordinateMove>()?;
        self.resolve(coord)
    }

    /// Classifies `coord` from the pieces on the board.
    ///
    /// Only the geometry of the move is checked: pieces must be able to reach the
    /// destination, pawns must follow their push and capture rules, and castling must
    /// satisfy the usual conditions. Moves leaving the own king in check are not rejected.
    pub fn resolve(&self, coord: CoordinateMove) -> Result<Move, IllegalMoveError> {
        let CoordinateMove {
            from,
            to,
            promotion,
        } = coord;
        let us = self.stm;

        let piece = self.on(from).ok_or(IllegalMoveError::EmptySquare(from))?;

        if piece.colour() != us {
            return Err(IllegalMoveError::WrongSide {
                square: from,
                piece,
            });
        }

        if piece.pt() == PieceType::King {
            if let Some(side) = self.castle_side(from, to) {
                if promotion.is_some() {
                    return Err(IllegalMoveError::UnexpectedPromotion { piece, to });
                }

                self.check_castle(side)?;

                return Ok(Move::new(
                    piece,
                    from,
                    side.king_to(us),
                    MoveKind::Castle(side),
                ));
            }
        }

        let target = self.on(to);

        if let Some(captured) = target {
            if captured.colour() == us {
                return Err(IllegalMoveError::OwnPieceCapture(to));
            }
            if captured.pt() == PieceType::King {
                return Err(IllegalMoveError::KingCapture(to));
            }
        }

        let kind = match piece.pt() {
            PieceType::Pawn => self.resolve_pawn(piece, from, to, promotion)?,

            pt => {
                if promotion.is_some() {
                    return Err(IllegalMoveError::UnexpectedPromotion { piece, to });
                }

                if !attacks(us, pt, from, self.all_occupied_bb()).contains(to) {
                    return Err(IllegalMoveError::UnreachableSquare { piece, from, to });
                }

                target.map_or(MoveKind::Quiet, MoveKind::Capture)
            }
        };

        Ok(Move::new(piece, from, to, kind))
    }

    fn resolve_pawn(
        &self,
        piece: Piece,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveKind, IllegalMoveError> {
        let us = self.stm;
        let occ = self.all_occupied_bb();
        let target = self.on(to);
        let unreachable = IllegalMoveError::UnreachableSquare { piece, from, to };

        let push = from.add(us.forward()).ok();

        let kind = if push == Some(to) {
            if target.is_some() {
                return Err(unreachable);
            }
            MoveKind::Quiet
        } else if from.rank() == Rank::Rank2.relative(us)
            && from.add(us.double_forward()).ok() == Some(to)
        {
            if target.is_some() || push.is_some_and(|sq| occ.contains(sq)) {
                return Err(unreachable);
            }
            MoveKind::DoublePush
        } else if attacks(us, PieceType::Pawn, from, occ).contains(to) {
            match target {
                Some(captured) => MoveKind::Capture(captured),
                None if self.ep() == Some(to)
                    && self.ep_target().and_then(|sq| self.on(sq))
                        == Some(Piece::from_parts(!us, PieceType::Pawn)) =>
                {
                    MoveKind::EnPassant
                }
                None => return Err(unreachable),
            }
        } else {
            return Err(unreachable);
        };

        if to.rank() == Rank::Rank8.relative(us) {
            let promoted = promotion.ok_or(IllegalMoveError::MissingPromotion { from, to })?;
            let captured = match kind {
                MoveKind::Capture(captured) => Some(captured),
                _ => None,
            };
            return Ok(MoveKind::Promotion {
                piece: promoted,
                captured,
            });
        }

        if promotion.is_some() {
            return Err(IllegalMoveError::UnexpectedPromotion { piece, to });
        }

        Ok(kind)
    }

    /// A king on its home square castles by stepping two files towards a rook or onto its own rook
    fn castle_side(&self, from: Square, to: Square) -> Option<CastleSide> {
        let us = self.stm;

        if from != Square::E1.relative(us) {
            return None;
        }

        let rook = Piece::from_parts(us, PieceType::Rook);

        [CastleSide::KingSide, CastleSide::QueenSide]
            .into_iter()
            .find(|side| {
                to == side.king_to(us) || (to == side.rook_from(us) && self.on(to) == Some(rook))
            })
    }

    fn check_castle(&self, side: CastleSide) -> Result<(), IllegalMoveError> {
        let us = self.stm;
        let them = !us;
        let blocked = |reason| Err(IllegalMoveError::CastlingBlocked { side, reason });

        if !self.castling().has(side.right(us)) {
            return Err(IllegalMoveError::NoCastlingRight(side));
        }

        let ksq = Square::E1.relative(us);
        let rook_sq = side.rook_from(us);
        let king_to = side.king_to(us);

        if self.on(rook_sq) != Some(Piece::from_parts(us, PieceType::Rook)) {
            return blocked("the rook is not on its home square");
        }

        if (Bitboard::between(ksq, rook_sq) & self.all_occupied_bb()).is_occupied() {
            return blocked("pieces stand between king and rook");
        }

        if self.is_attacked(ksq, them) {
            return blocked("the king is in check");
        }

        let mut path = Bitboard::between(ksq, king_to) | king_to.bb();
        while let Some(sq) = path.pop_lsb() {
            if self.is_attacked(sq, them) {
                return blocked("the king crosses or lands on an attacked square");
            }
        }

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Make Move                 |
|==========================================|
\******************************************/

impl Board {
    /// Applies a resolved move to the board.
    ///
    /// - The en passant square is cleared, then set again only by a double push
    /// - Castling moves the rook from its corner next to the king
    /// - Rights are masked by the home squares the move leaves or lands on
    /// - The halfmove clock resets on pawn moves and captures
    /// - The side to move flips, the fullmove number follows from the ply count
    ///
    /// `mv` must come from [`Board::resolve`] on this exact position.
    pub fn make_move(&mut self, mv: Move) {
        let Move {
            piece,
            from,
            to,
            kind,
        } = mv;
        let us = self.stm;

        self.state.enpassant = None;

        match kind {
            MoveKind::Quiet => self.move_piece(from, to),

            MoveKind::DoublePush => {
                self.move_piece(from, to);
                self.set_ep(from);
            }

            MoveKind::Capture(_) => {
                self.remove_piece(to);
                self.move_piece(from, to);
            }

            MoveKind::EnPassant => {
                if let Ok(cap_sq) = to.add(-us.forward()) {
                    self.remove_piece(cap_sq);
                }
                self.move_piece(from, to);
            }

            // Lift the king first, the rook may land on its square
            MoveKind::Castle(side) => {
                self.remove_piece(from);
                self.move_piece(side.rook_from(us), side.rook_to(us));
                self.add_piece(piece, to);
            }

            MoveKind::Promotion { piece: pt, captured } => {
                if captured.is_some() {
                    self.remove_piece(to);
                }
                self.remove_piece(from);
                self.add_piece(Piece::from_parts(us, pt), to);
            }
        }

        self.update_castle_rights(from, to);

        self.state.fifty_move = match mv.resets_clock() {
            true => 0,
            false => self.state.fifty_move.saturating_add(1),
        };

        self.half_moves += 1;

        self.stm = !us;

        log::debug!("{us:?} played {mv} ({kind:?})");
    }

    /// Resolves `text` against the position and plays it.
    ///
    /// A rejected move leaves the board untouched.
    pub fn apply_move(&mut self, text: &str) -> Result<Move, IllegalMoveError> {
        let mv = self.resolve_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}

/******************************************\
|==========================================|
|              Illegal Moves               |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("Malformed move: {0}")]
    MalformedMove(ParseMoveError),

    #[error("Invalid promotion piece '{0}', expected one of 'n', 'b', 'r', 'q'")]
    InvalidPromotionPiece(char),

    #[error("No piece on {0}")]
    EmptySquare(Square),

    #[error("The {piece:?} on {square} does not belong to the side to move")]
    WrongSide { square: Square, piece: Piece },

    #[error("Cannot capture own piece on {0}")]
    OwnPieceCapture(Square),

    #[error("Cannot capture the king on {0}")]
    KingCapture(Square),

    #[error("{piece:?} on {from} cannot reach {to}")]
    UnreachableSquare {
        piece: Piece,
        from: Square,
        to: Square,
    },

    #[error("Pawn move {from}{to} reaches the last rank without a promotion piece")]
    MissingPromotion { from: Square, to: Square },

    #[error("{piece:?} moving to {to} cannot promote")]
    UnexpectedPromotion { piece: Piece, to: Square },

    #[error("No {0:?} castling right")]
    NoCastlingRight(CastleSide),

    #[error("Cannot castle {side:?}: {reason}")]
    CastlingBlocked {
        side: CastleSide,
        reason: &'static str,
    },
}

impl From<ParseMoveError> for IllegalMoveError {
    fn from(err: ParseMoveError) -> Self {
        match err {
            ParseMoveError::InvalidPromotion(c) => IllegalMoveError::InvalidPromotionPiece(c),
            err => IllegalMoveError::MalformedMove(err),
        }
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
