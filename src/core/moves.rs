use thiserror::Error;

use crate::core::*;

/******************************************\
|==========================================|
|               Castle Side                |
|==========================================|
\******************************************/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Castling right this side needs for `col`
    pub fn right(self, col: Colour) -> Castling {
        match self {
            CastleSide::KingSide => Castling::king_side(col),
            CastleSide::QueenSide => Castling::queen_side(col),
        }
    }

    /// Corner the castling rook starts on
    pub const fn rook_from(self, col: Colour) -> Square {
        match self {
            CastleSide::KingSide => Square::H1.relative(col),
            CastleSide::QueenSide => Square::A1.relative(col),
        }
    }

    /// Square the rook lands on
    pub const fn rook_to(self, col: Colour) -> Square {
        match self {
            CastleSide::KingSide => Square::F1.relative(col),
            CastleSide::QueenSide => Square::D1.relative(col),
        }
    }

    /// Square the king lands on
    pub const fn king_to(self, col: Colour) -> Square {
        match self {
            CastleSide::KingSide => Square::G1.relative(col),
            CastleSide::QueenSide => Square::C1.relative(col),
        }
    }
}

/******************************************\
|==========================================|
|                Move Kind                 |
|==========================================|
\******************************************/

/// # Move category
///
/// Computed from the board when a move is resolved, never from the text it was written in.
/// Captures carry the captured piece, en passant always captures a pawn of the opponent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,

    DoublePush,

    Capture(Piece),

    EnPassant,

    Castle(CastleSide),

    Promotion {
        piece: PieceType,
        captured: Option<Piece>,
    },
}

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// A resolved move. For castling, `to` is the square the king lands on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,

    pub from: Square,

    pub to: Square,

    pub kind: MoveKind,
}

impl Move {
    pub const fn new(piece: Piece, from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            piece,
            from,
            to,
            kind,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture(_)
                | MoveKind::EnPassant
                | MoveKind::Promotion {
                    captured: Some(_),
                    ..
                }
        )
    }

    /// Piece removed from the board by this move, if any
    pub fn captured(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture(piece) => Some(piece),
            MoveKind::EnPassant => Some(Piece::from_parts(!self.piece.colour(), PieceType::Pawn)),
            MoveKind::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// Pawn moves and captures reset the halfmove clock
    #[inline]
    pub fn resets_clock(&self) -> bool {
        self.piece.pt() == PieceType::Pawn || self.is_capture()
    }
}

impl std::fmt::Display for Move {
    /// Coordinate notation, e.g. `e7e8q`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(pt) = self.promotion() {
            write!(f, "{}", pt)?;
        }
        Ok(())
    }
}

/******************************************\
|==========================================|
|             Coordinate Move              |
|==========================================|
\******************************************/

/// Text form of a move before it is checked against a position: origin, destination and an optional promotion letter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,

    pub to: Square,

    pub promotion: Option<PieceType>,
}

impl std::str::FromStr for CoordinateMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if !(4..=5).contains(&len) || !s.is_ascii() {
            return Err(ParseMoveError::InvalidLength(s.to_string()));
        }

        let from = s[0..2].parse::<Square>()?;
        let to = s[2..4].parse::<Square>()?;

        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceType::from_promotion_char(c).ok_or(ParseMoveError::InvalidPromotion(c))?,
            ),
        };

        if from == to {
            return Err(ParseMoveError::NullMove(from));
        }

        Ok(CoordinateMove {
            from,
            to,
            promotion,
        })
    }
}

impl std::fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(pt) = self.promotion {
            write!(f, "{}", pt)?;
        }
        Ok(())
    }
}

/******************************************\
|==========================================|
|             Move Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Move '{0}' must be 4 or 5 ascii characters (origin, destination, optional promotion)")]
    InvalidLength(String),
    #[error(transparent)]
    InvalidSquare(#[from] ParseSquareError),
    #[error("Invalid promotion letter '{0}', expected one of 'n', 'b', 'r', 'q'")]
    InvalidPromotion(char),
    #[error("Move from {0} to itself")]
    NullMove(Square),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
