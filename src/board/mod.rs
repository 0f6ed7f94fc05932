pub mod attacks;
pub mod enpassant;
pub mod fen;
pub mod mask;
pub mod movement;

pub use enpassant::ep_capturers;
pub use fen::{FenOptions, FenParseError, START_FEN};
pub use movement::IllegalMoveError;

use crate::core::*;
use attacks::{king_attack, knight_attack, pawn_attack};
use mask::CastlingMask;

/******************************************\
|==========================================|
|               Board State                |
|==========================================|
\******************************************/

/// Per move state that is not recoverable from the piece placement
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BoardState {
    fifty_move: u16,

    enpassant: Option<Square>,

    castle: Castling,
}

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: [Option<Piece>; Square::NUM],

    pieces: [Bitboard; PieceType::NUM],

    occupied: [Bitboard; Colour::NUM],

    castling_mask: CastlingMask,

    half_moves: u32,

    stm: Colour,

    state: BoardState,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    /// The standard starting position
    fn default() -> Board {
        let mut board = Board::new();
        board.set_startpos();
        board
    }
}

impl Board {
    pub(crate) fn new() -> Board {
        Board {
            board: [None; Square::NUM],
            pieces: [Bitboard::EMPTY; PieceType::NUM],
            occupied: [Bitboard::EMPTY; Colour::NUM],
            castling_mask: CastlingMask::default(),
            stm: Colour::White,
            half_moves: 0,
            state: BoardState::default(),
        }
    }

    fn set_startpos(&mut self) {
        use PieceType::*;
        const BACK_RANK: [PieceType; File::NUM] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (file, pt) in File::iter().zip(BACK_RANK) {
            for col in [Colour::White, Colour::Black] {
                let back = Square::from_parts(file, Rank::Rank1.relative(col));
                let pawn = Square::from_parts(file, Rank::Rank2.relative(col));
                self.add_piece(Piece::from_parts(col, pt), back);
                self.add_piece(Piece::from_parts(col, Pawn), pawn);
            }
        }

        self.state.castle = Castling::ALL;
    }

    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    pub fn piecetype_bb(&self, piecetype: PieceType) -> Bitboard {
        self.pieces[piecetype.index()]
    }

    #[inline]
    pub fn occupied_bb(&self, colour: Colour) -> Bitboard {
        self.occupied[colour.index()]
    }

    #[inline]
    pub fn all_occupied_bb(&self) -> Bitboard {
        self.occupied_bb(Colour::White) | self.occupied_bb(Colour::Black)
    }

    #[inline]
    pub fn piece_bb(&self, col: Colour, pt: PieceType) -> Bitboard {
        self.piecetype_bb(pt) & self.occupied_bb(col)
    }

    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    /// Plies played since the start of the game, derived from the fullmove number
    #[inline]
    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.half_moves / 2 + 1
    }

    /// Halfmove clock, plies since the last pawn move or capture
    #[inline]
    pub fn fifty_move(&self) -> u16 {
        self.state.fifty_move
    }

    #[inline]
    pub fn castling(&self) -> Castling {
        self.state.castle
    }

    /// Stored en passant target, the square a double pushed pawn skipped over
    #[inline]
    pub fn ep(&self) -> Option<Square> {
        self.state.enpassant
    }

    /// Square of the pawn that could be captured en passant
    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.state
            .enpassant
            .and_then(|sq| sq.add(-self.stm.forward()).ok())
    }

    #[inline]
    pub(crate) fn castling_rights(&self, square: Square) -> Castling {
        self.castling_mask.rights(square)
    }

    #[inline]
    pub fn ksq(&self, col: Colour) -> Option<Square> {
        self.piece_bb(col, PieceType::King).lsb()
    }

    /// Every piece of either colour attacking `to`, with sliders blocked by `occ`
    pub fn attackers_to(&self, to: Square, occ: Bitboard) -> Bitboard {
        use crate::core::{Colour::*, PieceType::*};
        pawn_attack(White, to) & self.piece_bb(Black, Pawn)
            | pawn_attack(Black, to) & self.piece_bb(White, Pawn)
            | knight_attack(to) & self.piecetype_bb(Knight)
            | Bitboard::attack_on_the_fly(Bishop, to.bb(), occ)
                & (self.piecetype_bb(Bishop) | self.piecetype_bb(Queen))
            | Bitboard::attack_on_the_fly(Rook, to.bb(), occ)
                & (self.piecetype_bb(Rook) | self.piecetype_bb(Queen))
            | king_attack(to) & self.piecetype_bb(King)
    }

    #[inline]
    pub fn is_attacked(&self, square: Square, by: Colour) -> bool {
        (self.attackers_to(square, self.all_occupied_bb()) & self.occupied_bb(by)).is_occupied()
    }

    /// Whether the side to move has its king attacked, positions without a king are never in check
    pub fn in_check(&self) -> bool {
        self.ksq(self.stm)
            .is_some_and(|ksq| self.is_attacked(ksq, !self.stm))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let cell = match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", self.stm())?;
        writeln!(f, "Castling: {}", self.state.castle)?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.state.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Half Move Clock: {}", self.state.fifty_move)?;
        writeln!(f, "Full Move: {}", self.fullmove_number())?;
        writeln!(f, "Fen: {}", self.fen())
    }
}
