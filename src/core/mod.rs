// Core value types shared by the board

mod macros;

pub mod bitboard;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use bitboard::Bitboard;
pub use moves::{CastleSide, CoordinateMove, Move, MoveKind, ParseMoveError};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{Castling, Colour, Direction, SquareAddError};
