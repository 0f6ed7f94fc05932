//! # fenprobe
//!
//! Chess position model that reads FEN, plays coordinate moves and writes FEN back,
//! with control over when the en passant square is reported.
pub mod board;
pub mod core;

pub use board::{
    Board, BoardState, FenOptions, FenParseError, IllegalMoveError, START_FEN, ep_capturers,
};
pub use core::*;
