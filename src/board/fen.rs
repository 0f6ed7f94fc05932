use thiserror::Error;

use super::Board;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const TRICKY_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Fen Options                |
|==========================================|
\******************************************/

/// Controls how a board is written out as FEN
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FenOptions {
    /// Write the stored en passant square even when no pawn can capture onto it
    pub force_enpassant_square: bool,
}

impl FenOptions {
    pub const fn forced() -> Self {
        Self {
            force_enpassant_square: true,
        }
    }
}

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    pub const FEN_SECTIONS: usize = 6;

    /// Replaces the whole position with the one described by `fen`
    ///
    /// On error the board is left cleared.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        *self = Board::new();

        let parts: Vec<&str> = fen.split_whitespace().collect();

        let &[
            piece_placement,
            side_to_move,
            castling,
            enpassant,
            fifty_move_token,
            full_move_token,
        ] = parts.as_slice()
        else {
            return Err(FenParseError::InvalidNumberOfFields);
        };

        self.parse_piece_placement(piece_placement)?;

        self.parse_side_to_move(side_to_move)?;

        self.parse_castling(castling)?;

        self.parse_enpassant(enpassant)?;

        self.state.fifty_move = Self::parse_fifty_move(fifty_move_token)?;

        self.half_moves = self.parse_full_move(full_move_token)?;

        Ok(())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();
        board.set(fen)?;
        Ok(board)
    }

    fn parse_separator(
        rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
        rank: Rank,
        file: u8,
    ) -> Result<(Rank, u8), FenParseError> {
        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
                rank, file
            )));
        }

        let next_rank = rank_iter.next().ok_or_else(|| {
            FenParseError::InvalidRankFormat(format!(
                "Too many rank separators ('/') found after completing rank {:?}",
                rank
            ))
        })?;

        Ok((next_rank, 0))
    }

    fn parse_skip(
        skip: char,
        idx: usize,
        current_rank: Rank,
        current_file_index: u8,
    ) -> Result<u8, FenParseError> {
        let skip_val = match skip.to_digit(10) {
            Some(val @ 1..=8) => val as u8,
            _ => {
                return Err(FenParseError::InvalidRankFormat(format!(
                    "Invalid skip digit '{}' (must be 1-8) at char index {}",
                    skip, idx
                )));
            }
        };

        if current_file_index + skip_val > 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Skip value {} exceeds rank length at file index {} on rank {:?}",
                skip_val, current_file_index, current_rank
            )));
        }

        Ok(skip_val)
    }

    fn parse_piece(&mut self, piece: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        let piece = Piece::from_char(piece)
            .map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

        if file >= 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
                piece, rank
            )));
        }

        let current_file = unsafe { File::from_unchecked(file) };

        self.add_piece(piece, Square::from_parts(current_file, rank));

        Ok(())
    }

    fn parse_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();

        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = Self::parse_separator(&mut rank_iter, rank, file)?;
                }

                skip if skip.is_ascii_digit() => {
                    file += Self::parse_skip(skip, i, rank, file)?;
                }

                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {:?} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        Ok(())
    }

    fn parse_side_to_move(&mut self, side_to_move: &str) -> Result<(), FenParseError> {
        match side_to_move {
            "w" => self.stm = Colour::White,
            "b" => self.stm = Colour::Black,
            _ => return Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
        };
        Ok(())
    }

    /// Accepts `-` or any subset of `KQkq`, written in that order
    fn parse_castling(&mut self, castling: &str) -> Result<(), FenParseError> {
        self.state.castle = Castling::NONE;

        if castling == "-" {
            return Ok(());
        }

        let mut order = [
            ('K', Castling::WK),
            ('Q', Castling::WQ),
            ('k', Castling::BK),
            ('q', Castling::BQ),
        ]
        .into_iter();

        for c in castling.chars() {
            let (_, right) = order
                .find(|&(flag, _)| flag == c)
                .ok_or(FenParseError::InvalidCastlingChar(c))?;

            self.state.castle.set(right);
        }

        Ok(())
    }

    /// The target must sit on the rank a pawn of the opponent would have skipped
    fn parse_enpassant(&mut self, enpassant: &str) -> Result<(), FenParseError> {
        self.state.enpassant = match enpassant {
            "-" => None,

            _ => {
                let square = enpassant
                    .parse::<Square>()
                    .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?;

                if square.rank() != Rank::Rank6.relative(self.stm) {
                    return Err(FenParseError::InvalidEnPassantSquare(format!(
                        "{square} is not a valid enpassant square with {:?} to move",
                        self.stm
                    )));
                }
                Some(square)
            }
        };
        Ok(())
    }

    fn parse_fifty_move(fifty_move_token: &str) -> Result<u16, FenParseError> {
        if !fifty_move_token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()));
        }

        fifty_move_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()))
    }

    fn parse_full_move(&self, full_move_token: &str) -> Result<u32, FenParseError> {
        if !full_move_token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FenParseError::InvalidFullmoveNumber(full_move_token.to_string()));
        }

        let full_move_number = full_move_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

        if full_move_number == 0 {
            return Err(FenParseError::InvalidFullmoveNumber(format!(
                "Fullmove number cannot be 0, found: {}",
                full_move_token
            )));
        }

        let ply = (full_move_number as u32 - 1) * 2 + (self.stm() as u32);

        Ok(ply)
    }
}

impl std::str::FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

/******************************************\
|==========================================|
|                Write Fen                 |
|==========================================|
\******************************************/

impl Board {
    /// FEN of the position, the en passant square only appears when it can be captured onto
    pub fn fen(&self) -> String {
        self.fen_with(FenOptions::default())
    }

    pub fn fen_with(&self, options: FenOptions) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.stm.to_char());

        fen.push(' ');
        fen.push_str(&self.state.castle.to_string());

        fen.push(' ');
        match self.disclosed_ep(options) {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {}", self.state.fifty_move));

        fen.push_str(&format!(" {}", self.fullmove_number()));

        fen
    }

    fn disclosed_ep(&self, options: FenOptions) -> Option<Square> {
        let ep = self.state.enpassant?;

        if options.force_enpassant_square {
            return Some(ep);
        }

        let capturable = self.ep_is_capturable();
        log::trace!("en passant square {ep} capturable: {capturable}");

        capturable.then_some(ep)
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    #[error("FEN string must have 6 fields separated by spaces")]
    InvalidNumberOfFields,

    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_parse_start_fen() {
        let mut board = Board::new();
        assert!(board.set(START_FEN).is_ok());

        assert_eq!(board.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(board.on(Square::E4), None);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.ep(), None);
        assert_eq!(board.fifty_move(), 0);
        assert_eq!(board.half_moves(), 0);
        assert_eq!(board.fen(), START_FEN);
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_parse_tricky_fen() {
        let board: Board = TRICKY_FEN.parse().unwrap();

        assert_eq!(board.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::E8), Some(Piece::BlackKing));
        assert_eq!(board.on(Square::F3), Some(Piece::WhiteQueen));
        assert_eq!(board.on(Square::C3), Some(Piece::WhiteKnight));
        assert_eq!(board.on(Square::H3), Some(Piece::BlackPawn));
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.fen(), TRICKY_FEN);
    }

    #[test]
    fn test_round_trip() {
        for fen in [
            "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1",
            "8/8/8/8/4kPpR/8/8/1K6 b - f3 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 17 42",
            "8/8/8/8/8/8/8/8 w - - 0 1",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().fen(), fen);
        }
    }

    #[test]
    fn test_uncapturable_ep_is_hidden_unless_forced() {
        let fen = "8/8/8/8/4kP1R/8/8/1K6 b - f3 0 1";
        let board = Board::from_fen(fen).unwrap();

        assert_eq!(board.ep(), Some(Square::F3));
        assert_eq!(board.fen(), "8/8/8/8/4kP1R/8/8/1K6 b - - 0 1");
        assert_eq!(board.fen_with(FenOptions::forced()), fen);
    }

    #[test]
    fn test_fen_invalid_piece() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidPiecePlacementChar('x'))
        ));
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_short_at_end() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Final rank Rank1 ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_piece() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("attempted beyond file H")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_skip() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/P6P1/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Skip value 1 exceeds rank length")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digit() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppp0ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '0'")
        );

        let fen = "rnbqkbnr/pppp9ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '9'")
        );
    }

    #[test]
    fn test_fen_rank_count() {
        let mut board = Board::new();

        let result = board.set("8/8/8/8/8/8/8/8/8 w - - 0 1");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Too many rank separators")
        );

        let result = board.set("8/8/8/8/8/8/8 w - - 0 1");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Not enough ranks specified")
        );
    }

    #[test]
    fn test_fen_field_count() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
        assert_eq!(board.set(fen), Err(FenParseError::InvalidNumberOfFields));

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra";
        assert_eq!(board.set(fen), Err(FenParseError::InvalidNumberOfFields));

        assert_eq!(board.set(""), Err(FenParseError::InvalidNumberOfFields));
    }

    #[test]
    fn test_fen_invalid_side() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1";
        assert!(matches!(board.set(fen), Err(FenParseError::InvalidSideToMove(s)) if s == "x"));
    }

    #[test]
    fn test_fen_castling() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert_eq!(board.castling(), Castling::WK | Castling::BQ);

        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert_eq!(board.castling(), Castling::NONE);

        for (castling, bad) in [("KQXkq", 'X'), ("K-q", '-'), ("KK", 'K'), ("QK", 'K'), ("H", 'H')] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {castling} - 0 1");
            assert_eq!(
                Board::from_fen(&fen),
                Err(FenParseError::InvalidCastlingChar(bad))
            );
        }
    }

    #[test]
    fn test_fen_invalid_enpassant() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "e9")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq zz 0 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "zz")
        );
    }

    #[test]
    fn test_fen_enpassant_rank_follows_side_to_move() {
        assert!(Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").is_ok());
        assert!(Board::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").is_ok());

        assert!(matches!(
            Board::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 w - d3 0 1"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d5 0 1"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn test_fen_invalid_halfmove() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - fifty 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "fifty")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1";
        assert!(matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "-1"));
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - +3 1";
        assert!(matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "+3"));

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 256 1";
        assert_eq!(Board::from_fen(fen).unwrap().fifty_move(), 256);
    }

    #[test]
    fn test_fen_invalid_fullmove() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 zero";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "zero")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s.contains("cannot be 0"))
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -5";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "-5")
        );
    }

    #[test]
    fn test_fen_ply_calculation() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 1);
        assert_eq!(board.stm(), Colour::Black);
        assert_eq!(board.fen_with(FenOptions::forced()), fen);

        let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 2);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.fen_with(FenOptions::forced()), fen);

        let fen = "r1bqkbnr/pp1ppppp/2n5/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 1 10";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 18);
        assert_eq!(board.fullmove_number(), 10);
        assert_eq!(board.fen(), fen);

        let fen = "r1bqkbnr/pp1ppppp/2n5/2p5/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq d3 0 10";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 19);
        assert_eq!(board.stm(), Colour::Black);
        assert_eq!(board.fen_with(FenOptions::forced()), fen);
    }
}
