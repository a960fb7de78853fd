// Square mapping: file 0..7 = a..h, rank 0..7 = 1..8.
// The grid is file-major: grid[file][rank], so a1 = grid[0][0], h8 = grid[7][7].

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this colour advances by.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank index where this colour's pawns start.
    pub fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index a pawn of this colour promotes on.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank index of this colour's back rank.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, in the order moves fan out.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Queen,
    ];

    /// Lowercase letter used in descriptors and move text.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Content of an occupied grid square: a piece letter, uppercase for White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    pub color: Color,
    pub kind: PieceKind,
}

impl Marker {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn from_char(ch: char) -> Option<Marker> {
        let kind = PieceKind::from_letter(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Marker { color, kind })
    }

    pub fn to_char(self) -> char {
        let ch = self.kind.letter();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Builds a square from 0-based coordinates.
    ///
    /// # Panics
    /// If either coordinate is outside 0..8.
    pub fn new(file: u8, rank: u8) -> Self {
        assert!(
            file < 8 && rank < 8,
            "square ({}, {}) is off the board",
            file,
            rank
        );
        Self { file, rank }
    }

    pub fn try_new(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Index in a1=0 .. h8=63 order.
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::try_new(self.file as i8 + df, self.rank as i8 + dr)
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square notation '{}'", s));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(format!("invalid square notation '{}'", s));
        }
        Ok(Square::new(file - b'a', rank - b'1'))
    }
}

/// An 8×8 grid of optional markers.
///
/// The grid knows nothing about legality or piece identity; it only mirrors
/// where the rosters of a position put their pieces. It is `Copy`, so every
/// copy is structurally independent of its source.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Option<Marker>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    pub fn get(&self, sq: Square) -> Option<Marker> {
        self.grid[sq.file() as usize][sq.rank() as usize]
    }

    pub fn set(&mut self, sq: Square, marker: Option<Marker>) {
        self.grid[sq.file() as usize][sq.rank() as usize] = marker;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Moves whatever sits on `from` to `to`, overwriting `to` and clearing `from`.
    pub fn relocate(&mut self, from: Square, to: Square) {
        let marker = self.get(from);
        self.set(from, None);
        self.set(to, marker);
    }

    /// Occupied squares with their markers, a1 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Marker)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|m| (sq, m)))
    }

    pub fn find(&self, marker: Marker) -> impl Iterator<Item = Square> + '_ {
        self.occupied()
            .filter(move |&(_, m)| m == marker)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self) -> usize {
        self.occupied().count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

// ASCII rendering, rank 8 at the top
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   +-----------------+")?;
        for rank in (0..8u8).rev() {
            write!(f, " {} | ", rank + 1)?;
            for file in 0..8u8 {
                match self.get(Square::new(file, rank)) {
                    Some(m) => write!(f, "{} ", m.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "   +-----------------+")?;
        write!(f, "     a b c d e f g h")
    }
}
