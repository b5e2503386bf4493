/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{pseudo_moves, Board, MoveList, Square};

/// Represents the side a piece belongs to.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns the side of a piece character, where uppercase means White.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Color;
    /// assert_eq!(Color::from_case('Q'), Color::White);
    /// assert_eq!(Color::from_case('q'), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Parses a [`Color`] from `w` or `b`, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Color;
    /// assert_eq!(Color::from_char('w').unwrap(), Color::White);
    /// assert_eq!(Color::from_char('B').unwrap(), Color::Black);
    /// assert!(Color::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color.to_ascii_lowercase() {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail!("Invalid char for Color: Must be 'w' or 'b'. Got {color:?}"),
        }
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns the row delta of a single step "forward" for this side.
    ///
    /// White advances towards row `0`, so its forward is `-1`. Black's is `+1`.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Returns the row on which this side's pieces are promoted.
    ///
    /// # Example
    /// ```
    /// # use dualboard::Color;
    /// assert_eq!(Color::White.far_row(), 0);
    /// assert_eq!(Color::Black.far_row(), 7);
    /// ```
    #[inline(always)]
    pub const fn far_row(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Converts this [`Color`] to a `w` or `b`.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Returns this [`Color`] as a `usize`.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl Not for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Represents the kind of a piece, regardless of its [`Color`].
///
/// Both variants share one piece vocabulary. Chess uses everything except the two draughts
/// kinds, and draughts uses only those two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    LiteRook,
    Jumpman,
    WereWolf,
    DraughtsMan,
    DraughtsKing,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 11;

    /// An array of all piece kinds.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [
            King,
            Queen,
            Rook,
            Bishop,
            Knight,
            Pawn,
            LiteRook,
            Jumpman,
            WereWolf,
            DraughtsMan,
            DraughtsKing,
        ]
    }

    /// Parses a [`PieceKind`] from its letter, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use dualboard::PieceKind;
    /// assert_eq!(PieceKind::from_char('j').unwrap(), PieceKind::Jumpman);
    /// assert_eq!(PieceKind::from_char('M').unwrap(), PieceKind::DraughtsMan);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    pub fn from_char(kind: char) -> Result<Self> {
        use PieceKind::*;
        match kind.to_ascii_lowercase() {
            'k' => Ok(King),
            'q' => Ok(Queen),
            'r' => Ok(Rook),
            'b' => Ok(Bishop),
            'n' => Ok(Knight),
            'p' => Ok(Pawn),
            'l' => Ok(LiteRook),
            'j' => Ok(Jumpman),
            'w' => Ok(WereWolf),
            'm' => Ok(DraughtsMan),
            'd' => Ok(DraughtsKing),
            _ => bail!("Invalid char for PieceKind: Must be one of \"kqrbnpljwmd\". Got {kind:?}"),
        }
    }

    /// Converts this [`PieceKind`] to its lowercase letter.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        use PieceKind::*;
        match self {
            King => 'k',
            Queen => 'q',
            Rook => 'r',
            Bishop => 'b',
            Knight => 'n',
            Pawn => 'p',
            LiteRook => 'l',
            Jumpman => 'j',
            WereWolf => 'w',
            DraughtsMan => 'm',
            DraughtsKing => 'd',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        use PieceKind::*;
        match self {
            King => "king",
            Queen => "queen",
            Rook => "rook",
            Bishop => "bishop",
            Knight => "knight",
            Pawn => "pawn",
            LiteRook => "lite rook",
            Jumpman => "jumpman",
            WereWolf => "werewolf",
            DraughtsMan => "draughts man",
            DraughtsKing => "draughts king",
        }
    }

    /// Returns the kind this piece becomes upon reaching its side's far row, if any.
    ///
    /// # Example
    /// ```
    /// # use dualboard::PieceKind;
    /// assert_eq!(PieceKind::Pawn.promotion(), Some(PieceKind::Queen));
    /// assert_eq!(PieceKind::LiteRook.promotion(), Some(PieceKind::Rook));
    /// assert_eq!(PieceKind::DraughtsMan.promotion(), Some(PieceKind::DraughtsKing));
    /// assert_eq!(PieceKind::Rook.promotion(), None);
    /// ```
    #[inline(always)]
    pub const fn promotion(&self) -> Option<Self> {
        match self {
            Self::Pawn => Some(Self::Queen),
            Self::LiteRook => Some(Self::Rook),
            Self::DraughtsMan => Some(Self::DraughtsKing),
            _ => None,
        }
    }

    /// Returns `true` if this kind belongs to draughts.
    #[inline(always)]
    pub const fn is_draughts(&self) -> bool {
        matches!(self, Self::DraughtsMan | Self::DraughtsKing)
    }

    /// Returns this [`PieceKind`] as a `usize`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// A game piece: a [`Color`], a [`PieceKind`], the [`Square`] it stands on, and whether it has moved yet.
///
/// The square is kept in sync by [`Board::place`], so a [`Piece`] fetched from a [`Board`]
/// always knows where it is.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    square: Square,
    first_move: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Color, Piece, PieceKind, Square};
    /// let e7 = Square::new_unchecked(6, 4);
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, e7);
    /// assert!(pawn.is_first_move());
    /// assert_eq!(pawn.square(), e7);
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
            first_move: true,
        }
    }

    /// Parses a [`Piece`] from its letter, where uppercase means White.
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Color, Piece, PieceKind, Square};
    /// let square = Square::new_unchecked(4, 7);
    /// let wolf = Piece::from_char('W', square).unwrap();
    /// assert_eq!(wolf.color(), Color::White);
    /// assert_eq!(wolf.kind(), PieceKind::WereWolf);
    /// ```
    #[inline(always)]
    pub fn from_char(piece: char, square: Square) -> Result<Self> {
        let kind = PieceKind::from_char(piece)?;
        Ok(Self::new(Color::from_case(piece), kind, square))
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Fetches the [`Square`] this [`Piece`] stands on.
    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` if this [`Piece`] has not moved since it was placed.
    #[inline(always)]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Returns `true` if `other` belongs to the opposing side.
    #[inline(always)]
    pub const fn is_enemy_of(&self, other: &Self) -> bool {
        self.color.index() != other.color.index()
    }

    /// Returns `true` if this [`Piece`] is of the provided kind and color.
    #[inline(always)]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// Returns a copy of this [`Piece`] standing on `square`, without touching its move history.
    #[inline(always)]
    pub(crate) const fn on(mut self, square: Square) -> Self {
        self.square = square;
        self
    }

    /// Returns a copy of this [`Piece`] after it has moved to `square`.
    ///
    /// The copy has used up its first move.
    #[inline(always)]
    pub const fn moved_to(mut self, square: Square) -> Self {
        self.square = square;
        self.first_move = false;
        self
    }

    /// Returns this [`Piece`] promoted, if it promotes and stands on its side's far row.
    ///
    /// The promoted piece keeps its square and move history.
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Color, Piece, PieceKind, Square};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, Square::new_unchecked(0, 3));
    /// assert_eq!(pawn.promoted().unwrap().kind(), PieceKind::Queen);
    ///
    /// let pawn = Piece::new(Color::Black, PieceKind::Pawn, Square::new_unchecked(0, 3));
    /// assert!(pawn.promoted().is_none());
    /// ```
    #[inline(always)]
    pub fn promoted(&self) -> Option<Self> {
        let kind = self.kind.promotion()?;
        (self.square.row() == self.color.far_row()).then_some(Self { kind, ..*self })
    }

    /// Generates every destination this [`Piece`] could reach on `board`, ignoring king safety.
    #[inline(always)]
    pub fn pseudo_moves(&self, board: &Board) -> MoveList {
        pseudo_moves(self, board)
    }

    /// Returns `true` if `target` is among this [`Piece`]'s pseudo-moves on `board`.
    #[inline(always)]
    pub fn can_reach(&self, board: &Board, target: Square) -> bool {
        self.pseudo_moves(board).contains(&target)
    }

    /// Converts this [`Piece`] to its letter, uppercase if White.
    ///
    /// # Example
    /// ```
    /// # use dualboard::{Color, Piece, PieceKind, Square};
    /// let square = Square::default();
    /// assert_eq!(Piece::new(Color::White, PieceKind::LiteRook, square).to_char(), 'L');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::DraughtsKing, square).to_char(), 'd');
    /// ```
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        let c = self.kind.to_char();
        if self.color.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Fetches a human-readable name for this [`Piece`], such as `"white jumpman"`.
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color, self.kind)
    }
}

impl fmt::Display for Piece {
    /// A [`Piece`] displays as its letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.name(), self.square)?;
        if !self.first_move {
            write!(f, " (moved)")?;
        }
        Ok(())
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            /// [`$type`] can be used to mutably index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_char`], but only if `s` is one character in length.
            #[inline(always)]
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    bail!("Invalid str for {}: Must be a str of len 1. Got {s:?}", stringify!($type));
                };

                Self::from_char(c)
            }
        }

        impl fmt::Debug for $type {
            /// Debug formatting displays a $type as its human-readable name and index value.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\" ({})", self.name(), self.index())
            }
        }
    };
}

impl_common_traits!(PieceKind);
impl_common_traits!(Color);
