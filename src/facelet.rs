use std::fmt;

use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, FACE_TURNS};
use crate::scramble::gen_scramble;

/// The six faces, in the order they appear in the facelet string.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Face {
    F,
    B,
    L,
    R,
    U,
    D,
}

pub const ALL_FACES: [Face; N_FACE] = [Face::F, Face::B, Face::L, Face::R, Face::U, Face::D];

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Face {
    /// Color of the face's center, which never moves.
    pub fn home_color(self) -> Color {
        match self {
            Face::F => Color::Red,
            Face::B => Color::Orange,
            Face::L => Color::Green,
            Face::R => Color::Blue,
            Face::U => Color::White,
            Face::D => Color::Yellow,
        }
    }

    /// Position of sticker `index` (row-major, 0..9) of this face in the facelet string.
    pub fn facelet(self, index: usize) -> usize {
        self as usize * N_STICKER + index
    }
}

/// Sticker colors, written as `r o g b w y` in the facelet string.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    Red,
    Orange,
    Green,
    Blue,
    White,
    Yellow,
}

pub const ALL_COLORS: [Color; N_FACE] = [
    Color::Red,
    Color::Orange,
    Color::Green,
    Color::Blue,
    Color::White,
    Color::Yellow,
];

impl Color {
    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Orange => 'o',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::White => 'w',
            Color::Yellow => 'y',
        }
    }
}

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'r' => Ok(Color::Red),
            'o' => Ok(Color::Orange),
            'g' => Ok(Color::Green),
            'b' => Ok(Color::Blue),
            'w' => Ok(Color::White),
            'y' => Ok(Color::Yellow),
            _ => Err(Error::InvalidFaceletString),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The facelet string as bytes, used as a hash key while searching.
pub type Fingerprint = [u8; N_FACELET];

/// Cube on the facelet level.
///
/// The facelet string lists the faces in the order F, B, L, R, U, D, each face row-major:
/// ```text
///              |************|
///              |*U0**U1**U2*|
///              |************|
///              |*U3**U4**U5*|
///              |************|
///              |*U6**U7**U8*|
///              |************|
/// |************|************|************|************|
/// |*L0**L1**L2*|*F0**F1**F2*|*R0**R1**R2*|*B0**B1**B2*|
/// |************|************|************|************|
/// |*L3**L4**L5*|*F3**F4**F5*|*R3**R4**R5*|*B3**B4**B5*|
/// |************|************|************|************|
/// |*L6**L7**L8*|*F6**F7**F8*|*R6**R7**R8*|*B6**B7**B8*|
/// |************|************|************|************|
///              |************|
///              |*D0**D1**D2*|
///              |************|
///              |*D3**D4**D5*|
///              |************|
///              |*D6**D7**D8*|
///              |************|
/// ```
/// Every face is seen from outside the cube, so B0 touches R and D0 touches F.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct FaceCube {
    pub f: [Color; N_FACELET],
}

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [Color::Red; N_FACELET];
        for face in ALL_FACES {
            let start = face.facelet(0);
            f[start..start + N_STICKER].fill(face.home_color());
        }
        Self { f }
    }
}

impl FaceCube {
    pub fn solved() -> Self {
        Self::default()
    }

    pub fn face(&self, face: Face) -> &[Color] {
        let start = face.facelet(0);
        &self.f[start..start + N_STICKER]
    }

    pub fn sticker(&self, face: Face, index: usize) -> Color {
        self.f[face.facelet(index)]
    }

    pub fn center(&self, face: Face) -> Color {
        self.sticker(face, CENTER)
    }

    /// Every face shows a single color.
    pub fn is_solved(&self) -> bool {
        ALL_FACES.iter().all(|&face| {
            let center = self.center(face);
            self.face(face).iter().all(|&c| c == center)
        })
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.f.map(|c| c.to_char() as u8)
    }

    /// Number of stickers of each color, indexed like [ALL_COLORS].
    pub fn color_counts(&self) -> [usize; N_FACE] {
        ALL_COLORS.map(|color| self.f.iter().filter(|&&c| c == color).count())
    }

    /// Check the color counts and that the six centers are distinct.
    pub fn verify(&self) -> Result<(), Error> {
        if self.color_counts().iter().any(|&n| n != N_STICKER) {
            return Err(Error::InvalidFaceletValue);
        }
        let mut centers = [false; N_FACE];
        for face in ALL_FACES {
            let c = self.center(face) as usize;
            if centers[c] {
                return Err(Error::InvalidFaceletValue);
            }
            centers[c] = true;
        }
        Ok(())
    }

    fn turn_clockwise(&mut self, face: Face) {
        let turn = &FACE_TURNS[face as usize];
        let old = self.f;
        for (i, &from) in turn.iter().enumerate() {
            self.f[i] = old[from];
        }
    }

    /// Apply a quarter turn in place. A counter-clockwise turn is three clockwise turns.
    pub fn apply_move(&mut self, m: Move) {
        let turns = if m.is_clockwise() { 1 } else { 3 };
        for _ in 0..turns {
            self.turn_clockwise(m.face());
        }
    }

    pub fn apply_moves(&mut self, moves: &[Move]) {
        for &m in moves {
            self.apply_move(m);
        }
    }

    /// Parse `token` and apply it, leaving the cube untouched on an unknown token.
    pub fn apply_move_str(&mut self, token: &str) -> Result<(), Error> {
        let m: Move = token.parse()?;
        self.apply_move(m);
        Ok(())
    }

    /// Apply `length` random moves, never turning the same face twice in a row.
    pub fn scramble<R: Rng + ?Sized>(&mut self, length: usize, rng: &mut R) -> Vec<Move> {
        let moves = gen_scramble(length, rng);
        self.apply_moves(&moves);
        moves
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.f {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.chars().count() != N_FACELET {
            return Err(Error::InvalidFaceletString);
        }
        let mut f = [Color::Red; N_FACELET];
        for (i, ch) in value.chars().enumerate() {
            f[i] = Color::try_from(ch)?;
        }
        let cube = Self { f };
        cube.verify()?;
        Ok(cube)
    }
}

impl Serialize for FaceCube {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FaceCube {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FaceCube::try_from(s.as_str()).map_err(de::Error::custom)
    }
}
