use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use self::Move::*;
use crate::constants::*;
use crate::error::Error;
use crate::facelet::{Face, ALL_FACES};

/// Quarter-turn moves, Front, Right, Up, Left, Down, Back.
///
/// $ clockwise, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Move {
    F, F3,
    R, R3,
    U, U3,
    L, L3,
    D, D3,
    B, B3,
}

/// All moves, in the order the search expands them.
pub const ALL_MOVES: [Move; N_MOVE] = [F, F3, R, R3, U, U3, L, L3, D, D3, B, B3];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            F3 | R3 | U3 | L3 | D3 | B3 => write!(f, "{}'", self.face()),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(F),
            "F'" => Ok(F3),
            "R" => Ok(R),
            "R'" => Ok(R3),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "B" => Ok(B),
            "B'" => Ok(B3),
            _ => Err(Error::InvalidMove(s.to_string())),
        }
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Move::from_str(&s).map_err(de::Error::custom)
    }
}

impl Move {
    /// Clockwise turn of `face`.
    pub fn clockwise(face: Face) -> Self {
        match face {
            Face::F => F,
            Face::R => R,
            Face::U => U,
            Face::L => L,
            Face::D => D,
            Face::B => B,
        }
    }

    pub fn face(self) -> Face {
        match self {
            F | F3 => Face::F,
            R | R3 => Face::R,
            U | U3 => Face::U,
            L | L3 => Face::L,
            D | D3 => Face::D,
            B | B3 => Face::B,
        }
    }

    pub fn is_clockwise(self) -> bool {
        matches!(self, F | R | U | L | D | B)
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        self.face() == other.face()
    }

    pub fn get_inverse(self) -> Self {
        match self {
            F => F3,
            F3 => F,
            R => R3,
            R3 => R,
            U => U3,
            U3 => U,
            L => L3,
            L3 => L,
            D => D3,
            D3 => D,
            B => B3,
            B3 => B,
        }
    }
}

/// Rotation of the turned face itself as two 4-cycles of sticker indices.
///
/// The sticker at `cycle[k]` moves to `cycle[k + 1]`, the center stays.
pub const FACE_CYCLES: [[usize; 4]; 2] = [[0, 2, 8, 6], [1, 5, 7, 3]];

/// The four edge bands carried along by a clockwise turn of each face, indexed like [Face].
///
/// The stickers of band `k` move onto band `k + 1` position by position, band 3 onto band 0.
#[rustfmt::skip]
pub const BANDS: [[(Face, [usize; 3]); 4]; N_FACE] = [
    // F
    [(Face::U, [6, 7, 8]), (Face::R, [0, 3, 6]), (Face::D, [2, 1, 0]), (Face::L, [8, 5, 2])],
    // B
    [(Face::U, [0, 1, 2]), (Face::L, [6, 3, 0]), (Face::D, [8, 7, 6]), (Face::R, [2, 5, 8])],
    // L
    [(Face::U, [0, 3, 6]), (Face::F, [0, 3, 6]), (Face::D, [0, 3, 6]), (Face::B, [8, 5, 2])],
    // R
    [(Face::U, [2, 5, 8]), (Face::B, [6, 3, 0]), (Face::D, [2, 5, 8]), (Face::F, [2, 5, 8])],
    // U
    [(Face::F, [0, 1, 2]), (Face::L, [0, 1, 2]), (Face::B, [0, 1, 2]), (Face::R, [0, 1, 2])],
    // D
    [(Face::F, [6, 7, 8]), (Face::R, [6, 7, 8]), (Face::B, [6, 7, 8]), (Face::L, [6, 7, 8])],
];

lazy_static! {
    /// Clockwise turn of each face compiled from [FACE_CYCLES] and [BANDS].
    ///
    /// After the turn, facelet `i` holds what facelet `FACE_TURNS[face][i]` held before.
    pub static ref FACE_TURNS: [[usize; N_FACELET]; N_FACE] = ALL_FACES.map(face_turn);
}

fn face_turn(face: Face) -> [usize; N_FACELET] {
    let mut turn: [usize; N_FACELET] = std::array::from_fn(|i| i);
    for cycle in FACE_CYCLES {
        cycle_facelets(&mut turn, cycle.map(|i| face.facelet(i)));
    }
    let bands = BANDS[face as usize];
    for j in 0..3 {
        cycle_facelets(&mut turn, bands.map(|(f, idx)| f.facelet(idx[j])));
    }
    turn
}

fn cycle_facelets(turn: &mut [usize; N_FACELET], facelets: [usize; 4]) {
    for k in 0..4 {
        turn[facelets[(k + 1) % 4]] = facelets[k];
    }
}

#[cfg(test)]
mod test {
    use crate::moves::*;

    #[test]
    fn test_move_strings() {
        for m in ALL_MOVES {
            assert_eq!(Move::from_str(&m.to_string()).unwrap(), m);
        }
        assert_eq!(F3.to_string(), "F'");
        assert_eq!(B.to_string(), "B");
        assert!(matches!(Move::from_str("F2"), Err(Error::InvalidMove(_))));
        assert!(matches!(Move::from_str("f"), Err(Error::InvalidMove(_))));
    }

    #[test]
    fn test_inverse() {
        for m in ALL_MOVES {
            assert_ne!(m.get_inverse(), m);
            assert_eq!(m.get_inverse().get_inverse(), m);
            assert!(m.is_same_layer(m.get_inverse()));
            assert_ne!(m.is_clockwise(), m.get_inverse().is_clockwise());
        }
        assert!(!R.is_same_layer(L));
    }

    #[test]
    fn test_bands_are_distinct_stickers() {
        for face in ALL_FACES {
            let mut seen = Vec::new();
            for (f, idx) in BANDS[face as usize] {
                assert_ne!(f, face);
                for i in idx {
                    assert_ne!(i, CENTER);
                    seen.push(f.facelet(i));
                }
            }
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 12, "{face}");
        }
    }

    #[test]
    fn test_face_turns_are_permutations() {
        for face in ALL_FACES {
            let turn = FACE_TURNS[face as usize];
            let identity: [usize; N_FACELET] = std::array::from_fn(|i| i);
            let mut sorted = turn;
            sorted.sort();
            assert_eq!(sorted, identity);
            // 8 stickers on the face and 12 on the bands move, everything else stays
            let moved = turn.iter().enumerate().filter(|(i, from)| *i != **from).count();
            assert_eq!(moved, 20, "{face}");
            assert_eq!(turn[face.facelet(CENTER)], face.facelet(CENTER));
        }
    }
}
