use std::str::FromStr;

use rand::Rng;

use crate::constants::N_MOVE;
use crate::facelet::FaceCube;
use crate::moves::{Move, ALL_MOVES};
use crate::error::Error;

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    s.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

/// Draw `length` random moves, redrawing any move on the same face as the one before it.
pub fn gen_scramble<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<Move> {
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..N_MOVE)];
        if scramble.last().is_some_and(|last| last.is_same_layer(m)) {
            continue;
        }
        scramble.push(m);
    }
    scramble
}

/// Scramble a copy of `cube`, returning the copy and the moves applied to it.
pub fn scramble<R: Rng + ?Sized>(
    cube: &FaceCube,
    length: usize,
    rng: &mut R,
) -> (FaceCube, Vec<Move>) {
    let mut cube = cube.clone();
    let moves = cube.scramble(length, rng);
    (cube, moves)
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B R' U'").unwrap(), m);
        assert_eq!(scramble_from_str("  F\tR \n").unwrap(), vec![F, R]);
        assert!(scramble_from_str("").unwrap().is_empty());
        assert!(matches!(
            scramble_from_str("R U2 R'"),
            Err(Error::InvalidMove(token)) if token == "U2"
        ));
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B R' U'");
        assert_eq!(scramble_to_str(&[]), "");
    }

    #[test]
    fn test_gen_scramble() {
        let mut rng = StdRng::seed_from_u64(1);
        for length in [0, 1, 2, 25, 100] {
            let ss = gen_scramble(length, &mut rng);
            assert_eq!(ss.len(), length);
            assert!(ss.windows(2).all(|w| !w[0].is_same_layer(w[1])), "{ss:?}");
        }
    }

    #[test]
    fn test_gen_scramble_is_reproducible() {
        let a = gen_scramble(25, &mut StdRng::seed_from_u64(9));
        let b = gen_scramble(25, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_scramble_copy() {
        let solved = FaceCube::default();
        for seed in 0..8 {
            let (cube, moves) = scramble(&solved, 25, &mut StdRng::seed_from_u64(seed));
            assert!(solved.is_solved());
            assert_eq!(moves.len(), 25);
            assert!(!cube.is_solved());

            let mut replayed = FaceCube::default();
            replayed.apply_moves(&moves);
            assert_eq!(replayed, cube);
        }
    }
}
