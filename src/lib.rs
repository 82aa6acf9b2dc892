//! A crate for turning and solving the 3x3 Rubik's cube on the facelet level.
//!
//! Solving first runs a bounded breadth-first search, which finds short solutions for lightly
//! scrambled cubes, and falls back to a layer-by-layer pipeline for everything else. The
//! pipeline is not guaranteed to finish the cube; [solver::SolveResult::solved] reports whether
//! it did.

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;
pub mod facelet;
pub mod moves;
pub mod solver;

pub use crate::error::Error;
pub use crate::facelet::{Color, Face, FaceCube};
pub use crate::moves::Move;
pub use crate::solver::{solve, SolveResult, SolverConfig};
