use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;
use crate::facelet::{Color, Face, FaceCube, Fingerprint};
use crate::moves::Move::{self, *};
use crate::moves::ALL_MOVES;

const WHITE_CORNER_ALG: [Move; 4] = [R, U, R3, U3];
const RIGHT_MIDDLE_ALG: [Move; 8] = [R, U, R3, U3, R3, F, R, F3];
const LEFT_MIDDLE_ALG: [Move; 8] = [L3, U3, L, U, L, F3, L3, F];
const YELLOW_CROSS_ALG: [Move; 6] = [F, R, U, R3, U3, F3];
const ORIENT_CORNER_ALG: [Move; 8] = [R, U, R3, U, R, U, U, R3];
const PERMUTE_CORNER_ALG: [Move; 12] = [R, F3, R3, B, B, R, F3, R3, B, B, R, R];
const PERMUTE_EDGE_ALG: [Move; 7] = [R, U, R3, F, R3, F3, R];

/// Faces searched, in order, for an edge sticker to bring into the cross.
const CROSS_SOURCES: [Face; 5] = [Face::F, Face::R, Face::B, Face::L, Face::D];
const SIDE_FACES: [Face; 4] = [Face::F, Face::R, Face::B, Face::L];

/// Bounds of the breadth-first search.
///
/// * `max_depth`: longest path explored, in quarter turns.
/// * `max_states`: the search gives up once this many distinct states have been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_depth: usize,
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_states: MAX_STATES,
        }
    }
}

/// How the returned solution was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Search,
    LayerByLayer,
}

/// The seven stages of the layer-by-layer pipeline, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    WhiteCross,
    WhiteCorners,
    MiddleLayer,
    YellowCross,
    OrientCorners,
    PermuteCorners,
    PermuteEdges,
}

pub const ALL_STAGES: [Stage; 7] = [
    Stage::WhiteCross,
    Stage::WhiteCorners,
    Stage::MiddleLayer,
    Stage::YellowCross,
    Stage::OrientCorners,
    Stage::PermuteCorners,
    Stage::PermuteEdges,
];

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::WhiteCross => "white cross",
            Stage::WhiteCorners => "white corners",
            Stage::MiddleLayer => "middle layer",
            Stage::YellowCross => "yellow cross",
            Stage::OrientCorners => "orient yellow corners",
            Stage::PermuteCorners => "permute yellow corners",
            Stage::PermuteEdges => "permute yellow edges",
        };
        write!(f, "{name}")
    }
}

fn shows_home(cube: &FaceCube, face: Face, indices: &[usize]) -> bool {
    let home = cube.center(face);
    indices.iter().all(|&i| cube.sticker(face, i) == home)
}

impl Stage {
    /// Whether the stickers this stage works on are in place. Never looks at the whole cube,
    /// except for the last stage whose goal is the solved cube.
    pub fn is_done(self, cube: &FaceCube) -> bool {
        match self {
            Stage::WhiteCross => shows_home(cube, Face::U, &EDGES),
            Stage::WhiteCorners => shows_home(cube, Face::U, &CORNERS),
            Stage::MiddleLayer => SIDE_FACES.iter().all(|&face| shows_home(cube, face, &[3, 5])),
            Stage::YellowCross => shows_home(cube, Face::D, &EDGES),
            Stage::OrientCorners => shows_home(cube, Face::D, &CORNERS),
            Stage::PermuteCorners => SIDE_FACES
                .iter()
                .all(|&face| cube.sticker(face, 6) == cube.sticker(face, 8)),
            Stage::PermuteEdges => cube.is_solved(),
        }
    }

    /// Attempt ceiling. For the cross this bounds each edge separately.
    pub fn max_attempts(self) -> usize {
        match self {
            Stage::WhiteCross => CROSS_EDGE_ATTEMPTS,
            Stage::WhiteCorners => WHITE_CORNER_ATTEMPTS,
            Stage::MiddleLayer => MIDDLE_LAYER_ATTEMPTS,
            Stage::YellowCross => YELLOW_CROSS_ATTEMPTS,
            Stage::OrientCorners => ORIENT_CORNER_ATTEMPTS,
            Stage::PermuteCorners => PERMUTE_CORNER_ATTEMPTS,
            Stage::PermuteEdges => PERMUTE_EDGE_ATTEMPTS,
        }
    }

    /// Sequence applied on the given attempt. The cross picks its moves from the cube instead.
    pub fn algorithm(self, attempt: usize) -> &'static [Move] {
        match self {
            Stage::WhiteCross => &[],
            Stage::WhiteCorners => &WHITE_CORNER_ALG,
            Stage::MiddleLayer if attempt % 2 == 0 => &RIGHT_MIDDLE_ALG,
            Stage::MiddleLayer => &LEFT_MIDDLE_ALG,
            Stage::YellowCross => &YELLOW_CROSS_ALG,
            Stage::OrientCorners => &ORIENT_CORNER_ALG,
            Stage::PermuteCorners => &PERMUTE_CORNER_ALG,
            Stage::PermuteEdges => &PERMUTE_EDGE_ALG,
        }
    }
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub attempts: usize,
    pub moves: usize,
    pub converged: bool,
}

/// Solution result:
/// * solution: the moves to replay, in order.
/// * solved: whether replaying the solution leaves the cube solved. The layer-by-layer
///   pipeline can run out of attempts, in which case this is `false`.
/// * method: the breadth-first search or the layer-by-layer pipeline.
/// * stages: one report per pipeline stage, empty when the search succeeded.
/// * states_visited: distinct states seen by the search.
/// * solve_time: time spent in the solver.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolveResult {
    pub solution: Vec<Move>,
    pub solved: bool,
    pub method: Method,
    pub stages: Vec<StageReport>,
    pub states_visited: usize,
    pub solve_time: Duration,
}

/// A state on the search frontier and the path that reached it from the root.
struct SearchNode {
    cube: FaceCube,
    path: Vec<Move>,
}

/// Solves a private copy of a cube.
///
/// The breadth-first search explores clones only; when it fails the pipeline turns the
/// private copy itself, recording every move in `solution`.
pub struct Solver {
    cube: FaceCube,
    config: SolverConfig,
    solution: Vec<Move>,
    states_visited: usize,
}

impl Solver {
    pub fn new(cube: &FaceCube, config: SolverConfig) -> Self {
        Self {
            cube: cube.clone(),
            config,
            solution: Vec::new(),
            states_visited: 0,
        }
    }

    /// Search first, fall back to the layer-by-layer pipeline.
    pub fn run(mut self) -> SolveResult {
        let start_time = Instant::now();
        if let Some(path) = self.search() {
            info!(
                "search found {} moves after {} states",
                path.len(),
                self.states_visited
            );
            return SolveResult {
                solution: path,
                solved: true,
                method: Method::Search,
                stages: Vec::new(),
                states_visited: self.states_visited,
                solve_time: start_time.elapsed(),
            };
        }

        info!(
            "search gave up after {} states, solving layer by layer",
            self.states_visited
        );
        let stages = self.layer_by_layer();
        let solved = self.cube.is_solved();
        if !solved {
            warn!(
                "layer-by-layer pipeline ended unsolved after {} moves",
                self.solution.len()
            );
        }
        SolveResult {
            solution: self.solution,
            solved,
            method: Method::LayerByLayer,
            stages,
            states_visited: self.states_visited,
            solve_time: start_time.elapsed(),
        }
    }

    /// Breadth-first search up to `max_depth` quarter turns.
    ///
    /// A move on the same face as the previous one (its inverse included) is never tried, and a
    /// state whose fingerprint was already seen is never queued again. Returns the first path
    /// found, which is the shortest one under these rules.
    pub fn search(&mut self) -> Option<Vec<Move>> {
        if self.cube.is_solved() {
            return Some(Vec::new());
        }
        let mut visited: FxHashSet<Fingerprint> = FxHashSet::default();
        visited.insert(self.cube.fingerprint());
        let mut queue = VecDeque::from([SearchNode {
            cube: self.cube.clone(),
            path: Vec::new(),
        }]);

        let mut found = None;
        'search: while let Some(node) = queue.pop_front() {
            if node.path.len() >= self.config.max_depth {
                continue;
            }
            for m in ALL_MOVES {
                if let Some(&last) = node.path.last() {
                    if m == last.get_inverse() || m.is_same_layer(last) {
                        continue;
                    }
                }
                let mut cube = node.cube.clone();
                cube.apply_move(m);
                let mut path = node.path.clone();
                path.push(m);

                if cube.is_solved() {
                    found = Some(path);
                    break 'search;
                }
                if path.len() < self.config.max_depth && visited.insert(cube.fingerprint()) {
                    if visited.len() >= self.config.max_states {
                        debug!("state ceiling of {} reached", self.config.max_states);
                        break 'search;
                    }
                    queue.push_back(SearchNode { cube, path });
                }
            }
        }
        self.states_visited = visited.len();
        debug!(
            "search visited {} states, {} left on the frontier",
            visited.len(),
            queue.len()
        );
        found
    }

    /// Run the seven stages in order on the private cube, without backtracking.
    pub fn layer_by_layer(&mut self) -> Vec<StageReport> {
        ALL_STAGES.iter().map(|&stage| self.run_stage(stage)).collect()
    }

    fn run_stage(&mut self, stage: Stage) -> StageReport {
        let before = self.solution.len();
        let attempts = match stage {
            Stage::WhiteCross => self.solve_white_cross(),
            _ => {
                let mut attempts = 0;
                while !stage.is_done(&self.cube) && attempts < stage.max_attempts() {
                    self.execute_sequence(stage.algorithm(attempts));
                    attempts += 1;
                }
                attempts
            }
        };
        let converged = stage.is_done(&self.cube);
        let moves = self.solution.len() - before;
        if converged {
            debug!("{stage}: done after {attempts} attempts, {moves} moves");
        } else {
            warn!("{stage}: not reached after {attempts} attempts, {moves} moves");
        }
        StageReport {
            stage,
            attempts,
            moves,
            converged,
        }
    }

    fn execute_sequence(&mut self, moves: &[Move]) {
        self.cube.apply_moves(moves);
        self.solution.extend_from_slice(moves);
    }

    /// Bring each missing cross edge up by turning the face holding a white edge sticker
    /// together with U, or D alone when the sticker sits on D.
    fn solve_white_cross(&mut self) -> usize {
        let home = self.cube.center(Face::U);
        let mut attempts = 0;
        for target in EDGES {
            if self.cube.sticker(Face::U, target) == home {
                continue;
            }
            let Some(face) = self.find_edge_sticker(home) else {
                continue;
            };
            let mut turns = 0;
            while self.cube.sticker(Face::U, target) != home
                && turns < Stage::WhiteCross.max_attempts()
            {
                match face {
                    Face::D => self.execute_sequence(&[D]),
                    _ => self.execute_sequence(&[Move::clockwise(face), U]),
                }
                turns += 1;
            }
            attempts += turns;
        }
        attempts
    }

    fn find_edge_sticker(&self, color: Color) -> Option<Face> {
        CROSS_SOURCES
            .into_iter()
            .find(|&face| EDGES.iter().any(|&i| self.cube.sticker(face, i) == color))
    }
}

/// Solve `cube` with the default [SolverConfig]. The cube itself is never modified.
///
/// # Examples
/// ```rust
/// use cubesolver::{facelet::FaceCube, scramble::scramble_from_str, solver::solve};
///
/// let mut cube = FaceCube::default();
/// cube.apply_moves(&scramble_from_str("F R U").unwrap());
/// let result = solve(&cube);
/// assert!(result.solved);
/// cube.apply_moves(&result.solution);
/// assert!(cube.is_solved());
/// ```
pub fn solve(cube: &FaceCube) -> SolveResult {
    solver(cube, SolverConfig::default())
}

pub fn solver(cube: &FaceCube, config: SolverConfig) -> SolveResult {
    Solver::new(cube, config).run()
}

/// Solve a cube given by its facelet string.
pub fn solve_facelet(facelets: &str, config: SolverConfig) -> Result<SolveResult, Error> {
    let cube = FaceCube::try_from(facelets)?;
    Ok(solver(&cube, config))
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::scramble::scramble_from_str;
    use crate::solver::*;

    fn scrambled(s: &str) -> FaceCube {
        let mut cube = FaceCube::default();
        cube.apply_moves(&scramble_from_str(s).unwrap());
        cube
    }

    fn replay(cube: &FaceCube, solution: &[Move]) -> FaceCube {
        let mut cube = cube.clone();
        cube.apply_moves(solution);
        cube
    }

    #[test]
    fn test_solve_solved() {
        let result = solve(&FaceCube::default());
        assert!(result.solution.is_empty());
        assert!(result.solved);
        assert_eq!(result.method, Method::Search);
    }

    #[test]
    fn test_solve_three_moves() {
        let cube = scrambled("F R U");
        let result = solve(&cube);
        assert_eq!(result.method, Method::Search);
        assert_eq!(result.solution, vec![U3, R3, F3]);
        assert!(result.solved);
        assert!(replay(&cube, &result.solution).is_solved());
        // the caller's cube is untouched
        assert_eq!(cube, scrambled("F R U"));
    }

    #[test]
    fn test_search_is_shortest() {
        let cube = scrambled("R U");
        assert_eq!(solve(&cube).solution, vec![U3, R3]);
        let cube = scrambled("L'");
        assert_eq!(solve(&cube).solution, vec![L]);
    }

    #[test]
    fn test_search_never_repeats_a_face() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..5 {
            let mut cube = FaceCube::default();
            cube.scramble(4, &mut rng);
            let result = solve(&cube);
            assert_eq!(result.method, Method::Search);
            assert!(result
                .solution
                .windows(2)
                .all(|w| !w[0].is_same_layer(w[1])));
            assert!(replay(&cube, &result.solution).is_solved());
        }
    }

    #[test]
    fn test_depth_limit() {
        let cube = scrambled("F R U");
        let config = SolverConfig {
            max_depth: 3,
            ..SolverConfig::default()
        };
        let result = solver(&cube, config);
        assert_eq!(result.method, Method::Search);
        assert_eq!(result.solution, vec![U3, R3, F3]);

        let config = SolverConfig {
            max_depth: 2,
            ..SolverConfig::default()
        };
        let result = solver(&cube, config);
        assert_eq!(result.method, Method::LayerByLayer);
        assert_eq!(result.stages.len(), ALL_STAGES.len());
        assert_eq!(replay(&cube, &result.solution).is_solved(), result.solved);
    }

    #[test]
    fn test_state_ceiling() {
        let cube = scrambled("F R U L D");
        let config = SolverConfig {
            max_depth: MAX_DEPTH,
            max_states: 10,
        };
        let mut solver = Solver::new(&cube, config);
        assert!(solver.search().is_none());
        assert_eq!(solver.states_visited, 10);

        let result = Solver::new(&cube, config).run();
        assert_eq!(result.method, Method::LayerByLayer);
        assert_eq!(result.stages.len(), ALL_STAGES.len());
        assert_eq!(replay(&cube, &result.solution).is_solved(), result.solved);
    }

    #[test]
    fn test_depth_zero_skips_search() {
        let cube = scrambled("R");
        let config = SolverConfig {
            max_depth: 0,
            ..SolverConfig::default()
        };
        let result = solver(&cube, config);
        assert_eq!(result.method, Method::LayerByLayer);
        assert_eq!(result.states_visited, 1);
        assert!(!result.solution.is_empty());
        assert_eq!(replay(&cube, &result.solution).is_solved(), result.solved);
        let total: usize = result.stages.iter().map(|s| s.moves).sum();
        assert_eq!(total, result.solution.len());
    }

    #[test]
    fn test_stages_on_solved_cube() {
        let cube = FaceCube::default();
        for stage in ALL_STAGES {
            assert!(stage.is_done(&cube), "{stage}");
        }
        let mut solver = Solver::new(&cube, SolverConfig::default());
        let reports = solver.layer_by_layer();
        assert!(reports
            .iter()
            .all(|r| r.converged && r.attempts == 0 && r.moves == 0));
        assert!(solver.solution.is_empty());
    }

    #[test]
    fn test_stage_checks_are_local() {
        // D only disturbs the bottom rows of the side faces
        let cube = scrambled("D");
        assert!(Stage::WhiteCross.is_done(&cube));
        assert!(Stage::WhiteCorners.is_done(&cube));
        assert!(Stage::MiddleLayer.is_done(&cube));
        assert!(Stage::YellowCross.is_done(&cube));
        assert!(Stage::OrientCorners.is_done(&cube));
        assert!(Stage::PermuteCorners.is_done(&cube));
        assert!(!Stage::PermuteEdges.is_done(&cube));
    }

    #[test]
    fn test_middle_layer_alternates() {
        assert_eq!(Stage::MiddleLayer.algorithm(0), &RIGHT_MIDDLE_ALG);
        assert_eq!(Stage::MiddleLayer.algorithm(1), &LEFT_MIDDLE_ALG);
        assert_eq!(Stage::MiddleLayer.algorithm(4), &RIGHT_MIDDLE_ALG);
        assert!(Stage::WhiteCross.algorithm(0).is_empty());
    }

    #[test]
    fn test_white_cross_brings_edge_up() {
        // F carries the white U7 sticker onto R3, so the first edge comes up through R
        let mut solver = Solver::new(&scrambled("F"), SolverConfig::default());
        let report = solver.run_stage(Stage::WhiteCross);
        assert!(solver.solution.starts_with(&[R, U]), "{:?}", solver.solution);
        assert!(report.attempts >= 1);
        assert!(report.attempts <= 4 * CROSS_EDGE_ATTEMPTS);
        assert_eq!(report.moves, solver.solution.len());
        assert_eq!(report.converged, Stage::WhiteCross.is_done(&solver.cube));
    }

    #[test]
    fn test_solve_facelet() {
        let cube = scrambled("B L'");
        let result = solve_facelet(&cube.to_string(), SolverConfig::default()).unwrap();
        assert_eq!(result.solution, vec![L, B3]);
        assert!(matches!(
            solve_facelet("rrr", SolverConfig::default()),
            Err(Error::InvalidFaceletString)
        ));
    }

    #[test]
    fn test_result_json() {
        let result = solve(&scrambled("U'"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["solution"], serde_json::json!(["U"]));
        assert_eq!(json["solved"], true);
        assert_eq!(json["method"], "Search");
        let back: SolveResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.solution, vec![U]);
    }
}
