/// Number of faces.
pub const N_FACE: usize = 6;
/// Number of stickers on a face.
pub const N_STICKER: usize = 9;
/// Number of stickers on the whole cube.
pub const N_FACELET: usize = N_FACE * N_STICKER;
/// Number of quarter-turn moves.
pub const N_MOVE: usize = 12;

/// Index of the center sticker on every face.
pub const CENTER: usize = 4;
/// Corner and edge sticker indices of a face.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

/// Flat string of the solved cube, faces F, B, L, R, U, D.
pub const SOLVED_FACELETS: &str =
    "rrrrrrrrrooooooooogggggggggbbbbbbbbbwwwwwwwwwyyyyyyyyy";

/// Default scramble length.
pub const SCRAMBLE_LENGTH: usize = 25;

/// Breadth-first search bounds.
pub const MAX_DEPTH: usize = 8;
pub const MAX_STATES: usize = 2_000_000;

/// Attempt ceilings of the layer-by-layer stages.
pub const CROSS_EDGE_ATTEMPTS: usize = 8;
pub const WHITE_CORNER_ATTEMPTS: usize = 20;
pub const MIDDLE_LAYER_ATTEMPTS: usize = 15;
pub const YELLOW_CROSS_ATTEMPTS: usize = 4;
pub const ORIENT_CORNER_ATTEMPTS: usize = 8;
pub const PERMUTE_CORNER_ATTEMPTS: usize = 4;
pub const PERMUTE_EDGE_ATTEMPTS: usize = 6;
