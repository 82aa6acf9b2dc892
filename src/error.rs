use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid move token `{0}`")]
    InvalidMove(String),
    #[error("invalid facelet string, expected 54 characters from `rogbwy`")]
    InvalidFaceletString,
    #[error("invalid facelet value, each color must appear 9 times with one center per face")]
    InvalidFaceletValue,
}
