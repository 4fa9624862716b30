use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Cell {0:?} lies outside the maze")]
    OutOfBounds(Coord2),
    #[error("Start and exit must both be set before searching")]
    NotConfigured,
    #[error("Start or exit cell {0:?} is a wall")]
    InvalidConfiguration(Coord2),
    #[error("Path stack is empty")]
    EmptyStack,
    #[error("Maze already searched, reset it first")]
    AlreadySearched,
    #[error("Unknown glyph {glyph:?} on line {line}, column {column}")]
    InvalidGlyph {
        line: usize,
        column: usize,
        glyph: char,
    },
    #[error("Malformed maze description on line {line}")]
    MalformedLayout { line: usize },
    #[error("Row on line {line} does not match the declared width")]
    RaggedRow { line: usize },
}

pub type Result<T> = core::result::Result<T, MazeError>;
