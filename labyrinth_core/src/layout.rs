use alloc::vec::Vec;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Serializable description of a maze before any search has run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub size: Coord2,
    #[serde(default)]
    pub walls: Vec<Coord2>,
    pub start: Coord2,
    pub exit: Coord2,
}

impl Maze {
    pub fn from_layout(layout: &MazeLayout) -> Result<Self> {
        let (rows, cols) = layout.size;
        let mut maze = Maze::new(rows, cols);
        for &(row, col) in &layout.walls {
            maze.set_wall(row, col)?;
        }
        maze.set_start(layout.start.0, layout.start.1)?;
        maze.set_exit(layout.exit.0, layout.exit.1)?;
        Ok(maze)
    }

    /// Layout of this maze, `None` until both start and exit are set.
    pub fn layout(&self) -> Option<MazeLayout> {
        let walls = self
            .grid()
            .iter()
            .filter(|&(_, cell)| cell == MazeCell::Wall)
            .map(|(coords, _)| coords)
            .collect();

        Some(MazeLayout {
            size: self.size(),
            walls,
            start: self.start()?,
            exit: self.exit()?,
        })
    }
}

/// Parses the text maze description:
///
/// ```text
/// 3 4
/// 0 0
/// 2 3
/// _ * _ _
/// _ * _ *
/// _ _ _ _
/// ```
///
/// Header lines give the size, start and exit as `row col` pairs. Each grid
/// row holds one glyph per cell, `*` for walls and `_` or `.` for open cells.
/// Whitespace inside a row is ignored.
impl FromStr for MazeLayout {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().collect();
        let line_at = |index: usize| {
            lines
                .get(index)
                .copied()
                .ok_or(MazeError::MalformedLayout { line: index + 1 })
        };

        let size = parse_pair(line_at(0)?, 1)?;
        let start = parse_pair(line_at(1)?, 2)?;
        let exit = parse_pair(line_at(2)?, 3)?;
        let (rows, cols) = size;

        let mut walls = Vec::new();
        for row in 0..rows {
            let index = HEADER_LINES + usize::from(row);
            let line_no = index + 1;
            let glyphs = row_glyphs(line_at(index)?);
            if glyphs.len() != usize::from(cols) {
                return Err(MazeError::RaggedRow { line: line_no });
            }

            for (col, (column, glyph)) in glyphs.into_iter().enumerate() {
                match MazeCell::from_layout_glyph(glyph) {
                    Some(MazeCell::Wall) => walls.push((row, col as Coord)),
                    Some(_) => {}
                    None => {
                        return Err(MazeError::InvalidGlyph {
                            line: line_no,
                            column,
                            glyph,
                        });
                    }
                }
            }
        }

        let grid_end = HEADER_LINES + usize::from(rows);
        if let Some(extra) = lines[grid_end..]
            .iter()
            .position(|line| !line.trim().is_empty())
        {
            return Err(MazeError::MalformedLayout {
                line: grid_end + extra + 1,
            });
        }

        Ok(Self {
            size,
            walls,
            start,
            exit,
        })
    }
}

const HEADER_LINES: usize = 3;

fn parse_pair(line: &str, line_no: usize) -> Result<Coord2> {
    let mut parts = line.split_whitespace().map(Coord::from_str);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Ok((row, col)),
        _ => Err(MazeError::MalformedLayout { line: line_no }),
    }
}

/// Non-whitespace glyphs of a grid row with their 1-based columns.
fn row_glyphs(line: &str) -> Vec<(usize, char)> {
    line.chars()
        .enumerate()
        .filter(|(_, glyph)| !glyph.is_whitespace())
        .map(|(index, glyph)| (index + 1, glyph))
        .collect()
}
