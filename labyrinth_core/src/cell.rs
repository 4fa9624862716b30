use serde::{Deserialize, Serialize};

/// State of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeCell {
    Open,
    Wall,
    OnPath,
    Tried,
}

impl MazeCell {
    pub const WALL_GLYPH: char = '*';
    pub const PATH_GLYPH: char = 'x';
    pub const TRIED_GLYPH: char = 'o';
    pub const OPEN_GLYPH: char = '_';

    pub const fn glyph(self) -> char {
        match self {
            Self::Open => Self::OPEN_GLYPH,
            Self::Wall => Self::WALL_GLYPH,
            Self::OnPath => Self::PATH_GLYPH,
            Self::Tried => Self::TRIED_GLYPH,
        }
    }

    /// Cell for a glyph in a maze description. Only walls and open cells are
    /// accepted, search markers never appear in a layout.
    pub const fn from_layout_glyph(glyph: char) -> Option<Self> {
        match glyph {
            Self::WALL_GLYPH => Some(Self::Wall),
            Self::OPEN_GLYPH | '.' => Some(Self::Open),
            _ => None,
        }
    }

    pub const fn is_search_marker(self) -> bool {
        matches!(self, Self::OnPath | Self::Tried)
    }
}

impl Default for MazeCell {
    fn default() -> Self {
        Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_glyphs_reject_search_markers() {
        assert_eq!(MazeCell::from_layout_glyph('*'), Some(MazeCell::Wall));
        assert_eq!(MazeCell::from_layout_glyph('.'), Some(MazeCell::Open));
        assert_eq!(MazeCell::from_layout_glyph('x'), None);
        assert_eq!(MazeCell::from_layout_glyph('o'), None);
    }
}
