use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// No search markings on the grid, configuration may change.
    Ready,
    Found,
    Exhausted,
    /// Stopped by the step budget with the partial path still marked.
    Interrupted,
}

impl SearchState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found,
    Exhausted,
    Interrupted,
}

impl SearchOutcome {
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

impl From<SearchOutcome> for SearchState {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found => Self::Found,
            SearchOutcome::Exhausted => Self::Exhausted,
            SearchOutcome::Interrupted => Self::Interrupted,
        }
    }
}

/// Bounds on a single search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of extend-or-backtrack steps, unbounded when `None`.
    pub max_steps: Option<u64>,
}

impl SearchLimits {
    pub const UNBOUNDED: Self = Self { max_steps: None };

    pub const fn with_max_steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }

    const fn allows(&self, steps: u64) -> bool {
        match self.max_steps {
            Some(max_steps) => steps < max_steps,
            None => true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub steps: u64,
    pub pushes: u64,
    pub backtracks: u64,
    pub max_depth: usize,
}

/// A maze grid together with its start, exit and the backtracking search state.
///
/// Serializes for inspection only. A maze is rebuilt through [`MazeLayout`], so
/// search markings never come back without the search that made them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Maze {
    grid: Grid,
    start: Option<Coord2>,
    exit: Option<Coord2>,
    path: PathStack,
    state: SearchState,
    stats: SearchStats,
}

impl Maze {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self {
            grid: Grid::new((rows, cols)),
            start: None,
            exit: None,
            path: PathStack::new(),
            state: Default::default(),
            stats: Default::default(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn num_rows(&self) -> Coord {
        self.grid.num_rows()
    }

    pub fn num_cols(&self) -> Coord {
        self.grid.num_cols()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<MazeCell> {
        self.grid.get(coords)
    }

    pub fn start(&self) -> Option<Coord2> {
        self.start
    }

    pub fn exit(&self) -> Option<Coord2> {
        self.exit
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Discovered route from start to exit, only present after a successful search.
    pub fn path(&self) -> Option<&[Coord2]> {
        matches!(self.state, SearchState::Found).then(|| self.path.as_slice())
    }

    /// Current contents of the path stack, including a partial path left by an
    /// interrupted search.
    pub fn path_stack(&self) -> &PathStack {
        &self.path
    }

    pub fn set_wall(&mut self, row: Coord, col: Coord) -> Result<()> {
        self.check_ready()?;
        self.grid.set((row, col), MazeCell::Wall)
    }

    pub fn set_start(&mut self, row: Coord, col: Coord) -> Result<()> {
        self.check_ready()?;
        self.start = Some(self.grid.validate_coords((row, col))?);
        Ok(())
    }

    pub fn set_exit(&mut self, row: Coord, col: Coord) -> Result<()> {
        self.check_ready()?;
        self.exit = Some(self.grid.validate_coords((row, col))?);
        Ok(())
    }

    /// Searches for a route from start to exit. On success the route stays
    /// available through [`Maze::path`] until the next [`Maze::reset`].
    pub fn find_path(&mut self) -> Result<bool> {
        self.search(SearchLimits::UNBOUNDED)
            .map(SearchOutcome::is_found)
    }

    pub fn search(&mut self, limits: SearchLimits) -> Result<SearchOutcome> {
        self.check_ready()?;
        let (start, exit) = match (self.start, self.exit) {
            (Some(start), Some(exit)) => (start, exit),
            _ => return Err(MazeError::NotConfigured),
        };
        for coords in [start, exit] {
            if self.grid.get(coords)? == MazeCell::Wall {
                return Err(MazeError::InvalidConfiguration(coords));
            }
        }

        log::debug!(
            "Searching {:?} -> {:?} in {:?} maze, limits: {:?}",
            start,
            exit,
            self.size(),
            limits
        );

        self.stats = SearchStats::default();
        self.path.clear();
        self.extend(start)?;

        let outcome = loop {
            if self.path.is_empty() {
                break SearchOutcome::Exhausted;
            }

            let current = self.path.peek()?;
            if current == exit {
                break SearchOutcome::Found;
            }

            if !limits.allows(self.stats.steps) {
                log::warn!(
                    "Search stopped after {} steps with {} cells on the path",
                    self.stats.steps,
                    self.path.len()
                );
                break SearchOutcome::Interrupted;
            }
            self.stats.steps += 1;

            match self.next_move(current) {
                Some(next) => self.extend(next)?,
                None => self.backtrack()?,
            }
        };

        self.state = outcome.into();
        log::debug!("Search finished: {:?}, {:?}", outcome, self.stats);
        Ok(outcome)
    }

    /// Clears the path and every search marking. Walls, start and exit are kept.
    pub fn reset(&mut self) {
        let cleared = self
            .grid
            .replace_all(MazeCell::is_search_marker, MazeCell::Open);
        self.path.clear();
        self.state = SearchState::Ready;
        self.stats = SearchStats::default();
        log::debug!("Maze reset, {} cells cleared", cleared);
    }

    pub fn render(&self) -> String {
        use alloc::string::ToString;
        self.to_string()
    }

    fn next_move(&self, coords: Coord2) -> Option<Coord2> {
        self.grid
            .iter_neighbors(coords)
            .find(|&pos| self.grid[pos] == MazeCell::Open)
    }

    fn extend(&mut self, coords: Coord2) -> Result<()> {
        log::trace!("push {:?}", coords);
        self.grid.set(coords, MazeCell::OnPath)?;
        self.path.push(coords);
        self.stats.pushes += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.path.len());
        Ok(())
    }

    fn backtrack(&mut self) -> Result<()> {
        let dead_end = self.path.pop()?;
        log::trace!("pop {:?}", dead_end);
        self.grid.set(dead_end, MazeCell::Tried)?;
        self.stats.backtracks += 1;
        Ok(())
    }

    fn check_ready(&self) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(MazeError::AlreadySearched)
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.grid.rows().enumerate() {
            if row_index > 0 {
                f.write_str("\n")?;
            }
            for (col_index, cell) in row.enumerate() {
                if col_index > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn maze(size: Coord2, walls: &[Coord2], start: Coord2, exit: Coord2) -> Maze {
        let mut maze = Maze::new(size.0, size.1);
        for &(row, col) in walls {
            maze.set_wall(row, col).unwrap();
        }
        maze.set_start(start.0, start.1).unwrap();
        maze.set_exit(exit.0, exit.1).unwrap();
        maze
    }

    fn assert_valid_route(maze: &Maze) {
        let path = maze.path().expect("route should be retained");
        assert_eq!(path.first().copied(), maze.start());
        assert_eq!(path.last().copied(), maze.exit());
        for step in path.windows(2) {
            assert!(is_adjacent(step[0], step[1]), "{:?} is not a step", step);
        }
        for &coords in path {
            assert_ne!(maze.cell_at(coords).unwrap(), MazeCell::Wall);
        }
    }

    #[test]
    fn open_grid_finds_route_to_far_corner() {
        let mut maze = maze((3, 3), &[], (0, 0), (2, 2));

        assert!(maze.find_path().unwrap());

        assert_valid_route(&maze);
        assert_eq!(
            maze.path().unwrap(),
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
        assert_eq!(maze.state(), SearchState::Found);
        assert_eq!(maze.stats().backtracks, 0);
        assert_eq!(maze.stats().steps, 8);
    }

    #[test]
    fn walled_column_blocks_every_route() {
        let mut maze = maze((3, 3), &[(0, 1), (1, 1), (2, 1)], (0, 0), (0, 2));

        assert!(!maze.find_path().unwrap());

        assert_eq!(maze.state(), SearchState::Exhausted);
        assert_eq!(maze.path(), None);
        assert!(maze.path_stack().is_empty());
        assert_eq!(maze.grid().count(MazeCell::OnPath), 0);
        for coords in [(0, 0), (1, 0), (2, 0)] {
            assert_eq!(maze.cell_at(coords).unwrap(), MazeCell::Tried);
        }
        for coords in [(0, 2), (1, 2), (2, 2)] {
            assert_eq!(maze.cell_at(coords).unwrap(), MazeCell::Open);
        }
        assert_eq!(maze.stats().backtracks, 3);
    }

    #[test]
    fn enclosed_exit_marks_reachable_region_tried() {
        let walls = [(1, 3), (2, 2), (3, 3), (2, 4)];
        let mut maze = maze((5, 5), &walls, (0, 0), (2, 3));

        assert!(!maze.find_path().unwrap());

        assert_eq!(maze.grid().count(MazeCell::OnPath), 0);
        assert_eq!(maze.grid().count(MazeCell::Tried), 25 - walls.len() - 1);
        assert_eq!(maze.cell_at((2, 3)).unwrap(), MazeCell::Open);
    }

    #[test]
    fn right_neighbor_is_tried_first() {
        let mut maze = maze((3, 3), &[], (1, 1), (2, 2));

        assert!(maze.find_path().unwrap());

        assert_eq!(maze.path().unwrap(), &[(1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn column_moves_are_tried_before_row_moves() {
        let mut maze = maze((3, 3), &[(1, 1), (2, 1)], (0, 0), (2, 2));

        assert!(maze.find_path().unwrap());

        assert_eq!(
            maze.path().unwrap(),
            &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
        );
        assert_eq!(maze.render(), "x x x\n_ * x\n_ * x");
        assert_eq!(maze.stats().backtracks, 0);
    }

    #[test]
    fn dead_ends_are_backtracked_and_marked_tried() {
        let mut maze = maze((3, 3), &[(1, 1), (1, 2)], (0, 0), (2, 2));

        assert!(maze.find_path().unwrap());

        assert_valid_route(&maze);
        assert_eq!(
            maze.path().unwrap(),
            &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]
        );
        assert_eq!(maze.render(), "x o o\nx * *\nx x x");
        assert_eq!(maze.stats().backtracks, 2);
    }

    #[test]
    fn start_equal_to_exit_is_single_cell_route() {
        let mut maze = maze((2, 2), &[], (1, 1), (1, 1));

        assert!(maze.find_path().unwrap());

        assert_eq!(maze.path().unwrap(), &[(1, 1)]);
        assert_eq!(maze.stats().steps, 0);
    }

    #[test]
    fn search_is_deterministic_across_resets() {
        let walls = [(0, 1), (1, 1), (1, 3), (2, 3), (3, 1), (3, 2), (3, 3)];
        let mut maze = maze((5, 5), &walls, (0, 0), (4, 4));

        assert!(maze.find_path().unwrap());
        assert_valid_route(&maze);
        let first: Vec<_> = maze.path().unwrap().to_vec();
        let first_render = maze.render();

        maze.reset();
        assert!(maze.find_path().unwrap());

        assert_eq!(maze.path().unwrap(), first.as_slice());
        assert_eq!(maze.render(), first_render);
    }

    #[test]
    fn reset_clears_markings_and_is_idempotent() {
        let mut maze = maze((3, 3), &[(1, 1), (1, 2)], (0, 0), (2, 2));
        maze.find_path().unwrap();
        assert!(maze.render().contains('o'));

        maze.reset();
        let once = maze.clone();
        maze.reset();

        assert_eq!(maze, once);
        let rendered = maze.render();
        assert!(!rendered.contains('x'));
        assert!(!rendered.contains('o'));
        assert_eq!(rendered, "_ _ _\n_ * *\n_ _ _");
        assert_eq!(maze.state(), SearchState::Ready);
        assert_eq!(maze.path(), None);
        assert_eq!(maze.start(), Some((0, 0)));
        assert_eq!(maze.exit(), Some((2, 2)));
    }

    #[test]
    fn setters_enforce_bounds_without_modifying_grid() {
        let mut maze = Maze::new(3, 3);
        maze.set_wall(1, 1).unwrap();
        let before = maze.render();

        assert_eq!(maze.set_wall(3, 0), Err(MazeError::OutOfBounds((3, 0))));
        assert_eq!(maze.set_wall(0, 3), Err(MazeError::OutOfBounds((0, 3))));
        assert_eq!(maze.set_start(5, 0), Err(MazeError::OutOfBounds((5, 0))));
        assert_eq!(maze.set_exit(0, 9), Err(MazeError::OutOfBounds((0, 9))));

        assert_eq!(maze.render(), before);
        assert_eq!(maze.start(), None);
        assert_eq!(maze.exit(), None);
    }

    #[test]
    fn search_requires_start_and_exit() {
        let mut maze = Maze::new(2, 2);
        assert_eq!(maze.find_path(), Err(MazeError::NotConfigured));

        maze.set_start(0, 0).unwrap();
        assert_eq!(maze.find_path(), Err(MazeError::NotConfigured));
        assert_eq!(maze.state(), SearchState::Ready);
    }

    #[test]
    fn walled_endpoints_are_rejected() {
        let mut maze = maze((2, 2), &[(1, 1)], (0, 0), (1, 1));

        assert_eq!(
            maze.find_path(),
            Err(MazeError::InvalidConfiguration((1, 1)))
        );
        assert_eq!(maze.state(), SearchState::Ready);
        assert_eq!(maze.grid().count(MazeCell::OnPath), 0);
    }

    #[test]
    fn searched_maze_must_be_reset_before_reuse() {
        let mut maze = maze((2, 2), &[], (0, 0), (1, 1));
        assert!(maze.find_path().unwrap());

        assert_eq!(maze.find_path(), Err(MazeError::AlreadySearched));
        assert_eq!(maze.set_wall(0, 1), Err(MazeError::AlreadySearched));
        assert_eq!(maze.set_start(1, 0), Err(MazeError::AlreadySearched));

        maze.reset();
        maze.set_wall(0, 1).unwrap();
        assert!(maze.find_path().unwrap());
        assert_eq!(maze.path().unwrap(), &[(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn step_budget_interrupts_search() {
        let mut maze = maze((3, 3), &[], (0, 0), (2, 2));

        let outcome = maze.search(SearchLimits::with_max_steps(3)).unwrap();

        assert_eq!(outcome, SearchOutcome::Interrupted);
        assert_eq!(maze.state(), SearchState::Interrupted);
        assert_eq!(maze.path(), None);
        assert_eq!(
            maze.path_stack().as_slice(),
            &[(0, 0), (0, 1), (0, 2), (1, 2)]
        );
        assert_eq!(maze.find_path(), Err(MazeError::AlreadySearched));

        maze.reset();
        assert!(maze.find_path().unwrap());
    }

    #[test]
    fn zero_budget_still_accepts_start_at_exit() {
        let mut maze = maze((1, 1), &[], (0, 0), (0, 0));

        let outcome = maze.search(SearchLimits::with_max_steps(0)).unwrap();

        assert_eq!(outcome, SearchOutcome::Found);
    }

    #[test]
    fn render_uses_cell_glyphs_without_trailing_separators() {
        let mut maze = Maze::new(2, 3);
        maze.set_wall(0, 1).unwrap();

        assert_eq!(maze.render(), "_ * _\n_ _ _");
        assert_eq!(alloc::format!("{maze}"), maze.render());
    }

    #[test]
    fn searched_maze_is_rebuilt_from_its_layout() {
        let mut maze = maze((3, 3), &[(1, 1), (1, 2)], (0, 0), (2, 2));
        maze.find_path().unwrap();

        let json = serde_json::to_string(&maze.layout().unwrap()).unwrap();
        let layout: MazeLayout = serde_json::from_str(&json).unwrap();
        let mut rebuilt = Maze::from_layout(&layout).unwrap();

        assert_eq!(rebuilt.state(), SearchState::Ready);
        assert_eq!(rebuilt.render(), "_ _ _\n_ * *\n_ _ _");
        assert!(rebuilt.find_path().unwrap());
        assert_eq!(rebuilt.path(), maze.path());
    }
}
