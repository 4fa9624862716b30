use labyrinth_core::{Coord2, Maze, SearchOutcome, SearchStats};
use serde::Serialize;

/// Result of a solve run, printed as text or JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub found: bool,
    pub outcome: SearchOutcome,
    pub path: Vec<Coord2>,
    pub stats: SearchStats,
    pub rendering: String,
}

impl SolveReport {
    pub fn new(maze: &Maze, outcome: SearchOutcome) -> Self {
        Self {
            found: outcome.is_found(),
            outcome,
            path: maze.path_stack().as_slice().to_vec(),
            stats: maze.stats(),
            rendering: maze.render(),
        }
    }

    pub fn summary(&self) -> String {
        match self.outcome {
            SearchOutcome::Found => format!(
                "Path found: {} cells, {} steps, {} backtracks",
                self.path.len(),
                self.stats.steps,
                self.stats.backtracks
            ),
            SearchOutcome::Exhausted => format!(
                "No path exists, {} cells tried in {} steps",
                self.stats.backtracks, self.stats.steps
            ),
            SearchOutcome::Interrupted => format!(
                "Search stopped after {} steps, {} cells on the partial path",
                self.stats.steps,
                self.path.len()
            ),
        }
    }
}
