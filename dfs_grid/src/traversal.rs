// traversal.rs - Incremental depth-first search over a GridModel

use core::fmt;
use log::{debug, trace};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TraversalState {
    #[default]
    Idle,
    Running,
    Found,
    Exhausted,
}

impl TraversalState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Found => Some(Outcome::Found),
            Self::Exhausted => Some(Outcome::Exhausted),
            Self::Idle | Self::Running => None,
        }
    }
}

/// Terminal result of a search. No path is reconstructed; the explored
/// trail left on the grid is the only other output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Exhausted,
}

impl From<Outcome> for TraversalState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Found => Self::Found,
            Outcome::Exhausted => Self::Exhausted,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "path found",
            Self::Exhausted => "no path found",
        })
    }
}

/// What a single step changed on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Cell popped from the frontier.
    pub explored: Pos,
    /// Neighbors pushed this step, in push order.
    pub discovered: Vec<Pos>,
    /// Engine state after the step.
    pub state: TraversalState,
}

/// Depth-first search as an explicit state machine.
///
/// The engine owns only the frontier; the grid is lent to it for every call
/// so the host loop can render between steps. Callers must not edit the
/// grid while a run is active.
#[derive(Clone, Debug, Default)]
pub struct DfsEngine {
    frontier: Vec<Pos>,
    target: Option<Pos>,
    state: TraversalState,
    steps: usize,
}

impl DfsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Pending cells, the next one to be explored last.
    pub fn frontier(&self) -> &[Pos] {
        &self.frontier
    }

    /// Cells popped so far in the current or last run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Starts a fresh run from the grid's start cell.
    ///
    /// Requires both endpoints; on failure the engine keeps its state and
    /// the grid is untouched.
    pub fn begin(&mut self, grid: &mut GridModel) -> Result<()> {
        if self.state.is_running() {
            return Err(GridError::AlreadyRunning);
        }

        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return Err(GridError::MissingEndpoints);
        };
        if start == end {
            return Err(GridError::EndpointsCoincide);
        }

        grid.reset_visitation();
        self.frontier.clear();
        self.frontier.push(start);
        grid.mark_discovered(start);

        self.target = Some(end);
        self.steps = 0;
        self.state = TraversalState::Running;

        debug!("search started from {start:?} towards {end:?}");
        Ok(())
    }

    /// Pops one cell and pushes its unvisited passable neighbors.
    ///
    /// Returns `None` when no run is active.
    pub fn step(&mut self, grid: &mut GridModel) -> Option<Step> {
        if !self.state.is_running() {
            return None;
        }

        let Some(current) = self.frontier.pop() else {
            self.finish(Outcome::Exhausted);
            return None;
        };

        grid.mark_explored(current);
        self.steps += 1;

        if Some(current) == self.target {
            self.finish(Outcome::Found);
            return Some(Step {
                explored: current,
                discovered: Vec::new(),
                state: self.state,
            });
        }

        // Neighbors are distinct, so filtering before marking cannot admit a
        // cell twice.
        let discovered: Vec<Pos> = grid
            .iter_neighbors(current)
            .filter(|&pos| !grid.is_visited(pos) && grid.is_passable(pos))
            .collect();

        for &pos in &discovered {
            grid.mark_discovered(pos);
            self.frontier.push(pos);
        }

        trace!(
            "explored {current:?}, pushed {discovered:?}, frontier size {}",
            self.frontier.len()
        );

        if self.frontier.is_empty() {
            self.finish(Outcome::Exhausted);
        }

        Some(Step {
            explored: current,
            discovered,
            state: self.state,
        })
    }

    /// Steps until the run ends. Returns `None` if no run was active.
    pub fn run_to_completion(&mut self, grid: &mut GridModel) -> Option<Outcome> {
        while self.step(grid).is_some() {}
        self.state.outcome()
    }

    /// Drops the frontier and returns to Idle. Flags already written to the
    /// grid stay in place.
    pub fn cancel(&mut self) {
        if self.state.is_running() {
            debug!("search cancelled after {} steps", self.steps);
        }
        self.frontier.clear();
        self.target = None;
        self.state = TraversalState::Idle;
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!("search finished after {} steps: {outcome}", self.steps);
        self.frontier.clear();
        self.target = None;
        self.state = outcome.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: Coord, cols: Coord, start: Pos, end: Pos, obstacles: &[Pos]) -> GridModel {
        let mut grid = GridModel::new(GridConfig::new(rows, cols));
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();
        for &pos in obstacles {
            grid.set_role(pos, Role::Obstacle).unwrap();
        }
        grid
    }

    fn explored_order(grid: &mut GridModel) -> (Vec<Pos>, Option<Outcome>) {
        let mut engine = DfsEngine::new();
        engine.begin(grid).unwrap();
        let mut order = Vec::new();
        while let Some(step) = engine.step(grid) {
            order.push(step.explored);
        }
        (order, engine.state().outcome())
    }

    #[test]
    fn begin_requires_both_endpoints() {
        let mut grid = GridModel::new(GridConfig::new(3, 3));
        let mut engine = DfsEngine::new();
        assert_eq!(engine.begin(&mut grid), Err(GridError::MissingEndpoints));

        grid.set_role((0, 0), Role::Start).unwrap();
        assert_eq!(engine.begin(&mut grid), Err(GridError::MissingEndpoints));
        assert!(engine.state().is_idle());
        assert!(!grid.is_visited((0, 0)));
        assert!(engine.step(&mut grid).is_none());
    }

    #[test]
    fn begin_twice_is_rejected() {
        let mut grid = grid_with(3, 3, (0, 0), (2, 2), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();
        assert_eq!(engine.begin(&mut grid), Err(GridError::AlreadyRunning));
        assert_eq!(engine.frontier(), &[(0, 0)]);
    }

    #[test]
    fn begin_seeds_the_frontier_with_start() {
        let mut grid = grid_with(3, 3, (1, 1), (2, 2), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();
        assert!(engine.is_running());
        assert_eq!(engine.frontier(), &[(1, 1)]);
        assert!(grid.is_visited((1, 1)));
        assert_eq!(grid.display_role((1, 1)), Some(DisplayRole::Start));
    }

    #[test]
    fn first_step_pushes_in_right_down_left_up_order() {
        let mut grid = grid_with(3, 3, (1, 1), (0, 0), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();

        let step = engine.step(&mut grid).unwrap();
        assert_eq!(step.explored, (1, 1));
        assert_eq!(step.discovered, vec![(1, 2), (2, 1), (1, 0), (0, 1)]);
        assert_eq!(step.state, TraversalState::Running);
        assert_eq!(engine.frontier().last(), Some(&(0, 1)));

        assert_eq!(grid.display_role((1, 2)), Some(DisplayRole::Frontier));
        assert_eq!(grid.display_role((1, 1)), Some(DisplayRole::Start));
    }

    #[test]
    fn last_pushed_neighbor_is_explored_next() {
        let mut grid = grid_with(3, 3, (1, 1), (0, 0), &[]);
        let (order, outcome) = explored_order(&mut grid);
        assert_eq!(order, vec![(1, 1), (0, 1), (0, 0)]);
        assert_eq!(outcome, Some(Outcome::Found));
    }

    #[test]
    fn end_is_shown_as_end_while_queued() {
        let mut grid = grid_with(1, 3, (0, 0), (0, 1), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();
        engine.step(&mut grid).unwrap();
        assert!(grid[(0, 1)].frontier);
        assert_eq!(grid.display_role((0, 1)), Some(DisplayRole::End));

        let step = engine.step(&mut grid).unwrap();
        assert_eq!(step.state, TraversalState::Found);
        assert_eq!(grid.display_role((0, 1)), Some(DisplayRole::Explored));
    }

    #[test]
    fn enclosed_start_is_exhausted() {
        let mut grid = grid_with(3, 3, (0, 0), (2, 2), &[(0, 1), (1, 0)]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();

        let step = engine.step(&mut grid).unwrap();
        assert!(step.discovered.is_empty());
        assert_eq!(step.state, TraversalState::Exhausted);
        assert!(engine.step(&mut grid).is_none());
        assert_eq!(engine.steps(), 1);
    }

    #[test]
    fn cancel_keeps_the_trail() {
        let mut grid = grid_with(5, 5, (0, 0), (4, 4), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();
        engine.step(&mut grid).unwrap();
        engine.step(&mut grid).unwrap();

        engine.cancel();
        assert!(engine.state().is_idle());
        assert!(engine.frontier().is_empty());
        assert!(engine.step(&mut grid).is_none());
        assert_eq!(grid.explored_count(), 2);
        assert!(grid.frontier_count() > 0);
    }

    #[test]
    fn new_run_clears_the_previous_trail() {
        let mut grid = grid_with(5, 5, (0, 0), (4, 4), &[]);
        let mut engine = DfsEngine::new();
        engine.begin(&mut grid).unwrap();
        assert_eq!(engine.run_to_completion(&mut grid), Some(Outcome::Found));
        assert!(grid.explored_count() > 0);

        engine.begin(&mut grid).unwrap();
        assert_eq!(grid.explored_count(), 0);
        assert_eq!(grid.frontier_count(), 1);
    }

    #[test]
    fn outcome_text() {
        assert_eq!(Outcome::Found.to_string(), "path found");
        assert_eq!(Outcome::Exhausted.to_string(), "no path found");
    }
}
