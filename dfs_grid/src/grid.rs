// grid.rs - Cell roles and the grid model the search runs over

use core::ops::Index;
use ndarray::Array2;

use crate::*;

pub const DEFAULT_ROWS: Coord = 20;
pub const DEFAULT_COLS: Coord = 20;
pub const MAX_DIM: Coord = 200;

/// Logical role painted onto a cell by the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Empty,
    Obstacle,
    Start,
    End,
}

/// What a cell looks like on screen, derived from its role and search flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisplayRole {
    Empty,
    Obstacle,
    Start,
    End,
    Frontier,
    Explored,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub role: Role,
    /// Set when the cell is pushed onto the frontier.
    pub visited: bool,
    /// Pushed and not yet popped.
    pub frontier: bool,
}

impl Cell {
    pub const fn is_explored(self) -> bool {
        self.visited && !self.frontier
    }

    pub const fn display_role(self) -> DisplayRole {
        match self.role {
            Role::Start => DisplayRole::Start,
            Role::Obstacle => DisplayRole::Obstacle,
            Role::End if self.is_explored() => DisplayRole::Explored,
            Role::End => DisplayRole::End,
            Role::Empty if self.frontier => DisplayRole::Frontier,
            Role::Empty if self.visited => DisplayRole::Explored,
            Role::Empty => DisplayRole::Empty,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self::new_unchecked(rows.clamp(1, MAX_DIM), cols.clamp(1, MAX_DIM))
    }

    pub const fn size(&self) -> Pos {
        (self.rows, self.cols)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NoChange,
    Changed,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// The ROWS×COLS grid: every cell's role and visitation flags, plus the
/// tracked start and end positions.
#[derive(Clone, Debug, PartialEq)]
pub struct GridModel {
    cells: Array2<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl GridModel {
    /// Allocates the grid and puts it in its startup state via [`GridModel::reset`].
    pub fn new(config: GridConfig) -> Self {
        let mut grid = Self {
            cells: Array2::default(config.size()),
            start: None,
            end: None,
        };
        grid.reset();
        grid
    }

    /// Every cell back to Empty with no trail; start and end cleared.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.start = None;
        self.end = None;
    }

    pub fn rows(&self) -> Coord {
        self.cells.nrows()
    }

    pub fn cols(&self) -> Coord {
        self.cells.ncols()
    }

    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    pub fn contains(&self, (row, col): Pos) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GridError::OutOfBounds)
        }
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    pub fn display_role(&self, pos: Pos) -> Option<DisplayRole> {
        self.cell(pos).map(Cell::display_role)
    }

    /// Out-of-bounds positions are never passable.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell(pos)
            .is_some_and(|cell| cell.role != Role::Obstacle)
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.visited)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells.indexed_iter().map(|(pos, &cell)| (pos, cell))
    }

    pub fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        self.cells.iter_neighbors(pos)
    }

    pub fn explored_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_explored()).count()
    }

    pub fn frontier_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.frontier).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.role == Role::Obstacle)
            .count()
    }

    /// Assigns `role` to the cell at `pos`.
    ///
    /// Start and End are only placed once each and never on an obstacle or
    /// on each other; obstacles never replace Start or End. Assigning
    /// [`Role::Empty`] is the same as [`GridModel::clear_role`].
    pub fn set_role(&mut self, pos: Pos, role: Role) -> Result<EditOutcome> {
        let pos = self.validate(pos)?;

        match role {
            Role::Empty => return self.clear_role(pos),
            Role::Start => {
                if self.start.is_some() {
                    return Err(GridError::StartAlreadySet);
                }
                self.check_free_for_endpoint(pos)?;
                self.start = Some(pos);
            }
            Role::End => {
                if self.end.is_some() {
                    return Err(GridError::EndAlreadySet);
                }
                self.check_free_for_endpoint(pos)?;
                self.end = Some(pos);
            }
            Role::Obstacle => match self[pos].role {
                Role::Start => return Err(GridError::OccupiedByStart),
                Role::End => return Err(GridError::OccupiedByEnd),
                Role::Obstacle => return Ok(EditOutcome::NoChange),
                Role::Empty => {}
            },
        }

        self.cells[pos] = Cell {
            role,
            ..Cell::default()
        };
        Ok(EditOutcome::Changed)
    }

    /// Resets the cell at `pos` to Empty, releasing Start/End if it held one.
    pub fn clear_role(&mut self, pos: Pos) -> Result<EditOutcome> {
        let pos = self.validate(pos)?;

        if self[pos].role == Role::Empty {
            return Ok(EditOutcome::NoChange);
        }

        if self.start == Some(pos) {
            self.start = None;
        } else if self.end == Some(pos) {
            self.end = None;
        }

        self.cells[pos] = Cell::default();
        Ok(EditOutcome::Changed)
    }

    /// Clears `visited` and `frontier` on every cell.
    pub fn reset_visitation(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.visited = false;
            cell.frontier = false;
        }
    }

    pub(crate) fn mark_discovered(&mut self, pos: Pos) {
        let cell = &mut self.cells[pos];
        cell.visited = true;
        cell.frontier = true;
    }

    pub(crate) fn mark_explored(&mut self, pos: Pos) {
        self.cells[pos].frontier = false;
    }

    fn check_free_for_endpoint(&self, pos: Pos) -> Result<()> {
        match self[pos].role {
            Role::Empty => Ok(()),
            Role::Obstacle => Err(GridError::OccupiedByObstacle),
            Role::Start => Err(GridError::OccupiedByStart),
            Role::End => Err(GridError::OccupiedByEnd),
        }
    }
}

impl Index<Pos> for GridModel {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos]
    }
}
