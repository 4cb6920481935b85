// input.rs - Pointer and key events translated into grid edits

use log::debug;

use crate::*;

/// Default cell edge in pixels: a 600 px grid area split into 20 cells.
pub const DEFAULT_CELL_SIZE: f32 = 30.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Places start, then end, then toggles obstacles.
    Paint,
    /// Clears whatever the cell holds.
    Erase,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Run,
    Cancel,
}

/// Raw input in grid-local pixels (origin at the top-left grid corner).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerDrag { x: f32, y: f32, button: PointerButton },
    PointerUp,
    KeyPressed(Key),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Edited(Pos),
    Run,
    Cancel,
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputController {
    cell_size: f32,
    /// Last cell touched by the held pointer, so a drag edits each cell once.
    stroke: Option<Pos>,
}

impl InputController {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            stroke: None,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Pixel extent `(width, height)` of `grid` at this cell size.
    pub fn extent(&self, grid: &GridModel) -> (f32, f32) {
        (
            grid.cols() as f32 * self.cell_size,
            grid.rows() as f32 * self.cell_size,
        )
    }

    /// Maps a grid-local pixel position to `(row, col)`.
    pub fn cell_at(&self, grid: &GridModel, x: f32, y: f32) -> Option<Pos> {
        // Also rejects NaN.
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }

        let pos = ((y / self.cell_size) as Coord, (x / self.cell_size) as Coord);
        grid.contains(pos).then_some(pos)
    }

    pub fn handle(&mut self, grid: &mut GridModel, event: InputEvent) -> Action {
        match event {
            InputEvent::KeyPressed(Key::Run) => Action::Run,
            InputEvent::KeyPressed(Key::Cancel) => Action::Cancel,
            InputEvent::PointerUp => {
                self.stroke = None;
                Action::Ignored
            }
            InputEvent::PointerDown { x, y, button } => {
                let Some(pos) = self.cell_at(grid, x, y) else {
                    self.stroke = None;
                    return Action::Ignored;
                };
                self.stroke = Some(pos);

                let result = match button {
                    PointerButton::Paint => Self::paint(grid, pos),
                    PointerButton::Erase => grid.clear_role(pos),
                };
                Self::to_action(pos, result)
            }
            InputEvent::PointerDrag { x, y, button } => {
                let Some(pos) = self.cell_at(grid, x, y) else {
                    return Action::Ignored;
                };
                if self.stroke == Some(pos) {
                    return Action::Ignored;
                }
                self.stroke = Some(pos);

                let result = match button {
                    PointerButton::Paint => Self::paint_over(grid, pos),
                    PointerButton::Erase => grid.clear_role(pos),
                };
                Self::to_action(pos, result)
            }
        }
    }

    /// A fresh press: start if missing, then end, then toggle an obstacle.
    fn paint(grid: &mut GridModel, pos: Pos) -> Result<EditOutcome> {
        if grid.start().is_none() {
            return grid.set_role(pos, Role::Start);
        }
        if grid.end().is_none() {
            return grid.set_role(pos, Role::End);
        }

        match grid[pos].role {
            Role::Obstacle => grid.clear_role(pos),
            _ => grid.set_role(pos, Role::Obstacle),
        }
    }

    /// Dragging only lays obstacles on empty cells.
    fn paint_over(grid: &mut GridModel, pos: Pos) -> Result<EditOutcome> {
        match grid[pos].role {
            Role::Empty => grid.set_role(pos, Role::Obstacle),
            _ => Ok(EditOutcome::NoChange),
        }
    }

    fn to_action(pos: Pos, result: Result<EditOutcome>) -> Action {
        match result {
            Ok(outcome) if outcome.has_update() => Action::Edited(pos),
            Ok(_) => Action::Ignored,
            Err(err) => {
                debug!("edit at {pos:?} ignored: {err}");
                Action::Ignored
            }
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}
