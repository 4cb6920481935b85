// session.rs - Single owner of the grid, its input controller and the search

use log::{debug, info, trace};

use crate::*;

/// Everything the host loop drives: input goes in through [`Session::handle`],
/// the search advances through [`Session::tick`], and the presenter reads
/// [`Session::grid`].
///
/// While a search is running the grid is locked: only [`Key::Cancel`] is
/// honoured.
#[derive(Clone, Debug)]
pub struct Session {
    grid: GridModel,
    controller: InputController,
    engine: DfsEngine,
    last_outcome: Option<Outcome>,
}

impl Session {
    pub fn new(config: GridConfig, cell_size: f32) -> Self {
        Self {
            grid: GridModel::new(config),
            controller: InputController::new(cell_size),
            engine: DfsEngine::new(),
            last_outcome: None,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    pub fn state(&self) -> TraversalState {
        self.engine.state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn steps(&self) -> usize {
        self.engine.steps()
    }

    /// Outcome of the last finished search, cleared by the next edit or run.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn status_text(&self) -> String {
        if self.is_running() {
            return format!("Searching... {} cells explored", self.steps());
        }
        if let Some(outcome) = self.last_outcome {
            return outcome.to_string();
        }
        match (self.grid.start(), self.grid.end()) {
            (None, _) => "Place the start cell".to_owned(),
            (Some(_), None) => "Place the end cell".to_owned(),
            (Some(_), Some(_)) => "Ready: press Enter to search".to_owned(),
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Action {
        if self.is_running() {
            return match event {
                InputEvent::KeyPressed(Key::Cancel) => {
                    self.cancel();
                    Action::Cancel
                }
                InputEvent::PointerUp => self.controller.handle(&mut self.grid, event),
                _ => {
                    trace!("{event:?} ignored while searching");
                    Action::Ignored
                }
            };
        }

        match self.controller.handle(&mut self.grid, event) {
            Action::Run => match self.begin() {
                Ok(()) => Action::Run,
                Err(_) => Action::Ignored,
            },
            Action::Edited(pos) => {
                self.last_outcome = None;
                Action::Edited(pos)
            }
            action => action,
        }
    }

    /// Direct role edit, refused while a search is running.
    pub fn set_role(&mut self, pos: Pos, role: Role) -> Result<EditOutcome> {
        self.check_editable()?;
        let outcome = self.grid.set_role(pos, role)?;
        if outcome.has_update() {
            self.last_outcome = None;
        }
        Ok(outcome)
    }

    /// Direct clear, refused while a search is running.
    pub fn clear_role(&mut self, pos: Pos) -> Result<EditOutcome> {
        self.set_role(pos, Role::Empty)
    }

    /// Starts a search; a no-op (with the reason returned) when start and
    /// end are not both placed.
    pub fn begin(&mut self) -> Result<()> {
        self.engine
            .begin(&mut self.grid)
            .inspect_err(|err| debug!("search not started: {err}"))?;
        self.last_outcome = None;
        Ok(())
    }

    /// Advances the active search by one cell.
    pub fn tick(&mut self) -> Option<Step> {
        let step = self.engine.step(&mut self.grid)?;
        if let Some(outcome) = step.state.outcome() {
            info!("{outcome} after exploring {} cells", self.engine.steps());
            self.last_outcome = Some(outcome);
        }
        Some(step)
    }

    /// Runs the active search to the end in one go.
    pub fn finish(&mut self) -> Option<Outcome> {
        while self.tick().is_some() {}
        self.engine.state().outcome()
    }

    pub fn cancel(&mut self) {
        if self.is_running() {
            info!("search cancelled");
            self.engine.cancel();
        }
    }

    fn check_editable(&self) -> Result<()> {
        if self.is_running() {
            Err(GridError::AlreadyRunning)
        } else {
            Ok(())
        }
    }
}
