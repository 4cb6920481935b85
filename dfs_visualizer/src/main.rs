// main.rs - Depth-first search visualizer
// Paint start, end and walls, then watch the search unfold one cell per tick

use anyhow::{Result, anyhow};
use clap::Parser;
use dfs_grid::{Action, InputEvent, Session};
use eframe::egui;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod config; // Command-line options
mod ui;     // eframe::App impl and cell drawing

use config::{Args, Settings};

const TITLE: &str = "DFS Visualizer";

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let settings = args.settings()?;
    let [width, height] = settings.grid_extent();
    info!(
        "{}x{} grid, {} px cells, {:?} per step",
        settings.grid.rows, settings.grid.cols, settings.cell_size, settings.step_interval
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([width.max(480.0) + 32.0, height + 190.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Box::new(DfsVisualizer::new(settings))),
    )
    .map_err(|err| anyhow!("visualizer window failed: {err}"))
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(args.verbose.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Window state around the search session.
pub struct DfsVisualizer {
    session: Session,

    pub step_interval: Duration,
    pub instant: bool,
    pub last_step: Instant,
}

impl DfsVisualizer {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(settings.grid, settings.cell_size),
            step_interval: settings.step_interval,
            instant: settings.instant,
            last_step: Instant::now(),
        }
    }

    /// Feeds one input event to the session; a started search restarts the
    /// step clock.
    pub fn handle(&mut self, event: InputEvent) -> Action {
        let action = self.session.handle(event);
        if action == Action::Run {
            self.last_step = Instant::now();
        }
        action
    }

    /// Advances the running search when its step interval has elapsed.
    pub fn advance(&mut self) {
        if !self.session.is_running() {
            return;
        }

        if self.instant {
            self.session.finish();
        } else if self.last_step.elapsed() >= self.step_interval {
            self.session.tick();
            self.last_step = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfs_grid::{GridConfig, Key, Outcome, Role};

    fn visualizer(instant: bool, step_interval: Duration) -> DfsVisualizer {
        let mut app = DfsVisualizer::new(Settings {
            grid: GridConfig::new(4, 4),
            cell_size: 10.0,
            step_interval,
            instant,
        });
        app.session.set_role((0, 0), Role::Start).unwrap();
        app.session.set_role((3, 3), Role::End).unwrap();
        app
    }

    #[test]
    fn instant_mode_finishes_in_one_advance() {
        let mut app = visualizer(true, Duration::from_secs(60));
        assert_eq!(app.handle(InputEvent::KeyPressed(Key::Run)), Action::Run);
        app.advance();
        assert!(!app.session.is_running());
        assert_eq!(app.session.last_outcome(), Some(Outcome::Found));
    }

    #[test]
    fn steps_wait_for_the_interval() {
        let mut app = visualizer(false, Duration::from_secs(60));
        app.handle(InputEvent::KeyPressed(Key::Run));
        app.advance();
        assert_eq!(app.session.steps(), 0);

        app.step_interval = Duration::ZERO;
        app.advance();
        app.advance();
        assert_eq!(app.session.steps(), 2);
        assert!(app.session.is_running());
    }
}
