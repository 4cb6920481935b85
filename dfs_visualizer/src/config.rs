// config.rs - Command-line options for the visualizer window

use std::time::Duration;

use anyhow::{Result, ensure};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dfs_grid::{DEFAULT_CELL_SIZE, DEFAULT_COLS, DEFAULT_ROWS, GridConfig};
use tracing::warn;

/// Largest grid area, in pixels along either axis, we are willing to open.
const MAX_EXTENT: f32 = 8192.0;

#[derive(Parser, Debug)]
#[command(version, about = "Step-by-step depth-first search over a paintable grid", long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Edge length of one cell in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: f32,

    /// Pause between two search steps
    #[arg(long, default_value_t = 50)]
    pub step_delay_ms: u64,

    /// Run every search to completion in a single frame
    #[arg(long)]
    pub instant: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub grid: GridConfig,
    pub cell_size: f32,
    pub step_interval: Duration,
    pub instant: bool,
}

impl Settings {
    /// Pixel size `[width, height]` of the grid area.
    pub fn grid_extent(&self) -> [f32; 2] {
        [
            self.grid.cols as f32 * self.cell_size,
            self.grid.rows as f32 * self.cell_size,
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            cell_size: DEFAULT_CELL_SIZE,
            step_interval: Duration::from_millis(50),
            instant: false,
        }
    }
}

impl Args {
    pub fn settings(&self) -> Result<Settings> {
        ensure!(
            self.cell_size.is_finite() && self.cell_size >= 2.0,
            "cell size must be at least 2 pixels, got {}",
            self.cell_size
        );

        let grid = GridConfig::new(self.rows, self.cols);
        if grid.size() != (self.rows, self.cols) {
            warn!(
                "grid {}x{} clamped to {}x{}",
                self.rows, self.cols, grid.rows, grid.cols
            );
        }

        let settings = Settings {
            grid,
            cell_size: self.cell_size,
            step_interval: Duration::from_millis(self.step_delay_ms),
            instant: self.instant,
        };

        let [width, height] = settings.grid_extent();
        ensure!(
            width <= MAX_EXTENT && height <= MAX_EXTENT,
            "grid area {width}x{height} px does not fit on screen; lower --cell-size"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dfs_visualizer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_match_the_classic_layout() {
        let settings = parse(&[]).settings().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.grid_extent(), [600.0, 600.0]);
    }

    #[test]
    fn flags_override_defaults() {
        let settings = parse(&[
            "--rows", "10", "--cols", "40", "--cell-size", "12", "--step-delay-ms", "5", "--instant",
        ])
        .settings()
        .unwrap();
        assert_eq!(settings.grid, GridConfig::new(10, 40));
        assert_eq!(settings.cell_size, 12.0);
        assert_eq!(settings.step_interval, Duration::from_millis(5));
        assert!(settings.instant);
        assert_eq!(settings.grid_extent(), [480.0, 120.0]);
    }

    #[test]
    fn oversized_dimensions_are_clamped() {
        let settings = parse(&["--rows", "0", "--cols", "1000", "--cell-size", "4"])
            .settings()
            .unwrap();
        assert_eq!(settings.grid.size(), (1, dfs_grid::MAX_DIM));
    }

    #[test]
    fn tiny_cells_are_rejected() {
        assert!(parse(&["--cell-size", "0"]).settings().is_err());
        assert!(parse(&["--cell-size", "NaN"]).settings().is_err());
    }

    #[test]
    fn huge_windows_are_rejected() {
        assert!(parse(&["--cols", "200", "--cell-size", "100"]).settings().is_err());
    }
}
