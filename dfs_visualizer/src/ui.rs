// ui.rs - Draws the grid every frame and turns egui input into grid events

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Vec2};
use std::time::Duration;

use crate::DfsVisualizer;
use dfs_grid::{DisplayRole, InputEvent, Key, PointerButton, Pos};

/// Background showing through the 1 px gap between cells.
pub const GRIDLINE_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

const LEGEND: [(DisplayRole, &str); 6] = [
    (DisplayRole::Start, "Start"),
    (DisplayRole::End, "End"),
    (DisplayRole::Obstacle, "Wall"),
    (DisplayRole::Frontier, "Frontier"),
    (DisplayRole::Explored, "Explored"),
    (DisplayRole::Empty, "Empty"),
];

/// Mouse buttons the grid reacts to.
const BUTTONS: [(egui::PointerButton, PointerButton); 2] = [
    (egui::PointerButton::Primary, PointerButton::Paint),
    (egui::PointerButton::Secondary, PointerButton::Erase),
];

pub fn cell_color(role: DisplayRole) -> Color32 {
    match role {
        DisplayRole::Empty => Color32::WHITE,
        DisplayRole::Obstacle => Color32::BLACK,
        DisplayRole::Start => Color32::GREEN,
        DisplayRole::End => Color32::RED,
        DisplayRole::Frontier => Color32::YELLOW,
        DisplayRole::Explored => Color32::BLUE,
    }
}

/// Screen rectangle of the cell at `(row, col)`, one pixel short of the
/// cell size to leave a gridline.
pub fn cell_rect(origin: Pos2, (row, col): Pos, cell_size: f32) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(col as f32 * cell_size, row as f32 * cell_size),
        Vec2::splat(cell_size - 1.0),
    )
}

/// Pointer state over the grid for one frame, in grid-local pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct PointerFrame {
    local: Option<Vec2>,
    pressed: Option<PointerButton>,
    held: Option<PointerButton>,
    /// Pointer is over the grid.
    hovered: bool,
    /// A press that started on the grid is still held.
    down_on_grid: bool,
    released: bool,
}

impl PointerFrame {
    fn read(response: &egui::Response, input: &egui::InputState) -> Self {
        let pointer = &input.pointer;
        let find = |check: &dyn Fn(egui::PointerButton) -> bool| {
            BUTTONS
                .iter()
                .find(|(egui_button, _)| check(*egui_button))
                .map(|&(_, button)| button)
        };

        Self {
            local: pointer.interact_pos().map(|pos| pos - response.rect.min),
            pressed: find(&|button| pointer.button_pressed(button)),
            held: find(&|button| pointer.button_down(button)),
            hovered: response.hovered(),
            down_on_grid: response.is_pointer_button_down_on(),
            released: pointer.any_released(),
        }
    }

    /// A press over the grid, a drag that started on it, and the release
    /// that ends either.
    fn events(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if let Some(local) = self.local {
            match (self.pressed, self.held) {
                (Some(button), _) if self.hovered => {
                    events.push(InputEvent::PointerDown { x: local.x, y: local.y, button });
                }
                (None, Some(button)) if self.down_on_grid => {
                    events.push(InputEvent::PointerDrag { x: local.x, y: local.y, button });
                }
                _ => {}
            }
        }

        if self.released {
            events.push(InputEvent::PointerUp);
        }
        events
    }
}

impl eframe::App for DfsVisualizer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (run_pressed, cancel_pressed) = ctx.input(|i| {
            (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape))
        });
        if run_pressed {
            self.handle(InputEvent::KeyPressed(Key::Run));
        }
        if cancel_pressed {
            self.handle(InputEvent::KeyPressed(Key::Cancel));
        }

        // Step the search if it's due
        self.advance();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Depth-First Search");

            // Controls
            ui.horizontal(|ui| {
                let running = self.session.is_running();
                if ui.add_enabled(!running, egui::Button::new("▶ Run")).clicked() {
                    self.handle(InputEvent::KeyPressed(Key::Run));
                }
                if ui.add_enabled(running, egui::Button::new("⏹ Cancel")).clicked() {
                    self.handle(InputEvent::KeyPressed(Key::Cancel));
                }

                ui.separator();

                ui.label("Speed:");
                let millis = self.step_interval.as_millis().max(1) as f32;
                let mut speed = (1000.0 / millis).clamp(1.0, 200.0);
                if ui
                    .add(egui::Slider::new(&mut speed, 1.0..=200.0).suffix(" steps/sec"))
                    .changed()
                {
                    self.step_interval = Duration::from_secs_f32(1.0 / speed);
                }
                ui.checkbox(&mut self.instant, "Instant");
            });

            ui.label("Left click: start, end, then walls (drag to paint). Right click: erase. Enter: search. Esc: cancel.");

            ui.horizontal(|ui| {
                for (role, name) in LEGEND {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, cell_color(role));
                    ui.label(name);
                }
            });

            ui.separator();

            ui.label(self.session.status_text());

            // Draw the grid
            let cell_size = self.session.controller().cell_size();
            let (width, height) = self.session.controller().extent(self.session.grid());
            let (response, painter) =
                ui.allocate_painter(Vec2::new(width, height), Sense::click_and_drag());

            for event in ctx.input(|i| PointerFrame::read(&response, i)).events() {
                self.handle(event);
            }

            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, GRIDLINE_COLOR);
            for (pos, cell) in self.session.grid().iter() {
                painter.rect_filled(
                    cell_rect(origin, pos, cell_size),
                    0.0,
                    cell_color(cell.display_role()),
                );
            }

            ui.separator();

            // Statistics
            let grid = self.session.grid();
            ui.horizontal(|ui| {
                ui.label(format!("Explored: {}", grid.explored_count()));
                ui.label(format!("Frontier: {}", grid.frontier_count()));
                ui.label(format!("Walls: {}", grid.obstacle_count()));
                ui.label(format!("Steps: {}", self.session.steps()));
            });
        });

        // Keep animating while the search runs
        if self.session.is_running() {
            ctx.request_repaint_after(self.step_interval);
        }
    }
}
