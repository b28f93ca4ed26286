//! UI rendering for the desktop surface and its chrome.

use crate::CozyCornerApp;
use crate::colors;
use crate::constants::{
    GRID_DOT_RADIUS, GRID_MIN_SCREEN_SPACING, GRID_SPACING, ICON_GLYPH_SIZE, ICON_LABEL_SIZE,
    MAX_GRID_DOTS, MIN_LABEL_SIZE, TASKBAR_HEIGHT, WELCOME_HINT_SIZE, WELCOME_TITLE_SIZE,
    WINDOW_HEADER_HEIGHT, ZOOM_CONTROLS_MARGIN,
};
use crate::input::{Canvas, to_pos2, to_vec2};
use cozy_corner::{AppKind, GesturePhase, Layer, Rect, Transform, Vec2, Window, WindowId, WindowState};
use eframe::egui::{self, Align2, Color32, FontId};

/// Something the user did to a window this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WindowAction {
    Focus,
    Move(Vec2),
    Minimize,
    ToggleMaximize,
    Close,
}

pub fn window_layer(id: WindowId) -> egui::LayerId {
    egui::LayerId::new(egui::Order::Middle, egui::Id::new(("window", id)))
}

/// Surface spacing of the dot grid at `scale` over a viewport of `size`
/// pixels. Doubles from [`GRID_SPACING`] until dots are far enough apart and
/// few enough to draw every frame.
pub fn grid_spacing(scale: f64, size: egui::Vec2) -> f64 {
    let area = f64::from(size.x) * f64::from(size.y);
    let mut spacing = GRID_SPACING;
    loop {
        let on_screen = spacing * scale;
        let dots = area / (on_screen * on_screen);
        if on_screen >= GRID_MIN_SCREEN_SPACING && dots <= MAX_GRID_DOTS {
            return spacing;
        }
        spacing *= 2.0;
    }
}

/// Draws `text` centred on `pos` with a drop shadow.
fn shadowed_text(painter: &egui::Painter, pos: egui::Pos2, text: &str, font: FontId, color: Color32) {
    let shadow = (font.size * 0.1).max(1.0);
    painter.text(
        pos + egui::vec2(shadow, shadow),
        Align2::CENTER_CENTER,
        text,
        font.clone(),
        colors::TEXT_SHADOW,
    );
    painter.text(pos, Align2::CENTER_CENTER, text, font, color);
}

impl CozyCornerApp {
    /// Renders the bottom taskbar: start button, one entry per open window
    /// and a controls hint.
    pub fn show_taskbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("taskbar")
            .exact_height(TASKBAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(colors::TASKBAR_FILL)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if ui.button("🌸 Start").clicked() {
                        self.show_start_menu();
                    }
                    ui.separator();

                    let focused = self.windows.focused();
                    let mut clicked = None;
                    for window in self.windows.taskbar() {
                        let active = focused == Some(window.id) && window.is_visible();
                        let entry = egui::Button::new(window.title.as_str())
                            .selected(active)
                            .fill(if active {
                                colors::TASKBAR_ACTIVE
                            } else {
                                Color32::TRANSPARENT
                            });
                        if ui.add(entry).clicked() {
                            clicked = Some(window.id);
                        }
                    }
                    if let Some(id) = clicked {
                        self.apply_window_action(ctx, id, WindowAction::Focus);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label("Drag: Pan | Scroll: Zoom | +/-: Zoom | 0: Reset");
                    });
                });
            });
    }

    /// Renders the zoom buttons and readout in the top-right corner.
    pub fn show_zoom_controls(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("zoom_controls"))
            .anchor(
                Align2::RIGHT_TOP,
                egui::vec2(-ZOOM_CONTROLS_MARGIN, ZOOM_CONTROLS_MARGIN),
            )
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            if ui.button("+").on_hover_text("Zoom in (+)").clicked() {
                                self.engine.zoom_in();
                            }
                            ui.label(format!("{}%", self.engine.zoom_percent()));
                            if ui.button("−").on_hover_text("Zoom out (-)").clicked() {
                                self.engine.zoom_out();
                            }
                            if ui.button("⌂").on_hover_text("Reset zoom (0)").clicked() {
                                self.engine.reset_zoom();
                            }
                        });
                    });
            });
    }

    /// Renders the pannable surface and routes its input.
    pub fn show_desktop(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::SURFACE_BACKGROUND))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                self.handle_viewport_input(ctx, Canvas::from_response(&response));
                self.animate(ctx);

                if response.double_clicked()
                    && let Some(app) = response
                        .interact_pointer_pos()
                        .and_then(|pos| self.icon_under(pos))
                        .map(|icon| icon.app)
                {
                    self.open_app(ctx, app);
                }

                let hovered_icon = response
                    .hover_pos()
                    .and_then(|pos| self.icon_under(pos))
                    .map(|icon| icon.app);
                if self.engine.phase() == GesturePhase::Drag {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                } else if response.hovered() && hovered_icon.is_none() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grab);
                }

                let painter = ui.painter_at(rect);
                self.paint_grid(&painter, rect);
                self.paint_welcome(&painter);
                self.paint_icons(&painter, hovered_icon);
            });
    }

    fn surface_to_screen(&self, point: Vec2) -> egui::Pos2 {
        to_pos2(self.engine.screen_point_of(point))
    }

    fn surface_transform(&self) -> Transform {
        self.engine.transform_for(Layer::Surface)
    }

    /// Dot grid over the visible part of the surface.
    fn paint_grid(&self, painter: &egui::Painter, rect: egui::Rect) {
        let spacing = grid_spacing(self.surface_transform().scale, rect.size());

        let extent = self.engine.config().surface_size;
        let top_left = self.engine.surface_point_at(to_vec2(rect.min));
        let bottom_right = self.engine.surface_point_at(to_vec2(rect.max));
        let first = Vec2::new(
            (top_left.x.max(0.0) / spacing).ceil() * spacing,
            (top_left.y.max(0.0) / spacing).ceil() * spacing,
        );
        let last = Vec2::new(bottom_right.x.min(extent.x), bottom_right.y.min(extent.y));

        let mut y = first.y;
        while y <= last.y {
            let mut x = first.x;
            while x <= last.x {
                painter.circle_filled(
                    self.surface_to_screen(Vec2::new(x, y)),
                    GRID_DOT_RADIUS,
                    colors::GRID_DOT,
                );
                x += spacing;
            }
            y += spacing;
        }
    }

    /// Welcome text at the centre of the surface.
    fn paint_welcome(&self, painter: &egui::Painter) {
        let scale = self.surface_transform().scale as f32;
        let center = self.surface_to_screen(self.engine.config().surface_size * 0.5);

        shadowed_text(
            painter,
            center - egui::vec2(0.0, 20.0 * scale),
            "🌸 Welcome to Cozy Corner 🌸",
            FontId::monospace(WELCOME_TITLE_SIZE * scale),
            colors::WELCOME_TEXT,
        );

        let hint_size = WELCOME_HINT_SIZE * scale;
        if hint_size < MIN_LABEL_SIZE {
            return;
        }
        let hints = [
            "Double-click icons to open apps",
            "Drag to explore the infinite canvas",
        ];
        for (row, hint) in hints.into_iter().enumerate() {
            let offset = (12.0 + 18.0 * row as f32) * scale;
            shadowed_text(
                painter,
                center + egui::vec2(0.0, offset),
                hint,
                FontId::monospace(hint_size),
                colors::WELCOME_HINT,
            );
        }
    }

    fn paint_icons(&self, painter: &egui::Painter, hovered: Option<AppKind>) {
        let scale = self.surface_transform().scale as f32;
        let origin = self.home_origin();

        for icon in &self.icons {
            let area = icon.surface_rect(origin);
            let screen = egui::Rect::from_min_max(
                self.surface_to_screen(area.min),
                self.surface_to_screen(area.max()),
            );
            if !painter.clip_rect().intersects(screen) {
                continue;
            }

            if hovered == Some(icon.app) {
                painter.rect_filled(screen, 8.0 * scale, colors::ICON_HOVER_FILL);
            }
            painter.text(
                screen.center_top() + egui::vec2(0.0, 35.0 * scale),
                Align2::CENTER_CENTER,
                icon.app.icon(),
                FontId::proportional(ICON_GLYPH_SIZE * scale),
                Color32::WHITE,
            );

            let label_size = ICON_LABEL_SIZE * scale;
            if label_size >= MIN_LABEL_SIZE {
                shadowed_text(
                    painter,
                    screen.center_top() + egui::vec2(0.0, 80.0 * scale),
                    icon.app.label(),
                    FontId::proportional(label_size),
                    colors::ICON_LABEL,
                );
            }
        }
    }

    /// Renders every visible window, bottom-most first. Windows are HUD
    /// chrome placed in viewport pixels and ignore the surface transform.
    pub fn show_windows(&mut self, ctx: &egui::Context) {
        let viewport = self.engine.viewport_rect();
        let focused = self.windows.focused();
        let windows: Vec<Window> = self.windows.stacking_order().into_iter().cloned().collect();

        for window in windows {
            let is_focused = focused == Some(window.id);
            for action in self.show_window(ctx, &window, viewport, is_focused) {
                self.apply_window_action(ctx, window.id, action);
            }
        }
    }

    fn show_window(
        &mut self,
        ctx: &egui::Context,
        window: &Window,
        viewport: Rect,
        is_focused: bool,
    ) -> Vec<WindowAction> {
        let maximized = window.state == WindowState::Maximized;
        let (position, size) = if maximized {
            (viewport.min, viewport.size)
        } else {
            (viewport.min + window.position, window.size)
        };

        let mut actions = Vec::new();
        let area = egui::Area::new(window_layer(window.id).id)
            .order(egui::Order::Middle)
            .fixed_pos(to_pos2(position))
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_width(size.x as f32);

                    ui.horizontal(|ui| {
                        let title = ui.add(
                            egui::Label::new(egui::RichText::new(window.title.as_str()).strong())
                                .selectable(false)
                                .sense(egui::Sense::drag()),
                        );
                        if title.dragged() {
                            let delta = title.drag_delta();
                            actions.push(WindowAction::Move(to_vec2(delta.to_pos2())));
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").on_hover_text("Close").clicked() {
                                actions.push(WindowAction::Close);
                            }
                            let (glyph, hint) = if maximized {
                                ("🗗", "Restore")
                            } else {
                                ("🗖", "Maximize")
                            };
                            if ui.small_button(glyph).on_hover_text(hint).clicked() {
                                actions.push(WindowAction::ToggleMaximize);
                            }
                            if ui.small_button("🗕").on_hover_text("Minimize").clicked() {
                                actions.push(WindowAction::Minimize);
                            }
                        });
                    });
                    ui.separator();

                    let content_height = (size.y as f32 - WINDOW_HEADER_HEIGHT).max(0.0);
                    self.show_window_content(ui, window, content_height);
                });
            });

        let pressed = ctx.input(|i| i.pointer.any_pressed());
        if !is_focused && pressed && area.response.contains_pointer() {
            actions.insert(0, WindowAction::Focus);
        }
        actions
    }

    fn show_window_content(&mut self, ui: &mut egui::Ui, window: &Window, height: f32) {
        let size = egui::vec2(ui.available_width(), height);
        match window.app {
            AppKind::Notepad => {
                let text = self.notes.entry(window.id).or_default();
                ui.add_sized(
                    size,
                    egui::TextEdit::multiline(text).hint_text("Start typing..."),
                );
            }
            app => {
                ui.allocate_ui(size, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(format!("{} {} is coming soon", app.icon(), app.label()));
                    });
                });
            }
        }
    }

    fn apply_window_action(&mut self, ctx: &egui::Context, id: WindowId, action: WindowAction) {
        let result = match action {
            WindowAction::Focus => self
                .windows
                .focus(id)
                .map(|()| ctx.move_to_top(window_layer(id))),
            WindowAction::Move(delta) => self.windows.move_by(id, delta),
            WindowAction::Minimize => self.windows.minimize(id),
            WindowAction::ToggleMaximize => self
                .windows
                .toggle_maximize(id)
                .map(|state| log::debug!("window {id} is now {state:?}")),
            WindowAction::Close => self.windows.close(id).map(|window| {
                self.notes.remove(&id);
                log::info!("closed {}", window.title);
            }),
        };
        if let Err(err) = result {
            log::warn!("{err}");
        }
    }
}
