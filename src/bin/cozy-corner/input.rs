//! Routing of raw egui input to the viewport engine.

use crate::CozyCornerApp;
use cozy_corner::{Rect, Vec2, desktop};
use eframe::egui::{self, Event, LayerId, PointerButton, TouchId, TouchPhase};

pub fn to_vec2(pos: egui::Pos2) -> Vec2 {
    Vec2::new(f64::from(pos.x), f64::from(pos.y))
}

pub fn to_pos2(point: Vec2) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::from_min_size(to_vec2(rect.min), to_vec2(rect.max) - to_vec2(rect.min))
}

/// Touch contacts currently down, in the order they landed.
#[derive(Debug, Default)]
pub struct TouchTracker {
    contacts: Vec<(TouchId, Vec2)>,
}

impl TouchTracker {
    pub fn is_active(&self) -> bool {
        !self.contacts.is_empty()
    }

    pub fn points(&self) -> Vec<Vec2> {
        self.contacts.iter().map(|&(_, pos)| pos).collect()
    }

    pub fn start(&mut self, id: TouchId, pos: Vec2) {
        if !self.update(id, pos) {
            self.contacts.push((id, pos));
        }
    }

    /// Returns `false` for contacts that never started.
    pub fn update(&mut self, id: TouchId, pos: Vec2) -> bool {
        match self.contacts.iter_mut().find(|(contact, _)| *contact == id) {
            Some(contact) => {
                contact.1 = pos;
                true
            }
            None => false,
        }
    }

    pub fn end(&mut self, id: TouchId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|(contact, _)| *contact != id);
        self.contacts.len() != before
    }
}

/// Where the desktop canvas sits this frame.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    pub layer: LayerId,
    pub rect: egui::Rect,
}

impl Canvas {
    pub fn from_response(response: &egui::Response) -> Self {
        Self {
            layer: response.layer_id,
            rect: response.rect,
        }
    }

    /// Whether `pos` is over the canvas and not covered by a window or other
    /// chrome.
    pub fn is_under(&self, ctx: &egui::Context, pos: egui::Pos2) -> bool {
        self.rect.contains(pos) && ctx.layer_id_at(pos) == Some(self.layer)
    }
}

impl CozyCornerApp {
    /// Handles the zoom keyboard shortcuts unless a text field has focus.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.memory(|mem| mem.focused().is_some()) {
            return;
        }

        let (zoom_in, zoom_out, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
            )
        });
        if zoom_in {
            self.engine.zoom_in();
        }
        if zoom_out {
            self.engine.zoom_out();
        }
        if reset {
            self.engine.reset_zoom();
        }
    }

    /// Feeds this frame's raw pointer, touch, wheel and zoom events to the
    /// engine.
    pub fn handle_viewport_input(&mut self, ctx: &egui::Context, canvas: Canvas) {
        self.engine.set_viewport_rect(to_rect(canvas.rect));

        let (events, latest_pos) = ctx.input(|i| (i.events.clone(), i.pointer.latest_pos()));
        for event in events {
            match event {
                Event::Touch { id, phase, pos, .. } => {
                    let on_surface = self.is_bare_surface(ctx, canvas, pos);
                    self.route_touch(id, phase, to_vec2(pos), on_surface);
                }
                // Touch screens also emit emulated pointer events for the
                // first finger.
                _ if self.touches.is_active() => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed {
                        let on_surface = self.is_bare_surface(ctx, canvas, pos);
                        self.engine.on_pointer_down(to_vec2(pos), on_surface);
                    } else {
                        self.engine.on_pointer_up();
                    }
                }
                Event::PointerMoved(pos) => {
                    self.engine.on_pointer_move(to_vec2(pos));
                }
                Event::MouseWheel {
                    delta, modifiers, ..
                } => {
                    if let Some(pos) = latest_pos.filter(|&pos| canvas.is_under(ctx, pos)) {
                        // egui reports scrolling away from the user as positive.
                        let delta_y = -f64::from(delta.y);
                        self.engine.on_wheel(delta_y, to_vec2(pos), modifiers.ctrl);
                    }
                }
                Event::Zoom(factor) => {
                    if let Some(pos) = latest_pos.filter(|&pos| canvas.is_under(ctx, pos)) {
                        self.engine.on_zoom_gesture(f64::from(factor), to_vec2(pos));
                    }
                }
                _ => {}
            }
        }
    }

    /// Presses start a pan only on empty canvas, never on an icon.
    fn is_bare_surface(&self, ctx: &egui::Context, canvas: Canvas, pos: egui::Pos2) -> bool {
        canvas.is_under(ctx, pos) && self.icon_under(pos).is_none()
    }

    pub fn icon_under(&self, pos: egui::Pos2) -> Option<&desktop::DesktopIcon> {
        let surface_point = self.engine.surface_point_at(to_vec2(pos));
        desktop::icon_at(&self.icons, self.home_origin(), surface_point)
    }

    fn route_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Vec2, on_surface: bool) {
        match phase {
            TouchPhase::Start => {
                self.touches.start(id, pos);
                self.engine.on_touch_start(&self.touches.points(), on_surface);
            }
            TouchPhase::Move => {
                if self.touches.update(id, pos) {
                    self.engine.on_touch_move(&self.touches.points());
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if self.touches.end(id) {
                    self.engine.on_touch_end(&self.touches.points());
                }
            }
        }
    }
}
