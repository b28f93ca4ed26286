//! Color constants for the desktop surface and its chrome.

use eframe::egui::Color32;

// Surface
pub const SURFACE_BACKGROUND: Color32 = Color32::from_rgb(255, 182, 193);
pub const GRID_DOT: Color32 = Color32::from_rgba_premultiplied(90, 60, 70, 60);

// Icons
pub const ICON_HOVER_FILL: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 50);
pub const ICON_LABEL: Color32 = Color32::WHITE;
pub const TEXT_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 130);

// Welcome message
pub const WELCOME_TEXT: Color32 = Color32::WHITE;
pub const WELCOME_HINT: Color32 = Color32::from_rgba_premultiplied(204, 204, 204, 204);

// Taskbar
pub const TASKBAR_FILL: Color32 = Color32::from_rgb(221, 160, 221);
pub const TASKBAR_ACTIVE: Color32 = Color32::from_rgb(255, 240, 245);
