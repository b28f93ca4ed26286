//! Desktop model: launchable apps, icon layout and window management.
//!
//! Icons live on the virtual surface and move with it. Windows are HUD chrome
//! positioned in viewport pixels and are never affected by the surface
//! transform.

use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique window identifier. Never reused within a session.
pub type WindowId = u64;

/// Size of a desktop icon's hit area in surface pixels.
pub const ICON_SIZE: Vec2 = Vec2::new(80.0, 100.0);

/// Top-left position of the first window opened.
const CASCADE_ORIGIN: Vec2 = Vec2::new(50.0, 50.0);

/// Offset between successively opened windows.
const CASCADE_STEP: f64 = 30.0;

/// Cascade positions wrap after this many windows.
const CASCADE_SLOTS: u64 = 10;

/// Toy applications reachable from the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Notepad,
    Calculator,
    Paint,
    Snake,
    Tetris,
}

impl AppKind {
    pub const ALL: [Self; 5] = [
        Self::Notepad,
        Self::Calculator,
        Self::Paint,
        Self::Snake,
        Self::Tetris,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Self::Notepad => "📝",
            Self::Calculator => "🧮",
            Self::Paint => "🎨",
            Self::Snake => "🐍",
            Self::Tetris => "🧩",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Notepad => "Notepad",
            Self::Calculator => "Calculator",
            Self::Paint => "Paint",
            Self::Snake => "Snake Game",
            Self::Tetris => "Tetris",
        }
    }

    /// Window title: icon followed by label.
    pub fn title(self) -> String {
        format!("{} {}", self.icon(), self.label())
    }

    /// Initial window content size in viewport pixels.
    pub fn default_size(self) -> Vec2 {
        match self {
            Self::Notepad => Vec2::new(400.0, 300.0),
            Self::Calculator => Vec2::new(260.0, 320.0),
            Self::Paint | Self::Snake => Vec2::new(290.0, 280.0),
            Self::Tetris => Vec2::new(240.0, 380.0),
        }
    }
}

/// A launcher icon on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub app: AppKind,
    /// Top-left corner relative to the surface point shown at the viewport's
    /// top-left in the home view.
    pub position: Vec2,
}

impl DesktopIcon {
    /// Hit area in surface coordinates, given the home-view origin.
    pub fn surface_rect(&self, home_origin: Vec2) -> Rect {
        Rect::from_min_size(home_origin + self.position, ICON_SIZE)
    }
}

/// The stock icon grid: two rows, 100 px apart.
pub fn default_icons() -> Vec<DesktopIcon> {
    let positions = [
        (AppKind::Notepad, 100.0, 100.0),
        (AppKind::Calculator, 200.0, 100.0),
        (AppKind::Paint, 300.0, 100.0),
        (AppKind::Snake, 100.0, 200.0),
        (AppKind::Tetris, 200.0, 200.0),
    ];
    positions
        .into_iter()
        .map(|(app, x, y)| DesktopIcon {
            app,
            position: Vec2::new(x, y),
        })
        .collect()
}

/// Returns the icon whose hit area contains `surface_point`, topmost first.
pub fn icon_at(
    icons: &[DesktopIcon],
    home_origin: Vec2,
    surface_point: Vec2,
) -> Option<&DesktopIcon> {
    icons
        .iter()
        .rev()
        .find(|icon| icon.surface_rect(home_origin).contains(surface_point))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    /// Top-left corner in viewport pixels while in [`WindowState::Normal`].
    pub position: Vec2,
    pub size: Vec2,
    pub state: WindowState,
    /// State to return to when restored from minimized.
    restore_state: WindowState,
    z_order: u64,
}

impl Window {
    pub fn is_visible(&self) -> bool {
        self.state != WindowState::Minimized
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window not found: {0}")]
    NotFound(WindowId),
}

/// Open windows, their stacking order and the focused window.
#[derive(Debug, Default)]
pub struct WindowManager {
    /// Kept in open order, which is also taskbar order.
    windows: Vec<Window>,
    next_id: WindowId,
    next_z: u64,
    focused: Option<WindowId>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Result<&mut Window, WindowError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(WindowError::NotFound(id))
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Opens a window for `app` on top of the stack and focuses it.
    pub fn open(&mut self, app: AppKind) -> WindowId {
        self.next_id += 1;
        let id = self.next_id;
        let slot = (id - 1) % CASCADE_SLOTS;
        let position = CASCADE_ORIGIN + Vec2::new(CASCADE_STEP, CASCADE_STEP) * slot as f64;

        let z_order = self.bump_z();
        self.windows.push(Window {
            id,
            app,
            title: app.title(),
            position,
            size: app.default_size(),
            state: WindowState::Normal,
            restore_state: WindowState::Normal,
            z_order,
        });
        self.focused = Some(id);
        log::debug!("opened window {id} for {app:?}");
        id
    }

    /// Removes a window and its taskbar entry.
    pub fn close(&mut self, id: WindowId) -> Result<Window, WindowError> {
        let index = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(WindowError::NotFound(id))?;
        let window = self.windows.remove(index);
        if self.focused == Some(id) {
            self.focused = self.topmost_visible();
        }
        log::debug!("closed window {id}");
        Ok(window)
    }

    /// Hides a window; it stays on the taskbar.
    pub fn minimize(&mut self, id: WindowId) -> Result<(), WindowError> {
        let window = self.get_mut(id)?;
        if window.state != WindowState::Minimized {
            window.restore_state = window.state;
            window.state = WindowState::Minimized;
        }
        if self.focused == Some(id) {
            self.focused = self.topmost_visible();
        }
        Ok(())
    }

    /// Switches between maximized and normal, returning the new state.
    pub fn toggle_maximize(&mut self, id: WindowId) -> Result<WindowState, WindowError> {
        let window = self.get_mut(id)?;
        window.state = match window.state {
            WindowState::Maximized => WindowState::Normal,
            WindowState::Normal | WindowState::Minimized => WindowState::Maximized,
        };
        let state = window.state;
        self.focus(id)?;
        Ok(state)
    }

    /// Raises a window to the top, restoring it if minimized.
    pub fn focus(&mut self, id: WindowId) -> Result<(), WindowError> {
        let top = self.next_z;
        let window = self.get_mut(id)?;
        if window.state == WindowState::Minimized {
            window.state = window.restore_state;
        }
        if window.z_order != top {
            let z_order = self.bump_z();
            self.get_mut(id)?.z_order = z_order;
        }
        self.focused = Some(id);
        Ok(())
    }

    /// Moves a normal window by `delta`. Maximized windows stay put.
    pub fn move_by(&mut self, id: WindowId, delta: Vec2) -> Result<(), WindowError> {
        let window = self.get_mut(id)?;
        if window.state == WindowState::Normal {
            window.position += delta;
        }
        Ok(())
    }

    /// Windows in taskbar (open) order.
    pub fn taskbar(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Visible windows from bottom to top.
    pub fn stacking_order(&self) -> Vec<&Window> {
        let mut visible: Vec<&Window> = self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_order);
        visible
    }

    fn topmost_visible(&self) -> Option<WindowId> {
        self.stacking_order().last().map(|w| w.id)
    }

    fn bump_z(&mut self) -> u64 {
        self.next_z += 1;
        self.next_z
    }
}
