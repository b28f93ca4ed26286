/// Height of the taskbar along the bottom edge in pixels.
pub const TASKBAR_HEIGHT: f32 = 40.0;

/// Spacing of the background dot grid in surface pixels.
pub const GRID_SPACING: f64 = 20.0;

/// Grid spacing is doubled until dots are at least this far apart on screen.
pub const GRID_MIN_SCREEN_SPACING: f64 = 8.0;

/// Grid spacing is also doubled until at most this many dots fit on screen.
pub const MAX_GRID_DOTS: f64 = 25_000.0;

/// Radius of a grid dot in pixels.
pub const GRID_DOT_RADIUS: f32 = 1.0;

/// Font size of an icon glyph at unit scale.
pub const ICON_GLYPH_SIZE: f32 = 40.0;

/// Font size of an icon label at unit scale.
pub const ICON_LABEL_SIZE: f32 = 12.0;

/// Labels smaller than this are not drawn.
pub const MIN_LABEL_SIZE: f32 = 5.0;

/// Font size of the welcome headline at unit scale.
pub const WELCOME_TITLE_SIZE: f32 = 16.0;

/// Font size of the welcome hints at unit scale.
pub const WELCOME_HINT_SIZE: f32 = 12.0;

/// Space taken by a window's title row and separator.
pub const WINDOW_HEADER_HEIGHT: f32 = 36.0;

/// Distance of the zoom controls from the top-right corner.
pub const ZOOM_CONTROLS_MARGIN: f32 = 20.0;

/// Gap between the taskbar and the toolbox.
pub const TOOLBOX_MARGIN: f32 = 40.0;

/// Lifetime of informational toasts in seconds.
pub const INFO_TOAST_SECONDS: f64 = 5.0;

/// Lifetime of error toasts in seconds.
pub const ERROR_TOAST_SECONDS: f64 = 10.0;

/// Directory under the platform config dir holding user overrides.
pub const CONFIG_DIR_NAME: &str = "cozy-corner";

/// File name of the viewport configuration, both bundled and on disk.
pub const CONFIG_FILE_NAME: &str = "viewport.ron";
