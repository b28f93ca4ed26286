#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod input;
mod toolbox;
mod ui;

use assets::ResolvedConfig;
use clap::Parser;
use constants::{ERROR_TOAST_SECONDS, INFO_TOAST_SECONDS, TASKBAR_HEIGHT};
use cozy_corner::desktop::default_icons;
use cozy_corner::{
    AppKind, DesktopIcon, FrameLoop, FrameOutcome, Vec2, ViewportEngine, WindowId, WindowManager,
};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use input::TouchTracker;
use std::collections::HashMap;
use std::path::PathBuf;

/// An infinite-canvas desktop you can pan, zoom and fling.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Viewport configuration file (RON). Takes precedence over the user
    /// config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Main application state for the Cozy Corner desktop.
pub struct CozyCornerApp {
    engine: ViewportEngine,
    frame_loop: FrameLoop,
    windows: WindowManager,
    icons: Vec<DesktopIcon>,
    /// Notepad contents, kept while the window is open.
    notes: HashMap<WindowId, String>,
    touches: TouchTracker,
    toasts: Toasts,
}

impl CozyCornerApp {
    fn new(resolved: ResolvedConfig) -> Self {
        let mut toasts = Toasts::new()
            .anchor(
                egui::Align2::RIGHT_BOTTOM,
                (-10.0, -(TASKBAR_HEIGHT + 10.0)),
            )
            .direction(egui::Direction::BottomUp);

        for err in resolved.errors {
            toasts.add(Toast {
                kind: ToastKind::Error,
                text: err.into(),
                options: ToastOptions::default()
                    .duration_in_seconds(ERROR_TOAST_SECONDS)
                    .show_icon(true),
                ..Default::default()
            });
        }

        Self {
            engine: ViewportEngine::new(resolved.config),
            frame_loop: FrameLoop::new(),
            windows: WindowManager::new(),
            icons: default_icons(),
            notes: HashMap::new(),
            touches: TouchTracker::default(),
            toasts,
        }
    }

    /// Surface point shown at the viewport's top-left corner in the home view.
    fn home_origin(&self) -> Vec2 {
        -self.engine.state().home_offset()
    }

    fn open_app(&mut self, ctx: &egui::Context, app: AppKind) {
        let id = self.windows.open(app);
        if app == AppKind::Notepad {
            self.notes.insert(id, String::new());
        }
        ctx.move_to_top(ui::window_layer(id));
        log::info!("opened {} as window {id}", app.label());
    }

    fn show_start_menu(&mut self) {
        self.toasts.add(Toast {
            kind: ToastKind::Info,
            text: "🌸 Start Menu 🌸\nAll Programs, Settings and Shutdown live here soon.".into(),
            options: ToastOptions::default()
                .duration_in_seconds(INFO_TOAST_SECONDS)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Advances momentum by one frame and keeps frames coming while the
    /// surface coasts.
    fn animate(&mut self, ctx: &egui::Context) {
        match self.frame_loop.run_frame(&mut self.engine) {
            FrameOutcome::Animating => ctx.request_repaint(),
            FrameOutcome::Idle | FrameOutcome::Cancelled => {}
        }
    }

    /// Stops the momentum loop for good.
    fn shut_down(&mut self) {
        self.frame_loop.cancel_handle().cancel();
        log::debug!("frame loop cancelled after {} frames", self.frame_loop.frames());
    }
}

impl eframe::App for CozyCornerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        self.show_taskbar(ctx);
        self.show_desktop(ctx);
        self.show_windows(ctx);
        self.show_zoom_controls(ctx);
        self.show_toolbox(ctx);

        // Chrome drawn after the surface may have moved it this frame.
        if self.engine.take_transform_update().is_some() {
            ctx.request_repaint();
        }

        self.toasts.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shut_down();
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();
    let resolved = assets::resolve_config(args.config.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Cozy Corner"),
        ..Default::default()
    };

    eframe::run_native(
        "Cozy Corner",
        options,
        Box::new(move |_cc| Ok(Box::new(CozyCornerApp::new(resolved)))),
    )
}
