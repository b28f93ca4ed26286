//! Toolbox floating above the taskbar.

use crate::CozyCornerApp;
use crate::constants::{INFO_TOAST_SECONDS, TASKBAR_HEIGHT, TOOLBOX_MARGIN};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions};

/// Surface editing tools offered by the toolbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AddText,
    AddPicture,
}

impl Tool {
    pub const ALL: [Self; 2] = [Self::AddText, Self::AddPicture];

    pub fn icon(self) -> &'static str {
        match self {
            Self::AddText => "📝",
            Self::AddPicture => "🖼",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddText => "Add Text",
            Self::AddPicture => "Add Picture",
        }
    }

    /// Text of the notice shown when the tool is picked.
    pub fn notice(self) -> String {
        let summary = match self {
            Self::AddText => "This tool will allow you to add text elements to the canvas.",
            Self::AddPicture => {
                "This tool will allow you to upload and add pictures to the canvas."
            }
        };
        format!(
            "{} {}\n{summary}\nFunctionality coming soon!",
            self.icon(),
            self.label()
        )
    }
}

impl CozyCornerApp {
    /// Renders the toolbox centred above the taskbar.
    pub fn show_toolbox(&mut self, ctx: &egui::Context) {
        let mut picked = None;
        egui::Area::new(egui::Id::new("toolbox"))
            .anchor(
                egui::Align2::CENTER_BOTTOM,
                egui::vec2(0.0, -(TASKBAR_HEIGHT + TOOLBOX_MARGIN)),
            )
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for tool in Tool::ALL {
                                let text = format!("{}\n{}", tool.icon(), tool.label());
                                if ui.button(text).clicked() {
                                    picked = Some(tool);
                                }
                            }
                        });
                    });
            });

        if let Some(tool) = picked {
            log::debug!("picked tool {tool:?}");
            self.toasts.add(Toast {
                kind: ToastKind::Info,
                text: tool.notice().into(),
                options: ToastOptions::default()
                    .duration_in_seconds(INFO_TOAST_SECONDS)
                    .show_icon(true),
                ..Default::default()
            });
        }
    }
}
