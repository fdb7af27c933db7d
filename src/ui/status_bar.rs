use std::path::Path;

use eframe::egui;

use crate::app_types::RunState;

/// Render the bottom status bar panel
pub fn render_status_bar(
    ctx: &egui::Context,
    cif_path: Option<&Path>,
    output_dir: Option<&Path>,
    run_state: &RunState,
    notice: Option<&str>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if let Some(name) = cif_path.and_then(|p| p.file_name()) {
                ui.label(format!("CIF: {}", name.to_string_lossy()));
            } else {
                ui.label("No CIF file loaded");
            }

            ui.separator();

            if let Some(dir) = output_dir {
                ui.label(format!("Output: {}", dir.display()));
            } else {
                ui.label("No output directory");
            }

            if let Some(notice) = notice {
                ui.separator();
                ui.weak(notice);
            }

            // right-aligned: run state
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match run_state {
                    RunState::Idle => {
                        ui.label("Ready");
                    }
                    RunState::Running => {
                        ui.add(egui::Spinner::new());
                        ui.label("Simulating");
                    }
                    RunState::Finished { success: true, .. } => {
                        ui.label("Run finished");
                    }
                    RunState::Finished {
                        success: false,
                        code: Some(code),
                    } => {
                        ui.label(format!("Run failed (exit code {code})"));
                    }
                    RunState::Finished {
                        success: false,
                        code: None,
                    } => {
                        ui.label("Run stopped");
                    }
                    RunState::Failed(message) => {
                        ui.label(format!("Run error: {message}"));
                    }
                }
            });
        });
    });
}
