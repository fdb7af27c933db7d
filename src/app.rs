use std::path::{Path, PathBuf};

use eframe::egui;

use crate::app_types::{RunState, RunnerCommand, RunnerUpdate};
use crate::dialogs;
use crate::input_file;
use crate::runner::{self, RunHandle};
use crate::settings::AppSettings;
use crate::ui::{self, FormPanel, HelpSelection, OptionActions, OutputViewer};

pub struct FelixApp {
    // one form panel per parameter category
    panels: Vec<FormPanel>,
    help: HelpSelection,
    settings: AppSettings,

    // current session
    cif_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,

    // communication with the run watcher thread
    run: Option<RunHandle>,
    run_state: RunState,
    run_log: Vec<String>,

    viewer: OutputViewer,
    show_viewer: bool,
    show_log: bool,

    // one-line feedback shown in the status bar
    notice: Option<String>,
}

impl FelixApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // load settings from disk (or use defaults if file doesn't exist)
        let settings = AppSettings::load();

        Self {
            panels: FormPanel::all(),
            help: HelpSelection::default(),
            settings,
            cif_path: None,
            output_dir: None,
            run: None,
            run_state: RunState::Idle,
            run_log: Vec::new(),
            viewer: OutputViewer::default(),
            show_viewer: false,
            show_log: false,
            notice: None,
        }
    }

    /// Drain updates from the watcher thread and fold them into the UI state.
    fn poll_runner_updates(&mut self, ctx: &egui::Context) {
        let Some(handle) = &self.run else {
            return;
        };

        let mut done = false;
        while let Ok(update) = handle.update_rx.try_recv() {
            match update {
                RunnerUpdate::Line(line) => self.run_log.push(line),
                RunnerUpdate::Finished { success, code } => {
                    self.run_state = RunState::Finished { success, code };
                    done = true;
                }
                RunnerUpdate::Failed(message) => {
                    log::error!("run watcher: {message}");
                    self.run_state = RunState::Failed(message);
                    done = true;
                }
            }
        }

        if done {
            if let Some(handle) = self.run.take() {
                let _ = handle.thread.join();
            }
            if let RunState::Finished { success: true, .. } = self.run_state {
                if let Some(dir) = self.output_dir.clone() {
                    self.viewer.refresh(ctx, &dir);
                    if self.settings.viewer_auto_open {
                        self.show_viewer = true;
                    }
                }
            }
        }
    }

    fn save_settings(&self) {
        if let Err(err) = self.settings.save() {
            log::warn!("failed to save settings: {err}");
        }
    }

    fn load_cif(&mut self) {
        if let Some(path) = dialogs::pick_cif(self.settings.last_cif_dir.as_deref()) {
            self.settings.last_cif_dir = path.parent().map(Path::to_path_buf);
            self.save_settings();
            log::info!("selected CIF {}", path.display());
            self.notice = Some(format!("Loaded {}", file_name(&path)));
            self.cif_path = Some(path);
        }
    }

    fn pick_output_dir(&mut self) {
        if let Some(dir) = dialogs::pick_output_dir(self.settings.last_output_dir.as_deref()) {
            self.settings.last_output_dir = Some(dir.clone());
            self.save_settings();
            self.notice = Some(format!("Output directory: {}", dir.display()));
            self.output_dir = Some(dir);
        }
    }

    fn save_input_file(&mut self) {
        if let Some(path) = dialogs::save_input_file(self.settings.last_input_dir.as_deref()) {
            match input_file::save(&path, &self.panels) {
                Ok(()) => {
                    self.settings.last_input_dir = path.parent().map(Path::to_path_buf);
                    self.save_settings();
                    self.notice = Some(format!("Saved {}", file_name(&path)));
                }
                Err(err) => {
                    log::error!("{err}");
                    self.notice = Some(err.to_string());
                }
            }
        }
    }

    fn load_input_file(&mut self) {
        if let Some(path) = dialogs::pick_input_file(self.settings.last_input_dir.as_deref()) {
            // a parse error leaves the current values untouched
            match input_file::load(&path, &mut self.panels) {
                Ok(()) => {
                    self.settings.last_input_dir = path.parent().map(Path::to_path_buf);
                    self.save_settings();
                    self.notice = Some(format!("Loaded {}", file_name(&path)));
                }
                Err(err) => {
                    log::error!("{err}");
                    self.notice = Some(err.to_string());
                }
            }
        }
    }

    /// Start a simulation if a crystal file and output directory are set.
    fn start_run(&mut self, ctx: &egui::Context) {
        if self.run_state.is_running() {
            return;
        }
        let Some(cif) = self.cif_path.clone() else {
            self.notice = Some("Load a CIF file before running".to_owned());
            return;
        };
        let Some(output_dir) = self.output_dir.clone() else {
            self.notice = Some("Select an output directory before running".to_owned());
            return;
        };

        match runner::launch(
            ctx,
            &runner::felix_binary(),
            &self.panels,
            &cif,
            &output_dir,
            self.settings.mpi_cores,
        ) {
            Ok(handle) => {
                self.run = Some(handle);
                self.run_state = RunState::Running;
                self.run_log.clear();
                self.show_log = true;
                self.notice = None;
            }
            Err(err) => {
                log::error!("{err}");
                self.run_state = RunState::Failed(err.to_string());
                self.notice = Some(err.to_string());
            }
        }
    }

    fn cancel_run(&self) {
        if let Some(handle) = &self.run {
            let _ = handle.command_tx.send(RunnerCommand::Cancel);
        }
    }

    fn log_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_log;
        egui::Window::new("Run Log")
            .open(&mut open)
            .default_size([520.0, 320.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(self.run_state.is_running(), |ui| {
                        if ui.button("⏹ Cancel").clicked() {
                            self.cancel_run();
                        }
                    });
                    ui.label(format!("{} lines", self.run_log.len()));
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.run_log {
                            ui.monospace(line);
                        }
                    });
            });
        self.show_log = open;
    }
}

impl eframe::App for FelixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // poll for updates from the watcher thread
        self.poll_runner_updates(ctx);

        // hover state is recomputed every frame
        self.help.begin_frame();

        let mut actions = OptionActions::default();

        // keyboard shortcuts
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::R) {
                actions.run = true;
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::S) {
                actions.save_input = true;
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::O) {
                actions.pick_output_dir = true;
            }
        });

        ui::render_options_bar(
            ctx,
            &mut actions,
            &mut self.settings.mpi_cores,
            self.run_state.is_running(),
            &mut self.settings.show_help_panel,
            &mut self.show_viewer,
            &mut self.show_log,
            &mut self.help,
        );

        // act on the options bar
        if actions.load_cif {
            self.load_cif();
        }
        if actions.save_input {
            self.save_input_file();
        }
        if actions.load_input {
            self.load_input_file();
        }
        if actions.pick_output_dir {
            self.pick_output_dir();
        }
        if actions.run {
            self.start_run(ctx);
        }

        ui::render_status_bar(
            ctx,
            self.cif_path.as_deref(),
            self.output_dir.as_deref(),
            &self.run_state,
            self.notice.as_deref(),
        );

        if self.settings.show_help_panel {
            ui::render_help_panel(ctx, &self.help);
        }

        // central panel must come after every side panel
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for panel in &mut self.panels {
                    egui::CollapsingHeader::new(
                        egui::RichText::new(panel.category.title()).heading(),
                    )
                    .default_open(true)
                    .show(ui, |ui| {
                        panel.ui(ui, &mut self.help);
                    });
                }
            });
        });

        self.viewer
            .window(ctx, &mut self.show_viewer, self.output_dir.as_deref());
        self.log_window(ctx);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
