use eframe::egui;

use crate::ui::help_panel::HelpSelection;

/// One-frame button results from the options bar. The app reads these after
/// rendering and runs the matching action.
#[derive(Default)]
pub struct OptionActions {
    pub run: bool,
    pub load_cif: bool,
    pub save_input: bool,
    pub load_input: bool,
    pub pick_output_dir: bool,
}

/// Render the options bar across the top of the window
#[allow(clippy::too_many_arguments)]
pub fn render_options_bar(
    ctx: &egui::Context,
    actions: &mut OptionActions,
    mpi_cores: &mut u32,
    run_active: bool,
    show_help: &mut bool,
    show_viewer: &mut bool,
    show_log: &mut bool,
    help: &mut HelpSelection,
) {
    egui::TopBottomPanel::top("options_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // only one simulation at a time
            ui.add_enabled_ui(!run_active, |ui| {
                if ui
                    .button("▶ Run")
                    .on_hover_text("Write felix.inp and start the simulator (Ctrl+R)")
                    .clicked()
                {
                    actions.run = true;
                }
            });

            ui.separator();

            if ui
                .button("Load CIF File")
                .on_hover_text("Pick the crystal structure to simulate")
                .clicked()
            {
                actions.load_cif = true;
            }
            if ui
                .button("Save Input File")
                .on_hover_text("Write the current values to a felix.inp (Ctrl+S)")
                .clicked()
            {
                actions.save_input = true;
            }
            if ui
                .button("Load Input File")
                .on_hover_text("Read values back from an existing felix.inp")
                .clicked()
            {
                actions.load_input = true;
            }
            if ui
                .button("Select Output Directory")
                .on_hover_text("Where the simulator runs and writes images (Ctrl+O)")
                .clicked()
            {
                actions.pick_output_dir = true;
            }

            ui.separator();

            let label = ui.label("MpiCores");
            let cores = ui.add(egui::DragValue::new(mpi_cores).range(0..=100));
            if label.hovered() || cores.hovered() {
                help.set("MpiCores");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let help_label = if *show_help { "☑ Help" } else { "☐ Help" };
                if ui.button(help_label).clicked() {
                    *show_help = !*show_help;
                }

                let viewer_label = if *show_viewer { "☑ Viewer" } else { "☐ Viewer" };
                if ui.button(viewer_label).clicked() {
                    *show_viewer = !*show_viewer;
                }

                let log_label = if *show_log { "☑ Log" } else { "☐ Log" };
                if ui.button(log_label).clicked() {
                    *show_log = !*show_log;
                }
            });
        });
    });
}
