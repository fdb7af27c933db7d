mod app;
mod app_types;
mod dialogs;
mod help_text;
mod input_file;
mod runner;
mod schema;
mod settings;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // the control tables are static data; a malformed entry is a programming
    // error, caught here before any widget is built
    if let Err(err) = schema::validate_all() {
        eprintln!("control table error: {err}");
        std::process::exit(1);
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Felix",
        native_options,
        Box::new(|cc| {
            Ok::<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>(Box::new(
                crate::app::FelixApp::new(cc),
            ))
        }),
    )
}
