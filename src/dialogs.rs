/// Native file dialogs, seeded with the last directory the user picked.
use std::path::{Path, PathBuf};

use rfd::FileDialog;

fn base(dir: Option<&Path>) -> FileDialog {
    let mut dialog = FileDialog::new();
    if let Some(dir) = dir {
        dialog = dialog.set_directory(dir);
    }
    dialog
}

pub fn pick_cif(dir: Option<&Path>) -> Option<PathBuf> {
    base(dir)
        .add_filter("crystal structure", &["cif"])
        .pick_file()
}

pub fn pick_input_file(dir: Option<&Path>) -> Option<PathBuf> {
    base(dir).add_filter("felix input", &["inp"]).pick_file()
}

pub fn save_input_file(dir: Option<&Path>) -> Option<PathBuf> {
    base(dir)
        .add_filter("felix input", &["inp"])
        .set_file_name(crate::runner::INPUT_FILE_NAME)
        .save_file()
}

pub fn pick_output_dir(dir: Option<&Path>) -> Option<PathBuf> {
    base(dir).pick_folder()
}
