use std::path::{Path, PathBuf};

use eframe::egui::{self, ColorImage, Image, TextureHandle, TextureOptions};

/// montage the simulator writes for the shipped default settings
pub const DEFAULT_OUTPUT_IMAGE: &str = "f-0010-T01000-P00539-P00539-WI-M.tif";

/// Shows the simulator's output image. The viewer never watches the
/// filesystem, it reloads when asked to.
#[derive(Default)]
pub struct OutputViewer {
    texture: Option<TextureHandle>,
    loaded_from: Option<PathBuf>,
    error: Option<String>,
}

/// The image to show for an output directory: the default montage name if it
/// exists, otherwise the alphabetically first tif.
pub fn discover_image(dir: &Path) -> Option<PathBuf> {
    let preferred = dir.join(DEFAULT_OUTPUT_IMAGE);
    if preferred.is_file() {
        return Some(preferred);
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

impl OutputViewer {
    /// Reload the output image from the given directory.
    pub fn refresh(&mut self, ctx: &egui::Context, dir: &Path) {
        self.error = None;

        let Some(path) = discover_image(dir) else {
            self.texture = None;
            self.loaded_from = None;
            self.error = Some(format!("no output image in {}", dir.display()));
            return;
        };

        match image::open(&path) {
            Ok(img) => {
                let rgba8 = img.to_rgba8();
                let (w, h) = (rgba8.width() as usize, rgba8.height() as usize);
                let color = ColorImage::from_rgba_unmultiplied([w, h], rgba8.as_raw());
                if let Some(tex) = self.texture.as_mut() {
                    tex.set(color, TextureOptions::LINEAR);
                } else {
                    self.texture = Some(ctx.load_texture("output", color, TextureOptions::LINEAR));
                }
                self.loaded_from = Some(path);
            }
            Err(err) => {
                log::warn!("could not decode {}: {err}", path.display());
                self.texture = None;
                self.loaded_from = None;
                self.error = Some(format!("could not decode {}: {err}", path.display()));
            }
        }
    }

    /// Render the viewer window.
    pub fn window(&mut self, ctx: &egui::Context, open: &mut bool, output_dir: Option<&Path>) {
        egui::Window::new("Output Viewer")
            .open(open)
            .default_size([560.0, 560.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(output_dir.is_some(), |ui| {
                        if ui.button("⟳ Refresh").clicked() {
                            if let Some(dir) = output_dir {
                                self.refresh(ui.ctx(), dir);
                            }
                        }
                    });
                    if let Some(name) = self.loaded_from.as_ref().and_then(|p| p.file_name()) {
                        ui.label(name.to_string_lossy().as_ref());
                    }
                });
                ui.separator();

                if let Some(tex) = &self.texture {
                    aspect_fit(ui, tex);
                } else if let Some(error) = &self.error {
                    ui.label(error);
                } else if output_dir.is_some() {
                    ui.label("No image loaded yet. Run the simulator, then press Refresh.");
                } else {
                    ui.label("Select an output directory first.");
                }
            });
    }
}

/// Draw a texture scaled to fit within the available space preserving aspect ratio
fn aspect_fit(ui: &mut egui::Ui, tex: &TextureHandle) {
    let avail = ui.available_size();
    let tex_size = tex.size_vec2();
    let scale = (avail.x / tex_size.x).min(avail.y / tex_size.y).max(0.0);
    let draw_size = tex_size * scale;
    ui.add(Image::new(tex).fit_to_exact_size(draw_size));
}
