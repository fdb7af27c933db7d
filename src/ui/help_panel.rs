use eframe::egui;

use crate::help_text;

/// Which control's help page to show, shared by every form panel.
///
/// Panels call `set` while the pointer is over one of their rows. The side
/// panel renders before the forms do, so `page` falls back to the hover
/// carried over from the previous frame; a frame with no `set` call restores
/// the default page.
#[derive(Default)]
pub struct HelpSelection {
    hovered: Option<&'static str>,
    carried: Option<&'static str>,
}

impl HelpSelection {
    /// Start a new frame. The previous frame's hover sticks around for one
    /// frame so the panel can be drawn before the forms.
    pub fn begin_frame(&mut self) {
        self.carried = self.hovered.take();
    }

    pub fn set(&mut self, name: &'static str) {
        self.hovered = Some(name);
    }

    /// (title, body) of the page to display this frame
    pub fn page(&self) -> (&'static str, &'static str) {
        if let Some(name) = self.hovered.or(self.carried) {
            if let Some(text) = help_text::lookup(name) {
                return (name, text);
            }
        }
        (help_text::DEFAULT_TITLE, help_text::DEFAULT_HELP)
    }
}

/// Render the shared help side panel
pub fn render_help_panel(ctx: &egui::Context, selection: &HelpSelection) {
    egui::SidePanel::right("help_panel")
        .default_width(280.0)
        .show(ctx, |ui| {
            let (title, text) = selection.page();
            ui.heading(title);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(text);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_when_nothing_hovered() {
        let selection = HelpSelection::default();
        let (title, text) = selection.page();
        assert_eq!(title, help_text::DEFAULT_TITLE);
        assert_eq!(text, help_text::DEFAULT_HELP);
    }

    #[test]
    fn test_hovered_control_page_shown() {
        let mut selection = HelpSelection::default();
        selection.set("IMinStrongBeams");
        let (title, text) = selection.page();
        assert_eq!(title, "IMinStrongBeams");
        assert_eq!(text, help_text::lookup("IMinStrongBeams").unwrap());
    }

    #[test]
    fn test_hover_carries_into_the_next_frame() {
        let mut selection = HelpSelection::default();
        selection.set("IWriteFLAG");
        selection.begin_frame();
        assert_eq!(selection.page().0, "IWriteFLAG");
    }

    #[test]
    fn test_frame_without_hover_restores_default() {
        let mut selection = HelpSelection::default();
        selection.set("IWriteFLAG");
        selection.begin_frame();
        selection.begin_frame();
        assert_eq!(selection.page().0, help_text::DEFAULT_TITLE);
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let mut selection = HelpSelection::default();
        selection.set("INotRegistered");
        assert_eq!(selection.page().0, help_text::DEFAULT_TITLE);
    }
}
