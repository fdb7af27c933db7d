use eframe::egui;

use crate::schema::{Category, ControlKind, ControlValue, Descriptor};
use crate::ui::help_panel::HelpSelection;

/// Number of grid rows needed for `count` controls at two per row.
pub fn row_count(count: usize) -> usize {
    (count + 1) / 2
}

/// An odd control count leaves a hole in the last row; a spacer pair keeps
/// the column widths aligned.
pub fn needs_spacer(count: usize) -> bool {
    count % 2 == 1
}

/// One parameter category rendered as a form. The descriptor table drives
/// everything: labels, widget kinds, ranges and help pages. Values pair 1:1
/// with the descriptors.
pub struct FormPanel {
    pub category: Category,
    pub values: Vec<ControlValue>,
}

impl FormPanel {
    pub fn new(category: Category) -> Self {
        let values = category
            .descriptors()
            .iter()
            .map(|d| d.initial_value())
            .collect();
        Self { category, values }
    }

    /// Build one panel per category, in display order.
    pub fn all() -> Vec<FormPanel> {
        Category::ALL.iter().map(|c| FormPanel::new(*c)).collect()
    }

    pub fn descriptors(&self) -> &'static [Descriptor] {
        self.category.descriptors()
    }

    /// (descriptor, value) pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (&'static Descriptor, &ControlValue)> {
        self.category.descriptors().iter().zip(self.values.iter())
    }

    /// Render the panel as a label/control grid, two controls per row.
    /// Hovering a row selects that control's help page.
    pub fn ui(&mut self, ui: &mut egui::Ui, help: &mut HelpSelection) {
        let descriptors = self.category.descriptors();
        let values = &mut self.values;

        egui::Grid::new(self.category.title())
            .num_columns(4)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for row in 0..row_count(descriptors.len()) {
                    for col in 0..2 {
                        let index = row * 2 + col;
                        match descriptors.get(index) {
                            Some(descriptor) => {
                                let label = ui.label(descriptor.label);
                                let control =
                                    control_widget(ui, descriptor, &mut values[index]);
                                if label.hovered() || control.hovered() {
                                    help.set(descriptor.name);
                                }
                            }
                            None => {
                                // trailing spacer for the odd final row
                                ui.label("");
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }
}

/// Widget for a single control. The kind decides the widget; the value
/// variant always matches because both come from the same descriptor.
fn control_widget(
    ui: &mut egui::Ui,
    descriptor: &Descriptor,
    value: &mut ControlValue,
) -> egui::Response {
    match (descriptor.kind, value) {
        (ControlKind::Spin, ControlValue::Int(v)) => ui.add(
            egui::DragValue::new(v).range(descriptor.min..=descriptor.max),
        ),
        (ControlKind::FloatSpin, ControlValue::Float(v)) => ui.add(
            egui::DragValue::new(v)
                .range(descriptor.min..=descriptor.max)
                .speed(descriptor.increment)
                .fixed_decimals(descriptor.digits),
        ),
        (ControlKind::Checkbox, ControlValue::Bool(v)) => ui.checkbox(v, ""),
        (ControlKind::Choice, ControlValue::Choice(selected)) => {
            egui::ComboBox::from_id_salt(descriptor.name)
                .selected_text(descriptor.choices.get(*selected).copied().unwrap_or(""))
                .show_ui(ui, |ui| {
                    for (i, option) in descriptor.choices.iter().enumerate() {
                        ui.selectable_value(selected, i, *option);
                    }
                })
                .response
        }
        _ => ui.label("?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_row_count_rounds_up() {
        assert_eq!(row_count(0), 0);
        assert_eq!(row_count(1), 1);
        assert_eq!(row_count(2), 1);
        assert_eq!(row_count(3), 2);
        assert_eq!(row_count(7), 4);
        assert_eq!(row_count(8), 4);
        assert_eq!(row_count(13), 7);
    }

    #[test]
    fn test_spacer_needed_only_for_odd_counts() {
        assert!(needs_spacer(1));
        assert!(!needs_spacer(2));
        assert!(needs_spacer(7));
        assert!(!needs_spacer(8));
        assert!(needs_spacer(13));
    }

    #[test]
    fn test_shipped_category_grids() {
        // flags: 8 controls, 4 full rows
        assert_eq!(row_count(schema::FLAG_CONTROLS.len()), 4);
        assert!(!needs_spacer(schema::FLAG_CONTROLS.len()));
        // microscope: 13 controls, 7 rows with a trailing spacer
        assert_eq!(row_count(schema::MICROSCOPE_CONTROLS.len()), 7);
        assert!(needs_spacer(schema::MICROSCOPE_CONTROLS.len()));
        // image: 7 controls, 4 rows with a trailing spacer
        assert_eq!(row_count(schema::IMAGE_CONTROLS.len()), 4);
        assert!(needs_spacer(schema::IMAGE_CONTROLS.len()));
    }

    #[test]
    fn test_panel_values_pair_with_descriptors() {
        for panel in FormPanel::all() {
            assert_eq!(panel.values.len(), panel.descriptors().len());
            for (descriptor, value) in panel.entries() {
                assert_eq!(*value, descriptor.initial_value());
            }
        }
    }

    #[test]
    fn test_panels_built_in_display_order() {
        let panels = FormPanel::all();
        let categories: Vec<Category> = panels.iter().map(|p| p.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }
}
