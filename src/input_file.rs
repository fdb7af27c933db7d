/// Writer and parser for felix.inp, the simulator's keyword input file.
/// One `KEY = VALUE` line per control; `#` starts a comment. Choice controls
/// serialize as the index into their option list, and the three image output
/// checkboxes collapse into a single IImageFLAG bitmask.
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::schema::{self, Category, ControlKind, ControlValue, Descriptor};
use crate::ui::form::FormPanel;

/// combined key for the image output mode checkboxes
pub const IMAGE_FLAG_KEY: &str = "IImageFLAG";

#[derive(Debug, Error)]
pub enum InputFileError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected 'KEY = VALUE'")]
    MissingSeparator { line: usize },
    #[error("line {line}: unknown parameter '{key}'")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: bad value '{value}' for {key}")]
    BadValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: choice index {index} out of range for {key} ({count} options)")]
    ChoiceOutOfRange {
        line: usize,
        key: String,
        index: usize,
        count: usize,
    },
}

/// One parsed `KEY = VALUE` line resolved against the control tables.
/// Parsing produces the full list before anything is applied, so a bad file
/// never half-updates the panels.
#[derive(Clone, Copy, Debug)]
pub struct Assignment {
    pub category: Category,
    pub index: usize,
    pub value: ControlValue,
}

/// Render the current panel values as a felix.inp document.
pub fn render(panels: &[FormPanel]) -> String {
    let mut out = String::from("# Input file for felixsim\n");

    for panel in panels {
        out.push('\n');
        out.push_str(&format!("# {}\n", panel.category.title()));

        for (descriptor, value) in panel.entries() {
            if panel.category == Category::Image && descriptor.kind == ControlKind::Checkbox {
                continue;
            }
            out.push_str(&format!(
                "{:<24} = {}\n",
                descriptor.name,
                format_value(descriptor, value)
            ));
        }

        if panel.category == Category::Image {
            out.push_str(&format!(
                "{:<24} = {}\n",
                IMAGE_FLAG_KEY,
                image_mode_bits(panel)
            ));
        }
    }

    out
}

/// Output mode bitmask: one bit per image checkbox, in table order.
fn image_mode_bits(panel: &FormPanel) -> u32 {
    let mut bits = 0;
    let mut bit = 0;
    for (descriptor, value) in panel.entries() {
        if descriptor.kind == ControlKind::Checkbox {
            if matches!(value, ControlValue::Bool(true)) {
                bits |= 1 << bit;
            }
            bit += 1;
        }
    }
    bits
}

fn image_checkbox_indices() -> Vec<usize> {
    Category::Image
        .descriptors()
        .iter()
        .enumerate()
        .filter(|(_, d)| d.kind == ControlKind::Checkbox)
        .map(|(i, _)| i)
        .collect()
}

fn format_value(descriptor: &Descriptor, value: &ControlValue) -> String {
    match value {
        ControlValue::Int(v) => v.to_string(),
        ControlValue::Float(v) => format!("{:.prec$}", v, prec = descriptor.digits),
        ControlValue::Bool(true) => "1".to_owned(),
        ControlValue::Bool(false) => "0".to_owned(),
        ControlValue::Choice(i) => i.to_string(),
    }
}

/// Parse a felix.inp document into control assignments.
pub fn parse(text: &str) -> Result<Vec<Assignment>, InputFileError> {
    let mut assignments = Vec::new();

    for (line_index, raw) in text.lines().enumerate() {
        let line = line_index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value_text) = trimmed
            .split_once('=')
            .ok_or(InputFileError::MissingSeparator { line })?;
        let key = key.trim();
        let value_text = value_text.trim();

        if key == IMAGE_FLAG_KEY {
            assignments.extend(parse_image_flag(line, value_text)?);
            continue;
        }

        let (category, index) =
            schema::find(key).ok_or_else(|| InputFileError::UnknownKey {
                line,
                key: key.to_owned(),
            })?;
        let descriptor = &category.descriptors()[index];
        let value = parse_value(descriptor, value_text, line)?;
        assignments.push(Assignment { category, index, value });
    }

    Ok(assignments)
}

fn parse_image_flag(line: usize, value_text: &str) -> Result<Vec<Assignment>, InputFileError> {
    let checkboxes = image_checkbox_indices();
    let limit = (1u32 << checkboxes.len()) - 1;
    let bad = || InputFileError::BadValue {
        line,
        key: IMAGE_FLAG_KEY.to_owned(),
        value: value_text.to_owned(),
    };

    let bits: u32 = value_text.parse().map_err(|_| bad())?;
    if bits > limit {
        return Err(bad());
    }

    Ok(checkboxes
        .into_iter()
        .enumerate()
        .map(|(bit, index)| Assignment {
            category: Category::Image,
            index,
            value: ControlValue::Bool(bits & (1 << bit) != 0),
        })
        .collect())
}

fn parse_value(
    descriptor: &Descriptor,
    text: &str,
    line: usize,
) -> Result<ControlValue, InputFileError> {
    let bad = || InputFileError::BadValue {
        line,
        key: descriptor.name.to_owned(),
        value: text.to_owned(),
    };

    match descriptor.kind {
        ControlKind::Spin => {
            let v: i64 = text.parse().map_err(|_| bad())?;
            // out-of-range numbers clamp the same way the spinner widget would
            Ok(ControlValue::Int(
                v.clamp(descriptor.min as i64, descriptor.max as i64),
            ))
        }
        ControlKind::FloatSpin => {
            let v: f64 = text.parse().map_err(|_| bad())?;
            Ok(ControlValue::Float(v.clamp(descriptor.min, descriptor.max)))
        }
        ControlKind::Checkbox => match text {
            "0" => Ok(ControlValue::Bool(false)),
            "1" => Ok(ControlValue::Bool(true)),
            _ => Err(bad()),
        },
        ControlKind::Choice => {
            let index: usize = text.parse().map_err(|_| bad())?;
            if index >= descriptor.choices.len() {
                return Err(InputFileError::ChoiceOutOfRange {
                    line,
                    key: descriptor.name.to_owned(),
                    index,
                    count: descriptor.choices.len(),
                });
            }
            Ok(ControlValue::Choice(index))
        }
    }
}

/// Overwrite panel values with parsed assignments.
pub fn apply(assignments: &[Assignment], panels: &mut [FormPanel]) {
    for assignment in assignments {
        if let Some(panel) = panels
            .iter_mut()
            .find(|p| p.category == assignment.category)
        {
            if let Some(slot) = panel.values.get_mut(assignment.index) {
                *slot = assignment.value;
            }
        }
    }
}

pub fn save(path: &Path, panels: &[FormPanel]) -> Result<(), InputFileError> {
    std::fs::write(path, render(panels)).map_err(|source| InputFileError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::info!("wrote input file {}", path.display());
    Ok(())
}

/// Read an input file into the panels. A parse failure leaves every value
/// untouched.
pub fn load(path: &Path, panels: &mut [FormPanel]) -> Result<(), InputFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputFileError::Io {
        path: path.to_owned(),
        source,
    })?;
    let assignments = parse(&text)?;
    apply(&assignments, panels);
    log::info!("loaded input file {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(panels: &mut [FormPanel], name: &str, value: ControlValue) {
        let (category, index) = schema::find(name).unwrap();
        let panel = panels.iter_mut().find(|p| p.category == category).unwrap();
        panel.values[index] = value;
    }

    fn get(panels: &[FormPanel], name: &str) -> ControlValue {
        let (category, index) = schema::find(name).unwrap();
        let panel = panels.iter().find(|p| p.category == category).unwrap();
        panel.values[index]
    }

    #[test]
    fn test_render_uses_one_key_per_control() {
        let panels = FormPanel::all();
        let text = render(&panels);

        for panel in &panels {
            for (descriptor, _) in panel.entries() {
                if panel.category == Category::Image
                    && descriptor.kind == ControlKind::Checkbox
                {
                    assert!(
                        !text.contains(descriptor.name),
                        "{} should fold into {}",
                        descriptor.name,
                        IMAGE_FLAG_KEY
                    );
                } else {
                    assert_eq!(
                        text.matches(descriptor.name).count(),
                        1,
                        "{} should appear once",
                        descriptor.name
                    );
                }
            }
        }
        assert_eq!(text.matches(IMAGE_FLAG_KEY).count(), 1);
    }

    fn value_of<'a>(text: &'a str, key: &str) -> &'a str {
        text.lines()
            .find_map(|line| {
                let (k, v) = line.split_once('=')?;
                (k.trim() == key).then_some(v.trim())
            })
            .unwrap()
    }

    #[test]
    fn test_defaults_serialize_with_expected_values() {
        let panels = FormPanel::all();
        let text = render(&panels);

        // IWriteFLAG default is the last of four options
        assert_eq!(value_of(&text, "IWriteFLAG"), "3");
        assert_eq!(value_of(&text, "IMinReflectionPool"), "15");
        assert_eq!(value_of(&text, "RDebyeWallerConstant"), "0.4670");
        assert_eq!(value_of(&text, "IPixelCount"), "64");
        assert_eq!(value_of(&text, "IMaskFLAG"), "0");
        // montage alone is bit 0
        assert_eq!(value_of(&text, "IImageFLAG"), "1");
    }

    #[test]
    fn test_keys_align_in_one_column() {
        let text = render(&FormPanel::all());
        for line in text.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            assert_eq!(line.find('='), Some(25), "line {line:?}");
        }
    }

    #[test]
    fn test_round_trip_restores_modified_values() {
        let mut source = FormPanel::all();
        set(&mut source, "IWriteFLAG", ControlValue::Choice(0));
        set(&mut source, "IMinReflectionPool", ControlValue::Int(25));
        set(&mut source, "RDebyeWallerConstant", ControlValue::Float(0.25));
        set(&mut source, "IMaskFLAG", ControlValue::Bool(true));
        set(&mut source, "RInitialThickness", ControlValue::Float(750.0));
        set(&mut source, "Montage", ControlValue::Bool(false));
        set(&mut source, "Stack Reflections", ControlValue::Bool(true));

        let text = render(&source);

        let mut restored = FormPanel::all();
        let assignments = parse(&text).unwrap();
        apply(&assignments, &mut restored);

        for (a, b) in source.iter().zip(restored.iter()) {
            assert_eq!(a.values, b.values, "category {:?}", a.category);
        }
    }

    #[test]
    fn test_image_bitmask_encoding() {
        let mut panels = FormPanel::all();
        set(&mut panels, "Montage", ControlValue::Bool(false));
        set(&mut panels, "Stack Reflections", ControlValue::Bool(true));
        set(&mut panels, "Amplitude and Phase", ControlValue::Bool(true));

        let text = render(&panels);
        assert!(text.contains("IImageFLAG               = 6"));

        let mut restored = FormPanel::all();
        apply(&parse(&text).unwrap(), &mut restored);
        assert_eq!(get(&restored, "Montage"), ControlValue::Bool(false));
        assert_eq!(get(&restored, "Stack Reflections"), ControlValue::Bool(true));
        assert_eq!(
            get(&restored, "Amplitude and Phase"),
            ControlValue::Bool(true)
        );
    }

    #[test]
    fn test_explicit_checkbox_keys_still_parse() {
        // flags-category checkboxes keep their own keys
        let assignments = parse("IMaskFLAG = 1\n").unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].value, ControlValue::Bool(true));
    }

    #[test]
    fn test_unknown_key_rejected_with_line_number() {
        let text = "# comment\n\nIBogusFLAG = 3\n";
        match parse(text) {
            Err(InputFileError::UnknownKey { line, key }) => {
                assert_eq!(line, 3);
                assert_eq!(key, "IBogusFLAG");
            }
            other => panic!("expected UnknownKey, got {:?}", other.map(|a| a.len())),
        }
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(matches!(
            parse("IWriteFLAG 3\n"),
            Err(InputFileError::MissingSeparator { line: 1 })
        ));
    }

    #[test]
    fn test_bad_numeric_value_rejected() {
        assert!(matches!(
            parse("IMinWeakBeams = many\n"),
            Err(InputFileError::BadValue { line: 1, .. })
        ));
    }

    #[test]
    fn test_choice_index_bounds_checked() {
        match parse("IAbsorbFLAG = 5\n") {
            Err(InputFileError::ChoiceOutOfRange { index, count, .. }) => {
                assert_eq!(index, 5);
                assert_eq!(count, 2);
            }
            other => panic!("expected ChoiceOutOfRange, got {:?}", other.map(|a| a.len())),
        }
    }

    #[test]
    fn test_image_bitmask_range_checked() {
        assert!(matches!(
            parse("IImageFLAG = 9\n"),
            Err(InputFileError::BadValue { .. })
        ));
    }

    #[test]
    fn test_out_of_range_numbers_clamp_like_the_widget() {
        let assignments = parse("IMinWeakBeams = 100000000\n").unwrap();
        assert_eq!(assignments[0].value, ControlValue::Int(100000));

        let assignments = parse("RAcceptanceAngle = -4.0\n").unwrap();
        assert_eq!(assignments[0].value, ControlValue::Float(0.0));
    }

    #[test]
    fn test_failed_parse_leaves_values_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("felix.inp");
        std::fs::write(&path, "IMinWeakBeams = 9\nIBogusFLAG = 1\n").unwrap();

        let mut panels = FormPanel::all();
        assert!(load(&path, &mut panels).is_err());
        assert_eq!(get(&panels, "IMinWeakBeams"), ControlValue::Int(5));
    }

    #[test]
    fn test_save_then_load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("felix.inp");

        let mut source = FormPanel::all();
        set(&mut source, "IReflectOut", ControlValue::Int(12));
        set(&mut source, "IXDirectionFLAG", ControlValue::Choice(1));
        save(&path, &source).unwrap();

        let mut restored = FormPanel::all();
        load(&path, &mut restored).unwrap();
        assert_eq!(get(&restored, "IReflectOut"), ControlValue::Int(12));
        assert_eq!(get(&restored, "IXDirectionFLAG"), ControlValue::Choice(1));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let mut panels = FormPanel::all();
        let missing = Path::new("/nonexistent/felix.inp");
        assert!(matches!(
            load(missing, &mut panels),
            Err(InputFileError::Io { .. })
        ));
    }
}
