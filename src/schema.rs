/// Control descriptor tables for the felixsim front-end.
/// Every form panel is built from one of these tables; nothing about the
/// scientific parameters is hard-coded in the UI layer.
use thiserror::Error;

/// Widget family a descriptor maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// integer spinner, steps by 1
    Spin,
    /// float spinner with explicit step and display precision
    FloatSpin,
    Checkbox,
    /// drop-down over a fixed option list
    Choice,
}

/// Default payload of a control. Numeric and choice defaults are kept as
/// text, the same form they take in the input file; checkboxes are plain
/// bools.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Seed {
    Text(&'static str),
    Flag(bool),
}

/// One row of a control table: everything needed to build, bound and
/// document a single widget.
#[derive(Clone, Copy, Debug)]
pub struct Descriptor {
    /// parameter name, used as the input-file key
    pub name: &'static str,
    /// label shown next to the widget (usually the name itself)
    pub label: &'static str,
    pub kind: ControlKind,
    pub default: Seed,
    /// FloatSpin step size; Spin always steps by 1
    pub increment: f64,
    pub min: f64,
    pub max: f64,
    /// FloatSpin display precision
    pub digits: usize,
    pub choices: &'static [&'static str],
}

impl Descriptor {
    pub const fn spin(name: &'static str, default: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            label: name,
            kind: ControlKind::Spin,
            default: Seed::Text(default),
            increment: 1.0,
            min,
            max,
            digits: 0,
            choices: &[],
        }
    }

    pub const fn float_spin(
        name: &'static str,
        default: &'static str,
        increment: f64,
        min: f64,
        max: f64,
        digits: usize,
    ) -> Self {
        Self {
            name,
            label: name,
            kind: ControlKind::FloatSpin,
            default: Seed::Text(default),
            increment,
            min,
            max,
            digits,
            choices: &[],
        }
    }

    pub const fn checkbox(name: &'static str, default: bool) -> Self {
        Self {
            name,
            label: name,
            kind: ControlKind::Checkbox,
            default: Seed::Flag(default),
            increment: 0.0,
            min: 0.0,
            max: 0.0,
            digits: 0,
            choices: &[],
        }
    }

    pub const fn choice(
        name: &'static str,
        default: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label: name,
            kind: ControlKind::Choice,
            default: Seed::Text(default),
            increment: 0.0,
            min: 0.0,
            max: 0.0,
            digits: 0,
            choices,
        }
    }

    /// override the on-screen label while keeping the parameter name as key
    pub const fn labeled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Materialize the live value for this control. Tables are validated at
    /// startup, so the parses here cannot fail for shipped descriptors.
    pub fn initial_value(&self) -> ControlValue {
        match (self.kind, self.default) {
            (ControlKind::Spin, Seed::Text(t)) => ControlValue::Int(t.parse().unwrap_or(0)),
            (ControlKind::FloatSpin, Seed::Text(t)) => {
                ControlValue::Float(t.parse().unwrap_or(0.0))
            }
            (ControlKind::Checkbox, Seed::Flag(b)) => ControlValue::Bool(b),
            (ControlKind::Choice, Seed::Text(t)) => ControlValue::Choice(
                self.choices.iter().position(|c| *c == t).unwrap_or(0),
            ),
            // mismatched seeds are rejected by validation before any panel exists
            (ControlKind::Checkbox, Seed::Text(_)) => ControlValue::Bool(false),
            (_, Seed::Flag(_)) => ControlValue::Int(0),
        }
    }

    fn check(&self, category: &'static str) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyName { category });
        }
        match self.kind {
            ControlKind::Spin => {
                let text = self.default_text()?;
                let value: i64 = text.parse().map_err(|_| SchemaError::BadDefault {
                    name: self.name,
                    text,
                    expected: "an integer",
                })?;
                if self.min.fract() != 0.0 || self.max.fract() != 0.0 {
                    return Err(SchemaError::FractionalBounds { name: self.name });
                }
                self.check_range(value as f64)?;
            }
            ControlKind::FloatSpin => {
                let text = self.default_text()?;
                let value: f64 = text.parse().map_err(|_| SchemaError::BadDefault {
                    name: self.name,
                    text,
                    expected: "a number",
                })?;
                if self.increment <= 0.0 {
                    return Err(SchemaError::BadIncrement { name: self.name });
                }
                self.check_range(value)?;
            }
            ControlKind::Checkbox => {
                if !matches!(self.default, Seed::Flag(_)) {
                    return Err(SchemaError::SeedMismatch {
                        name: self.name,
                        expected: "a checkbox state",
                    });
                }
            }
            ControlKind::Choice => {
                let text = self.default_text()?;
                if self.choices.is_empty() {
                    return Err(SchemaError::EmptyChoices { name: self.name });
                }
                if !self.choices.contains(&text) {
                    return Err(SchemaError::UnknownChoice { name: self.name, text });
                }
            }
        }
        if crate::help_text::lookup(self.name).is_none() {
            return Err(SchemaError::MissingHelp { name: self.name });
        }
        Ok(())
    }

    fn default_text(&self) -> Result<&'static str, SchemaError> {
        match self.default {
            Seed::Text(t) => Ok(t),
            Seed::Flag(_) => Err(SchemaError::SeedMismatch {
                name: self.name,
                expected: "a text default",
            }),
        }
    }

    fn check_range(&self, value: f64) -> Result<(), SchemaError> {
        if self.min > self.max {
            return Err(SchemaError::InvertedRange {
                name: self.name,
                min: self.min,
                max: self.max,
            });
        }
        if value < self.min || value > self.max {
            return Err(SchemaError::DefaultOutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Live state of one control, 1:1 with its descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// index into the descriptor's choice list
    Choice(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{name}: default '{text}' is not {expected}")]
    BadDefault {
        name: &'static str,
        text: &'static str,
        expected: &'static str,
    },
    #[error("{name}: default does not match the control kind (expected {expected})")]
    SeedMismatch {
        name: &'static str,
        expected: &'static str,
    },
    #[error("{name}: choice list is empty")]
    EmptyChoices { name: &'static str },
    #[error("{name}: default '{text}' is not one of the listed choices")]
    UnknownChoice {
        name: &'static str,
        text: &'static str,
    },
    #[error("{name}: range {min} to {max} is inverted")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name}: default {value} lies outside {min} to {max}")]
    DefaultOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name}: spin bounds must be whole numbers")]
    FractionalBounds { name: &'static str },
    #[error("{name}: increment must be positive")]
    BadIncrement { name: &'static str },
    #[error("{name}: no help text registered")]
    MissingHelp { name: &'static str },
    #[error("{category}: control with empty name")]
    EmptyName { category: &'static str },
}

/// The six parameter categories shown as form panels, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Flags,
    Radius,
    Beam,
    Crystal,
    Microscope,
    Image,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Flags,
        Category::Radius,
        Category::Beam,
        Category::Crystal,
        Category::Microscope,
        Category::Image,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Flags => "Flags",
            Category::Radius => "Radius of Beam",
            Category::Beam => "Beam Selection",
            Category::Crystal => "Crystal Settings",
            Category::Microscope => "Microscope Selection",
            Category::Image => "Image Settings",
        }
    }

    pub fn descriptors(self) -> &'static [Descriptor] {
        match self {
            Category::Flags => FLAG_CONTROLS,
            Category::Radius => RADIUS_CONTROLS,
            Category::Beam => BEAM_CONTROLS,
            Category::Crystal => CRYSTAL_CONTROLS,
            Category::Microscope => MICROSCOPE_CONTROLS,
            Category::Image => IMAGE_CONTROLS,
        }
    }
}

pub const FLAG_CONTROLS: &[Descriptor] = &[
    Descriptor::choice(
        "IWriteFLAG",
        "All information",
        &["Silent", "Crucial information", "Basic information", "All information"],
    ),
    Descriptor::choice(
        "IScatterFactorMethodFLAG",
        "Kirkland",
        &["Kirkland", "Doyle-Turner", "Peng", "Lobato"],
    ),
    Descriptor::checkbox("IMaskFLAG", false),
    Descriptor::checkbox("IZolzFLAG", false),
    Descriptor::choice("IAbsorbFLAG", "Proportional", &["None", "Proportional"]),
    Descriptor::choice("IAnisoDebyeWallerFLAG", "0", &["0"]),
    Descriptor::choice("IPseudoCubicFLAG", "Orthorhombic", &["Orthorhombic"]),
    Descriptor::choice("IXDirectionFLAG", "Automatic", &["Automatic", "Manual"]),
];

pub const RADIUS_CONTROLS: &[Descriptor] = &[
    Descriptor::float_spin("IPixelCount", "64", 64.0, 0.0, 512.0, 0)
        .labeled("Radius of Beam in Pixels"),
];

pub const BEAM_CONTROLS: &[Descriptor] = &[
    Descriptor::spin("IMinReflectionPool", "15", 0.0, 100000.0),
    Descriptor::spin("IMinStrongBeams", "7", 0.0, 100000.0),
    Descriptor::spin("IMinWeakBeams", "5", 0.0, 100000.0),
    Descriptor::float_spin("RBSBMax", "0.1", 0.1, 0.0, 100000.0, 1),
    Descriptor::float_spin("RBSPMax", "0.1", 0.1, 0.0, 100000.0, 1),
];

pub const CRYSTAL_CONTROLS: &[Descriptor] = &[
    Descriptor::float_spin("RDebyeWallerConstant", "0.467", 0.001, 0.0, 100000.0, 4),
    Descriptor::float_spin("RAbsorptionPer", "2.9", 0.1, 0.0, 100000.0, 1),
];

pub const MICROSCOPE_CONTROLS: &[Descriptor] = &[
    Descriptor::float_spin("ROuterConvergenceAngle", "3.0", 0.1, 0.0, 50.0, 1),
    Descriptor::float_spin("RInnerConvergenceAngle", "0.0", 0.1, 0.0, 50.0, 1),
    Descriptor::spin("IIncidentBeamDirectionX", "1", -100000.0, 100000.0),
    Descriptor::spin("IIncidentBeamDirectionY", "1", -100000.0, 100000.0),
    Descriptor::spin("IIncidentBeamDirectionZ", "1", -100000.0, 100000.0),
    Descriptor::spin("IXDirectionX", "1", -100000.0, 100000.0),
    Descriptor::spin("IXDirectionY", "1", -100000.0, 100000.0),
    Descriptor::spin("IXDirectionZ", "1", -100000.0, 100000.0),
    Descriptor::spin("INormalDirectionX", "1", -100000.0, 100000.0),
    Descriptor::spin("INormalDirectionY", "1", -100000.0, 100000.0),
    Descriptor::spin("INormalDirectionZ", "1", -100000.0, 100000.0),
    Descriptor::float_spin("RAcceleratingVoltage", "200.0", 0.1, 0.0, 100000.0, 1),
    Descriptor::float_spin("RAcceptanceAngle", "0.0", 0.1, 0.0, 180.0, 1),
];

pub const IMAGE_CONTROLS: &[Descriptor] = &[
    Descriptor::float_spin("RInitialThickness", "1000.0", 1.0, 0.0, 100000.0, 1),
    Descriptor::float_spin("RFinalThickness", "1000.0", 1.0, 0.0, 100000.0, 1),
    Descriptor::float_spin("RDeltaThickness", "10.0", 1.0, 0.0, 100000.0, 1),
    Descriptor::spin("IReflectOut", "7", 0.0, 100000.0),
    Descriptor::checkbox("Montage", true),
    Descriptor::checkbox("Stack Reflections", false),
    Descriptor::checkbox("Amplitude and Phase", false),
];

/// Check one descriptor table. Used by `validate_all` and directly by tests.
pub fn validate(category: &'static str, table: &[Descriptor]) -> Result<(), SchemaError> {
    for descriptor in table {
        descriptor.check(category)?;
    }
    Ok(())
}

/// Check every shipped table. Runs once at startup, before any widget is
/// created; a malformed table is a programming error and aborts the launch.
pub fn validate_all() -> Result<(), SchemaError> {
    for category in Category::ALL {
        validate(category.title(), category.descriptors())?;
    }
    Ok(())
}

/// Locate a control by parameter name across all categories.
pub fn find(name: &str) -> Option<(Category, usize)> {
    for category in Category::ALL {
        if let Some(index) = category
            .descriptors()
            .iter()
            .position(|d| d.name == name)
        {
            return Some((category, index));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_tables_validate() {
        assert_eq!(validate_all(), Ok(()));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(FLAG_CONTROLS.len(), 8);
        assert_eq!(RADIUS_CONTROLS.len(), 1);
        assert_eq!(BEAM_CONTROLS.len(), 5);
        assert_eq!(CRYSTAL_CONTROLS.len(), 2);
        assert_eq!(MICROSCOPE_CONTROLS.len(), 13);
        assert_eq!(IMAGE_CONTROLS.len(), 7);
    }

    #[test]
    fn test_crystal_controls_accept_large_values() {
        // the simulator takes both constants up to 100000
        for name in ["RDebyeWallerConstant", "RAbsorptionPer"] {
            let (category, index) = find(name).unwrap();
            let descriptor = &category.descriptors()[index];
            assert_eq!(descriptor.max, 100000.0, "{name}");
        }
    }

    #[test]
    fn test_spin_rejects_text_default() {
        let bad = Descriptor::spin("IMinWeakBeams", "five", 0.0, 100.0);
        assert_eq!(
            validate("Beam Selection", &[bad]),
            Err(SchemaError::BadDefault {
                name: "IMinWeakBeams",
                text: "five",
                expected: "an integer",
            })
        );
    }

    #[test]
    fn test_spin_rejects_fractional_bounds() {
        let bad = Descriptor::spin("IMinWeakBeams", "5", 0.5, 100.0);
        assert_eq!(
            validate("Beam Selection", &[bad]),
            Err(SchemaError::FractionalBounds { name: "IMinWeakBeams" })
        );
    }

    #[test]
    fn test_float_spin_rejects_zero_increment() {
        let bad = Descriptor::float_spin("RBSBMax", "0.1", 0.0, 0.0, 10.0, 1);
        assert_eq!(
            validate("Beam Selection", &[bad]),
            Err(SchemaError::BadIncrement { name: "RBSBMax" })
        );
    }

    #[test]
    fn test_default_must_lie_in_range() {
        let bad = Descriptor::float_spin("RAcceptanceAngle", "200.0", 0.1, 0.0, 180.0, 1);
        assert_eq!(
            validate("Microscope Selection", &[bad]),
            Err(SchemaError::DefaultOutOfRange {
                name: "RAcceptanceAngle",
                value: 200.0,
                min: 0.0,
                max: 180.0,
            })
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let bad = Descriptor::spin("IReflectOut", "7", 100.0, 0.0);
        assert_eq!(
            validate("Image Settings", &[bad]),
            Err(SchemaError::InvertedRange {
                name: "IReflectOut",
                min: 100.0,
                max: 0.0,
            })
        );
    }

    #[test]
    fn test_choice_default_must_be_listed() {
        let bad = Descriptor::choice("IAbsorbFLAG", "Linear", &["None", "Proportional"]);
        assert_eq!(
            validate("Flags", &[bad]),
            Err(SchemaError::UnknownChoice {
                name: "IAbsorbFLAG",
                text: "Linear",
            })
        );
    }

    #[test]
    fn test_choice_requires_options() {
        let bad = Descriptor::choice("IAbsorbFLAG", "None", &[]);
        assert_eq!(
            validate("Flags", &[bad]),
            Err(SchemaError::EmptyChoices { name: "IAbsorbFLAG" })
        );
    }

    #[test]
    fn test_kind_and_seed_must_agree() {
        let bad = Descriptor {
            default: Seed::Flag(true),
            ..Descriptor::spin("IMaskFLAG", "0", 0.0, 1.0)
        };
        assert_eq!(
            validate("Flags", &[bad]),
            Err(SchemaError::SeedMismatch {
                name: "IMaskFLAG",
                expected: "a text default",
            })
        );

        let bad = Descriptor {
            default: Seed::Text("yes"),
            ..Descriptor::checkbox("IMaskFLAG", false)
        };
        assert_eq!(
            validate("Flags", &[bad]),
            Err(SchemaError::SeedMismatch {
                name: "IMaskFLAG",
                expected: "a checkbox state",
            })
        );
    }

    #[test]
    fn test_unknown_name_needs_help_text() {
        let bad = Descriptor::spin("INotARealControl", "1", 0.0, 10.0);
        assert_eq!(
            validate("Flags", &[bad]),
            Err(SchemaError::MissingHelp { name: "INotARealControl" })
        );
    }

    #[test]
    fn test_initial_values_match_defaults() {
        assert_eq!(FLAG_CONTROLS[0].initial_value(), ControlValue::Choice(3));
        assert_eq!(FLAG_CONTROLS[2].initial_value(), ControlValue::Bool(false));
        assert_eq!(BEAM_CONTROLS[0].initial_value(), ControlValue::Int(15));
        assert_eq!(BEAM_CONTROLS[3].initial_value(), ControlValue::Float(0.1));
        assert_eq!(
            CRYSTAL_CONTROLS[0].initial_value(),
            ControlValue::Float(0.467)
        );
        assert_eq!(IMAGE_CONTROLS[4].initial_value(), ControlValue::Bool(true));
    }

    #[test]
    fn test_radius_label_differs_from_key() {
        let radius = &RADIUS_CONTROLS[0];
        assert_eq!(radius.name, "IPixelCount");
        assert_eq!(radius.label, "Radius of Beam in Pixels");
    }

    #[test]
    fn test_find_locates_controls_across_categories() {
        assert_eq!(find("IWriteFLAG"), Some((Category::Flags, 0)));
        assert_eq!(find("RAcceptanceAngle"), Some((Category::Microscope, 12)));
        assert_eq!(find("Montage"), Some((Category::Image, 4)));
        assert_eq!(find("NoSuchControl"), None);
    }
}
