/// application settings for the felix front end
/// these can be modified at runtime through the options bar
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistent front-end preferences. Control values are not stored here, they
/// live in felix.inp files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// MPI core count passed to mpirun (1 runs the binary directly)
    pub mpi_cores: u32,
    pub show_help_panel: bool,
    /// pop the output viewer open when a run succeeds
    pub viewer_auto_open: bool,

    // last directories used by the file dialogs
    pub last_cif_dir: Option<PathBuf>,
    pub last_output_dir: Option<PathBuf>,
    pub last_input_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            mpi_cores: 1,
            show_help_panel: true,
            viewer_auto_open: true,
            last_cif_dir: None,
            last_output_dir: None,
            last_input_dir: None,
        }
    }
}

impl AppSettings {
    /// save settings to JSON file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write("settings.json", json)?;
        Ok(())
    }

    /// load settings from JSON file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        match std::fs::read_to_string("settings.json") {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("failed to parse settings.json: {e}. using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                // file doesn't exist or can't be read - use defaults
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sensible() {
        let settings = AppSettings::default();
        assert_eq!(settings.mpi_cores, 1);
        assert!(settings.show_help_panel);
        assert!(settings.viewer_auto_open);
        assert!(settings.last_cif_dir.is_none());
        assert!(settings.last_output_dir.is_none());
        assert!(settings.last_input_dir.is_none());
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = AppSettings {
            mpi_cores: 8,
            show_help_panel: false,
            last_cif_dir: Some(PathBuf::from("/data/crystals")),
            ..AppSettings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let restored: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }
}
