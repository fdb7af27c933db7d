// UI module organization
// Each submodule handles a specific aspect of the user interface

pub mod form;
pub mod help_panel;
pub mod options;
pub mod status_bar;
pub mod viewer;

// Re-export commonly used items for convenience
pub use form::FormPanel;
pub use help_panel::{render_help_panel, HelpSelection};
pub use options::{render_options_bar, OptionActions};
pub use status_bar::render_status_bar;
pub use viewer::OutputViewer;
