//! Core of the r2launch application
//!
//! Recent files, projects and sections as plain data, plus the bridge to the
//! radare2 engine. The GTK shell lives in [`ui`] behind the `gui` feature.

pub mod engine;
pub mod error;
pub mod launcher;
pub mod presenter;
pub mod projects;
pub mod recent;
pub mod sections;
pub mod settings;

#[cfg(feature = "gui")]
pub mod dialogs;
#[cfg(feature = "gui")]
pub mod ui;
