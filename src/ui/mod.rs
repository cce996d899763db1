//! GTK4 shell
//!
//! Widgets for the launcher window, the analysis window and its sections
//! dock. All decisions are delegated to [`crate::launcher`].

pub mod components;
pub mod helpers;
pub mod new_file_dialog;
pub mod sections_dock;
pub mod windows;
