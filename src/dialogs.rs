//! Message and file-chooser dialogs used by the launcher

use gtk4::prelude::*;
use gtk4::{
    ButtonsType, FileChooserAction, FileChooserDialog, MessageDialog, MessageType, ResponseType,
};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Reports a failed action over `parent`, which stays usable once the dialog
/// is dismissed. The error is logged as well, so headless runs still see it.
pub fn show_error(parent: &impl IsA<gtk4::Window>, title: &str, error: impl Display) {
    let detail = error.to_string();
    log::warn!("{}: {}", title, detail);

    let dialog = MessageDialog::builder()
        .transient_for(parent)
        .modal(true)
        .message_type(MessageType::Error)
        .buttons(ButtonsType::Ok)
        .text(title)
        .secondary_text(detail)
        .build();
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}

fn chooser(
    parent: &impl IsA<gtk4::Window>,
    title: &str,
    action: FileChooserAction,
    start_dir: &Path,
    on_chosen: impl Fn(PathBuf) + 'static,
) {
    let file_chooser = FileChooserDialog::builder()
        .title(title)
        .transient_for(parent)
        .modal(true)
        .action(action)
        .build();

    file_chooser.add_button("Cancel", ResponseType::Cancel);
    file_chooser.add_button("Select", ResponseType::Accept);

    if start_dir.is_dir() {
        if let Err(e) = file_chooser.set_current_folder(Some(&gio::File::for_path(start_dir))) {
            log::debug!("Cannot start chooser in {}: {}", start_dir.display(), e);
        }
    }

    file_chooser.connect_response(move |dialog, response| {
        if response == ResponseType::Accept {
            if let Some(path) = dialog.file().and_then(|file| file.path()) {
                on_chosen(path);
            }
        }
        dialog.close();
    });
    file_chooser.present();
}

/// Lets the user pick a binary to analyse
pub fn choose_file(
    parent: &impl IsA<gtk4::Window>,
    start_dir: &Path,
    on_chosen: impl Fn(PathBuf) + 'static,
) {
    chooser(parent, "Select file", FileChooserAction::Open, start_dir, on_chosen);
}

pub fn choose_folder(
    parent: &impl IsA<gtk4::Window>,
    title: &str,
    start_dir: &Path,
    on_chosen: impl Fn(PathBuf) + 'static,
) {
    chooser(parent, title, FileChooserAction::SelectFolder, start_dir, on_chosen);
}
