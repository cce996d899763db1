//! Main module for the r2launch application
//!
//! Sets up the GTK application, builds the launcher and shows the open
//! window, or loads the files given on the command line directly.

use gtk4::prelude::*;
use gtk4::{Application, Settings};
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use r2launch::dialogs::show_error;
use r2launch::engine::Radare2;
use r2launch::launcher::Launcher;
use r2launch::recent::RecentFiles;
use r2launch::settings::SettingsStore;
use r2launch::ui::new_file_dialog::NewFileDialog;
use r2launch::ui::windows::MainWindow;

fn settings_store() -> SettingsStore {
    SettingsStore::default_location().unwrap_or_else(|e| {
        log::warn!("{}; keeping settings in the temp directory", e);
        SettingsStore::new(env::temp_dir().join("r2launch-settings.json"))
    })
}

/// Builds the launcher: settings, radare2 bridge and the analysis window
/// that receives whatever gets opened.
fn build_launcher(app: &Application) -> Rc<RefCell<Launcher>> {
    let store = settings_store();
    let settings = store.load();
    log::debug!("Settings loaded from {}", store.path().display());

    if let Some(gtk_settings) = Settings::default() {
        gtk_settings.set_gtk_application_prefer_dark_theme(settings.theme == "dark");
    }

    let engine = Radare2::new(&settings.radare2_path);
    let pipeline = Rc::new(MainWindow::new(app, &settings.radare2_path));
    Rc::new(RefCell::new(Launcher::new(
        RecentFiles::new(store),
        Box::new(engine),
        pipeline,
    )))
}

/// Entry point for the r2launch application
///
/// Without arguments the open window is shown. Files passed on the command
/// line are loaded straight away; a file that cannot be loaded brings the
/// open window up instead.
fn main() -> glib::ExitCode {
    env_logger::init();

    let app = Application::builder()
        .application_id("org.radare.r2launch")
        .flags(gio::ApplicationFlags::HANDLES_OPEN)
        .build();

    let launcher: Rc<RefCell<Option<Rc<RefCell<Launcher>>>>> = Rc::new(RefCell::new(None));

    let get_launcher = {
        let launcher = launcher.clone();
        move |app: &Application| -> Rc<RefCell<Launcher>> {
            launcher
                .borrow_mut()
                .get_or_insert_with(|| build_launcher(app))
                .clone()
        }
    };
    let get_launcher = Rc::new(get_launcher);

    app.connect_activate({
        let get_launcher = get_launcher.clone();
        move |app| {
            NewFileDialog::new(app, get_launcher(app)).present();
        }
    });

    app.connect_open({
        let get_launcher = get_launcher.clone();
        move |app, files, _| {
            let launcher = get_launcher(app);
            let mut opened_any_file = false;
            for file in files {
                let Some(path) = file.path() else {
                    continue;
                };
                let result = launcher.borrow().load_file(&path);
                match result {
                    Ok(()) => opened_any_file = true,
                    Err(e) => log::error!("Cannot open {}: {}", path.display(), e),
                }
            }
            if !opened_any_file {
                let dialog = NewFileDialog::new(app, launcher);
                dialog.present();
                show_error(
                    &dialog.window,
                    "Cannot open file",
                    "None of the files given on the command line could be opened.",
                );
            }
        }
    });

    app.run_with_args(&env::args().collect::<Vec<_>>())
}
