use gtk4::prelude::*;
use gtk4::{AboutDialog, Application, ApplicationWindow, HeaderBar, Label};
use std::path::Path;

use crate::dialogs::show_error;
use crate::engine::{Engine, PROJECTS_DIR_KEY, Radare2};
use crate::launcher::LoadPipeline;
use crate::ui::sections_dock::SectionsDock;

/// Creates an about dialog
pub fn create_about_dialog(parent: &impl IsA<gtk4::Window>) -> AboutDialog {
    AboutDialog::builder()
        .transient_for(parent)
        .modal(true)
        .program_name("r2launch")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(env!("CARGO_PKG_DESCRIPTION"))
        .authors(vec!["Dorian Soru".to_string()])
        .build()
}

/// The analysis window opened once the launcher hands over a file or project
pub struct MainWindow {
    app: Application,
    radare2_path: String,
}

impl MainWindow {
    pub fn new(app: &Application, radare2_path: &str) -> Self {
        Self {
            app: app.clone(),
            radare2_path: radare2_path.to_string(),
        }
    }

    fn show(&self, title: &str, engine: Radare2) {
        let window = ApplicationWindow::builder()
            .application(&self.app)
            .title(title)
            .default_width(900)
            .default_height(600)
            .build();
        let header_bar = HeaderBar::new();
        header_bar.set_title_widget(Some(&Label::new(Some(title))));
        window.set_titlebar(Some(&header_bar));

        let dock = SectionsDock::new();
        window.set_child(Some(&dock.root));
        window.present();

        match engine.sections() {
            Ok(sections) => {
                log::info!("{}: {} sections", title, sections.len());
                dock.set_sections(sections);
            }
            Err(e) => {
                let title = format!("Could not read sections of {}", title);
                show_error(&window, &title, &e);
            }
        }

        dock.follow_size(window.default_width(), window.default_height());
        for property in ["default-width", "default-height"] {
            let dock = dock.clone();
            window.connect_notify_local(Some(property), move |window, _| {
                dock.follow_size(window.default_width(), window.default_height());
            });
        }
    }
}

impl LoadPipeline for MainWindow {
    fn open_file(&self, path: &Path) {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        self.show(&title, Radare2::new(&self.radare2_path).with_file(path));
    }

    fn open_project(&self, name: &str, projects_dir: &str) {
        let mut engine = Radare2::new(&self.radare2_path).with_project(name);
        if !projects_dir.is_empty() {
            engine = engine.with_config(PROJECTS_DIR_KEY, projects_dir);
        }
        self.show(name, engine);
    }
}
