//! Logic behind the open window, free of widgets
//!
//! The GTK shell forwards user actions here and renders what comes back.

use std::path::Path;
use std::rc::Rc;

use crate::engine::{Engine, expand_home};
use crate::error::LaunchError;
use crate::presenter::{DisplayItem, present_project, present_recent};
use crate::projects::{self, ProjectEntry};
use crate::recent::{RecentEntry, RecentFiles};

/// Whatever opens a file or project once the launcher is done with it.
pub trait LoadPipeline {
    fn open_file(&self, path: &Path);

    /// `projects_dir` is the directory chosen in the launcher, empty when the
    /// engine default applies.
    fn open_project(&self, name: &str, projects_dir: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    RecentFiles,
    Projects,
}

pub struct Launcher {
    recents: RecentFiles,
    engine: Box<dyn Engine>,
    pipeline: Rc<dyn LoadPipeline>,
}

impl Launcher {
    pub fn new(
        recents: RecentFiles,
        engine: Box<dyn Engine>,
        pipeline: Rc<dyn LoadPipeline>,
    ) -> Self {
        Self {
            recents,
            engine,
            pipeline,
        }
    }

    /// Reconciled recent files with their rows.
    pub fn recent_items(&self) -> Vec<(RecentEntry, DisplayItem)> {
        self.recents
            .reconcile()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let item = present_recent(&entry, i);
                (entry, item)
            })
            .collect()
    }

    /// An engine failure is logged and shows up as an empty list.
    pub fn project_items(&self) -> Vec<(ProjectEntry, DisplayItem)> {
        let projects = match projects::list_projects(self.engine.as_ref()) {
            Ok(projects) => projects,
            Err(e) => {
                log::warn!("Could not list projects: {}", e);
                Vec::new()
            }
        };
        projects
            .into_iter()
            .enumerate()
            .map(|(i, project)| {
                let item = present_project(&project, i);
                (project, item)
            })
            .collect()
    }

    pub fn initial_tab(&self, project_count: usize) -> Tab {
        if project_count > 0 {
            Tab::Projects
        } else {
            Tab::RecentFiles
        }
    }

    pub fn load_file(&self, path: &Path) -> Result<(), LaunchError> {
        if !path.is_file() {
            return Err(LaunchError::NoFileSelected {
                path: path.to_path_buf(),
            });
        }
        self.recents.record_opened(path);
        log::info!("Opening {}", path.display());
        self.pipeline.open_file(path);
        Ok(())
    }

    pub fn load_project(&self, name: &str) {
        let dir = self.projects_dir();
        log::info!("Opening project {} from {:?}", name, dir);
        self.pipeline.open_project(name, &dir);
    }

    pub fn remove_recent(&self, path: &Path) {
        self.recents.remove(path);
    }

    pub fn clear_recents(&self) {
        self.recents.clear();
    }

    pub fn projects_dir(&self) -> String {
        projects::projects_dir(self.engine.as_ref()).unwrap_or_else(|e| {
            log::warn!("Could not read projects directory: {}", e);
            String::new()
        })
    }

    /// Where a directory picker should start, with `~` expanded.
    pub fn projects_dir_on_disk(&self) -> std::path::PathBuf {
        expand_home(&self.projects_dir())
    }

    /// Empty selections are ignored.
    pub fn set_projects_dir(&mut self, dir: &str) -> bool {
        if dir.is_empty() {
            return false;
        }
        projects::set_projects_dir(self.engine.as_mut(), dir);
        true
    }
}
