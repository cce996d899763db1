use crate::engine::{Engine, PROJECTS_DIR_KEY};
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub summary: String,
}

/// Whether `name` can be spliced into an engine command as a single word.
///
/// radare2 treats `;`, `|`, `@`, `~`, `>` and backticks as command syntax, so
/// only a conservative character set gets through.
pub fn is_plain_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Projects known to the engine, sorted case-insensitively.
///
/// A project whose summary cannot be fetched is still listed, with an empty
/// summary. Names that are not plain words are listed without asking the
/// engine for a summary at all.
pub fn list_projects(engine: &dyn Engine) -> Result<Vec<ProjectEntry>, EngineError> {
    let mut names = engine.project_names()?;
    names.sort_by_key(|name| name.to_lowercase());

    Ok(names
        .into_iter()
        .map(|name| {
            if !is_plain_project_name(&name) {
                log::warn!("Skipping summary for project with unusual name {:?}", name);
                return ProjectEntry {
                    name,
                    summary: String::new(),
                };
            }
            let summary = match engine.cmd(&format!("Pi {}", name)) {
                Ok(info) => info.trim().to_string(),
                Err(e) => {
                    log::warn!("No summary for project {}: {}", name, e);
                    String::new()
                }
            };
            ProjectEntry { name, summary }
        })
        .collect())
}

pub fn projects_dir(engine: &dyn Engine) -> Result<String, EngineError> {
    engine.get_config(PROJECTS_DIR_KEY)
}

pub fn set_projects_dir(engine: &mut dyn Engine, dir: &str) {
    log::info!("Projects directory set to {}", dir);
    engine.set_config(PROJECTS_DIR_KEY, dir);
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::engine::Engine;
    use crate::error::EngineError;

    /// In-memory engine for tests.
    #[derive(Default)]
    pub struct FakeEngine {
        pub config: HashMap<String, String>,
        pub projects: Vec<String>,
        pub replies: HashMap<String, String>,
        pub commands: RefCell<Vec<String>>,
    }

    impl Engine for FakeEngine {
        fn get_config(&self, key: &str) -> Result<String, EngineError> {
            Ok(self.config.get(key).cloned().unwrap_or_default())
        }

        fn set_config(&mut self, key: &str, value: &str) {
            self.config.insert(key.to_string(), value.to_string());
        }

        fn project_names(&self) -> Result<Vec<String>, EngineError> {
            Ok(self.projects.clone())
        }

        fn cmd(&self, command: &str) -> Result<String, EngineError> {
            self.commands.borrow_mut().push(command.to_string());
            self.replies
                .get(command)
                .cloned()
                .ok_or_else(|| EngineError::Command {
                    command: command.to_string(),
                    stderr: "unknown command".to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeEngine;
    use super::*;

    fn engine(projects: &[&str]) -> FakeEngine {
        let mut engine = FakeEngine {
            projects: projects.iter().map(|p| p.to_string()).collect(),
            ..FakeEngine::default()
        };
        for p in projects {
            engine
                .replies
                .insert(format!("Pi {}", p), format!("{} summary\n", p));
        }
        engine
    }

    #[test]
    fn sorted_case_insensitively() {
        let engine = engine(&["zeta", "Alpha", "beta", "Gamma"]);
        let names: Vec<String> = list_projects(&engine)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma", "zeta"]);
    }

    #[test]
    fn summary_is_trimmed() {
        let engine = engine(&["crackme"]);
        let projects = list_projects(&engine).unwrap();
        assert_eq!(projects[0].summary, "crackme summary");
        assert_eq!(*engine.commands.borrow(), vec!["Pi crackme"]);
    }

    #[test]
    fn failed_summary_does_not_drop_others() {
        let mut engine = engine(&["a", "b", "c"]);
        engine.replies.remove("Pi b");
        let projects = list_projects(&engine).unwrap();
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[1].name, "b");
        assert_eq!(projects[1].summary, "");
        assert_eq!(projects[2].summary, "c summary");
    }

    #[test]
    fn unusual_names_are_listed_without_a_command() {
        let engine = engine(&["fw", "evil;!rm -rf", "a b"]);
        let projects = list_projects(&engine).unwrap();
        assert_eq!(projects.len(), 3);
        let evil = projects.iter().find(|p| p.name == "evil;!rm -rf").unwrap();
        assert_eq!(evil.summary, "");
        assert_eq!(*engine.commands.borrow(), vec!["Pi fw"]);
    }

    #[test]
    fn plain_names() {
        assert!(is_plain_project_name("crackme"));
        assert!(is_plain_project_name("fw-1.2_final"));
        assert!(!is_plain_project_name(""));
        assert!(!is_plain_project_name("x;q"));
        assert!(!is_plain_project_name("x@0x10"));
        assert!(!is_plain_project_name("a b"));
        assert!(!is_plain_project_name("`!id`"));
    }

    #[test]
    fn no_projects() {
        assert!(list_projects(&engine(&[])).unwrap().is_empty());
    }

    #[test]
    fn projects_dir_round_trip() {
        let mut engine = FakeEngine::default();
        set_projects_dir(&mut engine, "~/r2/projects");
        assert_eq!(projects_dir(&engine).unwrap(), "~/r2/projects");
    }
}
