//! Bridge to the analysis engine
//!
//! The launcher only needs a handful of queries, captured by [`Engine`].
//! [`Radare2`] answers them by running the `radare2` executable once per
//! query.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::EngineError;
use crate::sections::Section;

pub const PROJECTS_DIR_KEY: &str = "dir.projects";

/// Script radare2 writes inside each project directory.
const PROJECT_SCRIPT: &str = "rc.r2";

pub trait Engine {
    fn get_config(&self, key: &str) -> Result<String, EngineError>;

    fn set_config(&mut self, key: &str, value: &str);

    fn project_names(&self) -> Result<Vec<String>, EngineError>;

    fn cmd(&self, command: &str) -> Result<String, EngineError>;

    fn sections(&self) -> Result<Vec<Section>, EngineError> {
        let json = self.cmd("iSj")?;
        crate::sections::parse_sections(&json)
    }
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(dir)
}

/// Names of the project directories under `root`, in directory order.
pub fn scan_projects_dir(root: &Path) -> Result<Vec<String>, EngineError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(EngineError::ProjectsDir {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.join(PROJECT_SCRIPT).is_file())
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect())
}

#[derive(Debug, Clone)]
pub struct Radare2 {
    program: String,
    file: Option<PathBuf>,
    project: Option<String>,
    overrides: BTreeMap<String, String>,
}

impl Radare2 {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            file: None,
            project: None,
            overrides: BTreeMap::new(),
        }
    }

    /// Queries run against `file` instead of an empty session.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Queries run inside a saved project.
    pub fn with_project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    /// Configuration replayed with `-e` on every query.
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.set_config(key, value);
        self
    }

    fn args(&self, command: &str) -> Vec<String> {
        let mut args = vec!["-q".to_string()];
        if let Some(project) = &self.project {
            args.push("-p".to_string());
            args.push(project.clone());
        }
        for (key, value) in &self.overrides {
            args.push("-e".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push("-c".to_string());
        args.push(command.to_string());
        match (&self.file, &self.project) {
            (Some(file), _) => args.push(file.to_string_lossy().into_owned()),
            (None, Some(_)) => {}
            (None, None) => args.push("--".to_string()),
        }
        args
    }
}

impl Engine for Radare2 {
    fn get_config(&self, key: &str) -> Result<String, EngineError> {
        if let Some(value) = self.overrides.get(key) {
            return Ok(value.clone());
        }
        Ok(self.cmd(&format!("e {}", key))?.trim().to_string())
    }

    fn set_config(&mut self, key: &str, value: &str) {
        log::debug!("{} = {}", key, value);
        self.overrides.insert(key.to_string(), value.to_string());
    }

    fn project_names(&self) -> Result<Vec<String>, EngineError> {
        let dir = self.get_config(PROJECTS_DIR_KEY)?;
        scan_projects_dir(&expand_home(&dir))
    }

    fn cmd(&self, command: &str) -> Result<String, EngineError> {
        log::trace!("{} {:?}", self.program, self.args(command));
        let output = Command::new(&self.program)
            .args(self.args(command))
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    EngineError::NotFound {
                        program: self.program.clone(),
                    }
                } else {
                    EngineError::Spawn {
                        program: self.program.clone(),
                        source: e,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(EngineError::Command {
                command: command.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn args_without_file_use_empty_session() {
        let r2 = Radare2::new("radare2");
        assert_eq!(r2.args("Pi foo"), vec!["-q", "-c", "Pi foo", "--"]);
    }

    #[test]
    fn overrides_are_replayed() {
        let mut r2 = Radare2::new("radare2").with_file("/bin/ls");
        r2.set_config("dir.projects", "/tmp/projects");
        r2.set_config("bin.relocs", "false");
        assert_eq!(
            r2.args("iSj"),
            vec![
                "-q",
                "-e",
                "bin.relocs=false",
                "-e",
                "dir.projects=/tmp/projects",
                "-c",
                "iSj",
                "/bin/ls",
            ]
        );
        assert_eq!(r2.get_config("dir.projects").unwrap(), "/tmp/projects");
    }

    #[test]
    fn project_sessions_skip_the_empty_file_marker() {
        let r2 = Radare2::new("r2").with_project("crackme");
        assert_eq!(r2.args("iSj"), vec!["-q", "-p", "crackme", "-c", "iSj"]);
    }

    #[test]
    fn project_sessions_carry_the_projects_dir() {
        let r2 = Radare2::new("r2")
            .with_project("crackme")
            .with_config(PROJECTS_DIR_KEY, "/srv/r2");
        assert_eq!(
            r2.args("iSj"),
            vec!["-q", "-p", "crackme", "-e", "dir.projects=/srv/r2", "-c", "iSj"]
        );
    }

    #[test]
    fn missing_program_is_reported() {
        let r2 = Radare2::new("r2launch-no-such-radare2");
        let err = r2.cmd("?V").unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/srv/projects"), PathBuf::from("/srv/projects"));
        assert_eq!(expand_home("a~b"), PathBuf::from("a~b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.local/share/radare2/projects"),
                home.join(".local/share/radare2/projects"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn scan_only_lists_project_directories() {
        let dir = TempDir::new().unwrap();
        for name in ["alpha", "beta"] {
            fs::create_dir(dir.path().join(name)).unwrap();
            fs::write(dir.path().join(name).join(PROJECT_SCRIPT), "").unwrap();
        }
        fs::create_dir(dir.path().join("not-a-project")).unwrap();
        fs::write(dir.path().join("stray.txt"), "").unwrap();

        let mut names = scan_projects_dir(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn scan_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan_projects_dir(&dir.path().join("missing")).unwrap().is_empty());
    }
}
