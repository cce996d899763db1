use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Select a new program or a previous one before continuing")]
    NoFileSelected { path: PathBuf },

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{program} not found. Please install radare2 or set radare2_path in the settings.")]
    NotFound { program: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Invalid UTF-8 from engine: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid JSON from engine: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read projects directory {}: {source}", .path.display())]
    ProjectsDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No configuration directory available")]
    NoConfigDir,

    #[error("Failed to write settings to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_selected_message() {
        let e = LaunchError::NoFileSelected {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(
            e.to_string(),
            "Select a new program or a previous one before continuing"
        );
    }

    #[test]
    fn engine_not_found_names_program() {
        let e = EngineError::NotFound {
            program: "r2".to_string(),
        };
        assert!(e.to_string().starts_with("r2 not found."));
    }

    #[test]
    fn command_error_carries_stderr() {
        let e = EngineError::Command {
            command: "Pi foo".to_string(),
            stderr: "no such project".to_string(),
        };
        assert_eq!(e.to_string(), "Command `Pi foo` failed: no such project");
    }

    #[test]
    fn launch_error_from_engine_error() {
        let engine = EngineError::Command {
            command: "iSj".to_string(),
            stderr: "boom".to_string(),
        };
        let launch: LaunchError = engine.into();
        assert_eq!(launch.to_string(), "Command `iSj` failed: boom");
    }
}
