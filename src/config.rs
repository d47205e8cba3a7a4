use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(vcxgen::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse json file at '{path}': {source}")]
    #[diagnostic(
        code(vcxgen::config::parse_json),
        help("Expected `BuildDebugConfiguration` and `BuildReleaseConfiguration` objects")
    )]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(
        code(vcxgen::config::parse_toml),
        help("Expected `BuildDebugConfiguration` and `BuildReleaseConfiguration` tables")
    )]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Remote commands run by the IDE for one configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BuildCommands {
    pub remote_build_command_line: String,
    #[serde(rename = "RemoteReBuildCommandLine")]
    pub remote_rebuild_command_line: String,
    pub remote_clean_command_line: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BuildConfig {
    #[serde(rename = "BuildDebugConfiguration")]
    pub debug: BuildCommands,
    #[serde(rename = "BuildReleaseConfiguration")]
    pub release: BuildCommands,
}

impl BuildConfig {
    /// Reads a JSON document, or TOML when the file ends in `.toml`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let is_toml = path
            .extension()
            .map(|ext| ext == "toml")
            .unwrap_or(false);

        if is_toml {
            toml::from_str(&content).map_err(|err| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        } else {
            serde_json::from_str(&content).map_err(|err| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }

    /// Debug-like configuration names use the debug commands.
    pub fn commands_for(&self, configuration: &str) -> &BuildCommands {
        if configuration.to_lowercase().contains("debug") {
            &self.debug
        } else {
            &self.release
        }
    }
}

/// Finds the configuration document for a user supplied path.
///
/// Absolute paths are used as given. Relative paths are looked up in the
/// working directory and then next to the running executable.
pub fn resolve_config_path(requested: &Path) -> PathBuf {
    if requested.is_absolute() || requested.exists() {
        return requested.to_path_buf();
    }

    let beside_executable = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(requested)));

    match beside_executable {
        Some(candidate) if candidate.exists() => candidate,
        _ => requested.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "BuildDebugConfiguration": {
            "RemoteBuildCommandLine": "make DEBUG=1",
            "RemoteReBuildCommandLine": "make clean && make DEBUG=1",
            "RemoteCleanCommandLine": "make clean"
        },
        "BuildReleaseConfiguration": {
            "RemoteBuildCommandLine": "make",
            "RemoteReBuildCommandLine": "make clean && make",
            "RemoteCleanCommandLine": "make clean"
        }
    }"#;

    const TOML: &str = r#"
[BuildDebugConfiguration]
RemoteBuildCommandLine = "make DEBUG=1"
RemoteReBuildCommandLine = "make clean && make DEBUG=1"
RemoteCleanCommandLine = "make clean"

[BuildReleaseConfiguration]
RemoteBuildCommandLine = "make"
RemoteReBuildCommandLine = "make clean && make"
RemoteCleanCommandLine = "make clean"
"#;

    #[test]
    fn reads_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, JSON).unwrap();

        let config = BuildConfig::from_file(&path).unwrap();

        assert_eq!(config.debug.remote_build_command_line, "make DEBUG=1");
        assert_eq!(
            config.release.remote_rebuild_command_line,
            "make clean && make"
        );
    }

    #[test]
    fn json_and_toml_agree() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("build.json");
        let toml_path = dir.path().join("build.toml");
        fs::write(&json_path, JSON).unwrap();
        fs::write(&toml_path, TOML).unwrap();

        assert_eq!(
            BuildConfig::from_file(&json_path).unwrap(),
            BuildConfig::from_file(&toml_path).unwrap()
        );
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"BuildDebugConfiguration": {}}"#).unwrap();

        let result = BuildConfig::from_file(&path);

        assert!(matches!(result, Err(ConfigError::ParseJson { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = BuildConfig::from_file(dir.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn picks_commands_by_configuration_name() {
        let config: BuildConfig = serde_json::from_str(JSON).unwrap();

        assert_eq!(config.commands_for("Debug"), &config.debug);
        assert_eq!(config.commands_for("Release"), &config.release);
    }

    #[test]
    fn absolute_path_is_used_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("config.json");

        assert_eq!(resolve_config_path(&absolute), absolute);
    }
}
