//! Configuration management for the Agent CLI.
//!
//! Configuration is assembled from several sources, later ones winning:
//! - Built-in defaults
//! - Config file (`.agents/config.yaml` in the workspace, or `AGENT_CONFIG`)
//! - Environment variables
//! - Command-line flags (see [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default companion executable name (without platform suffix).
pub const DEFAULT_BINARY_NAME: &str = "agents-core";

/// Default timeout for a single companion invocation.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for build commands, which can legitimately run for minutes.
pub const DEFAULT_BUILD_TIMEOUT_MS: u64 = 600_000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .agents/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Companion engine settings
    pub engine: EngineConfig,

    /// Build command settings
    pub build: BuildConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Log output format
    pub log_format: LogFormat,

    /// Verbose mode: companion output is streamed live instead of captured
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Companion engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Executable name, without the platform suffix
    pub binary_name: String,

    /// Directory of the companion relative to the CLI's own install directory
    pub relative_dir: PathBuf,

    /// Per-invocation timeout in milliseconds
    pub timeout_ms: u64,

    /// Route commands through the companion by default
    pub use_rust: bool,

    /// Build the companion once when it is missing
    pub auto_build: bool,
}

/// Commands used by `agent-cli build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Program and arguments that build the companion engine
    pub engine: Vec<String>,

    /// Program and arguments that build the front end
    pub frontend: Vec<String>,

    /// Timeout for each build command in milliseconds
    pub timeout_ms: u64,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    engine: Option<EngineSection>,
    build: Option<BuildSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineSection {
    binary_name: Option<String>,
    relative_dir: Option<PathBuf>,
    timeout_ms: Option<u64>,
    use_rust: Option<bool>,
    auto_build: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildSection {
    engine: Option<Vec<String>>,
    frontend: Option<Vec<String>>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    format: Option<LogFormat>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            relative_dir: PathBuf::from("."),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_rust: false,
            auto_build: false,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        let cargo = |bin: &str| {
            ["cargo", "build", "--release", "--bin", bin]
                .iter()
                .map(|s| s.to_string())
                .collect()
        };

        Self {
            engine: cargo(DEFAULT_BINARY_NAME),
            frontend: cargo("agent-cli"),
            timeout_ms: DEFAULT_BUILD_TIMEOUT_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            engine: EngineConfig::default(),
            build: BuildConfig::default(),
            log_level: None,
            log_format: LogFormat::default(),
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, the config file and defaults.
    ///
    /// Environment variables:
    /// - `AGENT_WORKSPACE`: Override workspace path
    /// - `AGENT_CONFIG`: Path to config file
    /// - `AGENT_TIMEOUT_MS`: Companion invocation timeout
    /// - `AGENT_USE_RUST`: Route commands through the companion (`1`/`true`)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use agent_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration, with an explicit workspace and config file taking
    /// precedence over their environment variables.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let workspace =
            workspace.or_else(|| std::env::var_os("AGENT_WORKSPACE").map(PathBuf::from));
        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| std::env::var_os("AGENT_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.agents_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(timeout) = std::env::var("AGENT_TIMEOUT_MS") {
            config.engine.timeout_ms = timeout.parse().map_err(|e| {
                AppError::Config(format!("Invalid AGENT_TIMEOUT_MS '{}': {}", timeout, e))
            })?;
        }

        if let Ok(use_rust) = std::env::var("AGENT_USE_RUST") {
            config.engine.use_rust = parse_flag(&use_rust);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents).map_err(|e| match e {
            AppError::Serialization(msg) => {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, msg))
            }
            other => other,
        })
    }

    fn merge_yaml_str(mut self, contents: &str) -> AppResult<Self> {
        // An empty file deserializes to `null`; treat it as "no overrides".
        let file: ConfigFile = serde_yaml::from_str::<Option<ConfigFile>>(contents)?
            .unwrap_or_default();

        if let Some(engine) = file.engine {
            if let Some(name) = engine.binary_name {
                self.engine.binary_name = name;
            }
            if let Some(dir) = engine.relative_dir {
                self.engine.relative_dir = dir;
            }
            if let Some(timeout) = engine.timeout_ms {
                self.engine.timeout_ms = timeout;
            }
            if let Some(use_rust) = engine.use_rust {
                self.engine.use_rust = use_rust;
            }
            if let Some(auto_build) = engine.auto_build {
                self.engine.auto_build = auto_build;
            }
        }

        if let Some(build) = file.build {
            if let Some(engine) = build.engine {
                self.build.engine = engine;
            }
            if let Some(frontend) = build.frontend {
                self.build.frontend = frontend;
            }
            if let Some(timeout) = build.timeout_ms {
                self.build.timeout_ms = timeout;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
            if let Some(format) = logging.format {
                self.log_format = format;
            }
        }

        Ok(self)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over both the config file and the environment.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        timeout_ms: Option<u64>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if let Some(timeout_ms) = timeout_ms {
            self.engine.timeout_ms = timeout_ms;
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .agents directory.
    pub fn agents_dir(&self) -> PathBuf {
        self.workspace.join(".agents")
    }

    /// Validate the assembled configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.engine.binary_name.trim().is_empty() {
            return Err(AppError::Config(
                "engine.binaryName cannot be empty".to_string(),
            ));
        }

        // The companion must stay anchored to the install directory.
        if self.engine.relative_dir.is_absolute() {
            return Err(AppError::Config(format!(
                "engine.relativeDir must be relative to the install directory: {:?}",
                self.engine.relative_dir
            )));
        }

        if self.engine.timeout_ms == 0 {
            return Err(AppError::Config(
                "engine.timeoutMs must be greater than zero".to_string(),
            ));
        }

        if self.build.timeout_ms == 0 {
            return Err(AppError::Config(
                "build.timeoutMs must be greater than zero".to_string(),
            ));
        }

        let commands = [
            ("build.engine", &self.build.engine),
            ("build.frontend", &self.build.frontend),
        ];
        for (key, command) in commands {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(AppError::Config(format!("{} cannot be empty", key)));
            }
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.binary_name, "agents-core");
        assert_eq!(config.engine.timeout_ms, 30_000);
        assert!(!config.engine.use_rust);
        assert!(!config.verbose);
        assert!(!config.no_color);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_agents_dir() {
        let config = AppConfig::default();
        assert!(config.agents_dir().ends_with(".agents"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(None, Some(5_000), true, false);

        assert_eq!(config.engine.timeout_ms, 5_000);
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_explicit_log_level_wins_over_verbose() {
        let config =
            AppConfig::default().with_overrides(Some("trace".to_string()), None, true, true);

        assert_eq!(config.log_level, Some("trace".to_string()));
        assert!(config.no_color);
    }

    #[test]
    fn test_merge_yaml() {
        let yaml = r#"
engine:
  binaryName: engine-next
  relativeDir: ../libexec
  timeoutMs: 1500
  useRust: true
  autoBuild: true
build:
  engine: ["make", "engine"]
logging:
  level: warn
  color: false
  format: json
"#;

        let config = AppConfig::default().merge_yaml_str(yaml).unwrap();

        assert_eq!(config.engine.binary_name, "engine-next");
        assert_eq!(config.engine.relative_dir, PathBuf::from("../libexec"));
        assert_eq!(config.engine.timeout_ms, 1500);
        assert!(config.engine.use_rust);
        assert!(config.engine.auto_build);
        assert_eq!(config.build.engine, vec!["make", "engine"]);
        assert_eq!(config.build.frontend, BuildConfig::default().frontend);
        assert_eq!(config.log_level, Some("warn".to_string()));
        assert!(config.no_color);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_merge_empty_yaml_keeps_defaults() {
        let config = AppConfig::default().merge_yaml_str("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_merge_yaml_file_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "engine: [not, a, map]").unwrap();

        let err = AppConfig::default().merge_yaml(&path).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("config.yaml")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_reads_workspace_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".agents")).unwrap();
        std::fs::write(
            dir.path().join(".agents/config.yaml"),
            "engine:\n  binaryName: custom-engine\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.engine.binary_name, "custom-engine");
    }

    #[test]
    fn test_load_from_missing_explicit_config_file() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(
            Some(dir.path().to_path_buf()),
            Some(dir.path().join("missing.yaml")),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_workspace() {
        let result = AppConfig::load_from(Some(PathBuf::from("/definitely/not/here")), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.engine.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_absolute_relative_dir() {
        let mut config = AppConfig::default();
        config.engine.relative_dir = std::env::temp_dir();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_build_command() {
        let mut config = AppConfig::default();
        config.build.frontend = Vec::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
