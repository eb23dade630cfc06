use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::home_dir::resolve_home_dir;

/// Main application configuration with strongly-typed global sections
/// and a flexible per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Database configuration (optional).
    pub database: Option<DatabaseConfig>,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub home_dir: String, // normalized to an absolute path on load
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. "sqlite://database/users.db".
    pub url: String,
    /// Maximum number of connections in the pool (defaults to 10).
    pub max_conns: Option<u32>,
    /// SQLite busy timeout in milliseconds (defaults to 5000).
    pub busy_timeout_ms: Option<u32>,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/user_registration.log", empty disables the file
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

const DEFAULT_HOME_SUBDIR: &str = ".user_registration";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => $HOME/.user_registration (%APPDATA% on Windows)
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8087,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database/users.db".to_string(),
            max_conns: Some(10),
            busy_timeout_ms: Some(5000),
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/user_registration.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: Some(DatabaseConfig::default()),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Layered loading: defaults → YAML file → environment variables.
    /// Normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }

        // Optional sections stay None unless YAML/ENV provide them.
        let base = AppConfig {
            server: ServerConfig::default(),
            database: None,
            logging: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(path))
            // APP__SERVER__PORT=8087 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to parse yaml config '{}'", path.display()))?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file, or fall back to defaults when no path is given.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c.server)
                    .context("Failed to resolve server.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Typed view of one module's entry in the `modules` bag.
    /// Missing entries yield `T::default()`; malformed entries are an error.
    pub fn module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid config for module '{module_name}'")),
            None => Ok(T::default()),
        }
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
    pub mock: bool,
}

fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let opt = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, DEFAULT_HOME_SUBDIR, /*create*/ true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn yaml_path(s: &Path) -> String {
        s.to_string_lossy().replace('\\', "/")
    }

    #[test]
    fn test_default_config_structure() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8087);
        assert_eq!(config.server.home_dir, "");

        let db = config.database.as_ref().unwrap();
        assert_eq!(db.url, "sqlite://database/users.db");
        assert_eq!(db.max_conns, Some(10));
        assert_eq!(db.busy_timeout_ms, Some(5000));

        let logging = config.logging.as_ref().unwrap();
        let default_section = &logging["default"];
        assert_eq!(default_section.console_level, "info");
        assert_eq!(default_section.file, "logs/user_registration.log");

        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_load_layered_full_yaml() {
        let tmp = tempdir().unwrap();
        let home = tmp.path().join("home");
        let cfg_path = tmp.path().join("cfg.yaml");

        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "0.0.0.0"
  port: 9090

database:
  url: "sqlite://data/users.db"
  max_conns: 4
  busy_timeout_ms: 1000

logging:
  default:
    console_level: debug
    file: "logs/default.log"

modules:
  user_registration:
    enable_docs: true
"#,
            yaml_path(&home)
        );
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert!(PathBuf::from(&config.server.home_dir).is_absolute());
        assert!(home.is_dir(), "home_dir must be created on load");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);

        let db = config.database.as_ref().unwrap();
        assert_eq!(db.url, "sqlite://data/users.db");
        assert_eq!(db.max_conns, Some(4));

        let def = &config.logging.as_ref().unwrap()["default"];
        assert_eq!(def.console_level, "debug");
        assert_eq!(def.file, "logs/default.log");

        assert_eq!(config.modules["user_registration"]["enable_docs"], true);
    }

    #[test]
    fn test_minimal_yaml_leaves_optional_sections_empty() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "localhost"
  port: 8080
"#,
            yaml_path(&tmp.path().join("minimal"))
        );
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
        assert!(config.logging.is_none());
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = AppConfig::load_layered("/nonexistent/dir/config.yaml").unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_unknown_server_field_is_rejected() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "localhost"
  port: 8080
  bogus: true
"#,
            yaml_path(tmp.path())
        );
        fs::write(&cfg_path, yaml).unwrap();
        assert!(AppConfig::load_layered(&cfg_path).is_err());
    }

    #[test]
    fn test_request_timeout_is_not_a_server_setting() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");
        let yaml = format!(
            r#"
server:
  home_dir: "{}"
  host: "localhost"
  port: 8080
  timeout_sec: 30
"#,
            yaml_path(tmp.path())
        );
        fs::write(&cfg_path, yaml).unwrap();
        let err = AppConfig::load_layered(&cfg_path).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_sec"), "{err:#}");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            port: Some(3000),
            verbose: 2,
            ..Default::default()
        };

        config.apply_cli_overrides(&args);

        assert_eq!(config.server.port, 3000);
        let default_section = &config.logging.as_ref().unwrap()["default"];
        assert_eq!(default_section.console_level, "trace");
    }

    #[test]
    fn test_cli_verbose_levels_matrix() {
        for (verbose, expected) in [(0, "info"), (1, "debug"), (2, "trace"), (3, "trace")] {
            let mut config = AppConfig::default();
            let args = CliArgs {
                verbose,
                ..Default::default()
            };
            config.apply_cli_overrides(&args);
            let default_section = &config.logging.as_ref().unwrap()["default"];
            assert_eq!(default_section.console_level, expected, "verbose={verbose}");
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct DemoModuleConfig {
        #[serde(default)]
        flag: bool,
        #[serde(default)]
        limit: u32,
    }

    #[test]
    fn test_module_config_typed_access() {
        let mut config = AppConfig::default();
        config.modules.insert(
            "demo".to_string(),
            serde_json::json!({ "flag": true, "limit": 7 }),
        );

        let demo: DemoModuleConfig = config.module_config("demo").unwrap();
        assert_eq!(
            demo,
            DemoModuleConfig {
                flag: true,
                limit: 7
            }
        );

        let missing: DemoModuleConfig = config.module_config("absent").unwrap();
        assert_eq!(missing, DemoModuleConfig::default());

        config
            .modules
            .insert("broken".to_string(), serde_json::json!({ "limit": "many" }));
        assert!(config.module_config::<DemoModuleConfig>("broken").is_err());
    }

    #[test]
    fn test_to_yaml_roundtrip_basic() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("database:"));
        assert!(yaml.contains("logging:"));

        let roundtrip: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(roundtrip.server.port, config.server.port);
    }

    #[test]
    fn test_invalid_yaml_missing_required_field() {
        let invalid_yaml = r#"
server:
  home_dir: "/tmp/x"
  port: 8087
"#;
        let result: Result<AppConfig, _> = serde_yaml::from_str(invalid_yaml);
        assert!(result.is_err());
    }
}
