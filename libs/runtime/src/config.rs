use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::paths::resolve_home_dir;

/// Main application configuration: strongly-typed global sections plus a
/// per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Directory containing per-module YAML files (optional).
    #[serde(default)]
    pub modules_dir: Option<String>,
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

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/ticketing.log", empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => $HOME/.ticketing (or %APPDATA%/.ticketing)
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .with_context(|| format!("Invalid bind address '{}'", raw))
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/ticketing.log".to_string(),
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
            logging: Some(default_logging_config()),
            modules_dir: None,
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let config_path = config_path.as_ref();
        // figment silently skips missing YAML files
        if !config_path.is_file() {
            bail!("Config file not found: {}", config_path.display());
        }

        // Optional sections stay None unless YAML/ENV provides them.
        let base = AppConfig {
            server: ServerConfig::default(),
            logging: None,
            modules_dir: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path))
            // APP__SERVER__PORT=8080 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        if let Some(dir) = config.modules_dir.clone() {
            merge_module_files(&mut config.modules, dir)?;
        }

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
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

    /// Typed view of one module's configuration entry; `T::default()` when absent.
    pub fn module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid configuration for module '{}'", module_name)),
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
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(),
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
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
}

const fn default_subdir() -> &'static str {
    ".ticketing"
}

fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let opt = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, default_subdir(), true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

fn merge_module_files(
    bag: &mut HashMap<String, serde_json::Value>,
    dir: impl AsRef<Path>,
) -> Result<()> {
    use std::fs;
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext != "yml" && ext != "yaml" {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read module config {}", path.display()))?;
        let val: serde_yaml::Value = serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?;
        // Inline `modules:` entries win over files.
        bag.entry(name).or_insert(serde_json::to_value(val)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct SeedToggle {
        #[serde(default)]
        seed_demo_data: bool,
        #[serde(default)]
        capacity: u32,
    }

    /// Writes `body` below a `server:` block whose home_dir lives in `tmp`.
    fn write_cfg(tmp: &TempDir, body: &str) -> PathBuf {
        let home = tmp.path().join("home").to_string_lossy().replace('\\', "/");
        let path = tmp.path().join("ticketing.yaml");
        fs::write(
            &path,
            format!("server:\n  home_dir: \"{home}\"\n  host: \"127.0.0.1\"\n  port: 3000\n{body}"),
        )
        .unwrap();
        path
    }

    #[test]
    fn defaults_listen_on_loopback_3000() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.server.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert!(cfg.server.home_dir.is_empty());
        assert!(cfg.modules.is_empty());
        assert!(cfg.modules_dir.is_none());

        let default_section = &cfg.logging.as_ref().unwrap()["default"];
        assert_eq!(default_section.file, "logs/ticketing.log");
        assert_eq!(default_section.max_backups, Some(3));
    }

    #[test]
    fn yaml_file_overrides_defaults_and_creates_home() {
        let tmp = tempdir().unwrap();
        let path = write_cfg(
            &tmp,
            r#"
logging:
  default:
    console_level: warn
    file: ""
modules:
  ticketing:
    seed_demo_data: false
"#,
        );

        let cfg = AppConfig::load_layered(&path).unwrap();

        let home = PathBuf::from(&cfg.server.home_dir);
        assert!(home.is_absolute());
        assert!(home.is_dir());

        let default_section = &cfg.logging.as_ref().unwrap()["default"];
        assert_eq!(default_section.console_level, "warn");
        assert!(default_section.file.is_empty());

        let ticketing: SeedToggle = cfg.module_config("ticketing").unwrap();
        assert!(!ticketing.seed_demo_data);
    }

    #[test]
    fn server_section_alone_keeps_logging_unset() {
        let tmp = tempdir().unwrap();
        let path = write_cfg(&tmp, "");

        let cfg = AppConfig::load_layered(&path).unwrap();

        assert!(cfg.logging.is_none());
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let err = AppConfig::load_layered(tmp.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = write_cfg(&tmp, "database:\n  url: \"sqlite://x\"\n");
        assert!(AppConfig::load_layered(&path).is_err());
    }

    #[test]
    fn port_flag_and_verbosity_override_config() {
        let cases = [(0u8, "info"), (1, "debug"), (2, "trace"), (5, "trace")];
        for (verbose, level) in cases {
            let mut cfg = AppConfig::default();
            cfg.apply_cli_overrides(&CliArgs {
                port: Some(8081),
                verbose,
                ..Default::default()
            });

            assert_eq!(cfg.server.port, 8081);
            assert_eq!(
                cfg.logging.as_ref().unwrap()["default"].console_level,
                level,
                "verbose={verbose}"
            );
        }
    }

    #[test]
    fn verbosity_creates_logging_section_when_absent() {
        let mut cfg = AppConfig {
            logging: None,
            ..AppConfig::default()
        };
        cfg.apply_cli_overrides(&CliArgs {
            verbose: 1,
            ..Default::default()
        });
        assert_eq!(
            cfg.logging.as_ref().unwrap()["default"].console_level,
            "debug"
        );
    }

    #[test]
    fn module_files_fill_gaps_but_inline_entries_win() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("modules.d");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ticketing.yaml"), "seed_demo_data: true\ncapacity: 9\n").unwrap();
        fs::write(dir.join("api_ingress.yml"), "cors_enabled: true\n").unwrap();
        fs::write(dir.join("README.md"), "not config").unwrap();

        let path = write_cfg(
            &tmp,
            &format!(
                "modules_dir: \"{}\"\nmodules:\n  ticketing:\n    capacity: 1\n",
                dir.to_string_lossy().replace('\\', "/")
            ),
        );

        let cfg = AppConfig::load_layered(&path).unwrap();

        assert_eq!(cfg.modules["api_ingress"]["cors_enabled"], true);
        assert!(!cfg.modules.contains_key("README"));
        let ticketing: SeedToggle = cfg.module_config("ticketing").unwrap();
        assert_eq!(
            ticketing,
            SeedToggle {
                seed_demo_data: false,
                capacity: 1
            }
        );
    }

    #[test]
    fn module_config_falls_back_to_default_or_fails_on_bad_shape() {
        let mut cfg = AppConfig::default();
        let absent: SeedToggle = cfg.module_config("ticketing").unwrap();
        assert_eq!(absent, SeedToggle::default());

        cfg.modules
            .insert("ticketing".into(), serde_json::json!({ "capacity": -1 }));
        let err = cfg.module_config::<SeedToggle>("ticketing").unwrap_err();
        assert!(err.to_string().contains("ticketing"));
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let server = ServerConfig {
            host: "local host".into(),
            ..ServerConfig::default()
        };
        let err = server.bind_addr().unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[test]
    fn printed_yaml_reloads() {
        let mut cfg = AppConfig::default();
        cfg.modules
            .insert("ticketing".into(), serde_json::json!({ "seed_demo_data": false }));

        let yaml = cfg.to_yaml().unwrap();
        let back: AppConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(back.server.port, 3000);
        assert_eq!(back.modules["ticketing"]["seed_demo_data"], false);
    }
}
