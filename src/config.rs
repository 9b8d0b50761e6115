use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".monaco-prompt";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Directory layout. Relative paths resolve against the extension root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding one subdirectory per installed plugin.
    /// Defaults to the parent of the extension root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_root: Option<PathBuf>,

    /// Bundled CSV autocomplete files
    #[serde(default = "default_csv_source_dir")]
    pub csv_source_dir: PathBuf,

    /// Directory CSV files are staged into and served from
    #[serde(default = "default_served_dir")]
    pub served_dir: PathBuf,

    /// Directory for per-user settings files
    #[serde(default = "default_settings_dir")]
    pub settings_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plugin_root: None,
            csv_source_dir: default_csv_source_dir(),
            served_dir: default_served_dir(),
            settings_dir: default_settings_dir(),
        }
    }
}

fn default_csv_source_dir() -> PathBuf {
    PathBuf::from("csv")
}

fn default_served_dir() -> PathBuf {
    PathBuf::from("comfy")
}

fn default_settings_dir() -> PathBuf {
    PathBuf::from("settings")
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix for the csv and snippet routes
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Settings get/set endpoint
    #[serde(default = "default_settings_path")]
    pub settings_path: String,

    /// Mount point for static files from the served directory
    #[serde(default = "default_static_mount")]
    pub static_mount: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            route_prefix: default_route_prefix(),
            settings_path: default_settings_path(),
            static_mount: default_static_mount(),
        }
    }
}

impl ServerConfig {
    /// Fixed routes under `route_prefix`, plus the health check.
    pub fn api_routes(&self) -> Vec<String> {
        let prefix = self.route_prefix.trim_end_matches('/');
        vec![
            format!("{prefix}/csv"),
            format!("{prefix}/snippets"),
            format!("{prefix}/snippets/refresh"),
            "/health".to_string(),
        ]
    }

    /// Check that the configured paths can be mounted on one router.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("route_prefix", &self.route_prefix),
            ("settings_path", &self.settings_path),
            ("static_mount", &self.static_mount),
        ] {
            ensure!(
                value.starts_with('/'),
                "server.{key} must start with '/', got {value:?}"
            );
        }

        let mount = self.static_mount.trim_end_matches('/');
        if mount.is_empty() {
            bail!("server.static_mount cannot be the root path");
        }

        let routes = self.api_routes();
        if routes.contains(&self.settings_path) {
            bail!(
                "server.settings_path {:?} collides with a built-in route",
                self.settings_path
            );
        }
        if self.settings_path.trim_end_matches('/') == mount
            || routes.iter().any(|route| route == mount)
        {
            bail!(
                "server.static_mount {:?} collides with an API route",
                self.static_mount
            );
        }

        Ok(())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8189
}

fn default_route_prefix() -> String {
    "/webui-monaco-prompt".to_string()
}

fn default_settings_path() -> String {
    "/webui-monaco-prompt/settings".to_string()
}

fn default_static_mount() -> String {
    "/extensions/webui-monaco-prompt".to_string()
}

/// Cookie-token authentication for the settings endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// When false, every caller shares the global settings file
    #[serde(default)]
    pub enabled: bool,

    /// Access token to user name, as issued by the host application
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Level for the file log: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory, relative to the extension root unless absolute
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// File name prefix for log files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: hourly, daily, minutely, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: true,
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "monaco-prompt.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .monaco-prompt directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = Self::config_path(root);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))?;
            config
                .server
                .validate()
                .with_context(|| format!("Invalid server paths in {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .monaco-prompt directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = Self::config_dir(root);
        let config_path = Self::config_path(root);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    pub fn config_path(root: &Path) -> PathBuf {
        Self::config_dir(root).join(CONFIG_FILE)
    }

    /// Directory scanned for `<plugin>/snippets/*.json`
    pub fn plugin_root(&self, root: &Path) -> PathBuf {
        match &self.paths.plugin_root {
            Some(dir) => resolve(root, dir),
            None => root
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
        }
    }

    pub fn csv_source_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.paths.csv_source_dir)
    }

    pub fn served_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.paths.served_dir)
    }

    pub fn settings_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.paths.settings_dir)
    }
}

fn resolve(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}
