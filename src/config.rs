use serde::Deserialize;
use std::{collections::HashMap, fs, path::{Path, PathBuf}};
use dirs::config_dir;
use tracing::debug;

use crate::data::{OsVariant, VariantPolicy};
use crate::error::{FetchError, Result};

/// Fallback location for a site-wide config
pub const SYSTEM_CONFIG_PATH: &str = "/usr/local/etc/bsdfetch/config.toml";

/// Everything here is optional; an absent file means all defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub colors: ColorConfig,
    pub logo: LogoConfig,
    /// Keyed by lowercase variant name (`freebsd`, `netbsd`, ...)
    pub policy: HashMap<String, PolicyOverride>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Logo block first, then one colored `label: value` per line
    #[default]
    Sequential,
    /// Logo on the left, report on the right
    Columns,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub layout: Layout,
    pub column_width: usize,
    pub color: ColorMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            layout: Layout::default(),
            column_width: 40,
            color: ColorMode::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ColorConfig {
    pub label: String,
    pub connector: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            label: "bright_red".to_string(),
            connector: "bright_green".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogoSource {
    #[default]
    Builtin,
    File,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogoConfig {
    pub enabled: bool,
    pub source: LogoSource,
    /// Extra directory searched first for `<variant>.txt`
    pub path: Option<String>,
}

impl Default for LogoConfig {
    fn default() -> Self {
        LogoConfig {
            enabled: true,
            source: LogoSource::default(),
            path: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(default)]
pub struct PolicyOverride {
    pub uptime_bias_secs: Option<i64>,
    pub squeeze_cpu_brand: Option<bool>,
}

impl Config {
    /// Default policy with any `[policy.<variant>]` overrides applied.
    pub fn policy_for(&self, variant: OsVariant) -> VariantPolicy {
        let mut policy = VariantPolicy::default();
        if let Some(over) = self.policy.get(variant.key()) {
            if let Some(bias) = over.uptime_bias_secs {
                policy.uptime_bias_secs = bias;
            }
            if let Some(squeeze) = over.squeeze_cpu_brand {
                policy.squeeze_cpu_brand = squeeze;
            }
        }
        policy
    }

    /// The configured logo directory with `~` expanded
    pub fn logo_dir(&self) -> Option<PathBuf> {
        self.logo
            .path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

/// User config first, then the system-wide one.
pub fn config_paths() -> Vec<PathBuf> {
    config_dir()
        .map(|p| p.join("bsdfetch/config.toml"))
        .into_iter()
        .chain(std::iter::once(PathBuf::from(SYSTEM_CONFIG_PATH)))
        .collect()
}

/// Load the first config file that exists, or defaults when none does.
pub fn load_config() -> Result<Config> {
    match config_paths().into_iter().find(|p| p.exists()) {
        Some(path) => load_config_from(&path),
        None => {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config");
    let data = fs::read_to_string(path).map_err(|e| FetchError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&data).map_err(|e| FetchError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.display.layout, Layout::Sequential);
        assert_eq!(config.display.column_width, 40);
        assert_eq!(config.display.color, ColorMode::Auto);
        assert_eq!(config.colors.label, "bright_red");
        assert!(config.logo.enabled);
        assert_eq!(config.logo.source, LogoSource::Builtin);
        assert_eq!(config.policy_for(OsVariant::NetBsd), VariantPolicy::default());
    }

    #[test]
    fn parses_every_section() {
        let config: Config = toml::from_str(
            r##"
            [display]
            layout = "columns"
            color = "never"

            [colors]
            label = "#ff0000"

            [logo]
            source = "file"
            path = "/opt/bsdfetch/ascii"

            [policy.freebsd]
            uptime_bias_secs = 0

            [policy.netbsd]
            squeeze_cpu_brand = false
            "##,
        )
        .unwrap();

        assert_eq!(config.display.layout, Layout::Columns);
        assert_eq!(config.display.column_width, 40);
        assert_eq!(config.display.color, ColorMode::Never);
        assert_eq!(config.colors.label, "#ff0000");
        assert_eq!(config.colors.connector, "bright_green");
        assert_eq!(config.logo.source, LogoSource::File);
        assert_eq!(config.logo_dir(), Some(PathBuf::from("/opt/bsdfetch/ascii")));

        let freebsd = config.policy_for(OsVariant::FreeBsd);
        assert_eq!(freebsd.uptime_bias_secs, 0);
        assert!(freebsd.squeeze_cpu_brand);

        let netbsd = config.policy_for(OsVariant::NetBsd);
        assert_eq!(netbsd.uptime_bias_secs, 30);
        assert!(!netbsd.squeeze_cpu_brand);
    }

    #[test]
    fn logo_dir_expands_tilde() {
        let mut config = Config::default();
        config.logo.path = Some("~/art".to_string());
        let dir = config.logo_dir().unwrap();
        assert!(dir.ends_with("art"));
        assert!(!dir.to_string_lossy().starts_with('~') || dirs::home_dir().is_none());

        config.logo.path = Some("   ".to_string());
        assert_eq!(config.logo_dir(), None);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nlayout = \"diagonal\"").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, FetchError::Config { .. }));
    }

    #[test]
    fn config_paths_end_with_system_path() {
        let paths = config_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(SYSTEM_CONFIG_PATH)));
    }
}
