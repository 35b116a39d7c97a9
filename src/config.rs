//! Configuration for the game-data sync.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of this)
//! 2. Environment variables (WAKFU_CONFIG_URL, WAKFU_CDN_BASE,
//!    WAKFU_OUTPUT_DIR, WAKFU_REQUEST_TIMEOUT)
//! 3. Config file (.wakfu/config.yaml, then the user config directory)
//! 4. Defaults (public CDN, current directory)
//!
//! Config file discovery:
//! - Searches current directory and parents for .wakfu/config.yaml
//! - Falls back to <config dir>/wakfu-gamedata/config.yaml
//! - A relative output_dir is resolved against the project root (the
//!   directory containing .wakfu/)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::{DEFAULT_BASE_URL, DEFAULT_CONFIG_URL};
use crate::core::{BracketTable, MalformedPolicy};

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub cdn: CdnConfig,
    /// Output root (relative to the project root)
    pub output_dir: Option<String>,
    /// Level thresholds overriding the built-in table
    pub brackets: Option<Vec<u32>>,
    #[serde(default)]
    pub skip_malformed_items: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CdnConfig {
    pub config_url: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// URL of the version document
    pub config_url: String,
    /// Base URL of the dataset dumps
    pub base_url: String,
    /// Per-request timeout, none by default
    pub request_timeout: Option<Duration>,
    /// Root of the output tree
    pub output_dir: PathBuf,
    /// Level thresholds
    pub brackets: BracketTable,
    /// Handling of malformed item records
    pub malformed: MalformedPolicy,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            config_url: DEFAULT_CONFIG_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            output_dir: PathBuf::from("."),
            brackets: BracketTable::default(),
            malformed: MalformedPolicy::Abort,
            config_file: None,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".wakfu").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?
        .join("wakfu-gamedata")
        .join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge defaults, an optional config file and environment lookups
fn resolve(
    file: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some((path, config)) = file {
        // .wakfu/config.yaml lives one level below the project root
        let base_dir = match path.parent() {
            Some(dir) if dir.file_name().is_some_and(|n| n == ".wakfu") => {
                dir.parent().unwrap_or(Path::new("."))
            }
            Some(dir) => dir,
            None => Path::new("."),
        };

        if let Some(url) = config.cdn.config_url {
            resolved.config_url = url;
        }
        if let Some(url) = config.cdn.base_url {
            resolved.base_url = url;
        }
        resolved.request_timeout = config.cdn.request_timeout_seconds.map(Duration::from_secs);
        if let Some(ref dir) = config.output_dir {
            resolved.output_dir = resolve_path(base_dir, dir);
        }
        if let Some(thresholds) = config.brackets {
            resolved.brackets = BracketTable::new(thresholds)
                .with_context(|| format!("Invalid brackets in {}", path.display()))?;
        }
        if config.skip_malformed_items {
            resolved.malformed = MalformedPolicy::Skip;
        }
        resolved.config_file = Some(path);
    }

    if let Some(url) = env("WAKFU_CONFIG_URL") {
        resolved.config_url = url;
    }
    if let Some(url) = env("WAKFU_CDN_BASE") {
        resolved.base_url = url;
    }
    if let Some(dir) = env("WAKFU_OUTPUT_DIR") {
        resolved.output_dir = PathBuf::from(dir);
    }
    if let Some(secs) = env("WAKFU_REQUEST_TIMEOUT") {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("WAKFU_REQUEST_TIMEOUT must be whole seconds, got '{}'", secs))?;
        resolved.request_timeout = Some(Duration::from_secs(secs));
    }

    Ok(resolved)
}

/// Load configuration from all sources.
///
/// An explicit path wins over discovery and must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };

    let file = match path {
        Some(p) => {
            let config = load_config_file(&p)?;
            Some((p, config))
        }
        None => None,
    };

    resolve(file, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(None, no_env).unwrap();

        assert_eq!(config.config_url, DEFAULT_CONFIG_URL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.request_timeout.is_none());
        assert_eq!(config.malformed, MalformedPolicy::Abort);
        assert_eq!(config.brackets, BracketTable::default());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let wakfu_dir = temp.path().join(".wakfu");
        std::fs::create_dir_all(&wakfu_dir).unwrap();

        let config_path = wakfu_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
cdn:
  base_url: http://mirror.local/gamedata
  request_timeout_seconds: 30
output_dir: dumps
brackets: [10, 50, 100]
skip_malformed_items: true
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.cdn.base_url.as_deref(), Some("http://mirror.local/gamedata"));
        assert!(parsed.cdn.config_url.is_none());

        let config = resolve(Some((config_path.clone(), parsed)), no_env).unwrap();
        assert_eq!(config.base_url, "http://mirror.local/gamedata");
        assert_eq!(config.config_url, DEFAULT_CONFIG_URL);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.output_dir, temp.path().join("dumps"));
        assert_eq!(config.brackets.thresholds(), &[10, 50, 100]);
        assert_eq!(config.malformed, MalformedPolicy::Skip);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_invalid_brackets_rejected() {
        let file = ConfigFile {
            brackets: Some(vec![50, 10]),
            ..Default::default()
        };
        let err = resolve(Some((PathBuf::from("/p/.wakfu/config.yaml"), file)), no_env)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid brackets"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            output_dir: Some("from-file".to_string()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("WAKFU_OUTPUT_DIR", "/tmp/from-env"),
            ("WAKFU_CDN_BASE", "http://env/gamedata"),
            ("WAKFU_REQUEST_TIMEOUT", "5"),
        ]
        .into_iter()
        .collect();

        let config = resolve(
            Some((PathBuf::from("/p/.wakfu/config.yaml"), file)),
            |k| env.get(k).map(|v| v.to_string()),
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/from-env"));
        assert_eq!(config.base_url, "http://env/gamedata");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_timeout_env_is_an_error() {
        let result = resolve(None, |k| {
            (k == "WAKFU_REQUEST_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./out"),
            PathBuf::from("/home/user/project/./out")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
