//! Configuration file support for gyre.
//!
//! Loads optional `.gyre/config.toml` from the workspace root.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GyreConfig {
    pub resolve: ResolveConfig,
    pub scan: ScanConfig,
}

/// Resolution settings: how specifiers map onto workspace files.
/// Empty lists mean "use the built-in defaults".
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Alias prefix -> workspace-relative directory.
    /// Example: `aliases = { "@app" = "src", "@ui" = "packages/ui/src" }`
    pub aliases: HashMap<String, String>,
    /// Extensions tried when a specifier has no direct on-disk match.
    pub extensions: Vec<String>,
    /// Directory-index filenames tried after the extension chain.
    pub barrels: Vec<String>,
}

/// Scan settings: what to walk and how deep to search.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns excluded from the graph.
    pub ignore: Vec<String>,
    pub max_depth: Option<usize>,
    pub report_all_cycles: Option<bool>,
}

impl GyreConfig {
    /// Load config from `.gyre/config.toml` in the given root directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".gyre").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[gyre][warn] Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[gyre][warn] Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_empty() {
        let config = GyreConfig::default();
        assert!(config.resolve.aliases.is_empty());
        assert!(config.resolve.extensions.is_empty());
        assert!(config.scan.ignore.is_empty());
        assert_eq!(config.scan.max_depth, None);
        assert_eq!(config.scan.report_all_cycles, None);
    }

    #[test]
    fn load_missing_file_yields_default() {
        let temp = TempDir::new().expect("temp dir");
        let config = GyreConfig::load(temp.path());
        assert!(config.resolve.aliases.is_empty());
    }

    #[test]
    fn load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let gyre_dir = temp.path().join(".gyre");
        std::fs::create_dir_all(&gyre_dir).expect("create .gyre");

        let config_path = gyre_dir.join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create config");
        writeln!(
            file,
            r#"
[resolve]
aliases = {{ "@app" = "src", "@ui" = "packages/ui/src" }}
extensions = ["ts", "tsx"]
barrels = ["index.ts"]

[scan]
ignore = ["**/generated/**"]
max_depth = 12
report_all_cycles = true
"#
        )
        .expect("write config");

        let config = GyreConfig::load(temp.path());
        assert_eq!(
            config.resolve.aliases.get("@ui").map(String::as_str),
            Some("packages/ui/src")
        );
        assert_eq!(config.resolve.extensions, vec!["ts", "tsx"]);
        assert_eq!(config.resolve.barrels, vec!["index.ts"]);
        assert_eq!(config.scan.ignore, vec!["**/generated/**"]);
        assert_eq!(config.scan.max_depth, Some(12));
        assert_eq!(config.scan.report_all_cycles, Some(true));
    }

    #[test]
    fn malformed_config_degrades_to_default() {
        let temp = TempDir::new().expect("temp dir");
        let gyre_dir = temp.path().join(".gyre");
        std::fs::create_dir_all(&gyre_dir).expect("create .gyre");
        std::fs::write(gyre_dir.join("config.toml"), "resolve = 3\n").expect("write config");

        let config = GyreConfig::load(temp.path());
        assert!(config.resolve.aliases.is_empty());
        assert_eq!(config.scan.max_depth, None);
    }
}
