use serde::{Deserialize, Serialize};
use signet_compiler_html::RenderOptions;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "signet.config.json";

/// Signet configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Default author written into integrity stamps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Output directory for rendered HTML
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Pretty print HTML
    #[serde(default)]
    pub pretty: bool,

    /// Outer table width in pixels
    #[serde(default = "default_table_width")]
    pub table_width: u32,

    /// Append an integrity stamp on export
    #[serde(default = "default_stamp")]
    pub stamp: bool,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_table_width() -> u32 {
    600
}

fn default_stamp() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pretty: self.pretty,
            table_width: self.table_width,
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: None,
            out_dir: default_out_dir(),
            pretty: false,
            table_width: default_table_width(),
            stamp: default_stamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "author": "Jane Doe",
            "outDir": "build",
            "pretty": true,
            "tableWidth": 480,
            "stamp": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.author.as_deref(), Some("Jane Doe"));
        assert_eq!(config.out_dir, "build");
        assert!(config.pretty);
        assert_eq!(config.table_width, 480);
        assert!(!config.stamp);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "pretty": true }"#).unwrap();
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.table_width, 600);
        assert!(config.stamp);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.author, None);
        assert_eq!(config.render_options().table_width, 600);
        assert!(!config.render_options().pretty);
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "outDir": "out", "tableWidth": 500 }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.get_out_dir(dir.path()), dir.path().join("out"));
        assert_eq!(config.table_width, 500);
    }
}
