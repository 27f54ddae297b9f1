use super::types::{
    DEFAULT_HOST, DEFAULT_PORT, MockdrillConfig, RawMockdrillConfig, ServerSection,
};
use anyhow::Result;
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<MockdrillConfig> {
        let mut raw = RawMockdrillConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            let contents = std::fs::read_to_string(&user_path)?;
            let user_config: RawMockdrillConfig = toml::from_str(&contents)?;
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            let contents = std::fs::read_to_string(&project_path)?;
            let project_config: RawMockdrillConfig = toml::from_str(&contents)?;
            raw = Self::merge_raw(raw, project_config);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mockdrill").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with MOCKDRILL_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("MOCKDRILL_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".mockdrill/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawMockdrillConfig, overlay: RawMockdrillConfig) -> RawMockdrillConfig {
        RawMockdrillConfig {
            server: super::types::RawServerSection {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                bank_url: overlay.server.bank_url.or(base.server.bank_url),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawMockdrillConfig) -> MockdrillConfig {
        MockdrillConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
                bank_url: raw.server.bank_url,
            },
        }
    }

    /// Save config to a specific path
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to_path(config: &MockdrillConfig, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        std::fs::write(path, toml)?;

        Ok(())
    }

    /// Load config from a specific path (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &std::path::Path) -> Result<MockdrillConfig> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(MockdrillConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    use crate::config::types::RawServerSection;

    // ==================== Save Tests ====================

    #[test]
    fn test_save_creates_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = MockdrillConfig {
            server: ServerSection {
                host: "127.0.0.1".to_string(),
                port: 8080,
                bank_url: None,
            },
        };

        ConfigLoader::save_to_path(&config, &path).unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("host = \"127.0.0.1\""));
        assert!(contents.contains("port = 8080"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir
            .path()
            .join("nested")
            .join("deep")
            .join("config.toml");

        ConfigLoader::save_to_path(&MockdrillConfig::default(), &path).unwrap();

        assert!(path.exists());
    }

    // ==================== Load Tests ====================

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.toml");

        let config = ConfigLoader::load_from_path(&path).unwrap();

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.host, DEFAULT_HOST);
    }

    #[test]
    fn test_load_from_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9999
bank_url = "http://localhost:9000/api"
"#
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(&path).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(
            config.server.bank_url,
            Some("http://localhost:9000/api".to_string())
        );
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.toml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = ConfigLoader::load_from_path(&path);
        assert!(result.is_err());
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_merge_raw_overlay_overrides_base() {
        let base = RawMockdrillConfig {
            server: RawServerSection {
                host: Some("127.0.0.1".to_string()),
                port: Some(8321),
                bank_url: Some("http://base/api".to_string()),
            },
        };

        let overlay = RawMockdrillConfig {
            server: RawServerSection {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                bank_url: None, // Should preserve base value
            },
        };

        let merged = ConfigLoader::merge_raw(base, overlay);

        assert_eq!(merged.server.host, Some("0.0.0.0".to_string()));
        assert_eq!(merged.server.port, Some(8080));
        assert_eq!(merged.server.bank_url, Some("http://base/api".to_string()));
    }

    #[test]
    fn test_merge_raw_none_preserves_base() {
        let base = RawMockdrillConfig {
            server: RawServerSection {
                host: Some("0.0.0.0".to_string()),
                port: Some(9000),
                bank_url: None,
            },
        };

        let overlay = RawMockdrillConfig::default();

        let merged = ConfigLoader::merge_raw(base, overlay);

        assert_eq!(merged.server.host, Some("0.0.0.0".to_string()));
        assert_eq!(merged.server.port, Some(9000));
    }

    #[test]
    fn test_user_config_path_returns_some() {
        let path = ConfigLoader::user_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("mockdrill"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
