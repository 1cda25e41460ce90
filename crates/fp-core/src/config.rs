// ABOUTME: Layout configuration handling.
// ABOUTME: Loads and saves pane arrangements from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Alignment, Color, Direction, RemainderPolicy, SizeConstraint};

/// One pane of the configured arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneConfig {
    /// Static text shown in the pane
    pub text: String,

    /// Size along the primary axis ("grow", "30", "fixed:30")
    pub size: SizeConstraint,

    /// Cross-axis placement of the pane's content
    pub align: Alignment,

    /// Cap on the content width used for alignment (0 = unbounded)
    pub max_width: u16,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: SizeConstraint::Grow,
            align: Alignment::Start,
            max_width: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Axis the panes are laid out along
    pub direction: Direction,

    /// Treatment of the rounding remainder between flexible panes
    pub remainder: RemainderPolicy,

    /// Character used for whitespace fill
    pub fill: char,

    /// Frame size used when the terminal size cannot be determined
    pub width: u16,
    pub height: u16,

    /// Whitespace fill color (terminal default when unset)
    pub background: Option<Color>,

    /// Panes in layout order
    pub panes: Vec<PaneConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            remainder: RemainderPolicy::Discard,
            fill: ' ',
            width: 80,
            height: 24,
            background: None,
            panes: vec![
                PaneConfig {
                    text: "sidebar".to_string(),
                    size: SizeConstraint::Fixed(20),
                    ..PaneConfig::default()
                },
                PaneConfig {
                    text: "main".to_string(),
                    align: Alignment::Center,
                    ..PaneConfig::default()
                },
                PaneConfig {
                    text: "details".to_string(),
                    align: Alignment::End,
                    ..PaneConfig::default()
                },
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/flexpane/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flexpane").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a path that may not exist yet.
    ///
    /// A missing file is `Ok(None)`; unreadable or malformed files are errors.
    pub fn load_if_exists(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Constraint list in pane order
    pub fn pane_sizes(&self) -> Vec<SizeConstraint> {
        self.panes.iter().map(|p| p.size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let config = Config::from_toml(
            r#"
            direction = "vertical"

            [[panes]]
            text = "header"
            size = "3"

            [[panes]]
            text = "body"
            size = "grow"
            align = "center"
            max_width = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.direction, Direction::Vertical);
        assert_eq!(config.remainder, RemainderPolicy::Discard);
        assert_eq!(config.fill, ' ');
        assert_eq!(
            config.pane_sizes(),
            vec![SizeConstraint::Fixed(3), SizeConstraint::Grow]
        );
        assert_eq!(config.panes[1].align, Alignment::Center);
        assert_eq!(config.panes[1].max_width, 40);
    }

    #[test]
    fn invalid_constraint_is_a_parse_error() {
        let err = Config::from_toml("[[panes]]\nsize = \"huge\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn save_and_load() {
        let mut config = Config::default();
        config.background = Some(Color::SLATE);
        config.remainder = RemainderPolicy::LastFlexible;

        let path = std::env::temp_dir()
            .join("flexpane-config-test")
            .join("config.toml");
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir()
            .join("flexpane-config-missing")
            .join("config.toml");
        assert!(Config::load_if_exists(&path).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = std::env::temp_dir().join("flexpane-config-malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "direction = \"diagonal\"\n").unwrap();

        let err = Config::load_if_exists(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        std::fs::write(&path, "width = 100\n").unwrap();
        let loaded = Config::load_if_exists(&path).unwrap().unwrap();
        assert_eq!(loaded.width, 100);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn default_path_is_namespaced() {
        if let Some(p) = Config::default_path() {
            assert!(p.ends_with("flexpane/config.toml"));
        }
    }
}
